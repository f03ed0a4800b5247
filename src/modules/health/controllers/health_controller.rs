use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::modules::memberships::repositories::MembershipQuery;
use crate::store::EntityStore;

/// Health check response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub service: String,
}

/// Readiness probe response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub store: String,
}

/// GET /health - Liveness probe
/// Does not touch the store
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        service: "gymdesk".to_string(),
    })
}

/// GET /ready - Readiness probe
/// 503 while the store cannot answer a trivial count
pub async fn readiness_check(store: web::Data<Arc<EntityStore>>) -> impl Responder {
    match store.memberships.count(&MembershipQuery::active()).await {
        Ok(_) => HttpResponse::Ok().json(ReadinessResponse {
            ready: true,
            store: "available".to_string(),
        }),
        Err(e) => {
            tracing::error!("Store readiness check failed: {}", e);
            HttpResponse::ServiceUnavailable().json(ReadinessResponse {
                ready: false,
                store: "unavailable".to_string(),
            })
        }
    }
}

/// Configure health check routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/ready", web::get().to(readiness_check));
}
