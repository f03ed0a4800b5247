use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::core::parse::parse_id;
use crate::modules::follow_ups::models::{CreateFollowUpRequest, UpdateFollowUpStatusRequest};
use crate::modules::follow_ups::services::FollowUpService;
use crate::modules::reports::filters::FollowUpListParams;
use crate::modules::reports::services::ListingService;

/// GET /follow-ups
pub async fn list_follow_ups(
    listing: web::Data<Arc<ListingService>>,
    query: web::Query<FollowUpListParams>,
) -> Result<HttpResponse, AppError> {
    let follow_ups = listing.list_follow_ups(&query).await?;
    Ok(HttpResponse::Ok().json(follow_ups))
}

/// POST /follow-ups
pub async fn create_follow_up(
    service: web::Data<Arc<FollowUpService>>,
    request: web::Json<CreateFollowUpRequest>,
) -> Result<HttpResponse, AppError> {
    let follow_up = service.create_follow_up(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(follow_up))
}

/// PATCH /follow-ups/{id}
pub async fn update_follow_up_status(
    service: web::Data<Arc<FollowUpService>>,
    path: web::Path<String>,
    request: web::Json<UpdateFollowUpStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path.into_inner(), "follow-up")?;
    let follow_up = service.update_status(id, request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(follow_up))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/follow-ups")
            .route("", web::get().to(list_follow_ups))
            .route("", web::post().to(create_follow_up))
            .route("/{id}", web::patch().to(update_follow_up_status)),
    );
}
