use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::modules::memberships::models::CreateMembershipRequest;
use crate::modules::memberships::services::MembershipService;
use crate::modules::reports::services::ListingService;

/// Active packages with member counts
/// GET /memberships
pub async fn list_memberships(
    listing: web::Data<Arc<ListingService>>,
) -> Result<HttpResponse, AppError> {
    let memberships = listing.list_memberships().await?;
    Ok(HttpResponse::Ok().json(memberships))
}

/// POST /memberships
pub async fn create_membership(
    service: web::Data<Arc<MembershipService>>,
    request: web::Json<CreateMembershipRequest>,
) -> Result<HttpResponse, AppError> {
    let membership = service.create_membership(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(membership))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/memberships")
            .route("", web::get().to(list_memberships))
            .route("", web::post().to(create_membership)),
    );
}
