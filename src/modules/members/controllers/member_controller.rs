use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::core::parse::parse_id;
use crate::modules::members::models::{CreateMemberRequest, UpdateMemberRequest};
use crate::modules::members::services::MemberService;
use crate::modules::reports::filters::MemberListParams;
use crate::modules::reports::services::ListingService;

/// List members with status/search filters and per-status counts
/// GET /members
pub async fn list_members(
    listing: web::Data<Arc<ListingService>>,
    query: web::Query<MemberListParams>,
) -> Result<HttpResponse, AppError> {
    let listing = listing.list_members(&query).await?;
    Ok(HttpResponse::Ok().json(listing))
}

/// Member profile: payments, personal training and follow-ups
/// GET /members/{id}
pub async fn get_member_profile(
    listing: web::Data<Arc<ListingService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let profile = listing.member_profile(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// POST /members
pub async fn create_member(
    service: web::Data<Arc<MemberService>>,
    request: web::Json<CreateMemberRequest>,
) -> Result<HttpResponse, AppError> {
    let member = service.create_member(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(member))
}

/// PATCH /members/{id}
pub async fn update_member(
    service: web::Data<Arc<MemberService>>,
    path: web::Path<String>,
    request: web::Json<UpdateMemberRequest>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path.into_inner(), "member")?;
    let member = service.update_member(id, request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(member))
}

/// DELETE /members/{id}
pub async fn delete_member(
    service: web::Data<Arc<MemberService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path.into_inner(), "member")?;
    service.delete_member(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Configure member routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/members")
            .route("", web::get().to(list_members))
            .route("", web::post().to(create_member))
            .route("/{id}", web::get().to(get_member_profile))
            .route("/{id}", web::patch().to(update_member))
            .route("/{id}", web::delete().to(delete_member)),
    );
}
