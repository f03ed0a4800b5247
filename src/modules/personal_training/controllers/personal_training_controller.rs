use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::modules::personal_training::models::CreatePersonalTrainingRequest;
use crate::modules::personal_training::services::PersonalTrainingService;
use crate::modules::reports::filters::PersonalTrainingListParams;
use crate::modules::reports::services::ListingService;

/// GET /personal-training?member_id=
pub async fn list_personal_training(
    listing: web::Data<Arc<ListingService>>,
    query: web::Query<PersonalTrainingListParams>,
) -> Result<HttpResponse, AppError> {
    let packages = listing.list_personal_training(&query).await?;
    Ok(HttpResponse::Ok().json(packages))
}

/// POST /personal-training
pub async fn create_personal_training(
    service: web::Data<Arc<PersonalTrainingService>>,
    request: web::Json<CreatePersonalTrainingRequest>,
) -> Result<HttpResponse, AppError> {
    let enrollment = service
        .create_personal_training(request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(enrollment))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/personal-training")
            .route("", web::get().to(list_personal_training))
            .route("", web::post().to(create_personal_training)),
    );
}
