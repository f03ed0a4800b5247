use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::modules::enquiries::models::CreateEnquiryRequest;
use crate::modules::enquiries::services::EnquiryService;
use crate::modules::reports::filters::EnquiryListParams;
use crate::modules::reports::services::ListingService;

/// GET /enquiries
pub async fn list_enquiries(
    listing: web::Data<Arc<ListingService>>,
    query: web::Query<EnquiryListParams>,
) -> Result<HttpResponse, AppError> {
    let enquiries = listing.list_enquiries(&query).await?;
    Ok(HttpResponse::Ok().json(enquiries))
}

/// GET /enquiries/stats
pub async fn enquiry_stats(
    service: web::Data<Arc<EnquiryService>>,
) -> Result<HttpResponse, AppError> {
    let stats = service.enquiry_stats().await?;
    Ok(HttpResponse::Ok().json(stats))
}

/// POST /enquiries
pub async fn create_enquiry(
    service: web::Data<Arc<EnquiryService>>,
    request: web::Json<CreateEnquiryRequest>,
) -> Result<HttpResponse, AppError> {
    let enquiry = service.create_enquiry(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(enquiry))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/enquiries")
            .route("", web::get().to(list_enquiries))
            .route("", web::post().to(create_enquiry))
            .route("/stats", web::get().to(enquiry_stats)),
    );
}
