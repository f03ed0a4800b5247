use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::core::parse::parse_id;
use crate::modules::payments::models::{CreatePaymentRequest, UpdatePaymentRequest};
use crate::modules::payments::services::PaymentService;
use crate::modules::reports::filters::PaymentListParams;
use crate::modules::reports::services::ListingService;

/// List payments joined with member and membership
/// GET /payments
pub async fn list_payments(
    listing: web::Data<Arc<ListingService>>,
    query: web::Query<PaymentListParams>,
) -> Result<HttpResponse, AppError> {
    let payments = listing.list_payments(&query).await?;
    Ok(HttpResponse::Ok().json(payments))
}

/// POST /payments
pub async fn create_payment(
    service: web::Data<Arc<PaymentService>>,
    request: web::Json<CreatePaymentRequest>,
) -> Result<HttpResponse, AppError> {
    let payment = service.create_payment(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(payment))
}

/// GET /payments/{id}
pub async fn get_payment(
    service: web::Data<Arc<PaymentService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path.into_inner(), "payment")?;
    let payment = service.get_payment(id).await?;
    Ok(HttpResponse::Ok().json(payment))
}

/// PATCH /payments/{id}
pub async fn update_payment(
    service: web::Data<Arc<PaymentService>>,
    path: web::Path<String>,
    request: web::Json<UpdatePaymentRequest>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path.into_inner(), "payment")?;
    let payment = service.update_payment(id, request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(payment))
}

/// POST /payments/{id}/mark-paid
pub async fn mark_paid(
    service: web::Data<Arc<PaymentService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path.into_inner(), "payment")?;
    let payment = service.mark_paid(id).await?;
    Ok(HttpResponse::Ok().json(payment))
}

/// DELETE /payments/{id}
pub async fn delete_payment(
    service: web::Data<Arc<PaymentService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path.into_inner(), "payment")?;
    service.delete_payment(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/payments")
            .route("", web::get().to(list_payments))
            .route("", web::post().to(create_payment))
            .route("/{id}", web::get().to(get_payment))
            .route("/{id}", web::patch().to(update_payment))
            .route("/{id}", web::delete().to(delete_payment))
            .route("/{id}/mark-paid", web::post().to(mark_paid)),
    );
}
