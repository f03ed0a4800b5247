use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::core::parse::parse_id;
use crate::modules::employees::models::{CreateEmployeeRequest, UpdateEmployeeRequest};
use crate::modules::employees::services::EmployeeService;
use crate::modules::reports::filters::EmployeeListParams;
use crate::modules::reports::services::ListingService;

/// GET /employees
pub async fn list_employees(
    listing: web::Data<Arc<ListingService>>,
    query: web::Query<EmployeeListParams>,
) -> Result<HttpResponse, AppError> {
    let employees = listing.list_employees(&query).await?;
    Ok(HttpResponse::Ok().json(employees))
}

/// POST /employees
pub async fn create_employee(
    service: web::Data<Arc<EmployeeService>>,
    request: web::Json<CreateEmployeeRequest>,
) -> Result<HttpResponse, AppError> {
    let employee = service.create_employee(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(employee))
}

/// GET /employees/{id}
pub async fn get_employee(
    service: web::Data<Arc<EmployeeService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path.into_inner(), "employee")?;
    let employee = service.get_employee(id).await?;
    Ok(HttpResponse::Ok().json(employee))
}

/// PATCH /employees/{id}
pub async fn update_employee(
    service: web::Data<Arc<EmployeeService>>,
    path: web::Path<String>,
    request: web::Json<UpdateEmployeeRequest>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path.into_inner(), "employee")?;
    let employee = service.update_employee(id, request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(employee))
}

/// DELETE /employees/{id}
pub async fn delete_employee(
    service: web::Data<Arc<EmployeeService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path.into_inner(), "employee")?;
    service.delete_employee(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/employees")
            .route("", web::get().to(list_employees))
            .route("", web::post().to(create_employee))
            .route("/{id}", web::get().to(get_employee))
            .route("/{id}", web::patch().to(update_employee))
            .route("/{id}", web::delete().to(delete_employee)),
    );
}
