use std::sync::Arc;

use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::modules::reports::export;
use crate::modules::reports::filters::{
    BalanceDueParams, MemberListParams, PaymentListParams, RecentFollowUpParams, SalesParams,
};
use crate::modules::reports::services::{ListingService, ReportService};

/// Headline KPIs
/// GET /reports/dashboard
pub async fn get_dashboard(
    reports: web::Data<Arc<ReportService>>,
) -> Result<HttpResponse, AppError> {
    let stats = reports.dashboard().await?;
    Ok(HttpResponse::Ok().json(stats))
}

/// Five pending follow-ups due soonest
/// GET /reports/follow-ups/recent
pub async fn get_recent_follow_ups(
    reports: web::Data<Arc<ReportService>>,
    query: web::Query<RecentFollowUpParams>,
) -> Result<HttpResponse, AppError> {
    let follow_ups = reports.recent_follow_ups(&query).await?;
    Ok(HttpResponse::Ok().json(follow_ups))
}

/// GET /reports/charts
pub async fn get_charts(reports: web::Data<Arc<ReportService>>) -> Result<HttpResponse, AppError> {
    let charts = reports.charts().await?;
    Ok(HttpResponse::Ok().json(charts))
}

/// Outstanding invoices with overdue/upcoming figures
/// GET /reports/balance-due?search=&due=all|overdue|upcoming
pub async fn get_balance_due(
    reports: web::Data<Arc<ReportService>>,
    query: web::Query<BalanceDueParams>,
) -> Result<HttpResponse, AppError> {
    let report = reports.balance_due(&query).await?;
    Ok(HttpResponse::Ok().json(report))
}

/// GET /reports/sales?date_range=&start_date=&end_date=&payment_mode=&search=
pub async fn get_sales(
    reports: web::Data<Arc<ReportService>>,
    query: web::Query<SalesParams>,
) -> Result<HttpResponse, AppError> {
    let report = reports.sales(&query).await?;
    Ok(HttpResponse::Ok().json(report))
}

/// GET /reports/export/members
pub async fn export_members(
    listing: web::Data<Arc<ListingService>>,
    query: web::Query<MemberListParams>,
) -> Result<HttpResponse, AppError> {
    let clock = listing.clock();
    let members = listing.list_members(&query).await?.members;
    csv_response("members.csv", export::members_csv(&members, &clock)?)
}

/// GET /reports/export/payments
pub async fn export_payments(
    listing: web::Data<Arc<ListingService>>,
    query: web::Query<PaymentListParams>,
) -> Result<HttpResponse, AppError> {
    let clock = listing.clock();
    let payments = listing.list_payments_at(&query, &clock).await?.payments;
    csv_response("payments.csv", export::payments_csv(&payments, &clock)?)
}

/// GET /reports/export/balance-due
pub async fn export_balance_due(
    reports: web::Data<Arc<ReportService>>,
    query: web::Query<BalanceDueParams>,
) -> Result<HttpResponse, AppError> {
    let clock = reports.clock();
    let report = reports.balance_due_at(&query, &clock).await?;
    csv_response("balance-due.csv", export::balance_due_csv(&report, &clock)?)
}

/// GET /reports/export/sales
pub async fn export_sales(
    reports: web::Data<Arc<ReportService>>,
    query: web::Query<SalesParams>,
) -> Result<HttpResponse, AppError> {
    let clock = reports.clock();
    let report = reports.sales_at(&query, &clock).await?;
    csv_response("sales.csv", export::sales_csv(&report, &clock)?)
}

fn csv_response(filename: &str, body: String) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(filename.to_string())],
        })
        .body(body))
}

/// Configure routes for reports module
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reports")
            .route("/dashboard", web::get().to(get_dashboard))
            .route("/follow-ups/recent", web::get().to(get_recent_follow_ups))
            .route("/charts", web::get().to(get_charts))
            .route("/balance-due", web::get().to(get_balance_due))
            .route("/sales", web::get().to(get_sales))
            .route("/export/members", web::get().to(export_members))
            .route("/export/payments", web::get().to(export_payments))
            .route("/export/balance-due", web::get().to(export_balance_due))
            .route("/export/sales", web::get().to(export_sales)),
    );
}
