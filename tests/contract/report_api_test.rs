//! Contract tests for the report and record endpoints
//!
//! Each test wires the full `/api` surface over a fresh in-memory store and
//! checks response status, content type and JSON shape.

use actix_web::http::{header, StatusCode};
use actix_web::{test, App};
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::str::FromStr;

use gymdesk::{AppServices, EntityStore};

#[path = "../helpers/mod.rs"]
mod helpers;
use helpers::gym_offset;

fn amount(value: &Value) -> Decimal {
    match value {
        Value::String(s) => Decimal::from_str(s).unwrap(),
        other => Decimal::from_str(&other.to_string()).unwrap(),
    }
}

macro_rules! get_json {
    ($app:expr, $uri:expr) => {{
        let req = test::TestRequest::get().uri($uri).to_request();
        let resp = test::call_service(&$app, req).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

macro_rules! post_json {
    ($app:expr, $uri:expr, $body:expr $(,)?) => {{
        let req = test::TestRequest::post().uri($uri).set_json($body).to_request();
        let resp = test::call_service(&$app, req).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

macro_rules! init_app {
    () => {{
        let services = AppServices::new(EntityStore::in_memory(), gym_offset());
        test::init_service(App::new().configure(|cfg| services.configure(cfg))).await
    }};
}

/// Seed one member with an overdue partially-paid invoice
macro_rules! seed_overdue {
    ($app:expr) => {{
        let (status, member) = post_json!(
            $app,
            "/api/members",
            json!({
                "first_name": "Ravi",
                "last_name": "Shah",
                "phone": "9876543210",
                "gender": "Male"
            }),
        );
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(member["client_id"], "MEM000001");
        let member_id = member["id"].as_str().unwrap().to_string();

        let (status, payment) = post_json!(
            $app,
            "/api/payments",
            json!({
                "member_id": member_id,
                "plan_total": 2000,
                "paid": 500,
                "payment_mode": "Online",
                "due_date": (Utc::now() - Duration::days(1)).to_rfc3339()
            }),
        );
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(payment["invoice_number"], "INV-000001");
        assert_eq!(payment["status"], "BALANCE_DUE");

        member_id
    }};
}

#[actix_web::test]
async fn test_health_probes() {
    let app = init_app!();

    let (status, body) = get_json!(app, "/health");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "gymdesk");

    let (status, body) = get_json!(app, "/ready");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ready"], true);
}

#[actix_web::test]
async fn test_dashboard_contract() {
    let app = init_app!();
    seed_overdue!(app);

    let (status, body) = get_json!(app, "/api/reports/dashboard");
    assert_eq!(status, StatusCode::OK);

    assert!(body.get("generated_at").is_some());
    assert_eq!(body["members"]["total"], 1);
    assert_eq!(body["members"]["active"], 1);
    assert!(body["members"].get("upcoming_renewals").is_some());
    assert_eq!(body["sales"]["total"]["count"], 1);
    assert_eq!(amount(&body["sales"]["total"]["amount"]), Decimal::from(2000));
    assert_eq!(amount(&body["balance"]["paid"]), Decimal::from(500));
    assert_eq!(amount(&body["balance"]["due"]), Decimal::from(1500));
    assert_eq!(body["pending_follow_ups"], 0);
}

#[actix_web::test]
async fn test_balance_due_contract() {
    let app = init_app!();
    seed_overdue!(app);

    let (status, body) = get_json!(app, "/api/reports/balance-due?due=overdue");
    assert_eq!(status, StatusCode::OK);

    let rows = body["payments"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row["invoice_number"], "INV-000001");
    assert_eq!(row["due_status"], "overdue");
    assert_eq!(row["member"]["name"], "Ravi Shah");
    assert!(row["membership"].is_null());

    let summary = &body["summary"];
    assert_eq!(summary["listed_count"], 1);
    assert_eq!(amount(&summary["listed_amount"]), Decimal::from(1500));
    assert_eq!(summary["overdue_count"], 1);
    assert_eq!(summary["upcoming_count"], 0);
}

#[actix_web::test]
async fn test_sales_contract() {
    let app = init_app!();
    seed_overdue!(app);

    let (status, body) = get_json!(app, "/api/reports/sales?payment_mode=cash");
    assert_eq!(status, StatusCode::OK);

    assert!(body["payments"].as_array().unwrap().is_empty());
    assert_eq!(body["summary"]["invoice_count"], 0);
    assert_eq!(body["payment_mode"], "Cash");
    assert!(body["period"].is_null());
    // Mode cards ignore the mode filter
    assert_eq!(amount(&body["by_mode"]["online"]), Decimal::from(500));
    assert_eq!(amount(&body["by_mode"]["cash"]), Decimal::ZERO);
}

#[actix_web::test]
async fn test_charts_contract() {
    let app = init_app!();

    let (status, body) = get_json!(app, "/api/reports/charts");
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["months"].as_array().unwrap().len(), 12);
    assert_eq!(body["members"]["active"].as_array().unwrap().len(), 12);
    assert_eq!(body["revenue"]["pending"].as_array().unwrap().len(), 12);
    for key in ["hot", "warm", "cold", "unassigned"] {
        assert_eq!(body["lead_types"][key], 0);
    }
}

#[actix_web::test]
async fn test_invalid_filter_rejected() {
    let app = init_app!();

    for uri in [
        "/api/reports/balance-due?due=later",
        "/api/reports/sales?date_range=fortnight",
        "/api/members?status=Frozen",
    ] {
        let (status, body) = get_json!(app, uri);
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["error"]["code"], 400);
        assert!(body["error"]["message"].as_str().unwrap().contains("Validation"));
    }
}

#[actix_web::test]
async fn test_member_lookup_errors() {
    let app = init_app!();

    let (status, body) = get_json!(app, "/api/members/not-a-uuid");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 400);

    let uri = format!("/api/members/{}", uuid::Uuid::new_v4());
    let (status, body) = get_json!(app, &uri);
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], 404);
}

#[actix_web::test]
async fn test_malformed_body_rejected() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/members")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{\"first_name\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], 400);
}

#[actix_web::test]
async fn test_member_profile_contract() {
    let app = init_app!();
    let member_id = seed_overdue!(app);

    let (status, body) = get_json!(app, &format!("/api/members/{}", member_id));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["member"]["client_id"], "MEM000001");
    assert_eq!(body["payments"].as_array().unwrap().len(), 1);
    assert_eq!(body["totals"]["count"], 1);
    assert_eq!(amount(&body["totals"]["balance"]), Decimal::from(1500));
}

#[actix_web::test]
async fn test_csv_export() {
    let app = init_app!();
    seed_overdue!(app);

    let req = test::TestRequest::get()
        .uri("/api/reports/export/balance-due")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let content_type = resp.headers().get(header::CONTENT_TYPE).unwrap();
    assert!(content_type.to_str().unwrap().starts_with("text/csv"));
    let disposition = resp.headers().get(header::CONTENT_DISPOSITION).unwrap();
    assert!(disposition.to_str().unwrap().contains("balance-due.csv"));

    let body = test::read_body(resp).await;
    let text = std::str::from_utf8(&body).unwrap();
    assert_eq!(text.lines().count(), 2);
    assert!(text.lines().nth(1).unwrap().starts_with("INV-000001,MEM000001,Ravi Shah"));
}
