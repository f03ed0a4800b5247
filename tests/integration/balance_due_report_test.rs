//! Integration tests for the balance-due report
//!
//! Outstanding invoices are classified against one pinned instant; summary
//! figures reconcile with the listed rows.

use chrono::Duration;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use gymdesk::modules::reports::export::balance_due_csv;
use gymdesk::modules::reports::filters::BalanceDueParams;
use gymdesk::modules::reports::models::{BalanceDueReport, DueStatus};

#[path = "../helpers/mod.rs"]
mod helpers;
use helpers::*;

/// One member with a paid invoice and five outstanding ones
async fn seeded() -> Fixture {
    let fx = Fixture::new();
    let now = fx.clock.now();
    let ravi = fx.member("Ravi", "Shah", "9876543210").await;

    fx.payment(PaymentSeed::new(ravi.id, dec!(5000), dec!(5000)).due(now - Duration::days(3)))
        .await;
    fx.payment(PaymentSeed::new(ravi.id, dec!(1500), dec!(0)).due(now - Duration::days(1)))
        .await;
    fx.payment(PaymentSeed::new(ravi.id, dec!(1500), dec!(0)).due(now + Duration::days(3)))
        .await;
    fx.payment(PaymentSeed::new(ravi.id, dec!(1000), dec!(300)).due(now))
        .await;
    fx.payment(PaymentSeed::new(ravi.id, dec!(400), dec!(0)).due(now + Duration::days(20)))
        .await;
    fx.payment(PaymentSeed::new(ravi.id, dec!(300), dec!(0))).await;
    fx
}

async fn report(fx: &Fixture, due: Option<&str>, search: Option<&str>) -> BalanceDueReport {
    let params = BalanceDueParams {
        due: due.map(str::to_string),
        search: search.map(str::to_string),
    };
    fx.reports().balance_due_at(&params, &fx.clock).await.unwrap()
}

#[tokio::test]
async fn test_paid_invoices_excluded() {
    let fx = seeded().await;
    let report = report(&fx, None, None).await;

    assert_eq!(report.payments.len(), 5);
    assert!(report
        .payments
        .iter()
        .all(|row| row.record.payment.balance > Decimal::ZERO));
}

#[tokio::test]
async fn test_classification_and_order() {
    let fx = seeded().await;
    let report = report(&fx, None, None).await;

    let statuses: Vec<DueStatus> = report.payments.iter().map(|r| r.due_status).collect();
    assert_eq!(
        statuses,
        vec![
            DueStatus::Overdue,
            DueStatus::Upcoming,
            DueStatus::Upcoming,
            DueStatus::NotDue,
            DueStatus::NotDue,
        ]
    );
    // No due date sorts last
    assert!(report.payments[4].record.payment.due_date.is_none());
}

#[tokio::test]
async fn test_due_exactly_now_is_upcoming() {
    let fx = seeded().await;
    let report = report(&fx, None, None).await;

    let boundary = report
        .payments
        .iter()
        .find(|r| r.record.payment.due_date == Some(fx.clock.now()))
        .unwrap();
    assert_eq!(boundary.due_status, DueStatus::Upcoming);
    assert_eq!(
        DueStatus::classify(Some(fx.clock.now() + Duration::days(7)), &fx.clock),
        DueStatus::Upcoming
    );
    assert_eq!(
        DueStatus::classify(
            Some(fx.clock.now() + Duration::days(7) + Duration::milliseconds(1)),
            &fx.clock
        ),
        DueStatus::NotDue
    );
}

#[tokio::test]
async fn test_summary_reconciles() {
    let fx = seeded().await;
    let report = report(&fx, None, None).await;
    let summary = report.summary;

    let listed: Decimal = report.payments.iter().map(|r| r.record.payment.balance).sum();
    assert_eq!(summary.listed_count, 5);
    assert_eq!(summary.listed_amount, listed);
    assert_eq!(summary.listed_amount, dec!(4400));
    assert_eq!(summary.overdue_count, 1);
    assert_eq!(summary.overdue_amount, dec!(1500));
    assert_eq!(summary.upcoming_count, 2);
    assert_eq!(summary.upcoming_amount, dec!(2200));
}

#[tokio::test]
async fn test_window_narrows_listing_only() {
    let fx = seeded().await;

    let overdue = report(&fx, Some("overdue"), None).await;
    assert_eq!(overdue.payments.len(), 1);
    assert_eq!(overdue.summary.listed_amount, dec!(1500));
    assert_eq!(overdue.summary.upcoming_count, 2);

    let upcoming = report(&fx, Some("upcoming"), None).await;
    assert_eq!(upcoming.summary.listed_count, 2);
    assert_eq!(upcoming.summary.listed_amount, dec!(2200));
    assert_eq!(upcoming.summary.overdue_count, 1);
}

#[tokio::test]
async fn test_member_search() {
    let fx = seeded().await;
    let asha = fx.member("Asha", "Kumar", "9123456780").await;
    fx.payment(
        PaymentSeed::new(asha.id, dec!(800), dec!(0)).due(fx.clock.now() - Duration::days(10)),
    )
    .await;

    let found = report(&fx, None, Some("ASHA")).await;
    assert_eq!(found.payments.len(), 1);
    assert_eq!(found.summary.overdue_amount, dec!(800));
    assert_eq!(found.summary.upcoming_count, 0);

    let nobody = report(&fx, None, Some("no such member")).await;
    assert!(nobody.payments.is_empty());
    assert_eq!(nobody.summary.listed_amount, Decimal::ZERO);
}

#[tokio::test]
async fn test_overdue_export() {
    let fx = seeded().await;
    let report = report(&fx, Some("overdue"), None).await;
    let csv = balance_due_csv(&report, &fx.clock).unwrap();

    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("Invoice No,Client ID,Member"));
    assert!(lines[1].starts_with("INV-000002,MEM000001,Ravi Shah,9876543210,-,"));
    assert!(lines[1].ends_with("14/06/2025,overdue"));
}
