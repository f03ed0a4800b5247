//! Integration tests for dashboard, sales, charts and list reports
//!
//! Runs the report services against a seeded in-memory store with a pinned
//! clock.

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use gymdesk::core::AppError;
use gymdesk::modules::enquiries::models::{CreateEnquiryRequest, Enquiry, LeadType};
use gymdesk::modules::follow_ups::models::FollowUpStatus;
use gymdesk::modules::members::models::{Gender, MemberStatus};
use gymdesk::modules::payments::models::{Payment, PaymentMode};
use gymdesk::modules::payments::repositories::PaymentQuery;
use gymdesk::modules::reports::filters::{
    FollowUpListParams, PaymentListParams, RecentFollowUpParams, SalesParams,
};
use gymdesk::store::MemoryRepository;

#[path = "../helpers/mod.rs"]
mod helpers;
use helpers::*;

#[tokio::test]
async fn test_empty_store_reports_zeros() {
    let fx = Fixture::new();
    let reports = fx.reports();

    let dashboard = reports.dashboard_at(&fx.clock).await.unwrap();
    assert_eq!(dashboard.members.total, 0);
    assert_eq!(dashboard.sales.total.amount, Decimal::ZERO);
    assert_eq!(dashboard.sales.fresh.count, 0);
    assert_eq!(dashboard.pending_follow_ups, 0);

    let charts = reports.charts_at(&fx.clock).await.unwrap();
    assert_eq!(charts.revenue.paid, [Decimal::ZERO; 12]);
    assert_eq!(charts.members.active, [0; 12]);

    let sales = reports.sales_at(&SalesParams::default(), &fx.clock).await.unwrap();
    assert!(sales.payments.is_empty());
    assert_eq!(sales.summary.total, Decimal::ZERO);
}

#[tokio::test]
async fn test_dashboard_kpis() {
    let fx = Fixture::new();
    let now = fx.clock.now();

    let ravi = fx.member("Ravi", "Shah", "9876543210").await;
    fx.member_at("Meena", "Iyer", "9123456780", MemberStatus::Inactive, now)
        .await;
    let mut renewing = fx.member("Arjun", "Rao", "9000000001").await;
    renewing.expiry_date = Some(now + Duration::days(3));
    fx.store.members.update(&renewing).await.unwrap();

    fx.payment(PaymentSeed::new(ravi.id, dec!(5000), dec!(5000))).await;
    fx.payment(
        PaymentSeed::new(ravi.id, dec!(1500), dec!(0))
            .invoiced(now - Duration::days(1))
            .created(now - Duration::days(31)),
    )
    .await;

    fx.follow_up(ravi.id, Duration::days(2), FollowUpStatus::Hot, "call back")
        .await;
    fx.follow_up(ravi.id, Duration::days(-2), FollowUpStatus::Done, "sorted")
        .await;

    let stats = fx.reports().dashboard_at(&fx.clock).await.unwrap();

    assert_eq!(stats.members.total, 3);
    assert_eq!(stats.members.active, 2);
    assert_eq!(stats.members.upcoming_renewals, 1);
    assert_eq!(stats.sales.total.amount, dec!(6500));
    assert_eq!(stats.sales.total.count, 2);
    assert_eq!(stats.balance.paid, dec!(5000));
    assert_eq!(stats.balance.due, dec!(1500));
    assert_eq!(stats.pending_follow_ups, 1);
}

#[tokio::test]
async fn test_fresh_sales_use_created_at() {
    let fx = Fixture::new();
    let now = fx.clock.now();
    let member = fx.member("Ravi", "Shah", "9876543210").await;

    fx.payment(
        PaymentSeed::new(member.id, dec!(2000), dec!(2000)).created(now - Duration::days(29)),
    )
    .await;
    // Invoiced yesterday but created 31 days ago
    fx.payment(
        PaymentSeed::new(member.id, dec!(3000), dec!(0))
            .invoiced(now - Duration::days(1))
            .created(now - Duration::days(31)),
    )
    .await;

    let stats = fx.reports().dashboard_at(&fx.clock).await.unwrap();
    assert_eq!(stats.sales.fresh.count, 1);
    assert_eq!(stats.sales.fresh.amount, dec!(2000));
    assert_eq!(stats.sales.total.count, 2);
}

#[tokio::test]
async fn test_sales_breakdown_ignores_mode_filter() {
    let fx = Fixture::new();
    let member = fx.member("Ravi", "Shah", "9876543210").await;

    fx.payment(PaymentSeed::new(member.id, dec!(1000), dec!(1000)).mode(PaymentMode::Cash))
        .await;
    fx.payment(PaymentSeed::new(member.id, dec!(2000), dec!(500)).mode(PaymentMode::Online))
        .await;
    fx.payment(PaymentSeed::new(member.id, dec!(700), dec!(700)).mode(PaymentMode::Cheque))
        .await;

    let params = SalesParams {
        payment_mode: Some("cash".into()),
        ..Default::default()
    };
    let report = fx.reports().sales_at(&params, &fx.clock).await.unwrap();

    assert_eq!(report.payments.len(), 1);
    assert_eq!(report.summary.invoice_count, 1);
    assert_eq!(report.summary.total, dec!(1000));
    assert_eq!(report.by_mode.cash, dec!(1000));
    assert_eq!(report.by_mode.online, dec!(500));
    assert_eq!(report.by_mode.cheque, dec!(700));
    assert_eq!(report.by_mode.total(), dec!(2200));
}

#[tokio::test]
async fn test_sales_window_on_invoice_date() {
    let fx = Fixture::new();
    let member = fx.member("Ravi", "Shah", "9876543210").await;

    let january = Utc.with_ymd_and_hms(2025, 1, 10, 6, 0, 0).unwrap();
    fx.payment(PaymentSeed::new(member.id, dec!(1000), dec!(0)).invoiced(january))
        .await;
    fx.payment(PaymentSeed::new(member.id, dec!(4000), dec!(4000))).await;

    let params = SalesParams {
        start_date: Some("2025-01-01".into()),
        end_date: Some("2025-01-31".into()),
        ..Default::default()
    };
    let report = fx.reports().sales_at(&params, &fx.clock).await.unwrap();

    assert_eq!(report.payments.len(), 1);
    assert_eq!(report.summary.balance, dec!(1000));
    assert!(report.period.is_some());
}

#[tokio::test]
async fn test_charts_bucket_by_local_month() {
    let fx = Fixture::new();

    let jan = Utc.with_ymd_and_hms(2025, 1, 20, 6, 0, 0).unwrap();
    let mar = Utc.with_ymd_and_hms(2025, 3, 5, 6, 0, 0).unwrap();
    let last_year = Utc.with_ymd_and_hms(2024, 11, 5, 6, 0, 0).unwrap();

    let active = fx
        .member_at("Ravi", "Shah", "9876543210", MemberStatus::Active, jan)
        .await;
    fx.member_at("Meena", "Iyer", "9123456780", MemberStatus::Past, mar)
        .await;
    fx.member_at("Old", "Timer", "9000000002", MemberStatus::Active, last_year)
        .await;

    // 2024-12-31 19:00 UTC is already January 1st at +05:30
    let new_year_local = Utc.with_ymd_and_hms(2024, 12, 31, 19, 0, 0).unwrap();
    fx.payment(PaymentSeed::new(active.id, dec!(1500), dec!(1000)).invoiced(new_year_local))
        .await;
    fx.payment(PaymentSeed::new(active.id, dec!(800), dec!(800)).invoiced(mar))
        .await;

    let charts = fx.reports().charts_at(&fx.clock).await.unwrap();

    assert_eq!(charts.year, 2025);
    assert_eq!(charts.months[0], "Jan");
    assert_eq!(charts.members.active[0], 1);
    assert_eq!(charts.members.past[2], 1);
    assert_eq!(charts.members.active.iter().sum::<i64>(), 1);
    assert_eq!(charts.revenue.paid[0], dec!(1000));
    assert_eq!(charts.revenue.balance[0], dec!(500));
    assert_eq!(charts.revenue.pending[0], dec!(500));
    assert_eq!(charts.revenue.paid[2], dec!(800));
    assert_eq!(charts.revenue.paid.iter().sum::<Decimal>(), dec!(1800));
}

#[tokio::test]
async fn test_charts_lead_type_split() {
    let fx = Fixture::new();
    for (i, lead_type) in [Some(LeadType::Hot), Some(LeadType::Hot), None]
        .into_iter()
        .enumerate()
    {
        let enquiry = Enquiry::new(
            format!("{:06}", i + 1),
            CreateEnquiryRequest {
                name: "Walk In".into(),
                phone: "9000000003".into(),
                email: None,
                gender: Gender::Female,
                lead_type,
                trial_booked: false,
                referred_by: None,
                remark: None,
            },
            fx.clock.now(),
        )
        .unwrap();
        fx.store.enquiries.create(&enquiry).await.unwrap();
    }

    let charts = fx.reports().charts_at(&fx.clock).await.unwrap();
    assert_eq!(charts.lead_types.hot, 2);
    assert_eq!(charts.lead_types.warm, 0);
    assert_eq!(charts.lead_types.unassigned, 1);
}

#[tokio::test]
async fn test_search_matches_joined_member_fields() {
    let fx = Fixture::new();
    let ravi = fx.member("Ravi", "Shah", "9976543210").await;
    let asha = fx.member("Asha", "Kumar", "9123456780").await;

    fx.payment(PaymentSeed::new(ravi.id, dec!(1000), dec!(0))).await;
    fx.payment(PaymentSeed::new(ravi.id, dec!(2000), dec!(2000))).await;
    fx.payment(PaymentSeed::new(asha.id, dec!(3000), dec!(0))).await;
    fx.follow_up(ravi.id, Duration::days(1), FollowUpStatus::Warm, "renewal call")
        .await;
    fx.follow_up(asha.id, Duration::days(1), FollowUpStatus::Warm, "renewal call")
        .await;

    let listing = fx.listing();
    let payments = listing
        .list_payments(&PaymentListParams {
            search: Some("97".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(payments.payments.len(), 2);
    assert!(payments
        .payments
        .iter()
        .all(|p| p.member.as_ref().map(|m| m.id) == Some(ravi.id)));
    assert_eq!(payments.summary.total, dec!(3000));

    let follow_ups = listing
        .list_follow_ups(&FollowUpListParams {
            search: Some("97".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(follow_ups.len(), 1);
    assert_eq!(follow_ups[0].follow_up.member_id, ravi.id);
}

#[tokio::test]
async fn test_dangling_membership_kept_once() {
    let fx = Fixture::new();
    let member = fx.member("Ravi", "Shah", "9876543210").await;
    let package = fx.membership("Quarterly", 3, dec!(4500)).await;

    fx.payment(PaymentSeed::new(member.id, dec!(4500), dec!(1000)).membership(package.id))
        .await;
    fx.payment(PaymentSeed::new(member.id, dec!(2000), dec!(0)).membership(Uuid::new_v4()))
        .await;

    let listing = fx
        .listing()
        .list_payments(&PaymentListParams::default())
        .await
        .unwrap();

    assert_eq!(listing.payments.len(), 2);
    assert_eq!(listing.summary.count, 2);
    assert_eq!(listing.summary.balance, dec!(5500));
    let dangling = listing
        .payments
        .iter()
        .find(|p| p.payment.total == dec!(2000))
        .unwrap();
    assert!(dangling.membership.is_none());
    assert!(dangling.member.is_some());
}

#[tokio::test]
async fn test_deleted_member_leaves_payment_unjoined() {
    let fx = Fixture::new();
    let member = fx.member("Ravi", "Shah", "9876543210").await;
    fx.payment(PaymentSeed::new(member.id, dec!(900), dec!(0))).await;
    fx.store.members.delete(member.id).await.unwrap();

    let listing = fx
        .listing()
        .list_payments(&PaymentListParams::default())
        .await
        .unwrap();
    assert_eq!(listing.payments.len(), 1);
    assert!(listing.payments[0].member.is_none());
}

#[tokio::test]
async fn test_recent_follow_ups_widget() {
    let fx = Fixture::new();
    let member = fx.member("Ravi", "Shah", "9876543210").await;

    for days in [6, 1, 4, 2, 7, 3, 5] {
        fx.follow_up(member.id, Duration::days(days), FollowUpStatus::Warm, "check in")
            .await;
    }
    fx.follow_up(member.id, Duration::days(-5), FollowUpStatus::Done, "closed")
        .await;

    let recent = fx
        .reports()
        .recent_follow_ups(&RecentFollowUpParams::default())
        .await
        .unwrap();

    assert_eq!(recent.len(), 5);
    assert!(recent.iter().all(|f| f.follow_up.status != FollowUpStatus::Done));
    assert!(recent
        .windows(2)
        .all(|w| w[0].follow_up.due_date <= w[1].follow_up.due_date));
    assert_eq!(recent[0].follow_up.due_date, fx.clock.now() + Duration::days(1));
}

#[tokio::test]
async fn test_store_failure_aborts_report() {
    let mut fx = Fixture::new();
    let member = fx.member("Ravi", "Shah", "9876543210").await;
    fx.payment(PaymentSeed::new(member.id, dec!(900), dec!(0))).await;

    let offline = Arc::new(MemoryRepository::<Payment, PaymentQuery>::new());
    offline.take_offline();
    fx.store.payments = offline;

    let err = fx.reports().dashboard_at(&fx.clock).await.unwrap_err();
    assert!(matches!(err, AppError::StoreUnavailable(_)));

    let err = fx
        .reports()
        .sales_at(&SalesParams::default(), &fx.clock)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::StoreUnavailable(_)));
}

#[tokio::test]
async fn test_invalid_filter_rejected_before_store() {
    let mut fx = Fixture::new();
    let offline = Arc::new(MemoryRepository::<Payment, PaymentQuery>::new());
    offline.take_offline();
    fx.store.payments = offline;

    let params = SalesParams {
        date_range: Some("fortnight".into()),
        ..Default::default()
    };
    let err = fx.reports().sales_at(&params, &fx.clock).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_payment_listing_resolves_buckets_against_given_clock() {
    let fx = Fixture::new();
    let member = fx.member("Ravi", "Shah", "9876543210").await;
    let june = Utc.with_ymd_and_hms(2025, 6, 2, 6, 30, 0).unwrap();
    let may = Utc.with_ymd_and_hms(2025, 5, 20, 6, 30, 0).unwrap();

    fx.payment(PaymentSeed::new(member.id, dec!(1200), dec!(0)).invoiced(june))
        .await;
    fx.payment(PaymentSeed::new(member.id, dec!(800), dec!(0)).invoiced(may))
        .await;

    let listing = fx
        .listing()
        .list_payments_at(
            &PaymentListParams {
                invoice_date: Some("month".into()),
                ..Default::default()
            },
            &fx.clock,
        )
        .await
        .unwrap();

    assert_eq!(listing.payments.len(), 1);
    assert_eq!(listing.payments[0].payment.invoice_date, june);
    assert_eq!(listing.summary.total, dec!(1200));
}
