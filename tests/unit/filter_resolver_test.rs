/// Filter resolution tests
///
/// Raw page parameters become typed queries against one captured clock;
/// malformed values are rejected with a validation error.

use chrono::{Duration, TimeZone, Utc};

use gymdesk::core::AppError;
use gymdesk::modules::members::models::{Gender, MemberStatus};
use gymdesk::modules::payments::models::{PaymentMode, PaymentStatus};
use gymdesk::modules::payments::repositories::PaymentSort;
use gymdesk::modules::reports::filters::{
    parse_choice, BalanceDueParams, DateBucket, EnquiryListParams, FollowUpListParams,
    MemberListParams, PaymentListParams, PersonalTrainingListParams, SalesParams,
    DUE_DATE_MONTH, FOLLOW_UP_LIST_CAP, INVOICE_DATE_MONTH,
};
use gymdesk::modules::reports::models::DueWindow;

#[path = "../helpers/mod.rs"]
mod helpers;
use helpers::*;

#[test]
fn test_today_uses_local_day_bounds() {
    let clock = pinned_clock();
    let range = DateBucket::Today.resolve(&clock, INVOICE_DATE_MONTH).unwrap();

    // 2025-06-15 00:00 at +05:30
    assert_eq!(range.start, Utc.with_ymd_and_hms(2025, 6, 14, 18, 30, 0).unwrap());
    assert_eq!(
        range.end,
        range.start + Duration::days(1) - Duration::milliseconds(1)
    );
    assert!(range.contains(clock.now()));
}

#[test]
fn test_month_conventions_differ_per_field() {
    let clock = pinned_clock();

    let invoice = DateBucket::Month.resolve(&clock, INVOICE_DATE_MONTH).unwrap();
    assert_eq!(invoice.start, Utc.with_ymd_and_hms(2025, 5, 31, 18, 30, 0).unwrap());
    assert_eq!(invoice.end, clock.now());

    let due = DateBucket::Month.resolve(&clock, DUE_DATE_MONTH).unwrap();
    assert_eq!(due.start, clock.now() - Duration::days(30));
    assert_eq!(due.end, clock.now());
}

#[test]
fn test_week_and_all() {
    let clock = pinned_clock();
    let week = DateBucket::Week.resolve(&clock, INVOICE_DATE_MONTH).unwrap();
    assert_eq!(week.start, clock.now() - Duration::days(7));
    assert!(DateBucket::All.resolve(&clock, INVOICE_DATE_MONTH).is_none());
}

#[test]
fn test_sentinels_disable_filters() {
    for raw in [None, Some(""), Some("all"), Some("All")] {
        assert_eq!(parse_choice::<MemberStatus>(raw, "status").unwrap(), None);
    }
    assert_eq!(
        parse_choice::<MemberStatus>(Some("Past"), "status").unwrap(),
        Some(MemberStatus::Past)
    );
}

#[test]
fn test_status_match_is_case_sensitive() {
    let err = parse_choice::<MemberStatus>(Some("active"), "status").unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn test_payment_list_params() {
    let clock = pinned_clock();
    let params = PaymentListParams {
        status: Some("BALANCE_DUE".into()),
        search: Some("  97 ".into()),
        due_date: Some("week".into()),
        invoice_date: None,
    };

    let resolved = params.resolve(&clock).unwrap();
    assert_eq!(resolved.query.status, Some(PaymentStatus::BalanceDue));
    assert_eq!(resolved.query.sort, PaymentSort::InvoiceDateDesc);
    assert!(resolved.query.due_date.is_some());
    assert!(resolved.query.invoice_date.is_none());
    assert_eq!(resolved.search.unwrap().as_str(), "97");

    let bad = PaymentListParams {
        invoice_date: Some("yesterday".into()),
        ..Default::default()
    };
    assert!(matches!(bad.resolve(&clock), Err(AppError::Validation(_))));
}

#[test]
fn test_member_search_is_pushed_to_store() {
    let query = MemberListParams {
        status: Some("Active".into()),
        search: Some("ravi".into()),
    }
    .resolve()
    .unwrap();

    assert_eq!(query.status, Some(MemberStatus::Active));
    assert!(query.search.is_some());
}

#[test]
fn test_follow_up_cap_deferred_when_searching() {
    let plain = FollowUpListParams::default().resolve().unwrap();
    assert_eq!(plain.query.limit, Some(FOLLOW_UP_LIST_CAP));

    let searching = FollowUpListParams {
        search: Some("renewal".into()),
        ..Default::default()
    }
    .resolve()
    .unwrap();
    assert_eq!(searching.query.limit, None);
    assert!(searching.search.is_some());

    let bad_type = FollowUpListParams {
        follow_up_type: Some("Birthday".into()),
        ..Default::default()
    };
    assert!(bad_type.resolve().is_err());
}

#[test]
fn test_enquiry_post_filters() {
    let filter = EnquiryListParams {
        trial_booked: Some("yes".into()),
        gender: Some("Female".into()),
        ..Default::default()
    }
    .resolve()
    .unwrap();

    assert_eq!(filter.trial_booked, Some(true));
    assert_eq!(filter.gender, Some(Gender::Female));
    assert_eq!(filter.query.limit, Some(50));

    let bad = EnquiryListParams {
        trial_booked: Some("maybe".into()),
        ..Default::default()
    };
    assert!(bad.resolve().is_err());
}

#[test]
fn test_balance_due_window() {
    let filter = BalanceDueParams {
        due: Some("overdue".into()),
        search: None,
    }
    .resolve()
    .unwrap();
    assert_eq!(filter.window, DueWindow::Overdue);
    assert!(filter.query.outstanding_only);
    assert_eq!(filter.query.sort, PaymentSort::DueDateAsc);

    let bad = BalanceDueParams {
        due: Some("soon".into()),
        search: None,
    };
    assert!(matches!(bad.resolve(), Err(AppError::Validation(_))));
}

#[test]
fn test_sales_explicit_window_wins() {
    let clock = pinned_clock();
    let filter = SalesParams {
        date_range: Some("today".into()),
        start_date: Some("2025-01-01".into()),
        end_date: Some("2025-01-31".into()),
        payment_mode: Some("online".into()),
        search: None,
    }
    .resolve(&clock)
    .unwrap();

    let period = filter.period.unwrap();
    assert_eq!(period.start, Utc.with_ymd_and_hms(2024, 12, 31, 18, 30, 0).unwrap());
    assert_eq!(filter.query.invoice_date, Some(period));
    assert_eq!(filter.payment_mode, Some(PaymentMode::Online));
}

#[test]
fn test_sales_rejects_half_window_and_inverted_window() {
    let clock = pinned_clock();

    let half = SalesParams {
        start_date: Some("2025-01-01".into()),
        ..Default::default()
    };
    assert!(half.resolve(&clock).is_err());

    let inverted = SalesParams {
        start_date: Some("2025-02-01".into()),
        end_date: Some("2025-01-01".into()),
        ..Default::default()
    };
    assert!(inverted.resolve(&clock).is_err());

    let bad_mode = SalesParams {
        payment_mode: Some("barter".into()),
        ..Default::default()
    };
    assert!(bad_mode.resolve(&clock).is_err());
}

#[test]
fn test_malformed_member_id_rejected() {
    let params = PersonalTrainingListParams {
        member_id: Some("not-a-uuid".into()),
    };
    assert!(matches!(params.resolve(), Err(AppError::Validation(_))));
}

#[test]
fn test_overlong_search_rejected() {
    let params = MemberListParams {
        status: None,
        search: Some("x".repeat(101)),
    };
    assert!(params.resolve().is_err());
}
