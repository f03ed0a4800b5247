//! Record operations through the services against the in-memory store

use chrono::Duration;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use gymdesk::core::AppError;
use gymdesk::modules::employees::models::CreateEmployeeRequest;
use gymdesk::modules::employees::EmployeeService;
use gymdesk::modules::enquiries::models::{CreateEnquiryRequest, LeadType};
use gymdesk::modules::enquiries::EnquiryService;
use gymdesk::modules::follow_ups::models::{
    CreateFollowUpRequest, FollowUpStatus, FollowUpType, UpdateFollowUpStatusRequest,
};
use gymdesk::modules::follow_ups::FollowUpService;
use gymdesk::modules::members::models::{
    CreateMemberRequest, Gender, MemberStatus, UpdateMemberRequest,
};
use gymdesk::modules::members::MemberService;
use gymdesk::modules::payments::models::{CreatePaymentRequest, PaymentMode, UpdatePaymentRequest};
use gymdesk::modules::payments::{PaymentService, PaymentStatus};
use gymdesk::modules::personal_training::models::CreatePersonalTrainingRequest;
use gymdesk::modules::payments::repositories::PaymentQuery;
use gymdesk::modules::personal_training::{PersonalTrainingQuery, PersonalTrainingService};
use gymdesk::modules::reports::filters::EnquiryListParams;

#[path = "../helpers/mod.rs"]
mod helpers;
use helpers::*;

fn member_request(first: &str, phone: &str) -> CreateMemberRequest {
    CreateMemberRequest {
        first_name: first.to_string(),
        last_name: "Patel".to_string(),
        phone: phone.to_string(),
        email: None,
        gender: Gender::Female,
        address: None,
        membership_id: None,
        expiry_date: None,
    }
}

fn invoice_request(member_id: Uuid, membership_id: Option<Uuid>) -> CreatePaymentRequest {
    CreatePaymentRequest {
        member_id,
        membership_id,
        plan_total: None,
        discount: Decimal::ZERO,
        paid: Decimal::ZERO,
        payment_mode: PaymentMode::Online,
        invoice_date: None,
        due_date: None,
    }
}

fn enquiry_request(name: &str, gender: Gender, trial_booked: bool) -> CreateEnquiryRequest {
    CreateEnquiryRequest {
        name: name.to_string(),
        phone: "9000000001".to_string(),
        email: None,
        gender,
        lead_type: Some(LeadType::Hot),
        trial_booked,
        referred_by: None,
        remark: None,
    }
}

#[tokio::test]
async fn test_member_client_ids_are_sequential() {
    let fx = Fixture::new();
    let service = MemberService::new(fx.store.clone());

    let first = service.create_member(member_request("Nisha", "9000000001")).await.unwrap();
    let second = service.create_member(member_request("Meera", "9000000002")).await.unwrap();

    assert_eq!(first.client_id, "MEM000001");
    assert_eq!(second.client_id, "MEM000002");
    assert_eq!(first.name, "Nisha Patel");
    assert_eq!(first.status, MemberStatus::Active);
}

#[tokio::test]
async fn test_member_with_unknown_membership_rejected() {
    let fx = Fixture::new();
    let service = MemberService::new(fx.store.clone());

    let mut request = member_request("Nisha", "9000000001");
    request.membership_id = Some(Uuid::new_v4());

    let err = service.create_member(request).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_member_update_and_delete() {
    let fx = Fixture::new();
    let service = MemberService::new(fx.store.clone());
    let member = service.create_member(member_request("Nisha", "9000000001")).await.unwrap();

    let updated = service
        .update_member(
            member.id,
            UpdateMemberRequest {
                status: Some(MemberStatus::Inactive),
                phone: Some("9111111111".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, MemberStatus::Inactive);
    assert_eq!(updated.phone, "9111111111");
    assert_eq!(updated.client_id, "MEM000001");

    service.delete_member(member.id).await.unwrap();
    let err = service.get_member(member.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    let err = service.delete_member(member.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_reused_client_id_conflicts() {
    let fx = Fixture::new();
    let service = MemberService::new(fx.store.clone());
    let first = service.create_member(member_request("Nisha", "9000000001")).await.unwrap();
    service.create_member(member_request("Meera", "9000000002")).await.unwrap();

    // One member left, so the next code is MEM000002 again
    service.delete_member(first.id).await.unwrap();
    let err = service
        .create_member(member_request("Kavya", "9000000003"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_invoice_defaults_to_membership_price() {
    let fx = Fixture::new();
    let quarterly = fx.membership("Quarterly", 3, dec!(4500)).await;
    let member = fx.member("Nisha", "Patel", "9000000001").await;
    let service = PaymentService::new(fx.store.clone());

    let mut request = invoice_request(member.id, Some(quarterly.id));
    request.discount = dec!(500);
    request.paid = dec!(1000);
    let payment = service.create_payment(request).await.unwrap();

    assert_eq!(payment.invoice_number, "INV-000001");
    assert_eq!(payment.plan_total, dec!(4500));
    assert_eq!(payment.total, dec!(4000));
    assert_eq!(payment.balance, dec!(3000));
    assert_eq!(payment.status, PaymentStatus::BalanceDue);
    assert!(payment.is_consistent());
}

#[tokio::test]
async fn test_invoice_without_membership_needs_plan_total() {
    let fx = Fixture::new();
    let member = fx.member("Nisha", "Patel", "9000000001").await;
    let service = PaymentService::new(fx.store.clone());

    let err = service
        .create_payment(invoice_request(member.id, None))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let mut request = invoice_request(member.id, None);
    request.plan_total = Some(dec!(1200));
    let payment = service.create_payment(request).await.unwrap();
    assert_eq!(payment.status, PaymentStatus::Pending);
    assert_eq!(payment.balance, dec!(1200));
}

#[tokio::test]
async fn test_invoice_for_unknown_member_rejected() {
    let fx = Fixture::new();
    let service = PaymentService::new(fx.store.clone());

    let mut request = invoice_request(Uuid::new_v4(), None);
    request.plan_total = Some(dec!(1200));
    let err = service.create_payment(request).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_payment_transitions() {
    let fx = Fixture::new();
    let member = fx.member("Nisha", "Patel", "9000000001").await;
    let service = PaymentService::new(fx.store.clone());

    let mut request = invoice_request(member.id, None);
    request.plan_total = Some(dec!(3000));
    let payment = service.create_payment(request).await.unwrap();

    let paid = service.mark_paid(payment.id).await.unwrap();
    assert_eq!(paid.status, PaymentStatus::Paid);
    assert_eq!(paid.paid, dec!(3000));
    assert_eq!(paid.balance, Decimal::ZERO);

    let reopened = service
        .update_payment(
            payment.id,
            UpdatePaymentRequest {
                paid: Some(dec!(1000)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(reopened.status, PaymentStatus::BalanceDue);
    assert_eq!(reopened.balance, dec!(2000));

    let err = service
        .update_payment(
            payment.id,
            UpdatePaymentRequest {
                paid: Some(dec!(3500)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // The rejected update left the stored row untouched
    let stored = service.get_payment(payment.id).await.unwrap();
    assert_eq!(stored.paid, dec!(1000));
    assert!(stored.is_consistent());
}

#[tokio::test]
async fn test_personal_training_raises_pending_invoice() {
    let fx = Fixture::new();
    let member = fx.member("Nisha", "Patel", "9000000001").await;
    let service = PersonalTrainingService::new(fx.store.clone());

    let enrollment = service
        .create_personal_training(CreatePersonalTrainingRequest {
            member_id: member.id,
            package_name: "PT Gold".to_string(),
            duration_months: 3,
            sessions: 24,
            price: dec!(9000),
            start_date: None,
        })
        .await
        .unwrap();

    let invoice = &enrollment.invoice;
    assert_eq!(invoice.member_id, member.id);
    assert_eq!(invoice.membership_id, None);
    assert_eq!(invoice.total, dec!(9000));
    assert_eq!(invoice.status, PaymentStatus::Pending);
    assert_eq!(invoice.invoice_number, "INV-000001");
    assert!(invoice.due_date.is_some());

    let profile = fx.listing().member_profile(&member.id.to_string()).await.unwrap();
    assert_eq!(profile.personal_training.len(), 1);
    assert_eq!(profile.payments.len(), 1);
    assert_eq!(profile.totals.balance, dec!(9000));
}

fn pt_request(member_id: Uuid, price: Decimal) -> CreatePersonalTrainingRequest {
    CreatePersonalTrainingRequest {
        member_id,
        package_name: "PT Gold".to_string(),
        duration_months: 3,
        sessions: 24,
        price,
        start_date: None,
    }
}

#[tokio::test]
async fn test_personal_training_bad_price_stores_nothing() {
    let fx = Fixture::new();
    let member = fx.member("Nisha", "Patel", "9000000001").await;
    let service = PersonalTrainingService::new(fx.store.clone());

    let err = service
        .create_personal_training(pt_request(member.id, dec!(1000.005)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let packages = fx
        .store
        .personal_training
        .count(&PersonalTrainingQuery::default())
        .await
        .unwrap();
    let invoices = fx.store.payments.count(&PaymentQuery::default()).await.unwrap();
    assert_eq!((packages, invoices), (0, 0));
}

#[tokio::test]
async fn test_personal_training_removed_when_invoice_fails() {
    let fx = Fixture::new();
    let member = fx.member("Nisha", "Patel", "9000000001").await;
    let first = fx.payment(PaymentSeed::new(member.id, dec!(100), dec!(0))).await;
    fx.payment(PaymentSeed::new(member.id, dec!(200), dec!(0))).await;
    // Next code is INV-000002 again
    fx.store.payments.delete(first.id).await.unwrap();

    let err = PersonalTrainingService::new(fx.store.clone())
        .create_personal_training(pt_request(member.id, dec!(9000)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let packages = fx
        .store
        .personal_training
        .count(&PersonalTrainingQuery::default())
        .await
        .unwrap();
    assert_eq!(packages, 0);
}

#[tokio::test]
async fn test_oversized_amounts_rejected_and_dashboard_survives() {
    let fx = Fixture::new();
    let member = fx.member("Nisha", "Patel", "9000000001").await;
    let service = PaymentService::new(fx.store.clone());

    for _ in 0..2 {
        let mut request = invoice_request(member.id, None);
        request.plan_total = Some(dec!(50000000000000000000));
        let err = service.create_payment(request).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    let mut request = invoice_request(member.id, None);
    request.plan_total = Some(dec!(9999999999.99));
    service.create_payment(request).await.unwrap();

    let stats = fx.reports().dashboard_at(&fx.clock).await.unwrap();
    assert_eq!(stats.sales.total.count, 1);
    assert_eq!(stats.sales.total.amount, dec!(9999999999.99));
}

#[tokio::test]
async fn test_member_profile_lookup_errors() {
    let fx = Fixture::new();
    let listing = fx.listing();

    let err = listing.member_profile("not-a-uuid").await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = listing
        .member_profile(&Uuid::new_v4().to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_member_profile_follow_ups_capped() {
    let fx = Fixture::new();
    let member = fx.member("Nisha", "Patel", "9000000001").await;
    for day in 0..12 {
        fx.follow_up(member.id, Duration::days(day), FollowUpStatus::Warm, "call")
            .await;
    }

    let profile = fx.listing().member_profile(&member.id.to_string()).await.unwrap();
    assert_eq!(profile.follow_ups.len(), 10);
    assert!(profile
        .follow_ups
        .windows(2)
        .all(|pair| pair[0].due_date >= pair[1].due_date));
    assert!(profile.membership.is_none());
}

#[tokio::test]
async fn test_membership_listing_counts_active_members() {
    let fx = Fixture::new();
    let monthly = fx.membership("Monthly", 1, dec!(1500)).await;
    let yearly = fx.membership("Yearly", 12, dec!(12000)).await;
    let members = MemberService::new(fx.store.clone());

    for (first, phone) in [("Nisha", "9000000001"), ("Meera", "9000000002")] {
        let mut request = member_request(first, phone);
        request.membership_id = Some(monthly.id);
        members.create_member(request).await.unwrap();
    }
    let mut lapsed = member_request("Kavya", "9000000003");
    lapsed.membership_id = Some(monthly.id);
    let lapsed = members.create_member(lapsed).await.unwrap();
    members
        .update_member(
            lapsed.id,
            UpdateMemberRequest {
                status: Some(MemberStatus::Past),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let listed = fx.listing().list_memberships().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].membership.id, monthly.id);
    assert_eq!(listed[0].member_count, 2);
    assert_eq!(listed[1].membership.id, yearly.id);
    assert_eq!(listed[1].member_count, 0);
}

#[tokio::test]
async fn test_enquiry_listing_post_filters() {
    let fx = Fixture::new();
    let service = EnquiryService::new(fx.store.clone());

    let first = service
        .create_enquiry(enquiry_request("Anil", Gender::Male, true))
        .await
        .unwrap();
    service
        .create_enquiry(enquiry_request("Bina", Gender::Female, true))
        .await
        .unwrap();
    service
        .create_enquiry(enquiry_request("Chetan", Gender::Male, false))
        .await
        .unwrap();
    assert_eq!(first.enquiry_no, "000001");

    let listing = fx
        .listing()
        .list_enquiries(&EnquiryListParams {
            trial_booked: Some("yes".to_string()),
            gender: Some("Male".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(listing.enquiries.len(), 1);
    assert_eq!(listing.enquiries[0].name, "Anil");
    // Stats ignore the filters
    assert_eq!(listing.stats.open, 3);
    assert_eq!(listing.stats.total, 3);
}

#[tokio::test]
async fn test_follow_up_status_update() {
    let fx = Fixture::new();
    let member = fx.member("Nisha", "Patel", "9000000001").await;
    let service = FollowUpService::new(fx.store.clone());

    let follow_up = service
        .create_follow_up(CreateFollowUpRequest {
            member_id: member.id,
            follow_up_type: FollowUpType::MembershipRenewal,
            due_date: fx.clock.days_ahead(2),
            status: None,
            comment: Some("Renewal due".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(follow_up.status, FollowUpStatus::Warm);

    let done = service
        .update_status(
            follow_up.id,
            UpdateFollowUpStatusRequest {
                status: FollowUpStatus::Done,
                comment: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(done.status, FollowUpStatus::Done);
    assert_eq!(done.comment, "Renewal due");

    let err = service
        .create_follow_up(CreateFollowUpRequest {
            member_id: Uuid::new_v4(),
            follow_up_type: FollowUpType::General,
            due_date: fx.clock.now(),
            status: None,
            comment: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_employee_codes() {
    let fx = Fixture::new();
    let service = EmployeeService::new(fx.store.clone());

    let trainer = service
        .create_employee(CreateEmployeeRequest {
            first_name: "Rohit".to_string(),
            last_name: "Das".to_string(),
            phone: "9000000009".to_string(),
            email: None,
            role: "Trainer".to_string(),
            salary: Some(dec!(25000)),
        })
        .await
        .unwrap();

    assert_eq!(trainer.employee_id, "EMP0001");
    assert_eq!(trainer.name, "Rohit Das");
}
