// Fixture
//
// Seeds records straight into the store so creation instants can be placed
// relative to the pinned clock.

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use gymdesk::core::parse::sequence_code;
use gymdesk::core::ReportClock;
use gymdesk::modules::follow_ups::models::{
    CreateFollowUpRequest, FollowUp, FollowUpStatus, FollowUpType,
};
use gymdesk::modules::members::models::{CreateMemberRequest, Gender, Member, MemberStatus};
use gymdesk::modules::members::repositories::MemberQuery;
use gymdesk::modules::memberships::models::{CreateMembershipRequest, Membership, MembershipType};
use gymdesk::modules::payments::models::{InvoiceAmounts, Payment, PaymentMode};
use gymdesk::modules::payments::repositories::PaymentQuery;
use gymdesk::modules::reports::{ListingService, ReportService};
use gymdesk::EntityStore;

/// +05:30, a non-zero offset so local and UTC boundaries differ
pub fn gym_offset() -> FixedOffset {
    FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap()
}

/// 2025-06-15 12:00 local
pub fn pinned_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 6, 30, 0).unwrap()
}

pub fn pinned_clock() -> ReportClock {
    ReportClock::at(pinned_now(), gym_offset())
}

/// Invoice being seeded; instants default to the pinned clock
#[derive(Debug, Clone)]
pub struct PaymentSeed {
    pub member_id: Uuid,
    pub membership_id: Option<Uuid>,
    pub total: Decimal,
    pub paid: Decimal,
    pub mode: PaymentMode,
    pub invoice_date: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl PaymentSeed {
    pub fn new(member_id: Uuid, total: Decimal, paid: Decimal) -> Self {
        Self {
            member_id,
            membership_id: None,
            total,
            paid,
            mode: PaymentMode::Cash,
            invoice_date: pinned_now(),
            due_date: None,
            created_at: pinned_now(),
        }
    }

    pub fn due(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn mode(mut self, mode: PaymentMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn membership(mut self, membership_id: Uuid) -> Self {
        self.membership_id = Some(membership_id);
        self
    }

    pub fn invoiced(mut self, invoice_date: DateTime<Utc>) -> Self {
        self.invoice_date = invoice_date;
        self
    }

    pub fn created(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

pub struct Fixture {
    pub store: EntityStore,
    pub clock: ReportClock,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            store: EntityStore::in_memory(),
            clock: pinned_clock(),
        }
    }

    pub fn reports(&self) -> ReportService {
        ReportService::new(self.store.clone(), gym_offset())
    }

    pub fn listing(&self) -> ListingService {
        ListingService::new(self.store.clone(), gym_offset())
    }

    pub async fn membership(&self, name: &str, months: i32, price: Decimal) -> Membership {
        let membership = Membership::new(
            CreateMembershipRequest {
                package_name: name.to_string(),
                duration_months: months,
                sessions: 0,
                price,
                membership_type: MembershipType::GeneralTraining,
            },
            self.clock.now(),
        )
        .unwrap();
        self.store.memberships.create(&membership).await.unwrap();
        membership
    }

    /// Active member created at the pinned clock
    pub async fn member(&self, first: &str, last: &str, phone: &str) -> Member {
        self.member_at(first, last, phone, MemberStatus::Active, self.clock.now())
            .await
    }

    pub async fn member_at(
        &self,
        first: &str,
        last: &str,
        phone: &str,
        status: MemberStatus,
        created_at: DateTime<Utc>,
    ) -> Member {
        let count = self.store.members.count(&MemberQuery::default()).await.unwrap();
        let mut member = Member::new(
            sequence_code("MEM", count + 1, 6),
            CreateMemberRequest {
                first_name: first.to_string(),
                last_name: last.to_string(),
                phone: phone.to_string(),
                email: None,
                gender: Gender::Male,
                address: None,
                membership_id: None,
                expiry_date: None,
            },
            created_at,
        )
        .unwrap();
        member.status = status;
        self.store.members.create(&member).await.unwrap();
        member
    }

    pub async fn payment(&self, seed: PaymentSeed) -> Payment {
        let count = self.store.payments.count(&PaymentQuery::default()).await.unwrap();
        let payment = Payment::new(
            seed.member_id,
            seed.membership_id,
            sequence_code("INV-", count + 1, 6),
            InvoiceAmounts {
                plan_total: seed.total,
                discount: Decimal::ZERO,
                paid: seed.paid,
            },
            seed.mode,
            seed.invoice_date,
            seed.due_date,
            seed.created_at,
        )
        .unwrap();
        self.store.payments.create(&payment).await.unwrap();
        payment
    }

    pub async fn follow_up(
        &self,
        member_id: Uuid,
        due_in: Duration,
        status: FollowUpStatus,
        comment: &str,
    ) -> FollowUp {
        let follow_up = FollowUp::new(
            CreateFollowUpRequest {
                member_id,
                follow_up_type: FollowUpType::BalanceDue,
                due_date: self.clock.now() + due_in,
                status: Some(status),
                comment: Some(comment.to_string()),
            },
            self.clock.now(),
        );
        self.store.follow_ups.create(&follow_up).await.unwrap();
        follow_up
    }
}
