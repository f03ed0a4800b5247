// ListingService
// Query Engine: filtered, joined list views and the member profile page.

use std::collections::HashMap;

use chrono::FixedOffset;
use tracing::debug;
use uuid::Uuid;

use crate::core::parse::parse_id;
use crate::core::{AppError, ReportClock, Result};
use crate::modules::employees::models::Employee;
use crate::modules::enquiries::services::enquiry_service::count_by_status;
use crate::modules::follow_ups::repositories::{FollowUpQuery, FollowUpSort};
use crate::modules::members::models::MemberStatus;
use crate::modules::members::repositories::MemberQuery;
use crate::modules::memberships::models::MembershipWithCount;
use crate::modules::memberships::repositories::MembershipQuery;
use crate::modules::payments::repositories::PaymentQuery;
use crate::modules::personal_training::repositories::PersonalTrainingQuery;
use crate::modules::reports::engine::{
    join_follow_ups, join_payments, join_personal_training, FollowUpWithMember, PaymentTotals,
    PersonalTrainingWithMember,
};
use crate::modules::reports::filters::{
    EmployeeListParams, EnquiryListParams, FollowUpListParams, MemberListParams,
    PaymentListParams, PersonalTrainingListParams, FOLLOW_UP_LIST_CAP,
};
use crate::modules::reports::models::{
    EnquiryListing, MemberCounts, MemberListing, MemberProfile, PaymentListing,
};
use crate::store::EntityStore;

/// Follow-ups shown on a member profile
const PROFILE_FOLLOW_UP_CAP: usize = 10;

/// Service for list pages
pub struct ListingService {
    store: EntityStore,
    offset: FixedOffset,
}

impl ListingService {
    pub fn new(store: EntityStore, offset: FixedOffset) -> Self {
        Self { store, offset }
    }

    pub fn clock(&self) -> ReportClock {
        ReportClock::capture(self.offset)
    }

    /// Members matching the filters, newest first, plus status counts over
    /// the whole member base
    pub async fn list_members(&self, params: &MemberListParams) -> Result<MemberListing> {
        let query = params.resolve()?;
        let members = &self.store.members;

        let everyone = MemberQuery::default();
        let [with_active, with_inactive, with_past] = [
            MemberStatus::Active,
            MemberStatus::Inactive,
            MemberStatus::Past,
        ]
        .map(MemberQuery::with_status);

        let (rows, total, active, inactive, past) = tokio::try_join!(
            members.list(&query),
            members.count(&everyone),
            members.count(&with_active),
            members.count(&with_inactive),
            members.count(&with_past),
        )?;

        debug!(returned = rows.len(), total, "Members listed");
        Ok(MemberListing {
            members: rows,
            counts: MemberCounts {
                total,
                active,
                inactive,
                past,
            },
        })
    }

    /// Everything recorded against one member.
    ///
    /// # Errors
    /// `Validation` for a malformed id, `NotFound` when no member has it.
    pub async fn member_profile(&self, raw_id: &str) -> Result<MemberProfile> {
        let id = parse_id(raw_id, "member")?;
        let member = self
            .store
            .members
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Member with id '{}' not found", id)))?;

        let membership = match member.membership_id {
            Some(membership_id) => self.store.memberships.find_by_id(membership_id).await?,
            None => None,
        };

        let payment_query = PaymentQuery::for_member(id);
        let training_query = PersonalTrainingQuery::for_member(id);
        let follow_up_query = FollowUpQuery {
            member_id: Some(id),
            sort: FollowUpSort::DueDateDesc,
            limit: Some(PROFILE_FOLLOW_UP_CAP),
            ..Default::default()
        };

        let (payments, personal_training, follow_ups) = tokio::try_join!(
            self.store.payments.list(&payment_query),
            self.store.personal_training.list(&training_query),
            self.store.follow_ups.list(&follow_up_query),
        )?;

        let totals = PaymentTotals::of(&payments);
        let payments = join_payments(&self.store, payments).await?;

        Ok(MemberProfile {
            member,
            membership,
            payments,
            personal_training,
            follow_ups,
            totals,
        })
    }

    /// Invoices matching the filters with totals over the listed rows
    pub async fn list_payments(&self, params: &PaymentListParams) -> Result<PaymentListing> {
        self.list_payments_at(params, &self.clock()).await
    }

    /// Invoice listing with date buckets resolved against `clock`
    pub async fn list_payments_at(
        &self,
        params: &PaymentListParams,
        clock: &ReportClock,
    ) -> Result<PaymentListing> {
        let resolved = params.resolve(clock)?;

        let payments = self.store.payments.list(&resolved.query).await?;
        let mut joined = join_payments(&self.store, payments).await?;
        if let Some(term) = &resolved.search {
            joined.retain(|p| term.matches_payment(p));
        }

        let summary = PaymentTotals::of(joined.iter().map(|p| &p.payment));
        Ok(PaymentListing {
            payments: joined,
            summary,
        })
    }

    /// Follow-ups soonest due first, at most one hundred
    pub async fn list_follow_ups(
        &self,
        params: &FollowUpListParams,
    ) -> Result<Vec<FollowUpWithMember>> {
        let resolved = params.resolve()?;

        let follow_ups = self.store.follow_ups.list(&resolved.query).await?;
        let mut joined = join_follow_ups(&self.store, follow_ups).await?;
        if let Some(term) = &resolved.search {
            joined.retain(|f| term.matches_follow_up(f));
        }
        joined.truncate(FOLLOW_UP_LIST_CAP);
        Ok(joined)
    }

    /// Latest fifty enquiries matching the store filters, then narrowed by
    /// trial and gender. Stats always cover every enquiry.
    pub async fn list_enquiries(&self, params: &EnquiryListParams) -> Result<EnquiryListing> {
        let filter = params.resolve()?;

        let (mut enquiries, stats) = tokio::try_join!(
            self.store.enquiries.list(&filter.query),
            count_by_status(&self.store),
        )?;

        if let Some(trial_booked) = filter.trial_booked {
            enquiries.retain(|e| e.trial_booked == trial_booked);
        }
        if let Some(gender) = filter.gender {
            enquiries.retain(|e| e.gender == gender);
        }

        Ok(EnquiryListing { enquiries, stats })
    }

    pub async fn list_employees(&self, params: &EmployeeListParams) -> Result<Vec<Employee>> {
        let query = params.resolve()?;
        self.store.employees.list(&query).await
    }

    /// Active packages, shortest first, each with its active-member count
    pub async fn list_memberships(&self) -> Result<Vec<MembershipWithCount>> {
        let offered = MembershipQuery::active();
        let active_members = MemberQuery::with_status(MemberStatus::Active);

        let (memberships, members) = tokio::try_join!(
            self.store.memberships.list(&offered),
            self.store.members.list(&active_members),
        )?;

        let mut holders: HashMap<Uuid, i64> = HashMap::new();
        for membership_id in members.iter().filter_map(|m| m.membership_id) {
            *holders.entry(membership_id).or_default() += 1;
        }

        Ok(memberships
            .into_iter()
            .map(|membership| MembershipWithCount {
                member_count: holders.get(&membership.id).copied().unwrap_or(0),
                membership,
            })
            .collect())
    }

    /// Personal-training packages, newest first, with their member
    pub async fn list_personal_training(
        &self,
        params: &PersonalTrainingListParams,
    ) -> Result<Vec<PersonalTrainingWithMember>> {
        let query = params.resolve()?;
        let packages = self.store.personal_training.list(&query).await?;
        join_personal_training(&self.store, packages).await
    }
}
