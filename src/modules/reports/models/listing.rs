use serde::Serialize;

use crate::modules::enquiries::models::{Enquiry, EnquiryStats};
use crate::modules::follow_ups::models::FollowUp;
use crate::modules::members::models::Member;
use crate::modules::memberships::models::Membership;
use crate::modules::personal_training::models::PersonalTraining;
use crate::modules::reports::engine::{PaymentTotals, PaymentWithRefs};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MemberCounts {
    pub total: i64,
    pub active: i64,
    pub inactive: i64,
    pub past: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberListing {
    pub members: Vec<Member>,
    /// Over all members, independent of the filters
    pub counts: MemberCounts,
}

/// Member page: everything recorded against one member
#[derive(Debug, Clone, Serialize)]
pub struct MemberProfile {
    pub member: Member,
    /// Current package; `None` when unset or dangling
    pub membership: Option<Membership>,
    /// Newest invoice first
    pub payments: Vec<PaymentWithRefs>,
    pub personal_training: Vec<PersonalTraining>,
    /// Ten most recent by due date
    pub follow_ups: Vec<FollowUp>,
    pub totals: PaymentTotals,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentListing {
    pub payments: Vec<PaymentWithRefs>,
    pub summary: PaymentTotals,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnquiryListing {
    pub enquiries: Vec<Enquiry>,
    pub stats: EnquiryStats,
}
