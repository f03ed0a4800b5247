//! Entity store
//!
//! One handle bundling a repository per collection. Built once in `main`
//! (or per test) and cloned into every service; there is no global instance.

mod memory;

use std::sync::Arc;

use sqlx::MySqlPool;

use crate::modules::employees::models::Employee;
use crate::modules::employees::repositories::{EmployeeQuery, EmployeeRepository, MySqlEmployeeRepository};
use crate::modules::enquiries::models::Enquiry;
use crate::modules::enquiries::repositories::{EnquiryQuery, EnquiryRepository, MySqlEnquiryRepository};
use crate::modules::follow_ups::models::FollowUp;
use crate::modules::follow_ups::repositories::{
    FollowUpQuery, FollowUpRepository, MySqlFollowUpRepository,
};
use crate::modules::members::models::Member;
use crate::modules::members::repositories::{MemberQuery, MemberRepository, MySqlMemberRepository};
use crate::modules::memberships::models::Membership;
use crate::modules::memberships::repositories::{
    MembershipQuery, MembershipRepository, MySqlMembershipRepository,
};
use crate::modules::payments::models::Payment;
use crate::modules::payments::repositories::{
    MySqlPaymentRepository, PaymentQuery, PaymentRepository,
};
use crate::modules::personal_training::models::PersonalTraining;
use crate::modules::personal_training::repositories::{
    MySqlPersonalTrainingRepository, PersonalTrainingQuery, PersonalTrainingRepository,
};

pub use memory::MemoryRepository;

/// Repository handles for every collection
#[derive(Clone)]
pub struct EntityStore {
    pub members: Arc<MemberRepository>,
    pub memberships: Arc<MembershipRepository>,
    pub payments: Arc<dyn PaymentRepository>,
    pub employees: Arc<EmployeeRepository>,
    pub enquiries: Arc<EnquiryRepository>,
    pub follow_ups: Arc<FollowUpRepository>,
    pub personal_training: Arc<PersonalTrainingRepository>,
}

impl EntityStore {
    /// MySQL-backed store sharing one connection pool
    pub fn mysql(pool: MySqlPool) -> Self {
        Self {
            members: Arc::new(MySqlMemberRepository::new(pool.clone())),
            memberships: Arc::new(MySqlMembershipRepository::new(pool.clone())),
            payments: Arc::new(MySqlPaymentRepository::new(pool.clone())),
            employees: Arc::new(MySqlEmployeeRepository::new(pool.clone())),
            enquiries: Arc::new(MySqlEnquiryRepository::new(pool.clone())),
            follow_ups: Arc::new(MySqlFollowUpRepository::new(pool.clone())),
            personal_training: Arc::new(MySqlPersonalTrainingRepository::new(pool)),
        }
    }

    /// Process-local store; sequential codes are unique like the MySQL schema
    pub fn in_memory() -> Self {
        Self {
            members: Arc::new(
                MemoryRepository::<Member, MemberQuery>::new()
                    .with_unique_key(|m| m.client_id.clone()),
            ),
            memberships: Arc::new(MemoryRepository::<Membership, MembershipQuery>::new()),
            payments: Arc::new(
                MemoryRepository::<Payment, PaymentQuery>::new()
                    .with_unique_key(|p| p.invoice_number.clone()),
            ),
            employees: Arc::new(
                MemoryRepository::<Employee, EmployeeQuery>::new()
                    .with_unique_key(|e| e.employee_id.clone()),
            ),
            enquiries: Arc::new(
                MemoryRepository::<Enquiry, EnquiryQuery>::new()
                    .with_unique_key(|e| e.enquiry_no.clone()),
            ),
            follow_ups: Arc::new(MemoryRepository::<FollowUp, FollowUpQuery>::new()),
            personal_training: Arc::new(
                MemoryRepository::<PersonalTraining, PersonalTrainingQuery>::new(),
            ),
        }
    }
}
