mod membership_repository;

pub use membership_repository::{MembershipQuery, MembershipRepository, MySqlMembershipRepository};
