pub mod employees;
pub mod enquiries;
pub mod follow_ups;
pub mod health;
pub mod members;
pub mod memberships;
pub mod payments;
pub mod personal_training;
pub mod reports;

