// Memberships module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Membership, MembershipType};
pub use repositories::{MembershipQuery, MySqlMembershipRepository};
pub use services::MembershipService;
