// Follow-ups module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{FollowUp, FollowUpStatus, FollowUpType};
pub use repositories::{FollowUpQuery, FollowUpSort, MySqlFollowUpRepository};
pub use services::FollowUpService;
