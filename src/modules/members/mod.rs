// Members module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Gender, Member, MemberStatus};
pub use repositories::{MemberQuery, MySqlMemberRepository};
pub use services::MemberService;
