pub mod follow_up_service;

pub use follow_up_service::FollowUpService;
