mod follow_up_repository;

pub use follow_up_repository::{
    FollowUpQuery, FollowUpRepository, FollowUpSort, MySqlFollowUpRepository,
};
