mod follow_up;

pub use follow_up::{
    CreateFollowUpRequest, FollowUp, FollowUpStatus, FollowUpType, UpdateFollowUpStatusRequest,
};
