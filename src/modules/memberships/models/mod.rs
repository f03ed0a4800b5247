mod membership;

pub use membership::{CreateMembershipRequest, Membership, MembershipType, MembershipWithCount};
