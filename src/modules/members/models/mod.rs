mod member;

pub use member::{CreateMemberRequest, Gender, Member, MemberStatus, UpdateMemberRequest};
