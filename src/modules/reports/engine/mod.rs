//! Join & Aggregate Engine

pub mod aggregate;
pub mod join;

pub use aggregate::{
    count_where, group_by_month, positive_balance, sum_by, sum_where, PaymentTotals,
};
pub use join::{
    join_follow_ups, join_payments, join_personal_training, left_join, FollowUpWithMember,
    PaymentWithRefs, PersonalTrainingWithMember,
};
