use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Headline counts and amounts for the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub generated_at: DateTime<Utc>,
    pub members: MemberStats,
    pub sales: SalesStats,
    pub balance: BalanceStats,
    /// Follow-ups not yet `Done`
    pub pending_follow_ups: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MemberStats {
    pub total: i64,
    pub active: i64,
    /// Memberships expiring within the next seven days
    pub upcoming_renewals: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AmountCount {
    pub amount: Decimal,
    pub count: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SalesStats {
    /// Every invoice ever raised
    pub total: AmountCount,
    /// Invoices created in the trailing 30 days
    pub fresh: AmountCount,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BalanceStats {
    pub paid: Decimal,
    pub due: Decimal,
}
