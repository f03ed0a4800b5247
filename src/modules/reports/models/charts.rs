use rust_decimal::Decimal;
use serde::Serialize;

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Twelve-month trend series for the current year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub year: i32,
    pub months: [&'static str; 12],
    pub members: MemberSeries,
    pub revenue: RevenueSeries,
    pub lead_types: LeadTypeBreakdown,
}

/// New members per `created_at` month, split by current status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MemberSeries {
    pub active: [i64; 12],
    pub inactive: [i64; 12],
    pub past: [i64; 12],
}

/// Money per `invoice_date` month
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RevenueSeries {
    pub paid: [Decimal; 12],
    pub balance: [Decimal; 12],
    /// Balance counted only where positive
    pub pending: [Decimal; 12],
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LeadTypeBreakdown {
    pub hot: i64,
    pub warm: i64,
    pub cold: i64,
    pub unassigned: i64,
}
