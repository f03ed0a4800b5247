mod balance_due;
mod charts;
mod dashboard;
mod listing;
mod sales;

pub use balance_due::{
    BalanceDueReport, BalanceDueRow, BalanceDueSummary, DueStatus, DueWindow, UPCOMING_DAYS,
};
pub use charts::{ChartData, LeadTypeBreakdown, MemberSeries, RevenueSeries, MONTH_LABELS};
pub use dashboard::{AmountCount, BalanceStats, DashboardStats, MemberStats, SalesStats};
pub use listing::{EnquiryListing, MemberCounts, MemberListing, MemberProfile, PaymentListing};
pub use sales::{ModeBreakdown, SalesReport, SalesSummary};
