// Balance-due report
//
// Every outstanding payment is classified once against the report's captured
// clock:
//   due_date < now               -> Overdue
//   now <= due_date <= now + 7d  -> Upcoming
//   later, or no due date        -> NotDue

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::{AppError, ReportClock, Result};
use crate::modules::reports::engine::PaymentWithRefs;

/// Days ahead of now that count as "upcoming"
pub const UPCOMING_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DueStatus {
    Overdue,
    Upcoming,
    NotDue,
}

impl DueStatus {
    pub fn classify(due_date: Option<DateTime<Utc>>, clock: &ReportClock) -> Self {
        let now = clock.now();
        match due_date {
            Some(due) if due < now => DueStatus::Overdue,
            Some(due) if due <= now + Duration::days(UPCOMING_DAYS) => DueStatus::Upcoming,
            _ => DueStatus::NotDue,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DueStatus::Overdue => "overdue",
            DueStatus::Upcoming => "upcoming",
            DueStatus::NotDue => "not_due",
        }
    }
}

/// `due` filter on the balance-due page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DueWindow {
    #[default]
    All,
    Overdue,
    Upcoming,
}

impl DueWindow {
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        match raw.map(str::trim) {
            None | Some("") | Some("all") | Some("All") => Ok(DueWindow::All),
            Some("overdue") => Ok(DueWindow::Overdue),
            Some("upcoming") => Ok(DueWindow::Upcoming),
            Some(other) => Err(AppError::validation(format!(
                "Invalid due filter: '{}' (expected all, overdue or upcoming)",
                other
            ))),
        }
    }

    pub fn admits(&self, status: DueStatus) -> bool {
        match self {
            DueWindow::All => true,
            DueWindow::Overdue => status == DueStatus::Overdue,
            DueWindow::Upcoming => status == DueStatus::Upcoming,
        }
    }
}

/// One outstanding payment with its classification
#[derive(Debug, Clone, Serialize)]
pub struct BalanceDueRow {
    #[serde(flatten)]
    pub record: PaymentWithRefs,
    pub due_status: DueStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BalanceDueSummary {
    /// Rows shown after the `due` window
    pub listed_count: i64,
    /// Sum of the listed balances
    pub listed_amount: Decimal,
    pub overdue_count: i64,
    pub overdue_amount: Decimal,
    pub upcoming_count: i64,
    pub upcoming_amount: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct BalanceDueReport {
    pub generated_at: DateTime<Utc>,
    pub payments: Vec<BalanceDueRow>,
    pub summary: BalanceDueSummary,
}
