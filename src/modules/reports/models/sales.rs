use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::modules::payments::models::PaymentMode;
use crate::modules::reports::engine::PaymentWithRefs;
use crate::modules::reports::filters::DateRange;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SalesSummary {
    pub invoice_count: i64,
    pub total: Decimal,
    pub paid: Decimal,
    pub balance: Decimal,
}

/// Paid amounts per payment mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ModeBreakdown {
    pub cash: Decimal,
    pub online: Decimal,
    pub cheque: Decimal,
    pub wallet: Decimal,
    pub other: Decimal,
}

impl ModeBreakdown {
    pub fn add(&mut self, mode: PaymentMode, paid: Decimal) {
        let slot = match mode {
            PaymentMode::Cash => &mut self.cash,
            PaymentMode::Online => &mut self.online,
            PaymentMode::Cheque => &mut self.cheque,
            PaymentMode::Wallet => &mut self.wallet,
            PaymentMode::Other => &mut self.other,
        };
        *slot += paid;
    }

    pub fn total(&self) -> Decimal {
        self.cash + self.online + self.cheque + self.wallet + self.other
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SalesReport {
    pub generated_at: DateTime<Utc>,
    /// Invoice-date window; `None` means all time
    pub period: Option<DateRange>,
    pub payment_mode: Option<PaymentMode>,
    pub payments: Vec<PaymentWithRefs>,
    /// Over the listed (mode-filtered) rows
    pub summary: SalesSummary,
    /// Over every row in the window, whatever the mode filter
    pub by_mode: ModeBreakdown,
}
