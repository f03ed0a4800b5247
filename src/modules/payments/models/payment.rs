// Payment model
//
// One invoice raised against a member. Monetary fields always reconcile:
//   total   = plan_total - discount
//   balance = total - paid
//   status  = PAID  <=>  balance == 0
//
// Status lifecycle:
//   PENDING     --mark paid / amount leaving no balance--> PAID
//   PENDING     --partial amount-->                        BALANCE_DUE
//   PAID        --amount reintroducing a balance-->        BALANCE_DUE
//   BALANCE_DUE --amount leaving no balance-->             PAID

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::traits::Record;
use crate::core::{AppError, Result};

/// Money amounts carry at most two decimal places
const MONEY_SCALE: u32 = 2;

/// Largest value a DECIMAL(12,2) column holds
pub fn max_amount() -> Decimal {
    Decimal::new(999_999_999_999, MONEY_SCALE)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Nothing outstanding
    #[serde(rename = "PAID")]
    Paid,

    /// Invoice raised, nothing paid yet
    #[serde(rename = "PENDING")]
    Pending,

    /// Partially paid (or re-opened after being paid)
    #[serde(rename = "BALANCE_DUE")]
    BalanceDue,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "PAID",
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::BalanceDue => "BALANCE_DUE",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "PAID" => Ok(PaymentStatus::Paid),
            "PENDING" => Ok(PaymentStatus::Pending),
            "BALANCE_DUE" => Ok(PaymentStatus::BalanceDue),
            _ => Err(format!("Invalid payment status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMode {
    Cash,
    Online,
    Cheque,
    Wallet,
    Other,
}

impl PaymentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMode::Cash => "Cash",
            PaymentMode::Online => "Online",
            PaymentMode::Cheque => "Cheque",
            PaymentMode::Wallet => "Wallet",
            PaymentMode::Other => "Other",
        }
    }

    /// Case-insensitive parse used by the sales filter (`cash`, `Online`, ...)
    pub fn parse_loose(s: &str) -> std::result::Result<Self, String> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(PaymentMode::Cash),
            "online" => Ok(PaymentMode::Online),
            "cheque" => Ok(PaymentMode::Cheque),
            "wallet" => Ok(PaymentMode::Wallet),
            "other" => Ok(PaymentMode::Other),
            _ => Err(format!("Invalid payment mode: {}", s)),
        }
    }
}

impl Default for PaymentMode {
    fn default() -> Self {
        PaymentMode::Cash
    }
}

impl std::fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Cash" => Ok(PaymentMode::Cash),
            "Online" => Ok(PaymentMode::Online),
            "Cheque" => Ok(PaymentMode::Cheque),
            "Wallet" => Ok(PaymentMode::Wallet),
            "Other" => Ok(PaymentMode::Other),
            _ => Err(format!("Invalid payment mode: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub member_id: Uuid,
    /// Weak reference; may be absent or dangling
    pub membership_id: Option<Uuid>,
    pub invoice_number: String,
    pub invoice_date: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    pub plan_total: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub paid: Decimal,
    pub balance: Decimal,
    pub payment_mode: PaymentMode,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Payment {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Request body for POST /api/payments
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePaymentRequest {
    pub member_id: Uuid,
    #[serde(default)]
    pub membership_id: Option<Uuid>,
    /// Defaults to the membership price when omitted
    #[serde(default)]
    pub plan_total: Option<Decimal>,
    #[serde(default)]
    pub discount: Decimal,
    #[serde(default)]
    pub paid: Decimal,
    #[serde(default)]
    pub payment_mode: PaymentMode,
    #[serde(default)]
    pub invoice_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

/// Request body for PATCH /api/payments/{id}
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePaymentRequest {
    /// New cumulative paid amount
    pub paid: Option<Decimal>,
    pub payment_mode: Option<PaymentMode>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Amounts fully resolved for a new invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvoiceAmounts {
    pub plan_total: Decimal,
    pub discount: Decimal,
    pub paid: Decimal,
}

impl Payment {
    /// Build a new invoice, deriving total, balance and status
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        member_id: Uuid,
        membership_id: Option<Uuid>,
        invoice_number: String,
        amounts: InvoiceAmounts,
        payment_mode: PaymentMode,
        invoice_date: DateTime<Utc>,
        due_date: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        validate_amount(amounts.plan_total, "plan_total")?;
        validate_amount(amounts.discount, "discount")?;
        validate_amount(amounts.paid, "paid")?;

        if amounts.discount > amounts.plan_total {
            return Err(AppError::validation(format!(
                "discount ({}) cannot exceed plan_total ({})",
                amounts.discount, amounts.plan_total
            )));
        }

        let total = amounts.plan_total - amounts.discount;
        if amounts.paid > total {
            return Err(AppError::validation(format!(
                "paid ({}) cannot exceed total ({})",
                amounts.paid, total
            )));
        }

        let balance = total - amounts.paid;
        let status = if balance.is_zero() {
            PaymentStatus::Paid
        } else if amounts.paid.is_zero() {
            PaymentStatus::Pending
        } else {
            PaymentStatus::BalanceDue
        };

        Ok(Self {
            id: Uuid::new_v4(),
            member_id,
            membership_id,
            invoice_number,
            invoice_date,
            due_date,
            plan_total: amounts.plan_total,
            discount: amounts.discount,
            total,
            paid: amounts.paid,
            balance,
            payment_mode,
            status,
            created_at: now,
            updated_at: now,
        })
    }

    /// Settle the invoice in full
    pub fn mark_paid(&mut self, now: DateTime<Utc>) {
        self.paid = self.total;
        self.balance = Decimal::ZERO;
        self.status = PaymentStatus::Paid;
        self.updated_at = now;
    }

    /// Set the cumulative paid amount; may move PAID back to BALANCE_DUE
    pub fn record_paid_amount(&mut self, paid: Decimal, now: DateTime<Utc>) -> Result<()> {
        validate_amount(paid, "paid")?;
        if paid > self.total {
            return Err(AppError::validation(format!(
                "paid ({}) cannot exceed total ({})",
                paid, self.total
            )));
        }

        self.paid = paid;
        self.balance = self.total - paid;
        self.status = if self.balance.is_zero() {
            PaymentStatus::Paid
        } else {
            PaymentStatus::BalanceDue
        };
        self.updated_at = now;
        Ok(())
    }

    /// Apply a PATCH request
    pub fn apply(&mut self, update: UpdatePaymentRequest, now: DateTime<Utc>) -> Result<()> {
        if let Some(paid) = update.paid {
            self.record_paid_amount(paid, now)?;
        }
        if let Some(mode) = update.payment_mode {
            self.payment_mode = mode;
        }
        if let Some(due_date) = update.due_date {
            self.due_date = Some(due_date);
        }
        self.updated_at = now;
        Ok(())
    }

    pub fn has_balance(&self) -> bool {
        self.balance > Decimal::ZERO
    }

    /// All three reconciliation invariants hold
    pub fn is_consistent(&self) -> bool {
        self.total == self.plan_total - self.discount
            && self.balance == self.total - self.paid
            && (self.status == PaymentStatus::Paid) == self.balance.is_zero()
    }
}

/// Non-negative, at most two decimal places and within the column range
pub(crate) fn validate_amount(amount: Decimal, field: &str) -> Result<()> {
    if amount < Decimal::ZERO {
        return Err(AppError::validation(format!("{} cannot be negative", field)));
    }
    if amount > max_amount() {
        return Err(AppError::validation(format!(
            "{} cannot exceed {}",
            field,
            max_amount()
        )));
    }
    if amount.scale() > MONEY_SCALE && amount.normalize().scale() > MONEY_SCALE {
        return Err(AppError::validation(format!(
            "{} must have at most {} decimal places, got {}",
            field, MONEY_SCALE, amount
        )));
    }
    Ok(())
}
