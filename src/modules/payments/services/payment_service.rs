// PaymentService
// Invoice creation with derived amounts, and the paid/balance transitions.

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::core::parse::sequence_code;
use crate::core::{AppError, Result};
use crate::modules::payments::models::{
    CreatePaymentRequest, InvoiceAmounts, Payment, UpdatePaymentRequest,
};
use crate::modules::payments::repositories::PaymentQuery;
use crate::store::EntityStore;

/// Service for invoices and their payment state
pub struct PaymentService {
    store: EntityStore,
}

impl PaymentService {
    pub fn new(store: EntityStore) -> Self {
        Self { store }
    }

    /// Next sequential invoice number (INV-000001, ...)
    pub async fn next_invoice_number(&self) -> Result<String> {
        let existing = self.store.payments.count(&PaymentQuery::default()).await?;
        Ok(sequence_code("INV-", existing + 1, 6))
    }

    /// Raise an invoice for a member. `plan_total` falls back to the membership price.
    pub async fn create_payment(&self, request: CreatePaymentRequest) -> Result<Payment> {
        if self.store.members.find_by_id(request.member_id).await?.is_none() {
            return Err(AppError::not_found(format!(
                "Member with id '{}' not found",
                request.member_id
            )));
        }

        let membership = match request.membership_id {
            Some(id) => Some(self.store.memberships.find_by_id(id).await?.ok_or_else(|| {
                AppError::not_found(format!("Membership with id '{}' not found", id))
            })?),
            None => None,
        };

        let plan_total = match (request.plan_total, &membership) {
            (Some(amount), _) => amount,
            (None, Some(membership)) => membership.price,
            (None, None) => {
                return Err(AppError::validation(
                    "plan_total is required when no membership is given",
                ))
            }
        };

        let now = Utc::now();
        let invoice_number = self.next_invoice_number().await?;
        let payment = Payment::new(
            request.member_id,
            request.membership_id,
            invoice_number,
            InvoiceAmounts {
                plan_total,
                discount: request.discount,
                paid: request.paid,
            },
            request.payment_mode,
            request.invoice_date.unwrap_or(now),
            request.due_date,
            now,
        )?;

        self.store.payments.create(&payment).await?;

        info!(
            payment_id = %payment.id,
            invoice_number = %payment.invoice_number,
            total = %payment.total,
            status = %payment.status,
            "Invoice created"
        );
        Ok(payment)
    }

    pub async fn get_payment(&self, id: Uuid) -> Result<Payment> {
        self.store
            .payments
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Payment with id '{}' not found", id)))
    }

    /// Settle the full balance
    pub async fn mark_paid(&self, id: Uuid) -> Result<Payment> {
        let mut payment = self.get_payment(id).await?;
        let previous = payment.status;
        payment.mark_paid(Utc::now());
        self.persist(&payment).await?;

        info!(
            payment_id = %id,
            from = %previous,
            to = %payment.status,
            "Payment marked as paid"
        );
        Ok(payment)
    }

    /// Partial update: paid amount, mode, due date
    pub async fn update_payment(&self, id: Uuid, update: UpdatePaymentRequest) -> Result<Payment> {
        let mut payment = self.get_payment(id).await?;
        let previous = payment.status;
        payment.apply(update, Utc::now())?;
        self.persist(&payment).await?;

        info!(
            payment_id = %id,
            from = %previous,
            to = %payment.status,
            paid = %payment.paid,
            balance = %payment.balance,
            "Payment updated"
        );
        Ok(payment)
    }

    pub async fn delete_payment(&self, id: Uuid) -> Result<()> {
        if !self.store.payments.delete(id).await? {
            return Err(AppError::not_found(format!("Payment with id '{}' not found", id)));
        }

        warn!(payment_id = %id, "Payment deleted");
        Ok(())
    }

    async fn persist(&self, payment: &Payment) -> Result<()> {
        if !self.store.payments.update(payment).await? {
            return Err(AppError::not_found(format!(
                "Payment with id '{}' not found",
                payment.id
            )));
        }
        Ok(())
    }
}
