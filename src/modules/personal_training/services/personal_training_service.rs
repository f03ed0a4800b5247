// PersonalTrainingService
// Selling a PT package also raises its invoice: PENDING, due immediately,
// with no membership reference.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::core::{AppError, Result};
use crate::modules::payments::models::{CreatePaymentRequest, PaymentMode};
use crate::modules::payments::services::PaymentService;
use crate::modules::personal_training::models::{
    CreatePersonalTrainingRequest, PersonalTraining, PersonalTrainingEnrollment,
};
use crate::store::EntityStore;

pub struct PersonalTrainingService {
    store: EntityStore,
    payments: PaymentService,
}

impl PersonalTrainingService {
    pub fn new(store: EntityStore) -> Self {
        Self {
            payments: PaymentService::new(store.clone()),
            store,
        }
    }

    pub async fn create_personal_training(
        &self,
        request: CreatePersonalTrainingRequest,
    ) -> Result<PersonalTrainingEnrollment> {
        if self.store.members.find_by_id(request.member_id).await?.is_none() {
            return Err(AppError::not_found(format!(
                "Member with id '{}' not found",
                request.member_id
            )));
        }

        let now = Utc::now();
        let personal_training = PersonalTraining::new(request, now)?;
        self.store.personal_training.create(&personal_training).await?;

        let invoice = match self
            .payments
            .create_payment(CreatePaymentRequest {
                member_id: personal_training.member_id,
                membership_id: None,
                plan_total: Some(personal_training.price),
                discount: Decimal::ZERO,
                paid: Decimal::ZERO,
                payment_mode: PaymentMode::Cash,
                invoice_date: Some(now),
                due_date: Some(now),
            })
            .await
        {
            Ok(invoice) => invoice,
            Err(e) => {
                warn!(
                    personal_training_id = %personal_training.id,
                    error = %e,
                    "Invoice not raised, removing package"
                );
                self.store.personal_training.delete(personal_training.id).await?;
                return Err(e);
            }
        };

        info!(
            personal_training_id = %personal_training.id,
            member_id = %personal_training.member_id,
            invoice_number = %invoice.invoice_number,
            "Personal training package sold"
        );

        Ok(PersonalTrainingEnrollment {
            personal_training,
            invoice,
        })
    }
}
