use chrono::{DateTime, Months, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::parse::required_text;
use crate::core::traits::Record;
use crate::core::{AppError, Result};
use crate::modules::payments::models::{validate_amount, Payment};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrainingStatus {
    Active,
    Expired,
}

impl TrainingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrainingStatus::Active => "Active",
            TrainingStatus::Expired => "Expired",
        }
    }
}

impl std::fmt::Display for TrainingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TrainingStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Active" => Ok(TrainingStatus::Active),
            "Expired" => Ok(TrainingStatus::Expired),
            _ => Err(format!("Invalid training status: {}", s)),
        }
    }
}

/// Personal-training package sold to a member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalTraining {
    pub id: Uuid,
    pub member_id: Uuid,
    pub package_name: String,
    pub duration_months: i32,
    pub sessions: i32,
    pub price: Decimal,
    pub start_date: DateTime<Utc>,
    /// `start_date` plus `duration_months` calendar months
    pub end_date: DateTime<Utc>,
    pub status: TrainingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for PersonalTraining {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Request body for POST /api/personal-training
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePersonalTrainingRequest {
    pub member_id: Uuid,
    pub package_name: String,
    pub duration_months: i32,
    #[serde(default)]
    pub sessions: i32,
    pub price: Decimal,
    /// Defaults to now
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
}

impl PersonalTraining {
    pub fn new(request: CreatePersonalTrainingRequest, now: DateTime<Utc>) -> Result<Self> {
        if request.duration_months <= 0 {
            return Err(AppError::validation("duration_months must be greater than 0"));
        }
        if request.sessions < 0 {
            return Err(AppError::validation("sessions cannot be negative"));
        }
        validate_amount(request.price, "price")?;

        let start_date = request.start_date.unwrap_or(now);
        let end_date = start_date
            .checked_add_months(Months::new(request.duration_months as u32))
            .ok_or_else(|| AppError::validation("duration_months is out of range"))?;

        Ok(Self {
            id: Uuid::new_v4(),
            member_id: request.member_id,
            package_name: required_text(&request.package_name, "package_name")?,
            duration_months: request.duration_months,
            sessions: request.sessions,
            price: request.price,
            start_date,
            end_date,
            status: TrainingStatus::Active,
            created_at: now,
            updated_at: now,
        })
    }
}

/// A newly sold package together with the invoice raised for it
#[derive(Debug, Clone, Serialize)]
pub struct PersonalTrainingEnrollment {
    pub personal_training: PersonalTraining,
    pub invoice: Payment,
}
