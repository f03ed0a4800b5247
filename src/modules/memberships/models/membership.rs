use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::parse::required_text;
use crate::core::traits::Record;
use crate::core::{AppError, Result};

/// Package category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MembershipType {
    #[serde(rename = "General Training")]
    GeneralTraining,
    #[serde(rename = "Personal Training")]
    PersonalTraining,
    #[serde(rename = "Complete Fitness")]
    CompleteFitness,
    #[serde(rename = "Group Ex")]
    GroupEx,
}

impl MembershipType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipType::GeneralTraining => "General Training",
            MembershipType::PersonalTraining => "Personal Training",
            MembershipType::CompleteFitness => "Complete Fitness",
            MembershipType::GroupEx => "Group Ex",
        }
    }
}

impl std::fmt::Display for MembershipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MembershipType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "General Training" => Ok(MembershipType::GeneralTraining),
            "Personal Training" => Ok(MembershipType::PersonalTraining),
            "Complete Fitness" => Ok(MembershipType::CompleteFitness),
            "Group Ex" => Ok(MembershipType::GroupEx),
            _ => Err(format!("Invalid membership type: {}", s)),
        }
    }
}

/// A sellable membership package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    pub id: Uuid,
    pub package_name: String,
    /// Length of the package in months
    pub duration_months: i32,
    pub sessions: i32,
    pub price: Decimal,
    pub membership_type: MembershipType,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Membership {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Request body for POST /api/memberships
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMembershipRequest {
    pub package_name: String,
    pub duration_months: i32,
    #[serde(default)]
    pub sessions: i32,
    pub price: Decimal,
    pub membership_type: MembershipType,
}

impl Membership {
    pub fn new(request: CreateMembershipRequest, now: DateTime<Utc>) -> Result<Self> {
        if request.duration_months <= 0 {
            return Err(AppError::validation("duration_months must be greater than 0"));
        }
        if request.sessions < 0 {
            return Err(AppError::validation("sessions cannot be negative"));
        }
        if request.price < Decimal::ZERO {
            return Err(AppError::validation("price cannot be negative"));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            package_name: required_text(&request.package_name, "package_name")?,
            duration_months: request.duration_months,
            sessions: request.sessions,
            price: request.price,
            membership_type: request.membership_type,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Active package with the number of active members holding it
#[derive(Debug, Clone, Serialize)]
pub struct MembershipWithCount {
    #[serde(flatten)]
    pub membership: Membership,
    pub member_count: i64,
}
