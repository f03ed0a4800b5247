use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::parse::{optional_text, required_text, validate_phone};
use crate::core::traits::Record;
use crate::core::{AppError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmployeeStatus {
    Active,
    Inactive,
}

impl EmployeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "Active",
            EmployeeStatus::Inactive => "Inactive",
        }
    }
}

impl std::fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EmployeeStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Active" => Ok(EmployeeStatus::Active),
            "Inactive" => Ok(EmployeeStatus::Inactive),
            _ => Err(format!("Invalid employee status: {}", s)),
        }
    }
}

/// Gym staff member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: Uuid,
    /// Sequential staff code (EMP0001, ...)
    pub employee_id: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    /// Free-form gym role (Trainer, Receptionist, Manager, ...)
    pub role: String,
    pub joining_date: DateTime<Utc>,
    pub salary: Option<Decimal>,
    pub status: EmployeeStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Employee {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Request body for POST /api/employees
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEmployeeRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: String,
    #[serde(default)]
    pub salary: Option<Decimal>,
}

/// Request body for PATCH /api/employees/{id}
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEmployeeRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub status: Option<EmployeeStatus>,
    pub salary: Option<Decimal>,
}

impl Employee {
    pub fn new(employee_id: String, request: CreateEmployeeRequest, now: DateTime<Utc>) -> Result<Self> {
        let first = required_text(&request.first_name, "first_name")?;
        let last = request.last_name.trim();
        let name = if last.is_empty() {
            first
        } else {
            format!("{} {}", first, last)
        };
        validate_salary(request.salary)?;

        Ok(Self {
            id: Uuid::new_v4(),
            employee_id,
            name,
            phone: validate_phone(&request.phone)?,
            email: optional_text(request.email),
            role: required_text(&request.role, "role")?,
            joining_date: now,
            salary: request.salary,
            status: EmployeeStatus::Active,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn apply(&mut self, update: UpdateEmployeeRequest, now: DateTime<Utc>) -> Result<()> {
        if let Some(name) = update.name {
            self.name = required_text(&name, "name")?;
        }
        if let Some(phone) = update.phone {
            self.phone = validate_phone(&phone)?;
        }
        if let Some(email) = update.email {
            self.email = optional_text(Some(email));
        }
        if let Some(role) = update.role {
            self.role = required_text(&role, "role")?;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if update.salary.is_some() {
            validate_salary(update.salary)?;
            self.salary = update.salary;
        }
        self.updated_at = now;
        Ok(())
    }
}

fn validate_salary(salary: Option<Decimal>) -> Result<()> {
    match salary {
        Some(amount) if amount < Decimal::ZERO => {
            Err(AppError::validation("salary cannot be negative"))
        }
        _ => Ok(()),
    }
}
