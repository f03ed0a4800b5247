// Member model
//
// A member is a client of the gym. `status` drives filtering on every page;
// `client_id` is the human-facing sequential identifier (MEM000001, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::parse::{optional_text, required_text, validate_phone};
use crate::core::traits::Record;
use crate::core::Result;

/// Member lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberStatus {
    Active,
    Inactive,
    Past,
}

impl MemberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Active => "Active",
            MemberStatus::Inactive => "Inactive",
            MemberStatus::Past => "Past",
        }
    }
}

impl Default for MemberStatus {
    fn default() -> Self {
        MemberStatus::Active
    }
}

impl std::fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MemberStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Active" => Ok(MemberStatus::Active),
            "Inactive" => Ok(MemberStatus::Inactive),
            "Past" => Ok(MemberStatus::Past),
            _ => Err(format!("Invalid member status: {}", s)),
        }
    }
}

/// Gender, shared with enquiries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            "Other" => Ok(Gender::Other),
            _ => Err(format!("Invalid gender: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: Uuid,
    pub client_id: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub gender: Gender,
    pub status: MemberStatus,
    pub membership_id: Option<Uuid>,
    pub joining_date: DateTime<Utc>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Member {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Request body for POST /api/members
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMemberRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    pub gender: Gender,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub membership_id: Option<Uuid>,
    #[serde(default)]
    pub expiry_date: Option<DateTime<Utc>>,
}

/// Request body for PATCH /api/members/{id}; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMemberRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    /// Empty string clears the email
    pub email: Option<String>,
    pub gender: Option<Gender>,
    pub status: Option<MemberStatus>,
    /// Empty string clears the address
    pub address: Option<String>,
    pub expiry_date: Option<DateTime<Utc>>,
}

impl Member {
    /// Build a new active member joining at `now`
    pub fn new(client_id: String, request: CreateMemberRequest, now: DateTime<Utc>) -> Result<Self> {
        let first = required_text(&request.first_name, "first_name")?;
        let last = required_text(&request.last_name, "last_name")?;

        Ok(Self {
            id: Uuid::new_v4(),
            client_id,
            name: format!("{} {}", first, last),
            phone: validate_phone(&request.phone)?,
            email: optional_text(request.email),
            gender: request.gender,
            status: MemberStatus::Active,
            membership_id: request.membership_id,
            joining_date: now,
            expiry_date: request.expiry_date,
            address: optional_text(request.address),
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a partial update in place
    pub fn apply(&mut self, update: UpdateMemberRequest, now: DateTime<Utc>) -> Result<()> {
        if let Some(name) = update.name {
            self.name = required_text(&name, "name")?;
        }
        if let Some(phone) = update.phone {
            self.phone = validate_phone(&phone)?;
        }
        if let Some(email) = update.email {
            self.email = optional_text(Some(email));
        }
        if let Some(gender) = update.gender {
            self.gender = gender;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(address) = update.address {
            self.address = optional_text(Some(address));
        }
        if let Some(expiry_date) = update.expiry_date {
            self.expiry_date = Some(expiry_date);
        }
        self.updated_at = now;
        Ok(())
    }
}
