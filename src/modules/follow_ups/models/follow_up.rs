use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::parse::optional_text;
use crate::core::traits::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FollowUpType {
    #[serde(rename = "Balance Due")]
    BalanceDue,
    #[serde(rename = "Membership Renewal")]
    MembershipRenewal,
    /// The follow-ups page labels this `Birthday/General`
    #[serde(rename = "General", alias = "Birthday/General")]
    General,
}

impl FollowUpType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FollowUpType::BalanceDue => "Balance Due",
            FollowUpType::MembershipRenewal => "Membership Renewal",
            FollowUpType::General => "General",
        }
    }
}

impl std::fmt::Display for FollowUpType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FollowUpType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Balance Due" => Ok(FollowUpType::BalanceDue),
            "Membership Renewal" => Ok(FollowUpType::MembershipRenewal),
            "General" | "Birthday/General" => Ok(FollowUpType::General),
            _ => Err(format!("Invalid follow-up type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FollowUpStatus {
    Hot,
    Warm,
    Cold,
    Done,
}

impl FollowUpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FollowUpStatus::Hot => "Hot",
            FollowUpStatus::Warm => "Warm",
            FollowUpStatus::Cold => "Cold",
            FollowUpStatus::Done => "Done",
        }
    }

    pub fn is_pending(&self) -> bool {
        *self != FollowUpStatus::Done
    }
}

impl std::fmt::Display for FollowUpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FollowUpStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Hot" => Ok(FollowUpStatus::Hot),
            "Warm" => Ok(FollowUpStatus::Warm),
            "Cold" => Ok(FollowUpStatus::Cold),
            "Done" => Ok(FollowUpStatus::Done),
            _ => Err(format!("Invalid follow-up status: {}", s)),
        }
    }
}

/// Scheduled contact with a member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowUp {
    pub id: Uuid,
    /// Weak reference; the member may have been deleted
    pub member_id: Uuid,
    #[serde(rename = "type")]
    pub follow_up_type: FollowUpType,
    pub due_date: DateTime<Utc>,
    pub status: FollowUpStatus,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for FollowUp {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Request body for POST /api/follow-ups
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFollowUpRequest {
    pub member_id: Uuid,
    #[serde(rename = "type")]
    pub follow_up_type: FollowUpType,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub status: Option<FollowUpStatus>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Request body for PATCH /api/follow-ups/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateFollowUpStatusRequest {
    pub status: FollowUpStatus,
    #[serde(default)]
    pub comment: Option<String>,
}

impl FollowUp {
    /// New follow-ups default to `Warm`
    pub fn new(request: CreateFollowUpRequest, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            member_id: request.member_id,
            follow_up_type: request.follow_up_type,
            due_date: request.due_date,
            status: request.status.unwrap_or(FollowUpStatus::Warm),
            comment: optional_text(request.comment).unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_status(&mut self, update: UpdateFollowUpStatusRequest, now: DateTime<Utc>) {
        self.status = update.status;
        if let Some(comment) = optional_text(update.comment) {
            self.comment = comment;
        }
        self.updated_at = now;
    }
}
