// Enquiry model
//
// A walk-in or phone lead. `enquiry_no` is the zero-padded sequence shown on
// the enquiries page (000001, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::parse::{optional_text, required_text, validate_phone};
use crate::core::traits::Record;
use crate::core::Result;
use crate::modules::members::models::Gender;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnquiryStatus {
    Open,
    Close,
    #[serde(rename = "Not Interested")]
    NotInterested,
    #[serde(rename = "Call Done")]
    CallDone,
    #[serde(rename = "Call Not Connected")]
    CallNotConnected,
}

impl EnquiryStatus {
    pub const ALL: [EnquiryStatus; 5] = [
        EnquiryStatus::Open,
        EnquiryStatus::Close,
        EnquiryStatus::NotInterested,
        EnquiryStatus::CallDone,
        EnquiryStatus::CallNotConnected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnquiryStatus::Open => "Open",
            EnquiryStatus::Close => "Close",
            EnquiryStatus::NotInterested => "Not Interested",
            EnquiryStatus::CallDone => "Call Done",
            EnquiryStatus::CallNotConnected => "Call Not Connected",
        }
    }
}

impl std::fmt::Display for EnquiryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EnquiryStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        EnquiryStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Invalid enquiry status: {}", s))
    }
}

/// Sales temperature of a lead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadType {
    Hot,
    Warm,
    Cold,
}

impl LeadType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadType::Hot => "Hot",
            LeadType::Warm => "Warm",
            LeadType::Cold => "Cold",
        }
    }
}

impl std::fmt::Display for LeadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LeadType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Hot" => Ok(LeadType::Hot),
            "Warm" => Ok(LeadType::Warm),
            "Cold" => Ok(LeadType::Cold),
            _ => Err(format!("Invalid lead type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enquiry {
    pub id: Uuid,
    pub enquiry_no: String,
    pub enquiry_date: DateTime<Utc>,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub gender: Gender,
    pub lead_type: Option<LeadType>,
    pub trial_booked: bool,
    pub status: EnquiryStatus,
    pub referred_by: Option<String>,
    pub remark: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Enquiry {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Request body for POST /api/enquiries
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEnquiryRequest {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    pub gender: Gender,
    #[serde(default)]
    pub lead_type: Option<LeadType>,
    #[serde(default)]
    pub trial_booked: bool,
    #[serde(default)]
    pub referred_by: Option<String>,
    #[serde(default)]
    pub remark: Option<String>,
}

impl Enquiry {
    /// New enquiries always start `Open`
    pub fn new(enquiry_no: String, request: CreateEnquiryRequest, now: DateTime<Utc>) -> Result<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            enquiry_no,
            enquiry_date: now,
            name: required_text(&request.name, "name")?,
            phone: validate_phone(&request.phone)?,
            email: optional_text(request.email),
            gender: request.gender,
            lead_type: request.lead_type,
            trial_booked: request.trial_booked,
            status: EnquiryStatus::Open,
            referred_by: optional_text(request.referred_by),
            remark: optional_text(request.remark),
            created_at: now,
            updated_at: now,
        })
    }
}

/// Count of enquiries per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EnquiryStats {
    pub open: i64,
    pub close: i64,
    pub not_interested: i64,
    pub call_done: i64,
    pub call_not_connected: i64,
    pub total: i64,
}

impl EnquiryStats {
    pub fn record(&mut self, status: EnquiryStatus, count: i64) {
        match status {
            EnquiryStatus::Open => self.open = count,
            EnquiryStatus::Close => self.close = count,
            EnquiryStatus::NotInterested => self.not_interested = count,
            EnquiryStatus::CallDone => self.call_done = count,
            EnquiryStatus::CallNotConnected => self.call_not_connected = count,
        }
        self.total =
            self.open + self.close + self.not_interested + self.call_done + self.call_not_connected;
    }
}
