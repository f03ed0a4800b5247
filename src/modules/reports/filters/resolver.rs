// Filter Resolver
//
// Turns the flat optional string parameters the pages submit into typed store
// queries plus an optional post-join search. Every unknown value is rejected
// here, before any store access.

use serde::Deserialize;
use uuid::Uuid;

use crate::core::parse::parse_id;
use crate::core::{AppError, ReportClock, Result};
use crate::modules::employees::repositories::EmployeeQuery;
use crate::modules::enquiries::repositories::EnquiryQuery;
use crate::modules::follow_ups::repositories::{FollowUpQuery, FollowUpSort};
use crate::modules::members::models::{Gender, MemberStatus};
use crate::modules::members::repositories::MemberQuery;
use crate::modules::payments::models::PaymentMode;
use crate::modules::payments::repositories::{PaymentQuery, PaymentSort};
use crate::modules::personal_training::repositories::PersonalTrainingQuery;
use crate::modules::reports::filters::criteria::{
    parse_choice, parse_date_window, parse_flag, DateBucket, DateRange, DUE_DATE_MONTH,
    INVOICE_DATE_MONTH,
};
use crate::modules::reports::filters::search::SearchTerm;
use crate::modules::reports::models::DueWindow;

/// Enquiry listings show at most this many rows
pub const ENQUIRY_LIST_CAP: usize = 50;
/// Follow-up listings show at most this many rows
pub const FOLLOW_UP_LIST_CAP: usize = 100;
/// Dashboard follow-up widget size
pub const RECENT_FOLLOW_UP_CAP: usize = 5;

/// A store query plus the search that must run after the join
#[derive(Debug, Clone)]
pub struct Resolved<Q> {
    pub query: Q,
    pub search: Option<SearchTerm>,
}

fn parse_text_choice(raw: Option<&str>) -> Option<String> {
    match raw.map(str::trim) {
        None | Some("") | Some("all") | Some("All") => None,
        Some(value) => Some(value.to_string()),
    }
}

fn parse_payment_mode(raw: Option<&str>) -> Result<Option<PaymentMode>> {
    match raw.map(str::trim) {
        None | Some("") | Some("all") | Some("All") => Ok(None),
        Some(value) => PaymentMode::parse_loose(value)
            .map(Some)
            .map_err(|e| AppError::validation(format!("Invalid payment_mode filter: {}", e))),
    }
}

/// GET /members
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberListParams {
    pub status: Option<String>,
    pub search: Option<String>,
}

impl MemberListParams {
    /// Member search is pushed down to the store
    pub fn resolve(&self) -> Result<MemberQuery> {
        Ok(MemberQuery {
            status: parse_choice::<MemberStatus>(self.status.as_deref(), "status")?,
            search: SearchTerm::parse(self.search.as_deref())?,
            ..Default::default()
        })
    }
}

/// GET /payments
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentListParams {
    pub status: Option<String>,
    pub search: Option<String>,
    pub due_date: Option<String>,
    pub invoice_date: Option<String>,
}

impl PaymentListParams {
    pub fn resolve(&self, clock: &ReportClock) -> Result<Resolved<PaymentQuery>> {
        let due_date = DateBucket::parse(self.due_date.as_deref(), "due_date")?;
        let invoice_date = DateBucket::parse(self.invoice_date.as_deref(), "invoice_date")?;

        Ok(Resolved {
            query: PaymentQuery {
                status: parse_choice(self.status.as_deref(), "status")?,
                due_date: due_date.resolve(clock, DUE_DATE_MONTH),
                invoice_date: invoice_date.resolve(clock, INVOICE_DATE_MONTH),
                sort: PaymentSort::InvoiceDateDesc,
                ..Default::default()
            },
            search: SearchTerm::parse(self.search.as_deref())?,
        })
    }
}

/// GET /follow-ups
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FollowUpListParams {
    #[serde(rename = "type")]
    pub follow_up_type: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}

impl FollowUpListParams {
    /// The cap is applied by the caller after the post-join search
    pub fn resolve(&self) -> Result<Resolved<FollowUpQuery>> {
        let search = SearchTerm::parse(self.search.as_deref())?;
        Ok(Resolved {
            query: FollowUpQuery {
                follow_up_type: parse_choice(self.follow_up_type.as_deref(), "type")?,
                status: parse_choice(self.status.as_deref(), "status")?,
                sort: FollowUpSort::DueDateAsc,
                limit: search.is_none().then_some(FOLLOW_UP_LIST_CAP),
                ..Default::default()
            },
            search,
        })
    }
}

/// GET /enquiries
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnquiryListParams {
    pub status: Option<String>,
    pub lead_type: Option<String>,
    pub search: Option<String>,
    pub trial_booked: Option<String>,
    pub gender: Option<String>,
}

/// Enquiry store query plus the filters applied to the capped result
#[derive(Debug, Clone)]
pub struct EnquiryFilter {
    pub query: EnquiryQuery,
    pub trial_booked: Option<bool>,
    pub gender: Option<Gender>,
}

impl EnquiryListParams {
    pub fn resolve(&self) -> Result<EnquiryFilter> {
        Ok(EnquiryFilter {
            query: EnquiryQuery {
                status: parse_choice(self.status.as_deref(), "status")?,
                lead_type: parse_choice(self.lead_type.as_deref(), "lead_type")?,
                search: SearchTerm::parse(self.search.as_deref())?,
                limit: Some(ENQUIRY_LIST_CAP),
            },
            trial_booked: parse_flag(self.trial_booked.as_deref(), "trial_booked")?,
            gender: parse_choice(self.gender.as_deref(), "gender")?,
        })
    }
}

/// GET /employees
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeListParams {
    pub role: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}

impl EmployeeListParams {
    pub fn resolve(&self) -> Result<EmployeeQuery> {
        Ok(EmployeeQuery {
            role: parse_text_choice(self.role.as_deref()),
            status: parse_choice(self.status.as_deref(), "status")?,
            search: SearchTerm::parse(self.search.as_deref())?,
        })
    }
}

/// GET /personal-training
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonalTrainingListParams {
    pub member_id: Option<String>,
}

impl PersonalTrainingListParams {
    pub fn resolve(&self) -> Result<PersonalTrainingQuery> {
        let member_id: Option<Uuid> = self
            .member_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|raw| parse_id(raw, "member"))
            .transpose()?;

        Ok(PersonalTrainingQuery {
            member_id,
            ..Default::default()
        })
    }
}

/// GET /reports/balance-due
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BalanceDueParams {
    pub search: Option<String>,
    pub due: Option<String>,
}

/// Outstanding-payment query, member search and due-window narrowing
#[derive(Debug, Clone)]
pub struct BalanceDueFilter {
    pub query: PaymentQuery,
    pub search: Option<SearchTerm>,
    pub window: DueWindow,
}

impl BalanceDueParams {
    pub fn resolve(&self) -> Result<BalanceDueFilter> {
        Ok(BalanceDueFilter {
            query: PaymentQuery::outstanding(),
            search: SearchTerm::parse(self.search.as_deref())?,
            window: DueWindow::parse(self.due.as_deref())?,
        })
    }
}

/// GET /reports/sales
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SalesParams {
    pub date_range: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub payment_mode: Option<String>,
    pub search: Option<String>,
}

/// Sales window, search and the mode applied to the listed rows only
#[derive(Debug, Clone)]
pub struct SalesFilter {
    pub query: PaymentQuery,
    pub period: Option<DateRange>,
    pub payment_mode: Option<PaymentMode>,
    pub search: Option<SearchTerm>,
}

impl SalesParams {
    /// An explicit `start_date`/`end_date` window takes precedence over `date_range`
    pub fn resolve(&self, clock: &ReportClock) -> Result<SalesFilter> {
        let bucket = DateBucket::parse(self.date_range.as_deref(), "date_range")?;
        let explicit =
            parse_date_window(self.start_date.as_deref(), self.end_date.as_deref(), clock)?;
        let period = explicit.or_else(|| bucket.resolve(clock, INVOICE_DATE_MONTH));

        Ok(SalesFilter {
            query: PaymentQuery {
                invoice_date: period,
                sort: PaymentSort::InvoiceDateDesc,
                ..Default::default()
            },
            period,
            payment_mode: parse_payment_mode(self.payment_mode.as_deref())?,
            search: SearchTerm::parse(self.search.as_deref())?,
        })
    }
}

/// GET /reports/follow-ups/recent
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecentFollowUpParams {
    pub search: Option<String>,
}

impl RecentFollowUpParams {
    /// Pending follow-ups, soonest due first
    pub fn resolve(&self) -> Result<Resolved<FollowUpQuery>> {
        let search = SearchTerm::parse(self.search.as_deref())?;
        Ok(Resolved {
            query: FollowUpQuery {
                pending_only: true,
                sort: FollowUpSort::DueDateAsc,
                limit: search.is_none().then_some(RECENT_FOLLOW_UP_CAP),
                ..Default::default()
            },
            search,
        })
    }
}
