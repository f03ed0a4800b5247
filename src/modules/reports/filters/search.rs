use crate::core::{AppError, Result};
use crate::modules::reports::engine::{FollowUpWithMember, PaymentWithRefs};

const MAX_SEARCH_LEN: usize = 100;

/// Case-insensitive substring search over an enumerated field set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    raw: String,
    lowered: String,
}

impl SearchTerm {
    /// Blank input disables the search
    pub fn parse(raw: Option<&str>) -> Result<Option<Self>> {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(None);
        };

        if raw.chars().count() > MAX_SEARCH_LEN {
            return Err(AppError::validation(format!(
                "Search text too long (maximum {} characters)",
                MAX_SEARCH_LEN
            )));
        }

        Ok(Some(Self {
            raw: raw.to_string(),
            lowered: raw.to_lowercase(),
        }))
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn matches(&self, value: &str) -> bool {
        value.to_lowercase().contains(&self.lowered)
    }

    /// True when any present field contains the term
    pub fn matches_any<'a, I>(&self, values: I) -> bool
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        values.into_iter().flatten().any(|v| self.matches(v))
    }

    /// `%term%` for `LOWER(column) LIKE ?`, with LIKE wildcards escaped
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.lowered.len() + 2);
        pattern.push('%');
        for c in self.lowered.chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }

    /// Member name, phone, client id or invoice number
    pub fn matches_payment(&self, record: &PaymentWithRefs) -> bool {
        let member = record.member.as_ref();
        self.matches_any([
            member.map(|m| m.name.as_str()),
            member.map(|m| m.phone.as_str()),
            member.map(|m| m.client_id.as_str()),
            Some(record.payment.invoice_number.as_str()),
        ])
    }

    /// Member name, phone or client id only
    pub fn matches_payment_member(&self, record: &PaymentWithRefs) -> bool {
        let member = record.member.as_ref();
        self.matches_any([
            member.map(|m| m.name.as_str()),
            member.map(|m| m.phone.as_str()),
            member.map(|m| m.client_id.as_str()),
        ])
    }

    /// Member name, member phone or the follow-up comment
    pub fn matches_follow_up(&self, record: &FollowUpWithMember) -> bool {
        let member = record.member.as_ref();
        self.matches_any([
            member.map(|m| m.name.as_str()),
            member.map(|m| m.phone.as_str()),
            Some(record.follow_up.comment.as_str()),
        ])
    }
}
