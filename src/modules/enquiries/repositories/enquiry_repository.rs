use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, MySql, MySqlPool, QueryBuilder};
use uuid::Uuid;

use crate::core::parse::{stored_id, stored_value};
use crate::core::traits::{RecordQuery, Repository};
use crate::core::{AppError, Result};
use crate::modules::enquiries::models::{Enquiry, EnquiryStatus, LeadType};
use crate::modules::reports::filters::SearchTerm;

pub type EnquiryRepository = dyn Repository<Enquiry, Query = EnquiryQuery>;

/// Enquiry predicate; latest enquiry date first
#[derive(Debug, Clone, Default)]
pub struct EnquiryQuery {
    pub status: Option<EnquiryStatus>,
    pub lead_type: Option<LeadType>,
    /// Name, phone or enquiry number
    pub search: Option<SearchTerm>,
    pub limit: Option<usize>,
}

impl EnquiryQuery {
    pub fn with_status(status: EnquiryStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

impl RecordQuery<Enquiry> for EnquiryQuery {
    fn matches(&self, enquiry: &Enquiry) -> bool {
        self.status.map_or(true, |s| enquiry.status == s)
            && self.lead_type.map_or(true, |l| enquiry.lead_type == Some(l))
            && self.search.as_ref().map_or(true, |term| {
                term.matches_any([
                    Some(enquiry.name.as_str()),
                    Some(enquiry.phone.as_str()),
                    Some(enquiry.enquiry_no.as_str()),
                ])
            })
    }

    fn order(&self, a: &Enquiry, b: &Enquiry) -> Ordering {
        b.enquiry_date.cmp(&a.enquiry_date)
    }

    fn limit(&self) -> Option<usize> {
        self.limit
    }
}

const ENQUIRY_COLUMNS: &str = "id, enquiry_no, enquiry_date, name, phone, email, gender, \
     lead_type, trial_booked, status, referred_by, remark, created_at, updated_at";

pub struct MySqlEnquiryRepository {
    pool: MySqlPool,
}

impl MySqlEnquiryRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn push_filters(builder: &mut QueryBuilder<'_, MySql>, query: &EnquiryQuery) {
        builder.push(" WHERE 1 = 1");

        if let Some(status) = query.status {
            builder.push(" AND status = ").push_bind(status.as_str());
        }
        if let Some(lead_type) = query.lead_type {
            builder.push(" AND lead_type = ").push_bind(lead_type.as_str());
        }
        if let Some(search) = &query.search {
            let pattern = search.like_pattern();
            builder
                .push(" AND (LOWER(name) LIKE ")
                .push_bind(pattern.clone())
                .push(" OR LOWER(phone) LIKE ")
                .push_bind(pattern.clone())
                .push(" OR LOWER(enquiry_no) LIKE ")
                .push_bind(pattern)
                .push(")");
        }
    }
}

#[async_trait]
impl Repository<Enquiry> for MySqlEnquiryRepository {
    type Query = EnquiryQuery;

    async fn create(&self, enquiry: &Enquiry) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO enquiries (
                id, enquiry_no, enquiry_date, name, phone, email, gender, lead_type,
                trial_booked, status, referred_by, remark, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(enquiry.id.to_string())
        .bind(&enquiry.enquiry_no)
        .bind(enquiry.enquiry_date)
        .bind(&enquiry.name)
        .bind(&enquiry.phone)
        .bind(&enquiry.email)
        .bind(enquiry.gender.as_str())
        .bind(enquiry.lead_type.map(|l| l.as_str()))
        .bind(enquiry.trial_booked)
        .bind(enquiry.status.as_str())
        .bind(&enquiry.referred_by)
        .bind(&enquiry.remark)
        .bind(enquiry.created_at)
        .bind(enquiry.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, &format!("Enquiry '{}'", enquiry.enquiry_no)))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Enquiry>> {
        let row = sqlx::query_as::<_, EnquiryRow>(&format!(
            "SELECT {} FROM enquiries WHERE id = ?",
            ENQUIRY_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Enquiry::try_from).transpose()
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Enquiry>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let mut builder = QueryBuilder::<MySql>::new(format!(
            "SELECT {} FROM enquiries WHERE id IN (",
            ENQUIRY_COLUMNS
        ));
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id.to_string());
        }
        separated.push_unseparated(")");

        let rows = builder
            .build_query_as::<EnquiryRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Enquiry::try_from).collect()
    }

    async fn list(&self, query: &EnquiryQuery) -> Result<Vec<Enquiry>> {
        let mut builder =
            QueryBuilder::<MySql>::new(format!("SELECT {} FROM enquiries", ENQUIRY_COLUMNS));
        Self::push_filters(&mut builder, query);
        builder.push(" ORDER BY enquiry_date DESC");
        if let Some(limit) = query.limit {
            builder.push(" LIMIT ").push_bind(limit as i64);
        }

        let rows = builder
            .build_query_as::<EnquiryRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Enquiry::try_from).collect()
    }

    async fn count(&self, query: &EnquiryQuery) -> Result<i64> {
        let mut builder = QueryBuilder::<MySql>::new("SELECT COUNT(*) FROM enquiries");
        Self::push_filters(&mut builder, query);

        Ok(builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update(&self, enquiry: &Enquiry) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE enquiries
            SET name = ?, phone = ?, email = ?, gender = ?, lead_type = ?, trial_booked = ?,
                status = ?, referred_by = ?, remark = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&enquiry.name)
        .bind(&enquiry.phone)
        .bind(&enquiry.email)
        .bind(enquiry.gender.as_str())
        .bind(enquiry.lead_type.map(|l| l.as_str()))
        .bind(enquiry.trial_booked)
        .bind(enquiry.status.as_str())
        .bind(&enquiry.referred_by)
        .bind(&enquiry.remark)
        .bind(enquiry.updated_at)
        .bind(enquiry.id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM enquiries WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(Debug, FromRow)]
struct EnquiryRow {
    id: String,
    enquiry_no: String,
    enquiry_date: DateTime<Utc>,
    name: String,
    phone: String,
    email: Option<String>,
    gender: String,
    lead_type: Option<String>,
    trial_booked: bool,
    status: String,
    referred_by: Option<String>,
    remark: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<EnquiryRow> for Enquiry {
    type Error = AppError;

    fn try_from(row: EnquiryRow) -> Result<Self> {
        Ok(Enquiry {
            id: stored_id(&row.id, "enquiries.id")?,
            enquiry_no: row.enquiry_no,
            enquiry_date: row.enquiry_date,
            name: row.name,
            phone: row.phone,
            email: row.email,
            gender: stored_value(&row.gender, "enquiries.gender")?,
            lead_type: row
                .lead_type
                .as_deref()
                .map(|l| stored_value(l, "enquiries.lead_type"))
                .transpose()?,
            trial_booked: row.trial_booked,
            status: stored_value(&row.status, "enquiries.status")?,
            referred_by: row.referred_by,
            remark: row.remark,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
