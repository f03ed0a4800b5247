// MemberRepository
// MySQL persistence for members plus the typed query the Filter Resolver emits.

use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, MySql, MySqlPool, QueryBuilder};
use uuid::Uuid;

use crate::core::parse::{stored_id, stored_value};
use crate::core::traits::{RecordQuery, Repository};
use crate::core::{AppError, Result};
use crate::modules::members::models::{Member, MemberStatus};
use crate::modules::reports::filters::{DateRange, SearchTerm};

/// Store handle for members
pub type MemberRepository = dyn Repository<Member, Query = MemberQuery>;

/// Member predicate; newest first
#[derive(Debug, Clone, Default)]
pub struct MemberQuery {
    pub status: Option<MemberStatus>,
    /// Name, phone or client id
    pub search: Option<SearchTerm>,
    pub membership_id: Option<Uuid>,
    pub expiry: Option<DateRange>,
    pub created: Option<DateRange>,
    pub limit: Option<usize>,
}

impl MemberQuery {
    pub fn with_status(status: MemberStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

impl RecordQuery<Member> for MemberQuery {
    fn matches(&self, member: &Member) -> bool {
        self.status.map_or(true, |s| member.status == s)
            && self.membership_id.map_or(true, |id| member.membership_id == Some(id))
            && self.expiry.map_or(true, |r| r.contains_opt(member.expiry_date))
            && self.created.map_or(true, |r| r.contains(member.created_at))
            && self.search.as_ref().map_or(true, |term| {
                term.matches_any([
                    Some(member.name.as_str()),
                    Some(member.phone.as_str()),
                    Some(member.client_id.as_str()),
                ])
            })
    }

    fn order(&self, a: &Member, b: &Member) -> Ordering {
        b.created_at.cmp(&a.created_at)
    }

    fn limit(&self) -> Option<usize> {
        self.limit
    }
}

const MEMBER_COLUMNS: &str = "id, client_id, name, phone, email, gender, status, membership_id, \
     joining_date, expiry_date, address, created_at, updated_at";

/// MySQL-backed member repository
pub struct MySqlMemberRepository {
    pool: MySqlPool,
}

impl MySqlMemberRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn push_filters(builder: &mut QueryBuilder<'_, MySql>, query: &MemberQuery) {
        builder.push(" WHERE 1 = 1");

        if let Some(status) = query.status {
            builder.push(" AND status = ").push_bind(status.as_str());
        }
        if let Some(membership_id) = query.membership_id {
            builder
                .push(" AND membership_id = ")
                .push_bind(membership_id.to_string());
        }
        if let Some(expiry) = query.expiry {
            builder
                .push(" AND expiry_date >= ")
                .push_bind(expiry.start)
                .push(" AND expiry_date <= ")
                .push_bind(expiry.end);
        }
        if let Some(created) = query.created {
            builder
                .push(" AND created_at >= ")
                .push_bind(created.start)
                .push(" AND created_at <= ")
                .push_bind(created.end);
        }
        if let Some(search) = &query.search {
            let pattern = search.like_pattern();
            builder
                .push(" AND (LOWER(name) LIKE ")
                .push_bind(pattern.clone())
                .push(" OR LOWER(phone) LIKE ")
                .push_bind(pattern.clone())
                .push(" OR LOWER(client_id) LIKE ")
                .push_bind(pattern)
                .push(")");
        }
    }
}

#[async_trait]
impl Repository<Member> for MySqlMemberRepository {
    type Query = MemberQuery;

    async fn create(&self, member: &Member) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO members (
                id, client_id, name, phone, email, gender, status, membership_id,
                joining_date, expiry_date, address, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(member.id.to_string())
        .bind(&member.client_id)
        .bind(&member.name)
        .bind(&member.phone)
        .bind(&member.email)
        .bind(member.gender.as_str())
        .bind(member.status.as_str())
        .bind(member.membership_id.map(|id| id.to_string()))
        .bind(member.joining_date)
        .bind(member.expiry_date)
        .bind(&member.address)
        .bind(member.created_at)
        .bind(member.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, &format!("Member '{}'", member.client_id)))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Member>> {
        let row = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {} FROM members WHERE id = ?",
            MEMBER_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Member::try_from).transpose()
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Member>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let mut builder = QueryBuilder::<MySql>::new(format!(
            "SELECT {} FROM members WHERE id IN (",
            MEMBER_COLUMNS
        ));
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id.to_string());
        }
        separated.push_unseparated(")");

        let rows = builder
            .build_query_as::<MemberRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Member::try_from).collect()
    }

    async fn list(&self, query: &MemberQuery) -> Result<Vec<Member>> {
        let mut builder =
            QueryBuilder::<MySql>::new(format!("SELECT {} FROM members", MEMBER_COLUMNS));
        Self::push_filters(&mut builder, query);
        builder.push(" ORDER BY created_at DESC");
        if let Some(limit) = query.limit {
            builder.push(" LIMIT ").push_bind(limit as i64);
        }

        let rows = builder
            .build_query_as::<MemberRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Member::try_from).collect()
    }

    async fn count(&self, query: &MemberQuery) -> Result<i64> {
        let mut builder = QueryBuilder::<MySql>::new("SELECT COUNT(*) FROM members");
        Self::push_filters(&mut builder, query);

        let count = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn update(&self, member: &Member) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE members
            SET name = ?, phone = ?, email = ?, gender = ?, status = ?, membership_id = ?,
                expiry_date = ?, address = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&member.name)
        .bind(&member.phone)
        .bind(&member.email)
        .bind(member.gender.as_str())
        .bind(member.status.as_str())
        .bind(member.membership_id.map(|id| id.to_string()))
        .bind(member.expiry_date)
        .bind(&member.address)
        .bind(member.updated_at)
        .bind(member.id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM members WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// Helper struct for database mapping

#[derive(Debug, FromRow)]
struct MemberRow {
    id: String,
    client_id: String,
    name: String,
    phone: String,
    email: Option<String>,
    gender: String,
    status: String,
    membership_id: Option<String>,
    joining_date: DateTime<Utc>,
    expiry_date: Option<DateTime<Utc>>,
    address: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<MemberRow> for Member {
    type Error = AppError;

    fn try_from(row: MemberRow) -> Result<Self> {
        Ok(Member {
            id: stored_id(&row.id, "members.id")?,
            client_id: row.client_id,
            name: row.name,
            phone: row.phone,
            email: row.email,
            gender: stored_value(&row.gender, "members.gender")?,
            status: stored_value(&row.status, "members.status")?,
            membership_id: row
                .membership_id
                .as_deref()
                .map(|id| stored_id(id, "members.membership_id"))
                .transpose()?,
            joining_date: row.joining_date,
            expiry_date: row.expiry_date,
            address: row.address,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
