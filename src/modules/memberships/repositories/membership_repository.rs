use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, MySql, MySqlPool, QueryBuilder};
use uuid::Uuid;

use crate::core::parse::{stored_id, stored_value};
use crate::core::traits::{RecordQuery, Repository};
use crate::core::{AppError, Result};
use crate::modules::memberships::models::Membership;

/// Store handle for membership packages
pub type MembershipRepository = dyn Repository<Membership, Query = MembershipQuery>;

/// Membership predicate; shortest package first
#[derive(Debug, Clone, Default)]
pub struct MembershipQuery {
    pub active_only: bool,
}

impl MembershipQuery {
    pub fn active() -> Self {
        Self { active_only: true }
    }
}

impl RecordQuery<Membership> for MembershipQuery {
    fn matches(&self, membership: &Membership) -> bool {
        !self.active_only || membership.is_active
    }

    fn order(&self, a: &Membership, b: &Membership) -> Ordering {
        a.duration_months.cmp(&b.duration_months)
    }
}

const MEMBERSHIP_COLUMNS: &str =
    "id, package_name, duration_months, sessions, price, membership_type, is_active, created_at, updated_at";

pub struct MySqlMembershipRepository {
    pool: MySqlPool,
}

impl MySqlMembershipRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Membership> for MySqlMembershipRepository {
    type Query = MembershipQuery;

    async fn create(&self, membership: &Membership) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO memberships (
                id, package_name, duration_months, sessions, price, membership_type,
                is_active, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(membership.id.to_string())
        .bind(&membership.package_name)
        .bind(membership.duration_months)
        .bind(membership.sessions)
        .bind(membership.price)
        .bind(membership.membership_type.as_str())
        .bind(membership.is_active)
        .bind(membership.created_at)
        .bind(membership.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, &format!("Membership '{}'", membership.package_name)))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Membership>> {
        let row = sqlx::query_as::<_, MembershipRow>(&format!(
            "SELECT {} FROM memberships WHERE id = ?",
            MEMBERSHIP_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Membership::try_from).transpose()
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Membership>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let mut builder = QueryBuilder::<MySql>::new(format!(
            "SELECT {} FROM memberships WHERE id IN (",
            MEMBERSHIP_COLUMNS
        ));
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id.to_string());
        }
        separated.push_unseparated(")");

        let rows = builder
            .build_query_as::<MembershipRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Membership::try_from).collect()
    }

    async fn list(&self, query: &MembershipQuery) -> Result<Vec<Membership>> {
        let mut builder = QueryBuilder::<MySql>::new(format!(
            "SELECT {} FROM memberships",
            MEMBERSHIP_COLUMNS
        ));
        if query.active_only {
            builder.push(" WHERE is_active = TRUE");
        }
        builder.push(" ORDER BY duration_months ASC");

        let rows = builder
            .build_query_as::<MembershipRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Membership::try_from).collect()
    }

    async fn count(&self, query: &MembershipQuery) -> Result<i64> {
        let mut builder = QueryBuilder::<MySql>::new("SELECT COUNT(*) FROM memberships");
        if query.active_only {
            builder.push(" WHERE is_active = TRUE");
        }

        Ok(builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update(&self, membership: &Membership) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE memberships
            SET package_name = ?, duration_months = ?, sessions = ?, price = ?,
                membership_type = ?, is_active = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&membership.package_name)
        .bind(membership.duration_months)
        .bind(membership.sessions)
        .bind(membership.price)
        .bind(membership.membership_type.as_str())
        .bind(membership.is_active)
        .bind(membership.updated_at)
        .bind(membership.id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM memberships WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(Debug, FromRow)]
struct MembershipRow {
    id: String,
    package_name: String,
    duration_months: i32,
    sessions: i32,
    price: Decimal,
    membership_type: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<MembershipRow> for Membership {
    type Error = AppError;

    fn try_from(row: MembershipRow) -> Result<Self> {
        Ok(Membership {
            id: stored_id(&row.id, "memberships.id")?,
            package_name: row.package_name,
            duration_months: row.duration_months,
            sessions: row.sessions,
            price: row.price,
            membership_type: stored_value(&row.membership_type, "memberships.membership_type")?,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
