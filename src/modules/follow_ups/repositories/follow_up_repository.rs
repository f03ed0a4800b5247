use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, MySql, MySqlPool, QueryBuilder};
use uuid::Uuid;

use crate::core::parse::{stored_id, stored_value};
use crate::core::traits::{RecordQuery, Repository};
use crate::core::{AppError, Result};
use crate::modules::follow_ups::models::{FollowUp, FollowUpStatus, FollowUpType};

pub type FollowUpRepository = dyn Repository<FollowUp, Query = FollowUpQuery>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FollowUpSort {
    /// Soonest due first
    #[default]
    DueDateAsc,
    /// Latest due first
    DueDateDesc,
}

/// Follow-up predicate
#[derive(Debug, Clone, Default)]
pub struct FollowUpQuery {
    pub member_id: Option<Uuid>,
    pub follow_up_type: Option<FollowUpType>,
    pub status: Option<FollowUpStatus>,
    /// Everything not yet `Done`
    pub pending_only: bool,
    pub sort: FollowUpSort,
    pub limit: Option<usize>,
}

impl FollowUpQuery {
    pub fn pending() -> Self {
        Self {
            pending_only: true,
            ..Default::default()
        }
    }
}

impl RecordQuery<FollowUp> for FollowUpQuery {
    fn matches(&self, follow_up: &FollowUp) -> bool {
        self.member_id.map_or(true, |id| follow_up.member_id == id)
            && self
                .follow_up_type
                .map_or(true, |t| follow_up.follow_up_type == t)
            && self.status.map_or(true, |s| follow_up.status == s)
            && (!self.pending_only || follow_up.status.is_pending())
    }

    fn order(&self, a: &FollowUp, b: &FollowUp) -> Ordering {
        match self.sort {
            FollowUpSort::DueDateAsc => a.due_date.cmp(&b.due_date),
            FollowUpSort::DueDateDesc => b.due_date.cmp(&a.due_date),
        }
    }

    fn limit(&self) -> Option<usize> {
        self.limit
    }
}

const FOLLOW_UP_COLUMNS: &str =
    "id, member_id, follow_up_type, due_date, status, comment, created_at, updated_at";

pub struct MySqlFollowUpRepository {
    pool: MySqlPool,
}

impl MySqlFollowUpRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn push_filters(builder: &mut QueryBuilder<'_, MySql>, query: &FollowUpQuery) {
        builder.push(" WHERE 1 = 1");

        if let Some(member_id) = query.member_id {
            builder
                .push(" AND member_id = ")
                .push_bind(member_id.to_string());
        }
        if let Some(follow_up_type) = query.follow_up_type {
            builder
                .push(" AND follow_up_type = ")
                .push_bind(follow_up_type.as_str());
        }
        if let Some(status) = query.status {
            builder.push(" AND status = ").push_bind(status.as_str());
        }
        if query.pending_only {
            builder
                .push(" AND status <> ")
                .push_bind(FollowUpStatus::Done.as_str());
        }
    }
}

#[async_trait]
impl Repository<FollowUp> for MySqlFollowUpRepository {
    type Query = FollowUpQuery;

    async fn create(&self, follow_up: &FollowUp) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO follow_ups (
                id, member_id, follow_up_type, due_date, status, comment, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(follow_up.id.to_string())
        .bind(follow_up.member_id.to_string())
        .bind(follow_up.follow_up_type.as_str())
        .bind(follow_up.due_date)
        .bind(follow_up.status.as_str())
        .bind(&follow_up.comment)
        .bind(follow_up.created_at)
        .bind(follow_up.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<FollowUp>> {
        let row = sqlx::query_as::<_, FollowUpRow>(&format!(
            "SELECT {} FROM follow_ups WHERE id = ?",
            FOLLOW_UP_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(FollowUp::try_from).transpose()
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<FollowUp>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let mut builder = QueryBuilder::<MySql>::new(format!(
            "SELECT {} FROM follow_ups WHERE id IN (",
            FOLLOW_UP_COLUMNS
        ));
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id.to_string());
        }
        separated.push_unseparated(")");

        let rows = builder
            .build_query_as::<FollowUpRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(FollowUp::try_from).collect()
    }

    async fn list(&self, query: &FollowUpQuery) -> Result<Vec<FollowUp>> {
        let mut builder =
            QueryBuilder::<MySql>::new(format!("SELECT {} FROM follow_ups", FOLLOW_UP_COLUMNS));
        Self::push_filters(&mut builder, query);
        builder.push(match query.sort {
            FollowUpSort::DueDateAsc => " ORDER BY due_date ASC",
            FollowUpSort::DueDateDesc => " ORDER BY due_date DESC",
        });
        if let Some(limit) = query.limit {
            builder.push(" LIMIT ").push_bind(limit as i64);
        }

        let rows = builder
            .build_query_as::<FollowUpRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(FollowUp::try_from).collect()
    }

    async fn count(&self, query: &FollowUpQuery) -> Result<i64> {
        let mut builder = QueryBuilder::<MySql>::new("SELECT COUNT(*) FROM follow_ups");
        Self::push_filters(&mut builder, query);

        Ok(builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update(&self, follow_up: &FollowUp) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE follow_ups
            SET follow_up_type = ?, due_date = ?, status = ?, comment = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(follow_up.follow_up_type.as_str())
        .bind(follow_up.due_date)
        .bind(follow_up.status.as_str())
        .bind(&follow_up.comment)
        .bind(follow_up.updated_at)
        .bind(follow_up.id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM follow_ups WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(Debug, FromRow)]
struct FollowUpRow {
    id: String,
    member_id: String,
    follow_up_type: String,
    due_date: DateTime<Utc>,
    status: String,
    comment: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<FollowUpRow> for FollowUp {
    type Error = AppError;

    fn try_from(row: FollowUpRow) -> Result<Self> {
        Ok(FollowUp {
            id: stored_id(&row.id, "follow_ups.id")?,
            member_id: stored_id(&row.member_id, "follow_ups.member_id")?,
            follow_up_type: stored_value(&row.follow_up_type, "follow_ups.follow_up_type")?,
            due_date: row.due_date,
            status: stored_value(&row.status, "follow_ups.status")?,
            comment: row.comment,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
