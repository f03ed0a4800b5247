use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, MySql, MySqlPool, QueryBuilder};
use uuid::Uuid;

use crate::core::parse::{stored_id, stored_value};
use crate::core::traits::{RecordQuery, Repository};
use crate::core::{AppError, Result};
use crate::modules::personal_training::models::{PersonalTraining, TrainingStatus};

pub type PersonalTrainingRepository =
    dyn Repository<PersonalTraining, Query = PersonalTrainingQuery>;

/// Personal-training predicate; newest first
#[derive(Debug, Clone, Default)]
pub struct PersonalTrainingQuery {
    pub member_id: Option<Uuid>,
    pub status: Option<TrainingStatus>,
}

impl PersonalTrainingQuery {
    pub fn for_member(member_id: Uuid) -> Self {
        Self {
            member_id: Some(member_id),
            ..Default::default()
        }
    }
}

impl RecordQuery<PersonalTraining> for PersonalTrainingQuery {
    fn matches(&self, pt: &PersonalTraining) -> bool {
        self.member_id.map_or(true, |id| pt.member_id == id)
            && self.status.map_or(true, |s| pt.status == s)
    }

    fn order(&self, a: &PersonalTraining, b: &PersonalTraining) -> Ordering {
        b.created_at.cmp(&a.created_at)
    }
}

const PT_COLUMNS: &str = "id, member_id, package_name, duration_months, sessions, price, \
     start_date, end_date, status, created_at, updated_at";

pub struct MySqlPersonalTrainingRepository {
    pool: MySqlPool,
}

impl MySqlPersonalTrainingRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn push_filters(builder: &mut QueryBuilder<'_, MySql>, query: &PersonalTrainingQuery) {
        builder.push(" WHERE 1 = 1");

        if let Some(member_id) = query.member_id {
            builder
                .push(" AND member_id = ")
                .push_bind(member_id.to_string());
        }
        if let Some(status) = query.status {
            builder.push(" AND status = ").push_bind(status.as_str());
        }
    }
}

#[async_trait]
impl Repository<PersonalTraining> for MySqlPersonalTrainingRepository {
    type Query = PersonalTrainingQuery;

    async fn create(&self, pt: &PersonalTraining) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO personal_training (
                id, member_id, package_name, duration_months, sessions, price,
                start_date, end_date, status, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(pt.id.to_string())
        .bind(pt.member_id.to_string())
        .bind(&pt.package_name)
        .bind(pt.duration_months)
        .bind(pt.sessions)
        .bind(pt.price)
        .bind(pt.start_date)
        .bind(pt.end_date)
        .bind(pt.status.as_str())
        .bind(pt.created_at)
        .bind(pt.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PersonalTraining>> {
        let row = sqlx::query_as::<_, PersonalTrainingRow>(&format!(
            "SELECT {} FROM personal_training WHERE id = ?",
            PT_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(PersonalTraining::try_from).transpose()
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<PersonalTraining>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let mut builder = QueryBuilder::<MySql>::new(format!(
            "SELECT {} FROM personal_training WHERE id IN (",
            PT_COLUMNS
        ));
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id.to_string());
        }
        separated.push_unseparated(")");

        let rows = builder
            .build_query_as::<PersonalTrainingRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(PersonalTraining::try_from).collect()
    }

    async fn list(&self, query: &PersonalTrainingQuery) -> Result<Vec<PersonalTraining>> {
        let mut builder =
            QueryBuilder::<MySql>::new(format!("SELECT {} FROM personal_training", PT_COLUMNS));
        Self::push_filters(&mut builder, query);
        builder.push(" ORDER BY created_at DESC");

        let rows = builder
            .build_query_as::<PersonalTrainingRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(PersonalTraining::try_from).collect()
    }

    async fn count(&self, query: &PersonalTrainingQuery) -> Result<i64> {
        let mut builder = QueryBuilder::<MySql>::new("SELECT COUNT(*) FROM personal_training");
        Self::push_filters(&mut builder, query);

        Ok(builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update(&self, pt: &PersonalTraining) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE personal_training
            SET package_name = ?, sessions = ?, status = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&pt.package_name)
        .bind(pt.sessions)
        .bind(pt.status.as_str())
        .bind(pt.updated_at)
        .bind(pt.id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM personal_training WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(Debug, FromRow)]
struct PersonalTrainingRow {
    id: String,
    member_id: String,
    package_name: String,
    duration_months: i32,
    sessions: i32,
    price: Decimal,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PersonalTrainingRow> for PersonalTraining {
    type Error = AppError;

    fn try_from(row: PersonalTrainingRow) -> Result<Self> {
        Ok(PersonalTraining {
            id: stored_id(&row.id, "personal_training.id")?,
            member_id: stored_id(&row.member_id, "personal_training.member_id")?,
            package_name: row.package_name,
            duration_months: row.duration_months,
            sessions: row.sessions,
            price: row.price,
            start_date: row.start_date,
            end_date: row.end_date,
            status: stored_value(&row.status, "personal_training.status")?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
