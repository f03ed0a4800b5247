// PaymentRepository
// Payment persistence, the typed query the Filter Resolver emits, and the
// SUM-based totals every money report reconciles against.

use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, MySql, MySqlPool, QueryBuilder};
use uuid::Uuid;

use crate::core::parse::{stored_id, stored_value};
use crate::core::traits::{RecordQuery, Repository};
use crate::core::{AppError, Result};
use crate::modules::payments::models::{Payment, PaymentMode, PaymentStatus};
use crate::modules::reports::engine::PaymentTotals;
use crate::modules::reports::filters::DateRange;

/// Row order for payment listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentSort {
    /// Newest invoice first
    #[default]
    InvoiceDateDesc,
    /// Earliest due date first; payments without a due date last
    DueDateAsc,
}

/// Payment predicate
#[derive(Debug, Clone, Default)]
pub struct PaymentQuery {
    pub member_id: Option<Uuid>,
    pub status: Option<PaymentStatus>,
    pub payment_mode: Option<PaymentMode>,
    pub due_date: Option<DateRange>,
    pub invoice_date: Option<DateRange>,
    pub created: Option<DateRange>,
    /// Only payments with `balance > 0`
    pub outstanding_only: bool,
    pub sort: PaymentSort,
    pub limit: Option<usize>,
}

impl PaymentQuery {
    pub fn for_member(member_id: Uuid) -> Self {
        Self {
            member_id: Some(member_id),
            ..Default::default()
        }
    }

    pub fn outstanding() -> Self {
        Self {
            outstanding_only: true,
            sort: PaymentSort::DueDateAsc,
            ..Default::default()
        }
    }
}

impl RecordQuery<Payment> for PaymentQuery {
    fn matches(&self, payment: &Payment) -> bool {
        self.member_id.map_or(true, |id| payment.member_id == id)
            && self.status.map_or(true, |s| payment.status == s)
            && self.payment_mode.map_or(true, |m| payment.payment_mode == m)
            && self.due_date.map_or(true, |r| r.contains_opt(payment.due_date))
            && self.invoice_date.map_or(true, |r| r.contains(payment.invoice_date))
            && self.created.map_or(true, |r| r.contains(payment.created_at))
            && (!self.outstanding_only || payment.has_balance())
    }

    fn order(&self, a: &Payment, b: &Payment) -> Ordering {
        match self.sort {
            PaymentSort::InvoiceDateDesc => b
                .invoice_date
                .cmp(&a.invoice_date)
                .then_with(|| b.invoice_number.cmp(&a.invoice_number)),
            PaymentSort::DueDateAsc => match (a.due_date, b.due_date) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
            .then_with(|| b.invoice_date.cmp(&a.invoice_date)),
        }
    }

    fn limit(&self) -> Option<usize> {
        self.limit
    }
}

/// Payment store: CRUD plus aggregate totals
#[async_trait]
pub trait PaymentRepository: Repository<Payment, Query = PaymentQuery> {
    /// Count and sums over every payment matching `query` (limit is ignored)
    async fn totals(&self, query: &PaymentQuery) -> Result<PaymentTotals>;
}

const PAYMENT_COLUMNS: &str = "id, member_id, membership_id, invoice_number, invoice_date, \
     due_date, plan_total, discount, total, paid, balance, payment_mode, status, \
     created_at, updated_at";

/// MySQL-backed payment repository
pub struct MySqlPaymentRepository {
    pool: MySqlPool,
}

impl MySqlPaymentRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn push_filters(builder: &mut QueryBuilder<'_, MySql>, query: &PaymentQuery) {
        builder.push(" WHERE 1 = 1");

        if let Some(member_id) = query.member_id {
            builder
                .push(" AND member_id = ")
                .push_bind(member_id.to_string());
        }
        if let Some(status) = query.status {
            builder.push(" AND status = ").push_bind(status.as_str());
        }
        if let Some(mode) = query.payment_mode {
            builder.push(" AND payment_mode = ").push_bind(mode.as_str());
        }
        if let Some(range) = query.due_date {
            builder
                .push(" AND due_date >= ")
                .push_bind(range.start)
                .push(" AND due_date <= ")
                .push_bind(range.end);
        }
        if let Some(range) = query.invoice_date {
            builder
                .push(" AND invoice_date >= ")
                .push_bind(range.start)
                .push(" AND invoice_date <= ")
                .push_bind(range.end);
        }
        if let Some(range) = query.created {
            builder
                .push(" AND created_at >= ")
                .push_bind(range.start)
                .push(" AND created_at <= ")
                .push_bind(range.end);
        }
        if query.outstanding_only {
            builder.push(" AND balance > 0");
        }
    }

    fn push_order(builder: &mut QueryBuilder<'_, MySql>, sort: PaymentSort) {
        match sort {
            PaymentSort::InvoiceDateDesc => {
                builder.push(" ORDER BY invoice_date DESC, invoice_number DESC");
            }
            PaymentSort::DueDateAsc => {
                builder.push(" ORDER BY due_date IS NULL, due_date ASC, invoice_date DESC");
            }
        }
    }
}

#[async_trait]
impl Repository<Payment> for MySqlPaymentRepository {
    type Query = PaymentQuery;

    async fn create(&self, payment: &Payment) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO payments (
                id, member_id, membership_id, invoice_number, invoice_date, due_date,
                plan_total, discount, total, paid, balance, payment_mode, status,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(payment.id.to_string())
        .bind(payment.member_id.to_string())
        .bind(payment.membership_id.map(|id| id.to_string()))
        .bind(&payment.invoice_number)
        .bind(payment.invoice_date)
        .bind(payment.due_date)
        .bind(payment.plan_total)
        .bind(payment.discount)
        .bind(payment.total)
        .bind(payment.paid)
        .bind(payment.balance)
        .bind(payment.payment_mode.as_str())
        .bind(payment.status.as_str())
        .bind(payment.created_at)
        .bind(payment.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, &format!("Invoice '{}'", payment.invoice_number)))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>> {
        let row = sqlx::query_as::<_, PaymentRow>(&format!(
            "SELECT {} FROM payments WHERE id = ?",
            PAYMENT_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Payment::try_from).transpose()
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Payment>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let mut builder = QueryBuilder::<MySql>::new(format!(
            "SELECT {} FROM payments WHERE id IN (",
            PAYMENT_COLUMNS
        ));
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id.to_string());
        }
        separated.push_unseparated(")");

        let rows = builder
            .build_query_as::<PaymentRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Payment::try_from).collect()
    }

    async fn list(&self, query: &PaymentQuery) -> Result<Vec<Payment>> {
        let mut builder =
            QueryBuilder::<MySql>::new(format!("SELECT {} FROM payments", PAYMENT_COLUMNS));
        Self::push_filters(&mut builder, query);
        Self::push_order(&mut builder, query.sort);
        if let Some(limit) = query.limit {
            builder.push(" LIMIT ").push_bind(limit as i64);
        }

        let rows = builder
            .build_query_as::<PaymentRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Payment::try_from).collect()
    }

    async fn count(&self, query: &PaymentQuery) -> Result<i64> {
        let mut builder = QueryBuilder::<MySql>::new("SELECT COUNT(*) FROM payments");
        Self::push_filters(&mut builder, query);

        Ok(builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update(&self, payment: &Payment) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE payments
            SET due_date = ?, paid = ?, balance = ?, payment_mode = ?, status = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(payment.due_date)
        .bind(payment.paid)
        .bind(payment.balance)
        .bind(payment.payment_mode.as_str())
        .bind(payment.status.as_str())
        .bind(payment.updated_at)
        .bind(payment.id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM payments WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl PaymentRepository for MySqlPaymentRepository {
    async fn totals(&self, query: &PaymentQuery) -> Result<PaymentTotals> {
        let mut builder = QueryBuilder::<MySql>::new(
            r#"
            SELECT
                COUNT(*) AS count,
                COALESCE(SUM(total), 0) AS total,
                COALESCE(SUM(paid), 0) AS paid,
                COALESCE(SUM(balance), 0) AS balance,
                COALESCE(SUM(CASE WHEN balance > 0 THEN balance ELSE 0 END), 0) AS outstanding
            FROM payments
            "#,
        );
        Self::push_filters(&mut builder, query);

        let row = builder
            .build_query_as::<TotalsRow>()
            .fetch_one(&self.pool)
            .await?;

        Ok(PaymentTotals {
            count: row.count,
            total: row.total,
            paid: row.paid,
            balance: row.balance,
            outstanding: row.outstanding,
        })
    }
}

// Helper structs for database mapping

#[derive(Debug, FromRow)]
struct TotalsRow {
    count: i64,
    total: Decimal,
    paid: Decimal,
    balance: Decimal,
    outstanding: Decimal,
}

#[derive(Debug, FromRow)]
struct PaymentRow {
    id: String,
    member_id: String,
    membership_id: Option<String>,
    invoice_number: String,
    invoice_date: DateTime<Utc>,
    due_date: Option<DateTime<Utc>>,
    plan_total: Decimal,
    discount: Decimal,
    total: Decimal,
    paid: Decimal,
    balance: Decimal,
    payment_mode: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = AppError;

    fn try_from(row: PaymentRow) -> Result<Self> {
        Ok(Payment {
            id: stored_id(&row.id, "payments.id")?,
            member_id: stored_id(&row.member_id, "payments.member_id")?,
            membership_id: row
                .membership_id
                .as_deref()
                .map(|id| stored_id(id, "payments.membership_id"))
                .transpose()?,
            invoice_number: row.invoice_number,
            invoice_date: row.invoice_date,
            due_date: row.due_date,
            plan_total: row.plan_total,
            discount: row.discount,
            total: row.total,
            paid: row.paid,
            balance: row.balance,
            payment_mode: stored_value(&row.payment_mode, "payments.payment_mode")?,
            status: stored_value(&row.status, "payments.status")?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
