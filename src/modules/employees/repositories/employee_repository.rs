use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, MySql, MySqlPool, QueryBuilder};
use uuid::Uuid;

use crate::core::parse::{stored_id, stored_value};
use crate::core::traits::{RecordQuery, Repository};
use crate::core::{AppError, Result};
use crate::modules::employees::models::{Employee, EmployeeStatus};
use crate::modules::reports::filters::SearchTerm;

pub type EmployeeRepository = dyn Repository<Employee, Query = EmployeeQuery>;

/// Employee predicate; newest first
#[derive(Debug, Clone, Default)]
pub struct EmployeeQuery {
    /// Exact role match
    pub role: Option<String>,
    pub status: Option<EmployeeStatus>,
    /// Name, phone or email
    pub search: Option<SearchTerm>,
}

impl RecordQuery<Employee> for EmployeeQuery {
    fn matches(&self, employee: &Employee) -> bool {
        self.role.as_deref().map_or(true, |r| employee.role == r)
            && self.status.map_or(true, |s| employee.status == s)
            && self.search.as_ref().map_or(true, |term| {
                term.matches_any([
                    Some(employee.name.as_str()),
                    Some(employee.phone.as_str()),
                    employee.email.as_deref(),
                ])
            })
    }

    fn order(&self, a: &Employee, b: &Employee) -> Ordering {
        b.created_at.cmp(&a.created_at)
    }
}

const EMPLOYEE_COLUMNS: &str = "id, employee_id, name, phone, email, role, joining_date, salary, \
     status, created_at, updated_at";

pub struct MySqlEmployeeRepository {
    pool: MySqlPool,
}

impl MySqlEmployeeRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn push_filters(builder: &mut QueryBuilder<'_, MySql>, query: &EmployeeQuery) {
        builder.push(" WHERE 1 = 1");

        if let Some(role) = &query.role {
            builder.push(" AND role = ").push_bind(role.clone());
        }
        if let Some(status) = query.status {
            builder.push(" AND status = ").push_bind(status.as_str());
        }
        if let Some(search) = &query.search {
            let pattern = search.like_pattern();
            builder
                .push(" AND (LOWER(name) LIKE ")
                .push_bind(pattern.clone())
                .push(" OR LOWER(phone) LIKE ")
                .push_bind(pattern.clone())
                .push(" OR LOWER(email) LIKE ")
                .push_bind(pattern)
                .push(")");
        }
    }
}

#[async_trait]
impl Repository<Employee> for MySqlEmployeeRepository {
    type Query = EmployeeQuery;

    async fn create(&self, employee: &Employee) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO employees (
                id, employee_id, name, phone, email, role, joining_date, salary,
                status, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(employee.id.to_string())
        .bind(&employee.employee_id)
        .bind(&employee.name)
        .bind(&employee.phone)
        .bind(&employee.email)
        .bind(&employee.role)
        .bind(employee.joining_date)
        .bind(employee.salary)
        .bind(employee.status.as_str())
        .bind(employee.created_at)
        .bind(employee.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, &format!("Employee '{}'", employee.employee_id)))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {} FROM employees WHERE id = ?",
            EMPLOYEE_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Employee::try_from).transpose()
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Employee>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let mut builder = QueryBuilder::<MySql>::new(format!(
            "SELECT {} FROM employees WHERE id IN (",
            EMPLOYEE_COLUMNS
        ));
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id.to_string());
        }
        separated.push_unseparated(")");

        let rows = builder
            .build_query_as::<EmployeeRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Employee::try_from).collect()
    }

    async fn list(&self, query: &EmployeeQuery) -> Result<Vec<Employee>> {
        let mut builder =
            QueryBuilder::<MySql>::new(format!("SELECT {} FROM employees", EMPLOYEE_COLUMNS));
        Self::push_filters(&mut builder, query);
        builder.push(" ORDER BY created_at DESC");

        let rows = builder
            .build_query_as::<EmployeeRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Employee::try_from).collect()
    }

    async fn count(&self, query: &EmployeeQuery) -> Result<i64> {
        let mut builder = QueryBuilder::<MySql>::new("SELECT COUNT(*) FROM employees");
        Self::push_filters(&mut builder, query);

        Ok(builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update(&self, employee: &Employee) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE employees
            SET name = ?, phone = ?, email = ?, role = ?, salary = ?, status = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&employee.name)
        .bind(&employee.phone)
        .bind(&employee.email)
        .bind(&employee.role)
        .bind(employee.salary)
        .bind(employee.status.as_str())
        .bind(employee.updated_at)
        .bind(employee.id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(Debug, FromRow)]
struct EmployeeRow {
    id: String,
    employee_id: String,
    name: String,
    phone: String,
    email: Option<String>,
    role: String,
    joining_date: DateTime<Utc>,
    salary: Option<Decimal>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = AppError;

    fn try_from(row: EmployeeRow) -> Result<Self> {
        Ok(Employee {
            id: stored_id(&row.id, "employees.id")?,
            employee_id: row.employee_id,
            name: row.name,
            phone: row.phone,
            email: row.email,
            role: row.role,
            joining_date: row.joining_date,
            salary: row.salary,
            status: stored_value(&row.status, "employees.status")?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
