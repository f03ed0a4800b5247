use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::core::parse::sequence_code;
use crate::core::{AppError, Result};
use crate::modules::employees::models::{CreateEmployeeRequest, Employee, UpdateEmployeeRequest};
use crate::modules::employees::repositories::EmployeeQuery;
use crate::store::EntityStore;

/// Service for staff records
pub struct EmployeeService {
    store: EntityStore,
}

impl EmployeeService {
    pub fn new(store: EntityStore) -> Self {
        Self { store }
    }

    /// Create an active employee with the next staff code (EMP0001, ...)
    pub async fn create_employee(&self, request: CreateEmployeeRequest) -> Result<Employee> {
        let existing = self.store.employees.count(&EmployeeQuery::default()).await?;
        let employee = Employee::new(sequence_code("EMP", existing + 1, 4), request, Utc::now())?;

        self.store.employees.create(&employee).await?;

        info!(
            employee_id = %employee.id,
            code = %employee.employee_id,
            role = %employee.role,
            "Employee created"
        );
        Ok(employee)
    }

    pub async fn get_employee(&self, id: Uuid) -> Result<Employee> {
        self.store
            .employees
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Employee with id '{}' not found", id)))
    }

    pub async fn update_employee(
        &self,
        id: Uuid,
        update: UpdateEmployeeRequest,
    ) -> Result<Employee> {
        let mut employee = self.get_employee(id).await?;
        employee.apply(update, Utc::now())?;

        if !self.store.employees.update(&employee).await? {
            return Err(AppError::not_found(format!("Employee with id '{}' not found", id)));
        }

        info!(employee_id = %id, "Employee updated");
        Ok(employee)
    }

    pub async fn delete_employee(&self, id: Uuid) -> Result<()> {
        if !self.store.employees.delete(id).await? {
            return Err(AppError::not_found(format!("Employee with id '{}' not found", id)));
        }

        warn!(employee_id = %id, "Employee deleted");
        Ok(())
    }
}
