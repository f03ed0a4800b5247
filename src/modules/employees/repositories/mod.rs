mod employee_repository;

pub use employee_repository::{EmployeeQuery, EmployeeRepository, MySqlEmployeeRepository};
