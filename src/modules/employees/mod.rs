// Employees module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Employee, EmployeeStatus};
pub use repositories::{EmployeeQuery, MySqlEmployeeRepository};
pub use services::EmployeeService;
