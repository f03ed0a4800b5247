mod employee;

pub use employee::{CreateEmployeeRequest, Employee, EmployeeStatus, UpdateEmployeeRequest};
