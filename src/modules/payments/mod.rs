// Payments module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Payment, PaymentMode, PaymentStatus};
pub use repositories::{MySqlPaymentRepository, PaymentQuery, PaymentRepository, PaymentSort};
pub use services::PaymentService;
