mod payment_repository;

pub use payment_repository::{
    MySqlPaymentRepository, PaymentQuery, PaymentRepository, PaymentSort,
};
