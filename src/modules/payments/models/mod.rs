mod payment;

pub use payment::{
    max_amount, CreatePaymentRequest, InvoiceAmounts, Payment, PaymentMode, PaymentStatus,
    UpdatePaymentRequest,
};
pub(crate) use payment::validate_amount;
