pub mod error;
pub mod parse;
pub mod timezone;
pub mod traits;

pub use error::{AppError, Result};
pub use timezone::ReportClock;
