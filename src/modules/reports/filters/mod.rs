// Filter Resolver: raw query-string criteria into typed store queries and
// post-join predicates. Everything here runs before the store is touched.

pub mod criteria;
pub mod resolver;
pub mod search;

pub use criteria::{
    parse_choice, parse_date_window, parse_flag, DateBucket, DateRange, MonthConvention,
    DUE_DATE_MONTH, INVOICE_DATE_MONTH,
};
pub use resolver::*;
pub use search::SearchTerm;
