pub mod listing_service;
pub mod report_service;

pub use listing_service::ListingService;
pub use report_service::ReportService;
