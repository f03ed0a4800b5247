// Enquiries module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Enquiry, EnquiryStats, EnquiryStatus, LeadType};
pub use repositories::{EnquiryQuery, MySqlEnquiryRepository};
pub use services::EnquiryService;
