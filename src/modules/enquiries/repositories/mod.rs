mod enquiry_repository;

pub use enquiry_repository::{EnquiryQuery, EnquiryRepository, MySqlEnquiryRepository};
