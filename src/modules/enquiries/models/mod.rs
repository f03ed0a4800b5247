mod enquiry;

pub use enquiry::{CreateEnquiryRequest, Enquiry, EnquiryStats, EnquiryStatus, LeadType};
