mod enquiry_controller;

pub use enquiry_controller::configure;
