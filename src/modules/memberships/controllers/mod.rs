mod membership_controller;

pub use membership_controller::configure;
