mod follow_up_controller;

pub use follow_up_controller::configure;
