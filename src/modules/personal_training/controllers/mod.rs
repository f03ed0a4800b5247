mod personal_training_controller;

pub use personal_training_controller::configure;
