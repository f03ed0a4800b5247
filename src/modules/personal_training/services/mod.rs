pub mod personal_training_service;

pub use personal_training_service::PersonalTrainingService;
