// Personal training module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{PersonalTraining, TrainingStatus};
pub use repositories::{MySqlPersonalTrainingRepository, PersonalTrainingQuery};
pub use services::PersonalTrainingService;
