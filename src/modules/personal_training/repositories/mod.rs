mod personal_training_repository;

pub use personal_training_repository::{
    MySqlPersonalTrainingRepository, PersonalTrainingQuery, PersonalTrainingRepository,
};
