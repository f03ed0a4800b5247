mod personal_training;

pub use personal_training::{
    CreatePersonalTrainingRequest, PersonalTraining, PersonalTrainingEnrollment, TrainingStatus,
};
