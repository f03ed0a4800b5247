pub mod repository;

pub use repository::{Record, RecordQuery, Repository};
