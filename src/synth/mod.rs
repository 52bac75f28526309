pub mod assignments;
pub mod attendance;
pub mod batches;
pub mod catalog;
pub mod config;
pub mod dataset;
pub mod error;
pub mod exams;
pub mod model;
pub mod payments;
pub mod rng;
pub mod rollups;
pub mod roster;
pub mod student;
pub mod teachers;

pub use config::{parse_dataset_config, DatasetConfig};
pub use dataset::{generate_dataset, Dataset};
pub use error::SynthError;
pub use rng::SeededRandom;
