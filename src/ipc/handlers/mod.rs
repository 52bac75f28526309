pub mod analytics;
pub mod batches;
pub mod core;
pub mod snapshot;
pub mod students;
pub mod teachers;
