//! BDD step definitions for the review watcher

pub mod dedup_steps;
pub mod status_steps;
pub mod validation_steps;
