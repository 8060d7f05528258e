//! BDD test world for the review watcher

use std::sync::Arc;

use cucumber::World;
use review_watcher::cycle::CycleReport;
use review_watcher::dedup::ChangeFilter;
use review_watcher::supervisor::Supervisor;
use review_watcher::WatcherError;
use serde_json::Value;

use crate::steps::poll_steps::FakeServices;

#[derive(Debug, Default, World)]
pub struct WatcherWorld {
    // Validation testing
    pub response: Option<Value>,
    pub validation_result: Option<review_watcher::Result<(i64, usize)>>,

    // Translation testing
    pub homework: Option<Value>,
    pub translation_result: Option<review_watcher::Result<String>>,

    // Dedup testing
    pub filter: Option<ChangeFilter>,

    // Poll loop testing
    pub services: Option<Arc<FakeServices>>,
    pub supervisor: Option<Supervisor>,
    pub cycle_results: Vec<review_watcher::Result<CycleReport>>,
}

/// Variant name of an error, for matching against feature text
pub fn error_kind(err: &WatcherError) -> &'static str {
    match err {
        WatcherError::Config(_) => "Config",
        WatcherError::Connection(_) => "Connection",
        WatcherError::BadStatus { .. } => "BadStatus",
        WatcherError::MalformedResponse(_) => "MalformedResponse",
        WatcherError::MissingField(_) => "MissingField",
        WatcherError::WrongType { .. } => "WrongType",
        WatcherError::UnknownStatus(_) => "UnknownStatus",
        WatcherError::Delivery(_) => "Delivery",
        WatcherError::Io(_) => "Io",
        WatcherError::Json(_) => "Json",
    }
}
