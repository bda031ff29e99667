use crate::utils::error::LoaderError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

/// Result of a single load invocation. Failures are reported here, never raised.
#[derive(Debug)]
pub enum LoadOutcome {
    Refreshed { bytes: usize },
    Failed(LoaderError),
}

impl LoadOutcome {
    pub fn is_refreshed(&self) -> bool {
        matches!(self, Self::Refreshed { .. })
    }
}

/// Fixed-delay schedule: the next run starts `interval` after the previous one ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelaySchedule {
    pub initial_delay: Duration,
    pub interval: Duration,
}

impl FixedDelaySchedule {
    pub fn new(initial_delay: Duration, interval: Duration) -> Self {
        Self {
            initial_delay,
            interval,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiOperation {
    pub method: String,
    pub path: String,
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogSnapshot {
    pub spec_version: String,
    pub title: Option<String>,
    pub operations: Vec<ApiOperation>,
    pub loaded_at: DateTime<Utc>,
}
