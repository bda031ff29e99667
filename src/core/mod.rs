pub mod catalog;
pub mod lifecycle;
pub mod loader;
pub mod runner;
pub mod schedule;

pub use crate::domain::model::{ApiOperation, CatalogSnapshot, FixedDelaySchedule, LoadOutcome};
pub use crate::domain::ports::{ConfigProvider, DocumentRefresher, ScheduledTask};
pub use crate::utils::error::Result;
