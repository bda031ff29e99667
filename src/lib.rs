pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use config::LoaderConfig;
pub use core::{
    catalog::OperationCatalog,
    lifecycle::{Bootstrap, ReadyListener, StartupTrigger},
    loader::OpenApiLoader,
    schedule::PeriodicTrigger,
};
pub use domain::model::{FixedDelaySchedule, LoadOutcome};
pub use domain::ports::{ConfigProvider, DocumentRefresher, ScheduledTask};
pub use utils::error::{LoaderError, Result};
