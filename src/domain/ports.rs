use crate::domain::model::FixedDelaySchedule;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Downstream capability that consumes a freshly downloaded document.
#[async_trait]
pub trait DocumentRefresher: Send + Sync {
    async fn refresh(&self, document: String) -> Result<()>;
}

/// Work driven by the startup and periodic triggers.
#[async_trait]
pub trait ScheduledTask: Send + Sync {
    fn name(&self) -> &str;

    async fn run(&self);
}

pub trait ConfigProvider: Send + Sync {
    fn open_api_url(&self) -> &str;
    fn refresh_initial_delay(&self) -> Duration;
    fn refresh_interval(&self) -> Duration;
    fn request_timeout(&self) -> Option<Duration>;

    fn schedule(&self) -> FixedDelaySchedule {
        FixedDelaySchedule::new(self.refresh_initial_delay(), self.refresh_interval())
    }
}
