use crate::core::{FixedDelaySchedule, ScheduledTask};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Repeating fixed-delay trigger holding a direct reference to its task.
///
/// Sleeps `initial_delay`, runs the task, then sleeps `interval` after each
/// completed run. Runs never overlap. Cancellation is only observed while
/// sleeping; a run that has started always finishes.
pub struct PeriodicTrigger<T: ScheduledTask + ?Sized> {
    task: Arc<T>,
    schedule: FixedDelaySchedule,
}

impl<T: ScheduledTask + ?Sized + 'static> PeriodicTrigger<T> {
    pub fn new(task: Arc<T>, schedule: FixedDelaySchedule) -> Self {
        Self { task, schedule }
    }

    pub fn spawn(self, shutdown: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }

    pub async fn run(self, shutdown: CancellationToken) {
        tracing::info!(
            task = self.task.name(),
            initial_delay = ?self.schedule.initial_delay,
            interval = ?self.schedule.interval,
            "Periodic trigger scheduled"
        );

        let mut delay = self.schedule.initial_delay;
        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    tracing::info!(task = self.task.name(), "Periodic trigger stopped");
                    break;
                }
                _ = tokio::time::sleep(delay) => {}
            }

            tracing::debug!(task = self.task.name(), "Periodic trigger fired");
            self.task.run().await;
            delay = self.schedule.interval;
        }
    }
}
