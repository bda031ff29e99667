use crate::core::ScheduledTask;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Something interested in the process becoming ready.
#[async_trait]
pub trait ReadyListener: Send + Sync {
    async fn on_ready(&self);
}

/// Explicit registry of startup hooks, notified when the process is ready.
#[derive(Default)]
pub struct Bootstrap {
    listeners: Vec<Arc<dyn ReadyListener>>,
}

impl Bootstrap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, listener: Arc<dyn ReadyListener>) -> &mut Self {
        self.listeners.push(listener);
        self
    }

    /// 依註冊順序通知所有 listener
    pub async fn signal_ready(&self) {
        tracing::debug!(listeners = self.listeners.len(), "Application ready");
        for listener in &self.listeners {
            listener.on_ready().await;
        }
    }
}

/// Runs its task on the first readiness signal and ignores every later one.
pub struct StartupTrigger<T: ScheduledTask + ?Sized> {
    task: Arc<T>,
    fired: AtomicBool,
}

impl<T: ScheduledTask + ?Sized> StartupTrigger<T> {
    pub fn new(task: Arc<T>) -> Self {
        Self {
            task,
            fired: AtomicBool::new(false),
        }
    }

    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }
}

#[async_trait]
impl<T: ScheduledTask + ?Sized> ReadyListener for StartupTrigger<T> {
    async fn on_ready(&self) {
        if self.fired.swap(true, Ordering::AcqRel) {
            tracing::debug!(task = self.task.name(), "Startup trigger already fired");
            return;
        }

        tracing::debug!(task = self.task.name(), "Startup trigger fired");
        self.task.run().await;
    }
}
