//! Scheduler port trait
//!
//! A repeating task fires a zero-argument async callback on every tick of a
//! schedule expression until its handle is cancelled or dropped. Ticks are
//! not serialized: a slow callback may still be running when the next one
//! starts.

use std::sync::Arc;

use futures_util::future::BoxFuture;

use crate::error::ScheduleError;

/// Callback invoked on every tick
pub type TaskCallback = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

pub trait RepeatingTask: Send + Sync {
    fn schedule(&self, expression: &str, callback: TaskCallback)
        -> Result<TaskHandle, ScheduleError>;
}

/// Registration handle; unregisters the task when cancelled or dropped
pub struct TaskHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl TaskHandle {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskHandle")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
