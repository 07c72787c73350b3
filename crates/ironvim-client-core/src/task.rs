use std::time::Duration;

use ironvim_soap::{Context, RoundTripper};
use ironvim_vim25::types::{AnyType, ManagedObjectReference, TaskInfo, TaskInfoState};
use tracing::{debug, info, instrument};

use crate::ClientError;
use crate::property::Collector;
use crate::retry::ExponentialBackoff;

/// 100ms, 200ms, 400ms ... up to 5s between polls.
pub const DEFAULT_POLL_BACKOFF: ExponentialBackoff = ExponentialBackoff::from_millis(2)
    .factor(50)
    .max_delay(Duration::from_secs(5));

/// Polls `Task.info` until the task finishes.
#[derive(Debug)]
pub struct TaskWaiter<'c, R: ?Sized> {
    collector: Collector<'c, R>,
    backoff: ExponentialBackoff,
}

impl<'c, R: RoundTripper + ?Sized> TaskWaiter<'c, R> {
    pub fn new(collector: Collector<'c, R>) -> Self {
        Self {
            collector,
            backoff: DEFAULT_POLL_BACKOFF,
        }
    }

    #[must_use]
    pub fn with_backoff(mut self, backoff: ExponentialBackoff) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn info(&self, ctx: &Context, task: &ManagedObjectReference) -> Result<TaskInfo, ClientError> {
        match self.collector.retrieve_property(ctx, task, "info")? {
            AnyType::TaskInfo(info) => Ok(*info),
            other => Err(ClientError::UnexpectedValue {
                property: "info".to_string(),
                expected: "TaskInfo",
                found: other.type_name().to_string(),
            }),
        }
    }

    /// Waits for `task`. Returns its `TaskInfo` on success and
    /// [`ClientError::Task`] with the task's fault on error.
    #[instrument(name = "task.wait", level = "info", skip_all, fields(task = %task), err)]
    pub fn wait(&self, ctx: &Context, task: &ManagedObjectReference) -> Result<TaskInfo, ClientError> {
        let mut polls = 0;
        loop {
            ctx.check()?;
            let info = self.info(ctx, task)?;

            match info.state {
                TaskInfoState::Success => {
                    info!("task succeeded");
                    return Ok(info);
                }
                TaskInfoState::Error => {
                    let message = info
                        .error
                        .as_ref()
                        .map_or_else(|| "task failed".to_string(), |fault| fault.message().to_string());
                    return Err(ClientError::Task {
                        message,
                        fault: info.error,
                    });
                }
                state => debug!(%state, progress = ?info.progress, "task pending"),
            }

            polls += 1;
            crate::sleep(ctx, self.backoff.delay(polls))?;
        }
    }
}
