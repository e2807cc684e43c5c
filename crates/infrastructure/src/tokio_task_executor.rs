use rolegate_application::{BackgroundTask, TaskExecutor};
use rolegate_core::{AppError, AppResult};

/// Executor adapter spawning tasks onto the current Tokio runtime.
///
/// Spawned tasks are detached from the submitting request, so a cancelled
/// request cannot abort in-flight cache maintenance.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTaskExecutor;

impl TokioTaskExecutor {
    /// Creates an executor bound to the ambient Tokio runtime.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TaskExecutor for TokioTaskExecutor {
    fn execute(&self, pool: &str, task: BackgroundTask) -> AppResult<()> {
        let handle = tokio::runtime::Handle::try_current().map_err(|error| {
            AppError::Internal(format!("no tokio runtime for pool '{pool}': {error}"))
        })?;

        tracing::trace!(pool, "spawning background task");
        handle.spawn(task);
        Ok(())
    }
}
