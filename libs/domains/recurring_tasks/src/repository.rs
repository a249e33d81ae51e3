use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::TaskResult;
use crate::models::{DueStatus, ExecutionSummary, RecurringTask, ResetOutcome, ResetUpdate};

/// Store of recurring tasks consumed by the reset executor
///
/// Implementations can use different storage backends (PostgreSQL, in-memory for tests, etc.)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Tasks with `repeats = true`, a due date, and `state = completed`
    async fn find_due_tasks(&self) -> TaskResult<Vec<RecurringTask>>;

    /// Write a reset, but only if the task is still completed.
    ///
    /// Returns [`ResetOutcome::Conflict`] when that precondition no longer holds.
    async fn apply_reset(&self, task_id: Uuid, update: ResetUpdate) -> TaskResult<ResetOutcome>;

    /// Count completed repeating tasks due on `today` and before it
    async fn due_counts(&self, today: NaiveDate) -> TaskResult<DueStatus>;
}

/// Audit sink for finished runs. Callers ignore its failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExecutionLogger: Send + Sync {
    async fn record(&self, summary: &ExecutionSummary) -> TaskResult<()>;
}
