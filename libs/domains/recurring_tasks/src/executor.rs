//! Daily batch that revives completed recurring tasks.
//!
//! A run selects every completed repeating task with a due date and resets
//! those whose due date is the run date. Tasks due on other days are left
//! alone, including stale ones from missed runs. Each reset is an independent
//! conditional write, so a failure or conflict on one task is recorded in the
//! summary and the batch moves on.
//!
//! Running twice on the same day is safe: the first run moves due tasks out of
//! `completed`, so the second run no longer selects them.

use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use observability::ResetMetrics;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

use crate::models::{ExecutionSummary, RecurringTask, ResetOutcome, ResetUpdate, TaskState};
use crate::recurrence;
use crate::repository::{ExecutionLogger, TaskStore};

/// Tuning for a reset run
#[derive(Debug, Clone)]
pub struct ResetOptions {
    /// Overall budget for one run; work left when it expires waits for the next run
    pub deadline: Option<Duration>,
    /// How many task resets may be in flight at once
    pub concurrency: usize,
}

impl Default for ResetOptions {
    fn default() -> Self {
        Self {
            deadline: None,
            concurrency: 1,
        }
    }
}

pub struct ResetExecutor<S: TaskStore> {
    store: Arc<S>,
    logger: Option<Arc<dyn ExecutionLogger>>,
    options: ResetOptions,
}

impl<S: TaskStore> ResetExecutor<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            logger: None,
            options: ResetOptions::default(),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn ExecutionLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_options(mut self, options: ResetOptions) -> Self {
        self.options = options;
        self
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Reset every completed recurring task due on `today`
    #[instrument(skip(self), fields(run_date = %today))]
    pub async fn run(&self, today: NaiveDate) -> ExecutionSummary {
        let started = Instant::now();
        let mut summary = ExecutionSummary::new(today);

        match self.options.deadline {
            Some(deadline) => {
                // On expiry the batch future is dropped; whatever it already
                // tallied into `summary` is kept
                let batch = self.process(today, &mut summary);
                if tokio::time::timeout(deadline, batch).await.is_err() {
                    warn!(
                        deadline_ms = deadline.as_millis() as u64,
                        updated = summary.updated_count,
                        "Reset run hit its deadline"
                    );
                    summary.timed_out = true;
                    summary.fail(format!(
                        "Run deadline of {}ms reached after {} resets; remaining tasks are left for the next run",
                        deadline.as_millis(),
                        summary.updated_count
                    ));
                }
            }
            None => self.process(today, &mut summary).await,
        }

        summary.duration_ms = started.elapsed().as_millis() as u64;

        ResetMetrics::record_run(
            summary.success,
            summary.updated_count,
            summary.errors.len(),
            summary.duration_ms,
        );

        info!(
            success = summary.success,
            updated = summary.updated_count,
            skipped = summary.skipped_count,
            errors = summary.errors.len(),
            duration_ms = summary.duration_ms,
            "Reset run finished"
        );

        self.record(&summary).await;
        summary
    }

    async fn process(&self, today: NaiveDate, summary: &mut ExecutionSummary) {
        let tasks = match self.store.find_due_tasks().await {
            Ok(tasks) => tasks,
            Err(e) => {
                error!(error = %e, "Failed to select due tasks");
                summary.fail(format!("Failed to query due tasks: {}", e));
                return;
            }
        };

        let (due, not_due): (Vec<_>, Vec<_>) =
            tasks.into_iter().partition(|task| task.is_due_on(today));
        summary.skipped_count = not_due.len();

        debug!(due = due.len(), skipped = not_due.len(), "Selected tasks");

        let mut resets = stream::iter(due)
            .map(|task| self.reset_task(task, today))
            .buffer_unordered(self.options.concurrency.max(1));

        while let Some(result) = resets.next().await {
            match result {
                Ok(()) => summary.updated_count += 1,
                Err(message) => {
                    warn!(error = %message, "Task reset failed");
                    summary.errors.push(message);
                }
            }
        }
    }

    /// Compute and write one task's next cycle. Errors come back as report lines.
    async fn reset_task(&self, task: RecurringTask, today: NaiveDate) -> Result<(), String> {
        let remaining = decrement_occurrences(task.remaining_occurrences);

        // The next cycle is anchored at this reset, not at the task's start date
        let rule = task
            .recurrence_rule(today)
            .map_err(|e| format!("Task {}: {}", task.id, e))?
            .ok_or_else(|| format!("Task {}: not a recurring task", task.id))?
            .with_remaining_occurrences(remaining);

        let next_due = recurrence::next_occurrence(&rule, today);

        let update = ResetUpdate {
            state: TaskState::Pending,
            remaining_occurrences: remaining,
            due_date: next_due,
        };

        match self.store.apply_reset(task.id, update).await {
            Ok(ResetOutcome::Applied) => {
                info!(
                    task_id = %task.id,
                    next_due = ?next_due,
                    remaining = ?remaining,
                    "Reset recurring task"
                );
                Ok(())
            }
            Ok(ResetOutcome::Conflict) => Err(format!(
                "Task {}: no longer completed when the reset was written; skipped",
                task.id
            )),
            Err(e) => Err(format!("Task {}: {}", task.id, e)),
        }
    }

    async fn record(&self, summary: &ExecutionSummary) {
        if let Some(logger) = &self.logger {
            if let Err(e) = logger.record(summary).await {
                warn!(error = %e, "Failed to record reset run");
            }
        }
    }
}

/// Positive counts go down by one; unlimited and exhausted counts stay put
pub fn decrement_occurrences(remaining: Option<i32>) -> Option<i32> {
    match remaining {
        Some(n) if n > 0 => Some(n - 1),
        other => other,
    }
}
