//! Metrics for the daily recurring task reset.

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};

/// Reset run metrics recorder
pub struct ResetMetrics;

impl ResetMetrics {
    /// Record one finished reset run
    pub fn record_run(success: bool, updated: usize, errors: usize, duration_ms: u64) {
        let status = if success { "success" } else { "failure" };

        counter!("reset_runs_total", "status" => status).increment(1);
        counter!("reset_tasks_updated_total").increment(updated as u64);
        counter!("reset_task_errors_total").increment(errors as u64);
        histogram!("reset_run_duration_seconds").record(duration_ms as f64 / 1000.0);
        gauge!("reset_tasks_updated_last_run").set(updated as f64);

        tracing::debug!(status, updated, errors, duration_ms, "Recorded reset run metrics");
    }

    /// Publish the counts a status query found
    pub fn set_due(due_today: u64, overdue: u64) {
        gauge!("reset_tasks_due").set(due_today as f64);
        gauge!("reset_tasks_overdue").set(overdue as f64);
    }
}

pub(crate) fn describe() {
    describe_counter!("reset_runs_total", "Reset runs by outcome");
    describe_counter!("reset_tasks_updated_total", "Recurring tasks moved back to pending");
    describe_counter!("reset_task_errors_total", "Per-task reset failures and conflicts");
    describe_histogram!("reset_run_duration_seconds", "Reset run duration in seconds");
    describe_gauge!("reset_tasks_updated_last_run", "Tasks reset by the most recent run");
    describe_gauge!("reset_tasks_due", "Completed recurring tasks due today at last status query");
    describe_gauge!(
        "reset_tasks_overdue",
        "Completed recurring tasks whose due date passed without a reset"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_without_recorder_is_a_no_op() {
        ResetMetrics::record_run(true, 3, 0, 12);
        ResetMetrics::record_run(false, 0, 1, 5);
        ResetMetrics::set_due(2, 1);
    }
}
