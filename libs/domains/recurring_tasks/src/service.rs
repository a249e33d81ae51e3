use axum_helpers::TriggerToken;
use chrono::{NaiveDate, Utc};
use observability::ResetMetrics;
use std::sync::Arc;
use tracing::{instrument, warn};

use crate::error::{TaskError, TaskResult};
use crate::executor::ResetExecutor;
use crate::models::{DueStatus, ExecutionSummary};
use crate::repository::TaskStore;

/// Entry point for triggering resets and inspecting what is due
pub struct ResetService<S: TaskStore> {
    executor: Arc<ResetExecutor<S>>,
    token: Option<TriggerToken>,
}

impl<S: TaskStore> Clone for ResetService<S> {
    fn clone(&self) -> Self {
        Self {
            executor: Arc::clone(&self.executor),
            token: self.token.clone(),
        }
    }
}

impl<S: TaskStore> ResetService<S> {
    pub fn new(executor: ResetExecutor<S>) -> Self {
        Self {
            executor: Arc::new(executor),
            token: None,
        }
    }

    /// Require callers of [`Self::trigger_reset`] to present this token
    pub fn with_token(mut self, token: TriggerToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Run the daily reset if the credential checks out.
    ///
    /// Without a configured token every caller is allowed.
    #[instrument(skip(self, credential), fields(run_date = %today))]
    pub async fn trigger_reset(
        &self,
        credential: Option<&str>,
        today: NaiveDate,
    ) -> TaskResult<ExecutionSummary> {
        if let Some(token) = &self.token {
            let authorized = credential.is_some_and(|presented| token.verify(presented));
            if !authorized {
                warn!(credential_present = credential.is_some(), "Rejected reset trigger");
                return Err(TaskError::Unauthorized(
                    "Missing or invalid trigger token".to_string(),
                ));
            }
        }

        Ok(self.run(today).await)
    }

    /// Run the daily reset without a credential check, for in-process schedulers
    pub async fn run(&self, today: NaiveDate) -> ExecutionSummary {
        self.executor.run(today).await
    }

    /// Count completed repeating tasks due on `today` and left over from earlier days
    #[instrument(skip(self))]
    pub async fn due_status(&self, today: NaiveDate) -> TaskResult<DueStatus> {
        let status = self.executor.store().due_counts(today).await?;
        ResetMetrics::set_due(status.due_today, status.overdue);
        Ok(status)
    }
}

/// Calendar day the reset runs against (UTC)
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
