use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Select,
};
use uuid::Uuid;

use crate::{
    entity::{self, reset_execution},
    error::TaskResult,
    models::{DueStatus, ExecutionSummary, RecurringTask, ResetOutcome, ResetUpdate, TaskState},
    repository::{ExecutionLogger, TaskStore},
};

pub struct PgTaskStore {
    db: DatabaseConnection,
}

impl PgTaskStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Completed repeating tasks that carry a due date
    fn completed_recurring() -> Select<entity::Entity> {
        entity::Entity::find()
            .filter(entity::Column::Repeats.eq(true))
            .filter(entity::Column::State.eq(TaskState::Completed))
            .filter(entity::Column::DueDate.is_not_null())
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn find_due_tasks(&self) -> TaskResult<Vec<RecurringTask>> {
        let models = Self::completed_recurring()
            .order_by_asc(entity::Column::DueDate)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn apply_reset(&self, task_id: Uuid, update: ResetUpdate) -> TaskResult<ResetOutcome> {
        // The state filter makes the write conditional: a task the user
        // already reopened or edited is left untouched
        let result = entity::Entity::update_many()
            .set(entity::ActiveModel {
                state: Set(update.state),
                remaining_occurrences: Set(update.remaining_occurrences),
                due_date: Set(update.due_date),
                ..Default::default()
            })
            .filter(entity::Column::Id.eq(task_id))
            .filter(entity::Column::State.eq(TaskState::Completed))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            tracing::debug!(task_id = %task_id, "Reset skipped, task no longer completed");
            return Ok(ResetOutcome::Conflict);
        }

        Ok(ResetOutcome::Applied)
    }

    async fn due_counts(&self, today: NaiveDate) -> TaskResult<DueStatus> {
        let due_today = Self::completed_recurring()
            .filter(entity::Column::DueDate.eq(today))
            .count(&self.db)
            .await?;

        let overdue = Self::completed_recurring()
            .filter(entity::Column::DueDate.lt(today))
            .count(&self.db)
            .await?;

        Ok(DueStatus {
            date: today,
            due_today,
            overdue,
        })
    }
}

/// Writes one `reset_executions` row per run
pub struct PgExecutionLogger {
    db: DatabaseConnection,
}

impl PgExecutionLogger {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ExecutionLogger for PgExecutionLogger {
    async fn record(&self, summary: &ExecutionSummary) -> TaskResult<()> {
        let row: reset_execution::ActiveModel = summary.into();
        reset_execution::Entity::insert(row)
            .exec_without_returning(&self.db)
            .await?;

        tracing::debug!(run_date = %summary.run_date, "Recorded reset run");
        Ok(())
    }
}
