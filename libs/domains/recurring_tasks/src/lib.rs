//! Recurring Tasks Domain
//!
//! Daily reset of completed recurring tasks: the next-occurrence calculator,
//! the batch executor that applies it, and the store it runs against.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Service    │  ← Trigger credential, status query
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │   Executor   │  ← Batch selection, per-task reset, audit
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐     ┌──────────────┐
//! │  TaskStore   │     │  Recurrence  │  ← Pure date arithmetic
//! └──────────────┘     └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_recurring_tasks::{PgTaskStore, ResetExecutor, ResetService};
//! use sea_orm::Database;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("postgres://...").await?;
//!
//! let executor = ResetExecutor::new(Arc::new(PgTaskStore::new(db)));
//! let service = ResetService::new(executor);
//! let summary = service
//!     .trigger_reset(None, domain_recurring_tasks::service::today())
//!     .await?;
//! println!("reset {} tasks", summary.updated_count);
//! # Ok(())
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod executor;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod recurrence;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{RecurrenceError, TaskError, TaskResult};
pub use executor::{ResetExecutor, ResetOptions};
pub use handlers::ResetApiDoc;
pub use models::{
    DueStatus, ExecutionSummary, RecurrenceRule, RecurrenceUnit, RecurringTask, ResetOutcome,
    ResetUpdate, TaskState, Weekday,
};
pub use postgres::{PgExecutionLogger, PgTaskStore};
pub use recurrence::next_occurrence;
pub use repository::{ExecutionLogger, TaskStore};
pub use service::ResetService;
