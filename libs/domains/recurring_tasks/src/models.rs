use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::RecurrenceError;

/// Calendar unit a recurrence steps by
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "recurrence_unit")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RecurrenceUnit {
    #[sea_orm(string_value = "day")]
    Day,
    #[sea_orm(string_value = "week")]
    Week,
    #[sea_orm(string_value = "month")]
    Month,
    #[sea_orm(string_value = "year")]
    Year,
}

/// Day of the week a weekly recurrence may land on
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

/// Lifecycle state of a task
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "task_state")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TaskState {
    #[default]
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "completed")]
    Completed,
}

/// How a task repeats.
///
/// Only constructible through [`RecurrenceRule::new`], so every rule that
/// reaches the calculator has a positive interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RecurrenceRule {
    unit: RecurrenceUnit,
    interval: u32,
    weekdays: BTreeSet<Weekday>,
    anchor_date: NaiveDate,
    remaining_occurrences: Option<i32>,
}

impl RecurrenceRule {
    pub fn new(
        unit: RecurrenceUnit,
        interval: i32,
        anchor_date: NaiveDate,
    ) -> Result<Self, RecurrenceError> {
        let interval = u32::try_from(interval)
            .ok()
            .filter(|i| *i >= 1)
            .ok_or_else(|| {
                RecurrenceError::Validation(format!(
                    "interval must be at least 1, got {}",
                    interval
                ))
            })?;

        Ok(Self {
            unit,
            interval,
            weekdays: BTreeSet::new(),
            anchor_date,
            remaining_occurrences: None,
        })
    }

    pub fn with_weekdays(mut self, weekdays: impl IntoIterator<Item = Weekday>) -> Self {
        self.weekdays = weekdays.into_iter().collect();
        self
    }

    pub fn with_remaining_occurrences(mut self, remaining: Option<i32>) -> Self {
        self.remaining_occurrences = remaining;
        self
    }

    pub fn anchored_at(mut self, anchor_date: NaiveDate) -> Self {
        self.anchor_date = anchor_date;
        self
    }

    pub fn unit(&self) -> RecurrenceUnit {
        self.unit
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn weekdays(&self) -> &BTreeSet<Weekday> {
        &self.weekdays
    }

    pub fn anchor_date(&self) -> NaiveDate {
        self.anchor_date
    }

    pub fn remaining_occurrences(&self) -> Option<i32> {
        self.remaining_occurrences
    }

    /// A counted series at zero (or below) never schedules again
    pub fn is_exhausted(&self) -> bool {
        matches!(self.remaining_occurrences, Some(n) if n <= 0)
    }
}

/// Snapshot of a recurring task as read from the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecurringTask {
    pub id: Uuid,
    pub title: String,
    pub repeats: bool,
    pub unit: Option<RecurrenceUnit>,
    pub interval: i32,
    pub weekdays: BTreeSet<Weekday>,
    /// `None` means unlimited
    pub remaining_occurrences: Option<i32>,
    pub state: TaskState,
    pub due_date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    /// Stored but not enforced by the recurrence arithmetic
    pub end_date: Option<NaiveDate>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl RecurringTask {
    /// Start date, else last modification, else `today`
    pub fn anchor_date(&self, today: NaiveDate) -> NaiveDate {
        self.start_date
            .or_else(|| self.updated_at.map(|at| at.date_naive()))
            .unwrap_or(today)
    }

    /// Build the task's rule rooted at `anchor`. Non-repeating tasks have none.
    pub fn recurrence_rule(
        &self,
        anchor: NaiveDate,
    ) -> Result<Option<RecurrenceRule>, RecurrenceError> {
        if !self.repeats {
            return Ok(None);
        }

        let unit = self.unit.ok_or_else(|| {
            RecurrenceError::Validation("repeating task has no recurrence unit".to_string())
        })?;

        let rule = RecurrenceRule::new(unit, self.interval, anchor)?
            .with_weekdays(self.weekdays.iter().copied())
            .with_remaining_occurrences(self.remaining_occurrences);

        Ok(Some(rule))
    }

    /// Due date to store when the task is created or its schedule edited
    pub fn initial_due_date(&self, today: NaiveDate) -> Result<Option<NaiveDate>, RecurrenceError> {
        let rule = self.recurrence_rule(self.anchor_date(today))?;
        Ok(rule.and_then(|rule| crate::recurrence::next_occurrence(&rule, today)))
    }

    /// Whether this task's reset cycle falls on `today`
    pub fn is_due_on(&self, today: NaiveDate) -> bool {
        self.repeats && self.state == TaskState::Completed && self.due_date == Some(today)
    }
}

/// New state written by a reset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetUpdate {
    pub state: TaskState,
    pub remaining_occurrences: Option<i32>,
    pub due_date: Option<NaiveDate>,
}

/// Result of a conditional reset write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    Applied,
    /// The task left the completed state before the write landed
    Conflict,
}

/// Read-only view of how many completed repeating tasks are due
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DueStatus {
    pub date: NaiveDate,
    pub due_today: u64,
    /// Due before `date` but never reset; these are not caught up
    pub overdue: u64,
}

/// Outcome of one reset run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ExecutionSummary {
    pub success: bool,
    pub run_date: NaiveDate,
    pub updated_count: usize,
    pub skipped_count: usize,
    pub errors: Vec<String>,
    pub duration_ms: u64,
    pub timed_out: bool,
}

impl ExecutionSummary {
    pub fn new(run_date: NaiveDate) -> Self {
        Self {
            success: true,
            run_date,
            updated_count: 0,
            skipped_count: 0,
            errors: Vec::new(),
            duration_ms: 0,
            timed_out: false,
        }
    }

    /// Mark the whole run as failed
    pub fn fail(&mut self, message: impl Into<String>) {
        self.success = false;
        self.errors.push(message.into());
    }
}
