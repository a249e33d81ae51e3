use crate::models::{RecurrenceUnit, RecurringTask, TaskState, Weekday};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Sea-ORM Entity for the recurring_tasks table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recurring_tasks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub repeats: bool,
    pub recurrence_unit: Option<RecurrenceUnit>,
    pub recurrence_interval: i32,
    /// JSON array of lowercase weekday names
    #[sea_orm(column_type = "JsonBinary")]
    pub weekdays: Json,
    pub remaining_occurrences: Option<i32>,
    pub state: TaskState,
    pub due_date: Option<Date>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn parse_weekdays(task_id: Uuid, raw: &Json) -> BTreeSet<Weekday> {
    let Some(names) = raw.as_array() else {
        if !raw.is_null() {
            tracing::warn!(task_id = %task_id, weekdays = %raw, "Ignoring non-array weekdays");
        }
        return BTreeSet::new();
    };

    names
        .iter()
        .filter_map(|name| {
            let parsed = name.as_str().and_then(|s| Weekday::from_str(s).ok());
            if parsed.is_none() {
                tracing::warn!(task_id = %task_id, weekday = %name, "Ignoring unknown weekday");
            }
            parsed
        })
        .collect()
}

// Conversion from Sea-ORM Model to domain RecurringTask
impl From<Model> for RecurringTask {
    fn from(model: Model) -> Self {
        let weekdays = parse_weekdays(model.id, &model.weekdays);
        Self {
            id: model.id,
            title: model.title,
            repeats: model.repeats,
            unit: model.recurrence_unit,
            interval: model.recurrence_interval,
            weekdays,
            remaining_occurrences: model.remaining_occurrences,
            state: model.state,
            due_date: model.due_date,
            start_date: model.start_date,
            end_date: model.end_date,
            updated_at: Some(model.updated_at.into()),
        }
    }
}
