//! Shared fixtures for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use domain_recurring_tasks::*;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Mutex;
use uuid::Uuid;

/// TaskStore backed by a map, with optional injected write failures
#[derive(Default)]
pub struct InMemoryTaskStore {
    tasks: Mutex<HashMap<Uuid, RecurringTask>>,
    failing: Mutex<HashSet<Uuid>>,
    selection_down: Mutex<bool>,
}

impl InMemoryTaskStore {
    pub fn with_tasks(tasks: impl IntoIterator<Item = RecurringTask>) -> Self {
        let store = Self::default();
        {
            let mut map = store.tasks.lock().unwrap();
            for task in tasks {
                map.insert(task.id, task);
            }
        }
        store
    }

    /// Make every reset write for `id` fail with a database error
    pub fn fail_writes_for(&self, id: Uuid) {
        self.failing.lock().unwrap().insert(id);
    }

    /// Make `find_due_tasks` fail as if the database were unreachable
    pub fn fail_selection(&self) {
        *self.selection_down.lock().unwrap() = true;
    }

    pub fn get(&self, id: Uuid) -> RecurringTask {
        self.tasks.lock().unwrap()[&id].clone()
    }

    /// Simulate the user acting on a task between selection and write
    pub fn set_state(&self, id: Uuid, state: TaskState) {
        if let Some(task) = self.tasks.lock().unwrap().get_mut(&id) {
            task.state = state;
        }
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn find_due_tasks(&self) -> TaskResult<Vec<RecurringTask>> {
        if *self.selection_down.lock().unwrap() {
            return Err(TaskError::Database("connection refused".to_string()));
        }

        let tasks = self.tasks.lock().unwrap();
        Ok(tasks
            .values()
            .filter(|t| t.repeats && t.state == TaskState::Completed && t.due_date.is_some())
            .cloned()
            .collect())
    }

    async fn apply_reset(&self, task_id: Uuid, update: ResetUpdate) -> TaskResult<ResetOutcome> {
        if self.failing.lock().unwrap().contains(&task_id) {
            return Err(TaskError::Database("injected write failure".to_string()));
        }

        let mut tasks = self.tasks.lock().unwrap();
        match tasks.get_mut(&task_id) {
            Some(task) if task.state == TaskState::Completed => {
                task.state = update.state;
                task.remaining_occurrences = update.remaining_occurrences;
                task.due_date = update.due_date;
                Ok(ResetOutcome::Applied)
            }
            _ => Ok(ResetOutcome::Conflict),
        }
    }

    async fn due_counts(&self, today: NaiveDate) -> TaskResult<DueStatus> {
        let tasks = self.tasks.lock().unwrap();
        let completed = tasks
            .values()
            .filter(|t| t.repeats && t.state == TaskState::Completed);

        let mut status = DueStatus {
            date: today,
            due_today: 0,
            overdue: 0,
        };
        for task in completed {
            match task.due_date {
                Some(due) if due == today => status.due_today += 1,
                Some(due) if due < today => status.overdue += 1,
                _ => {}
            }
        }
        Ok(status)
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A completed daily task due on `due`
pub fn completed_daily(title: &str, due: NaiveDate) -> RecurringTask {
    RecurringTask {
        id: Uuid::now_v7(),
        title: title.to_string(),
        repeats: true,
        unit: Some(RecurrenceUnit::Day),
        interval: 1,
        weekdays: BTreeSet::new(),
        remaining_occurrences: None,
        state: TaskState::Completed,
        due_date: Some(due),
        start_date: Some(date(2024, 1, 1)),
        end_date: None,
        updated_at: None,
    }
}

/// Wraps a store and delays every reset write
pub struct SlowTaskStore {
    pub inner: InMemoryTaskStore,
    pub write_delay: std::time::Duration,
}

#[async_trait]
impl TaskStore for SlowTaskStore {
    async fn find_due_tasks(&self) -> TaskResult<Vec<RecurringTask>> {
        self.inner.find_due_tasks().await
    }

    async fn apply_reset(&self, task_id: Uuid, update: ResetUpdate) -> TaskResult<ResetOutcome> {
        tokio::time::sleep(self.write_delay).await;
        self.inner.apply_reset(task_id, update).await
    }

    async fn due_counts(&self, today: NaiveDate) -> TaskResult<DueStatus> {
        self.inner.due_counts(today).await
    }
}
