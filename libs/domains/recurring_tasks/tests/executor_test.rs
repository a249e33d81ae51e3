//! Executor behaviour against an in-memory store

mod common;

use common::*;
use domain_recurring_tasks::*;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_only_tasks_due_today_are_reset() {
    let today = date(2024, 4, 10);
    let due: Vec<_> = (0..3)
        .map(|i| completed_daily(&format!("due {i}"), today))
        .collect();
    let tomorrow: Vec<_> = (0..2)
        .map(|i| completed_daily(&format!("tomorrow {i}"), date(2024, 4, 11)))
        .collect();

    let store = Arc::new(InMemoryTaskStore::with_tasks(
        due.iter().chain(tomorrow.iter()).cloned(),
    ));
    let summary = ResetExecutor::new(Arc::clone(&store)).run(today).await;

    assert!(summary.success);
    assert_eq!(summary.updated_count, 3);
    assert_eq!(summary.skipped_count, 2);

    for task in &due {
        let stored = store.get(task.id);
        assert_eq!(stored.state, TaskState::Pending);
        assert_eq!(stored.due_date, Some(date(2024, 4, 11)));
    }
    for task in &tomorrow {
        assert_eq!(&store.get(task.id), task);
    }
}

#[tokio::test]
async fn test_second_run_same_day_is_a_no_op() {
    let today = date(2024, 4, 10);
    let store = Arc::new(InMemoryTaskStore::with_tasks([
        completed_daily("a", today),
        completed_daily("b", today),
    ]));
    let executor = ResetExecutor::new(Arc::clone(&store));

    let first = executor.run(today).await;
    let second = executor.run(today).await;

    assert_eq!(first.updated_count, 2);
    assert!(second.success);
    assert_eq!(second.updated_count, 0);
    assert!(second.errors.is_empty());
}

#[tokio::test]
async fn test_counted_series_runs_out() {
    let today = date(2024, 4, 10);
    let mut task = completed_daily("last one", today);
    task.remaining_occurrences = Some(1);
    let id = task.id;
    let store = Arc::new(InMemoryTaskStore::with_tasks([task]));

    let summary = ResetExecutor::new(Arc::clone(&store)).run(today).await;
    assert_eq!(summary.updated_count, 1);

    let stored = store.get(id);
    assert_eq!(stored.remaining_occurrences, Some(0));
    assert_eq!(stored.due_date, None);
    assert_eq!(stored.state, TaskState::Pending);

    let rule = stored.recurrence_rule(today).unwrap().unwrap();
    assert_eq!(next_occurrence(&rule, today), None);
    assert_eq!(next_occurrence(&rule, date(2025, 1, 1)), None);

    // Completing it again does not bring it back: no due date, never selected as due
    store.set_state(id, TaskState::Completed);
    let later = ResetExecutor::new(Arc::clone(&store)).run(date(2024, 4, 11)).await;
    assert_eq!(later.updated_count, 0);
}

#[tokio::test]
async fn test_one_failing_write_does_not_stop_the_batch() {
    let today = date(2024, 4, 10);
    let tasks: Vec<_> = (0..5)
        .map(|i| completed_daily(&format!("task {i}"), today))
        .collect();
    let broken = tasks[3].id;
    let store = Arc::new(InMemoryTaskStore::with_tasks(tasks));
    store.fail_writes_for(broken);

    let summary = ResetExecutor::new(Arc::clone(&store)).run(today).await;

    assert!(summary.success);
    assert_eq!(summary.updated_count, 4);
    assert_eq!(summary.errors.len(), 1);
    assert!(summary.errors[0].contains(&broken.to_string()));
    assert_eq!(store.get(broken).state, TaskState::Completed);
}

#[tokio::test]
async fn test_stale_tasks_are_not_caught_up() {
    let today = date(2024, 4, 10);
    let stale = completed_daily("missed", date(2024, 4, 7));
    let id = stale.id;
    let store = Arc::new(InMemoryTaskStore::with_tasks([stale.clone()]));

    let status = store.due_counts(today).await.unwrap();
    assert_eq!(status.overdue, 1);
    assert_eq!(status.due_today, 0);

    let summary = ResetExecutor::new(Arc::clone(&store)).run(today).await;
    assert_eq!(summary.updated_count, 0);
    assert_eq!(summary.skipped_count, 1);
    assert_eq!(store.get(id), stale);
}

#[tokio::test]
async fn test_weekly_task_moves_to_next_listed_day() {
    // 2024-01-01 is a Monday
    let today = date(2024, 1, 1);
    let mut task = completed_daily("gym", today);
    task.unit = Some(RecurrenceUnit::Week);
    task.weekdays = [Weekday::Monday, Weekday::Wednesday].into_iter().collect();
    let id = task.id;
    let store = Arc::new(InMemoryTaskStore::with_tasks([task]));

    ResetExecutor::new(Arc::clone(&store)).run(today).await;

    assert_eq!(store.get(id).due_date, Some(date(2024, 1, 3)));
}

#[tokio::test]
async fn test_concurrency_does_not_change_the_outcome() {
    let today = date(2024, 4, 10);
    let tasks: Vec<_> = (0..20)
        .map(|i| completed_daily(&format!("task {i}"), today))
        .collect();
    let store = Arc::new(InMemoryTaskStore::with_tasks(tasks));

    let summary = ResetExecutor::new(Arc::clone(&store))
        .with_options(ResetOptions {
            deadline: Some(Duration::from_secs(30)),
            concurrency: 8,
        })
        .run(today)
        .await;

    assert!(summary.success);
    assert!(!summary.timed_out);
    assert_eq!(summary.updated_count, 20);
}

#[tokio::test]
async fn test_deadline_keeps_partial_counts() {
    let today = date(2024, 4, 10);
    let tasks: Vec<_> = (0..5)
        .map(|i| completed_daily(&format!("task {i}"), today))
        .collect();
    let store = Arc::new(SlowTaskStore {
        inner: InMemoryTaskStore::with_tasks(tasks),
        write_delay: Duration::from_millis(200),
    });

    let summary = ResetExecutor::new(Arc::clone(&store))
        .with_options(ResetOptions {
            deadline: Some(Duration::from_millis(300)),
            concurrency: 1,
        })
        .run(today)
        .await;

    assert!(summary.timed_out);
    assert!(!summary.success);
    assert!(summary.updated_count < 5);
    assert!(summary.errors.iter().any(|e| e.contains("deadline")));

    // Whatever was left is still selectable by the next run
    let rest = ResetExecutor::new(Arc::clone(&store)).run(today).await;
    assert!(rest.success);
    assert_eq!(summary.updated_count + rest.updated_count, 5);
}

#[tokio::test]
async fn test_overlapping_runs_reset_once() {
    let today = date(2024, 4, 10);
    let task = RecurringTask {
        remaining_occurrences: Some(5),
        ..completed_daily("take out bins", today)
    };
    let id = task.id;
    let store = Arc::new(SlowTaskStore {
        inner: InMemoryTaskStore::with_tasks([task]),
        write_delay: Duration::from_millis(100),
    });

    // Both runs select the task before either write lands
    let first = ResetExecutor::new(Arc::clone(&store));
    let second = ResetExecutor::new(Arc::clone(&store));
    let (a, b) = tokio::join!(first.run(today), second.run(today));

    assert!(a.success && b.success);
    assert_eq!(a.updated_count + b.updated_count, 1);

    let errors: Vec<_> = a.errors.iter().chain(b.errors.iter()).collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("no longer completed"));

    let stored = store.inner.get(id);
    assert_eq!(stored.state, TaskState::Pending);
    assert_eq!(stored.remaining_occurrences, Some(4));
    assert_eq!(stored.due_date, Some(date(2024, 4, 11)));
}
