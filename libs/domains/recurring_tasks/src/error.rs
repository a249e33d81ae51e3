use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

/// A recurrence rule that cannot be evaluated
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecurrenceError {
    #[error("Invalid recurrence rule: {0}")]
    Validation(String),
}

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type TaskResult<T> = Result<T, TaskError>;

impl From<RecurrenceError> for TaskError {
    fn from(err: RecurrenceError) -> Self {
        TaskError::Validation(err.to_string())
    }
}

impl From<sea_orm::DbErr> for TaskError {
    fn from(err: sea_orm::DbErr) -> Self {
        TaskError::Database(err.to_string())
    }
}

/// Convert TaskError to AppError for standardized error responses
impl From<TaskError> for AppError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::Validation(msg) => AppError::BadRequest(msg),
            TaskError::Unauthorized(msg) => AppError::Unauthorized(msg),
            // Store failures are logged by AppError; clients only get a generic message
            TaskError::Database(msg) => {
                tracing::error!(error = %msg, "Recurring task store failure");
                AppError::InternalServerError("Task store unavailable".to_string())
            }
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_recurrence_error_becomes_validation() {
        let err: TaskError = RecurrenceError::Validation("interval must be at least 1".into()).into();
        assert!(matches!(err, TaskError::Validation(_)));
        assert!(err.to_string().contains("interval must be at least 1"));
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (TaskError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (TaskError::Unauthorized("nope".into()), StatusCode::UNAUTHORIZED),
            (TaskError::Database("down".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
