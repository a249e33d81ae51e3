use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use axum_helpers::{bearer_token, ErrorResponse};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi};

use crate::error::TaskResult;
use crate::models::{DueStatus, ExecutionSummary};
use crate::repository::TaskStore;
use crate::service::{self, ResetService};

/// OpenAPI documentation for the reset trigger
#[derive(OpenApi)]
#[openapi(
    paths(trigger_reset, due_status),
    components(schemas(ExecutionSummary, DueStatus, ErrorResponse)),
    tags(
        (name = "recurring-tasks", description = "Daily reset of completed recurring tasks")
    )
)]
pub struct ResetApiDoc;

#[derive(Debug, Deserialize, IntoParams)]
pub struct StatusQuery {
    /// Day to report on; defaults to today (UTC)
    pub date: Option<NaiveDate>,
}

/// Run the daily reset now
#[utoipa::path(
    post,
    path = "/reset",
    tag = "recurring-tasks",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Run completed", body = ExecutionSummary),
        (status = 401, description = "Missing or invalid trigger token", body = ErrorResponse),
        (status = 500, description = "Run failed; partial counts included", body = ExecutionSummary)
    )
)]
pub async fn trigger_reset<S: TaskStore>(
    State(service): State<Arc<ResetService<S>>>,
    headers: HeaderMap,
) -> TaskResult<impl IntoResponse> {
    let summary = service
        .trigger_reset(bearer_token(&headers), service::today())
        .await?;

    let status = if summary.success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    Ok((status, Json(summary)))
}

/// Count tasks the next reset would pick up
#[utoipa::path(
    get,
    path = "/status",
    tag = "recurring-tasks",
    params(StatusQuery),
    responses(
        (status = 200, description = "Due task counts", body = DueStatus),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn due_status<S: TaskStore>(
    State(service): State<Arc<ResetService<S>>>,
    Query(query): Query<StatusQuery>,
) -> TaskResult<Json<DueStatus>> {
    let today = query.date.unwrap_or_else(service::today);
    let status = service.due_status(today).await?;
    Ok(Json(status))
}

/// Create router for the reset trigger
pub fn router<S: TaskStore + 'static>(service: ResetService<S>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/reset", post(trigger_reset::<S>))
        .route("/status", get(due_status::<S>))
        .with_state(shared_service)
}
