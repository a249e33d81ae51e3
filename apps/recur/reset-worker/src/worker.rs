//! Wiring of the reset service into its three triggers: one-shot, cron and HTTP

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use axum_helpers::{TriggerToken, create_app, create_router, health_router, shutdown_signal};
use core_config::{AppInfo, server::ServerConfig};
use database::postgres::check_health;
use domain_recurring_tasks::{
    handlers, PgExecutionLogger, PgTaskStore, ResetApiDoc, ResetExecutor, ResetOptions,
    ResetService,
};
use eyre::Result;
use sea_orm::DatabaseConnection;
use serde_json::json;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info, warn};

use crate::config::ResetConfig;

pub type Service = ResetService<PgTaskStore>;

/// Assemble the Postgres-backed reset service from configuration
pub fn build_service(db: DatabaseConnection, reset: &ResetConfig) -> Service {
    let mut executor = ResetExecutor::new(Arc::new(PgTaskStore::new(db.clone()))).with_options(
        ResetOptions {
            deadline: reset.deadline,
            concurrency: reset.concurrency,
        },
    );

    if reset.audit_log {
        executor = executor.with_logger(Arc::new(PgExecutionLogger::new(db)));
    }

    let service = ResetService::new(executor);
    match &reset.trigger_token {
        Some(token) => service.with_token(TriggerToken::new(token)),
        None => service,
    }
}

/// Run the reset on `cron_expr` (UTC) until the process is asked to stop
pub async fn run_scheduled(service: Service, cron_expr: &str) -> Result<()> {
    info!(cron = cron_expr, "Starting scheduled reset");

    let mut sched = JobScheduler::new().await?;

    let job = Job::new_async(cron_expr, move |_uuid, _l| {
        let service = service.clone();

        Box::pin(async move {
            info!("Running scheduled reset");

            let summary = service.run(domain_recurring_tasks::service::today()).await;
            if summary.success {
                info!(
                    updated = summary.updated_count,
                    skipped = summary.skipped_count,
                    "Scheduled reset complete"
                );
            } else {
                error!(
                    updated = summary.updated_count,
                    errors = summary.errors.len(),
                    "Scheduled reset finished with errors"
                );
            }
        })
    })?;

    sched.add(job).await?;
    sched.start().await?;

    info!("Scheduler started, waiting for jobs...");
    shutdown_signal().await;

    sched.shutdown().await?;
    info!("Scheduler stopped");
    Ok(())
}

/// Full HTTP surface: reset trigger, status, OpenAPI, health, readiness and metrics
pub fn build_router(service: Service, db: DatabaseConnection, app: AppInfo) -> Router {
    create_router::<ResetApiDoc>(handlers::router(service))
        .merge(health_router(app))
        .merge(ready_router(db))
        .merge(observability::metrics_router())
}

/// Serve the HTTP trigger until shutdown
pub async fn serve(
    service: Service,
    db: DatabaseConnection,
    app: AppInfo,
    server: &ServerConfig,
    token_configured: bool,
) -> Result<()> {
    if !token_configured {
        warn!("RESET_TRIGGER_TOKEN is not set; POST /reset accepts any caller");
    }

    let router = build_router(service, db.clone(), app);
    create_app(router, server).await?;

    match db.close().await {
        Ok(_) => info!("PostgreSQL connection closed successfully"),
        Err(e) => error!("Error closing PostgreSQL: {}", e),
    }

    Ok(())
}

fn ready_router(db: DatabaseConnection) -> Router {
    Router::new()
        .route("/ready", get(ready_handler))
        .with_state(db)
}

/// Readiness: 200 only while the database answers
async fn ready_handler(State(db): State<DatabaseConnection>) -> Response {
    match check_health(&db).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ready", "checks": { "database": "ok" } })),
        )
            .into_response(),
        Err(e) => {
            warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable", "checks": { "database": e.to_string() } })),
            )
                .into_response()
        }
    }
}
