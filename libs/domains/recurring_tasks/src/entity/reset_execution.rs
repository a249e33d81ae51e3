use crate::models::ExecutionSummary;
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

/// Audit row written after every reset run
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reset_executions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub run_date: Date,
    pub success: bool,
    pub updated_count: i32,
    pub skipped_count: i32,
    #[sea_orm(column_type = "JsonBinary")]
    pub errors: Json,
    pub duration_ms: i64,
    pub timed_out: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&ExecutionSummary> for ActiveModel {
    fn from(summary: &ExecutionSummary) -> Self {
        ActiveModel {
            id: Set(Uuid::now_v7()),
            run_date: Set(summary.run_date),
            success: Set(summary.success),
            updated_count: Set(i32::try_from(summary.updated_count).unwrap_or(i32::MAX)),
            skipped_count: Set(i32::try_from(summary.skipped_count).unwrap_or(i32::MAX)),
            errors: Set(Json::from(summary.errors.clone())),
            duration_ms: Set(i64::try_from(summary.duration_ms).unwrap_or(i64::MAX)),
            timed_out: Set(summary.timed_out),
            created_at: Set(chrono::Utc::now().into()),
        }
    }
}
