use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ResetExecutions::Table)
                    .if_not_exists()
                    .col(pk_uuid(ResetExecutions::Id))
                    .col(date(ResetExecutions::RunDate))
                    .col(boolean(ResetExecutions::Success))
                    .col(integer(ResetExecutions::UpdatedCount).default(0))
                    .col(integer(ResetExecutions::SkippedCount).default(0))
                    .col(json_binary(ResetExecutions::Errors).default(Expr::cust("'[]'::jsonb")))
                    .col(big_integer(ResetExecutions::DurationMs).default(0))
                    .col(boolean(ResetExecutions::TimedOut).default(false))
                    .col(
                        timestamp_with_time_zone(ResetExecutions::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reset_executions_run_date")
                    .table(ResetExecutions::Table)
                    .col(ResetExecutions::RunDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ResetExecutions::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum ResetExecutions {
    Table,
    Id,
    RunDate,
    Success,
    UpdatedCount,
    SkippedCount,
    Errors,
    DurationMs,
    TimedOut,
    CreatedAt,
}
