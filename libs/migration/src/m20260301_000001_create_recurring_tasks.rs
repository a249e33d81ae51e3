use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(RecurrenceUnit::Enum)
                    .values([
                        RecurrenceUnit::Day,
                        RecurrenceUnit::Week,
                        RecurrenceUnit::Month,
                        RecurrenceUnit::Year,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(TaskState::Enum)
                    .values([TaskState::Pending, TaskState::Completed])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RecurringTasks::Table)
                    .if_not_exists()
                    .col(pk_uuid(RecurringTasks::Id))
                    .col(string(RecurringTasks::Title))
                    .col(boolean(RecurringTasks::Repeats).default(false))
                    .col(
                        ColumnDef::new(RecurringTasks::RecurrenceUnit)
                            .enumeration(
                                RecurrenceUnit::Enum,
                                [
                                    RecurrenceUnit::Day,
                                    RecurrenceUnit::Week,
                                    RecurrenceUnit::Month,
                                    RecurrenceUnit::Year,
                                ],
                            )
                            .null(),
                    )
                    .col(integer(RecurringTasks::RecurrenceInterval).default(1))
                    .col(json_binary(RecurringTasks::Weekdays).default(Expr::cust("'[]'::jsonb")))
                    .col(integer_null(RecurringTasks::RemainingOccurrences))
                    .col(
                        ColumnDef::new(RecurringTasks::State)
                            .enumeration(TaskState::Enum, [TaskState::Pending, TaskState::Completed])
                            .not_null()
                            .default("pending"),
                    )
                    .col(date_null(RecurringTasks::DueDate))
                    .col(date_null(RecurringTasks::StartDate))
                    .col(date_null(RecurringTasks::EndDate))
                    .col(
                        timestamp_with_time_zone(RecurringTasks::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(RecurringTasks::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Serves the daily selection: state = completed, ordered by due date
        manager
            .create_index(
                Index::create()
                    .name("idx_recurring_tasks_state_due_date")
                    .table(RecurringTasks::Table)
                    .col(RecurringTasks::State)
                    .col(RecurringTasks::DueDate)
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER recurring_tasks_touch_updated_at
                    BEFORE UPDATE ON recurring_tasks
                    FOR EACH ROW
                    EXECUTE FUNCTION util.touch_updated_at()
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                "DROP TRIGGER IF EXISTS recurring_tasks_touch_updated_at ON recurring_tasks",
            )
            .await?;

        manager
            .drop_table(Table::drop().table(RecurringTasks::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(TaskState::Enum).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(RecurrenceUnit::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum RecurringTasks {
    Table,
    Id,
    Title,
    Repeats,
    RecurrenceUnit,
    RecurrenceInterval,
    Weekdays,
    RemainingOccurrences,
    State,
    DueDate,
    StartDate,
    EndDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum RecurrenceUnit {
    #[sea_orm(iden = "recurrence_unit")]
    Enum,
    Day,
    Week,
    Month,
    Year,
}

#[derive(DeriveIden)]
enum TaskState {
    #[sea_orm(iden = "task_state")]
    Enum,
    Pending,
    Completed,
}
