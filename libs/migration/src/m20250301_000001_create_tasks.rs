use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Stored value of `MEDIUM`; priorities are integers so they sort by rank.
const DEFAULT_PRIORITY: i32 = 1;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tasks::Table)
                    .if_not_exists()
                    .col(pk_auto(Tasks::Id))
                    .col(string(Tasks::Title))
                    .col(text_null(Tasks::Description))
                    .col(integer(Tasks::Priority).default(DEFAULT_PRIORITY))
                    .col(string_null(Tasks::Category))
                    .col(text_null(Tasks::Tags))
                    .col(timestamp_with_time_zone_null(Tasks::DueDate))
                    .col(boolean(Tasks::Completed).default(false))
                    .col(timestamp_with_time_zone_null(Tasks::CompletedAt))
                    .col(
                        timestamp_with_time_zone(Tasks::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Tasks::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Matches the list ordering
        manager
            .create_index(
                Index::create()
                    .name("idx_tasks_listing")
                    .table(Tasks::Table)
                    .col(Tasks::Completed)
                    .col(Tasks::Priority)
                    .col(Tasks::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tasks_category")
                    .table(Tasks::Table)
                    .col(Tasks::Category)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tasks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Tasks {
    Table,
    Id,
    Title,
    Description,
    Priority,
    Category,
    Tags,
    DueDate,
    Completed,
    CompletedAt,
    CreatedAt,
    UpdatedAt,
}
