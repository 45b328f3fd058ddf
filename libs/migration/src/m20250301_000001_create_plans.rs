use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Plans::Table)
                    .if_not_exists()
                    .col(pk_uuid(Plans::Id))
                    .col(string(Plans::Name))
                    .col(text(Plans::Description).default(""))
                    .col(big_integer(Plans::PriceCents))
                    .col(char_len(Plans::Currency, 3))
                    .col(integer(Plans::DurationDays))
                    .col(boolean(Plans::Deleted).default(false))
                    .col(
                        timestamp_with_time_zone(Plans::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Plans::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_plans_name")
                    .table(Plans::Table)
                    .col(Plans::Name)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Plans::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Plans {
    Table,
    Id,
    Name,
    Description,
    PriceCents,
    Currency,
    DurationDays,
    Deleted,
    CreatedAt,
    UpdatedAt,
}
