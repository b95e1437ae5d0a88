use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Advertisements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Advertisements::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Advertisements::Name).string().not_null())
                    .col(
                        ColumnDef::new(Advertisements::Position)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Advertisements::Size).string_len(16).not_null())
                    .col(ColumnDef::new(Advertisements::ImageUrl).text().not_null())
                    .col(
                        ColumnDef::new(Advertisements::DestinationUrl)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Advertisements::Status)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Advertisements::StartDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Advertisements::EndDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Advertisements::Impressions)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Advertisements::Clicks)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Advertisements::Ctr)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Advertisements::Revenue)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Advertisements::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Advertisements::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Banner lookups filter on position + status
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_advertisements_position_status")
                    .table(Advertisements::Table)
                    .col(Advertisements::Position)
                    .col(Advertisements::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_advertisements_position_status")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Advertisements::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Advertisements {
    Table,
    Id,
    Name,
    Position,
    Size,
    ImageUrl,
    DestinationUrl,
    Status,
    StartDate,
    EndDate,
    Impressions,
    Clicks,
    Ctr,
    Revenue,
    CreatedAt,
    UpdatedAt,
}
