use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(NewsArticles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NewsArticles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(NewsArticles::Title).text().not_null())
                    .col(ColumnDef::new(NewsArticles::OriginalTitle).text().null())
                    .col(ColumnDef::new(NewsArticles::Content).text().not_null())
                    .col(ColumnDef::new(NewsArticles::Summary).text().null())
                    .col(ColumnDef::new(NewsArticles::ImageUrl).text().null())
                    .col(
                        ColumnDef::new(NewsArticles::PublishedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(NewsArticles::Source).string().not_null())
                    .col(
                        ColumnDef::new(NewsArticles::Category)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(NewsArticles::Slug)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(NewsArticles::Tags).text().not_null())
                    .col(ColumnDef::new(NewsArticles::Url).text().null())
                    .col(
                        ColumnDef::new(NewsArticles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(NewsArticles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_news_articles_published_at")
                    .table(NewsArticles::Table)
                    .col(NewsArticles::PublishedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_news_articles_published_at")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(NewsArticles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum NewsArticles {
    Table,
    Id,
    Title,
    OriginalTitle,
    Content,
    Summary,
    ImageUrl,
    PublishedAt,
    Source,
    Category,
    Slug,
    Tags,
    Url,
    CreatedAt,
    UpdatedAt,
}
