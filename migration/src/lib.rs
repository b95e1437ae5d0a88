pub use sea_orm_migration::prelude::*;

pub mod entities;
mod m20250301_000001_advertisements;
mod m20250301_000002_news_articles;
mod m20250301_000003_users;
mod m20250301_000004_site_settings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_advertisements::Migration),
            Box::new(m20250301_000002_news_articles::Migration),
            Box::new(m20250301_000003_users::Migration),
            Box::new(m20250301_000004_site_settings::Migration),
        ]
    }
}
