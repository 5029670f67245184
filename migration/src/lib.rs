pub use sea_orm_migration::prelude::*;

mod m20260105_000001_create_user_table;
mod m20260105_000002_create_user_follow_table;
mod m20260105_000003_create_game_table;
mod m20260105_000004_create_game_version_table;
mod m20260105_000005_create_review_table;
mod m20260105_000006_create_cart_tables;
mod m20260105_000007_create_order_tables;
mod m20260105_000008_create_payment_table;
mod m20260105_000009_create_library_entry_table;
mod m20260105_000010_create_support_tables;
mod m20260105_000011_create_faq_table;
mod m20260105_000012_create_news_article_table;
mod m20260105_000013_create_analytics_tables;
mod m20260105_000014_create_audit_log_table;
mod m20260105_000015_create_upload_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260105_000001_create_user_table::Migration),
            Box::new(m20260105_000002_create_user_follow_table::Migration),
            Box::new(m20260105_000003_create_game_table::Migration),
            Box::new(m20260105_000004_create_game_version_table::Migration),
            Box::new(m20260105_000005_create_review_table::Migration),
            Box::new(m20260105_000006_create_cart_tables::Migration),
            Box::new(m20260105_000007_create_order_tables::Migration),
            Box::new(m20260105_000008_create_payment_table::Migration),
            Box::new(m20260105_000009_create_library_entry_table::Migration),
            Box::new(m20260105_000010_create_support_tables::Migration),
            Box::new(m20260105_000011_create_faq_table::Migration),
            Box::new(m20260105_000012_create_news_article_table::Migration),
            Box::new(m20260105_000013_create_analytics_tables::Migration),
            Box::new(m20260105_000014_create_audit_log_table::Migration),
            Box::new(m20260105_000015_create_upload_tables::Migration),
        ]
    }
}
