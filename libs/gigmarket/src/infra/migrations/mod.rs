//! Schema migrations, applied at startup and by the test harness.

use sea_orm_migration::{MigrationTrait, MigratorTrait};

mod m20250901_000001_create_users;
mod m20250901_000002_create_offers;
mod m20250901_000003_create_orders;
mod m20250901_000004_create_reviews;

pub struct Migrator;

impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250901_000001_create_users::Migration),
            Box::new(m20250901_000002_create_offers::Migration),
            Box::new(m20250901_000003_create_orders::Migration),
            Box::new(m20250901_000004_create_reviews::Migration),
        ]
    }
}
