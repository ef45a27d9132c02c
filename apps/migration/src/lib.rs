//! Schema migrations for the bulletin database.

pub use sea_orm_migration::prelude::*;

mod m20220319_000001_create_posts;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20220319_000001_create_posts::Migration)]
    }
}
