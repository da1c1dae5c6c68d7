use sea_orm_migration::prelude::*;

mod m20250601_000001_create_addresses;
mod m20250601_000002_create_managers;
mod m20250601_000003_create_interns;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_addresses::Migration),
            Box::new(m20250601_000002_create_managers::Migration),
            Box::new(m20250601_000003_create_interns::Migration),
        ]
    }
}
