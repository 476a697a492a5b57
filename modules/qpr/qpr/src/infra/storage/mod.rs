//! SeaORM storage: entities, migrations and the repository
//! implementations.

pub mod entities;
pub mod migrations;
pub mod repos;

use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use self::migrations::Migrator;

/// Connect to the configured database and bring the schema up to date.
pub async fn connect_and_migrate(url: &str) -> anyhow::Result<DatabaseConnection> {
    let db = Database::connect(url).await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}
