use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tracing::{info, instrument};
use crate::configuration::DatabaseSettings;
use crate::migration::Migrator;

#[instrument(skip(settings))]
pub async fn init_db(settings: &DatabaseSettings) -> anyhow::Result<DatabaseConnection> {
    info!("configuring database connection...");

    let mut options = ConnectOptions::new(settings.url.clone());
    options
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .connect_timeout(settings.connect_timeout)
        .acquire_timeout(settings.connect_timeout)
        .sqlx_logging(settings.sqlx_logging);

    info!("connecting to database...");
    let db = Database::connect(options).await?;
    info!("database connected");

    info!("running database migrations...");
    Migrator::up(&db, None).await?;
    info!("migrations complete");

    Ok(db)
}
