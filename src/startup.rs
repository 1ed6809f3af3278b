use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::Config, error::AppError, model::catalog::RoleCatalog,
    service::gateway::MessagingGateway,
};

/// Installs the log subscriber. `RUST_LOG` overrides the default `info` level.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "raidboard=info,serenity=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

/// Connects to the Sqlite database and runs pending migrations.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the reaction catalog from the configured emoji ids.
///
/// Ids are checked against the emojis of the bot's guilds. If those cannot be listed the
/// configured ids are used unchecked.
pub async fn build_catalog(config: &Config, gateway: &Arc<dyn MessagingGateway>) -> RoleCatalog {
    match gateway.registered_emoji_ids().await {
        Ok(registered) => RoleCatalog::new(&config.emote_ids, Some(&registered)),
        Err(e) => {
            tracing::warn!("Failed to list registered emojis, trusting configuration: {}", e);
            RoleCatalog::new(&config.emote_ids, None)
        }
    }
}
