use sqlx::migrate::{MigrateError, Migrator};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::auth;
use crate::config::{BootstrapConfig, DatabaseConfig};
use crate::database::models::user::NewUser;
use crate::database::users;

/// Errors from the persistence layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid: {0}")]
    Invalid(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error(transparent)]
    Migration(#[from] MigrateError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Turn unique / foreign key violations into a `Conflict` carrying `message`
    pub fn from_constraint(err: sqlx::Error, message: &str) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() || db_err.is_foreign_key_violation() {
                return DatabaseError::Conflict(message.to_string());
            }
        }
        DatabaseError::Sqlx(err)
    }
}

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Open the application pool described by `config`
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, DatabaseError> {
    let options = SqliteConnectOptions::from_str(&config.url)
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connection_timeout))
        .connect_with(options)
        .await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    info!("Created database pool for: {}", config.url);
    Ok(pool)
}

/// Private in-memory database. A single long-lived connection keeps the
/// schema alive for the lifetime of the pool.
pub async fn connect_in_memory() -> Result<SqlitePool, DatabaseError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> Result<(), DatabaseError> {
    MIGRATOR.run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}

/// Process-wide initialization, run once before the server accepts requests:
/// apply migrations, then make sure the configured admin account exists.
pub async fn bootstrap(pool: &SqlitePool, config: &BootstrapConfig) -> anyhow::Result<()> {
    migrate(pool).await?;
    ensure_admin(pool, config).await?;
    Ok(())
}

/// Create the bootstrap admin if no user owns its email yet. Returns the new
/// user id when an account was created.
pub async fn ensure_admin(
    pool: &SqlitePool,
    config: &BootstrapConfig,
) -> anyhow::Result<Option<i64>> {
    if users::find_by_email(pool, &config.admin_email).await?.is_some() {
        info!("Bootstrap admin '{}' already present", config.admin_email);
        return Ok(None);
    }

    let Some(password) = config.admin_password.as_deref() else {
        warn!(
            "No ADMIN_PASSWORD configured; skipping creation of bootstrap admin '{}'",
            config.admin_email
        );
        return Ok(None);
    };

    let id = users::create_user(
        pool,
        NewUser {
            name: config.admin_name.clone(),
            email: config.admin_email.clone(),
            password_hash: auth::hash_password(password)?,
            is_admin: true,
        },
    )
    .await?;

    info!("Created bootstrap admin '{}' (id {})", config.admin_email, id);
    Ok(Some(id))
}

/// Pings the pool to ensure connectivity
pub async fn health_check(pool: &SqlitePool) -> Result<(), DatabaseError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
