use sqlx::SqlitePool;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::database::manager;

pub async fn handle(pool: &SqlitePool, output_format: OutputFormat) -> anyhow::Result<()> {
    manager::migrate(pool).await?;
    output_success(&output_format, "Database schema is up to date", None)
}
