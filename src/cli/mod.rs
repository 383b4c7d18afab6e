pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use sqlx::SqlitePool;

use crate::config;
use crate::database::manager;

#[derive(Parser)]
#[command(name = "shop")]
#[command(about = "Shop CLI - database and admin account management for the shop API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, help = "Database URL (defaults to DATABASE_URL / config)")]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Apply pending database migrations")]
    Migrate,

    #[command(about = "Admin account management")]
    Admin {
        #[command(subcommand)]
        cmd: commands::admin::AdminCommands,
    },
}

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Open the pool the server would use, honoring `--database-url`
async fn connect(cli: &Cli) -> anyhow::Result<SqlitePool> {
    let mut database = config::config().database.clone();
    if let Some(url) = &cli.database_url {
        database.url = url.clone();
    }
    Ok(manager::connect(&database).await?)
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let pool = connect(&cli).await?;

    match cli.command {
        Commands::Migrate => commands::migrate::handle(&pool, output_format).await,
        Commands::Admin { cmd } => commands::admin::handle(&pool, cmd, output_format).await,
    }
}
