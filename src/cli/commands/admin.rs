use clap::Subcommand;
use serde_json::json;
use sqlx::SqlitePool;

use crate::auth;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::database::models::NewUser;
use crate::database::{manager, users};

#[derive(Subcommand)]
pub enum AdminCommands {
    #[command(about = "List all users with their admin flag")]
    List,

    #[command(about = "Create a new admin account")]
    Create {
        #[arg(long, help = "Login email")]
        email: String,

        #[arg(long, help = "Display name", default_value = "Admin")]
        name: String,

        #[arg(long, help = "Password (at least 6 characters)")]
        password: String,
    },

    #[command(about = "Grant admin rights to an existing account")]
    Promote {
        #[arg(long, help = "Email of the account to promote")]
        email: String,
    },
}

pub async fn handle(
    pool: &SqlitePool,
    cmd: AdminCommands,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    manager::migrate(pool).await?;

    match cmd {
        AdminCommands::List => {
            let users = users::list_users(pool).await?;

            if users.is_empty() {
                return output_empty_collection(&output_format, "users", "No users found");
            }

            match output_format {
                OutputFormat::Json => {
                    let users: Vec<_> = users
                        .iter()
                        .map(|u| {
                            json!({
                                "id": u.id,
                                "name": u.name,
                                "email": u.email,
                                "is_admin": u.is_admin,
                                "created_at": u.created_at,
                            })
                        })
                        .collect();
                    println!("{}", serde_json::to_string_pretty(&json!({ "users": users }))?);
                }
                OutputFormat::Text => {
                    println!("{:<6} {:<30} {:<20} {:<6} {}", "ID", "EMAIL", "NAME", "ADMIN", "CREATED");
                    println!("{}", "-".repeat(82));

                    for user in &users {
                        let admin_marker = if user.is_admin { "yes" } else { "no" };
                        println!(
                            "{:<6} {:<30} {:<20} {:<6} {}",
                            user.id,
                            user.email,
                            user.name,
                            admin_marker,
                            user.created_at.format("%Y-%m-%d %H:%M")
                        );
                    }
                }
            }

            Ok(())
        }
        AdminCommands::Create { email, name, password } => {
            if password.chars().count() < auth::MIN_PASSWORD_LEN {
                anyhow::bail!(
                    "Password must be at least {} characters",
                    auth::MIN_PASSWORD_LEN
                );
            }

            let id = users::create_user(
                pool,
                NewUser {
                    name,
                    email: email.clone(),
                    password_hash: auth::hash_password(&password)?,
                    is_admin: true,
                },
            )
            .await?;

            output_success(
                &output_format,
                &format!("Created admin account '{}'", users::normalize_email(&email)),
                Some(json!({ "id": id })),
            )
        }
        AdminCommands::Promote { email } => {
            if !users::set_admin(pool, &email, true).await? {
                anyhow::bail!("No user with email '{}'", email);
            }

            output_success(
                &output_format,
                &format!("Granted admin rights to '{}'", users::normalize_email(&email)),
                None,
            )
        }
    }
}
