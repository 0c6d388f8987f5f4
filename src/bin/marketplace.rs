use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use marketplace_api::auth::{self, Role};
use marketplace_api::database::DatabaseManager;

#[derive(Parser)]
#[command(name = "marketplace", about = "Operator tasks for the marketplace API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the initial ADMIN account
    AdminCreate {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Toggle site-wide maintenance mode
    Maintenance {
        /// "on" or "off"
        #[arg(value_parser = ["on", "off"])]
        state: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::AdminCreate {
            email,
            username,
            password,
        } => admin_create(&email, &username, &password).await,
        Commands::Maintenance { state } => set_maintenance(state == "on").await,
    }
}

async fn admin_create(email: &str, username: &str, password: &str) -> Result<()> {
    if password.len() < 8 {
        bail!("password must be at least 8 characters");
    }

    let pool = DatabaseManager::pool().await.context("database connection")?;

    let duplicate: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM users WHERE email = $1 OR username = $2")
            .bind(email)
            .bind(username)
            .fetch_optional(&pool)
            .await?;

    if duplicate.is_some() {
        bail!("a user with that email or username already exists");
    }

    let password_hash = auth::hash_password(password).context("password hashing")?;

    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, username, password_hash, role, is_approved)
        VALUES ($1, $2, $3, $4, $5, TRUE)
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(username)
    .bind(&password_hash)
    .bind(Role::Admin.as_str())
    .fetch_one(&pool)
    .await?;

    println!("Created admin account {} ({})", username, id);
    Ok(())
}

async fn set_maintenance(on: bool) -> Result<()> {
    let pool = DatabaseManager::pool().await.context("database connection")?;

    let updated: Option<(Uuid,)> = sqlx::query_as(
        "UPDATE site_settings SET maintenance_mode = $1, updated_at = NOW() RETURNING id",
    )
    .bind(on)
    .fetch_optional(&pool)
    .await?;

    if updated.is_none() {
        sqlx::query("INSERT INTO site_settings (id, site_name, maintenance_mode) VALUES ($1, $2, $3)")
            .bind(Uuid::new_v4())
            .bind("Content Africa")
            .bind(on)
            .execute(&pool)
            .await?;
    }

    println!("Maintenance mode {}", if on { "enabled" } else { "disabled" });
    Ok(())
}
