//! CLI administration tool for url-shortener.
//!
//! Manages stored URLs directly against the database, without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL with a generated alias
//! cargo run --bin admin -- url create https://example.com
//!
//! # Shorten a URL under a chosen alias
//! cargo run --bin admin -- url create https://example.com --alias promo
//!
//! # Show what an alias points to
//! cargo run --bin admin -- url show promo
//!
//! # Delete an alias
//! cargo run --bin admin -- url delete promo
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: PostgreSQL connection string, or `DB_HOST`/`DB_PORT`/
//!   `DB_USER`/`DB_PASSWORD`/`DB_NAME`
//! - `ALIAS_LENGTH`, `ALIAS_MAX_ATTEMPTS`, `REGISTRY_TIMEOUT_MS`: same meaning
//!   and limits as for the server

use url_shortener::api::dto::save::SaveRequest;
use url_shortener::application::services::{UrlService, UrlServiceError};
use url_shortener::config::{self, Config};
use url_shortener::domain::repositories::{RegistryError, UrlRepository};
use url_shortener::infrastructure::persistence::PgUrlRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;
use validator::Validate;

/// CLI tool for managing url-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage stored URLs
    Url {
        #[command(subcommand)]
        action: UrlAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// URL management subcommands.
#[derive(Subcommand)]
enum UrlAction {
    /// Store a URL under a new alias
    Create {
        /// Destination URL
        url: String,

        /// Alias to use instead of a generated one
        #[arg(short, long)]
        alias: Option<String>,
    },

    /// Show the record stored under an alias
    Show { alias: String },

    /// Delete an alias
    Delete {
        alias: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url().context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Url { action } => handle_url_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches URL management commands.
async fn handle_url_action(action: UrlAction, pool: &PgPool) -> Result<()> {
    let repo: Arc<dyn UrlRepository> = Arc::new(PgUrlRepository::new(Arc::new(pool.clone())));
    let settings = config::service_settings_from_env().context("Invalid alias settings")?;

    match action {
        UrlAction::Create { url, alias } => {
            let service = UrlService::new(repo, settings);
            create_url(&service, url, alias).await?;
        }
        UrlAction::Show { alias } => show_url(repo.as_ref(), &alias).await?,
        UrlAction::Delete { alias, yes } => {
            let service = UrlService::new(repo.clone(), settings);
            delete_url(repo.as_ref(), &service, &alias, yes).await?;
        }
    }

    Ok(())
}

/// Validates and stores a URL, printing the alias it was stored under.
async fn create_url(service: &UrlService, url: String, alias: Option<String>) -> Result<()> {
    println!("{}", "🔗 Create short URL".bright_blue().bold());
    println!();

    let request = SaveRequest { url, alias };
    if let Err(errors) = request.validate() {
        for (field, _) in errors.field_errors() {
            println!("  {} {}", "✗".red(), format!("{field} is not valid").red());
        }
        anyhow::bail!("Invalid input");
    }

    let alias = match service.create(&request.url, request.alias.as_deref()).await {
        Ok(alias) => alias,
        Err(UrlServiceError::AliasExists) => anyhow::bail!("Alias is already taken"),
        Err(UrlServiceError::GeneratorExhausted { attempts }) => {
            anyhow::bail!("No free alias found after {attempts} attempts")
        }
        Err(e) => return Err(anyhow::anyhow!("Failed to create url: {}", e)),
    };

    println!("{}", "✅ URL stored".green().bold());
    println!("  Alias: {}", alias.bright_yellow().bold());
    println!("  URL:   {}", request.url.cyan());
    println!();

    Ok(())
}

/// Prints the record stored under `alias`.
async fn show_url(repo: &dyn UrlRepository, alias: &str) -> Result<()> {
    let record = match repo.find(alias).await {
        Ok(record) => record,
        Err(RegistryError::NotFound) => {
            println!("{}", "⚠️  Alias not found".yellow());
            return Ok(());
        }
        Err(e) => return Err(anyhow::anyhow!("Database error: {}", e)),
    };

    println!("  ID:      {}", record.id.to_string().bright_black());
    println!("  Alias:   {}", record.alias.bright_yellow());
    println!("  URL:     {}", record.url.cyan());
    println!(
        "  Created: {}",
        record
            .created_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black()
    );
    println!();

    Ok(())
}

/// Deletes `alias` after showing the record and asking for confirmation.
async fn delete_url(
    repo: &dyn UrlRepository,
    service: &UrlService,
    alias: &str,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🗑️  Delete short URL".bright_blue().bold());
    println!();

    let record = match repo.find(alias).await {
        Ok(record) => record,
        Err(RegistryError::NotFound) => {
            println!("{}", "⚠️  Alias not found".yellow());
            return Ok(());
        }
        Err(e) => return Err(anyhow::anyhow!("Database error: {}", e)),
    };

    println!("  Alias: {}", record.alias.bright_yellow());
    println!("  URL:   {}", record.url.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this alias?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    match service.delete(alias).await {
        // Removed concurrently between lookup and delete.
        Ok(_) | Err(UrlServiceError::NotFound) => {}
        Err(e) => return Err(anyhow::anyhow!("Failed to delete url: {}", e)),
    }

    println!("{}", "✅ Alias deleted".green().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            let records: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url")
                .fetch_one(pool)
                .await
                .context("Table `url` is missing; start the server once to run migrations")?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  Stored URLs: {}", records.to_string().bright_green().bold());
        }
    }

    Ok(())
}
