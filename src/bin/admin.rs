//! CLI administration tool for digestlink.
//!
//! Runs the same services as the HTTP server against the configured database,
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL (digest code, or a custom alias)
//! cargo run --bin admin -- shorten https://example.com/page
//! cargo run --bin admin -- shorten https://example.com/page --alias promo2030 --ttl 86400
//!
//! # Look up a short URL
//! cargo run --bin admin -- resolve https://s.example.com/4Fz1kQ
//!
//! # Top domains
//! cargo run --bin admin -- report --count 10
//!
//! # Database tools
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db migrate
//! ```
//!
//! Reads the same environment variables as the server (see `digestlink::config`).

use digestlink::config::{self, Config, mask_connection_string};
use digestlink::server::{build_state, connect_cache, connect_pool};
use digestlink::state::AppState;
use digestlink::utils::url_normalizer::normalize_url;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing digestlink.
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
    /// Create a short URL
    Shorten {
        /// URL to shorten; a missing scheme means https
        url: String,
        /// Use this alias instead of a digest code
        #[arg(short, long)]
        alias: Option<String>,
        /// Lifetime in seconds (defaults to DEFAULT_TTL_SECONDS)
        #[arg(short, long)]
        ttl: Option<i64>,
    },

    /// Show the record behind a short URL
    Resolve {
        short_url: String,
    },

    /// Show the domains with the most aliases
    Report {
        #[arg(short, long, default_value_t = 5)]
        count: i64,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    let pool = connect_pool(&config).await?;

    let result = match cli.command {
        Commands::Db { action } => handle_db_action(action, &pool, &config.database_url).await,
        Commands::Shorten { url, alias, ttl } => {
            let state = app_state(&pool, &config).await;
            shorten(&state, &url, alias.as_deref(), ttl).await
        }
        Commands::Resolve { short_url } => {
            let state = app_state(&pool, &config).await;
            resolve(&state, &short_url).await
        }
        Commands::Report { count } => {
            let state = app_state(&pool, &config).await;
            report(&state, count).await
        }
    };

    pool.close().await;
    result
}

async fn app_state(pool: &PgPool, config: &Config) -> AppState {
    let cache = connect_cache(config.redis_url.as_deref()).await;
    build_state(Arc::new(pool.clone()), cache, config)
}

async fn shorten(state: &AppState, raw_url: &str, alias: Option<&str>, ttl: Option<i64>) -> Result<()> {
    let original = normalize_url(raw_url).context("Invalid URL")?;
    let ttl = ttl.unwrap_or(state.default_ttl_seconds);

    let record = match alias {
        Some(alias) => state.shortener.shorten_custom(&original, alias, ttl).await,
        None => state.shortener.shorten(&original, ttl).await,
    }
    .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("{}", "Short URL ready".green().bold());
    println!("  Short:   {}", record.short.as_str().bright_yellow().bold());
    println!("  Target:  {}", record.original.as_str().cyan());
    println!("  TTL:     {}s", record.ttl_seconds);

    Ok(())
}

async fn resolve(state: &AppState, short_url: &str) -> Result<()> {
    match state.storage.get(short_url).await {
        Ok(record) => {
            let status = if record.is_expired() {
                "expired".red()
            } else {
                "active".green()
            };
            println!("  Target:  {}", record.original.as_str().cyan());
            println!("  TTL:     {}s ({})", record.ttl_seconds, status);
            println!("  Created: {}", record.created_at);
            Ok(())
        }
        Err(e) if e.is_not_found() => {
            println!("{}", format!("No record for {}", short_url).yellow());
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("Lookup failed: {}", e)),
    }
}

async fn report(state: &AppState, count: i64) -> Result<()> {
    let items = state
        .reports
        .top_domains(count)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("{}", "Top domains".bright_blue().bold());
    if items.is_empty() {
        println!("  {}", "(no aliases yet)".dimmed());
    }
    for (rank, entry) in items.iter().enumerate() {
        println!(
            "  {:>3}. {:<40} {}",
            rank + 1,
            entry.domain.bright_white(),
            entry.count.to_string().cyan()
        );
    }

    Ok(())
}

/// Dispatches database operation commands.
async fn handle_db_action(action: DbAction, pool: &PgPool, database_url: &str) -> Result<()> {
    match action {
        DbAction::Check => {
            sqlx::query("SELECT 1")
                .execute(pool)
                .await
                .context("Database check failed")?;
            println!(
                "{} {}",
                "Database reachable:".green().bold(),
                mask_connection_string(database_url)
            );
        }
        DbAction::Migrate => {
            sqlx::migrate!("./migrations")
                .run(pool)
                .await
                .context("Failed to run migrations")?;
            println!("{}", "Migrations applied".green().bold());
        }
    }

    Ok(())
}
