//! CLI administration tool for utm-tracker.
//!
//! Provides commands for managing tracking links, viewing statistics, and
//! performing database operations without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Create a tracking link
//! cargo run --bin admin -- link create --video-id abc123 --url https://example.com/page
//!
//! # List links
//! cargo run --bin admin -- link list
//!
//! # Deactivate a link
//! cargo run --bin admin -- link deactivate 42
//!
//! # Delete a link and its click history
//! cargo run --bin admin -- link delete 42
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use utm_tracker::application::services::{CreateLinkCommand, LinkService};
use utm_tracker::infrastructure::persistence::PgLinkRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing utm-tracker.
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
    /// Manage tracking links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Create a tracking link
    Create {
        /// Video identifier the link is attributed to
        #[arg(short, long)]
        video_id: Option<String>,

        /// Destination URL
        #[arg(short, long)]
        url: Option<String>,

        /// Custom pretty slug (auto-generated if not provided)
        #[arg(short, long)]
        slug: Option<String>,

        /// UTM campaign override (defaults to the video id)
        #[arg(short, long)]
        campaign: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List tracking links
    List {
        /// Filter by video id
        #[arg(short, long)]
        video_id: Option<String>,
    },

    /// Deactivate a link so its slug stops resolving
    Deactivate {
        /// Link id
        id: i64,
    },

    /// Delete a link and all of its click history
    Delete {
        /// Link id
        id: i64,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, pool: &PgPool) -> Result<()> {
    let service = LinkService::new(Arc::new(PgLinkRepository::new(Arc::new(pool.clone()))));

    match action {
        LinkAction::Create {
            video_id,
            url,
            slug,
            campaign,
            yes,
        } => {
            create_link(service, video_id, url, slug, campaign, yes).await?;
        }
        LinkAction::List { video_id } => {
            list_links(service, video_id).await?;
        }
        LinkAction::Deactivate { id } => {
            deactivate_link(service, id).await?;
        }
        LinkAction::Delete { id } => {
            delete_link(service, id).await?;
        }
    }

    Ok(())
}

/// Creates a tracking link with interactive prompts.
async fn create_link(
    service: LinkService<PgLinkRepository>,
    video_id: Option<String>,
    url: Option<String>,
    slug: Option<String>,
    campaign: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔗 Create Tracking Link".bright_blue().bold());
    println!();

    let video_id = match video_id {
        Some(v) => v,
        None => Input::new().with_prompt("Video id").interact_text()?,
    };

    let url = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("Destination URL")
            .with_initial_text("https://")
            .interact_text()?,
    };

    println!();
    println!("{}", "Link details:".bright_white().bold());
    println!("  Video:       {}", video_id.cyan());
    println!("  Destination: {}", url.cyan());
    if let Some(ref s) = slug {
        println!("  Slug:        {}", s.bright_yellow());
    } else {
        println!("  Slug:        {}", "(auto-generated)".bright_black());
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this link?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let link = service
        .create_tracking_link(CreateLinkCommand {
            video_id,
            destination_url: url,
            utm_source: None,
            utm_medium: None,
            utm_campaign: campaign,
            utm_content: None,
            utm_term: None,
            slug_candidate: slug,
            allocate_slug: true,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!();
    println!("{}", "✅ Link created successfully!".green().bold());
    println!();
    println!("  Id:           {}", link.id.to_string().bright_white().bold());
    println!(
        "  Slug:         {}",
        link.pretty_slug
            .as_deref()
            .unwrap_or("(none)")
            .bright_yellow()
            .bold()
    );
    println!("  Tracking URL: {}", link.tracking_url.bright_cyan());
    println!();

    Ok(())
}

/// Lists tracking links with status indicators.
async fn list_links(
    service: LinkService<PgLinkRepository>,
    video_id: Option<String>,
) -> Result<()> {
    println!("{}", "📋 Tracking Links".bright_blue().bold());
    println!();

    let links = service
        .list_links(video_id.as_deref(), 0, 100)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        println!(
            "  Create one with: {} admin link create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<5} {:<14} {:<12} {:<20} {:<8}",
        "ID".bright_white().bold(),
        "Video".bright_white().bold(),
        "Slug".bright_white().bold(),
        "Created".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(70).bright_black());

    for link in &links {
        let status = if link.is_active {
            "ACTIVE".green()
        } else {
            "INACTIVE".red()
        };

        println!(
            "  {:<5} {:<14} {:<12} {:<20} {}",
            link.id.to_string().bright_black(),
            link.video_id.cyan(),
            link.pretty_slug.as_deref().unwrap_or("-").bright_yellow(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            status
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Deactivates a link with confirmation prompt.
async fn deactivate_link(service: LinkService<PgLinkRepository>, id: i64) -> Result<()> {
    println!("{}", "🔒 Deactivate Tracking Link".bright_blue().bold());
    println!();

    let link = service
        .get_link(id)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    if !link.is_active {
        println!("{}", "⚠️  This link is already inactive".yellow());
        return Ok(());
    }

    println!("  Id:    {}", link.id.to_string().bright_black());
    println!("  Video: {}", link.video_id.cyan());
    println!(
        "  Slug:  {}",
        link.pretty_slug.as_deref().unwrap_or("-").bright_yellow()
    );
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Deactivate this link?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    service
        .deactivate_link(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to deactivate link: {}", e))?;

    println!();
    println!("{}", "✅ Link deactivated!".green().bold());
    println!();

    Ok(())
}

/// Deletes a link and its click history with confirmation prompt.
async fn delete_link(service: LinkService<PgLinkRepository>, id: i64) -> Result<()> {
    println!("{}", "🗑  Delete Tracking Link".bright_blue().bold());
    println!();

    let link = service
        .get_link(id)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("  Id:    {}", link.id.to_string().bright_black());
    println!("  Video: {}", link.video_id.cyan());
    println!();
    println!(
        "{}",
        "⚠️  This permanently removes the link AND all of its click history."
            .red()
            .bold()
    );
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Delete this link?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    service
        .delete_link(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    println!();
    println!("{}", "✅ Link deleted!".green().bold());
    println!();

    Ok(())
}

/// Displays system statistics.
///
/// Shows:
/// - Total number of tracking links (active / total)
/// - Total number of recorded clicks
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tracking_links")
        .fetch_one(pool)
        .await?;

    let active_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM tracking_links WHERE is_active")
            .fetch_one(pool)
            .await?;

    let clicks_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM link_clicks")
        .fetch_one(pool)
        .await?;

    println!(
        "  Links:        {} ({} active)",
        links_count.to_string().bright_green().bold(),
        active_count.to_string().green()
    );
    println!(
        "  Clicks:       {}",
        clicks_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
