//! Listing annotation pipeline.
//!
//! Reads scraped listings, annotates each against the configured regions
//! and points of interest, and posts the interesting ones to Slack.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use nestscout::proximity::annotate_listing;
use nestscout::slack::{format_listing, SlackClient};
use nestscout::{Config, Listing};

#[derive(Parser, Debug)]
#[command(name = "annotate")]
#[command(about = "Annotate scraped listings and post them to Slack")]
struct Args {
    /// TOML file with regions, points of interest and thresholds
    #[arg(short, long)]
    config: PathBuf,

    /// JSON file holding an array of scraped listings
    #[arg(short, long)]
    listings: PathBuf,

    /// Slack bot token
    #[arg(long, env = "SLACK_TOKEN", hide_env_values = true)]
    slack_token: Option<String>,

    /// Print notifications instead of posting them
    #[arg(long)]
    dry_run: bool,

    /// Only notify listings inside a region or near a point of interest
    #[arg(long)]
    near_only: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    info!("Nestscout Annotator");
    info!("Config: {}", args.config.display());

    let config = Config::load_from_file(&args.config)?;
    let proximity = config.validate().context("Invalid config")?;

    let slack = if args.dry_run {
        None
    } else {
        let token = args
            .slack_token
            .clone()
            .context("A Slack token is required unless --dry-run is set")?;
        Some(SlackClient::new(token, config.slack.clone()))
    };

    let content = fs::read_to_string(&args.listings).context("Failed to read listings file")?;
    let listings: Vec<Listing> =
        serde_json::from_str(&content).context("Failed to parse listings file")?;
    info!("Annotating {} listings", listings.len());

    let annotated: Vec<_> = listings
        .par_iter()
        .map(|listing| (listing, annotate_listing(listing, &proximity)))
        .collect();

    let mut skipped = 0;
    let mut filtered = 0;
    let mut sent = 0;
    let mut failed = 0;

    for (listing, result) in annotated {
        let annotation = match result {
            Ok(a) => a,
            Err(e) => {
                warn!(
                    "Skipping listing {}: {}",
                    listing.id.as_deref().unwrap_or(&listing.url),
                    e
                );
                skipped += 1;
                continue;
            }
        };

        if args.near_only && !annotation.is_interesting() {
            filtered += 1;
            continue;
        }

        let text = format_listing(listing, &annotation);
        match &slack {
            None => {
                println!("{}", text);
                sent += 1;
            }
            Some(client) => match client.post_message(&text).await {
                Ok(()) => sent += 1,
                Err(e) => {
                    warn!("Notification failed for {}: {}", listing.url, e);
                    failed += 1;
                }
            },
        }
    }

    info!(
        "Done: {} notified, {} filtered, {} skipped, {} failed",
        sent, filtered, skipped, failed
    );

    Ok(())
}
