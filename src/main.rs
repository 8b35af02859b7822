use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use url::Url;

mod cli;
mod config;
mod filter;
mod models;
mod notify;
mod scrapers;
mod storage;
mod utils;

use crate::cli::Cli;
use crate::config::Config;
use crate::storage::{WatermarkStore, WATERMARK_FILE};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("news_notify=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    let client = utils::http::create_client()?;
    let listing_url = Url::parse(&config.url)
        .with_context(|| format!("Invalid listing url {}", config.url))?;

    // Strictly linear pipeline: listing -> filter -> content -> email.
    let articles = scrapers::fetch_listing(&client, &listing_url).await?;
    info!("Found {} articles on listing page", articles.len());

    let store = WatermarkStore::new(WATERMARK_FILE);
    let kept = filter::apply(articles, &config.keys, &store)?;

    let kept = scrapers::fetch_contents(&client, kept).await?;

    for article in &kept {
        notify::send_article(&config, article).await?;
    }

    Ok(())
}
