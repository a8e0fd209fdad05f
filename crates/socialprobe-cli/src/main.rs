mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use socialprobe_core::{supported_platforms, ProfileResult};
use socialprobe_scraper::ProfileScraper;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "socialprobe")]
#[command(about = "Scrape public social media profile statistics")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape the profile a URL points at
    Scrape {
        url: String,
        /// Print the raw result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Scrape a handle on a named platform (instagram, twitter, youtube, linkedin)
    Profile {
        platform: String,
        handle: String,
        #[arg(long)]
        json: bool,
    },
    /// List supported platforms
    Platforms {
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Platforms { json } => {
            print!("{}", platforms_listing(json)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Scrape { url, json } => {
            let scraper = init_scraper().await?;
            if !json {
                println!("Scraping: {url}");
            }
            tracing::info!(url = %url, "scraping by URL");
            let result = scraper.scrape_url(&url).await;
            report(&result, json)
        }
        Commands::Profile {
            platform,
            handle,
            json,
        } => {
            let scraper = init_scraper().await?;
            tracing::info!(platform = %platform, handle = %handle, "scraping by platform key");
            let result = scraper.scrape_profile(&platform, &handle).await?;
            report(&result, json)
        }
    }
}

/// Platform list output. Needs no configuration.
fn platforms_listing(json: bool) -> anyhow::Result<String> {
    if json {
        Ok(format!(
            "{}\n",
            serde_json::to_string_pretty(supported_platforms())?
        ))
    } else {
        Ok(output::format_platforms(supported_platforms()))
    }
}

/// Loads configuration, starts logging to stderr and builds the scraper.
async fn init_scraper() -> anyhow::Result<ProfileScraper> {
    let config = socialprobe_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let scraper = ProfileScraper::from_config(&config).await?;
    tracing::info!(renderer = scraper.has_renderer(), "scraper ready");
    Ok(scraper)
}

fn report(result: &ProfileResult, json: bool) -> anyhow::Result<ExitCode> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        print!("{}", output::format_profile(result));
    }
    Ok(if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
