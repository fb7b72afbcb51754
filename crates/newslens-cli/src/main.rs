mod commands;

use anyhow::Context;
use clap::{Parser, Subcommand};
use newslens_core::StageSet;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "newslens")]
#[command(about = "Search headlines and enrich articles from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search headlines, enriching the leading results
    Search {
        /// Free-text query; omit for the front page
        query: Option<String>,

        /// Two-letter language code (defaults to the configured language)
        #[arg(long)]
        language: Option<String>,

        /// Results per page (1-100)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
        page_size: Option<u32>,

        /// Page number, starting at 1
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,

        /// Comma-separated stages: summary, sentiment, category
        #[arg(long, value_parser = parse_stages)]
        stages: Option<StageSet>,

        /// How many leading results to enrich
        #[arg(long)]
        enrich_top: Option<usize>,
    },
    /// Enrich a single article by URL
    Enrich {
        url: String,

        /// Comma-separated stages (defaults to all)
        #[arg(long, value_parser = parse_stages)]
        stages: Option<StageSet>,
    },
}

fn parse_stages(raw: &str) -> Result<StageSet, String> {
    StageSet::parse_list(raw).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = newslens_core::load_app_config().context("loading configuration")?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Search {
            query,
            language,
            page_size,
            page,
            stages,
            enrich_top,
        } => {
            let args = commands::SearchArgs {
                query,
                language,
                page_size,
                page,
                stages: stages.unwrap_or_default(),
                enrich_top,
            };
            commands::run_search(&config, args).await
        }
        Commands::Enrich { url, stages } => {
            commands::run_enrich(&config, &url, stages.unwrap_or_else(StageSet::all)).await
        }
    }
}
