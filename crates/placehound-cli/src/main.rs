mod search;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "placehound-cli")]
#[command(about = "Search places and collect contact details")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a text search and print every enriched place
    Search {
        /// Area to search in; blank falls back to the default location
        #[arg(long)]
        location: Option<String>,

        /// Business type or free-text keyword; blank falls back to the default
        #[arg(long)]
        keyword: Option<String>,

        /// Print `{ "results": [...] }` as pretty JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = placehound_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    // Table and JSON output own stdout.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Search {
            location,
            keyword,
            json,
        } => search::run_search(&config, location.as_deref(), keyword.as_deref(), json).await,
    }
}

#[cfg(test)]
mod tests;
