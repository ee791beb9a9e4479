use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod search;

#[derive(Debug, Parser)]
#[command(name = "nearby")]
#[command(about = "Search a local-business directory from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search for businesses, paginate, and print the (optionally filtered) list.
    Search(search::SearchArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = nearby_core::config::load_app_config_from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Search(args) => search::run(args, &config).await,
    }
}
