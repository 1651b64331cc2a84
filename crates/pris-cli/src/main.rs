mod mission;
mod report;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "pris-cli")]
#[command(about = "PRIS rumor-intelligence command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the full pipeline: collect, analyze, store, evaluate, alert
    Mission {
        /// Search query sent to the news source (defaults to the configured query)
        #[arg(long)]
        query: Option<String>,

        /// Preview what would run without touching the network or the database
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the daily-summary ledger and the current trend verdict
    Status,
    /// Generate a markdown intelligence report
    Report,
    /// Export the analyzed-signal table as CSV
    Export {
        /// Output file path
        #[arg(long, default_value = "data/analyzed_signals.csv")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = pris_core::load_app_config()?;

    let pool_config = pris_db::PoolConfig::from_app_config(&config);
    let pool = pris_db::connect_pool(&config.database_url, pool_config).await?;
    pris_db::run_migrations(&pool).await?;

    match cli.command {
        Commands::Mission { query, dry_run } => {
            mission::run_mission_command(&pool, &config, query.as_deref(), dry_run).await
        }
        Commands::Status => report::run_status(&pool).await,
        Commands::Report => report::run_report(&pool).await,
        Commands::Export { output } => report::run_export(&pool, &output).await,
    }
}
