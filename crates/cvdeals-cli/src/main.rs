use clap::{Parser, Subcommand};

mod collect;

#[derive(Debug, Parser)]
#[command(name = "cvdeals")]
#[command(about = "Convenience-store promotion snapshot collector")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Collect event goods from the configured retailers and write dated
    /// CSV snapshots.
    Collect {
        /// Only collect the retailer with this slug (e.g. "emart24").
        #[arg(long)]
        brand: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = cvdeals_core::load_app_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Collect { brand } => collect::run(&config, brand.as_deref()).await,
    }
}
