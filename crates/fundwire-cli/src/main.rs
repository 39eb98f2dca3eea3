use clap::{Parser, Subcommand};

mod export;
mod publish;
mod run;

#[derive(Debug, Parser)]
#[command(name = "fundwire")]
#[command(about = "Funding announcement ingest and republish")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch watched timelines, validate/rewrite new posts, and merge them
    /// into the snapshot.
    Run,
    /// Post every not-yet-published snapshot record to WordPress.
    Publish,
    /// Write the dashboard rows derived from the snapshot.
    Export {
        /// Output path for the dashboard JSON.
        #[arg(long, default_value = "./dashboard.json")]
        output: std::path::PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = fundwire_core::load_app_config()?;
    init_tracing(&config.log_level);
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Run => run::execute(&config).await,
        Commands::Publish => publish::execute(&config).await,
        Commands::Export { output } => export::execute(&config, &output),
    }
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level.to_owned()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
