use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use leadwatch_app::platform::config::{load_config, write_default_config, DEFAULT_CONFIG_FILENAME};
use leadwatch_app::platform::logging::{self, LogDestination};
use leadwatch_app::platform::run_app;
use leadwatch_core::{AgentQuery, Msg};

#[derive(Parser)]
#[command(name = "leadwatch")]
#[command(about = "Run lead enrichment jobs and watch their progress")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ./leadwatch.ron)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the job host base URL from the config
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch manager contacts for one or more leads
    Enrich {
        #[arg(required = true)]
        lead_ids: Vec<String>,
    },

    /// Start a lead-generation agent run
    RunAgent {
        #[arg(long)]
        industry: String,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        persona: Option<String>,
        /// Repeat for several keywords
        #[arg(long = "keyword")]
        keywords: Vec<String>,
    },

    /// Follow the job log until the console cycle cap
    Watch,

    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::initialize(LogDestination::Both, cli.verbose);

    let config_path = cli
        .config
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILENAME));

    let initial = match cli.command {
        Commands::Init { force } => {
            write_default_config(&config_path, force)?;
            println!("Wrote {}", config_path.display());
            return Ok(());
        }
        Commands::Enrich { lead_ids } => lead_ids.into_iter().map(Msg::EnrichRequested).collect(),
        Commands::RunAgent {
            industry,
            location,
            persona,
            keywords,
        } => vec![Msg::AgentRunRequested(AgentQuery {
            industry,
            location,
            target_persona: persona,
            keywords,
        })],
        Commands::Watch => vec![Msg::ConsoleRequested],
    };

    let mut config = load_config(&config_path)?;
    if let Some(api_url) = cli.api_url {
        config.api.base_url = api_url;
    }

    run_app(&config, initial).await
}
