use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use vedalex::cache::ClusterCache;
use vedalex::config::CONFIG_FILE;
use vedalex::data::{DataFile, load_model};
use vedalex::service::ClusterService;
use vedalex::{Settings, server};

#[derive(Parser)]
#[command(name = "vedalex")]
#[command(about = "Threshold-driven word-cluster service over a precomputed linkage")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a configuration file with defaults
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Serve the cluster API over HTTP
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to the data file (overrides config)
        #[arg(long)]
        data: Option<PathBuf>,
    },

    /// Cut the dendrogram at a similarity threshold and print the
    /// assignment as JSON
    Cut {
        /// Similarity threshold in [0,1]
        sim: f64,

        /// Path to the data file (overrides config)
        #[arg(long)]
        data: Option<PathBuf>,
    },

    /// Print one hymn record as JSON
    Hymn {
        /// Hymn id, e.g. "1-1"
        id: String,

        /// Path to the data file (overrides config)
        #[arg(long)]
        data: Option<PathBuf>,
    },

    /// Show the effective configuration
    Config,
}

fn build_service(settings: &Settings, data: Option<PathBuf>) -> anyhow::Result<ClusterService> {
    let path = data.unwrap_or_else(|| settings.data_path.clone());
    let data = DataFile::load(&path)
        .with_context(|| format!("failed to load data from {}", path.display()))?;
    let (model, hymns) = load_model(data)?;
    Ok(ClusterService::new(model, hymns, ClusterCache::new()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::load().context("failed to load configuration")?;

    match cli.command {
        Commands::Init { force } => {
            let path = PathBuf::from(CONFIG_FILE);
            if path.exists() && !force {
                anyhow::bail!("{CONFIG_FILE} already exists (use --force to overwrite)");
            }
            let rendered = toml::to_string_pretty(&Settings::default())?;
            std::fs::write(&path, rendered)?;
            println!("Wrote {CONFIG_FILE}");
        }

        Commands::Serve { port, data } => {
            if let Some(port) = port {
                settings.server.port = port;
            }
            if let Some(data) = data {
                settings.data_path = data;
            }
            server::serve(settings).await?;
        }

        Commands::Cut { sim, data } => {
            vedalex::logging::init_with_config(&settings.logging);
            let service = build_service(&settings, data)?;
            let assignment = service
                .clusters(sim)
                .map_err(|e| anyhow::anyhow!("{e} (got {sim})"))?;
            println!("{}", serde_json::to_string_pretty(&*assignment)?);
        }

        Commands::Hymn { id, data } => {
            vedalex::logging::init_with_config(&settings.logging);
            let service = build_service(&settings, data)?;
            let record = service
                .hymn(&id)
                .map_err(|e| anyhow::anyhow!("{e}: {id}"))?;
            println!("{}", serde_json::to_string_pretty(record)?);
        }

        Commands::Config => {
            println!("{}", toml::to_string_pretty(&settings)?);
        }
    }

    Ok(())
}
