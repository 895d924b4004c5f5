use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use elastic::{ClientConfig, Elasticsearch};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "elastic")]
#[command(about = "Elasticsearch command-line client")]
#[command(version)]
struct Cli {
    /// Engine address (host:port), overrides the config file
    #[arg(long, global = true)]
    addr: Option<String>,

    /// Config file (default: ~/.elastic/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a match query, or match_all without text
    Search {
        /// Index to search, all indices when omitted
        #[arg(short, long, default_value = "")]
        index: String,

        /// Document type
        #[arg(short = 't', long = "type", default_value = "")]
        doc_type: String,

        /// Field to match against
        #[arg(short, long, default_value = "_all")]
        field: String,

        /// Maximum number of hits
        #[arg(short, long)]
        size: Option<u64>,

        /// Text to match
        text: Option<String>,
    },

    /// Show how a text is tokenized
    Analyze {
        /// Index whose analyzers are used
        #[arg(short, long, default_value = "")]
        index: String,

        /// Analyzer name, e.g. standard or english
        #[arg(short, long)]
        analyzer: Option<String>,

        /// Use the analyzer mapped to this field
        #[arg(short, long)]
        field: Option<String>,

        text: String,
    },

    /// Make recently indexed documents searchable
    Refresh {
        /// Index to refresh, all indices when omitted
        #[arg(default_value = "")]
        index: String,
    },

    /// Commit segments and truncate the translog
    Flush {
        #[arg(default_value = "")]
        index: String,

        /// Wait for an ongoing flush instead of skipping
        #[arg(long)]
        wait_for_ongoing: bool,
    },

    /// Merge segments
    Optimize {
        #[arg(default_value = "")]
        index: String,

        /// Target number of segments per shard
        #[arg(long)]
        max_num_segments: Option<u32>,
    },

    /// Delete an index
    DeleteIndex { index: String },

    /// Index a JSONL file through the bulk API
    Bulk {
        /// Target index
        #[arg(short, long)]
        index: String,

        /// Document type
        #[arg(short = 't', long = "type")]
        doc_type: String,

        /// JSONL file, one document per line
        #[arg(long)]
        input: PathBuf,

        /// Integer field used as the document id
        #[arg(long, default_value = "id")]
        id_field: String,

        /// Documents per bulk request
        #[arg(long, default_value = "500")]
        batch_size: usize,
    },
}

fn load_config(path: Option<PathBuf>) -> Result<ClientConfig> {
    let path = match path {
        Some(path) => path,
        None => match ClientConfig::default_path() {
            Ok(path) => path,
            Err(_) => return Ok(ClientConfig::default()),
        },
    };
    ClientConfig::load_or_default(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config)?;
    if let Some(addr) = cli.addr {
        config.addr = addr;
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.logging.level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let client = Elasticsearch::from_config(&config).context("Failed to build HTTP client")?;
    tracing::debug!("Using {}", client.addr());

    match cli.command {
        Commands::Search {
            index,
            doc_type,
            field,
            size,
            text,
        } => {
            commands::run_search(&client, &index, &doc_type, &field, text.as_deref(), size).await?;
        }
        Commands::Analyze {
            index,
            analyzer,
            field,
            text,
        } => {
            commands::run_analyze(&client, &index, analyzer, field, &text).await?;
        }
        Commands::Refresh { index } => {
            commands::print_decoded(&client.refresh(&index).post(&client).await?)?;
        }
        Commands::Flush {
            index,
            wait_for_ongoing,
        } => {
            let mut op = client.flush(&index);
            if wait_for_ongoing {
                op = op.add_param("wait_for_ongoing", "");
            }
            commands::print_decoded(&op.post(&client).await?)?;
        }
        Commands::Optimize {
            index,
            max_num_segments,
        } => {
            let mut op = client.optimize(&index);
            if let Some(n) = max_num_segments {
                op = op.add_param("max_num_segments", n.to_string());
            }
            commands::print_decoded(&op.post(&client).await?)?;
        }
        Commands::DeleteIndex { index } => {
            tracing::info!("Deleting index {}", index);
            commands::print_decoded(&client.index(&index).delete(&client).await?)?;
        }
        Commands::Bulk {
            index,
            doc_type,
            input,
            id_field,
            batch_size,
        } => {
            commands::run_bulk(&client, &index, &doc_type, &input, &id_field, batch_size).await?;
        }
    }

    Ok(())
}
