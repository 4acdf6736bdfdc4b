//! Entry point for the database reindexer.
//!
//! Reads one invocation request (JSON) from a file or stdin, runs it, and
//! prints the completion message.

use std::env;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use dotenv::dotenv;
use tokio::io::AsyncReadExt;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use db_reindexer::{Dependencies, ReindexConfig, ReindexError};
use db_reindexer_shared::InvocationRequest;

#[derive(Parser)]
#[command(name = "db-reindexer")]
#[command(about = "Re-populate a search index from database tables", long_about = None)]
struct Cli {
    /// Invocation request file (JSON). Reads stdin when omitted.
    #[arg(long)]
    event: Option<PathBuf>,

    /// Reindex only this table (asyncOperation, granule or provider)
    #[arg(long)]
    index_table: Option<String>,

    /// Search endpoint for this run, overriding the request and OPENSEARCH_URL
    #[arg(long)]
    es_host: Option<String>,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(message) => println!("{}", message),
        Err(e) => {
            error!(error = %e, "Reindex failed");
            process::exit(1);
        }
    }
}

/// Initialize tracing. `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn run(cli: Cli) -> Result<String, ReindexError> {
    let config = ReindexConfig::from_env()?;
    let dependencies = Dependencies::new(&config)?;

    let mut request = read_request(cli.event.as_ref()).await?;
    if cli.index_table.is_some() {
        request.index_table = cli.index_table;
    }
    if cli.es_host.is_some() {
        request.es_host = cli.es_host;
    }

    tokio::select! {
        result = dependencies.reindexer.handle(&request) => {
            let message = result?;
            info!("{}", message);
            Ok(message)
        }
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted; the index may be partially updated");
            Err(ReindexError::Interrupted)
        }
    }
}

async fn read_request(path: Option<&PathBuf>) -> Result<InvocationRequest, ReindexError> {
    let raw = match path {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => {
            let mut raw = String::new();
            tokio::io::stdin().read_to_string(&mut raw).await?;
            raw
        }
    };

    Ok(serde_json::from_str(&raw)?)
}
