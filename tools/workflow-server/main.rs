use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use workflow_engine::catalog::{self, AutomationAction};
use workflow_engine::server;

#[derive(Parser)]
#[command(
    name = "workflow-server",
    version,
    about = "Serves workflow simulation and the automation catalog over HTTP"
)]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "WORKFLOW_SERVER_BIND", default_value = "127.0.0.1:3001")]
    bind: String,

    /// JSON file with an array of automation actions, replacing the built-in catalog
    #[arg(long, env = "WORKFLOW_CATALOG")]
    catalog: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("workflow_engine=info,warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let actions = match &cli.catalog {
        Some(path) => load_catalog(path)?,
        None => catalog::default_catalog(),
    };

    server::serve(&cli.bind, actions).await
}

fn load_catalog(path: &Path) -> anyhow::Result<Vec<AutomationAction>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading catalog {}", path.display()))?;
    let actions = catalog::parse_catalog(&text)
        .with_context(|| format!("parsing catalog {}", path.display()))?;
    info!(path = %path.display(), actions = actions.len(), "Loaded automation catalog");
    Ok(actions)
}
