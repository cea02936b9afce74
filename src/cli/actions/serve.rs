use crate::{
    cli::telemetry,
    edge::{self, revalidate::Revalidator, EdgeState},
};
use anyhow::{Context, Result};
use std::{path::PathBuf, sync::Arc, time::Duration};
use tracing::{info, warn};

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub assets_dir: PathBuf,
    pub api_url: String,
    pub edge_revalidate: bool,
    pub revalidate_timeout: Duration,
}

/// Serve until the listener fails or the process is signalled.
/// # Errors
/// Returns an error if the revalidation client cannot be built or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    if !args.assets_dir.join("index.html").is_file() {
        warn!(
            "No index.html under {}; only /health will answer until the bundle is built",
            args.assets_dir.display()
        );
    }

    let revalidator = if args.edge_revalidate {
        info!(api_url = %args.api_url, "Edge revalidation enabled");
        Some(
            Revalidator::new(&args.api_url, args.revalidate_timeout)
                .context("Failed to build revalidation client")?,
        )
    } else {
        None
    };

    let state = Arc::new(EdgeState { revalidator });

    let result = edge::serve(args.port, &args.assets_dir, state).await;

    telemetry::shutdown_tracer();

    result
}
