use crate::{api, cli::telemetry, short_commit, GIT_COMMIT_HASH};
use anyhow::Result;
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub title: String,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    info!(
        port = args.port,
        title = %args.title,
        commit = short_commit(GIT_COMMIT_HASH),
        "{} {} starting",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let config = api::PageConfig { title: args.title };
    let result = api::new(args.port, config).await;

    telemetry::shutdown_tracer();

    result
}
