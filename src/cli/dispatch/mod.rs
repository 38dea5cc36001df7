//! Map parsed command-line arguments to the action to run.

use crate::api::DEFAULT_TITLE;
use crate::cli::actions::{link, server, Action};
use crate::cli::commands::{link as link_cmd, ARG_PORT, ARG_TITLE};
use crate::pages::Flow;
use anyhow::{Context, Result};

/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    if let Some(sub_m) = matches.subcommand_matches(link_cmd::CMD_LINK) {
        return link_handler(sub_m);
    }

    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);
    let title = matches
        .get_one::<String>(ARG_TITLE)
        .cloned()
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    Ok(Action::Server(server::Args { port, title }))
}

fn link_handler(matches: &clap::ArgMatches) -> Result<Action> {
    let host = matches
        .get_one::<String>(link_cmd::ARG_HOST)
        .cloned()
        .context("missing required argument: --host")?;
    let flow = matches
        .get_one::<Flow>(link_cmd::ARG_FLOW)
        .copied()
        .context("missing required argument: --flow")?;
    let status = matches
        .get_one::<String>(link_cmd::ARG_STATUS)
        .cloned()
        .context("missing required argument: --status")?;

    Ok(Action::Link(link::Args { host, flow, status }))
}
