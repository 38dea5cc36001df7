use crate::pages::{
    result_page_url, ConfirmationStatus, Flow, PasswordResetStatus, StatusCode,
};
use anyhow::{anyhow, Result};

#[derive(Debug)]
pub struct Args {
    pub host: String,
    pub flow: Flow,
    pub status: String,
}

/// Print the result page URL for the given flow and status.
/// # Errors
/// Returns an error if the status is not a code of the flow or the host is invalid.
pub fn execute(args: &Args) -> Result<()> {
    println!("{}", link(args)?);
    Ok(())
}

fn link(args: &Args) -> Result<String> {
    match args.flow {
        Flow::Confirmation => link_for::<ConfirmationStatus>(args),
        Flow::PasswordReset => link_for::<PasswordResetStatus>(args),
    }
}

fn link_for<S: StatusCode>(args: &Args) -> Result<String> {
    let code = S::parse(&args.status).ok_or_else(|| {
        anyhow!(
            "unknown status '{}' for the {} flow",
            args.status,
            S::FLOW
        )
    })?;

    Ok(result_page_url(&args.host, code)?.to_string())
}
