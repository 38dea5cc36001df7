use super::{StatusCode, STATUS_QUERY_KEY};
use anyhow::{ensure, Context, Result};
use url::Url;

/// Build the absolute URL of a result page, the way the identity service
/// redirects to it once a confirmation or reset has been processed.
///
/// `host` is the host the identity service was reached on, with an optional
/// port. Its first label is dropped so `id.example.com` redirects to
/// `https://example.com/...`. The page and the `status` value both come from
/// `code`, so only codes the page recognizes can be linked.
///
/// # Errors
/// Returns an error if `host` is empty, carries anything besides a host and
/// port, or cannot form a valid URL.
pub fn result_page_url<S: StatusCode>(host: &str, code: S) -> Result<Url> {
    let host = strip_subdomain(host.trim());
    ensure!(!host.is_empty(), "result page host is empty");
    ensure!(
        !host.contains(['/', '\\', '?', '#', '@']),
        "result page host must be a bare host[:port], got: {host}"
    );

    let mut url = Url::parse(&format!("https://{host}"))
        .with_context(|| format!("invalid host for result page: {host}"))?;
    url.set_path(S::FLOW.route());
    url.query_pairs_mut()
        .clear()
        .append_pair(STATUS_QUERY_KEY, code.as_str());

    Ok(url)
}

/// Drop the first label of hosts with more than two labels.
#[must_use]
pub fn strip_subdomain(host: &str) -> &str {
    if host.split('.').count() > 2 {
        host.split_once('.').map_or(host, |(_, rest)| rest)
    } else {
        host
    }
}
