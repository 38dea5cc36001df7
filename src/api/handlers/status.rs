//! Result pages for the email confirmation and password reset flows.

use crate::{
    api::PageConfig,
    pages::{Flow, StatusPage, STATUS_QUERY_KEY},
};
use askama::Template;
use axum::{
    extract::{Extension, RawQuery},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{debug, error, instrument};
use url::form_urlencoded;

#[utoipa::path(
    get,
    path = "/confirmation-status",
    params(
        ("status" = Option<String>, Query, description = "success, already_confirmed or failure; anything else renders failure")
    ),
    responses(
        (status = 200, description = "Email confirmation result page", body = String, content_type = "text/html")
    ),
    tag = "pages",
)]
#[instrument(skip(config))]
pub async fn confirmation_status(
    config: Extension<Arc<PageConfig>>,
    query: RawQuery,
) -> impl IntoResponse {
    render(Flow::Confirmation, &config.0, query.0.as_deref())
}

#[utoipa::path(
    get,
    path = "/password-reset-status",
    params(
        ("status" = Option<String>, Query, description = "success or failure; anything else renders failure")
    ),
    responses(
        (status = 200, description = "Password reset result page", body = String, content_type = "text/html")
    ),
    tag = "pages",
)]
#[instrument(skip(config))]
pub async fn password_reset_status(
    config: Extension<Arc<PageConfig>>,
    query: RawQuery,
) -> impl IntoResponse {
    render(Flow::PasswordReset, &config.0, query.0.as_deref())
}

fn render(flow: Flow, config: &PageConfig, query: Option<&str>) -> Response {
    let status = query.and_then(status_param);

    if is_unrecognized(flow, status.as_deref()) {
        debug!(%flow, ?status, "unrecognized status, rendering failure");
    }

    match StatusPage::new(flow, &config.title, status.as_deref()).render() {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            error!(%flow, "Failed to render status page: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// A present `status` outside the flow's vocabulary. A missing one is the
/// expected fallback and is not reported.
fn is_unrecognized(flow: Flow, status: Option<&str>) -> bool {
    status.is_some_and(|raw| flow.status_token(raw).is_none())
}

/// First `status` value of a raw query string, decoded.
fn status_param(query: &str) -> Option<String> {
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == STATUS_QUERY_KEY)
        .map(|(_, value)| value.into_owned())
}
