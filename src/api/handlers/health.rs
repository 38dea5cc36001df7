use crate::short_commit;
use axum::{
    http::{HeaderName, HeaderValue, Method},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};
use utoipa::ToSchema;

const X_APP: HeaderName = HeaderName::from_static("x-app");

/// Build identity reported by `/health`.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Health {
    name: String,
    version: String,
    commit: String,
}

impl Health {
    #[must_use]
    pub fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            commit: crate::GIT_COMMIT_HASH.to_string(),
        }
    }

    /// `name/version+commit`, e.g. `status-pages/0.1.0+0123abc`.
    fn app_id(&self) -> String {
        format!("{}/{}+{}", self.name, self.version, short_commit(&self.commit))
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = Health)
    ),
    tag = "health",
)]
#[instrument]
pub async fn health(method: Method) -> Response {
    let health = Health::current();

    let mut response = if method == Method::GET {
        Json(&health).into_response()
    } else {
        ().into_response()
    };

    match HeaderValue::from_str(&health.app_id()) {
        Ok(value) => {
            response.headers_mut().insert(X_APP, value);
        }
        Err(err) => warn!("X-App header skipped: {}", err),
    }

    response
}
