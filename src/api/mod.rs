use crate::api::handlers::{health, status};
use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Method, Request},
    response::{IntoResponse, Json},
    routing::get,
    Extension, Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::PropagateRequestIdLayer,
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{debug, debug_span, info, Span};
use ulid::Ulid;
use utoipa::{openapi::Tag, OpenApi};

pub mod handlers;

pub const DEFAULT_TITLE: &str = "Never Expires";

/// Settings shared by the result pages.
#[derive(Debug, Clone)]
pub struct PageConfig {
    pub title: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        status::confirmation_status,
        status::password_reset_status,
    ),
    components(schemas(health::Health)),
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    let mut openapi = ApiDoc::openapi();

    let mut pages_tag = Tag::new("pages");
    pages_tag.description = Some("Email confirmation and password reset result pages".to_string());
    let mut health_tag = Tag::new("health");
    health_tag.description = Some("Service health".to_string());
    openapi.tags = Some(vec![pages_tag, health_tag]);

    openapi
}

async fn openapi_json() -> impl IntoResponse {
    Json(openapi())
}

/// Build the application router with its middleware stack.
pub fn router(config: PageConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_origin(Any);

    Router::new()
        .route("/confirmation-status", get(status::confirmation_status))
        .route("/password-reset-status", get(status::password_reset_status))
        .route("/health", get(health::health).options(health::health))
        .route("/openapi.json", get(openapi_json))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(cors)
                .layer(Extension(Arc::new(config))),
        )
}

/// Serve the result pages until a shutdown signal arrives.
/// # Errors
/// Returns an error if the listener cannot be bound or the server fails.
pub async fn new(port: u16, config: PageConfig) -> Result<()> {
    let app = router(config);

    let listener = match TcpListener::bind(format!("::0:{port}")).await {
        Ok(listener) => listener,
        Err(err) => {
            // Hosts without IPv6
            debug!("Failed to bind [::]:{}: {}", port, err);
            TcpListener::bind(format!("0.0.0.0:{port}"))
                .await
                .with_context(|| format!("Failed to bind port {port}"))?
        }
    };

    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to listen for SIGTERM: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Gracefully shutdown");
}

// span
fn make_span(request: &Request<Body>) -> Span {
    let headers = request.headers();
    let path = request.uri().path();
    let request_id = headers
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");

    debug_span!("http-request", path, ?headers, request_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use axum::{body::to_bytes, http::StatusCode};
    use tower::ServiceExt;

    async fn get(uri: &str) -> Result<(StatusCode, axum::http::HeaderMap, String)> {
        let response = router(PageConfig::default())
            .oneshot(Request::builder().uri(uri).body(Body::empty())?)
            .await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await?;
        Ok((status, headers, String::from_utf8(body.to_vec())?))
    }

    #[tokio::test]
    async fn confirmation_scenarios() -> Result<()> {
        let cases = [
            (
                "/confirmation-status?status=success",
                "Your email has been successfully confirmed!",
            ),
            (
                "/confirmation-status?status=already_confirmed",
                "Your email is already confirmed.",
            ),
            (
                "/confirmation-status",
                "This confirmation link is no longer valid. You can request a new one in the app.",
            ),
        ];

        for (uri, message) in cases {
            let (status, headers, body) = get(uri).await?;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert!(
                headers
                    .get("content-type")
                    .and_then(|value| value.to_str().ok())
                    .is_some_and(|value| value.starts_with("text/html")),
                "{uri}"
            );
            assert!(
                body.contains(&format!(r#"<p id="statusMessage">{message}</p>"#)),
                "{uri}"
            );
        }
        Ok(())
    }

    #[tokio::test]
    async fn reset_scenarios() -> Result<()> {
        let (_, _, body) = get("/password-reset-status?status=success").await?;
        assert!(body.contains(
            "Your password has been successfully reset! We have sent a new one to your email."
        ));

        let (_, _, body) = get("/password-reset-status?status=bogus").await?;
        assert!(
            body.contains("This link is no longer valid. You can request a new one in the app.")
        );
        Ok(())
    }

    #[tokio::test]
    async fn malformed_query_still_renders() -> Result<()> {
        let (status, _, body) = get("/confirmation-status?status=%zz&&=").await?;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("This confirmation link is no longer valid."));
        Ok(())
    }

    #[tokio::test]
    async fn request_id_is_set() -> Result<()> {
        let (_, headers, _) = get("/health").await?;
        let request_id = headers
            .get("x-request-id")
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);
        assert!(request_id.is_some_and(|id| Ulid::from_string(&id).is_ok()));
        Ok(())
    }

    #[tokio::test]
    async fn request_id_is_propagated() -> Result<()> {
        let response = router(PageConfig::default())
            .oneshot(
                Request::builder()
                    .uri("/confirmation-status")
                    .header("x-request-id", "abc-123")
                    .body(Body::empty())?,
            )
            .await?;
        assert_eq!(
            response
                .headers()
                .get("x-request-id")
                .and_then(|value| value.to_str().ok()),
            Some("abc-123")
        );
        Ok(())
    }

    #[tokio::test]
    async fn custom_title() -> Result<()> {
        let response = router(PageConfig {
            title: "Acme".to_string(),
        })
        .oneshot(
            Request::builder()
                .uri("/password-reset-status?status=success")
                .body(Body::empty())?,
        )
        .await?;
        let body = to_bytes(response.into_body(), usize::MAX).await?;
        let body = String::from_utf8(body.to_vec())?;
        assert!(body.contains("<h1>Acme</h1>"));
        Ok(())
    }

    #[tokio::test]
    async fn openapi_lists_pages() -> Result<()> {
        let (status, _, body) = get("/openapi.json").await?;
        assert_eq!(status, StatusCode::OK);
        let doc: serde_json::Value = serde_json::from_str(&body)?;
        assert!(doc["paths"]["/confirmation-status"]["get"].is_object());
        assert!(doc["paths"]["/password-reset-status"]["get"].is_object());
        assert!(doc["paths"]["/health"]["get"].is_object());
        Ok(())
    }

    #[test]
    fn openapi_uses_package_metadata() {
        let doc = openapi();
        assert_eq!(doc.info.title, env!("CARGO_PKG_NAME"));
        assert_eq!(doc.info.version, env!("CARGO_PKG_VERSION"));
    }
}
