use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use opentelemetry::{global, trace::TracerProvider as _, KeyValue};
use opentelemetry_otlp::{WithExportConfig, WithTonicConfig};
use opentelemetry_sdk::{
    propagation::TraceContextPropagator,
    runtime::Tokio,
    trace::{Config, Tracer, TracerProvider},
    Resource,
};
use std::{env::var, time::Duration};
use tonic::transport::ClientTlsConfig;
use tracing::{debug, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};
use ulid::Ulid;

const ENV_ENDPOINT: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";
const ENV_INSTANCE_ID: &str = "OTEL_SERVICE_INSTANCE_ID";
const EXPORT_TIMEOUT: Duration = Duration::from_secs(3);

static PROVIDER: OnceCell<TracerProvider> = OnceCell::new();

/// Where spans go, read from the standard OTLP environment variables.
///
/// `OTEL_EXPORTER_OTLP_HEADERS` is not read here, the tonic exporter picks it
/// up on its own when the channel is built.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Export {
    endpoint: String,
    instance_id: String,
}

impl Export {
    /// `None` when no endpoint is configured, which keeps export off.
    fn from_env() -> Option<Self> {
        let endpoint = var(ENV_ENDPOINT).ok().filter(|ep| !ep.trim().is_empty())?;
        let endpoint = if endpoint.contains("://") {
            endpoint
        } else {
            format!("https://{}", endpoint.trim_end_matches('/'))
        };

        Some(Self {
            endpoint,
            instance_id: var(ENV_INSTANCE_ID).unwrap_or_else(|_| Ulid::new().to_string()),
        })
    }

    /// TLS domain for `https` endpoints, without port or path.
    fn tls_domain(&self) -> Option<&str> {
        let authority = self.endpoint.strip_prefix("https://")?;
        authority.split(['/', ':']).next().filter(|d| !d.is_empty())
    }

    #[allow(deprecated)]
    fn install(&self) -> Result<Tracer> {
        let mut exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(&self.endpoint)
            .with_timeout(EXPORT_TIMEOUT);

        if let Some(domain) = self.tls_domain() {
            exporter = exporter.with_tls_config(
                ClientTlsConfig::new()
                    .domain_name(domain)
                    .with_native_roots(),
            );
        }

        let exporter = exporter
            .build()
            .with_context(|| format!("Failed to build span exporter for {}", self.endpoint))?;

        let provider = TracerProvider::builder()
            .with_batch_exporter(exporter, Tokio)
            .with_config(Config::default().with_resource(Resource::new([
                KeyValue::new("service.name", env!("CARGO_PKG_NAME")),
                KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
                KeyValue::new("service.instance.id", self.instance_id.clone()),
            ])))
            .build();

        global::set_text_map_propagator(TraceContextPropagator::new());
        global::set_tracer_provider(provider.clone());
        let tracer = provider.tracer(env!("CARGO_PKG_NAME"));

        if PROVIDER.set(provider).is_err() {
            debug!("tracer provider already installed");
        }

        Ok(tracer)
    }
}

/// Install the global subscriber, exporting spans when an OTLP endpoint is set.
///
/// # Errors
///
/// Returns an error if the exporter cannot be built or a subscriber is
/// already installed.
pub fn init(verbosity_level: Option<Level>) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(verbosity_level.unwrap_or(Level::ERROR).into())
        .from_env_lossy()
        .add_directive("hyper=error".parse()?)
        .add_directive("opentelemetry_sdk=warn".parse()?);

    let otel_layer = match Export::from_env() {
        Some(export) => Some(tracing_opentelemetry::layer().with_tracer(export.install()?)),
        None => None,
    };

    let subscriber = Registry::default()
        .with(fmt::layer().with_target(false))
        .with(otel_layer)
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

/// Flush pending spans; does nothing when export is off.
pub fn shutdown_tracer() {
    if let Some(provider) = PROVIDER.get() {
        if let Err(err) = provider.shutdown() {
            debug!("tracer provider shutdown: {}", err);
        }
    }
}
