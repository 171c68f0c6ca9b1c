//! Log output and the optional OTLP trace exporter.
//!
//! Logs always go to stdout. Spans are also exported over OTLP/gRPC when
//! `OTEL_EXPORTER_OTLP_ENDPOINT` is set.

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use opentelemetry::{KeyValue, global, trace::TracerProvider as _};
use opentelemetry_otlp::{Compression, WithExportConfig, WithTonicConfig};
use opentelemetry_sdk::{
    Resource,
    propagation::TraceContextPropagator,
    trace::{SdkTracerProvider, Tracer},
};
use std::{env::var, time::Duration};
use tonic::{
    metadata::{Ascii, MetadataKey, MetadataMap, MetadataValue},
    transport::ClientTlsConfig,
};
use tracing::{Level, debug};
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt};
use ulid::Ulid;

const EXPORT_TIMEOUT: Duration = Duration::from_secs(3);

static TRACER_PROVIDER: OnceCell<SdkTracerProvider> = OnceCell::new();

/// Exporter settings read from the standard `OTEL_*` variables.
#[derive(Debug, PartialEq, Eq)]
struct OtlpSettings {
    endpoint: String,
    headers: Vec<(String, String)>,
    instance_id: String,
}

impl OtlpSettings {
    /// `None` unless `OTEL_EXPORTER_OTLP_ENDPOINT` is set.
    fn from_env() -> Option<Self> {
        let endpoint = var("OTEL_EXPORTER_OTLP_ENDPOINT").ok()?;

        Some(Self {
            endpoint: with_scheme(endpoint.trim()),
            headers: var("OTEL_EXPORTER_OTLP_HEADERS")
                .map(|raw| header_pairs(&raw))
                .unwrap_or_default(),
            instance_id: var("OTEL_SERVICE_INSTANCE_ID")
                .unwrap_or_else(|_| Ulid::new().to_string()),
        })
    }

    /// Host to verify the collector certificate against; `None` for plain http.
    fn tls_domain(&self) -> Option<&str> {
        let authority = self.endpoint.strip_prefix("https://")?.split('/').next()?;
        authority.split(':').next().filter(|host| !host.is_empty())
    }

    fn metadata(&self) -> Result<MetadataMap> {
        let mut metadata = MetadataMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            let key = MetadataKey::<Ascii>::from_bytes(name.to_ascii_lowercase().as_bytes())
                .with_context(|| format!("invalid OTLP header name {name}"))?;
            let value = MetadataValue::try_from(value.as_str())
                .with_context(|| format!("invalid OTLP header value for {name}"))?;
            metadata.insert(key, value);
        }
        Ok(metadata)
    }
}

/// A bare `host:port` is assumed to be TLS.
fn with_scheme(endpoint: &str) -> String {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        endpoint.to_string()
    } else {
        format!("https://{}", endpoint.trim_end_matches('/'))
    }
}

/// Parse `k1=v1,k2=v2`; pairs without `=` or with an empty name are skipped.
fn header_pairs(raw: &str) -> Vec<(String, String)> {
    raw.split(',')
        .filter_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            let name = name.trim();
            (!name.is_empty()).then(|| (name.to_string(), value.trim().to_string()))
        })
        .collect()
}

fn init_tracer(settings: &OtlpSettings) -> Result<Tracer> {
    let mut builder = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&settings.endpoint)
        .with_compression(Compression::Gzip)
        .with_timeout(EXPORT_TIMEOUT);

    if let Some(domain) = settings.tls_domain() {
        builder = builder.with_tls_config(
            ClientTlsConfig::new()
                .domain_name(domain.to_string())
                .with_native_roots(),
        );
    }

    if !settings.headers.is_empty() {
        builder = builder.with_metadata(settings.metadata()?);
    }

    let exporter = builder.build().context("failed to build OTLP exporter")?;

    let provider = SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(
            Resource::builder_empty()
                .with_attributes(vec![
                    KeyValue::new("service.name", env!("CARGO_PKG_NAME")),
                    KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
                    KeyValue::new("service.instance.id", settings.instance_id.clone()),
                ])
                .build(),
        )
        .build();

    let _ = TRACER_PROVIDER.set(provider.clone());
    global::set_tracer_provider(provider.clone());
    global::set_text_map_propagator(TraceContextPropagator::new());

    Ok(provider.tracer(env!("CARGO_PKG_NAME")))
}

/// Install the global subscriber.
///
/// `verbosity_level` sets the default filter (errors only when `None`);
/// `RUST_LOG` directives still apply on top.
///
/// # Errors
///
/// Returns an error if the exporter or the subscriber cannot be installed.
pub fn init(verbosity_level: Option<Level>) -> Result<()> {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .pretty();

    let filter = EnvFilter::builder()
        .with_default_directive(verbosity_level.unwrap_or(Level::ERROR).into())
        .from_env_lossy()
        .add_directive("hyper=error".parse()?)
        .add_directive("tokio=error".parse()?)
        .add_directive("sqlx=warn".parse()?)
        .add_directive("opentelemetry_sdk=warn".parse()?);

    match OtlpSettings::from_env() {
        Some(settings) => {
            let tracer = init_tracer(&settings)?;
            let subscriber = Registry::default()
                .with(fmt_layer)
                .with(tracing_opentelemetry::layer().with_tracer(tracer))
                .with(filter);
            tracing::subscriber::set_global_default(subscriber)?;
        }
        None => {
            tracing::subscriber::set_global_default(
                Registry::default().with(fmt_layer).with(filter),
            )?;
        }
    }

    Ok(())
}

/// Flush pending spans; does nothing when the exporter is off.
pub fn shutdown_tracer() {
    if let Some(provider) = TRACER_PROVIDER.get() {
        debug!("shutting down tracer provider");
        let _ = provider.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(endpoint: &str, headers: &str) -> OtlpSettings {
        OtlpSettings {
            endpoint: with_scheme(endpoint),
            headers: header_pairs(headers),
            instance_id: "test".to_string(),
        }
    }

    #[test]
    fn exporter_is_off_without_endpoint() {
        temp_env::with_var_unset("OTEL_EXPORTER_OTLP_ENDPOINT", || {
            assert_eq!(OtlpSettings::from_env(), None);
        });
    }

    #[test]
    fn settings_read_from_env() {
        temp_env::with_vars(
            [
                ("OTEL_EXPORTER_OTLP_ENDPOINT", Some("collector.tld:4317/")),
                ("OTEL_EXPORTER_OTLP_HEADERS", Some("x-api-key=abc")),
                ("OTEL_SERVICE_INSTANCE_ID", Some("node-1")),
            ],
            || {
                let settings = OtlpSettings::from_env();
                assert_eq!(
                    settings,
                    Some(OtlpSettings {
                        endpoint: "https://collector.tld:4317".to_string(),
                        headers: vec![("x-api-key".to_string(), "abc".to_string())],
                        instance_id: "node-1".to_string(),
                    })
                );
            },
        );
    }

    #[test]
    fn header_pairs_skip_malformed_entries() {
        let pairs = header_pairs(" a = 1 ,malformed,=nameless, b=2");
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string()),
            ]
        );
        assert!(header_pairs("").is_empty());
    }

    #[test]
    fn tls_domain_only_for_https() {
        assert_eq!(
            settings("collector.tld:4317", "").tls_domain(),
            Some("collector.tld")
        );
        assert_eq!(settings("http://localhost:4317", "").tls_domain(), None);
    }

    #[test]
    fn metadata_lowercases_names_and_rejects_invalid_ones() -> Result<()> {
        let metadata = settings("http://localhost:4317", "Authorization=Bearer t").metadata()?;
        assert_eq!(
            metadata.get("authorization").and_then(|v| v.to_str().ok()),
            Some("Bearer t")
        );

        assert!(settings("http://localhost:4317", "bad name=1").metadata().is_err());
        Ok(())
    }
}
