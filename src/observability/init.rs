//! Subscriber setup.

use super::{tracer, SERVICE_NAME};
use crate::infrastructure::paths;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber.
///
/// Tracing is best effort: if the data directory cannot be created or a
/// subscriber is already installed, the plugin runs without it. Only the
/// first successful call takes effect.
pub fn init_tracing(config: &Config) {
    let data_dir = paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = tracer::create_tracer_provider(paths::trace_file(), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let filter = EnvFilter::try_new(&config.trace_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry().with(filter).with(otel_layer).try_init();
}
