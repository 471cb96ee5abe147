use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, Registry};

/// Installs the global JSON (bunyan) subscriber. `log` records, such as the
/// ones emitted by actix's `Logger` middleware, are forwarded into it.
///
/// An unparsable `log_level` falls back to `info`.
pub fn init(app_name: &str, log_level: &str) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let formatting_layer = BunyanFormattingLayer::new(app_name.to_string(), std::io::stdout);
    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
        .try_init()
}
