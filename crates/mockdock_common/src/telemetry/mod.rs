use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_directive` (e.g. "warn") applies.
/// Output goes to stderr so it never interleaves with command output on stdout.
pub fn init_tracing(service_name: &str, default_directive: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to init tracing: {}", e))?;

    tracing::debug!("Tracing initialized for service: {}", service_name);
    Ok(())
}
