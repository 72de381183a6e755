/// Sink for diagnostic messages emitted by the discovery components.
///
/// Every component receives one explicitly at construction instead of
/// reaching for a process-wide logger.
pub trait Diagnostics: Send + Sync {
    fn debug(&self, message: &str);
    fn warn(&self, message: &str);
}

/// Forwards diagnostics to the `tracing` subscriber installed by `main`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn debug(&self, message: &str) {
        tracing::debug!("{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{}", message);
    }
}

/// Install the global `tracing` subscriber. `RUST_LOG` overrides `default_level`.
pub fn init_logging(default_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(default_level)
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
