use tracing_subscriber::EnvFilter;

/// Sink for failure messages. Fire-and-forget.
pub trait LogService: Send + Sync {
    fn log(&self, message: &str);
}

impl<T: LogService + ?Sized> LogService for &T {
    fn log(&self, message: &str) {
        (**self).log(message)
    }
}

/// Forwards messages to `tracing` at error level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogService;

impl LogService for TracingLogService {
    fn log(&self, message: &str) {
        tracing::error!(target: "stockbot::audit", "{}", message);
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `default_filter`.
pub fn setup_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_target(true)
        .with_level(true)
        .compact()
        .with_env_filter(filter)
        .init();
}
