use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs the stderr subscriber. stdout is reserved for protocol responses.
pub fn init(filter: &str) {
    if tracing::dispatcher::has_been_set() {
        return;
    }

    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
}
