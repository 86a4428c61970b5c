use tracing_subscriber::{EnvFilter, fmt};

/// Default filter when RUST_LOG is not set
const DEFAULT_FILTER: &str = "info";

/// Install a stderr log subscriber so that stdout only carries progress lines
pub fn setup_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
