use tracing_subscriber::EnvFilter;

use crate::config::DEFAULT_LOG_FILTER;

/// Install the global tracing subscriber. Logs go to stderr so stdout stays
/// clean for JSON and CSV output. Calling this twice is harmless.
pub fn init(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|err| {
        eprintln!("invalid log filter '{filter}' ({err}), defaulting to {DEFAULT_LOG_FILTER}");
        EnvFilter::new(DEFAULT_LOG_FILTER)
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
