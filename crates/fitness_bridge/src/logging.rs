//! Subscriber setup for hosts that do not install their own.

use tracing_subscriber::EnvFilter;

/// Install a compact stderr subscriber.
///
/// The filter comes from `FITNESS_LOG_LEVEL`, falling back to `RUST_LOG` and
/// then `info`. Returns `false` if a global subscriber was already set.
pub fn init_logging() -> bool {
    let log_env = std::env::var("FITNESS_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    init_logging_with(&log_env)
}

pub fn init_logging_with(filter: &str) -> bool {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let installed = tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .try_init()
        .is_ok();
    if installed {
        tracing::info!("fitness_bridge: log filter: {}", filter);
    }
    installed
}
