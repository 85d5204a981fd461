use tracing::subscriber::DefaultGuard;
use tracing_subscriber::EnvFilter;

use crate::config::DEFAULT_LOG_FILTER;

/// Installs a stderr subscriber for the current thread when `verbose` is set.
///
/// Without it no subscriber exists and every event is discarded. The filter
/// comes from `RUST_LOG` when present. Keep the guard alive for as long as
/// logging should stay on.
pub fn init_logging(verbose: bool) -> Option<DefaultGuard> {
    if !verbose {
        return None;
    }

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_ansi(false)
        .finish();

    let guard = tracing::subscriber::set_default(subscriber);
    tracing::debug!("idaru logging initialized");
    Some(guard)
}
