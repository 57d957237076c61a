//! Host log backend.
//!
//! `tracing-subscriber` formats to stderr, so stdout stays reserved for
//! terminal replies.  Its `tracing-log` bridge picks up every record the
//! library emits through the `log` facade.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Environment variable holding the filter directives.
pub const LOG_ENV: &str = "TEMPCTRL_LOG";

/// Filter used when `LOG_ENV` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info";

fn filter_from(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global backend.  Fails if one is already installed.
pub fn init() -> Result<(), TryInitError> {
    let directives = std::env::var(LOG_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(filter_from(directives.as_deref()))
        .with_writer(std::io::stderr)
        .finish()
        .try_init()
}
