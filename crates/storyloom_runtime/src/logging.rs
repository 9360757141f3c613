//! Diagnostics setup for the binary.
//!
//! Narrative goes to stdout, so diagnostics always go to stderr.

use storyloom_foundation::{Error, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter used when neither `RUST_LOG` nor the configuration sets one.
pub const DEFAULT_FILTER: &str = "storyloom=info";

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` wins over `filter`, which wins over [`DEFAULT_FILTER`].
///
/// # Errors
///
/// Returns a `Config` error for an unparsable filter, or an `Internal` error
/// if a subscriber is already installed.
pub fn init_logging(filter: Option<&str>) -> Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(env_filter) => env_filter,
        Err(_) => EnvFilter::try_new(filter.unwrap_or(DEFAULT_FILTER))
            .map_err(|e| Error::config(format!("invalid log filter: {e}")))?,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).without_time())
        .try_init()
        .map_err(|e| Error::internal(e.to_string()))
}
