#![forbid(unsafe_code)]

//! Logging setup and run counters for gastrend.

use tracing_subscriber::{fmt, EnvFilter};

#[derive(thiserror::Error, Debug)]
pub enum Error {
	#[error("telemetry init failed: {0}")]
	Init(String),
	#[error("metrics: {0}")]
	Metrics(String),
}
pub type Result<T> = std::result::Result<T, Error>;

pub mod metrics;

pub use metrics::{counter_value, dump_prometheus, record_counter};

/// Install a stderr fmt subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_level` applies. Returns
/// `Ok(false)` when a global subscriber was already installed.
pub fn init_logging(default_level: &str) -> Result<bool> {
	let filter = match EnvFilter::try_from_default_env() {
		Ok(f) => f,
		Err(_) => EnvFilter::try_new(default_level).map_err(|e| Error::Init(format!("invalid log level {default_level:?}: {e}")))?,
	};
	let installed = fmt()
		.with_env_filter(filter)
		.with_target(false)
		.with_writer(std::io::stderr)
		.try_init()
		.is_ok();
	if installed {
		tracing::debug!(default_level, "logging initialized");
	}
	Ok(installed)
}
