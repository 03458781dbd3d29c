use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
	#[error("cannot read {}", .path.display())]
	Io { path: PathBuf, #[source] source: std::io::Error },
	#[error("config: {0}")]
	Config(String),
	/// The report file exists but holds nothing to scan.
	#[error("report is empty: {}", .0.display())]
	EmptyReport(PathBuf),
	/// Not a single entry in the report matched a known shape.
	#[error("no test entries recognized in report ({skipped} candidate entries skipped)")]
	NoEntries { skipped: usize },
	/// A category tag outside the closed `cpu`/`local` set.
	#[error("unknown category: {0}")]
	UnknownCategory(String),
	/// A trend fit was requested for a group without points.
	#[error("cannot fit a trend line through an empty group")]
	EmptyGroup,
}

impl Error {
	pub fn config(msg: impl Into<String>) -> Self { Self::Config(msg.into()) }
	pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self { Self::Io { path: path.into(), source } }
}
