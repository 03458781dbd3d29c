//! Loading a report file from disk.

use std::{fs, path::Path};

use crate::error::{Error, Result};
use crate::parser::{parse_with_diagnostics, ParseOutcome};

/// Read the whole report. A missing or empty file is an error.
pub fn read_report(path: impl AsRef<Path>) -> Result<String> {
	let path = path.as_ref();
	let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
	if text.trim().is_empty() {
		return Err(Error::EmptyReport(path.to_path_buf()));
	}
	Ok(text)
}

/// Read and parse a report, failing when nothing in it could be recognized.
pub fn load_report(path: impl AsRef<Path>) -> Result<ParseOutcome> {
	let path = path.as_ref();
	let text = read_report(path)?;
	let outcome = parse_with_diagnostics(&text);
	if outcome.records.is_empty() {
		return Err(Error::NoEntries { skipped: outcome.skipped.len() });
	}
	tracing::info!(path = %path.display(), records = outcome.records.len(), skipped = outcome.skipped.len(), "loaded report");
	Ok(outcome)
}
