//! Run counters and Prometheus exposition.

use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounter, Registry, TextEncoder};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::{Error, Result};

/// Report entries turned into measurement records.
pub const ENTRIES_PARSED: &str = "gastrend_entries_parsed_total";
/// Candidate entries left out of the result.
pub const ENTRIES_SKIPPED: &str = "gastrend_entries_skipped_total";
/// `(test, category)` groups a trend line was fitted through.
pub const GROUPS_FITTED: &str = "gastrend_groups_fitted_total";

pub(crate) static REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);
static COUNTERS: Lazy<Mutex<HashMap<String, IntCounter>>> = Lazy::new(|| Mutex::new(HashMap::new()));

/// Record into an IntCounter, creating and registering it on first use.
pub fn record_counter(name: &str, v: u64) -> Result<()> {
	let mut map = COUNTERS.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
	if let Some(ctr) = map.get(name) {
		ctr.inc_by(v);
		return Ok(());
	}
	let ctr = IntCounter::new(name, help_for(name)).map_err(|e| Error::Metrics(e.to_string()))?;
	// Best-effort register; a compatible collector may already exist.
	let _ = REGISTRY.register(Box::new(ctr.clone()));
	ctr.inc_by(v);
	map.insert(name.to_string(), ctr);
	Ok(())
}

/// Current value of a counter, `None` if it was never recorded.
pub fn counter_value(name: &str) -> Option<u64> {
	let map = COUNTERS.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
	map.get(name).map(IntCounter::get)
}

/// Dump metrics in Prometheus text exposition format.
pub fn dump_prometheus() -> String {
	let mf = REGISTRY.gather();
	let enc = TextEncoder::new();
	let mut buf = Vec::new();
	if enc.encode(&mf, &mut buf).is_ok() {
		String::from_utf8(buf).unwrap_or_default()
	} else {
		String::new()
	}
}

fn help_for(name: &str) -> String {
	match name {
		ENTRIES_PARSED => "Report entries parsed into measurement records".into(),
		ENTRIES_SKIPPED => "Candidate report entries skipped as malformed".into(),
		GROUPS_FITTED => "Test/category groups fitted with a trend line".into(),
		other => format!("counter {other}"),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn counters_accumulate_and_export() {
		record_counter("gastrend_test_unit_total", 2).unwrap();
		record_counter("gastrend_test_unit_total", 3).unwrap();
		assert_eq!(counter_value("gastrend_test_unit_total"), Some(5));
		let text = dump_prometheus();
		assert!(text.contains("gastrend_test_unit_total 5"));
		assert!(text.contains("# HELP gastrend_test_unit_total counter gastrend_test_unit_total"));
	}

	#[test]
	fn invalid_metric_name_is_an_error() {
		assert!(record_counter("not a metric name", 1).is_err());
		assert_eq!(counter_value("not a metric name"), None);
	}

	#[test]
	fn unknown_counter_reads_none() {
		assert_eq!(counter_value("gastrend_never_recorded_total"), None);
	}
}
