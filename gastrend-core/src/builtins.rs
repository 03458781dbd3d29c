//! Sub-parser for the `builtins: (...)` segment of a report entry.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::record::BuiltinUsage;

#[allow(clippy::expect_used)]
static PAIR: Lazy<Regex> = Lazy::new(|| Regex::new(r#""(\w+)": (\d+)"#).expect("builtin pair pattern"));

/// Collect every `"name": count` pair found in `segment`.
///
/// Pairs that do not fit the shape, or whose count overflows `u64`, are left
/// out. A later duplicate name overwrites the earlier count.
pub fn parse_builtins(segment: &str) -> BuiltinUsage {
	let mut usage = BuiltinUsage::new();
	for caps in PAIR.captures_iter(segment) {
		let Ok(count) = caps[2].parse::<u64>() else {
			tracing::debug!(pair = &caps[0], "dropping builtin pair with unparsable count");
			continue;
		};
		usage.insert(caps[1].to_string(), count);
	}
	usage
}
