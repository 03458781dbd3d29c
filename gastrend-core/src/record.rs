//! Measurement record model.
//!
//! A [`MeasurementRecord`] is one observed test execution pulled out of a
//! harness report. Records are created by the parser and never mutated.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Execution mode a test ran under.
///
/// Ordering follows the lexicographic order of the tag (`cpu < local`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
	Cpu,
	Local,
}

impl Category {
	pub const ALL: [Category; 2] = [Category::Cpu, Category::Local];

	/// Tag as it appears inside a test identifier.
	pub const fn as_str(self) -> &'static str {
		match self {
			Category::Cpu => "cpu",
			Category::Local => "local",
		}
	}

	/// Human label used in console output.
	pub const fn label(self) -> &'static str {
		match self {
			Category::Cpu => "CPU",
			Category::Local => "Local",
		}
	}
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Category {
	type Err = Error;
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"cpu" => Ok(Category::Cpu),
			"local" => Ok(Category::Local),
			other => Err(Error::UnknownCategory(other.to_string())),
		}
	}
}

/// Builtin name → invocation count.
pub type BuiltinUsage = BTreeMap<String, u64>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementRecord {
	pub test_name: String,
	pub category: Category,
	pub input_complexity: u64,
	/// Approximate gas reported in the entry header.
	pub cost: u64,
	pub step_count: u64,
	pub memory_hole_count: u64,
	#[serde(default)]
	pub builtin_usage: BuiltinUsage,
}

impl MeasurementRecord {
	/// `(complexity, cost)` point used for trend fitting.
	pub fn point(&self) -> (u64, u64) { (self.input_complexity, self.cost) }

	/// Key the partitioner orders by.
	pub fn sort_key(&self) -> (&str, Category, u64) {
		(self.test_name.as_str(), self.category, self.input_complexity)
	}

	/// Render the record back into the five-line report entry it came from.
	pub fn to_entry(&self) -> String {
		let builtins = self
			.builtin_usage
			.iter()
			.map(|(name, count)| format!("\"{name}\": {count}"))
			.collect::<Vec<_>>()
			.join(", ");
		format!(
			"[PASS] tests::rust_tests::test_{}_{}_{} (gas: ~{})\n        steps: {}\n        memory holes: {}\n        builtins: ({})\n        syscalls: ()\n",
			self.test_name,
			self.category,
			self.input_complexity,
			self.cost,
			self.step_count,
			self.memory_hole_count,
			builtins,
		)
	}
}
