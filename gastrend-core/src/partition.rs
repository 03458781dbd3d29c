//! Ordering and grouping of measurement records.

use crate::record::{Category, MeasurementRecord};

/// Sort records by `(test_name, category, input_complexity)`.
///
/// The sort is stable, so duplicate entries keep their report order. The
/// input is left untouched.
pub fn partition_and_order(records: &[MeasurementRecord]) -> Vec<MeasurementRecord> {
	let mut sorted = records.to_vec();
	sorted.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
	sorted
}

/// Contiguous run of records sharing `(test_name, category)`.
#[derive(Debug, Clone, Copy)]
pub struct Group<'a> {
	pub test_name: &'a str,
	pub category: Category,
	pub records: &'a [MeasurementRecord],
}

impl<'a> Group<'a> {
	/// `(complexity, cost)` points in record order.
	pub fn points(&self) -> Vec<(u64, u64)> { self.records.iter().map(MeasurementRecord::point).collect() }
}

/// Split an ordered slice into its `(test_name, category)` runs.
///
/// Every yielded group holds at least one record. Feed the output of
/// [`partition_and_order`]; unsorted input yields one group per run.
pub fn groups(sorted: &[MeasurementRecord]) -> impl Iterator<Item = Group<'_>> {
	sorted
		.chunk_by(|a, b| a.test_name == b.test_name && a.category == b.category)
		.map(|run| Group { test_name: run[0].test_name.as_str(), category: run[0].category, records: run })
}

#[cfg(test)]
mod tests {
	use super::*;

	fn rec(name: &str, category: Category, x: u64, cost: u64) -> MeasurementRecord {
		MeasurementRecord {
			test_name: name.into(),
			category,
			input_complexity: x,
			cost,
			step_count: 0,
			memory_hole_count: 0,
			builtin_usage: Default::default(),
		}
	}

	#[test]
	fn orders_by_name_category_then_complexity() {
		let input = vec![
			rec("zeta", Category::Cpu, 1, 1),
			rec("alpha", Category::Local, 2, 1),
			rec("alpha", Category::Cpu, 10, 1),
			rec("alpha", Category::Cpu, 9, 1),
		];
		let out = partition_and_order(&input);
		let keys: Vec<_> = out.iter().map(|r| (r.test_name.as_str(), r.category, r.input_complexity)).collect();
		assert_eq!(
			keys,
			vec![("alpha", Category::Cpu, 9), ("alpha", Category::Cpu, 10), ("alpha", Category::Local, 2), ("zeta", Category::Cpu, 1)]
		);
		// input untouched
		assert_eq!(input[0].test_name, "zeta");
	}

	#[test]
	fn complexity_compares_numerically() {
		let out = partition_and_order(&[rec("t", Category::Cpu, 100, 0), rec("t", Category::Cpu, 20, 0)]);
		assert_eq!(out[0].input_complexity, 20);
	}

	#[test]
	fn duplicates_are_preserved_in_report_order() {
		let out = partition_and_order(&[rec("t", Category::Cpu, 5, 7), rec("t", Category::Cpu, 5, 3)]);
		assert_eq!(out.len(), 2);
		assert_eq!(out[0].cost, 7);
		assert_eq!(out[1].cost, 3);
	}

	#[test]
	fn ordering_is_idempotent() {
		let input = vec![rec("b", Category::Local, 3, 1), rec("a", Category::Cpu, 1, 2), rec("b", Category::Cpu, 2, 3)];
		let once = partition_and_order(&input);
		assert_eq!(partition_and_order(&once), once);
	}

	#[test]
	fn groups_split_on_name_and_category() {
		let sorted = partition_and_order(&[
			rec("a", Category::Cpu, 1, 1),
			rec("a", Category::Cpu, 2, 2),
			rec("a", Category::Local, 1, 1),
			rec("b", Category::Cpu, 1, 1),
		]);
		let gs: Vec<_> = groups(&sorted).collect();
		assert_eq!(gs.len(), 3);
		assert_eq!((gs[0].test_name, gs[0].category, gs[0].records.len()), ("a", Category::Cpu, 2));
		assert_eq!(gs[0].points(), vec![(1, 1), (2, 2)]);
		assert_eq!((gs[1].test_name, gs[1].category), ("a", Category::Local));
		assert_eq!((gs[2].test_name, gs[2].category), ("b", Category::Cpu));
		assert!(groups(&[]).next().is_none());
	}
}
