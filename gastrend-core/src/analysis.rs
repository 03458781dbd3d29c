//! Per-test trend analysis.
//!
//! [`analyze`] turns a record collection into plain data a renderer can draw:
//! one [`Panel`] per test, one [`Series`] per category inside it.

use serde::Serialize;

use crate::error::Result;
use crate::partition::{groups, partition_and_order};
use crate::record::{Category, MeasurementRecord};
use crate::trend::{fit, TrendLine};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Point {
	pub input_complexity: u64,
	pub cost: u64,
}

/// Points of one `(test, category)` group and the line fitted through them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
	pub category: Category,
	/// Sorted by complexity.
	pub points: Vec<Point>,
	pub fit: TrendLine,
}

impl Series {
	/// Smallest and largest observed complexity.
	pub fn x_range(&self) -> (u64, u64) {
		let first = self.points.first().map_or(0, |p| p.input_complexity);
		let last = self.points.last().map_or(0, |p| p.input_complexity);
		(first, last)
	}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
	pub test_name: String,
	pub series: Vec<Series>,
}

/// Fitted trend for one `(test, category)` pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendFit {
	pub test_name: String,
	pub category: Category,
	pub slope: f64,
	pub intercept: f64,
	pub points: usize,
	pub x_min: u64,
	pub x_max: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Analysis {
	pub panels: Vec<Panel>,
}

impl Analysis {
	pub fn fits(&self) -> impl Iterator<Item = TrendFit> + '_ {
		self.panels.iter().flat_map(|panel| {
			panel.series.iter().map(move |s| {
				let (x_min, x_max) = s.x_range();
				TrendFit {
					test_name: panel.test_name.clone(),
					category: s.category,
					slope: s.fit.slope,
					intercept: s.fit.intercept,
					points: s.points.len(),
					x_min,
					x_max,
				}
			})
		})
	}

	pub fn group_count(&self) -> usize { self.panels.iter().map(|p| p.series.len()).sum() }
}

/// Order the records, split them into groups and fit each group once.
pub fn analyze(records: &[MeasurementRecord]) -> Result<Analysis> {
	let sorted = partition_and_order(records);
	let mut panels: Vec<Panel> = Vec::new();
	for group in groups(&sorted) {
		let line = fit(&group.points())?;
		tracing::debug!(test = group.test_name, category = %group.category, slope = line.slope, intercept = line.intercept, "fitted trend");
		let series = Series {
			category: group.category,
			points: group.records.iter().map(|r| Point { input_complexity: r.input_complexity, cost: r.cost }).collect(),
			fit: line,
		};
		match panels.last_mut() {
			Some(panel) if panel.test_name == group.test_name => panel.series.push(series),
			_ => panels.push(Panel { test_name: group.test_name.to_string(), series: vec![series] }),
		}
	}
	Ok(Analysis { panels })
}
