//! Console renderers and the chart data artifact.

use anyhow::Context;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use gastrend_core::{Analysis, Category, OutputFormat, TrendFit};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

pub trait Renderer {
	fn render(&self, analysis: &Analysis, out: &mut dyn Write) -> anyhow::Result<()>;
}

pub fn renderer_for(format: OutputFormat) -> Box<dyn Renderer> {
	match format {
		OutputFormat::Text => Box::new(TextRenderer),
		OutputFormat::Table => Box::new(TableRenderer),
		OutputFormat::Csv => Box::new(CsvRenderer),
		OutputFormat::Json => Box::new(JsonRenderer),
	}
}

/// Human readable per-group summary.
pub struct TextRenderer;

impl Renderer for TextRenderer {
	fn render(&self, analysis: &Analysis, out: &mut dyn Write) -> anyhow::Result<()> {
		for fit in analysis.fits() {
			writeln!(out, "Linear fit for {} in {}:", fit.category.label(), fit.test_name)?;
			writeln!(out, "  Intercept (gas used at zero input complexity): {:.2}", fit.intercept)?;
			writeln!(out, "  Slope (gas per unit of input complexity): {:.2}", fit.slope)?;
		}
		Ok(())
	}
}

pub struct TableRenderer;

impl Renderer for TableRenderer {
	fn render(&self, analysis: &Analysis, out: &mut dyn Write) -> anyhow::Result<()> {
		let mut table = Table::new();
		table
			.load_preset(UTF8_FULL)
			.set_content_arrangement(ContentArrangement::Dynamic)
			.set_header(vec!["Test", "Category", "Points", "Complexity", "Intercept", "Slope"]);
		for fit in analysis.fits() {
			table.add_row(vec![
				fit.test_name.clone(),
				fit.category.label().to_string(),
				fit.points.to_string(),
				format!("{}..={}", fit.x_min, fit.x_max),
				format!("{:.2}", fit.intercept),
				format!("{:.2}", fit.slope),
			]);
		}
		writeln!(out, "{table}")?;
		Ok(())
	}
}

pub struct CsvRenderer;

impl Renderer for CsvRenderer {
	fn render(&self, analysis: &Analysis, out: &mut dyn Write) -> anyhow::Result<()> {
		writeln!(out, "test_name,category,points,x_min,x_max,intercept,slope")?;
		for f in analysis.fits() {
			writeln!(out, "{},{},{},{},{},{:.6},{:.6}", f.test_name, f.category, f.points, f.x_min, f.x_max, f.intercept, f.slope)?;
		}
		Ok(())
	}
}

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
	fn render(&self, analysis: &Analysis, out: &mut dyn Write) -> anyhow::Result<()> {
		let fits: Vec<TrendFit> = analysis.fits().collect();
		serde_json::to_writer_pretty(&mut *out, &fits)?;
		writeln!(out)?;
		Ok(())
	}
}

// ---------------- chart artifact -----------------

#[derive(Debug, Serialize)]
struct ChartDocument<'a> {
	x_label: &'static str,
	y_label: &'static str,
	panels: Vec<ChartPanel<'a>>,
}

#[derive(Debug, Serialize)]
struct ChartPanel<'a> {
	title: String,
	test_name: &'a str,
	series: Vec<ChartSeries>,
}

#[derive(Debug, Serialize)]
struct ChartSeries {
	category: Category,
	label: &'static str,
	/// `[complexity, gas]` pairs.
	points: Vec<[u64; 2]>,
	/// Trend line endpoints across the observed complexity range.
	fit_line: [[f64; 2]; 2],
	slope: f64,
	intercept: f64,
}

/// Write the chart data for `analysis` to `path` as JSON, one panel per test.
pub fn write_chart(analysis: &Analysis, path: &Path) -> anyhow::Result<()> {
	let panels = analysis
		.panels
		.iter()
		.map(|panel| ChartPanel {
			title: format!("Test: {}", panel.test_name),
			test_name: &panel.test_name,
			series: panel
				.series
				.iter()
				.map(|s| {
					let (lo, hi) = s.x_range();
					let (lo, hi) = (lo as f64, hi as f64);
					ChartSeries {
						category: s.category,
						label: s.category.label(),
						points: s.points.iter().map(|p| [p.input_complexity, p.cost]).collect(),
						fit_line: [[lo, s.fit.evaluate(lo)], [hi, s.fit.evaluate(hi)]],
						slope: s.fit.slope,
						intercept: s.fit.intercept,
					}
				})
				.collect(),
		})
		.collect();
	let doc = ChartDocument { x_label: "Input Complexity", y_label: "Gas", panels };

	if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
		std::fs::create_dir_all(parent).with_context(|| format!("failed to create {}", parent.display()))?;
	}
	let body = serde_json::to_string_pretty(&doc)?;
	std::fs::write(path, body).with_context(|| format!("failed to write chart data to {}", path.display()))?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use gastrend_core::{analyze, Category, MeasurementRecord};

	fn sample() -> Analysis {
		let rec = |x: u64, cost: u64, category| MeasurementRecord {
			test_name: "add".into(),
			category,
			input_complexity: x,
			cost,
			step_count: 0,
			memory_hole_count: 0,
			builtin_usage: Default::default(),
		};
		analyze(&[rec(0, 1, Category::Cpu), rec(1, 3, Category::Cpu), rec(2, 5, Category::Cpu), rec(3, 70, Category::Local)]).unwrap()
	}

	fn render_to_string(format: OutputFormat) -> String {
		let mut buf = Vec::new();
		renderer_for(format).render(&sample(), &mut buf).unwrap();
		String::from_utf8(buf).unwrap()
	}

	#[test]
	fn text_uses_two_fraction_digits() {
		let s = render_to_string(OutputFormat::Text);
		assert!(s.contains("Linear fit for CPU in add:\n"));
		assert!(s.contains("  Intercept (gas used at zero input complexity): 1.00\n"));
		assert!(s.contains("  Slope (gas per unit of input complexity): 2.00\n"));
		assert!(s.contains("Linear fit for Local in add:\n"));
		assert!(s.contains("): 70.00\n"));
	}

	#[test]
	fn csv_has_header_and_one_row_per_group() {
		let s = render_to_string(OutputFormat::Csv);
		let lines: Vec<_> = s.lines().collect();
		assert_eq!(lines.len(), 3);
		assert_eq!(lines[0], "test_name,category,points,x_min,x_max,intercept,slope");
		assert_eq!(lines[1], "add,cpu,3,0,2,1.000000,2.000000");
		assert_eq!(lines[2], "add,local,1,3,3,70.000000,0.000000");
	}

	#[test]
	fn json_lists_fits() {
		let s = render_to_string(OutputFormat::Json);
		let v: serde_json::Value = serde_json::from_str(&s).unwrap();
		assert_eq!(v.as_array().unwrap().len(), 2);
		assert_eq!(v[0]["category"], "cpu");
		assert_eq!(v[1]["x_min"], 3);
	}

	#[test]
	fn table_contains_rows() {
		let s = render_to_string(OutputFormat::Table);
		assert!(s.contains("Intercept"));
		assert!(s.contains("0..=2"));
		assert!(s.contains("Local"));
	}

	#[test]
	fn chart_artifact_holds_points_and_fit_line() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("out").join("bench.json");
		write_chart(&sample(), &path).unwrap();
		let v: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
		assert_eq!(v["panels"].as_array().unwrap().len(), 1);
		let cpu = &v["panels"][0]["series"][0];
		assert_eq!(v["panels"][0]["title"], "Test: add");
		assert_eq!(cpu["points"].as_array().unwrap().len(), 3);
		assert_eq!(cpu["fit_line"][1][0], 2.0);
		assert_eq!(cpu["fit_line"][1][1], 5.0);
	}
}
