#![forbid(unsafe_code)]

use anyhow::Context;
use clap::{Parser, Subcommand};
use console::style;
use gastrend_core::{analyze, load_report, partition_and_order, AnalysisConfig, OutputFormat};
use gastrend_telemetry::metrics::{ENTRIES_PARSED, ENTRIES_SKIPPED, GROUPS_FITTED};
use serde_json::json;
use std::path::{Path, PathBuf};

mod render;

#[derive(Debug, Parser)]
#[command(name = "gastrend", version, about = "Gas trend analysis for harness test reports")]
struct Cli {
	/// Config file (default: $GASTREND_CONFIG, ./gastrend.toml, then the user config dir)
	#[arg(long, global = true)]
	config: Option<PathBuf>,
	/// Log level when RUST_LOG is unset (trace, debug, info, warn, error)
	#[arg(long, global = true)]
	log_level: Option<String>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
	/// Fit a gas trend line per test and category and print it
	Analyze {
		/// Harness report to read (default: test_report.txt)
		report: Option<PathBuf>,
		/// Where to write the chart data artifact (default: bench.json)
		#[arg(long)]
		output: Option<PathBuf>,
		/// Console format: text, table, csv or json
		#[arg(long, value_parser = parse_format)]
		format: Option<OutputFormat>,
		/// Skip writing the chart data artifact
		#[arg(long)]
		no_artifact: bool,
		/// Write run counters in Prometheus text format to this path
		#[arg(long)]
		metrics: Option<PathBuf>,
	},
	/// Print parsed measurement records as JSON, ordered by test, category and complexity
	Records {
		/// Harness report to read (default: test_report.txt)
		report: Option<PathBuf>,
		/// Also list candidate entries that were skipped
		#[arg(long)]
		skipped: bool,
	},
	/// Config helpers
	Config {
		#[command(subcommand)]
		action: ConfigCmd,
	},
}

#[derive(Debug, Subcommand)]
enum ConfigCmd {
	/// Show effective config (resolved from file, env and flags)
	Show,
	/// Write a gastrend.toml template
	WriteTemplate {
		/// Destination path (default: ./gastrend.toml)
		#[arg(long)]
		path: Option<PathBuf>,
		/// Overwrite if file exists
		#[arg(long)]
		force: bool,
	},
}

fn parse_format(s: &str) -> Result<OutputFormat, String> { s.parse().map_err(|e: gastrend_core::Error| e.to_string()) }

fn main() {
	let cli = Cli::parse();
	if let Err(e) = run(cli) {
		eprintln!("error: {e:#}");
		std::process::exit(1);
	}
}

fn run(cli: Cli) -> anyhow::Result<()> {
	let mut cfg = resolve_config(cli.config.as_deref())?;
	if let Some(level) = cli.log_level {
		cfg.log_level = level;
		cfg.validate()?;
	}
	gastrend_telemetry::init_logging(&cfg.log_level)?;

	match cli.command {
		Command::Analyze { report, output, format, no_artifact, metrics } => {
			if let Some(p) = report { cfg.report_path = p; }
			if let Some(p) = output { cfg.output_path = p; }
			if let Some(f) = format { cfg.format = f; }
			run_analyze(&cfg, !no_artifact, metrics.as_deref())
		}
		Command::Records { report, skipped } => {
			if let Some(p) = report { cfg.report_path = p; }
			let outcome = load_report(&cfg.report_path)?;
			let records = partition_and_order(&outcome.records);
			let out = if skipped {
				json!({ "records": records, "skipped": outcome.skipped })
			} else {
				serde_json::to_value(&records)?
			};
			println!("{}", serde_json::to_string_pretty(&out)?);
			Ok(())
		}
		Command::Config { action } => match action {
			ConfigCmd::Show => {
				println!("{}", serde_json::to_string_pretty(&cfg)?);
				Ok(())
			}
			ConfigCmd::WriteTemplate { path, force } => {
				let path = path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
				if path.exists() && !force {
					anyhow::bail!("refusing to overwrite existing file: {} (use --force)", path.display());
				}
				std::fs::write(&path, TEMPLATE_GASTREND_TOML).with_context(|| format!("failed to write {}", path.display()))?;
				eprintln!("{} {}", style("wrote").green(), path.display());
				Ok(())
			}
		},
	}
}

fn run_analyze(cfg: &AnalysisConfig, write_artifact: bool, metrics: Option<&Path>) -> anyhow::Result<()> {
	let outcome = load_report(&cfg.report_path)?;
	let analysis = analyze(&outcome.records)?;
	tracing::info!(records = outcome.records.len(), skipped = outcome.skipped.len(), groups = analysis.group_count(), "analysis complete");
	if !outcome.skipped.is_empty() {
		tracing::warn!(skipped = outcome.skipped.len(), "some report entries were not recognized (run `gastrend records --skipped` for details)");
	}

	let stdout = std::io::stdout();
	let mut lock = stdout.lock();
	render::renderer_for(cfg.format).render(&analysis, &mut lock)?;

	if write_artifact {
		render::write_chart(&analysis, &cfg.output_path)?;
		eprintln!("{} {}", style("wrote").green(), cfg.output_path.display());
	}

	if let Some(path) = metrics {
		gastrend_telemetry::record_counter(ENTRIES_PARSED, outcome.records.len() as u64)?;
		gastrend_telemetry::record_counter(ENTRIES_SKIPPED, outcome.skipped.len() as u64)?;
		gastrend_telemetry::record_counter(GROUPS_FITTED, analysis.group_count() as u64)?;
		std::fs::write(path, gastrend_telemetry::dump_prometheus()).with_context(|| format!("failed to write metrics to {}", path.display()))?;
	}
	Ok(())
}

// ---------------- helper: config discovery -----------------

const CONFIG_FILE_NAME: &str = "gastrend.toml";

/// Defaults, then the first config file found, then `GASTREND_*` env vars.
fn resolve_config(explicit: Option<&Path>) -> anyhow::Result<AnalysisConfig> {
	let mut cfg = match explicit {
		Some(path) => AnalysisConfig::load_from_file(path).with_context(|| format!("failed to load config {}", path.display()))?,
		None => match discover_config_file() {
			Some(path) => AnalysisConfig::load_from_file(&path).with_context(|| format!("failed to load config {}", path.display()))?,
			None => AnalysisConfig::default(),
		},
	};
	cfg.apply_env()?;
	Ok(cfg)
}

fn discover_config_file() -> Option<PathBuf> {
	// Search order: $GASTREND_CONFIG -> ./gastrend.toml -> platform config dir
	let mut candidates: Vec<PathBuf> = Vec::new();
	if let Ok(p) = std::env::var("GASTREND_CONFIG") {
		if !p.trim().is_empty() { candidates.push(PathBuf::from(p)); }
	}
	candidates.push(PathBuf::from(CONFIG_FILE_NAME));
	if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
		candidates.push(PathBuf::from(xdg).join("gastrend").join(CONFIG_FILE_NAME));
	}
	if let Ok(home) = std::env::var("HOME") {
		candidates.push(PathBuf::from(home).join(".config").join("gastrend").join(CONFIG_FILE_NAME));
	}
	candidates.into_iter().find(|p| p.is_file())
}

const TEMPLATE_GASTREND_TOML: &str = r#"# gastrend configuration (template)

# Log level when RUST_LOG is unset: trace, debug, info, warn, error
log_level = "info"

# Harness report produced by the test run
report_path = "test_report.txt"

# Chart data artifact written by `gastrend analyze`
output_path = "bench.json"

# Console format: text, table, csv, json
format = "text"
"#;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn template_parses_as_default_config() {
		let cfg: AnalysisConfig = toml::from_str(TEMPLATE_GASTREND_TOML).unwrap();
		assert_eq!(cfg, AnalysisConfig::default());
	}

	#[test]
	fn format_flag_parser() {
		assert_eq!(parse_format("csv").unwrap(), OutputFormat::Csv);
		assert!(parse_format("svg").unwrap_err().contains("invalid format"));
	}

	#[test]
	fn cli_definition_is_consistent() {
		use clap::CommandFactory;
		Cli::command().debug_assert();
	}
}
