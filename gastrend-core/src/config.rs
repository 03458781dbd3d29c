use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::Path, path::PathBuf, str::FromStr};

/// How fitted trends are printed to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
	#[default]
	Text,
	Table,
	Csv,
	Json,
}

impl FromStr for OutputFormat {
	type Err = Error;
	fn from_str(s: &str) -> Result<Self> {
		match s.to_ascii_lowercase().as_str() {
			"text" => Ok(Self::Text),
			"table" => Ok(Self::Table),
			"csv" => Ok(Self::Csv),
			"json" => Ok(Self::Json),
			other => Err(Error::config(format!("invalid format: {other} (expected text, table, csv or json)"))),
		}
	}
}

impl fmt::Display for OutputFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Text => "text",
			Self::Table => "table",
			Self::Csv => "csv",
			Self::Json => "json",
		})
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
	pub log_level: String,
	/// Harness report to analyze.
	pub report_path: PathBuf,
	/// Where the chart data artifact is written.
	pub output_path: PathBuf,
	pub format: OutputFormat,
}

impl Default for AnalysisConfig {
	fn default() -> Self {
		Self {
			log_level: "info".into(),
			report_path: PathBuf::from("test_report.txt"),
			output_path: PathBuf::from("bench.json"),
			format: OutputFormat::Text,
		}
	}
}

impl AnalysisConfig {
	pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let data = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
		let cfg: Self = toml::from_str(&data).map_err(|e| Error::config(format!("toml parse error: {e}")))?;
		cfg.validate()?;
		Ok(cfg)
	}

	pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
		let path = path.as_ref();
		let data = toml::to_string_pretty(self).map_err(|e| Error::config(format!("toml encode error: {e}")))?;
		fs::write(path, data).map_err(|e| Error::io(path, e))
	}

	/// Override fields from `GASTREND_*` variables that are set and non-empty.
	pub fn apply_env(&mut self) -> Result<()> {
		if let Some(v) = env_var("GASTREND_LOG_LEVEL") { self.log_level = v; }
		if let Some(v) = env_var("GASTREND_REPORT") { self.report_path = PathBuf::from(v); }
		if let Some(v) = env_var("GASTREND_OUTPUT") { self.output_path = PathBuf::from(v); }
		if let Some(v) = env_var("GASTREND_FORMAT") { self.format = v.parse()?; }
		self.validate()
	}

	pub fn validate(&self) -> Result<()> {
		let allowed = ["trace", "debug", "info", "warn", "error"];
		if !allowed.contains(&self.log_level.as_str()) {
			return Err(Error::config(format!("invalid log_level: {}", self.log_level)));
		}
		if self.report_path.as_os_str().is_empty() {
			return Err(Error::config("report_path must not be empty"));
		}
		if self.output_path.as_os_str().is_empty() {
			return Err(Error::config("output_path must not be empty"));
		}
		Ok(())
	}
}

fn env_var(key: &str) -> Option<String> {
	std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
