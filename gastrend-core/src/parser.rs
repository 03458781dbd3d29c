//! Report parser.
//!
//! Recognizes the five-line entry the test harness prints for every passing
//! `rust_tests` case:
//!
//! ```text
//! [PASS] tests::rust_tests::test_<name>_<cpu|local>_<complexity> (gas: ~<cost>)
//!         steps: <n>
//!         memory holes: <n>
//!         builtins: ("<builtin>": <n>, ...)
//!         syscalls: ()
//! ```
//!
//! Anything else in the report is noise and is skipped. Lines that carry the
//! header marker but do not complete an entry are reported through
//! [`ParseOutcome::skipped`].

use serde::Serialize;
use std::fmt;

use crate::builtins::parse_builtins;
use crate::record::{Category, MeasurementRecord};

/// Prefix every candidate header carries.
pub const HEADER_MARKER: &str = "[PASS] tests::rust_tests::test_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
	/// Identifier carries neither the `cpu` nor the `local` tag.
	UnknownCategory,
	/// Header line does not end in `(gas: ~<n>)` or a number is unreadable.
	MalformedHeader,
	MissingSteps,
	MissingMemoryHoles,
	MissingBuiltins,
	/// The trailing `syscalls: ()` anchor is absent or not empty.
	MissingSyscalls,
}

impl fmt::Display for SkipReason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			SkipReason::UnknownCategory => "unknown category",
			SkipReason::MalformedHeader => "malformed header",
			SkipReason::MissingSteps => "missing steps line",
			SkipReason::MissingMemoryHoles => "missing memory holes line",
			SkipReason::MissingBuiltins => "missing builtins line",
			SkipReason::MissingSyscalls => "missing syscalls anchor",
		};
		f.write_str(s)
	}
}

/// A candidate entry that was left out of the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
	/// 1-based line of the header.
	pub line: usize,
	/// Test identifier following `test_`, as far as it could be read.
	pub identifier: String,
	pub reason: SkipReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseOutcome {
	pub records: Vec<MeasurementRecord>,
	pub skipped: Vec<SkippedEntry>,
}

/// Parse every recognizable entry out of `report`.
///
/// Output order is cpu entries followed by local entries, each in report
/// order. Use [`crate::partition::partition_and_order`] for a deterministic
/// order.
pub fn parse(report: &str) -> Vec<MeasurementRecord> { parse_with_diagnostics(report).records }

/// Like [`parse`], also returning the candidate entries that were skipped.
pub fn parse_with_diagnostics(report: &str) -> ParseOutcome {
	let lines: Vec<&str> = report.lines().collect();
	let headers: Vec<(usize, Result<Header<'_>, Rejected<'_>>)> = lines
		.iter()
		.copied()
		.enumerate()
		.filter_map(|(idx, line)| scan_header(line).map(|h| (idx, h)))
		.collect();

	let mut outcome = ParseOutcome::default();
	for (idx, header) in &headers {
		if let Err(rejected) = header {
			outcome.skipped.push(SkippedEntry { line: idx + 1, identifier: rejected.identifier.to_string(), reason: rejected.reason });
		}
	}
	for category in Category::ALL {
		match_category(&lines, &headers, category, &mut outcome);
	}
	outcome.skipped.sort_by_key(|s| s.line);

	for skipped in &outcome.skipped {
		tracing::debug!(line = skipped.line, identifier = %skipped.identifier, reason = %skipped.reason, "skipping report entry");
	}
	tracing::debug!(records = outcome.records.len(), skipped = outcome.skipped.len(), "report parsed");
	outcome
}

/// One pass over the report for a single category. Matches never overlap:
/// after a complete entry, scanning resumes below its syscalls line.
fn match_category(lines: &[&str], headers: &[(usize, Result<Header<'_>, Rejected<'_>>)], category: Category, outcome: &mut ParseOutcome) {
	let mut resume_at = 0usize;
	for (idx, header) in headers {
		let Ok(header) = header else { continue };
		if header.category != category || *idx < resume_at {
			continue;
		}
		let mut cursor = Cursor { lines, pos: idx + 1 };
		match match_body(&mut cursor) {
			Ok(body) => {
				outcome.records.push(MeasurementRecord {
					test_name: header.name.to_string(),
					category,
					input_complexity: header.complexity,
					cost: header.cost,
					step_count: body.steps,
					memory_hole_count: body.memory_holes,
					builtin_usage: parse_builtins(body.builtins),
				});
				resume_at = cursor.pos;
			}
			Err(reason) => outcome.skipped.push(SkippedEntry { line: idx + 1, identifier: header.identifier.to_string(), reason }),
		}
	}
}

#[derive(Debug)]
struct Header<'a> {
	identifier: &'a str,
	name: &'a str,
	category: Category,
	complexity: u64,
	cost: u64,
}

#[derive(Debug)]
struct Rejected<'a> {
	identifier: &'a str,
	reason: SkipReason,
}

/// `None` when the line carries no header marker at all.
fn scan_header(line: &str) -> Option<Result<Header<'_>, Rejected<'_>>> {
	let mut first_err = None;
	for (idx, _) in line.match_indices(HEADER_MARKER) {
		match parse_header_tail(&line[idx + HEADER_MARKER.len()..]) {
			Ok(h) => return Some(Ok(h)),
			Err(e) => {
				first_err.get_or_insert(e);
			}
		}
	}
	first_err.map(Err)
}

fn parse_header_tail(tail: &str) -> Result<Header<'_>, Rejected<'_>> {
	let end = tail.find(|c: char| !is_word_char(c)).unwrap_or(tail.len());
	let identifier = &tail[..end];
	let malformed = Rejected { identifier, reason: SkipReason::MalformedHeader };
	if identifier.is_empty() {
		return Err(malformed);
	}

	let cost = tail[end..]
		.trim_end()
		.strip_prefix(" (gas: ~")
		.and_then(|s| s.strip_suffix(')'))
		.and_then(parse_digits);
	let Some(cost) = cost else { return Err(malformed) };

	for category in Category::ALL {
		let tag = format!("_{category}_");
		let Some((name, digits)) = identifier.rsplit_once(tag.as_str()) else { continue };
		if name.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
			continue;
		}
		// digits too large for u64
		let Some(complexity) = parse_digits(digits) else { return Err(malformed) };
		return Ok(Header { identifier, name, category, complexity, cost });
	}
	Err(Rejected { identifier, reason: SkipReason::UnknownCategory })
}

struct Body<'a> {
	steps: u64,
	memory_holes: u64,
	builtins: &'a str,
}

fn match_body<'a>(cursor: &mut Cursor<'a>) -> Result<Body<'a>, SkipReason> {
	let steps = cursor.next_field().and_then(|l| numeric_field(l, "steps: ")).ok_or(SkipReason::MissingSteps)?;
	let memory_holes = cursor
		.next_field()
		.and_then(|l| numeric_field(l, "memory holes: "))
		.ok_or(SkipReason::MissingMemoryHoles)?;
	let builtins = cursor
		.next_field()
		.and_then(|l| l.strip_prefix("builtins: (")?.strip_suffix(')'))
		.ok_or(SkipReason::MissingBuiltins)?;
	cursor.next_field().filter(|l| *l == "syscalls: ()").ok_or(SkipReason::MissingSyscalls)?;
	Ok(Body { steps, memory_holes, builtins })
}

/// Walks the lines following a header.
struct Cursor<'a> {
	lines: &'a [&'a str],
	pos: usize,
}

impl<'a> Cursor<'a> {
	/// Next non-blank line with surrounding whitespace removed.
	///
	/// A field line must be indented unless blank lines precede it; `None`
	/// when the report ends or the next line starts at column zero.
	fn next_field(&mut self) -> Option<&'a str> {
		let mut after_blank = false;
		while let Some(line) = self.lines.get(self.pos) {
			self.pos += 1;
			let body = line.trim();
			if body.is_empty() {
				after_blank = true;
				continue;
			}
			let indented = line.starts_with(char::is_whitespace);
			return (indented || after_blank).then_some(body);
		}
		None
	}
}

fn numeric_field(line: &str, label: &str) -> Option<u64> { line.strip_prefix(label).and_then(parse_digits) }

/// Strict unsigned integer: non-empty ASCII digits that fit in `u64`.
fn parse_digits(s: &str) -> Option<u64> {
	if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
		return None;
	}
	s.parse().ok()
}

fn is_word_char(c: char) -> bool { c.is_alphanumeric() || c == '_' }
