//! Least-squares trend fitting.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendLine {
	/// Cost per unit of input complexity.
	pub slope: f64,
	/// Cost extrapolated to zero complexity.
	pub intercept: f64,
}

impl TrendLine {
	pub fn evaluate(&self, x: f64) -> f64 { self.intercept + self.slope * x }
}

/// Ordinary least-squares fit of `y` on `x`.
///
/// When every point shares the same `x` (a single point included) the line
/// is horizontal through the mean `y`. An empty slice is a caller bug and
/// returns [`Error::EmptyGroup`].
///
/// ```
/// use gastrend_core::trend::fit;
/// let line = fit(&[(0, 1), (1, 3), (2, 5)]).unwrap();
/// assert!((line.slope - 2.0).abs() < 1e-9);
/// assert!((line.intercept - 1.0).abs() < 1e-9);
/// ```
pub fn fit(points: &[(u64, u64)]) -> Result<TrendLine> {
	if points.is_empty() {
		return Err(Error::EmptyGroup);
	}
	let n = points.len() as f64;
	let mean_y = points.iter().map(|&(_, y)| y as f64).sum::<f64>() / n;
	// Decided on the integers: float rounding of large x leaves a nonzero sxx.
	let x0 = points[0].0;
	if points.iter().all(|&(x, _)| x == x0) {
		return Ok(TrendLine { slope: 0.0, intercept: mean_y });
	}
	let mean_x = points.iter().map(|&(x, _)| x as f64).sum::<f64>() / n;

	// Centered sums keep precision for large gas values.
	let (mut sxx, mut sxy) = (0.0f64, 0.0f64);
	for &(x, y) in points {
		let dx = x as f64 - mean_x;
		sxx += dx * dx;
		sxy += dx * (y as f64 - mean_y);
	}
	// Distinct integers that collapse to one f64.
	if sxx == 0.0 {
		return Ok(TrendLine { slope: 0.0, intercept: mean_y });
	}
	let slope = sxy / sxx;
	Ok(TrendLine { slope, intercept: mean_y - slope * mean_x })
}

#[cfg(test)]
mod tests {
	use super::*;

	fn close(a: f64, b: f64) -> bool { (a - b).abs() < 1e-9 }

	#[test]
	fn exact_line_is_recovered() {
		let line = fit(&[(0, 1), (1, 3), (2, 5)]).unwrap();
		assert!(close(line.slope, 2.0));
		assert!(close(line.intercept, 1.0));
	}

	#[test]
	fn identical_x_gives_horizontal_line_through_mean() {
		let line = fit(&[(5, 10), (5, 20)]).unwrap();
		assert_eq!(line.slope, 0.0);
		assert!(close(line.intercept, 15.0));
	}

	#[test]
	fn identical_huge_x_stays_horizontal() {
		let x = 0x1F_FFFF_FFFF_FFFF;
		let pts: Vec<(u64, u64)> = [1, 1, 1, 1, 2].iter().map(|&y| (x, y)).collect();
		let line = fit(&pts).unwrap();
		assert_eq!(line.slope, 0.0);
		assert!(close(line.intercept, 1.2));

		let line = fit(&[(u64::MAX, 3), (u64::MAX, 5)]).unwrap();
		assert_eq!(line.slope, 0.0);
		assert!(close(line.intercept, 4.0));
	}

	#[test]
	fn x_values_equal_only_as_floats_stay_finite() {
		let line = fit(&[(1 << 53, 1), ((1 << 53) + 1, 3)]).unwrap();
		assert_eq!(line.slope, 0.0);
		assert!(close(line.intercept, 2.0));
	}

	#[test]
	fn single_point_is_horizontal() {
		let line = fit(&[(7, 42)]).unwrap();
		assert_eq!(line.slope, 0.0);
		assert!(close(line.intercept, 42.0));
		assert!(close(line.evaluate(1000.0), 42.0));
	}

	#[test]
	fn empty_input_fails_fast() {
		assert!(matches!(fit(&[]), Err(Error::EmptyGroup)));
	}

	#[test]
	fn noisy_points_match_closed_form() {
		// x: 1,2,3,4  y: 2,4,5,4 -> slope 0.7, intercept 2.0
		let line = fit(&[(1, 2), (2, 4), (3, 5), (4, 4)]).unwrap();
		assert!(close(line.slope, 0.7));
		assert!(close(line.intercept, 2.0));
	}

	#[test]
	fn duplicates_weigh_in() {
		// (0,0) twice and (3,3): mean_x 1, mean_y 1, sxx 6, sxy 6
		let line = fit(&[(0, 0), (0, 0), (3, 3)]).unwrap();
		assert!(close(line.slope, 1.0));
		assert!(close(line.intercept, 0.0));
	}
}
