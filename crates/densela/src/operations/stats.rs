//! Order statistics over a sorted copy of the data.

use crate::error::{LinalgError, Result};

/// Sorted copy of `values` in IEEE total order.
///
/// Positive NaNs sort after `+inf` and negative NaNs before `-inf`.
pub fn sorted_copy(values: impl IntoIterator<Item = f64>) -> Vec<f64> {
    let mut data: Vec<f64> = values.into_iter().collect();
    data.sort_by(f64::total_cmp);
    data
}

/// Median of already sorted data.
///
/// For an even count the two middle values are averaged.
pub fn median_from_sorted(sorted: &[f64]) -> Result<f64> {
    let n = sorted.len();
    if n == 0 {
        return Err(LinalgError::invalid_argument("median of an empty sequence"));
    }
    let mid = n / 2;
    if n % 2 == 1 {
        Ok(sorted[mid])
    } else {
        Ok(0.5 * (sorted[mid - 1] + sorted[mid]))
    }
}

/// Quantile `q` of already sorted data by linear interpolation.
///
/// The fractional rank is `q * (n - 1)`; `q = 0` gives the minimum and
/// `q = 1` the maximum.
pub fn quantile_from_sorted(sorted: &[f64], q: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&q) {
        return Err(LinalgError::invalid_argument(format!(
            "quantile fraction {q} outside [0, 1]"
        )));
    }
    let n = sorted.len();
    if n == 0 {
        return Err(LinalgError::invalid_argument(
            "quantile of an empty sequence",
        ));
    }
    let rank = q * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let delta = rank - lo as f64;
    if lo + 1 < n {
        Ok((1.0 - delta) * sorted[lo] + delta * sorted[lo + 1])
    } else {
        Ok(sorted[lo])
    }
}
