//! Scans and reductions over a strided region.
//!
//! Positions are reported as row-major logical indices. On ties the lowest
//! index wins. A NaN stops the scan: its index is returned for every extremum.

use crate::error::{LinalgError, Result};
use crate::storage::Block;
use crate::strides::MatLayout;

/// Index of the smallest element, or `None` when the region is empty.
pub fn min_index(block: &Block, layout: MatLayout) -> Option<usize> {
    extremum_index(block, layout, |x, best| x < best)
}

/// Index of the largest element, or `None` when the region is empty.
pub fn max_index(block: &Block, layout: MatLayout) -> Option<usize> {
    extremum_index(block, layout, |x, best| x > best)
}

/// Indices of the smallest and largest elements in one pass.
pub fn minmax_index(block: &Block, layout: MatLayout) -> Option<(usize, usize)> {
    let mut iter = layout.positions().map(|p| block.get(p)).enumerate();
    let (_, first) = iter.next()?;
    if first.is_nan() {
        return Some((0, 0));
    }
    let (mut imin, mut min) = (0, first);
    let (mut imax, mut max) = (0, first);
    for (k, x) in iter {
        if x.is_nan() {
            return Some((k, k));
        }
        if x < min {
            imin = k;
            min = x;
        }
        if x > max {
            imax = k;
            max = x;
        }
    }
    Some((imin, imax))
}

fn extremum_index<F>(block: &Block, layout: MatLayout, better: F) -> Option<usize>
where
    F: Fn(f64, f64) -> bool,
{
    let mut iter = layout.positions().map(|p| block.get(p)).enumerate();
    let (_, mut best) = iter.next()?;
    if best.is_nan() {
        return Some(0);
    }
    let mut index = 0;
    for (k, x) in iter {
        if x.is_nan() {
            return Some(k);
        }
        if better(x, best) {
            best = x;
            index = k;
        }
    }
    Some(index)
}

/// Sum of all elements (0.0 for an empty region).
pub fn sum(block: &Block, layout: MatLayout) -> f64 {
    layout.positions().map(|p| block.get(p)).sum()
}

/// Inner product of two regions with the same shape.
pub fn dot(a: &Block, la: MatLayout, b: &Block, lb: MatLayout) -> Result<f64> {
    if la.shape() != lb.shape() {
        return Err(LinalgError::dims("dot", &la.shape(), &lb.shape()));
    }
    Ok(la
        .positions()
        .zip(lb.positions())
        .map(|(p, q)| a.get(p) * b.get(q))
        .sum())
}

/// `true` if `pred` holds for every element; vacuously true when empty.
pub fn all<F>(block: &Block, layout: MatLayout, pred: F) -> bool
where
    F: Fn(f64) -> bool,
{
    layout.positions().all(|p| pred(block.get(p)))
}

pub fn is_null(block: &Block, layout: MatLayout) -> bool {
    all(block, layout, |x| x == 0.0)
}

pub fn is_positive(block: &Block, layout: MatLayout) -> bool {
    all(block, layout, |x| x > 0.0)
}

pub fn is_negative(block: &Block, layout: MatLayout) -> bool {
    all(block, layout, |x| x < 0.0)
}

pub fn is_nonnegative(block: &Block, layout: MatLayout) -> bool {
    all(block, layout, |x| x >= 0.0)
}
