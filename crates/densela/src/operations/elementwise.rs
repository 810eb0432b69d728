//! Element-wise kernels.

use super::copy::{check_destination, detach_if_aliased};
use crate::error::{LinalgError, Result};
use crate::storage::Block;
use crate::strides::MatLayout;

/// Binary operation applied element by element.
///
/// Comparisons produce `1.0` for true and `0.0` for false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementOp {
    Add,
    Sub,
    Mul,
    Div,
    Lt,
    Gt,
    Le,
    Ge,
}

impl ElementOp {
    #[inline]
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            ElementOp::Add => a + b,
            ElementOp::Sub => a - b,
            ElementOp::Mul => a * b,
            ElementOp::Div => a / b,
            ElementOp::Lt => f64::from(u8::from(a < b)),
            ElementOp::Gt => f64::from(u8::from(a > b)),
            ElementOp::Le => f64::from(u8::from(a <= b)),
            ElementOp::Ge => f64::from(u8::from(a >= b)),
        }
    }

    /// Operator name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            ElementOp::Add => "add",
            ElementOp::Sub => "sub",
            ElementOp::Mul => "mul",
            ElementOp::Div => "div",
            ElementOp::Lt => "lt",
            ElementOp::Gt => "gt",
            ElementOp::Le => "le",
            ElementOp::Ge => "ge",
        }
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            ElementOp::Lt | ElementOp::Gt | ElementOp::Le | ElementOp::Ge
        )
    }
}

/// `dst[k] = op(dst[k], src[k])` for every logical position `k`.
///
/// The shapes are checked before anything is written.
///
/// # Example
///
/// ```
/// use densela::operations::{ElementOp, zip_assign};
/// use densela::storage::Block;
/// use densela::strides::MatLayout;
///
/// let a = Block::from_vec(vec![1.0, 2.0, 3.0]);
/// let b = Block::from_vec(vec![4.0, 5.0, 6.0]);
/// let l = MatLayout::row_major(1, 3);
/// zip_assign(&a, l, &b, l, ElementOp::Add).unwrap();
/// assert_eq!(a.get(2), 9.0);
/// ```
pub fn zip_assign(
    dst: &Block,
    dst_layout: MatLayout,
    src: &Block,
    src_layout: MatLayout,
    op: ElementOp,
) -> Result<()> {
    if dst_layout.shape() != src_layout.shape() {
        return Err(LinalgError::dims(
            op.name(),
            &dst_layout.shape(),
            &src_layout.shape(),
        ));
    }
    check_destination(dst_layout, op.name())?;
    let (src, src_layout) = detach_if_aliased(dst, src, src_layout);
    for (d, s) in dst_layout.positions().zip(src_layout.positions()) {
        dst.set(d, op.apply(dst.get(d), src.get(s)));
    }
    Ok(())
}

/// Set every element of the region to `value`.
pub fn fill(block: &Block, layout: MatLayout, value: f64) {
    for p in layout.positions() {
        block.set(p, value);
    }
}

/// Multiply every element of the region by `alpha`.
pub fn scale(block: &Block, layout: MatLayout, alpha: f64) {
    for p in layout.positions() {
        block.set(p, block.get(p) * alpha);
    }
}

/// Add `constant` to every element of the region.
pub fn add_constant(block: &Block, layout: MatLayout, constant: f64) {
    for p in layout.positions() {
        block.set(p, block.get(p) + constant);
    }
}

/// Replace every element `x` (row-major order) with `f(x)`.
pub fn map_assign<F>(block: &Block, layout: MatLayout, mut f: F)
where
    F: FnMut(f64) -> f64,
{
    for p in layout.positions() {
        block.set(p, f(block.get(p)));
    }
}
