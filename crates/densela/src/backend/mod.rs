//! Backend abstraction for matrix products.
//!
//! # Backends
//!
//! - `FaerBackend`: faer's `matmul` over the strided storage (default)
//! - `GenericBackend`: naive loop-based implementation (always available)
//!
//! The entry points [`gemm`] and [`gemv`] validate shapes, resolve the
//! transpose flags into zero-copy layouts, and pick a backend from the
//! thread's [`Config`](crate::config::Config).

mod faer_interop;
mod generic;

pub use faer_interop::FaerBackend;
pub use generic::GenericBackend;

use crate::config::{self, BackendKind};
use crate::error::{LinalgError, Result};
use crate::storage::Block;
use crate::strides::{MatLayout, VecLayout, validate_bounds};

/// A strided matrix region of a block.
#[derive(Debug, Clone, Copy)]
pub struct Region<'a> {
    pub block: &'a Block,
    pub layout: MatLayout,
}

impl<'a> Region<'a> {
    pub fn new(block: &'a Block, layout: MatLayout) -> Self {
        Self { block, layout }
    }

    /// A vector region seen as an `n × 1` column.
    pub fn column(block: &'a Block, layout: VecLayout) -> Self {
        Self::new(block, MatLayout::from_column(layout))
    }

    fn with_layout(self, layout: MatLayout) -> Self {
        Self { layout, ..self }
    }

    /// Fail unless every element of the region lies inside its block.
    pub fn check_bounds(&self) -> Result<()> {
        match self.layout.checked_end() {
            Some(end) => validate_bounds(self.block.len(), end),
            None => Err(LinalgError::dims(
                "layout bounds",
                &[self.layout.offset, self.layout.rows, self.layout.cols],
                &[self.block.len()],
            )),
        }
    }
}

/// Validate the operands of `c := alpha * a * b + beta * c`.
///
/// `a` must be `m × k`, `b` `k × n` and `c` `m × n`; all three must lie
/// inside their blocks, and `c` must not map two elements to one address.
/// Returns `[m, n, k]`.
pub fn check_product(a: &Region<'_>, b: &Region<'_>, c: &Region<'_>) -> Result<[usize; 3]> {
    let [m, k] = a.layout.shape();
    let [kb, n] = b.layout.shape();
    if k != kb {
        return Err(LinalgError::dims("gemm", &a.layout.shape(), &b.layout.shape()));
    }
    if c.layout.shape() != [m, n] {
        return Err(LinalgError::dims("gemm", &[m, n], &c.layout.shape()));
    }
    a.check_bounds()?;
    b.check_bounds()?;
    c.check_bounds()?;
    if !c.layout.is_injective() {
        return Err(LinalgError::invalid_argument(
            "gemm output has elements sharing one storage cell",
        ));
    }
    Ok([m, n, k])
}

/// Whether an operand enters a product as is or transposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transpose {
    #[default]
    No,
    Yes,
}

impl Transpose {
    fn apply(self, layout: MatLayout) -> MatLayout {
        match self {
            Transpose::No => layout,
            Transpose::Yes => layout.transposed(),
        }
    }
}

/// Backend trait for dense matrix products.
///
/// Operands arrive already transposed. Implementations validate them with
/// [`check_product`] before touching storage.
pub trait LinalgBackend {
    /// `c := alpha * a * b + beta * c`.
    ///
    /// When `beta == 0` the previous contents of `c` are not read, so NaNs
    /// in `c` do not propagate.
    fn gemm(
        &self,
        alpha: f64,
        a: Region<'_>,
        b: Region<'_>,
        beta: f64,
        c: Region<'_>,
    ) -> Result<()>;

    /// `y := alpha * a * x + beta * y`, with `x` and `y` given as columns.
    fn gemv(
        &self,
        alpha: f64,
        a: Region<'_>,
        x: Region<'_>,
        beta: f64,
        y: Region<'_>,
    ) -> Result<()> {
        self.gemm(alpha, a, x, beta, y)
    }
}

fn backend_for(m: usize, n: usize, k: usize) -> &'static dyn LinalgBackend {
    let config = config::get();
    let small = config.small_gemm_cutoff > 0
        && m.saturating_mul(n).saturating_mul(k) < config.small_gemm_cutoff;
    match config.backend {
        BackendKind::Faer if !small => &FaerBackend,
        _ => &GenericBackend,
    }
}

/// `c := alpha * op(a) * op(b) + beta * c`.
///
/// # Example
///
/// ```
/// use densela::Matrix;
/// use densela::backend::{Transpose, gemm};
///
/// let a = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
/// let b = Matrix::eye(2);
/// let mut c = Matrix::zeros(2, 2);
/// gemm(Transpose::Yes, Transpose::No, 1.0, &a, &b, 0.0, &mut c).unwrap();
/// assert_eq!(c.get(0, 1).unwrap(), 3.0);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn gemm<A, B, C>(
    trans_a: Transpose,
    trans_b: Transpose,
    alpha: f64,
    a: &A,
    b: &B,
    beta: f64,
    c: &mut C,
) -> Result<()>
where
    A: AsRegion + ?Sized,
    B: AsRegion + ?Sized,
    C: AsRegion + ?Sized,
{
    let a = a.region();
    let b = b.region();
    let c = c.region();
    let a = a.with_layout(trans_a.apply(a.layout));
    let b = b.with_layout(trans_b.apply(b.layout));
    gemm_regions(alpha, a, b, beta, c)
}

pub(crate) fn gemm_regions(
    alpha: f64,
    a: Region<'_>,
    b: Region<'_>,
    beta: f64,
    c: Region<'_>,
) -> Result<()> {
    let [m, n, k] = check_product(&a, &b, &c)?;
    let backend = backend_for(m, n, k);
    tracing::debug!(m, n, k, alpha, beta, "gemm");
    backend.gemm(alpha, a, b, beta, c)
}

/// `y := alpha * op(a) * x + beta * y`.
pub fn gemv<A, X, Y>(
    trans: Transpose,
    alpha: f64,
    a: &A,
    x: &X,
    beta: f64,
    y: &mut Y,
) -> Result<()>
where
    A: AsRegion + ?Sized,
    X: AsVecRegion + ?Sized,
    Y: AsVecRegion + ?Sized,
{
    let a = a.region();
    let a = a.with_layout(trans.apply(a.layout));
    let x = x.column_region();
    let y = y.column_region();
    let [m, n] = a.layout.shape();
    if x.layout.rows != n {
        return Err(LinalgError::dims("gemv", &[m, n], &[x.layout.rows]));
    }
    if y.layout.rows != m {
        return Err(LinalgError::dims("gemv", &[m, n], &[y.layout.rows]));
    }
    let backend = backend_for(m, 1, n);
    tracing::debug!(m, n, alpha, beta, "gemv");
    backend.gemv(alpha, a, x, beta, y)
}

/// Types that expose a strided matrix region.
pub trait AsRegion {
    fn region(&self) -> Region<'_>;
}

/// Types that expose a strided vector region, used as a column.
pub trait AsVecRegion {
    fn column_region(&self) -> Region<'_>;
}
