//! Layout descriptors mapping logical indices onto a storage block.
//!
//! Logical indexing is row-major: for a matrix with `cols` columns the
//! linear position of `(i, j)` is `i * cols + j`. Physical addresses add an
//! offset and per-axis strides so views can alias any rectangular region.

use crate::error::{LinalgError, Result};

/// Compute row-major strides `[row_stride, col_stride]` for a dense matrix.
///
/// # Examples
///
/// ```
/// use densela::strides::row_major_strides;
///
/// assert_eq!(row_major_strides(3, 4), [4, 1]);
/// assert_eq!(row_major_strides(2, 0), [0, 1]);
/// ```
pub fn row_major_strides(_rows: usize, cols: usize) -> [usize; 2] {
    [cols, 1]
}

/// Convert a row-major linear position to `(row, column)`.
#[inline]
pub fn linear_to_cartesian(linear: usize, cols: usize) -> (usize, usize) {
    (linear / cols, linear % cols)
}

/// Convert `(row, column)` to a row-major linear position.
#[inline]
pub fn cartesian_to_linear(i: usize, j: usize, cols: usize) -> usize {
    i * cols + j
}

/// One-dimensional strided layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VecLayout {
    pub offset: usize,
    pub len: usize,
    pub stride: usize,
}

impl VecLayout {
    /// Dense layout starting at the beginning of a block.
    pub fn contiguous(len: usize) -> Self {
        Self {
            offset: 0,
            len,
            stride: 1,
        }
    }

    /// Physical address of logical element `i`.
    #[inline]
    pub fn index(&self, i: usize) -> usize {
        self.offset + i * self.stride
    }

    /// One past the highest physical address touched (equals `offset` when empty).
    pub fn end(&self) -> usize {
        if self.len == 0 {
            self.offset
        } else {
            self.index(self.len - 1) + 1
        }
    }

    /// Sub-range of this layout, expressed in the same block.
    pub fn sub(&self, offset: usize, len: usize, stride: usize) -> Self {
        Self {
            offset: self.index(offset),
            len,
            stride: self.stride * stride,
        }
    }

    /// Physical addresses in ascending logical order.
    pub fn positions(&self) -> impl Iterator<Item = usize> + use<> {
        let layout = *self;
        (0..layout.len).map(move |i| layout.index(i))
    }
}

/// Two-dimensional strided layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatLayout {
    pub offset: usize,
    pub rows: usize,
    pub cols: usize,
    pub row_stride: usize,
    pub col_stride: usize,
}

impl MatLayout {
    /// Dense row-major layout starting at the beginning of a block.
    pub fn row_major(rows: usize, cols: usize) -> Self {
        let [row_stride, col_stride] = row_major_strides(rows, cols);
        Self {
            offset: 0,
            rows,
            cols,
            row_stride,
            col_stride,
        }
    }

    /// A vector seen as a single row (`1 × n`).
    pub fn from_row(v: VecLayout) -> Self {
        Self {
            offset: v.offset,
            rows: 1,
            cols: v.len,
            row_stride: v.len * v.stride,
            col_stride: v.stride,
        }
    }

    /// A vector seen as a single column (`n × 1`).
    pub fn from_column(v: VecLayout) -> Self {
        Self {
            offset: v.offset,
            rows: v.len,
            cols: 1,
            row_stride: v.stride,
            col_stride: 1,
        }
    }

    #[inline]
    pub fn shape(&self) -> [usize; 2] {
        [self.rows, self.cols]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Physical address of logical element `(i, j)`.
    #[inline]
    pub fn index(&self, i: usize, j: usize) -> usize {
        self.offset + i * self.row_stride + j * self.col_stride
    }

    /// One past the highest physical address touched (equals `offset` when empty).
    pub fn end(&self) -> usize {
        if self.is_empty() {
            self.offset
        } else {
            self.index(self.rows - 1, self.cols - 1) + 1
        }
    }

    /// Like [`end`](Self::end), but `None` when the address overflows `usize`.
    pub fn checked_end(&self) -> Option<usize> {
        if self.is_empty() {
            return Some(self.offset);
        }
        let last_row = (self.rows - 1).checked_mul(self.row_stride)?;
        let last_col = (self.cols - 1).checked_mul(self.col_stride)?;
        self.offset
            .checked_add(last_row)?
            .checked_add(last_col)?
            .checked_add(1)
    }

    /// Whether distinct logical elements map to distinct addresses.
    ///
    /// Conservative: the axes, ordered by stride, must nest without
    /// interleaving. Every layout built by this crate other than a scalar
    /// broadcast passes.
    pub fn is_injective(&self) -> bool {
        let row = (self.row_stride, self.rows);
        let col = (self.col_stride, self.cols);
        match (row.1 > 1, col.1 > 1) {
            (false, false) => true,
            (true, false) => row.0 > 0,
            (false, true) => col.0 > 0,
            (true, true) => {
                let (inner, outer) = if row.0 <= col.0 { (row, col) } else { (col, row) };
                inner.0 > 0 && inner.0.checked_mul(inner.1).is_some_and(|span| outer.0 >= span)
            }
        }
    }

    /// Zero-copy transpose.
    pub fn transposed(&self) -> Self {
        Self {
            offset: self.offset,
            rows: self.cols,
            cols: self.rows,
            row_stride: self.col_stride,
            col_stride: self.row_stride,
        }
    }

    pub fn row(&self, i: usize) -> VecLayout {
        VecLayout {
            offset: self.offset + i * self.row_stride,
            len: self.cols,
            stride: self.col_stride,
        }
    }

    pub fn column(&self, j: usize) -> VecLayout {
        VecLayout {
            offset: self.offset + j * self.col_stride,
            len: self.rows,
            stride: self.row_stride,
        }
    }

    /// Rectangular region starting at `(x, y)` with `rows × cols` elements.
    pub fn submatrix(&self, x: usize, y: usize, rows: usize, cols: usize) -> Self {
        Self {
            offset: self.offset + x * self.row_stride + y * self.col_stride,
            rows,
            cols,
            row_stride: self.row_stride,
            col_stride: self.col_stride,
        }
    }

    /// Physical addresses in row-major logical order.
    pub fn positions(&self) -> impl Iterator<Item = usize> + use<> {
        let layout = *self;
        (0..layout.rows)
            .flat_map(move |i| (0..layout.cols).map(move |j| layout.index(i, j)))
    }
}

/// Check that a layout ending at `end` fits into a block of `block_len` elements.
pub fn validate_bounds(block_len: usize, end: usize) -> Result<()> {
    if end > block_len {
        return Err(LinalgError::dims("layout bounds", &[end], &[block_len]));
    }
    Ok(())
}
