//! Two-dimensional `f64` buffers with row-major logical indexing.
//!
//! [`Matrix`] owns its block; [`MatrixView`] aliases a rectangular region of
//! another matrix (or a vector reshaped as a row or column). Element `(i, j)`
//! lives at `offset + i * row_stride + j * col_stride` in the block.

use std::fmt;
use std::marker::PhantomData;

use crate::backend::{self, AsRegion, Region, Transpose};
use crate::coerce::{self, Conformance, Operand};
use crate::error::{LinalgError, Result};
use crate::operations::{self, ElementOp};
use crate::storage::{Block, Owned, Ownership, Viewed};
use crate::strides::{MatLayout, VecLayout, linear_to_cartesian};
use crate::vector::{Vector, VectorBase, VectorView};
use crate::view::ensure_owner;

/// Fixed-size matrix of `f64`, owning or viewing its storage.
pub struct MatrixBase<K: Ownership = Owned> {
    block: Block,
    layout: MatLayout,
    kind: PhantomData<K>,
}

/// Matrix that owns its storage.
pub type Matrix = MatrixBase<Owned>;

/// Matrix aliasing a region of someone else's storage.
pub type MatrixView = MatrixBase<Viewed>;

/// One axis of a [`MatrixBase::select`] / [`MatrixBase::assign`] index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisIndex {
    At(usize),
    /// Every index along the axis.
    All,
}

/// Result of [`MatrixBase::select`].
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Element(f64),
    Row(Vector),
    Column(Vector),
    Whole(Matrix),
}

impl Matrix {
    /// Create an `m × n` matrix of zeros.
    pub fn new(m: usize, n: usize) -> Self {
        Self::zeros(m, n)
    }

    pub fn zeros(m: usize, n: usize) -> Self {
        Self::from_block(Block::zeros(m * n), m, n)
    }

    /// Allocate an `m × n` matrix.
    ///
    /// Storage is always initialized; see [`Vector::alloc`].
    pub fn alloc(m: usize, n: usize, zero: bool) -> Self {
        tracing::trace!(m, n, zero, "matrix alloc");
        Self::zeros(m, n)
    }

    pub fn filled(m: usize, n: usize, value: f64) -> Self {
        Self::from_block(Block::filled(m * n, value), m, n)
    }

    /// Create a matrix whose element `(i, j)` is `f(i, j)`, called in row-major order.
    pub fn from_fn<F>(m: usize, n: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let data = (0..m * n)
            .map(|k| {
                let (i, j) = linear_to_cartesian(k, n);
                f(i, j)
            })
            .collect();
        Self::from_block(Block::from_vec(data), m, n)
    }

    /// Create a matrix from row-major data.
    ///
    /// # Example
    ///
    /// ```
    /// use densela::Matrix;
    ///
    /// let m = Matrix::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3).unwrap();
    /// assert_eq!(m.get(1, 0).unwrap(), 4.0);
    /// assert!(Matrix::from_vec(vec![1.0], 2, 2).is_err());
    /// ```
    pub fn from_vec(data: Vec<f64>, m: usize, n: usize) -> Result<Self> {
        if data.len() != m * n {
            return Err(LinalgError::dims("from_vec", &[data.len()], &[m, n]));
        }
        Ok(Self::from_block(Block::from_vec(data), m, n))
    }

    /// Create a matrix from a slice of rows; every row must have the same length.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let n = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * n);
        for row in rows {
            let row = row.as_ref();
            if row.len() != n {
                return Err(LinalgError::dims("from_rows", &[n], &[row.len()]));
            }
            data.extend_from_slice(row);
        }
        Self::from_vec(data, rows.len(), n)
    }

    /// `n × n` identity.
    pub fn eye(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        m.set_identity();
        m
    }

    pub(crate) fn from_block(block: Block, m: usize, n: usize) -> Self {
        Self {
            block,
            layout: MatLayout::row_major(m, n),
            kind: PhantomData,
        }
    }
}

impl MatrixView {
    /// View over `layout` of `block`, without bounds or nesting checks.
    pub(crate) fn shared(block: Block, layout: MatLayout) -> Self {
        Self {
            block,
            layout,
            kind: PhantomData,
        }
    }
}

impl<K: Ownership> MatrixBase<K> {
    #[inline]
    pub fn rows(&self) -> usize {
        self.layout.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.layout.cols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.layout.rows, self.layout.cols)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.layout.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layout.is_empty()
    }

    pub fn is_square(&self) -> bool {
        self.layout.rows == self.layout.cols
    }

    /// Distance in the block between consecutive rows.
    pub fn row_stride(&self) -> usize {
        self.layout.row_stride
    }

    pub fn is_view(&self) -> bool {
        K::IS_VIEW
    }

    pub(crate) fn block(&self) -> &Block {
        &self.block
    }

    pub(crate) fn layout(&self) -> MatLayout {
        self.layout
    }

    /// Alias of the same storage, bypassing the view nesting rule.
    pub(crate) fn share(&self) -> MatrixView {
        MatrixView::shared(self.block.clone(), self.layout)
    }

    fn share_region(&self, layout: MatLayout) -> MatrixView {
        MatrixView::shared(self.block.clone(), layout)
    }

    fn check_row(&self, i: usize) -> Result<()> {
        if i >= self.rows() {
            return Err(LinalgError::IndexOutOfRange {
                index: i,
                len: self.rows(),
                axis: "row",
            });
        }
        Ok(())
    }

    fn check_col(&self, j: usize) -> Result<()> {
        if j >= self.cols() {
            return Err(LinalgError::IndexOutOfRange {
                index: j,
                len: self.cols(),
                axis: "column",
            });
        }
        Ok(())
    }

    #[inline]
    fn at(&self, i: usize, j: usize) -> f64 {
        self.block.get(self.layout.index(i, j))
    }

    pub fn get(&self, i: usize, j: usize) -> Result<f64> {
        self.check_row(i)?;
        self.check_col(j)?;
        Ok(self.at(i, j))
    }

    pub fn set(&mut self, i: usize, j: usize, value: f64) -> Result<()> {
        self.check_row(i)?;
        self.check_col(j)?;
        self.block.set(self.layout.index(i, j), value);
        Ok(())
    }

    /// Read an element, a whole row, a whole column or the whole matrix.
    ///
    /// `(At(i), All)` is row `i` and `(All, At(j))` is column `j`. Rows and
    /// columns are returned as copies.
    ///
    /// # Example
    ///
    /// ```
    /// use densela::{AxisIndex, Matrix, Selection, Vector};
    ///
    /// let m = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    /// let row = m.select(AxisIndex::At(1), AxisIndex::All).unwrap();
    /// assert_eq!(row, Selection::Row(Vector::from_vec(vec![3.0, 4.0])));
    /// ```
    pub fn select(&self, i: AxisIndex, j: AxisIndex) -> Result<Selection> {
        Ok(match (i, j) {
            (AxisIndex::At(i), AxisIndex::At(j)) => Selection::Element(self.get(i, j)?),
            (AxisIndex::At(i), AxisIndex::All) => Selection::Row(self.row(i)?),
            (AxisIndex::All, AxisIndex::At(j)) => Selection::Column(self.column(j)?),
            (AxisIndex::All, AxisIndex::All) => Selection::Whole(self.to_matrix()),
        })
    }

    /// Write a scalar, row, column or whole-matrix value; the counterpart of
    /// [`select`](Self::select).
    ///
    /// A scalar broadcasts over the selected region. A row accepts a vector of
    /// length `cols` or a `1 × cols` matrix; a column accepts a vector of
    /// length `rows` or a `rows × 1` matrix.
    pub fn assign(
        &mut self,
        i: AxisIndex,
        j: AxisIndex,
        value: impl Into<Operand>,
    ) -> Result<&mut Self> {
        let value = value.into();
        let target = match (i, j) {
            (AxisIndex::At(i), AxisIndex::At(j)) => {
                let x = match value {
                    Operand::Scalar(x) => x,
                    other => {
                        return Err(LinalgError::TypeError {
                            op: "assign",
                            lhs: "f64",
                            rhs: other.type_name(),
                        });
                    }
                };
                self.set(i, j, x)?;
                return Ok(self);
            }
            (AxisIndex::At(i), AxisIndex::All) => {
                self.check_row(i)?;
                MatLayout::from_row(self.layout.row(i))
            }
            (AxisIndex::All, AxisIndex::At(j)) => {
                self.check_col(j)?;
                MatLayout::from_column(self.layout.column(j))
            }
            (AxisIndex::All, AxisIndex::All) => self.layout,
        };
        coerce::copy_into(Operand::Matrix(self.share_region(target)), value)?;
        Ok(self)
    }

    /// Copy of row `i`.
    pub fn row(&self, i: usize) -> Result<Vector> {
        self.check_row(i)?;
        let layout = self.layout.row(i);
        Ok(Vector::from_vec(
            layout.positions().map(|p| self.block.get(p)).collect(),
        ))
    }

    /// Copy of column `j`.
    pub fn column(&self, j: usize) -> Result<Vector> {
        self.check_col(j)?;
        let layout = self.layout.column(j);
        Ok(Vector::from_vec(
            layout.positions().map(|p| self.block.get(p)).collect(),
        ))
    }

    pub fn set_row<K2: Ownership>(&mut self, i: usize, v: &VectorBase<K2>) -> Result<&mut Self> {
        self.assign(AxisIndex::At(i), AxisIndex::All, v)
    }

    pub fn set_column<K2: Ownership>(
        &mut self,
        j: usize,
        v: &VectorBase<K2>,
    ) -> Result<&mut Self> {
        self.assign(AxisIndex::All, AxisIndex::At(j), v)
    }

    /// Elements in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.layout.positions().map(|p| self.block.get(p))
    }

    /// Row-major copy of the elements.
    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows())
            .map(|i| self.layout.row(i).positions().map(|p| self.block.get(p)).collect())
            .collect()
    }

    /// Independent owning copy.
    pub fn to_matrix(&self) -> Matrix {
        Matrix::from_block(
            operations::materialize(&self.block, self.layout),
            self.rows(),
            self.cols(),
        )
    }

    pub fn set_all(&mut self, value: f64) -> &mut Self {
        operations::fill(&self.block, self.layout, value);
        self
    }

    pub fn set_zero(&mut self) -> &mut Self {
        self.set_all(0.0)
    }

    /// Ones on the main diagonal, zeros elsewhere (any shape).
    pub fn set_identity(&mut self) -> &mut Self {
        self.set_zero();
        for k in 0..self.rows().min(self.cols()) {
            self.block.set(self.layout.index(k, k), 1.0);
        }
        self
    }

    /// Copy of the main diagonal.
    pub fn diagonal(&self) -> Vector {
        Vector::from_fn(self.rows().min(self.cols()), |k| self.at(k, k))
    }

    pub fn trace(&self) -> Result<f64> {
        if !self.is_square() {
            return Err(LinalgError::invalid_operation(format!(
                "trace requires a square matrix, got {}x{}",
                self.rows(),
                self.cols()
            )));
        }
        Ok(self.diagonal().sum())
    }

    // ---------------------------------------------------------------------
    // Element-wise arithmetic
    // ---------------------------------------------------------------------

    fn zip_assign(&mut self, other: Operand, op: ElementOp) -> Result<&mut Self> {
        coerce::zip_into(Operand::Matrix(self.share()), other, op)?;
        Ok(self)
    }

    fn zip(&self, other: Operand, op: ElementOp) -> Result<Matrix> {
        let mut out = self.to_matrix();
        out.zip_assign(other, op)?;
        Ok(out)
    }

    /// `self[i, j] += other[i, j]`.
    ///
    /// `other` may be a scalar, a matrix of the same shape, or a vector when
    /// this matrix is a single row or column of matching length.
    pub fn add_assign(&mut self, other: impl Into<Operand>) -> Result<&mut Self> {
        self.zip_assign(other.into(), ElementOp::Add)
    }

    pub fn sub_assign(&mut self, other: impl Into<Operand>) -> Result<&mut Self> {
        self.zip_assign(other.into(), ElementOp::Sub)
    }

    /// Element-wise (Hadamard) product in place.
    pub fn multiply_assign(&mut self, other: impl Into<Operand>) -> Result<&mut Self> {
        self.zip_assign(other.into(), ElementOp::Mul)
    }

    /// Element-wise quotient in place.
    pub fn divide_assign(&mut self, other: impl Into<Operand>) -> Result<&mut Self> {
        self.zip_assign(other.into(), ElementOp::Div)
    }

    pub fn add(&self, other: impl Into<Operand>) -> Result<Matrix> {
        self.zip(other.into(), ElementOp::Add)
    }

    pub fn sub(&self, other: impl Into<Operand>) -> Result<Matrix> {
        self.zip(other.into(), ElementOp::Sub)
    }

    /// Element-wise (Hadamard) product.
    pub fn multiply(&self, other: impl Into<Operand>) -> Result<Matrix> {
        self.zip(other.into(), ElementOp::Mul)
    }

    pub fn divide(&self, other: impl Into<Operand>) -> Result<Matrix> {
        self.zip(other.into(), ElementOp::Div)
    }

    // ---------------------------------------------------------------------
    // Products
    // ---------------------------------------------------------------------

    /// Linear-algebra product.
    ///
    /// A scalar scales every element. A matrix must have `self.cols()` rows
    /// and gives a `self.rows() × other.cols()` result. A vector is treated
    /// as a column and gives a `self.rows() × 1` matrix.
    ///
    /// # Example
    ///
    /// ```
    /// use densela::Matrix;
    ///
    /// let a = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    /// let b = Matrix::from_rows(&[vec![5.0, 6.0], vec![7.0, 8.0]]).unwrap();
    /// let c = a.mul(&b).unwrap();
    /// assert_eq!(c.to_rows(), vec![vec![19.0, 22.0], vec![43.0, 50.0]]);
    /// ```
    pub fn mul(&self, other: impl Into<Operand>) -> Result<Matrix> {
        let this = Operand::Matrix(self.share());
        let (other, _) = coerce::coerce(&this, other.into(), Conformance::Product)?;
        let rhs = match other {
            Operand::Scalar(x) => {
                let out = self.to_matrix();
                operations::scale(&out.block, out.layout, x);
                return Ok(out);
            }
            Operand::Matrix(m) => m,
            Operand::Vector(v) => {
                MatrixView::shared(v.block().clone(), MatLayout::from_column(v.layout()))
            }
        };
        let mut out = Matrix::zeros(self.rows(), rhs.cols());
        backend::gemm(
            Transpose::No,
            Transpose::No,
            1.0,
            self,
            &rhs,
            0.0,
            &mut out,
        )?;
        Ok(out)
    }

    /// Matrix-vector product `self * v` as a vector.
    pub fn mul_vec<K2: Ownership>(&self, v: &VectorBase<K2>) -> Result<Vector> {
        let mut out = Vector::zeros(self.rows());
        backend::gemv(Transpose::No, 1.0, self, v, 0.0, &mut out)?;
        Ok(out)
    }

    // ---------------------------------------------------------------------
    // Rearrangement
    // ---------------------------------------------------------------------

    /// New `cols × rows` matrix.
    pub fn transpose(&self) -> Matrix {
        let t = self.layout.transposed();
        Matrix::from_block(operations::materialize(&self.block, t), t.rows, t.cols)
    }

    /// Transpose in place; the matrix must be square.
    pub fn transpose_assign(&mut self) -> Result<&mut Self> {
        operations::transpose_assign(&self.block, self.layout)?;
        Ok(self)
    }

    pub fn swap_rows(&mut self, i: usize, j: usize) -> Result<&mut Self> {
        operations::swap_rows(&self.block, self.layout, i, j)?;
        Ok(self)
    }

    pub fn swap_columns(&mut self, i: usize, j: usize) -> Result<&mut Self> {
        operations::swap_columns(&self.block, self.layout, i, j)?;
        Ok(self)
    }

    /// Exchange row `i` with column `j`; the matrix must be square.
    pub fn swap_rowcol(&mut self, i: usize, j: usize) -> Result<&mut Self> {
        operations::swap_rowcol(&self.block, self.layout, i, j)?;
        Ok(self)
    }

    /// Copy shifted by `di` rows and `dj` columns, zero-filled.
    ///
    /// Positive `di` moves content toward higher row indices, positive `dj`
    /// toward higher column indices.
    ///
    /// # Example
    ///
    /// ```
    /// use densela::Matrix;
    ///
    /// let m = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    /// assert_eq!(m.slide(1, 0).to_rows(), vec![vec![0.0, 0.0], vec![1.0, 2.0]]);
    /// assert_eq!(m.slide(0, -1).to_rows(), vec![vec![2.0, 0.0], vec![4.0, 0.0]]);
    /// ```
    pub fn slide(&self, di: isize, dj: isize) -> Matrix {
        let mut out = self.to_matrix();
        out.slide_assign(di, dj);
        out
    }

    pub fn slide_assign(&mut self, di: isize, dj: isize) -> &mut Self {
        operations::slide(&self.block, self.layout, di, dj);
        self
    }

    // ---------------------------------------------------------------------
    // Predicates and reductions
    // ---------------------------------------------------------------------

    pub fn is_zero(&self) -> bool {
        operations::is_null(&self.block, self.layout)
    }

    pub fn is_positive(&self) -> bool {
        operations::is_positive(&self.block, self.layout)
    }

    pub fn is_negative(&self) -> bool {
        operations::is_negative(&self.block, self.layout)
    }

    pub fn is_nonnegative(&self) -> bool {
        operations::is_nonnegative(&self.block, self.layout)
    }

    fn empty_error(&self, what: &str) -> LinalgError {
        LinalgError::invalid_argument(format!(
            "{what} of an empty {} ({}x{})",
            K::MATRIX_NAME,
            self.rows(),
            self.cols()
        ))
    }

    fn cartesian(&self, linear: usize) -> (usize, usize) {
        linear_to_cartesian(linear, self.cols())
    }

    /// Position of the smallest element in row-major order; the first one wins on ties.
    pub fn min_index(&self) -> Result<(usize, usize)> {
        operations::min_index(&self.block, self.layout)
            .map(|k| self.cartesian(k))
            .ok_or_else(|| self.empty_error("min_index"))
    }

    pub fn max_index(&self) -> Result<(usize, usize)> {
        operations::max_index(&self.block, self.layout)
            .map(|k| self.cartesian(k))
            .ok_or_else(|| self.empty_error("max_index"))
    }

    pub fn minmax_index(&self) -> Result<((usize, usize), (usize, usize))> {
        operations::minmax_index(&self.block, self.layout)
            .map(|(lo, hi)| (self.cartesian(lo), self.cartesian(hi)))
            .ok_or_else(|| self.empty_error("minmax_index"))
    }

    pub fn min(&self) -> Result<f64> {
        let (i, j) = self.min_index()?;
        Ok(self.at(i, j))
    }

    pub fn max(&self) -> Result<f64> {
        let (i, j) = self.max_index()?;
        Ok(self.at(i, j))
    }

    pub fn minmax(&self) -> Result<(f64, f64)> {
        let ((a, b), (c, d)) = self.minmax_index()?;
        Ok((self.at(a, b), self.at(c, d)))
    }

    pub fn sum(&self) -> f64 {
        operations::sum(&self.block, self.layout)
    }

    // ---------------------------------------------------------------------
    // Views
    // ---------------------------------------------------------------------

    /// `m × n` sub-matrix view whose top-left corner is `(x, y)`.
    ///
    /// # Example
    ///
    /// ```
    /// use densela::Matrix;
    ///
    /// let m = Matrix::from_fn(3, 3, |i, j| (i * 3 + j) as f64);
    /// let mut corner = m.view(1, 1, 2, 2).unwrap();
    /// corner.set(0, 0, -1.0).unwrap();
    /// assert_eq!(m.get(1, 1).unwrap(), -1.0);
    /// ```
    pub fn view(&self, x: usize, y: usize, m: usize, n: usize) -> Result<MatrixView> {
        ensure_owner::<K>(K::MATRIX_NAME)?;
        let fits = x.checked_add(m).is_some_and(|end| end <= self.rows())
            && y.checked_add(n).is_some_and(|end| end <= self.cols());
        if !fits {
            return Err(LinalgError::dims(
                "view",
                &[x, y, m, n],
                &[self.rows(), self.cols()],
            ));
        }
        MatrixView::from_parts(self.block.clone(), self.layout.submatrix(x, y, m, n))
    }

    /// Row `i` as a `1 × cols` matrix view.
    pub fn row_view(&self, i: usize) -> Result<MatrixView> {
        self.view_axis_check(i, self.rows(), "row_view")?;
        self.view(i, 0, 1, self.cols())
    }

    /// Column `j` as a `rows × 1` matrix view.
    pub fn column_view(&self, j: usize) -> Result<MatrixView> {
        self.view_axis_check(j, self.cols(), "column_view")?;
        self.view(0, j, self.rows(), 1)
    }

    /// Row `i` as a contiguous vector view.
    pub fn row_vecview(&self, i: usize) -> Result<VectorView> {
        self.vecview(i, self.rows(), "row_vecview", self.layout.row(i))
    }

    /// Column `j` as a vector view with stride equal to the row stride.
    pub fn column_vecview(&self, j: usize) -> Result<VectorView> {
        self.vecview(j, self.cols(), "column_vecview", self.layout.column(j))
    }

    fn view_axis_check(&self, index: usize, len: usize, op: &'static str) -> Result<()> {
        ensure_owner::<K>(K::MATRIX_NAME)?;
        if index >= len {
            return Err(LinalgError::dims(op, &[index], &[len]));
        }
        Ok(())
    }

    fn vecview(
        &self,
        index: usize,
        len: usize,
        op: &'static str,
        layout: VecLayout,
    ) -> Result<VectorView> {
        self.view_axis_check(index, len, op)?;
        VectorView::from_parts(self.block.clone(), layout)
    }

    // ---------------------------------------------------------------------
    // Iteration
    // ---------------------------------------------------------------------

    pub fn each<F: FnMut(f64)>(&self, f: F) {
        self.iter().for_each(f);
    }

    /// Call `f(x, i, j)` for every element in row-major order.
    pub fn each_with_index<F: FnMut(f64, usize, usize)>(&self, mut f: F) {
        for i in 0..self.rows() {
            for j in 0..self.cols() {
                f(self.at(i, j), i, j);
            }
        }
    }

    pub fn map<F: FnMut(f64) -> f64>(&self, f: F) -> Matrix {
        Matrix::from_block(
            Block::from_vec(self.iter().map(f).collect()),
            self.rows(),
            self.cols(),
        )
    }

    pub fn map_assign<F: FnMut(f64) -> f64>(&mut self, f: F) -> &mut Self {
        operations::map_assign(&self.block, self.layout, f);
        self
    }

    /// Overwrite element `(i, j)` with `f(i, j)`.
    pub fn map_index_assign<F: FnMut(usize, usize) -> f64>(&mut self, mut f: F) -> &mut Self {
        for i in 0..self.rows() {
            for j in 0..self.cols() {
                self.block.set(self.layout.index(i, j), f(i, j));
            }
        }
        self
    }

    /// Overwrite element `(i, j)` with `f(x, i, j)`.
    pub fn map_with_index_assign<F: FnMut(f64, usize, usize) -> f64>(
        &mut self,
        mut f: F,
    ) -> &mut Self {
        for i in 0..self.rows() {
            for j in 0..self.cols() {
                let p = self.layout.index(i, j);
                self.block.set(p, f(self.block.get(p), i, j));
            }
        }
        self
    }

    /// Map into nested rows of an arbitrary element type.
    pub fn map_array<T, F: FnMut(f64) -> T>(&self, mut f: F) -> Vec<Vec<T>> {
        (0..self.rows())
            .map(|i| (0..self.cols()).map(|j| f(self.at(i, j))).collect())
            .collect()
    }

    /// Call `f` with a `1 × cols` view of each row, top to bottom.
    pub fn each_row<F: FnMut(MatrixView)>(&self, mut f: F) -> Result<()> {
        for i in 0..self.rows() {
            f(self.row_view(i)?);
        }
        Ok(())
    }

    /// Call `f` with a `rows × 1` view of each column, left to right.
    pub fn each_column<F: FnMut(MatrixView)>(&self, mut f: F) -> Result<()> {
        for j in 0..self.cols() {
            f(self.column_view(j)?);
        }
        Ok(())
    }

    pub fn each_vec_row<F: FnMut(VectorView)>(&self, mut f: F) -> Result<()> {
        for i in 0..self.rows() {
            f(self.row_vecview(i)?);
        }
        Ok(())
    }

    pub fn each_vec_column<F: FnMut(VectorView)>(&self, mut f: F) -> Result<()> {
        for j in 0..self.cols() {
            f(self.column_vecview(j)?);
        }
        Ok(())
    }

    /// Elements in row-major order joined by `sep`.
    pub fn join(&self, sep: &str) -> String {
        self.iter().map(|x| x.to_string()).collect::<Vec<_>>().join(sep)
    }
}

impl<K: Ownership> Clone for MatrixBase<K> {
    /// Owners copy their data; views copy the handle.
    fn clone(&self) -> Self {
        let (block, layout) = if K::IS_VIEW {
            (self.block.clone(), self.layout)
        } else {
            (
                operations::materialize(&self.block, self.layout),
                MatLayout::row_major(self.rows(), self.cols()),
            )
        };
        Self {
            block,
            layout,
            kind: PhantomData,
        }
    }
}

impl<K: Ownership, K2: Ownership> PartialEq<MatrixBase<K2>> for MatrixBase<K> {
    /// Matrices of different shapes are unequal.
    fn eq(&self, other: &MatrixBase<K2>) -> bool {
        self.shape() == other.shape() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K: Ownership> fmt::Debug for MatrixBase<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(K::MATRIX_NAME)
            .field("rows", &self.rows())
            .field("cols", &self.cols())
            .field("data", &self.to_rows())
            .finish()
    }
}

impl<K: Ownership> fmt::Display for MatrixBase<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for i in 0..self.rows() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str("[")?;
            for j in 0..self.cols() {
                if j > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", self.at(i, j))?;
            }
            f.write_str("]")?;
        }
        f.write_str("]")
    }
}

impl<K: Ownership> AsRegion for MatrixBase<K> {
    fn region(&self) -> Region<'_> {
        Region::new(&self.block, self.layout)
    }
}
