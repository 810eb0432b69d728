//! One-dimensional `f64` buffers.
//!
//! [`VectorBase`] is generic over [`Ownership`]: [`Vector`] owns its block,
//! [`VectorView`] aliases a strided range of another vector's or matrix's
//! block. Everything except view creation works the same for both.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::backend::{AsVecRegion, Region};
use crate::coerce::{self, Conformance, Operand};
use crate::error::{LinalgError, Result};
use crate::matrix::{Matrix, MatrixView};
use crate::operations::{self, ElementOp};
use crate::storage::{Block, Owned, Ownership, Viewed};
use crate::strides::{MatLayout, VecLayout};
use crate::view::ensure_owner;

/// Fixed-length vector of `f64`, owning or viewing its storage.
pub struct VectorBase<K: Ownership = Owned> {
    block: Block,
    layout: VecLayout,
    kind: PhantomData<K>,
}

/// Vector that owns its storage.
pub type Vector = VectorBase<Owned>;

/// Vector aliasing a range of someone else's storage.
pub type VectorView = VectorBase<Viewed>;

impl Vector {
    /// Create a vector of `n` zeros.
    pub fn new(n: usize) -> Self {
        Self::zeros(n)
    }

    pub fn zeros(n: usize) -> Self {
        Self::from_block(Block::zeros(n))
    }

    /// Allocate `n` elements.
    ///
    /// Storage is always initialized; `zero` is accepted for callers that
    /// distinguish the two allocation modes and has no further effect.
    pub fn alloc(n: usize, zero: bool) -> Self {
        tracing::trace!(n, zero, "vector alloc");
        Self::zeros(n)
    }

    pub fn filled(n: usize, value: f64) -> Self {
        Self::from_block(Block::filled(n, value))
    }

    /// Create a vector whose element `i` is `f(i)`, called for `i = 0..n` in order.
    ///
    /// # Example
    ///
    /// ```
    /// use densela::Vector;
    ///
    /// let v = Vector::from_fn(4, |i| (i * i) as f64);
    /// assert_eq!(v.to_vec(), vec![0.0, 1.0, 4.0, 9.0]);
    /// ```
    pub fn from_fn<F>(n: usize, f: F) -> Self
    where
        F: FnMut(usize) -> f64,
    {
        Self::from_vec((0..n).map(f).collect())
    }

    pub fn from_vec(data: Vec<f64>) -> Self {
        Self::from_block(Block::from_vec(data))
    }

    pub fn from_slice(data: &[f64]) -> Self {
        Self::from_vec(data.to_vec())
    }

    /// Unit vector `e_i` of length `n`.
    pub fn basis(n: usize, i: usize) -> Result<Self> {
        let mut v = Self::zeros(n);
        v.set(i, 1.0)?;
        Ok(v)
    }

    pub(crate) fn from_block(block: Block) -> Self {
        let layout = VecLayout::contiguous(block.len());
        Self {
            block,
            layout,
            kind: PhantomData,
        }
    }
}

impl VectorView {
    /// View over `layout` of `block`, without bounds or nesting checks.
    pub(crate) fn shared(block: Block, layout: VecLayout) -> Self {
        Self {
            block,
            layout,
            kind: PhantomData,
        }
    }
}

impl<K: Ownership> VectorBase<K> {
    #[inline]
    pub fn len(&self) -> usize {
        self.layout.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layout.len == 0
    }

    /// Distance in the block between consecutive elements.
    pub fn stride(&self) -> usize {
        self.layout.stride
    }

    pub fn is_view(&self) -> bool {
        K::IS_VIEW
    }

    pub(crate) fn block(&self) -> &Block {
        &self.block
    }

    pub(crate) fn layout(&self) -> VecLayout {
        self.layout
    }

    /// Alias of the same storage, bypassing the view nesting rule.
    pub(crate) fn share(&self) -> VectorView {
        VectorView::shared(self.block.clone(), self.layout)
    }

    fn row_layout(&self) -> MatLayout {
        MatLayout::from_row(self.layout)
    }

    fn check_index(&self, i: usize) -> Result<()> {
        if i >= self.len() {
            return Err(LinalgError::IndexOutOfRange {
                index: i,
                len: self.len(),
                axis: "vector",
            });
        }
        Ok(())
    }

    #[inline]
    fn at(&self, i: usize) -> f64 {
        self.block.get(self.layout.index(i))
    }

    pub fn get(&self, i: usize) -> Result<f64> {
        self.check_index(i)?;
        Ok(self.at(i))
    }

    pub fn set(&mut self, i: usize, value: f64) -> Result<()> {
        self.check_index(i)?;
        self.block.set(self.layout.index(i), value);
        Ok(())
    }

    /// Elements in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.layout.positions().map(|p| self.block.get(p))
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }

    /// Independent owning copy.
    pub fn to_vector(&self) -> Vector {
        Vector::from_vec(self.to_vec())
    }

    pub fn set_all(&mut self, value: f64) -> &mut Self {
        operations::fill(&self.block, self.row_layout(), value);
        self
    }

    pub fn set_zero(&mut self) -> &mut Self {
        self.set_all(0.0)
    }

    pub fn swap_elements(&mut self, i: usize, j: usize) -> Result<&mut Self> {
        self.check_index(i)?;
        self.check_index(j)?;
        self.block.swap(self.layout.index(i), self.layout.index(j));
        Ok(self)
    }

    pub fn reverse(&mut self) -> &mut Self {
        operations::reverse(&self.block, self.layout);
        self
    }

    // ---------------------------------------------------------------------
    // Element-wise arithmetic
    // ---------------------------------------------------------------------

    fn zip_assign(&mut self, other: Operand, op: ElementOp) -> Result<&mut Self> {
        coerce::zip_into(Operand::Vector(self.share()), other, op)?;
        Ok(self)
    }

    fn zip(&self, other: Operand, op: ElementOp) -> Result<Vector> {
        let mut out = self.to_vector();
        out.zip_assign(other, op)?;
        Ok(out)
    }

    /// `self[i] += other[i]`; `other` may be a scalar, an equal-length vector
    /// or a `1×n` / `n×1` matrix.
    ///
    /// # Example
    ///
    /// ```
    /// use densela::{Matrix, Vector};
    ///
    /// let mut v = Vector::from_vec(vec![1.0, 2.0]);
    /// v.add_assign(10.0).unwrap();
    /// v.add_assign(&Matrix::from_vec(vec![1.0, 1.0], 1, 2).unwrap()).unwrap();
    /// assert_eq!(v.to_vec(), vec![12.0, 13.0]);
    /// ```
    pub fn add_assign(&mut self, other: impl Into<Operand>) -> Result<&mut Self> {
        self.zip_assign(other.into(), ElementOp::Add)
    }

    pub fn sub_assign(&mut self, other: impl Into<Operand>) -> Result<&mut Self> {
        self.zip_assign(other.into(), ElementOp::Sub)
    }

    pub fn mul_assign(&mut self, other: impl Into<Operand>) -> Result<&mut Self> {
        self.zip_assign(other.into(), ElementOp::Mul)
    }

    pub fn div_assign(&mut self, other: impl Into<Operand>) -> Result<&mut Self> {
        self.zip_assign(other.into(), ElementOp::Div)
    }

    pub fn add(&self, other: impl Into<Operand>) -> Result<Vector> {
        self.zip(other.into(), ElementOp::Add)
    }

    pub fn sub(&self, other: impl Into<Operand>) -> Result<Vector> {
        self.zip(other.into(), ElementOp::Sub)
    }

    pub fn mul(&self, other: impl Into<Operand>) -> Result<Vector> {
        self.zip(other.into(), ElementOp::Mul)
    }

    pub fn div(&self, other: impl Into<Operand>) -> Result<Vector> {
        self.zip(other.into(), ElementOp::Div)
    }

    fn compare(&self, other: Operand, op: ElementOp) -> Result<Vector> {
        if let Operand::Matrix(_) = other {
            return Err(LinalgError::TypeError {
                op: op.name(),
                lhs: K::VECTOR_NAME,
                rhs: other.type_name(),
            });
        }
        self.zip(other, op)
    }

    /// Element-wise `<`, as a vector of `0.0` / `1.0`.
    pub fn lt(&self, other: impl Into<Operand>) -> Result<Vector> {
        self.compare(other.into(), ElementOp::Lt)
    }

    pub fn gt(&self, other: impl Into<Operand>) -> Result<Vector> {
        self.compare(other.into(), ElementOp::Gt)
    }

    pub fn le(&self, other: impl Into<Operand>) -> Result<Vector> {
        self.compare(other.into(), ElementOp::Le)
    }

    pub fn ge(&self, other: impl Into<Operand>) -> Result<Vector> {
        self.compare(other.into(), ElementOp::Ge)
    }

    /// Treat this vector as a `1×n` row and multiply it by `other`.
    ///
    /// A scalar scales the row; a matrix must have `n` rows.
    pub fn mat_mul(&self, other: impl Into<Operand>) -> Result<Matrix> {
        let this = Operand::Vector(self.share());
        match coerce::coerce(&this, other.into(), Conformance::Product)? {
            (Operand::Scalar(x), _) => {
                let out = Matrix::from_vec(self.to_vec(), 1, self.len())?;
                operations::scale(out.block(), out.layout(), x);
                Ok(out)
            }
            (other, this) => {
                let (Operand::Matrix(row), Operand::Matrix(rhs)) = (this, other) else {
                    return Err(LinalgError::invalid_operation(
                        "row product requires a matrix operand",
                    ));
                };
                row.mul(&rhs)
            }
        }
    }

    // ---------------------------------------------------------------------
    // Reductions
    // ---------------------------------------------------------------------

    fn empty_error(&self, what: &str) -> LinalgError {
        LinalgError::invalid_argument(format!("{what} of an empty {}", K::VECTOR_NAME))
    }

    /// Index of the smallest element; the first one wins on ties and a NaN
    /// wins over every number.
    pub fn min_index(&self) -> Result<usize> {
        operations::min_index(&self.block, self.row_layout())
            .ok_or_else(|| self.empty_error("min_index"))
    }

    pub fn max_index(&self) -> Result<usize> {
        operations::max_index(&self.block, self.row_layout())
            .ok_or_else(|| self.empty_error("max_index"))
    }

    pub fn minmax_index(&self) -> Result<(usize, usize)> {
        operations::minmax_index(&self.block, self.row_layout())
            .ok_or_else(|| self.empty_error("minmax_index"))
    }

    pub fn min(&self) -> Result<f64> {
        operations::min_index(&self.block, self.row_layout())
            .map(|i| self.at(i))
            .ok_or_else(|| self.empty_error("min"))
    }

    pub fn max(&self) -> Result<f64> {
        operations::max_index(&self.block, self.row_layout())
            .map(|i| self.at(i))
            .ok_or_else(|| self.empty_error("max"))
    }

    pub fn minmax(&self) -> Result<(f64, f64)> {
        operations::minmax_index(&self.block, self.row_layout())
            .map(|(lo, hi)| (self.at(lo), self.at(hi)))
            .ok_or_else(|| self.empty_error("minmax"))
    }

    pub fn sum(&self) -> f64 {
        operations::sum(&self.block, self.row_layout())
    }

    pub fn mean(&self) -> Result<f64> {
        if self.is_empty() {
            return Err(self.empty_error("mean"));
        }
        Ok(self.sum() / self.len() as f64)
    }

    pub fn dot<K2: Ownership>(&self, other: &VectorBase<K2>) -> Result<f64> {
        operations::dot(
            &self.block,
            self.row_layout(),
            &other.block,
            other.row_layout(),
        )
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    /// Median of a sorted copy; the elements themselves are not reordered.
    pub fn median(&self) -> Result<f64> {
        operations::median_from_sorted(&operations::sorted_copy(self.iter()))
    }

    /// Quantile `q ∈ [0, 1]` by linear interpolation between order statistics.
    pub fn quantile(&self, q: f64) -> Result<f64> {
        operations::quantile_from_sorted(&operations::sorted_copy(self.iter()), q)
    }

    pub fn is_zero(&self) -> bool {
        operations::is_null(&self.block, self.row_layout())
    }

    pub fn is_positive(&self) -> bool {
        operations::is_positive(&self.block, self.row_layout())
    }

    pub fn is_negative(&self) -> bool {
        operations::is_negative(&self.block, self.row_layout())
    }

    pub fn is_nonnegative(&self) -> bool {
        operations::is_nonnegative(&self.block, self.row_layout())
    }

    /// Circularly shifted copy: element `i` moves to `(i + k) mod n`.
    pub fn wrap(&self, k: isize) -> Vector {
        let mut out = self.to_vector();
        out.wrap_assign(k);
        out
    }

    pub fn wrap_assign(&mut self, k: isize) -> &mut Self {
        operations::rotate(&self.block, self.layout, k);
        self
    }

    pub fn eql<K2: Ownership>(&self, other: &VectorBase<K2>) -> bool {
        self == other
    }

    // ---------------------------------------------------------------------
    // Iteration
    // ---------------------------------------------------------------------

    pub fn each<F: FnMut(f64)>(&self, f: F) {
        self.iter().for_each(f);
    }

    /// Call `f(x, i)` for every element in ascending index order.
    pub fn each_with_index<F: FnMut(f64, usize)>(&self, mut f: F) {
        for (i, x) in self.iter().enumerate() {
            f(x, i);
        }
    }

    pub fn map<F: FnMut(f64) -> f64>(&self, f: F) -> Vector {
        Vector::from_vec(self.iter().map(f).collect())
    }

    pub fn map_assign<F: FnMut(f64) -> f64>(&mut self, f: F) -> &mut Self {
        operations::map_assign(&self.block, self.row_layout(), f);
        self
    }

    /// Overwrite element `i` with `f(i)`.
    pub fn map_index_assign<F: FnMut(usize) -> f64>(&mut self, mut f: F) -> &mut Self {
        for i in 0..self.len() {
            self.block.set(self.layout.index(i), f(i));
        }
        self
    }

    /// Overwrite element `i` with `f(x, i)`.
    pub fn map_with_index_assign<F: FnMut(f64, usize) -> f64>(&mut self, mut f: F) -> &mut Self {
        for (i, p) in self.layout.positions().enumerate() {
            self.block.set(p, f(self.block.get(p), i));
        }
        self
    }

    /// Map into an arbitrary collection element type.
    pub fn map_array<T, F: FnMut(f64) -> T>(&self, f: F) -> Vec<T> {
        self.iter().map(f).collect()
    }

    // ---------------------------------------------------------------------
    // Views
    // ---------------------------------------------------------------------

    /// View of `len` elements starting at `offset`.
    ///
    /// # Example
    ///
    /// ```
    /// use densela::Vector;
    ///
    /// let v = Vector::from_vec(vec![1.0, 2.0, 3.0, 4.0]);
    /// let mut mid = v.view(1, 2).unwrap();
    /// mid.set(0, 20.0).unwrap();
    /// assert_eq!(v.get(1).unwrap(), 20.0);
    /// ```
    pub fn view(&self, offset: usize, len: usize) -> Result<VectorView> {
        self.subvector_with_stride(offset, 1, len)
    }

    /// View of `len` elements starting at `offset`, taking every `stride`-th one.
    pub fn subvector_with_stride(
        &self,
        offset: usize,
        stride: usize,
        len: usize,
    ) -> Result<VectorView> {
        ensure_owner::<K>(K::VECTOR_NAME)?;
        if stride == 0 {
            return Err(LinalgError::invalid_argument("view stride must be positive"));
        }
        let last = match len {
            0 => Some(offset),
            _ => (len - 1)
                .checked_mul(stride)
                .and_then(|span| span.checked_add(offset))
                .and_then(|last| last.checked_add(1)),
        };
        match last {
            Some(end) if end <= self.len() => {}
            _ => {
                return Err(LinalgError::dims(
                    "view",
                    &[offset, len, stride],
                    &[self.len()],
                ));
            }
        }
        VectorView::from_parts(self.block.clone(), self.layout.sub(offset, len, stride))
    }

    /// This vector as a `1×n` matrix view.
    pub fn as_matrix_row(&self) -> Result<MatrixView> {
        ensure_owner::<K>(K::VECTOR_NAME)?;
        MatrixView::from_parts(self.block.clone(), MatLayout::from_row(self.layout))
    }

    /// This vector as an `n×1` matrix view.
    pub fn as_matrix_column(&self) -> Result<MatrixView> {
        ensure_owner::<K>(K::VECTOR_NAME)?;
        MatrixView::from_parts(self.block.clone(), MatLayout::from_column(self.layout))
    }
}

impl<K: Ownership> Clone for VectorBase<K> {
    /// Owners copy their data; views copy the handle.
    fn clone(&self) -> Self {
        let (block, layout) = if K::IS_VIEW {
            (self.block.clone(), self.layout)
        } else {
            let data = self.to_vec();
            let len = data.len();
            (Block::from_vec(data), VecLayout::contiguous(len))
        };
        Self {
            block,
            layout,
            kind: PhantomData,
        }
    }
}

impl<K: Ownership, K2: Ownership> PartialEq<VectorBase<K2>> for VectorBase<K> {
    fn eq(&self, other: &VectorBase<K2>) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K: Ownership> Hash for VectorBase<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for x in self.iter() {
            // -0.0 == 0.0, so both must hash alike
            let x = if x == 0.0 { 0.0 } else { x };
            x.to_bits().hash(state);
        }
    }
}

impl<K: Ownership> fmt::Debug for VectorBase<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple(K::VECTOR_NAME).field(&self.to_vec()).finish()
    }
}

impl<K: Ownership> fmt::Display for VectorBase<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, x) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{x}")?;
        }
        f.write_str("]")
    }
}

impl<K: Ownership> AsVecRegion for VectorBase<K> {
    fn column_region(&self) -> Region<'_> {
        Region::column(&self.block, self.layout)
    }
}

impl FromIterator<f64> for Vector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Vector::from_vec(iter.into_iter().collect())
    }
}

impl From<Vec<f64>> for Vector {
    fn from(data: Vec<f64>) -> Self {
        Vector::from_vec(data)
    }
}

impl From<&[f64]> for Vector {
    fn from(data: &[f64]) -> Self {
        Vector::from_slice(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::hash_map::DefaultHasher;

    fn v(data: &[f64]) -> Vector {
        Vector::from_slice(data)
    }

    fn hash_of<K: Ownership>(x: &VectorBase<K>) -> u64 {
        let mut h = DefaultHasher::new();
        x.hash(&mut h);
        h.finish()
    }

    #[test]
    fn test_constructors() {
        assert_eq!(Vector::new(3).to_vec(), vec![0.0; 3]);
        assert_eq!(Vector::alloc(2, false).to_vec(), vec![0.0; 2]);
        assert_eq!(Vector::filled(2, 7.0).to_vec(), vec![7.0; 2]);
        assert_eq!(Vector::basis(3, 1).unwrap().to_vec(), vec![0.0, 1.0, 0.0]);
        assert!(Vector::basis(3, 3).is_err());
        let collected: Vector = (1..=3).map(f64::from).collect();
        assert_eq!(collected, v(&[1.0, 2.0, 3.0]));
        assert!(Vector::new(0).is_empty());
    }

    #[test]
    fn test_from_fn_calls_in_order() {
        let mut calls = Vec::new();
        let x = Vector::from_fn(4, |i| {
            calls.push(i);
            i as f64
        });
        assert_eq!(calls, vec![0, 1, 2, 3]);
        assert_eq!(x.get(3).unwrap(), 3.0);
    }

    #[test]
    fn test_get_set_bounds() {
        let mut x = Vector::zeros(3);
        x.set(2, 5.0).unwrap();
        assert_eq!(x.get(2).unwrap(), 5.0);
        assert_eq!(
            x.get(3),
            Err(LinalgError::IndexOutOfRange {
                index: 3,
                len: 3,
                axis: "vector"
            })
        );
        assert!(x.set(10, 1.0).is_err());
    }

    #[test]
    fn test_arithmetic() {
        let a = v(&[1.0, 2.0, 3.0]);
        let b = v(&[4.0, 5.0, 6.0]);
        assert_eq!(a.add(&b).unwrap(), v(&[5.0, 7.0, 9.0]));
        assert_eq!(a.sub(1.0).unwrap(), v(&[0.0, 1.0, 2.0]));
        assert_eq!(a.mul(&b).unwrap(), v(&[4.0, 10.0, 18.0]));
        assert_eq!(b.div(2.0).unwrap(), v(&[2.0, 2.5, 3.0]));
        // pure operators leave the receiver alone
        assert_eq!(a, v(&[1.0, 2.0, 3.0]));
    }

    #[test]
    fn test_assign_chains() {
        let mut a = v(&[1.0, 2.0]);
        a.add_assign(1.0).unwrap().mul_assign(3.0).unwrap();
        assert_eq!(a, v(&[6.0, 9.0]));
    }

    #[test]
    fn test_length_mismatch() {
        let mut a = v(&[1.0, 2.0]);
        assert!(matches!(
            a.add_assign(&v(&[1.0, 2.0, 3.0])),
            Err(LinalgError::DimensionMismatch { .. })
        ));
        assert_eq!(a, v(&[1.0, 2.0]));
    }

    #[test]
    fn test_matrix_operand() {
        let mut a = v(&[1.0, 2.0, 3.0]);
        a.add_assign(&Matrix::filled(3, 1, 1.0)).unwrap();
        a.sub_assign(&Matrix::filled(1, 3, 2.0)).unwrap();
        assert_eq!(a, v(&[0.0, 1.0, 2.0]));
        assert!(a.add_assign(&Matrix::zeros(3, 3)).is_err());
    }

    #[test]
    fn test_comparisons() {
        let a = v(&[1.0, 2.0, 3.0]);
        assert_eq!(a.lt(2.0).unwrap(), v(&[1.0, 0.0, 0.0]));
        assert_eq!(a.ge(2.0).unwrap(), v(&[0.0, 1.0, 1.0]));
        assert_eq!(a.gt(&v(&[0.0, 2.0, 4.0])).unwrap(), v(&[1.0, 0.0, 0.0]));
        assert_eq!(a.le(&v(&[0.0, 2.0, 4.0])).unwrap(), v(&[0.0, 1.0, 1.0]));
        assert!(matches!(
            a.lt(&Matrix::zeros(1, 3)),
            Err(LinalgError::TypeError { .. })
        ));
    }

    #[test]
    fn test_mat_mul() {
        let row = v(&[1.0, 2.0]);
        let m = Matrix::from_rows(&[vec![1.0, 0.0, 1.0], vec![0.0, 1.0, 1.0]]).unwrap();
        let out = row.mat_mul(&m).unwrap();
        assert_eq!(out.shape(), (1, 3));
        assert_eq!(out.to_vec(), vec![1.0, 2.0, 3.0]);
        assert_eq!(row.mat_mul(2.0).unwrap().to_vec(), vec![2.0, 4.0]);
        assert!(matches!(
            row.mat_mul(&row),
            Err(LinalgError::TypeError { .. })
        ));
    }

    #[test]
    fn test_extrema_tie_break() {
        assert_eq!(v(&[3.0, 1.0, 3.0]).max_index().unwrap(), 0);
        assert_eq!(v(&[1.0, 3.0, 3.0]).max_index().unwrap(), 1);
        assert_eq!(v(&[2.0, 1.0, 1.0]).min_index().unwrap(), 1);
        let x = v(&[4.0, -2.0, 8.0]);
        assert_eq!(x.minmax().unwrap(), (-2.0, 8.0));
        assert_eq!(x.minmax_index().unwrap(), (1, 2));
        assert_eq!(x.min().unwrap(), -2.0);
        assert_eq!(x.max().unwrap(), 8.0);
    }

    #[test]
    fn test_empty_reductions() {
        let e = Vector::zeros(0);
        for result in [e.min(), e.max(), e.median(), e.mean(), e.quantile(0.5)] {
            assert!(matches!(result, Err(LinalgError::InvalidArgument { .. })));
        }
        assert!(e.min_index().is_err());
        assert!(e.minmax_index().is_err());
        assert_eq!(e.sum(), 0.0);
        assert!(e.is_zero() && e.is_positive() && e.is_negative() && e.is_nonnegative());
    }

    #[test]
    fn test_median_and_quantile() {
        let x = v(&[4.0, 1.0, 3.0, 2.0]);
        assert_relative_eq!(x.median().unwrap(), 2.5);
        assert_eq!(x, v(&[4.0, 1.0, 3.0, 2.0]));
        assert_relative_eq!(v(&[1.0, 2.0, 3.0]).median().unwrap(), 2.0);
        assert_relative_eq!(x.quantile(0.0).unwrap(), 1.0);
        assert_relative_eq!(x.quantile(1.0).unwrap(), 4.0);
        assert_relative_eq!(x.quantile(0.5).unwrap(), 2.5);
        assert!(x.quantile(1.01).is_err());
    }

    #[test]
    fn test_sum_mean_dot_norm() {
        let x = v(&[3.0, 4.0]);
        assert_relative_eq!(x.sum(), 7.0);
        assert_relative_eq!(x.mean().unwrap(), 3.5);
        assert_relative_eq!(x.dot(&v(&[1.0, 2.0])).unwrap(), 11.0);
        assert_relative_eq!(x.norm(), 5.0);
        assert!(x.dot(&v(&[1.0])).is_err());
    }

    #[test]
    fn test_wrap() {
        let x = v(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(x.wrap(1), v(&[4.0, 1.0, 2.0, 3.0]));
        assert_eq!(x.wrap(-1), v(&[2.0, 3.0, 4.0, 1.0]));
        assert_eq!(x.wrap(9), x.wrap(1));
        assert_eq!(x.wrap(0), x);
        let mut y = x.clone();
        y.wrap_assign(2);
        assert_eq!(y, v(&[3.0, 4.0, 1.0, 2.0]));
        assert_eq!(Vector::zeros(0).wrap(3), Vector::zeros(0));
    }

    #[test]
    fn test_equality_and_hash() {
        let a = v(&[0.0, 1.0]);
        let b = v(&[-0.0, 1.0]);
        assert_eq!(a, b);
        assert!(a.eql(&b));
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(a, v(&[0.0, 1.0, 2.0]));
        let nan = v(&[f64::NAN]);
        assert_ne!(nan, nan.clone());
    }

    #[test]
    fn test_view_equals_owner_contents() {
        let a = v(&[1.0, 2.0, 3.0]);
        let view = a.view(1, 2).unwrap();
        assert_eq!(view, v(&[2.0, 3.0]));
        assert_eq!(hash_of(&view), hash_of(&v(&[2.0, 3.0])));
    }

    #[test]
    fn test_iteration_order() {
        let x = v(&[1.0, 2.0, 3.0]);
        let mut seen = Vec::new();
        x.each_with_index(|value, i| seen.push((i, value)));
        assert_eq!(seen, vec![(0, 1.0), (1, 2.0), (2, 3.0)]);
        let mut total = 0.0;
        x.each(|value| total += value);
        assert_eq!(total, 6.0);
        assert_eq!(x.map(|a| a * 2.0), v(&[2.0, 4.0, 6.0]));
        assert_eq!(x.map_array(|a| a as i64), vec![1, 2, 3]);
    }

    #[test]
    fn test_map_variants() {
        let mut x = Vector::zeros(3);
        x.map_index_assign(|i| i as f64 * 10.0);
        assert_eq!(x, v(&[0.0, 10.0, 20.0]));
        x.map_with_index_assign(|a, i| a + i as f64);
        assert_eq!(x, v(&[0.0, 11.0, 22.0]));
        x.map_assign(|a| -a);
        assert_eq!(x, v(&[0.0, -11.0, -22.0]));
    }

    #[test]
    fn test_view_bounds() {
        let x = Vector::zeros(4);
        assert!(x.view(0, 4).is_ok());
        assert!(x.view(4, 0).is_ok());
        assert!(matches!(
            x.view(3, 2),
            Err(LinalgError::DimensionMismatch { .. })
        ));
        assert!(x.view(usize::MAX, 2).is_err());
        assert!(x.subvector_with_stride(0, 0, 2).is_err());
    }

    #[test]
    fn test_strided_view() {
        let x = v(&[0.0, 1.0, 2.0, 3.0, 4.0]);
        let evens = x.subvector_with_stride(0, 2, 3).unwrap();
        assert_eq!(evens.to_vec(), vec![0.0, 2.0, 4.0]);
        assert_eq!(evens.stride(), 2);
        assert!(x.subvector_with_stride(1, 2, 3).is_err());
    }

    #[test]
    fn test_view_of_view_rejected() {
        let x = Vector::zeros(4);
        let view = x.view(0, 2).unwrap();
        assert!(matches!(
            view.view(0, 1),
            Err(LinalgError::InvalidOperation { .. })
        ));
    }

    #[test]
    fn test_clone_semantics() {
        let x = v(&[1.0, 2.0]);
        let mut copy = x.clone();
        copy.set(0, 9.0).unwrap();
        assert_eq!(x.get(0).unwrap(), 1.0);

        let view = x.view(0, 2).unwrap();
        let mut alias = view.clone();
        alias.set(1, 7.0).unwrap();
        assert_eq!(x.get(1).unwrap(), 7.0);
    }

    #[test]
    fn test_misc_mutators() {
        let mut x = v(&[1.0, 2.0, 3.0]);
        x.reverse();
        assert_eq!(x, v(&[3.0, 2.0, 1.0]));
        x.swap_elements(0, 2).unwrap();
        assert_eq!(x, v(&[1.0, 2.0, 3.0]));
        assert!(x.swap_elements(0, 3).is_err());
        x.set_all(4.0);
        assert_eq!(x, Vector::filled(3, 4.0));
        x.set_zero();
        assert!(x.is_zero());
    }

    #[test]
    fn test_display_and_debug() {
        let x = v(&[1.0, 2.5]);
        assert_eq!(x.to_string(), "[1, 2.5]");
        assert_eq!(format!("{x:?}"), "Vector([1.0, 2.5])");
        let view = x.view(0, 1).unwrap();
        assert_eq!(format!("{view:?}"), "VectorView([1.0])");
    }

    #[test]
    fn test_as_matrix() {
        let x = v(&[1.0, 2.0, 3.0]);
        assert_eq!(x.as_matrix_row().unwrap().shape(), (1, 3));
        let mut col = x.as_matrix_column().unwrap();
        assert_eq!(col.shape(), (3, 1));
        col.set(2, 0, 30.0).unwrap();
        assert_eq!(x.get(2).unwrap(), 30.0);
    }
}
