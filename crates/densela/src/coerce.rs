//! Operand normalization for binary operators.
//!
//! Every binary operator on vectors and matrices accepts an [`Operand`] and
//! runs it through [`coerce`] against its receiver. The result is a pair of
//! operands that the storage kernels can combine directly:
//!
//! | receiver | operand  | element-wise                 | product                    |
//! |----------|----------|------------------------------|----------------------------|
//! | any      | `f64`    | broadcast to receiver shape  | passed through (scaling)   |
//! | Vector   | Vector   | lengths must match           | `TypeError`                |
//! | Matrix   | Matrix   | shapes must match            | `lhs.cols == rhs.rows`     |
//! | Matrix   | Vector   | vector as `1×n` or `n×1`     | vector as `n×1` column     |
//! | Vector   | Matrix   | receiver as `1×n` or `n×1`   | receiver as `1×n` row      |
//! | `f64`    | any      | `TypeError`                  | `TypeError`                |
//!
//! Vectors are reshaped through zero-copy views. A scalar expanded by the
//! public [`coerce`] gets filled storage of its own; inside the element-wise
//! kernels it is a zero-stride view of a single cell that is only ever read.

use crate::error::{LinalgError, Result};
use crate::matrix::{MatrixBase, MatrixView};
use crate::operations::{self, ElementOp};
use crate::storage::{Block, Ownership};
use crate::strides::{MatLayout, VecLayout};
use crate::vector::{VectorBase, VectorView};

/// Right-hand side of a binary operator.
#[derive(Debug, Clone)]
pub enum Operand {
    Scalar(f64),
    Vector(VectorView),
    Matrix(MatrixView),
}

/// How the shapes of two operands must relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conformance {
    /// Same shape, combined element by element.
    Elementwise,
    /// Inner dimensions agree, combined by a matrix product.
    Product,
}

impl Operand {
    /// Type name used in `TypeError` messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Operand::Scalar(_) => "f64",
            Operand::Vector(_) => "Vector",
            Operand::Matrix(_) => "Matrix",
        }
    }

    /// Shape as `[len]` for vectors, `[rows, cols]` for matrices, `[]` for scalars.
    pub fn shape(&self) -> Vec<usize> {
        match self {
            Operand::Scalar(_) => Vec::new(),
            Operand::Vector(v) => vec![v.len()],
            Operand::Matrix(m) => vec![m.rows(), m.cols()],
        }
    }

    /// Storage region; vectors are laid out as a single row.
    pub(crate) fn region(&self) -> Option<(&Block, MatLayout)> {
        match self {
            Operand::Scalar(_) => None,
            Operand::Vector(v) => Some((v.block(), MatLayout::from_row(v.layout()))),
            Operand::Matrix(m) => Some((m.block(), m.layout())),
        }
    }
}

impl From<f64> for Operand {
    fn from(x: f64) -> Self {
        Operand::Scalar(x)
    }
}

impl<K: Ownership> From<&VectorBase<K>> for Operand {
    fn from(v: &VectorBase<K>) -> Self {
        Operand::Vector(v.share())
    }
}

impl<K: Ownership> From<VectorBase<K>> for Operand {
    fn from(v: VectorBase<K>) -> Self {
        Operand::Vector(v.share())
    }
}

impl<K: Ownership> From<&MatrixBase<K>> for Operand {
    fn from(m: &MatrixBase<K>) -> Self {
        Operand::Matrix(m.share())
    }
}

impl<K: Ownership> From<MatrixBase<K>> for Operand {
    fn from(m: MatrixBase<K>) -> Self {
        Operand::Matrix(m.share())
    }
}

/// How a scalar operand is expanded in element-wise mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expansion {
    /// Fresh storage with one cell per element.
    Filled,
    /// Zero-stride view of a single cell; read-only use inside the kernels.
    Broadcast,
}

impl Expansion {
    fn vector(self, x: f64, len: usize) -> VectorView {
        match self {
            Expansion::Filled => {
                VectorView::shared(Block::filled(len, x), VecLayout::contiguous(len))
            }
            Expansion::Broadcast => VectorView::shared(
                Block::from_vec(vec![x]),
                VecLayout {
                    offset: 0,
                    len,
                    stride: 0,
                },
            ),
        }
    }

    fn matrix(self, x: f64, rows: usize, cols: usize) -> MatrixView {
        match self {
            Expansion::Filled => {
                MatrixView::shared(Block::filled(rows * cols, x), MatLayout::row_major(rows, cols))
            }
            Expansion::Broadcast => MatrixView::shared(
                Block::from_vec(vec![x]),
                MatLayout {
                    offset: 0,
                    rows,
                    cols,
                    row_stride: 0,
                    col_stride: 0,
                },
            ),
        }
    }
}

fn as_row(v: &VectorView) -> MatrixView {
    MatrixView::shared(v.block().clone(), MatLayout::from_row(v.layout()))
}

fn as_column(v: &VectorView) -> MatrixView {
    MatrixView::shared(v.block().clone(), MatLayout::from_column(v.layout()))
}

/// Normalize `other` against the receiver `this`.
///
/// Returns `(expanded_other, normalized_this)`. Neither operand is mutated.
///
/// # Example
///
/// ```
/// use densela::{Conformance, Matrix, Operand, Vector, coerce};
///
/// let m = Matrix::zeros(3, 1);
/// let v = Vector::from_vec(vec![1.0, 2.0, 3.0]);
/// let (other, this) = coerce(&Operand::from(&m), Operand::from(&v), Conformance::Elementwise).unwrap();
/// assert_eq!(other.shape(), vec![3, 1]);
/// assert_eq!(this.shape(), vec![3, 1]);
/// ```
///
/// A scalar expanded in element-wise mode gets storage of its own, so writing
/// to the returned operand never touches more than one element.
pub fn coerce(this: &Operand, other: Operand, mode: Conformance) -> Result<(Operand, Operand)> {
    normalize(this, other, mode, Expansion::Filled)
}

fn normalize(
    this: &Operand,
    other: Operand,
    mode: Conformance,
    expansion: Expansion,
) -> Result<(Operand, Operand)> {
    use Conformance::{Elementwise, Product};

    match (this, other) {
        (Operand::Scalar(_), other) => Err(LinalgError::TypeError {
            op: "coerce",
            lhs: "f64",
            rhs: other.type_name(),
        }),

        (this, Operand::Scalar(x)) => {
            let expanded = match (mode, this) {
                (Product, _) => Operand::Scalar(x),
                (Elementwise, Operand::Vector(v)) => Operand::Vector(expansion.vector(x, v.len())),
                (Elementwise, Operand::Matrix(m)) => {
                    Operand::Matrix(expansion.matrix(x, m.rows(), m.cols()))
                }
                (Elementwise, Operand::Scalar(_)) => Operand::Scalar(x),
            };
            Ok((expanded, this.clone()))
        }

        (Operand::Vector(a), Operand::Vector(b)) => match mode {
            Elementwise if a.len() == b.len() => {
                Ok((Operand::Vector(b), Operand::Vector(a.clone())))
            }
            Elementwise => Err(LinalgError::dims("coerce", &[a.len()], &[b.len()])),
            Product => Err(LinalgError::TypeError {
                op: "product",
                lhs: "Vector",
                rhs: "Vector",
            }),
        },

        (Operand::Matrix(a), Operand::Matrix(b)) => {
            let conforms = match mode {
                Elementwise => a.shape() == b.shape(),
                Product => a.cols() == b.rows(),
            };
            if !conforms {
                return Err(LinalgError::dims(
                    "coerce",
                    &[a.rows(), a.cols()],
                    &[b.rows(), b.cols()],
                ));
            }
            Ok((Operand::Matrix(b), Operand::Matrix(a.clone())))
        }

        (Operand::Matrix(a), Operand::Vector(v)) => {
            let n = v.len();
            let reshaped = match mode {
                Elementwise if a.rows() == 1 && a.cols() == n => as_row(&v),
                Elementwise if a.cols() == 1 && a.rows() == n => as_column(&v),
                Product if a.cols() == n => as_column(&v),
                _ => return Err(LinalgError::dims("coerce", &[a.rows(), a.cols()], &[n])),
            };
            Ok((Operand::Matrix(reshaped), Operand::Matrix(a.clone())))
        }

        (Operand::Vector(v), Operand::Matrix(b)) => {
            let n = v.len();
            let reshaped = match mode {
                Elementwise if b.rows() == 1 && b.cols() == n => as_row(v),
                Elementwise if b.cols() == 1 && b.rows() == n => as_column(v),
                Product if b.rows() == n => as_row(v),
                _ => return Err(LinalgError::dims("coerce", &[n], &[b.rows(), b.cols()])),
            };
            Ok((Operand::Matrix(b), Operand::Matrix(reshaped)))
        }
    }
}

fn regions<'a>(
    this: &'a Operand,
    other: &'a Operand,
    op: &'static str,
) -> Result<((&'a Block, MatLayout), (&'a Block, MatLayout))> {
    match (this.region(), other.region()) {
        (Some(dst), Some(src)) => Ok((dst, src)),
        _ => Err(LinalgError::TypeError {
            op,
            lhs: this.type_name(),
            rhs: other.type_name(),
        }),
    }
}

/// Coerce `other` element-wise against `this` and apply `op` into `this`.
///
/// Shapes are validated before the first element is written. Scalar sums,
/// differences and products go straight to the add-constant and scale kernels.
pub(crate) fn zip_into(this: Operand, other: Operand, op: ElementOp) -> Result<()> {
    if let (Some((dst, layout)), Operand::Scalar(x)) = (this.region(), &other) {
        match op {
            ElementOp::Add => {
                operations::add_constant(dst, layout, *x);
                return Ok(());
            }
            ElementOp::Sub => {
                operations::add_constant(dst, layout, -x);
                return Ok(());
            }
            ElementOp::Mul => {
                operations::scale(dst, layout, *x);
                return Ok(());
            }
            _ => {}
        }
    }
    let (other, this) = normalize(&this, other, Conformance::Elementwise, Expansion::Broadcast)?;
    let ((dst, dst_layout), (src, src_layout)) = regions(&this, &other, op.name())?;
    operations::zip_assign(dst, dst_layout, src, src_layout, op)
}

/// Coerce `other` element-wise against `this` and copy it into `this`.
pub(crate) fn copy_into(this: Operand, other: Operand) -> Result<()> {
    let (other, this) = normalize(&this, other, Conformance::Elementwise, Expansion::Broadcast)?;
    let ((dst, dst_layout), (src, src_layout)) = regions(&this, &other, "assign")?;
    operations::copy_into(dst, dst_layout, src, src_layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Matrix, Vector};

    fn elementwise(this: impl Into<Operand>, other: impl Into<Operand>) -> Result<(Operand, Operand)> {
        coerce(&this.into(), other.into(), Conformance::Elementwise)
    }

    fn product(this: impl Into<Operand>, other: impl Into<Operand>) -> Result<(Operand, Operand)> {
        coerce(&this.into(), other.into(), Conformance::Product)
    }

    #[test]
    fn test_scalar_broadcast() {
        let m = Matrix::zeros(2, 3);
        let (other, this) = elementwise(&m, 4.0).unwrap();
        assert_eq!(other.shape(), vec![2, 3]);
        assert_eq!(this.shape(), vec![2, 3]);
        match other {
            Operand::Matrix(b) => assert!(b.iter().all(|x| x == 4.0)),
            _ => panic!("expected a matrix"),
        }

        let v = Vector::zeros(5);
        let (other, _) = elementwise(&v, -1.0).unwrap();
        assert_eq!(other.shape(), vec![5]);
    }

    #[test]
    fn test_scalar_expansion_has_independent_cells() {
        let m = Matrix::zeros(2, 2);
        let Operand::Matrix(mut expanded) = elementwise(&m, 5.0).unwrap().0 else {
            panic!("expected a matrix");
        };
        expanded.set(0, 0, 1.0).unwrap();
        assert_eq!(expanded.get(1, 1).unwrap(), 5.0);
        assert!(expanded.layout().is_injective());

        let Operand::Vector(mut row) = elementwise(&Vector::zeros(3), 2.0).unwrap().0 else {
            panic!("expected a vector");
        };
        row.set(2, 0.0).unwrap();
        assert_eq!(row.to_vec(), vec![2.0, 2.0, 0.0]);
    }

    #[test]
    fn test_internal_broadcast_shares_one_cell() {
        let m = Operand::from(&Matrix::zeros(3, 3));
        let (other, _) =
            normalize(&m, Operand::Scalar(1.0), Conformance::Elementwise, Expansion::Broadcast)
                .unwrap();
        let Operand::Matrix(b) = other else {
            panic!("expected a matrix");
        };
        assert_eq!(b.block().len(), 1);
        assert!(b.iter().all(|x| x == 1.0));
    }

    #[test]
    fn test_scalar_passes_through_products() {
        let m = Matrix::zeros(2, 3);
        let (other, _) = product(&m, 2.0).unwrap();
        assert!(matches!(other, Operand::Scalar(x) if x == 2.0));
    }

    #[test]
    fn test_scalar_receiver_is_type_error() {
        let m = Matrix::zeros(1, 1);
        let err = elementwise(1.0, &m).unwrap_err();
        assert_eq!(
            err,
            LinalgError::TypeError {
                op: "coerce",
                lhs: "f64",
                rhs: "Matrix"
            }
        );
    }

    #[test]
    fn test_vector_lengths() {
        let a = Vector::zeros(3);
        assert!(elementwise(&a, &Vector::zeros(3)).is_ok());
        assert!(matches!(
            elementwise(&a, &Vector::zeros(4)),
            Err(LinalgError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            product(&a, &Vector::zeros(3)),
            Err(LinalgError::TypeError { .. })
        ));
    }

    #[test]
    fn test_matrix_receiver_with_vector() {
        let v = Vector::from_vec(vec![1.0, 2.0, 3.0]);
        let (other, _) = elementwise(&Matrix::zeros(1, 3), &v).unwrap();
        assert_eq!(other.shape(), vec![1, 3]);
        let (other, _) = elementwise(&Matrix::zeros(3, 1), &v).unwrap();
        assert_eq!(other.shape(), vec![3, 1]);
        assert!(elementwise(&Matrix::zeros(3, 3), &v).is_err());

        let (other, this) = product(&Matrix::zeros(2, 3), &v).unwrap();
        assert_eq!(other.shape(), vec![3, 1]);
        assert_eq!(this.shape(), vec![2, 3]);
        assert!(product(&Matrix::zeros(3, 2), &v).is_err());
    }

    #[test]
    fn test_vector_receiver_with_matrix() {
        let v = Vector::zeros(2);
        let (other, this) = elementwise(&v, &Matrix::zeros(2, 1)).unwrap();
        assert_eq!(other.shape(), vec![2, 1]);
        assert_eq!(this.shape(), vec![2, 1]);

        let (_, this) = product(&v, &Matrix::zeros(2, 5)).unwrap();
        assert_eq!(this.shape(), vec![1, 2]);
        assert!(product(&v, &Matrix::zeros(3, 5)).is_err());
    }

    #[test]
    fn test_matrix_shapes() {
        let a = Matrix::zeros(2, 3);
        assert!(elementwise(&a, &Matrix::zeros(3, 2)).is_err());
        assert!(product(&a, &Matrix::zeros(3, 2)).is_ok());
        assert!(product(&a, &Matrix::zeros(2, 3)).is_err());
    }

    #[test]
    fn test_coerce_does_not_copy_or_mutate() {
        let v = Vector::from_vec(vec![1.0, 2.0]);
        let (other, _) = elementwise(&Matrix::zeros(1, 2), &v).unwrap();
        match other {
            Operand::Matrix(m) => assert!(m.block().shares_storage_with(v.block())),
            _ => panic!("expected a matrix"),
        }
        assert_eq!(v.to_vec(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_zip_into_validates_before_writing() {
        let v = Vector::from_vec(vec![1.0, 2.0]);
        let result = zip_into(Operand::from(&v), Operand::from(&Vector::zeros(3)), ElementOp::Add);
        assert!(result.is_err());
        assert_eq!(v.to_vec(), vec![1.0, 2.0]);
    }
}
