//! densela - dense `f64` vectors and matrices with aliasing views
//!
//! Fixed-size containers whose views share storage with their owner, so
//! writes through a view are visible in the owner and vice versa.
//!
//! # Architecture
//!
//! ```text
//! Level 1: High-level API (Vector, Matrix and their views)
//!     → arithmetic, products, reductions, rearrangement, iteration
//!
//! Level 2: Operand normalization (coerce module)
//!     → scalar broadcast, vector/matrix reshaping, shape checks
//!
//! Level 3: Kernels (operations and backend modules)
//!     → strided element-wise kernels over a shared Block
//!     → FaerBackend (faer::linalg::matmul), GenericBackend (naive loops)
//! ```
//!
//! # Example
//!
//! ```
//! use densela::{Matrix, Vector};
//!
//! let m = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
//!
//! // A column view aliases the matrix storage.
//! let mut col = m.column_vecview(1).unwrap();
//! col.mul_assign(10.0).unwrap();
//! assert_eq!(m.to_rows(), vec![vec![1.0, 20.0], vec![3.0, 40.0]]);
//!
//! let v = Vector::from_vec(vec![1.0, 1.0]);
//! assert_eq!(m.mul_vec(&v).unwrap().to_vec(), vec![21.0, 43.0]);
//! ```
//!
//! Values are single-threaded (`!Send`): storage is reference counted and
//! mutable through shared handles.

pub mod backend;
pub mod coerce;
pub mod config;
pub mod error;
pub mod matrix;
pub mod operations;
pub mod storage;
pub mod strides;
pub mod vector;
mod view;

pub use backend::{FaerBackend, GenericBackend, LinalgBackend, Transpose};
pub use coerce::{Conformance, Operand, coerce};
pub use config::{BackendKind, Config};
pub use error::{LinalgError, Result};
pub use matrix::{AxisIndex, Matrix, MatrixBase, MatrixView, Selection};
pub use storage::{Owned, Ownership, Viewed};
pub use vector::{Vector, VectorBase, VectorView};
