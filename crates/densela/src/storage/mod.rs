//! Storage for vector and matrix data.
//!
//! ```text
//! Block            - reference-counted run of f64 cells (the allocation)
//! Ownership        - marker trait distinguishing owners from views
//! ├── Owned        - Vector / Matrix, allocated the block
//! └── Viewed       - VectorView / MatrixView, aliases someone else's block
//! ```
//!
//! A block is shared, never copied, when a view is taken. The owner and all of
//! its views hold strong handles, so the memory stays allocated until the last
//! of them is dropped.

mod block;

pub use block::Block;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Owned {}
    impl Sealed for super::Viewed {}
}

/// Marker for whether a vector or matrix owns its block or aliases another one.
pub trait Ownership: sealed::Sealed + Copy + Default + std::fmt::Debug + 'static {
    /// `true` for views.
    const IS_VIEW: bool;

    /// Display name of the vector type with this ownership.
    const VECTOR_NAME: &'static str;

    /// Display name of the matrix type with this ownership.
    const MATRIX_NAME: &'static str;
}

/// The value allocated its block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Owned;

/// The value aliases a region of another value's block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Viewed;

impl Ownership for Owned {
    const IS_VIEW: bool = false;
    const VECTOR_NAME: &'static str = "Vector";
    const MATRIX_NAME: &'static str = "Matrix";
}

impl Ownership for Viewed {
    const IS_VIEW: bool = true;
    const VECTOR_NAME: &'static str = "VectorView";
    const MATRIX_NAME: &'static str = "MatrixView";
}
