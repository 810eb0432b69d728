//! Storage-engine kernels.
//!
//! These functions work on a [`Block`](crate::storage::Block) plus a layout
//! and know nothing about owners or views. The vector and matrix types
//! validate their arguments, then call in here:
//!
//! ```text
//! Vector::add_assign / Matrix::multiply_assign / ...
//!     → coerce operands
//!     → validate shapes (nothing written yet)
//!     → elementwise::zip_assign / reduce::* / permute::*
//! ```

mod copy;
mod elementwise;
mod permute;
mod reduce;
mod stats;

pub use copy::{copy_into, materialize};
pub use elementwise::{ElementOp, add_constant, fill, map_assign, scale, zip_assign};
pub use permute::{
    reverse, rotate, slide, swap_columns, swap_rowcol, swap_rows, transpose_assign,
};
pub use reduce::{
    all, dot, is_negative, is_nonnegative, is_null, is_positive, max_index, min_index,
    minmax_index, sum,
};
pub use stats::{median_from_sorted, quantile_from_sorted, sorted_copy};
