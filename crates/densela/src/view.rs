//! Construction rules for views.
//!
//! A view holds a strong handle on its owner's block, so the storage stays
//! allocated for as long as any view exists, even after the owner is
//! dropped. Views are only taken from owners: asking a view for a view is an
//! `InvalidOperation`. Use `to_vector` / `to_matrix` to detach a view into a
//! new owner first.

use crate::error::{LinalgError, Result};
use crate::matrix::MatrixView;
use crate::storage::{Block, Ownership};
use crate::strides::{MatLayout, VecLayout, validate_bounds};
use crate::vector::VectorView;

/// Fail unless `K` is the owning kind.
pub(crate) fn ensure_owner<K: Ownership>(type_name: &str) -> Result<()> {
    if K::IS_VIEW {
        return Err(LinalgError::invalid_operation(format!(
            "cannot take a view of a {type_name}"
        )));
    }
    Ok(())
}

impl VectorView {
    /// Bounds-checked view over `layout` of `block`.
    pub(crate) fn from_parts(block: Block, layout: VecLayout) -> Result<Self> {
        validate_bounds(block.len(), layout.end())?;
        tracing::trace!(
            offset = layout.offset,
            len = layout.len,
            stride = layout.stride,
            "vector view"
        );
        Ok(Self::shared(block, layout))
    }
}

impl MatrixView {
    /// Bounds-checked view over `layout` of `block`.
    pub(crate) fn from_parts(block: Block, layout: MatLayout) -> Result<Self> {
        validate_bounds(block.len(), layout.end())?;
        tracing::trace!(
            offset = layout.offset,
            rows = layout.rows,
            cols = layout.cols,
            row_stride = layout.row_stride,
            "matrix view"
        );
        Ok(Self::shared(block, layout))
    }
}
