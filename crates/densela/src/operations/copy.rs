//! Block copy operations.

use crate::error::{LinalgError, Result};
use crate::storage::Block;
use crate::strides::MatLayout;

/// Copy the region `src_layout` of `src` into the region `dst_layout` of `dst`.
///
/// Both regions must have the same shape. Overlapping regions of one block
/// are handled by reading the source into a scratch block first.
///
/// # Example
///
/// ```
/// use densela::operations::copy_into;
/// use densela::storage::Block;
/// use densela::strides::MatLayout;
///
/// let src = Block::from_vec(vec![1.0, 2.0, 3.0, 4.0]);
/// let dst = Block::zeros(4);
/// copy_into(&dst, MatLayout::row_major(2, 2), &src, MatLayout::row_major(2, 2)).unwrap();
/// assert_eq!(dst.get(3), 4.0);
/// ```
pub fn copy_into(
    dst: &Block,
    dst_layout: MatLayout,
    src: &Block,
    src_layout: MatLayout,
) -> Result<()> {
    if dst_layout.shape() != src_layout.shape() {
        return Err(LinalgError::dims(
            "copy",
            &dst_layout.shape(),
            &src_layout.shape(),
        ));
    }
    check_destination(dst_layout, "copy")?;
    let (src, src_layout) = detach_if_aliased(dst, src, src_layout);
    for (d, s) in dst_layout.positions().zip(src_layout.positions()) {
        dst.set(d, src.get(s));
    }
    Ok(())
}

/// Copy a strided region into a fresh, dense row-major block.
pub fn materialize(src: &Block, layout: MatLayout) -> Block {
    Block::from_vec(layout.positions().map(|p| src.get(p)).collect())
}

/// Fail when two logical elements of a destination share one storage cell.
pub(crate) fn check_destination(layout: MatLayout, op: &str) -> Result<()> {
    if !layout.is_injective() {
        return Err(LinalgError::invalid_argument(format!(
            "{op} destination has elements sharing one storage cell"
        )));
    }
    Ok(())
}

/// Return a source that cannot observe writes to `dst`.
///
/// When `src` and `dst` are distinct allocations the source is returned as is;
/// otherwise the region is copied out.
pub(crate) fn detach_if_aliased(
    dst: &Block,
    src: &Block,
    src_layout: MatLayout,
) -> (Block, MatLayout) {
    if dst.shares_storage_with(src) {
        tracing::trace!(
            rows = src_layout.rows,
            cols = src_layout.cols,
            "source aliases destination, copying it out first"
        );
        (
            materialize(src, src_layout),
            MatLayout::row_major(src_layout.rows, src_layout.cols),
        )
    } else {
        (src.clone(), src_layout)
    }
}
