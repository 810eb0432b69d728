//! faer-backed products over strided blocks.
//!
//! Layouts are handed to faer as raw parts (pointer, shape, row stride,
//! column stride), so row-major owners, transposed layouts and sub-matrix
//! views all multiply without a copy.

use faer::linalg::matmul::matmul;
use faer::{Accum, MatMut, MatRef, Par};

use super::{LinalgBackend, Region, check_product};
use crate::error::Result;
use crate::operations::{fill, materialize, scale};
use crate::storage::Block;
use crate::strides::MatLayout;

/// Backend delegating to `faer::linalg::matmul::matmul` with `Par::Seq`.
pub struct FaerBackend;

impl LinalgBackend for FaerBackend {
    fn gemm(
        &self,
        alpha: f64,
        a: Region<'_>,
        b: Region<'_>,
        beta: f64,
        c: Region<'_>,
    ) -> Result<()> {
        let [m, n, k] = check_product(&a, &b, &c)?;
        if m == 0 || n == 0 {
            return Ok(());
        }
        if k == 0 {
            // empty sum: only the beta term survives
            if beta == 0.0 {
                fill(c.block, c.layout, 0.0);
            } else {
                scale(c.block, c.layout, beta);
            }
            return Ok(());
        }
        if c.block.shares_storage_with(a.block) || c.block.shares_storage_with(b.block) {
            tracing::trace!(m, n, k, "gemm output aliases an input, using scratch block");
            let scratch_layout = MatLayout::row_major(m, n);
            let scratch = if beta == 0.0 {
                Block::zeros(m * n)
            } else {
                materialize(c.block, c.layout)
            };
            self.gemm(alpha, a, b, beta, Region::new(&scratch, scratch_layout))?;
            for (dst, src) in c.layout.positions().zip(scratch_layout.positions()) {
                c.block.set(dst, scratch.get(src));
            }
            return Ok(());
        }
        if beta != 0.0 && beta != 1.0 {
            scale(c.block, c.layout, beta);
        }
        let accum = if beta == 0.0 {
            Accum::Replace
        } else {
            Accum::Add
        };

        // SAFETY: `check_product` verified that all three regions end inside
        // their blocks (with overflow-checked arithmetic) and that `c` maps
        // distinct elements to distinct cells. `Block` stores `Cell<f64>`,
        // which has the layout of `f64` and permits writes through shared
        // handles. `c` does not share storage with `a` or `b` (checked above),
        // and no other handle is used while faer holds these views.
        unsafe {
            let a_mat = faer_ref(a);
            let b_mat = faer_ref(b);
            let c_mat = faer_mut(c);
            matmul(c_mat, accum, a_mat, b_mat, alpha, Par::Seq);
        }
        Ok(())
    }
}

fn stride(s: usize) -> isize {
    s as isize
}

/// # Safety
///
/// The region must lie inside its block and no mutable view may alias it.
unsafe fn faer_ref(r: Region<'_>) -> MatRef<'_, f64> {
    let l = r.layout;
    unsafe {
        MatRef::from_raw_parts(
            r.block.as_ptr().add(l.offset) as *const f64,
            l.rows,
            l.cols,
            stride(l.row_stride),
            stride(l.col_stride),
        )
    }
}

/// # Safety
///
/// The region must lie inside its block, have distinct addresses for distinct
/// logical elements, and not be aliased for the lifetime of the view.
unsafe fn faer_mut(r: Region<'_>) -> MatMut<'_, f64> {
    let l = r.layout;
    unsafe {
        MatMut::from_raw_parts_mut(
            r.block.as_ptr().add(l.offset),
            l.rows,
            l.cols,
            stride(l.row_stride),
            stride(l.col_stride),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::GenericBackend;
    use crate::error::LinalgError;
    use approx::assert_relative_eq;

    #[test]
    fn test_faer_gemm_matches_generic() {
        let a = Block::from_vec((0..12).map(|x| x as f64 * 0.5).collect());
        let b = Block::from_vec((0..20).map(|x| 1.0 - x as f64 * 0.25).collect());
        let la = MatLayout::row_major(3, 4);
        let lb = MatLayout::row_major(4, 5);
        let lc = MatLayout::row_major(3, 5);
        let c1 = Block::filled(15, 1.0);
        let c2 = Block::filled(15, 1.0);
        FaerBackend.gemm(
            1.5,
            Region::new(&a, la),
            Region::new(&b, lb),
            -2.0,
            Region::new(&c1, lc),
        )
        .unwrap();
        GenericBackend.gemm(
            1.5,
            Region::new(&a, la),
            Region::new(&b, lb),
            -2.0,
            Region::new(&c2, lc),
        )
        .unwrap();
        for i in 0..15 {
            assert_relative_eq!(c1.get(i), c2.get(i), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_faer_gemm_on_submatrix_view() {
        // top-left 2x2 of a 3x3 block times identity, written into the
        // bottom-right 2x2 of another 3x3 block
        let a = Block::from_vec((1..=9).map(f64::from).collect());
        let id = Block::from_vec(vec![1.0, 0.0, 0.0, 1.0]);
        let c = Block::zeros(9);
        let full = MatLayout::row_major(3, 3);
        FaerBackend.gemm(
            1.0,
            Region::new(&a, full.submatrix(0, 0, 2, 2)),
            Region::new(&id, MatLayout::row_major(2, 2)),
            0.0,
            Region::new(&c, full.submatrix(1, 1, 2, 2)),
        )
        .unwrap();
        let got: Vec<f64> = (0..9).map(|i| c.get(i)).collect();
        assert_eq!(got, vec![0.0, 0.0, 0.0, 0.0, 1.0, 2.0, 0.0, 4.0, 5.0]);
    }

    #[test]
    fn test_faer_gemm_rejects_regions_outside_block() {
        let one = Block::from_vec(vec![1.0]);
        let c = Block::zeros(1);
        let unit = MatLayout::row_major(1, 1);
        for offset in [1, 1 << 40] {
            let shifted = MatLayout { offset, ..unit };
            let result = FaerBackend.gemm(
                1.0,
                Region::new(&one, shifted),
                Region::new(&one, unit),
                0.0,
                Region::new(&c, unit),
            );
            assert!(matches!(result, Err(LinalgError::DimensionMismatch { .. })));
        }
        let huge_stride = MatLayout {
            row_stride: usize::MAX,
            ..MatLayout::row_major(2, 1)
        };
        let tall = Block::zeros(2);
        let result = FaerBackend.gemm(
            1.0,
            Region::new(&tall, huge_stride),
            Region::new(&one, unit),
            0.0,
            Region::new(&tall, MatLayout::row_major(2, 1)),
        );
        assert!(matches!(result, Err(LinalgError::DimensionMismatch { .. })));
        assert_eq!(c.get(0), 0.0);
    }

    #[test]
    fn test_faer_gemm_rejects_overlapping_output() {
        let a = Block::from_vec(vec![1.0, 2.0, 3.0, 4.0]);
        let c = Block::from_vec(vec![7.0]);
        let l = MatLayout::row_major(2, 2);
        let broadcast = MatLayout {
            row_stride: 0,
            col_stride: 0,
            ..l
        };
        let result = FaerBackend.gemm(
            1.0,
            Region::new(&a, l),
            Region::new(&a, l),
            0.0,
            Region::new(&c, broadcast),
        );
        assert!(matches!(result, Err(LinalgError::InvalidArgument { .. })));
        assert_eq!(c.get(0), 7.0);
    }
}
