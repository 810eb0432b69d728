//! Generic (naive loop-based) backend implementation.

use super::{LinalgBackend, Region, check_product};
use crate::error::Result;

/// Generic backend using naive triple loops.
///
/// This backend is always available and serves as a fallback.
/// It's suitable for small matrices and debugging.
pub struct GenericBackend;

impl LinalgBackend for GenericBackend {
    fn gemm(
        &self,
        alpha: f64,
        a: Region<'_>,
        b: Region<'_>,
        beta: f64,
        c: Region<'_>,
    ) -> Result<()> {
        let [m, n, k] = check_product(&a, &b, &c)?;
        // Products are gathered before any store so `c` may alias `a` or `b`.
        let mut products = Vec::with_capacity(m * n);
        for i in 0..m {
            for j in 0..n {
                let mut acc = 0.0;
                for p in 0..k {
                    acc += a.block.get(a.layout.index(i, p)) * b.block.get(b.layout.index(p, j));
                }
                products.push(acc);
            }
        }
        for (pos, acc) in c.layout.positions().zip(products) {
            let value = if beta == 0.0 {
                alpha * acc
            } else {
                alpha * acc + beta * c.block.get(pos)
            };
            c.block.set(pos, value);
        }
        Ok(())
    }
}
