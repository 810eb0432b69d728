//! In-place rearrangement kernels: transpose, swaps, slide and rotation.

use crate::error::{LinalgError, Result};
use crate::storage::Block;
use crate::strides::{MatLayout, VecLayout};

fn require_square(layout: MatLayout, op: &str) -> Result<()> {
    if layout.rows != layout.cols {
        return Err(LinalgError::invalid_operation(format!(
            "{op} requires a square matrix, got {}x{}",
            layout.rows, layout.cols
        )));
    }
    Ok(())
}

fn check_index(index: usize, len: usize, axis: &'static str) -> Result<()> {
    if index >= len {
        return Err(LinalgError::IndexOutOfRange { index, len, axis });
    }
    Ok(())
}

/// Transpose a square region in place.
pub fn transpose_assign(block: &Block, layout: MatLayout) -> Result<()> {
    require_square(layout, "transpose_assign")?;
    for i in 0..layout.rows {
        for j in (i + 1)..layout.cols {
            block.swap(layout.index(i, j), layout.index(j, i));
        }
    }
    Ok(())
}

/// Exchange rows `i` and `j`.
pub fn swap_rows(block: &Block, layout: MatLayout, i: usize, j: usize) -> Result<()> {
    check_index(i, layout.rows, "row")?;
    check_index(j, layout.rows, "row")?;
    if i != j {
        for k in 0..layout.cols {
            block.swap(layout.index(i, k), layout.index(j, k));
        }
    }
    Ok(())
}

/// Exchange columns `i` and `j`.
pub fn swap_columns(block: &Block, layout: MatLayout, i: usize, j: usize) -> Result<()> {
    check_index(i, layout.cols, "column")?;
    check_index(j, layout.cols, "column")?;
    if i != j {
        for k in 0..layout.rows {
            block.swap(layout.index(k, i), layout.index(k, j));
        }
    }
    Ok(())
}

/// Exchange row `i` with column `j` of a square region.
///
/// Element `p` of the row is swapped with element `p` of the column for
/// `p = 0..n` in turn, so the cell `(i, j)` shared by both is touched twice.
pub fn swap_rowcol(block: &Block, layout: MatLayout, i: usize, j: usize) -> Result<()> {
    require_square(layout, "swap_rowcol")?;
    check_index(i, layout.rows, "row")?;
    check_index(j, layout.cols, "column")?;
    for p in 0..layout.rows {
        block.swap(layout.index(i, p), layout.index(p, j));
    }
    Ok(())
}

/// Shift the region by `(di, dj)`, zero-filling exposed cells.
///
/// Cells are visited in the direction of the shift, so every source cell is
/// read before it is overwritten.
pub fn slide(block: &Block, layout: MatLayout, di: isize, dj: isize) {
    let (rows, cols) = (layout.rows as isize, layout.cols as isize);
    let row_order: Box<dyn Iterator<Item = isize>> = if di > 0 {
        Box::new((0..rows).rev())
    } else {
        Box::new(0..rows)
    };
    for i in row_order {
        let col_order: Box<dyn Iterator<Item = isize>> = if dj > 0 {
            Box::new((0..cols).rev())
        } else {
            Box::new(0..cols)
        };
        for j in col_order {
            let (si, sj) = (i.checked_sub(di), j.checked_sub(dj));
            let value = match (si, sj) {
                (Some(si), Some(sj)) if (0..rows).contains(&si) && (0..cols).contains(&sj) => {
                    block.get(layout.index(si as usize, sj as usize))
                }
                _ => 0.0,
            };
            block.set(layout.index(i as usize, j as usize), value);
        }
    }
}

/// Rotate a vector region so element `i` moves to `(i + shift) mod n`.
pub fn rotate(block: &Block, layout: VecLayout, shift: isize) {
    let n = layout.len;
    if n == 0 {
        return;
    }
    let k = shift.rem_euclid(n as isize) as usize;
    if k == 0 {
        return;
    }
    let old: Vec<f64> = layout.positions().map(|p| block.get(p)).collect();
    for (i, x) in old.into_iter().enumerate() {
        block.set(layout.index((i + k) % n), x);
    }
}

/// Reverse a vector region in place.
pub fn reverse(block: &Block, layout: VecLayout) {
    let n = layout.len;
    for i in 0..n / 2 {
        block.swap(layout.index(i), layout.index(n - 1 - i));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(n: usize) -> (Block, MatLayout) {
        (
            Block::from_vec((0..n * n).map(|x| x as f64).collect()),
            MatLayout::row_major(n, n),
        )
    }

    fn values(b: &Block, l: MatLayout) -> Vec<f64> {
        l.positions().map(|p| b.get(p)).collect()
    }

    #[test]
    fn test_transpose_assign() {
        let (b, l) = square(3);
        transpose_assign(&b, l).unwrap();
        assert_eq!(
            values(&b, l),
            vec![0.0, 3.0, 6.0, 1.0, 4.0, 7.0, 2.0, 5.0, 8.0]
        );
    }

    #[test]
    fn test_transpose_assign_non_square() {
        let b = Block::zeros(6);
        let result = transpose_assign(&b, MatLayout::row_major(2, 3));
        assert!(matches!(result, Err(LinalgError::InvalidOperation { .. })));
    }

    #[test]
    fn test_swap_rows_and_columns() {
        let (b, l) = square(3);
        swap_rows(&b, l, 0, 2).unwrap();
        assert_eq!(&values(&b, l)[..3], &[6.0, 7.0, 8.0]);
        swap_columns(&b, l, 0, 1).unwrap();
        assert_eq!(&values(&b, l)[..3], &[7.0, 6.0, 8.0]);
        assert!(matches!(
            swap_rows(&b, l, 0, 3),
            Err(LinalgError::IndexOutOfRange { index: 3, .. })
        ));
        assert!(swap_columns(&b, l, 5, 0).is_err());
    }

    #[test]
    fn test_swap_rowcol() {
        // [[0,1,2],[3,4,5],[6,7,8]]: swap row 0 with column 2
        let (b, l) = square(3);
        swap_rowcol(&b, l, 0, 2).unwrap();
        // p=0: (0,0)<->(0,2); p=1: (0,1)<->(1,2); p=2: (0,2)<->(2,2)
        assert_eq!(
            values(&b, l),
            vec![2.0, 5.0, 8.0, 3.0, 4.0, 1.0, 6.0, 7.0, 0.0]
        );
        let rect = Block::zeros(6);
        assert!(matches!(
            swap_rowcol(&rect, MatLayout::row_major(2, 3), 0, 0),
            Err(LinalgError::InvalidOperation { .. })
        ));
    }

    #[test]
    fn test_slide_down() {
        let (b, l) = square(3);
        slide(&b, l, 1, 0);
        assert_eq!(
            values(&b, l),
            vec![0.0, 0.0, 0.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0]
        );
    }

    #[test]
    fn test_slide_up_left() {
        let (b, l) = square(3);
        slide(&b, l, -1, -1);
        assert_eq!(
            values(&b, l),
            vec![4.0, 5.0, 0.0, 7.0, 8.0, 0.0, 0.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_slide_beyond_bounds() {
        let (b, l) = square(2);
        slide(&b, l, 0, 7);
        assert_eq!(values(&b, l), vec![0.0; 4]);
        let (b, l) = square(2);
        slide(&b, l, isize::MIN, 0);
        assert_eq!(values(&b, l), vec![0.0; 4]);
    }

    #[test]
    fn test_rotate() {
        let b = Block::from_vec(vec![1.0, 2.0, 3.0, 4.0]);
        let l = VecLayout::contiguous(4);
        rotate(&b, l, 1);
        assert_eq!(
            l.positions().map(|p| b.get(p)).collect::<Vec<_>>(),
            vec![4.0, 1.0, 2.0, 3.0]
        );
        rotate(&b, l, -5);
        assert_eq!(
            l.positions().map(|p| b.get(p)).collect::<Vec<_>>(),
            vec![1.0, 2.0, 3.0, 4.0]
        );
        rotate(&Block::zeros(0), VecLayout::contiguous(0), 3);
    }

    #[test]
    fn test_reverse() {
        let b = Block::from_vec(vec![1.0, 2.0, 3.0]);
        reverse(&b, VecLayout::contiguous(3));
        assert_eq!(b.get(0), 3.0);
        assert_eq!(b.get(2), 1.0);
    }
}
