//! Reference-counted element block.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Contiguous run of `f64` cells shared between an owner and its views.
///
/// Cloning a `Block` clones the handle, not the data. Cells allow writes
/// through any handle, so aliasing views observe each other's updates.
/// The type is `!Send` and `!Sync`; callers needing cross-thread access
/// must copy the data out.
#[derive(Clone)]
pub struct Block {
    cells: Rc<[Cell<f64>]>,
}

impl Block {
    /// Allocate `len` elements, zero-initialized.
    pub fn zeros(len: usize) -> Self {
        Self::filled(len, 0.0)
    }

    /// Allocate `len` elements set to `value`.
    pub fn filled(len: usize, value: f64) -> Self {
        Self {
            cells: (0..len).map(|_| Cell::new(value)).collect(),
        }
    }

    /// Create a block from existing data (takes ownership).
    pub fn from_vec(data: Vec<f64>) -> Self {
        Self {
            cells: data.into_iter().map(Cell::new).collect(),
        }
    }

    /// Number of elements in the allocation.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Read the element at physical address `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is outside the allocation.
    #[inline]
    pub fn get(&self, i: usize) -> f64 {
        self.cells[i].get()
    }

    /// Write the element at physical address `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is outside the allocation.
    #[inline]
    pub fn set(&self, i: usize, value: f64) {
        self.cells[i].set(value);
    }

    /// Exchange the elements at two physical addresses.
    #[inline]
    pub fn swap(&self, i: usize, j: usize) {
        self.cells[i].swap(&self.cells[j]);
    }

    /// Returns `true` if both handles point to the same allocation.
    pub fn shares_storage_with(&self, other: &Block) -> bool {
        Rc::ptr_eq(&self.cells, &other.cells)
    }

    /// Number of live handles (the owner plus every view).
    pub fn handle_count(&self) -> usize {
        Rc::strong_count(&self.cells)
    }

    /// Returns `true` if more than one handle refers to this allocation.
    pub fn is_shared(&self) -> bool {
        self.handle_count() > 1
    }

    /// Raw pointer to the first element, for BLAS-style interop.
    ///
    /// `Cell<f64>` has the same layout as `f64`. Writes through this pointer are
    /// permitted because every element sits in a cell.
    #[inline]
    pub(crate) fn as_ptr(&self) -> *mut f64 {
        self.cells.as_ptr() as *mut f64
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("len", &self.len())
            .field("handles", &self.handle_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros() {
        let b = Block::zeros(5);
        assert_eq!(b.len(), 5);
        assert!(!b.is_empty());
        for i in 0..5 {
            assert_eq!(b.get(i), 0.0);
        }
    }

    #[test]
    fn test_from_vec() {
        let b = Block::from_vec(vec![1.0, 2.0, 3.0]);
        assert_eq!(b.len(), 3);
        assert_eq!(b.get(0), 1.0);
        assert_eq!(b.get(2), 3.0);
    }

    #[test]
    fn test_clone_aliases() {
        let a = Block::from_vec(vec![1.0, 2.0]);
        let b = a.clone();
        b.set(1, 7.0);
        assert_eq!(a.get(1), 7.0);
        assert!(a.shares_storage_with(&b));
        assert_eq!(a.handle_count(), 2);
        assert!(a.is_shared());
    }

    #[test]
    fn test_handle_outlives_original() {
        let b = {
            let a = Block::from_vec(vec![4.0, 5.0]);
            a.clone()
        };
        assert!(!b.is_shared());
        assert_eq!(b.get(0), 4.0);
    }

    #[test]
    fn test_swap() {
        let b = Block::from_vec(vec![1.0, 2.0, 3.0]);
        b.swap(0, 2);
        assert_eq!(b.get(0), 3.0);
        assert_eq!(b.get(2), 1.0);
    }

    #[test]
    fn test_empty() {
        let b = Block::zeros(0);
        assert!(b.is_empty());
        assert_eq!(b.handle_count(), 1);
    }

    #[test]
    fn test_distinct_blocks_do_not_share() {
        let a = Block::zeros(2);
        let b = Block::zeros(2);
        assert!(!a.shares_storage_with(&b));
    }
}
