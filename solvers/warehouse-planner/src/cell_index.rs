//! Packs a [`Cell`] into a single `u32` index (`row * width + col`).
//!
//! Used to build fixed-width cache keys (the path library, the GA fitness
//! cache) instead of hashing nested tuples, per the design note on
//! re-architecting the chromosome-as-cell-tuples representation.

use warehouse_core::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellIndex(pub u32);

impl CellIndex {
    pub fn pack(cell: Cell, width: i32) -> Self {
        CellIndex((cell.row as u32) * (width as u32) + (cell.col as u32))
    }

    pub fn unpack(self, width: i32) -> Cell {
        let width = width as u32;
        Cell::new((self.0 / width) as i32, (self.0 % width) as i32)
    }
}
