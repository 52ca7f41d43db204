//! The evaluator's scratch stack of cells.
//!
//! Builders push elements, remember the height they started at, and pop
//! everything above it in one go. The stack is also a GC root set.

use ren_cell::Cell;
use smallvec::SmallVec;

/// Elements popped off the stack; paths are usually short.
pub type Popped = SmallVec<[Cell; 8]>;

#[derive(Clone, Debug, Default)]
pub struct DataStack {
    cells: Vec<Cell>,
}

impl DataStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    /// Current height; pass it back to [`DataStack::pop_to`] later.
    #[inline]
    pub fn height(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Everything above `base`, bottom first.
    pub fn above(&self, base: usize) -> &[Cell] {
        self.cells.get(base..).unwrap_or_default()
    }

    /// Remove and return everything above `base`, bottom first.
    ///
    /// A `base` above the current height pops nothing.
    pub fn pop_to(&mut self, base: usize) -> Popped {
        if base >= self.cells.len() {
            return Popped::new();
        }
        self.cells.drain(base..).collect()
    }

    /// Roots for a collection.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}
