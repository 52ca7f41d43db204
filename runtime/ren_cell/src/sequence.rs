//! Reading path cells, whatever their storage.
//!
//! A path cell can be backed three ways:
//!
//! | Heart | Elements |
//! |---|---|
//! | `Word` holding `/` | `[_ _]` (the slash form) |
//! | `Word` holding `foo` | `[_ foo]` (a refinement) |
//! | `Pairing` | the two slots |
//! | `Array` | the frozen array from the cell's index |
//!
//! Construction lives with the path evaluator; this module only reads, so
//! that comparison and molding can see path elements.

use crate::cell::{fatal, Cell};
use crate::heap::Heap;
use crate::kind::{Heart, Kind};
use crate::symbol::Symbol;

#[track_caller]
fn expect_path(path: &Cell) {
    if !path.kind().is_any_path() {
        fatal(format_args!("expected a path kind, got {}", path.kind()));
    }
}

/// Number of elements (always at least 2).
#[track_caller]
pub fn path_len(heap: &Heap, path: &Cell) -> usize {
    expect_path(path);
    match path.heart() {
        Heart::Word | Heart::Pairing => 2,
        _ => {
            let (node, index) = path.as_series();
            heap.array(node).len().saturating_sub(index)
        }
    }
}

/// Element `index` (zero-based).
#[track_caller]
pub fn path_at(heap: &Heap, path: &Cell, index: usize) -> Cell {
    expect_path(path);
    let element = match path.heart() {
        Heart::Word => match index {
            0 => Some(Cell::BLANK),
            1 if path.as_symbol() == Symbol::SLASH => Some(Cell::BLANK),
            1 => Some(Cell::word(path.as_symbol())),
            _ => None,
        },
        Heart::Pairing => heap.pairing(path.as_node()).get(index).copied(),
        _ => {
            let (node, offset) = path.as_series();
            heap.array(node).get(offset + index).copied()
        }
    };
    match element {
        Some(cell) => cell,
        None => fatal(format_args!(
            "path element {index} out of range ({} elements)",
            path_len(heap, path)
        )),
    }
}

/// All elements, in order.
pub fn path_elements(heap: &Heap, path: &Cell) -> Vec<Cell> {
    (0..path_len(heap, path))
        .map(|i| path_at(heap, path, i))
        .collect()
}

/// `[_ word]`, in any storage.
pub fn is_refinement(heap: &Heap, path: &Cell) -> bool {
    if !path.kind().is_any_path() {
        return false;
    }
    match path.heart() {
        Heart::Word => path.as_symbol() != Symbol::SLASH,
        _ => {
            path_len(heap, path) == 2
                && path_at(heap, path, 0).is_blank()
                && path_at(heap, path, 1).kind() == Kind::Word
        }
    }
}

/// The `[_ _]` slash form.
pub fn is_slash_form(path: &Cell) -> bool {
    path.kind().is_any_path()
        && path.heart() == Heart::Word
        && path.as_symbol() == Symbol::SLASH
}
