//! Pairs: two numbers in a pairing node.
//!
//! A pair cell holds only a [`NodeId`]; copying the cell shares the node. The
//! node is handed to the collector as soon as it is allocated.

use crate::cell::{fatal, Cell, Payload};
use crate::flags::CellFlags;
use crate::heap::{Heap, Node, NodeId};
use crate::kind::{Heart, Kind};
use crate::numeric::{int_to_decimal, round_to_int};

/// Allocate a pairing for `(x, y)` and point `out` at it.
///
/// Both coordinates must be integers or decimals.
#[track_caller]
pub fn init_pair(heap: &mut Heap, out: &mut Cell, x: Cell, y: Cell) -> NodeId {
    for coordinate in [&x, &y] {
        if !coordinate.kind().is_numeric() {
            fatal(format_args!(
                "pair coordinate must be numeric, got {}",
                coordinate.kind()
            ));
        }
    }
    let id = heap.alloc(Node::Pairing([x, y]));
    heap.manage(id);
    out.reset(Kind::Pair, Heart::Pairing, CellFlags::empty());
    out.populate(Payload::Node(id));
    id
}

/// Shorthand for [`init_pair`] into a fresh cell.
#[track_caller]
pub fn make_pair(heap: &mut Heap, x: Cell, y: Cell) -> Cell {
    let mut out = Cell::NULL;
    init_pair(heap, &mut out, x, y);
    out
}

#[track_caller]
fn slots(heap: &Heap, pair: &Cell) -> [Cell; 2] {
    if pair.kind() != Kind::Pair {
        fatal(format_args!("expected pair!, got {}", pair.kind()));
    }
    *heap.pairing(pair.as_node())
}

#[track_caller]
pub fn pair_x(heap: &Heap, pair: &Cell) -> Cell {
    slots(heap, pair)[0]
}

#[track_caller]
pub fn pair_y(heap: &Heap, pair: &Cell) -> Cell {
    slots(heap, pair)[1]
}

fn as_decimal(slot: &Cell) -> f64 {
    match slot.kind() {
        Kind::Integer => int_to_decimal(slot.as_integer()),
        _ => slot.as_decimal(),
    }
}

fn as_int(slot: &Cell) -> i64 {
    match slot.kind() {
        Kind::Integer => slot.as_integer(),
        _ => i64::from(round_to_int(slot.as_decimal())),
    }
}

#[track_caller]
pub fn x_as_decimal(heap: &Heap, pair: &Cell) -> f64 {
    as_decimal(&pair_x(heap, pair))
}

#[track_caller]
pub fn y_as_decimal(heap: &Heap, pair: &Cell) -> f64 {
    as_decimal(&pair_y(heap, pair))
}

/// Integer slots read exactly; decimal slots go through [`round_to_int`].
#[track_caller]
pub fn x_as_int(heap: &Heap, pair: &Cell) -> i64 {
    as_int(&pair_x(heap, pair))
}

#[track_caller]
pub fn y_as_int(heap: &Heap, pair: &Cell) -> i64 {
    as_int(&pair_y(heap, pair))
}
