//! Constructors for heap-backed series and objects.
//!
//! Every constructor here manages its node before returning, so the result
//! is safe to hold across a collection as long as it is rooted.

use crate::cell::{fatal, Cell, Payload};
use crate::flags::CellFlags;
use crate::heap::{Array, BinarySeries, Heap, Node, NodeId, TextSeries, VarList};
use crate::kind::{Heart, Kind};

#[track_caller]
fn init_series(heap: &mut Heap, out: &mut Cell, kind: Kind, heart: Heart, node: Node) -> NodeId {
    let id = heap.alloc(node);
    heap.manage(id);
    out.reset(kind, heart, CellFlags::empty());
    out.populate(Payload::Series { node: id, index: 0 });
    id
}

/// A text-like string (`text!`, `tag!`, `file!`, `url!`).
#[track_caller]
pub fn init_text(heap: &mut Heap, out: &mut Cell, kind: Kind, text: &str) -> NodeId {
    if !kind.is_any_string() {
        fatal(format_args!("{kind} is not a string kind"));
    }
    init_series(heap, out, kind, Heart::Text, Node::Text(TextSeries::new(text)))
}

#[track_caller]
pub fn make_text(heap: &mut Heap, kind: Kind, text: &str) -> Cell {
    let mut out = Cell::NULL;
    init_text(heap, &mut out, kind, text);
    out
}

#[track_caller]
pub fn init_binary(heap: &mut Heap, out: &mut Cell, bytes: &[u8]) -> NodeId {
    init_series(
        heap,
        out,
        Kind::Binary,
        Heart::Binary,
        Node::Binary(BinarySeries::new(bytes)),
    )
}

#[track_caller]
pub fn make_binary(heap: &mut Heap, bytes: &[u8]) -> Cell {
    let mut out = Cell::NULL;
    init_binary(heap, &mut out, bytes);
    out
}

/// A block or group over `cells`.
#[track_caller]
pub fn init_block(heap: &mut Heap, out: &mut Cell, kind: Kind, cells: Vec<Cell>) -> NodeId {
    if !kind.is_any_array() {
        fatal(format_args!("{kind} is not a block or group kind"));
    }
    init_series(heap, out, kind, Heart::Array, Node::Array(Array::new(cells)))
}

#[track_caller]
pub fn make_block(heap: &mut Heap, kind: Kind, cells: Vec<Cell>) -> Cell {
    let mut out = Cell::NULL;
    init_block(heap, &mut out, kind, cells);
    out
}

#[track_caller]
pub fn init_object(heap: &mut Heap, out: &mut Cell, vars: VarList) -> NodeId {
    let id = heap.alloc(Node::VarList(vars));
    heap.manage(id);
    out.reset(Kind::Object, Heart::VarList, CellFlags::empty());
    out.populate(Payload::Node(id));
    id
}

#[track_caller]
pub fn make_object(heap: &mut Heap, vars: VarList) -> Cell {
    let mut out = Cell::NULL;
    init_object(heap, &mut out, vars);
    out
}

/// Cells of a block or group from its current position.
#[track_caller]
pub fn array_cells<'a>(heap: &'a Heap, cell: &Cell) -> &'a [Cell] {
    let (node, index) = cell.as_series();
    heap.array(node).cells().get(index..).unwrap_or_default()
}

#[cfg(test)]
mod tests;
