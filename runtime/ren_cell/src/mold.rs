//! Source-like rendering of cells, for messages and debugging.

use std::fmt::Write as _;

use crate::cell::Cell;
use crate::heap::Heap;
use crate::kind::Kind;
use crate::pair::{pair_x, pair_y};
use crate::sequence::path_elements;
use crate::series::array_cells;
use crate::token::utf8_view;
use crate::tuple::tuple_bytes;

impl Cell {
    /// Render as source text.
    pub fn mold(&self, heap: &Heap) -> String {
        let mut out = String::new();
        mold_into(&mut out, self, heap);
        out
    }
}

fn mold_into(out: &mut String, cell: &Cell, heap: &Heap) {
    let kind = cell.kind();
    match kind {
        Kind::Null => out.push_str("~null~"),
        Kind::Blank => out.push('_'),
        Kind::Logic => out.push_str(if cell.as_logic() { "true" } else { "false" }),
        Kind::Integer => {
            let _ = write!(out, "{}", cell.as_integer());
        }
        Kind::Decimal => {
            let _ = write!(out, "{:?}", cell.as_decimal());
        }
        Kind::BadWord => match cell.as_label() {
            Some(label) => {
                let _ = write!(out, "~{label}~");
            }
            None => out.push('~'),
        },
        Kind::Pair => {
            mold_into(out, &pair_x(heap, cell), heap);
            out.push('x');
            mold_into(out, &pair_y(heap, cell), heap);
        }
        Kind::Tuple => {
            let _ = write!(out, "{}", tuple_bytes(cell));
        }
        Kind::Token => {
            out.push('#');
            out.push_str(utf8_view(heap, cell, usize::MAX).text);
        }
        Kind::Text => {
            out.push('"');
            for ch in utf8_view(heap, cell, usize::MAX).text.chars() {
                if ch == '"' || ch == '^' {
                    out.push('^');
                }
                out.push(ch);
            }
            out.push('"');
        }
        Kind::Tag => {
            let _ = write!(out, "<{}>", utf8_view(heap, cell, usize::MAX).text);
        }
        Kind::File => {
            let _ = write!(out, "%{}", utf8_view(heap, cell, usize::MAX).text);
        }
        Kind::Url => out.push_str(utf8_view(heap, cell, usize::MAX).text),
        Kind::Binary => {
            let (node, index) = cell.as_series();
            out.push_str("#{");
            for byte in heap.binary(node).as_slice().get(index..).unwrap_or_default() {
                let _ = write!(out, "{byte:02X}");
            }
            out.push('}');
        }
        Kind::Word | Kind::SetWord | Kind::GetWord | Kind::SymWord => {
            decorate(out, kind, |out| out.push_str(cell.as_symbol().as_str()));
        }
        Kind::Block | Kind::SetBlock | Kind::GetBlock | Kind::SymBlock => {
            decorate(out, kind, |out| {
                mold_list(out, "[", array_cells(heap, cell), " ", "]", heap);
            });
        }
        Kind::Group | Kind::SetGroup | Kind::GetGroup | Kind::SymGroup => {
            decorate(out, kind, |out| {
                mold_list(out, "(", array_cells(heap, cell), " ", ")", heap);
            });
        }
        Kind::Path | Kind::SetPath | Kind::GetPath | Kind::SymPath => {
            let elements = path_elements(heap, cell);
            decorate(out, kind, |out| {
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        out.push('/');
                    }
                    // blanks are implied by the slashes around them
                    if !element.is_blank() {
                        mold_into(out, element, heap);
                    }
                }
            });
        }
        Kind::Object => {
            out.push_str("make object! [");
            for (i, (key, value)) in heap.varlist(cell.as_node()).iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                let _ = write!(out, "{key}: ");
                mold_into(out, value, heap);
            }
            out.push(']');
        }
    }
}

/// Apply the set/get/sym decoration of `kind` around `body`.
fn decorate(out: &mut String, kind: Kind, body: impl FnOnce(&mut String)) {
    match kind {
        Kind::GetWord | Kind::GetBlock | Kind::GetGroup | Kind::GetPath => out.push(':'),
        Kind::SymWord | Kind::SymBlock | Kind::SymGroup | Kind::SymPath => out.push('@'),
        _ => {}
    }
    body(out);
    if matches!(
        kind,
        Kind::SetWord | Kind::SetBlock | Kind::SetGroup | Kind::SetPath
    ) {
        out.push(':');
    }
}

fn mold_list(out: &mut String, open: &str, cells: &[Cell], sep: &str, close: &str, heap: &Heap) {
    out.push_str(open);
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            out.push_str(sep);
        }
        mold_into(out, cell, heap);
    }
    out.push_str(close);
}
