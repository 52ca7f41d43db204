//! Structural equality.
//!
//! `PartialEq` on [`Cell`] is bit identity. [`Cell::equals`] is what user
//! code means by equal: it looks through storage differences (inline vs. heap
//! tokens, the three path forms) and compares containers by content.

use crate::cell::Cell;
use crate::heap::Heap;
use crate::kind::{Heart, Kind};
use crate::pair::{pair_x, pair_y};
use crate::sequence::path_elements;
use crate::series::array_cells;
use crate::token::utf8_view;
use crate::tuple::tuple_bytes;

impl Cell {
    /// Same kind and same content.
    pub fn equals(&self, other: &Cell, heap: &Heap) -> bool {
        let kind = self.kind();
        if kind != other.kind() {
            return false;
        }
        match kind {
            Kind::Null | Kind::Blank => true,
            Kind::Logic => self.as_logic() == other.as_logic(),
            Kind::Integer => self.as_integer() == other.as_integer(),
            #[allow(clippy::float_cmp, reason = "decimal equality is exact")]
            Kind::Decimal => self.as_decimal() == other.as_decimal(),
            Kind::BadWord => {
                self.as_label() == other.as_label() && self.is_isotope() == other.is_isotope()
            }
            Kind::Pair => {
                self.as_node() == other.as_node()
                    || (pair_x(heap, self).equals(&pair_x(heap, other), heap)
                        && pair_y(heap, self).equals(&pair_y(heap, other), heap))
            }
            Kind::Tuple => tuple_bytes(self) == tuple_bytes(other),
            Kind::Token | Kind::Text | Kind::Tag | Kind::File | Kind::Url => {
                utf8_view(heap, self, usize::MAX).text == utf8_view(heap, other, usize::MAX).text
            }
            Kind::Binary => {
                let (a, i) = self.as_series();
                let (b, j) = other.as_series();
                heap.binary(a).as_slice().get(i..) == heap.binary(b).as_slice().get(j..)
            }
            Kind::Word | Kind::SetWord | Kind::GetWord | Kind::SymWord => {
                self.as_symbol() == other.as_symbol()
            }
            Kind::Block
            | Kind::SetBlock
            | Kind::GetBlock
            | Kind::SymBlock
            | Kind::Group
            | Kind::SetGroup
            | Kind::GetGroup
            | Kind::SymGroup => all_equal(array_cells(heap, self), array_cells(heap, other), heap),
            Kind::Path | Kind::SetPath | Kind::GetPath | Kind::SymPath => {
                if self.heart() == Heart::Word && other.heart() == Heart::Word {
                    return self.as_symbol() == other.as_symbol();
                }
                all_equal(
                    &path_elements(heap, self),
                    &path_elements(heap, other),
                    heap,
                )
            }
            Kind::Object => self.as_node() == other.as_node(),
        }
    }
}

fn all_equal(a: &[Cell], b: &[Cell], heap: &Heap) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.equals(y, heap))
}

#[cfg(test)]
mod tests;
