use ren_cell::numeric::to_byte;
use ren_cell::token::{as_single_codepoint, is_blackhole, make_char, utf8_view};
use ren_cell::{
    bad_pick, bad_poke, bad_poke_value, illegal_zero_byte, series_frozen, Cell, Heap, Kind,
    RuntimeError,
};

use crate::dispatch::{PathHandler, Picker, PokeOutcome};

/// Character at zero-based `index` of a token or string, as a char token.
fn char_at(heap: &Heap, current: &Cell, index: Option<usize>) -> Result<Cell, RuntimeError> {
    let view = utf8_view(heap, current, usize::MAX);
    match index.and_then(|i| view.text.chars().nth(i)) {
        Some(ch) => make_char(u32::from(ch)),
        None => Ok(Cell::NULL),
    }
}

/// Tokens: read-only, except that any write aimed at the blackhole is
/// accepted and discarded.
pub struct TokenHandler;

impl PathHandler for TokenHandler {
    fn name(&self) -> &'static str {
        "token"
    }

    fn pick(&self, heap: &Heap, current: &Cell, picker: &Cell) -> Result<Cell, RuntimeError> {
        match Picker::classify(picker) {
            Picker::Index(index) => char_at(heap, current, index),
            _ => Err(bad_pick(current.kind(), picker.mold(heap))),
        }
    }

    fn poke(
        &self,
        _heap: &mut Heap,
        current: &mut Cell,
        _picker: &Cell,
        _value: &Cell,
    ) -> Result<PokeOutcome, RuntimeError> {
        if is_blackhole(current) {
            return Ok(PokeOutcome::Done);
        }
        Err(series_frozen())
    }
}

/// `text!`, `tag!`, `file!`, `url!`: integer pickers address characters.
pub struct StringHandler;

impl PathHandler for StringHandler {
    fn name(&self) -> &'static str {
        "string"
    }

    fn pick(&self, heap: &Heap, current: &Cell, picker: &Cell) -> Result<Cell, RuntimeError> {
        match Picker::classify(picker) {
            Picker::Index(index) => char_at(heap, current, index),
            _ => Err(bad_pick(current.kind(), picker.mold(heap))),
        }
    }

    fn poke(
        &self,
        heap: &mut Heap,
        current: &mut Cell,
        picker: &Cell,
        value: &Cell,
    ) -> Result<PokeOutcome, RuntimeError> {
        let Picker::Index(Some(index)) = Picker::classify(picker) else {
            return Err(bad_poke(current.kind(), picker.mold(heap)));
        };
        if value.kind() != Kind::Token {
            return Err(bad_poke_value(current.kind(), value.kind()));
        }
        if is_blackhole(value) {
            return Err(illegal_zero_byte());
        }
        let Some(ch) = as_single_codepoint(value) else {
            return Err(bad_poke_value(current.kind(), value.kind()));
        };
        let (node, offset) = current.as_series();
        let text = heap.text_mut(node);
        if text.is_frozen() {
            return Err(series_frozen());
        }
        if !text.set_char(offset + index, ch) {
            return Err(bad_poke(current.kind(), picker.mold(heap)));
        }
        Ok(PokeOutcome::Done)
    }
}

/// `binary!`: integer pickers address bytes.
///
/// Writing the blackhole stores a zero byte, the same as appending it.
pub struct BinaryHandler;

impl PathHandler for BinaryHandler {
    fn name(&self) -> &'static str {
        "binary"
    }

    fn pick(&self, heap: &Heap, current: &Cell, picker: &Cell) -> Result<Cell, RuntimeError> {
        let Picker::Index(index) = Picker::classify(picker) else {
            return Err(bad_pick(current.kind(), picker.mold(heap)));
        };
        let (node, offset) = current.as_series();
        let bytes = heap.binary(node).as_slice();
        Ok(index
            .and_then(|i| bytes.get(offset + i))
            .map_or(Cell::NULL, |&byte| Cell::integer(i64::from(byte))))
    }

    fn poke(
        &self,
        heap: &mut Heap,
        current: &mut Cell,
        picker: &Cell,
        value: &Cell,
    ) -> Result<PokeOutcome, RuntimeError> {
        let Picker::Index(Some(index)) = Picker::classify(picker) else {
            return Err(bad_poke(current.kind(), picker.mold(heap)));
        };
        let byte = match value.kind() {
            Kind::Integer => to_byte(value.as_integer())?,
            Kind::Token if is_blackhole(value) => 0,
            other => return Err(bad_poke_value(current.kind(), other)),
        };
        let (node, offset) = current.as_series();
        let binary = heap.binary_mut(node);
        if binary.is_frozen() {
            return Err(series_frozen());
        }
        if !binary.set(offset + index, byte) {
            return Err(bad_poke(current.kind(), picker.mold(heap)));
        }
        Ok(PokeOutcome::Done)
    }
}
