use ren_cell::numeric::to_byte;
use ren_cell::tuple::{poke_tuple, tuple_at};
use ren_cell::{bad_pick, bad_poke, bad_poke_value, Cell, Heap, Kind, RuntimeError};

use crate::dispatch::{PathHandler, Picker, PokeOutcome};

/// Tuples: integer pickers address bytes.
///
/// The bytes live inside the cell, so there is no shared storage to write
/// to; a poke edits the caller's temporary copy.
pub struct TupleHandler;

impl PathHandler for TupleHandler {
    fn name(&self) -> &'static str {
        "tuple"
    }

    fn pick(&self, heap: &Heap, current: &Cell, picker: &Cell) -> Result<Cell, RuntimeError> {
        match Picker::classify(picker) {
            Picker::Index(index) => Ok(index
                .and_then(|i| tuple_at(current, i))
                .map_or(Cell::NULL, |byte| Cell::integer(i64::from(byte)))),
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
        if value.kind() != Kind::Integer {
            return Err(bad_poke_value(current.kind(), value.kind()));
        }
        let byte = to_byte(value.as_integer())?;
        if !poke_tuple(current, index, byte) {
            return Err(bad_poke(current.kind(), picker.mold(heap)));
        }
        Ok(PokeOutcome::Updated)
    }
}
