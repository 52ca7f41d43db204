use ren_cell::{bad_pick, bad_poke, Cell, Heap, RuntimeError};

use crate::dispatch::{PathHandler, Picker, PokeOutcome};

/// Objects: word pickers name fields. Only existing fields can be set.
pub struct ObjectHandler;

impl PathHandler for ObjectHandler {
    fn name(&self) -> &'static str {
        "object"
    }

    fn pick(&self, heap: &Heap, current: &Cell, picker: &Cell) -> Result<Cell, RuntimeError> {
        if let Picker::Word(symbol) = Picker::classify(picker) {
            if let Some(value) = heap.varlist(current.as_node()).get(symbol) {
                return Ok(*value);
            }
        }
        Err(bad_pick(current.kind(), picker.mold(heap)))
    }

    fn poke(
        &self,
        heap: &mut Heap,
        current: &mut Cell,
        picker: &Cell,
        value: &Cell,
    ) -> Result<PokeOutcome, RuntimeError> {
        if let Picker::Word(symbol) = Picker::classify(picker) {
            if let Some(slot) = heap.varlist_mut(current.as_node()).get_mut(symbol) {
                *slot = *value;
                return Ok(PokeOutcome::Done);
            }
        }
        Err(bad_poke(current.kind(), picker.mold(heap)))
    }
}
