use ren_cell::pair::{make_pair, pair_x, pair_y};
use ren_cell::{bad_pick, bad_poke, bad_poke_value, Cell, Heap, RuntimeError, Symbol};

use crate::dispatch::{PathHandler, Picker, PokeOutcome};

/// Pairs: `1`/`x` and `2`/`y`.
///
/// Pairs behave as values, so a poke builds a new pairing rather than
/// changing the shared one, and the new pair is written back by the walker.
pub struct PairHandler;

fn slot(picker: &Cell) -> Option<usize> {
    match Picker::classify(picker) {
        Picker::Index(Some(i)) if i < 2 => Some(i),
        Picker::Word(Symbol::X) => Some(0),
        Picker::Word(Symbol::Y) => Some(1),
        _ => None,
    }
}

impl PathHandler for PairHandler {
    fn name(&self) -> &'static str {
        "pair"
    }

    fn pick(&self, heap: &Heap, current: &Cell, picker: &Cell) -> Result<Cell, RuntimeError> {
        match slot(picker) {
            Some(0) => Ok(pair_x(heap, current)),
            Some(_) => Ok(pair_y(heap, current)),
            None => Err(bad_pick(current.kind(), picker.mold(heap))),
        }
    }

    fn poke(
        &self,
        heap: &mut Heap,
        current: &mut Cell,
        picker: &Cell,
        value: &Cell,
    ) -> Result<PokeOutcome, RuntimeError> {
        let Some(index) = slot(picker) else {
            return Err(bad_poke(current.kind(), picker.mold(heap)));
        };
        if !value.kind().is_numeric() {
            return Err(bad_poke_value(current.kind(), value.kind()));
        }
        let mut coordinates = [pair_x(heap, current), pair_y(heap, current)];
        coordinates[index] = *value;
        let [x, y] = coordinates;
        *current = make_pair(heap, x, y);
        Ok(PokeOutcome::Updated)
    }
}
