use ren_cell::sequence::{path_at, path_len};
use ren_cell::series::array_cells;
use ren_cell::{
    bad_pick, bad_poke, bad_poke_value, series_frozen, Cell, Heap, Kind, RuntimeError, Symbol,
};

use crate::dispatch::{PathHandler, Picker, PokeOutcome};

/// Blocks and groups: integer index (1-based from the series position) or
/// select-by-word (`block/key` gives the value after `key`).
pub struct ArrayHandler;

/// Position just after the first word spelled `symbol`.
fn select(cells: &[Cell], symbol: Symbol) -> Option<usize> {
    cells
        .iter()
        .position(|cell| cell.kind().is_any_word() && cell.as_symbol() == symbol)
        .map(|at| at + 1)
}

impl PathHandler for ArrayHandler {
    fn name(&self) -> &'static str {
        "array"
    }

    fn pick(&self, heap: &Heap, current: &Cell, picker: &Cell) -> Result<Cell, RuntimeError> {
        let cells = array_cells(heap, current);
        let slot = match Picker::classify(picker) {
            Picker::Index(index) => index,
            Picker::Word(symbol) => select(cells, symbol),
            Picker::Other => return Err(bad_pick(current.kind(), picker.mold(heap))),
        };
        Ok(slot
            .and_then(|i| cells.get(i))
            .copied()
            .unwrap_or(Cell::NULL))
    }

    fn poke(
        &self,
        heap: &mut Heap,
        current: &mut Cell,
        picker: &Cell,
        value: &Cell,
    ) -> Result<PokeOutcome, RuntimeError> {
        if value.is_null() {
            return Err(bad_poke_value(current.kind(), Kind::Null));
        }
        let (node, offset) = current.as_series();
        if heap.array(node).is_frozen() {
            return Err(series_frozen());
        }
        let slot = match Picker::classify(picker) {
            Picker::Index(index) => index,
            Picker::Word(symbol) => select(array_cells(heap, current), symbol),
            Picker::Other => None,
        };
        let Some(slot) = slot else {
            return Err(bad_poke(current.kind(), picker.mold(heap)));
        };
        if !heap.array_mut(node).set(offset + slot, *value) {
            return Err(bad_poke(current.kind(), picker.mold(heap)));
        }
        Ok(PokeOutcome::Done)
    }
}

/// Paths picked into as values (`:p/2` where `p` holds a path). Paths are
/// frozen, so pokes always fail.
pub struct PathElementsHandler;

impl PathHandler for PathElementsHandler {
    fn name(&self) -> &'static str {
        "path"
    }

    fn pick(&self, heap: &Heap, current: &Cell, picker: &Cell) -> Result<Cell, RuntimeError> {
        match Picker::classify(picker) {
            Picker::Index(Some(i)) if i < path_len(heap, current) => Ok(path_at(heap, current, i)),
            Picker::Index(_) => Ok(Cell::NULL),
            _ => Err(bad_pick(current.kind(), picker.mold(heap))),
        }
    }

    fn poke(
        &self,
        _heap: &mut Heap,
        _current: &mut Cell,
        _picker: &Cell,
        _value: &Cell,
    ) -> Result<PokeOutcome, RuntimeError> {
        Err(series_frozen())
    }
}
