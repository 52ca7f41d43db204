//! Logic payload and truthiness.

use crate::cell::{Cell, Payload};
use crate::errors::{bad_conditional, block_conditional, RuntimeError};
use crate::flags::CellFlags;
use crate::kind::{Heart, Kind};

/// Overwrite `out` with a logic value.
#[track_caller]
pub fn init_logic(out: &mut Cell, value: bool) {
    let flags = if value {
        CellFlags::empty()
    } else {
        CellFlags::FALSEY
    };
    out.reset(Kind::Logic, Heart::Logic, flags);
    out.populate(Payload::Logic(value));
}

impl Cell {
    pub fn logic(value: bool) -> Cell {
        if value {
            Cell::TRUE
        } else {
            Cell::FALSE
        }
    }
}

/// Truthiness as seen by conditionals.
///
/// Bad-words raise `BadConditional`, except the null isotope, which is
/// falsey. Every kind past `logic` is truthy, including `0` and empty series.
pub fn is_truthy(cell: &Cell) -> Result<bool, RuntimeError> {
    let kind = cell.kind();
    if kind == Kind::BadWord {
        if cell.is_null_isotope() {
            return Ok(false);
        }
        return Err(bad_conditional(kind));
    }
    if kind.is_default_truthy() {
        return Ok(true);
    }
    match kind {
        Kind::Logic => Ok(cell.as_logic()),
        _ => Ok(false),
    }
}

/// [`is_truthy`] for branch conditions: a literal block straight from source
/// raises `BlockConditional` instead of silently counting as true.
pub fn is_conditionally_true(cell: &Cell) -> Result<bool, RuntimeError> {
    if cell.kind().is_any_block() && cell.is_unevaluated() {
        return Err(block_conditional(cell.kind()));
    }
    is_truthy(cell)
}

/// Header-only falsehood test: no payload decode, no errors.
#[inline]
pub fn is_falsey_header(cell: &Cell) -> bool {
    cell.flags().contains(CellFlags::FALSEY)
}
