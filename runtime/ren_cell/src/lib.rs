//! Ren Cell - value representation for the Ren runtime.
//!
//! This crate provides:
//! - The universal value cell (`Cell`) with its kind/heart split and header flags
//! - The process-wide symbol table (`Symbol`)
//! - The node heap and its tracing collector (`Heap`, `NodeId`)
//! - Payload encodings: numbers, logic, pairs, tuples, tokens
//! - Series constructors, structural equality, molding
//! - Catchable errors and abrupt outcomes (`RuntimeError`, `ControlAction`)
//!
//! # Cell discipline
//!
//! Cells are written through `Cell::reset` + `Cell::populate` (or a factory
//! that wraps both) and read through accessors that check the heart. A
//! mismatched read is an implementation bug and panics via [`fatal`]. Anything
//! user code can trap is a [`RuntimeError`].
//!
//! # Heap discipline
//!
//! Every constructor that allocates hands its node to the collector
//! (`Heap::manage`) before returning. Code that calls `Heap::alloc` directly
//! must do the same before anything can run a collection.

mod cell;
mod compare;
mod config;
mod errors;
mod flags;
mod heap;
mod kind;
mod logic;
mod mold;
pub mod numeric;
pub mod pair;
#[cfg(feature = "provenance")]
mod provenance;
pub mod sequence;
pub mod series;
mod symbol;
pub mod token;
pub mod tuple;

pub use cell::{fatal, Cell, InlineBytes, Payload};
pub use config::{RuntimeConfig, MAX_CODEPOINT};
pub use flags::CellFlags;
pub use heap::{Array, BinarySeries, CollectStats, Heap, Node, NodeId, TextSeries, VarList};
pub use kind::{Heart, Kind};
pub use logic::{init_logic, is_conditionally_true, is_falsey_header, is_truthy};
#[cfg(feature = "provenance")]
pub use provenance::{bump_tick, current_tick, Provenance};
pub use symbol::{Symbol, SymbolError};

pub use errors::{ControlAction, ErrorKind, EvalResult, RuntimeError, Thrown};

// Re-export error constructors for use by other crates
pub use errors::{
    bad_conditional, bad_path_head, bad_path_set, bad_pick, bad_poke, bad_poke_value,
    block_conditional, codepoint_too_high, groups_disallowed, illegal_zero_byte,
    invalid_codepoint, not_bound, not_numeric, out_of_range, series_frozen,
};
