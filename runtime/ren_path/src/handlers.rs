//! Built-in path step handlers.
//!
//! Containers that live in the heap (arrays, strings, binaries, objects)
//! mutate their node and report [`PokeOutcome::Done`]. Values that live
//! entirely in the cell (tuples) or that are treated as immutable values
//! (pairs) change the caller's temporary and report
//! [`PokeOutcome::Updated`].
//!
//! [`PokeOutcome::Done`]: crate::PokeOutcome::Done
//! [`PokeOutcome::Updated`]: crate::PokeOutcome::Updated

mod array;
mod object;
mod pair;
mod string;
mod tuple;

pub use array::{ArrayHandler, PathElementsHandler};
pub use object::ObjectHandler;
pub use pair::PairHandler;
pub use string::{BinaryHandler, StringHandler, TokenHandler};
pub use tuple::TupleHandler;

#[cfg(test)]
mod tests;
