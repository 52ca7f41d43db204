//! Cell header flags.
//!
//! Four bits ride along with the kind and heart in every cell header:
//!
//! - **Falsehood**: set for null, blank and logic false, so conditional code
//!   can test falseyness without decoding the payload.
//! - **Isotope**: marks the "quasi" variant of a value (the null isotope is
//!   the bad-word `~null~` carrying this bit).
//! - **Unevaluated**: the value came from source without being evaluated.
//! - **Node payload**: the payload references a heap node; the collector
//!   only looks at cells with this bit.

use bitflags::bitflags;

bitflags! {
    /// Header bits stored alongside the kind and heart discriminants.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct CellFlags: u8 {
        /// Null, blank or logic false.
        const FALSEY = 1 << 0;
        /// Quasi variant of the value.
        const ISOTOPE = 1 << 1;
        /// Literal from source, not produced by evaluation.
        const UNEVALUATED = 1 << 2;
        /// Payload holds a heap node reference.
        const NODE_PAYLOAD = 1 << 3;
    }
}

impl CellFlags {
    /// Flags a caller may pass to `Cell::reset`.
    ///
    /// `NODE_PAYLOAD` is owned by the cell and derived from the payload.
    pub const CALLER_SETTABLE: Self = Self::FALSEY
        .union(Self::ISOTOPE)
        .union(Self::UNEVALUATED);
}
