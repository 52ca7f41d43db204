//! Tuples: up to eight bytes packed into the cell (`1.2.3`, `255.0.0.128`).
//!
//! Bytes past the declared length are zero, and comparisons treat them as
//! present: `1.0.0` equals `1.0.0.0`. Because the inline buffer is always
//! zero-filled past the length, comparing whole buffers gives exactly that.

use std::cmp::Ordering;
use std::fmt;

use crate::cell::{fatal, Cell, InlineBytes, Payload};
use crate::flags::CellFlags;
use crate::kind::{Heart, Kind};

/// Maximum tuple length.
pub const MAX_TUPLE: usize = InlineBytes::CAPACITY;

/// Tuple contents with trailing-zero equality and ordering.
#[derive(Copy, Clone)]
pub struct TupleBytes {
    bytes: InlineBytes,
}

impl TupleBytes {
    /// `None` if `bytes` is longer than [`MAX_TUPLE`].
    pub fn new(bytes: &[u8]) -> Option<Self> {
        InlineBytes::new(bytes, 0).map(|bytes| TupleBytes { bytes })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.as_slice().get(index).copied()
    }
}

impl PartialEq for TupleBytes {
    fn eq(&self, other: &Self) -> bool {
        self.bytes.buffer() == other.bytes.buffer()
    }
}

impl Eq for TupleBytes {}

impl PartialOrd for TupleBytes {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TupleBytes {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bytes.buffer().cmp(other.bytes.buffer())
    }
}

impl std::hash::Hash for TupleBytes {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.bytes.buffer().hash(state);
    }
}

impl fmt::Debug for TupleBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TupleBytes({self})")
    }
}

impl fmt::Display for TupleBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.as_slice().iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{byte}")?;
        }
        Ok(())
    }
}

/// Write a tuple of `bytes` into `out`. No heap allocation.
#[track_caller]
pub fn init_tuple(out: &mut Cell, bytes: &[u8]) {
    let Some(inline) = InlineBytes::new(bytes, 0) else {
        fatal(format_args!(
            "tuple of {} bytes exceeds {MAX_TUPLE}",
            bytes.len()
        ));
    };
    out.reset(Kind::Tuple, Heart::Bytes, CellFlags::empty());
    out.populate(Payload::Bytes(inline));
}

#[track_caller]
pub fn make_tuple(bytes: &[u8]) -> Cell {
    let mut out = Cell::NULL;
    init_tuple(&mut out, bytes);
    out
}

#[track_caller]
fn expect_tuple(cell: &Cell) -> &InlineBytes {
    if cell.kind() != Kind::Tuple {
        fatal(format_args!("expected tuple!, got {}", cell.kind()));
    }
    cell.as_bytes()
}

#[track_caller]
pub fn tuple_bytes(cell: &Cell) -> TupleBytes {
    TupleBytes {
        bytes: *expect_tuple(cell),
    }
}

#[track_caller]
pub fn tuple_len(cell: &Cell) -> usize {
    expect_tuple(cell).len()
}

/// Byte at zero-based `index`, `None` past the declared length.
#[track_caller]
pub fn tuple_at(cell: &Cell, index: usize) -> Option<u8> {
    expect_tuple(cell).as_slice().get(index).copied()
}

#[track_caller]
pub fn compare_tuples(a: &Cell, b: &Cell) -> Ordering {
    tuple_bytes(a).cmp(&tuple_bytes(b))
}

/// Overwrite byte `index` in place, extending the tuple by one when writing
/// just past its end. Returns `false` when `index` is further out or the
/// tuple is already full.
#[track_caller]
pub fn poke_tuple(cell: &mut Cell, index: usize, byte: u8) -> bool {
    if cell.kind() != Kind::Tuple {
        fatal(format_args!("expected tuple!, got {}", cell.kind()));
    }
    cell.as_bytes_mut().set(index, byte)
}

#[cfg(test)]
mod tests;
