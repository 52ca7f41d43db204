//! The universal value cell.
//!
//! A [`Cell`] is a fixed-size, `Copy` container for any runtime value: a
//! [`Kind`], a [`Heart`], a byte of [`CellFlags`] and a [`Payload`]. Small
//! values (integers, decimals, logic, symbols, up to 8 raw bytes) live in the
//! payload directly; everything else is a [`NodeId`] into the [`Heap`].
//!
//! # Writing
//!
//! [`Cell::reset`] overwrites the whole header and poisons the payload, then
//! [`Cell::populate`] fills the payload. There is no way to change the kind
//! while keeping stale payload bits. The factory constructors
//! (`Cell::integer`, `Cell::word`, ...) wrap the pair for the common cases.
//!
//! # Reading
//!
//! Each payload accessor (`as_integer`, `as_bytes`, `as_node`, ...) checks
//! that the heart matches before returning. A mismatch is an implementation
//! bug, not a user error, so it panics rather than returning `Result`.
//!
//! [`Heap`]: crate::Heap

use std::fmt;

use crate::flags::CellFlags;
use crate::heap::NodeId;
use crate::kind::{Heart, Kind};
use crate::symbol::Symbol;

#[cfg(feature = "provenance")]
use crate::provenance::Provenance;

/// Raw inline storage: up to 8 bytes plus a byte length and a cached
/// codepoint count (only meaningful for tokens).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct InlineBytes {
    buf: [u8; InlineBytes::CAPACITY],
    len: u8,
    codepoints: u8,
}

impl InlineBytes {
    /// Bytes of raw inline storage.
    pub const CAPACITY: usize = 8;

    /// Copy `bytes` in, zero-filling the remainder.
    ///
    /// Returns `None` if `bytes` does not fit.
    pub fn new(bytes: &[u8], codepoints: u8) -> Option<Self> {
        if bytes.len() > Self::CAPACITY {
            return None;
        }
        let mut buf = [0u8; Self::CAPACITY];
        buf[..bytes.len()].copy_from_slice(bytes);
        Some(InlineBytes {
            buf,
            #[allow(clippy::cast_possible_truncation, reason = "len <= CAPACITY (8)")]
            len: bytes.len() as u8,
            codepoints,
        })
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub const fn codepoints(&self) -> usize {
        self.codepoints as usize
    }

    /// The declared bytes.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }

    /// The whole buffer, including zero bytes past the declared length.
    #[inline]
    pub fn buffer(&self) -> &[u8; Self::CAPACITY] {
        &self.buf
    }

    /// Overwrite byte `index`, growing the declared length by one when
    /// `index == len`. Returns `false` if `index` is past that.
    pub fn set(&mut self, index: usize, byte: u8) -> bool {
        if index >= Self::CAPACITY || index > self.len() {
            return false;
        }
        self.buf[index] = byte;
        if index == self.len() {
            self.len += 1;
        }
        true
    }
}

/// Payload storage. Which variant is legal is decided by the cell's heart.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Payload {
    /// Written by `reset`; any read is fatal.
    Poisoned,
    /// Hearts without data (null, blank).
    Empty,
    Logic(bool),
    Integer(i64),
    Decimal(f64),
    Bytes(InlineBytes),
    Symbol(Symbol),
    /// Bad-words may be unlabeled (`~`).
    Label(Option<Symbol>),
    /// Pairing and var-list nodes.
    Node(NodeId),
    /// Series nodes with a position.
    Series { node: NodeId, index: u32 },
}

impl Payload {
    fn fits(&self, heart: Heart) -> bool {
        matches!(
            (heart, self),
            (Heart::Null | Heart::Blank, Payload::Empty)
                | (Heart::Logic, Payload::Logic(_))
                | (Heart::Integer, Payload::Integer(_))
                | (Heart::Decimal, Payload::Decimal(_))
                | (Heart::Bytes, Payload::Bytes(_))
                | (Heart::Word, Payload::Symbol(_))
                | (Heart::BadWord, Payload::Label(_))
                | (Heart::Pairing | Heart::VarList, Payload::Node(_))
                | (
                    Heart::Array | Heart::Text | Heart::Binary,
                    Payload::Series { .. }
                )
        )
    }

    fn node(&self) -> Option<NodeId> {
        match *self {
            Payload::Node(node) | Payload::Series { node, .. } => Some(node),
            _ => None,
        }
    }
}

/// A runtime value.
#[derive(Copy, Clone)]
pub struct Cell {
    kind: Kind,
    heart: Heart,
    flags: CellFlags,
    payload: Payload,
    #[cfg(feature = "provenance")]
    origin: Option<Provenance>,
}

impl Cell {
    /// Absence of a value.
    pub const NULL: Cell = Cell::constant(Kind::Null, Heart::Null, CellFlags::FALSEY, Payload::Empty);

    /// `_`
    pub const BLANK: Cell =
        Cell::constant(Kind::Blank, Heart::Blank, CellFlags::FALSEY, Payload::Empty);

    pub const TRUE: Cell =
        Cell::constant(Kind::Logic, Heart::Logic, CellFlags::empty(), Payload::Logic(true));

    pub const FALSE: Cell = Cell::constant(
        Kind::Logic,
        Heart::Logic,
        CellFlags::FALSEY,
        Payload::Logic(false),
    );

    /// `~null~` isotope: what "no result" looks like to conditionals.
    pub const NULL_ISOTOPE: Cell = Cell::constant(
        Kind::BadWord,
        Heart::BadWord,
        CellFlags::ISOTOPE,
        Payload::Label(Some(Symbol::NULL)),
    );

    const fn constant(kind: Kind, heart: Heart, flags: CellFlags, payload: Payload) -> Cell {
        Cell {
            kind,
            heart,
            flags,
            payload,
            #[cfg(feature = "provenance")]
            origin: None,
        }
    }

    /// Overwrite the header and poison the payload.
    ///
    /// `FALSEY` is implied for null and blank. The caller must follow up with
    /// [`Cell::populate`]; until then every payload read is fatal.
    #[track_caller]
    pub fn reset(&mut self, kind: Kind, heart: Heart, flags: CellFlags) {
        if !kind.accepts_heart(heart) {
            fatal(format_args!("{kind} cannot be stored as {heart:?}"));
        }
        let mut flags = flags & CellFlags::CALLER_SETTABLE;
        if matches!(kind, Kind::Null | Kind::Blank) {
            flags |= CellFlags::FALSEY;
        }
        *self = Cell {
            kind,
            heart,
            flags,
            payload: Payload::Poisoned,
            #[cfg(feature = "provenance")]
            origin: Some(Provenance::here()),
        };
    }

    /// Fill the payload of a freshly reset cell.
    #[track_caller]
    pub fn populate(&mut self, payload: Payload) {
        if self.payload != Payload::Poisoned {
            self.fatal_mismatch("populate on a cell that was not reset");
        }
        if !payload.fits(self.heart) {
            self.fatal_mismatch("payload does not fit heart");
        }
        if payload.node().is_some() {
            self.flags |= CellFlags::NODE_PAYLOAD;
        }
        self.payload = payload;
    }

    /// A fully initialized cell in one step.
    #[track_caller]
    pub fn new(kind: Kind, heart: Heart, flags: CellFlags, payload: Payload) -> Cell {
        let mut cell = Cell::NULL;
        cell.reset(kind, heart, flags);
        cell.populate(payload);
        cell
    }

    // Factory constructors

    #[track_caller]
    pub fn integer(value: i64) -> Cell {
        Cell::new(Kind::Integer, Heart::Integer, CellFlags::empty(), Payload::Integer(value))
    }

    #[track_caller]
    pub fn decimal(value: f64) -> Cell {
        Cell::new(Kind::Decimal, Heart::Decimal, CellFlags::empty(), Payload::Decimal(value))
    }

    /// A plain `word!`.
    #[track_caller]
    pub fn word(symbol: Symbol) -> Cell {
        Cell::any_word(Kind::Word, symbol)
    }

    /// Any of the four word kinds.
    #[track_caller]
    pub fn any_word(kind: Kind, symbol: Symbol) -> Cell {
        if !kind.is_any_word() {
            fatal(format_args!("{kind} is not a word kind"));
        }
        Cell::new(kind, Heart::Word, CellFlags::empty(), Payload::Symbol(symbol))
    }

    /// `~label~`, or `~` when `label` is `None`.
    #[track_caller]
    pub fn bad_word(label: Option<Symbol>, isotope: bool) -> Cell {
        let flags = if isotope {
            CellFlags::ISOTOPE
        } else {
            CellFlags::empty()
        };
        Cell::new(Kind::BadWord, Heart::BadWord, flags, Payload::Label(label))
    }

    // Header reads

    #[inline]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[inline]
    pub fn heart(&self) -> Heart {
        self.heart
    }

    #[inline]
    pub fn flags(&self) -> CellFlags {
        self.flags
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.kind == Kind::Null
    }

    #[inline]
    pub fn is_blank(&self) -> bool {
        self.kind == Kind::Blank
    }

    #[inline]
    pub fn is_isotope(&self) -> bool {
        self.flags.contains(CellFlags::ISOTOPE)
    }

    #[inline]
    pub fn is_unevaluated(&self) -> bool {
        self.flags.contains(CellFlags::UNEVALUATED)
    }

    /// `~null~` with the isotope bit.
    pub fn is_null_isotope(&self) -> bool {
        self.kind == Kind::BadWord
            && self.is_isotope()
            && self.payload == Payload::Label(Some(Symbol::NULL))
    }

    /// Set or clear the unevaluated marker (the loader sets it on literals).
    pub fn set_unevaluated(&mut self, unevaluated: bool) {
        self.flags.set(CellFlags::UNEVALUATED, unevaluated);
    }

    /// The heap node this cell references, if any.
    #[inline]
    pub fn node_id(&self) -> Option<NodeId> {
        if self.flags.contains(CellFlags::NODE_PAYLOAD) {
            self.payload.node()
        } else {
            None
        }
    }

    #[cfg(feature = "provenance")]
    pub fn provenance(&self) -> Option<Provenance> {
        self.origin
    }

    // Payload accessors

    #[track_caller]
    pub fn as_logic(&self) -> bool {
        match (self.heart, self.payload) {
            (Heart::Logic, Payload::Logic(b)) => b,
            _ => self.fatal_mismatch("as_logic"),
        }
    }

    #[track_caller]
    pub fn as_integer(&self) -> i64 {
        match (self.heart, self.payload) {
            (Heart::Integer, Payload::Integer(i)) => i,
            _ => self.fatal_mismatch("as_integer"),
        }
    }

    #[track_caller]
    pub fn as_decimal(&self) -> f64 {
        match (self.heart, self.payload) {
            (Heart::Decimal, Payload::Decimal(d)) => d,
            _ => self.fatal_mismatch("as_decimal"),
        }
    }

    #[track_caller]
    pub fn as_bytes(&self) -> &InlineBytes {
        match (self.heart, &self.payload) {
            (Heart::Bytes, Payload::Bytes(bytes)) => bytes,
            _ => self.fatal_mismatch("as_bytes"),
        }
    }

    #[track_caller]
    pub fn as_bytes_mut(&mut self) -> &mut InlineBytes {
        if self.heart != Heart::Bytes {
            self.fatal_mismatch("as_bytes_mut");
        }
        match &mut self.payload {
            Payload::Bytes(bytes) => bytes,
            _ => fatal(format_args!("as_bytes_mut: poisoned {} payload", self.kind)),
        }
    }

    #[track_caller]
    pub fn as_symbol(&self) -> Symbol {
        match (self.heart, self.payload) {
            (Heart::Word, Payload::Symbol(sym)) => sym,
            _ => self.fatal_mismatch("as_symbol"),
        }
    }

    #[track_caller]
    pub fn as_label(&self) -> Option<Symbol> {
        match (self.heart, self.payload) {
            (Heart::BadWord, Payload::Label(label)) => label,
            _ => self.fatal_mismatch("as_label"),
        }
    }

    /// Pairing or var-list node.
    #[track_caller]
    pub fn as_node(&self) -> NodeId {
        match (self.heart, self.payload) {
            (Heart::Pairing | Heart::VarList, Payload::Node(node)) => node,
            _ => self.fatal_mismatch("as_node"),
        }
    }

    /// Series node and position.
    #[track_caller]
    pub fn as_series(&self) -> (NodeId, usize) {
        match (self.heart, self.payload) {
            (Heart::Array | Heart::Text | Heart::Binary, Payload::Series { node, index }) => {
                (node, index as usize)
            }
            _ => self.fatal_mismatch("as_series"),
        }
    }

    /// Raw payload, for code that switches on it directly (equality, molding).
    #[inline]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    #[cold]
    #[track_caller]
    fn fatal_mismatch(&self, what: &str) -> ! {
        fatal(format_args!("{what}: mismatched payload access on {self:?}"))
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Cell");
        s.field("kind", &self.kind)
            .field("heart", &self.heart)
            .field("flags", &self.flags)
            .field("payload", &self.payload);
        #[cfg(feature = "provenance")]
        s.field("origin", &self.origin);
        s.finish()
    }
}

/// Header and payload identity, no heap access. For structural equality
/// across storage forms use [`Cell::equals`].
impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.heart == other.heart
            && self.flags == other.flags
            && self.payload == other.payload
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::NULL
    }
}

/// Abort on an internal consistency violation.
#[cold]
#[track_caller]
pub fn fatal(detail: fmt::Arguments<'_>) -> ! {
    panic!("internal consistency violation: {detail}")
}
