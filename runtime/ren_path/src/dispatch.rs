//! Kind-keyed path step handlers.
//!
//! Each step of a path walk hands the current value and the picker to the
//! handler registered for the current value's kind. Handlers are zero-sized
//! statics, so the table holds `&'static dyn PathHandler` and lookups never
//! borrow the runtime. Supporting a new kind means registering a handler,
//! not touching the walker.

use ren_cell::{bad_poke, Cell, Heap, Kind, RuntimeError, Symbol};

use crate::handlers::{
    ArrayHandler, BinaryHandler, ObjectHandler, PairHandler, PathElementsHandler, StringHandler,
    TokenHandler, TupleHandler,
};

/// What a poke did to the value it was given.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PokeOutcome {
    /// The change is visible through every reference to the container.
    Done,
    /// The container is an immediate value; the caller's temporary copy now
    /// holds the new value and must be written back into its parent.
    Updated,
}

/// Get/set capability for one value kind.
pub trait PathHandler {
    /// Name for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// The value selected by `picker` from `current`, or `Cell::NULL` when an
    /// index is out of range.
    fn pick(&self, heap: &Heap, current: &Cell, picker: &Cell) -> Result<Cell, RuntimeError>;

    /// Store `value` at `picker` in `current`.
    ///
    /// Handlers for immediate values update `current` itself and return
    /// [`PokeOutcome::Updated`].
    fn poke(
        &self,
        heap: &mut Heap,
        current: &mut Cell,
        picker: &Cell,
        value: &Cell,
    ) -> Result<PokeOutcome, RuntimeError> {
        let _ = value;
        Err(bad_poke(current.kind(), picker.mold(heap)))
    }
}

/// A picker, classified.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Picker {
    /// Integer picker as a zero-based index; `None` for `0` or negatives.
    Index(Option<usize>),
    Word(Symbol),
    Other,
}

impl Picker {
    pub(crate) fn classify(picker: &Cell) -> Picker {
        match picker.kind() {
            Kind::Integer => Picker::Index(
                usize::try_from(picker.as_integer())
                    .ok()
                    .and_then(|n| n.checked_sub(1)),
            ),
            Kind::Word => Picker::Word(picker.as_symbol()),
            _ => Picker::Other,
        }
    }
}

static ARRAY: ArrayHandler = ArrayHandler;
static OBJECT: ObjectHandler = ObjectHandler;
static PAIR: PairHandler = PairHandler;
static TUPLE: TupleHandler = TupleHandler;
static TOKEN: TokenHandler = TokenHandler;
static STRING: StringHandler = StringHandler;
static BINARY: BinaryHandler = BinaryHandler;
static PATH: PathElementsHandler = PathElementsHandler;

/// Table mapping each [`Kind`] to its handler.
#[derive(Clone)]
pub struct PathDispatch {
    table: [Option<&'static dyn PathHandler>; Kind::COUNT],
}

impl PathDispatch {
    /// A table with the built-in handlers registered.
    pub fn new() -> Self {
        let mut dispatch = Self::empty();
        for kind in Kind::ALL {
            let handler: &'static dyn PathHandler = match kind {
                k if k.is_any_array() => &ARRAY,
                k if k.is_any_path() => &PATH,
                k if k.is_any_string() => &STRING,
                Kind::Object => &OBJECT,
                Kind::Pair => &PAIR,
                Kind::Tuple => &TUPLE,
                Kind::Token => &TOKEN,
                Kind::Binary => &BINARY,
                _ => continue,
            };
            dispatch.register(kind, handler);
        }
        dispatch
    }

    /// A table with nothing registered.
    pub fn empty() -> Self {
        PathDispatch {
            table: [None; Kind::COUNT],
        }
    }

    #[inline]
    pub fn get(&self, kind: Kind) -> Option<&'static dyn PathHandler> {
        self.table[kind.index()]
    }

    /// Install `handler` for `kind`, returning the one it replaces.
    pub fn register(
        &mut self,
        kind: Kind,
        handler: &'static dyn PathHandler,
    ) -> Option<&'static dyn PathHandler> {
        self.table[kind.index()].replace(handler)
    }

    /// Kinds with a registered handler.
    pub fn kinds(&self) -> impl Iterator<Item = Kind> + '_ {
        Kind::ALL
            .into_iter()
            .filter(|kind| self.table[kind.index()].is_some())
    }
}

impl Default for PathDispatch {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PathDispatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(
                Kind::ALL
                    .iter()
                    .filter_map(|kind| self.get(*kind).map(|h| (kind, h.name()))),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_cover_container_kinds() {
        let dispatch = PathDispatch::new();
        assert_eq!(dispatch.get(Kind::Block).map(|h| h.name()), Some("array"));
        assert_eq!(dispatch.get(Kind::SymGroup).map(|h| h.name()), Some("array"));
        assert_eq!(dispatch.get(Kind::GetPath).map(|h| h.name()), Some("path"));
        assert_eq!(dispatch.get(Kind::Tag).map(|h| h.name()), Some("string"));
        assert_eq!(dispatch.get(Kind::Object).map(|h| h.name()), Some("object"));
        assert_eq!(dispatch.get(Kind::Tuple).map(|h| h.name()), Some("tuple"));
        assert!(dispatch.get(Kind::Integer).is_none());
        assert!(dispatch.get(Kind::Null).is_none());
    }

    #[test]
    fn register_replaces_entries() {
        let mut dispatch = PathDispatch::empty();
        assert_eq!(dispatch.kinds().count(), 0);
        assert!(dispatch.register(Kind::Integer, &TUPLE).is_none());
        let old = dispatch.register(Kind::Integer, &PAIR);
        assert_eq!(old.map(|h| h.name()), Some("tuple"));
        assert_eq!(dispatch.kinds().collect::<Vec<_>>(), vec![Kind::Integer]);
    }

    #[test]
    fn picker_classification() {
        assert_eq!(Picker::classify(&Cell::integer(1)), Picker::Index(Some(0)));
        assert_eq!(Picker::classify(&Cell::integer(0)), Picker::Index(None));
        assert_eq!(Picker::classify(&Cell::integer(-3)), Picker::Index(None));
        assert_eq!(
            Picker::classify(&Cell::word(Symbol::X)),
            Picker::Word(Symbol::X)
        );
        assert_eq!(Picker::classify(&Cell::BLANK), Picker::Other);
    }
}
