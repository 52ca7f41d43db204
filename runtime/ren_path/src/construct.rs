//! Building path values.
//!
//! Paths pick the cheapest storage that can hold their elements:
//!
//! - `[_ _]` (the `/` operator word) re-tags a word cell holding [`Symbol::SLASH`]
//!   and allocates nothing.
//! - `[_ word]` (a refinement) re-tags a word cell holding `word`.
//! - Any other two elements go in a pairing node.
//! - Three or more go in a frozen array.
//!
//! Every constructor is a `try_`: an element outside the allowed set
//! produces `None` (or a [`PathBuildError`] naming the element) rather than
//! raising, and the caller words the message.

use ren_cell::{Array, Cell, CellFlags, Heap, Heart, Kind, Node, Payload, Symbol};
use tracing::trace;

use crate::data_stack::DataStack;

/// Which of the four path kinds to build.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum PathFlavor {
    /// `a/b`
    #[default]
    Plain,
    /// `a/b:`
    Set,
    /// `:a/b`
    Get,
    /// `@a/b`
    Sym,
}

impl PathFlavor {
    pub const fn path_kind(self) -> Kind {
        match self {
            PathFlavor::Plain => Kind::Path,
            PathFlavor::Set => Kind::SetPath,
            PathFlavor::Get => Kind::GetPath,
            PathFlavor::Sym => Kind::SymPath,
        }
    }

    /// The flavor of an existing path kind.
    pub const fn of_path(kind: Kind) -> Option<PathFlavor> {
        match kind {
            Kind::Path => Some(PathFlavor::Plain),
            Kind::SetPath => Some(PathFlavor::Set),
            Kind::GetPath => Some(PathFlavor::Get),
            Kind::SymPath => Some(PathFlavor::Sym),
            _ => None,
        }
    }

    /// The decorated form of a single element's kind, if it has one.
    ///
    /// Tuples have no decorated form yet.
    pub const fn decorate(self, kind: Kind) -> Option<Kind> {
        let kinds = match kind {
            Kind::Word => [Kind::Word, Kind::SetWord, Kind::GetWord, Kind::SymWord],
            Kind::Block => [Kind::Block, Kind::SetBlock, Kind::GetBlock, Kind::SymBlock],
            Kind::Group => [Kind::Group, Kind::SetGroup, Kind::GetGroup, Kind::SymGroup],
            _ => return None,
        };
        Some(kinds[self as usize])
    }
}

/// Why a path could not be built.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{} cannot appear in a path (element {index})", .element.kind())]
pub struct PathBuildError {
    /// Position of the offending element.
    pub index: usize,
    pub element: Cell,
}

/// Whether `cell` may be a path element.
///
/// Blanks, integers, plain words, tuples, blocks, groups, text and tags are
/// allowed. Paths are not (a nested path would be ambiguous with its parent),
/// nor is the `/` word itself.
pub fn is_allowed_element(cell: &Cell) -> bool {
    match cell.kind() {
        Kind::Blank
        | Kind::Integer
        | Kind::Tuple
        | Kind::Block
        | Kind::Group
        | Kind::Text
        | Kind::Tag => true,
        Kind::Word => cell.as_symbol() != Symbol::SLASH,
        _ => false,
    }
}

fn word_backed(flavor: PathFlavor, symbol: Symbol) -> Cell {
    Cell::new(
        flavor.path_kind(),
        Heart::Word,
        CellFlags::empty(),
        Payload::Symbol(symbol),
    )
}

/// Write the `[_ _]` slash form into `out`.
pub fn init_slash(out: &mut Cell, flavor: PathFlavor) {
    *out = word_backed(flavor, Symbol::SLASH);
}

/// `[_ symbol]`. `None` for the `/` symbol, which cannot be an element.
pub fn try_init_refinement(flavor: PathFlavor, symbol: Symbol) -> Option<Cell> {
    if symbol == Symbol::SLASH {
        return None;
    }
    Some(word_backed(flavor, symbol))
}

/// A two-element path, collapsing to the slash form or a refinement when
/// the first element is a blank.
pub fn try_init_pairlike(heap: &mut Heap, flavor: PathFlavor, v1: &Cell, v2: &Cell) -> Option<Cell> {
    if !is_allowed_element(v1) || !is_allowed_element(v2) {
        return None;
    }
    if v1.is_blank() {
        if v2.is_blank() {
            return Some(word_backed(flavor, Symbol::SLASH));
        }
        if v2.kind() == Kind::Word {
            return try_init_refinement(flavor, v2.as_symbol());
        }
    }
    let id = heap.alloc(Node::Pairing([*v1, *v2]));
    heap.manage(id);
    Some(Cell::new(
        flavor.path_kind(),
        Heart::Pairing,
        CellFlags::empty(),
        Payload::Node(id),
    ))
}

/// Pop everything above `base` off `stack` and build a path from it.
///
/// - no elements: `Cell::NULL` (not a path)
/// - one element: the element itself, decorated for non-plain flavors
/// - two: [`try_init_pairlike`]
/// - more: a frozen array
///
/// The stack is popped whether or not construction succeeds.
pub fn try_build_from_elements(
    heap: &mut Heap,
    stack: &mut DataStack,
    base: usize,
    flavor: PathFlavor,
) -> Result<Cell, PathBuildError> {
    let elements = stack.pop_to(base);

    if let Some(index) = elements.iter().position(|cell| !is_allowed_element(cell)) {
        let element = elements[index];
        trace!(index, kind = %element.kind(), "path element rejected");
        return Err(PathBuildError { index, element });
    }

    match elements.as_slice() {
        [] => Ok(Cell::NULL),
        [single] => decorate_single(flavor, single),
        [v1, v2] => try_init_pairlike(heap, flavor, v1, v2).ok_or(PathBuildError {
            index: 0,
            element: *v1,
        }),
        cells => {
            let mut array = Array::new(cells.to_vec());
            array.freeze();
            let id = heap.alloc(Node::Array(array));
            heap.manage(id);
            Ok(Cell::new(
                flavor.path_kind(),
                Heart::Array,
                CellFlags::empty(),
                Payload::Series { node: id, index: 0 },
            ))
        }
    }
}

fn decorate_single(flavor: PathFlavor, element: &Cell) -> Result<Cell, PathBuildError> {
    if flavor == PathFlavor::Plain {
        return Ok(*element);
    }
    let rejected = || {
        trace!(kind = %element.kind(), ?flavor, "element has no decorated form");
        PathBuildError {
            index: 0,
            element: *element,
        }
    };
    let kind = flavor.decorate(element.kind()).ok_or_else(rejected)?;
    Ok(Cell::new(kind, element.heart(), element.flags(), *element.payload()))
}
