//! Node arena and tracing collector.
//!
//! Everything a cell cannot hold inline lives in a [`Node`] owned by the
//! [`Heap`]: pairings, arrays, strings, binaries and variable lists. Cells
//! refer to nodes by [`NodeId`], a generational index, so a stale handle is
//! detected instead of silently aliasing a recycled slot.
//!
//! # Managed vs. manual nodes
//!
//! A freshly allocated node is *manual*: it belongs to whoever allocated it
//! and the collector never frees it (it is treated as a root). Calling
//! [`Heap::manage`] hands the node to the collector, which frees it once no
//! root reaches it. Code that allocates must manage the node before anything
//! can trigger [`Heap::collect`].
//!
//! # Guards
//!
//! Values held only in Rust locals are invisible to the collector. Code that
//! keeps such a value across anything that may collect pushes it with
//! [`Heap::guard`] and later drops back to a saved [`Heap::guard_height`]
//! with [`Heap::release_guards`]. Every guarded cell is a root.
//!
//! # Frozen series
//!
//! Arrays, strings and binaries carry a frozen bit. User-level mutation checks
//! [`Array::is_frozen`] and raises a catchable error; the internal mutators
//! (`push`, `set`, ...) treat a frozen target as a consistency violation.

use rustc_hash::FxHashMap;

use crate::cell::{fatal, Cell};
use crate::config::RuntimeConfig;
use crate::symbol::Symbol;

/// Generational handle to a heap node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.index as usize
    }

    #[inline]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

/// Heap-resident storage referenced from cells.
#[derive(Clone, Debug)]
pub enum Node {
    /// Exactly two cells (pairs, two-element paths).
    Pairing([Cell; 2]),
    Array(Array),
    Text(TextSeries),
    Binary(BinarySeries),
    VarList(VarList),
}

impl Node {
    fn label(&self) -> &'static str {
        match self {
            Node::Pairing(_) => "pairing",
            Node::Array(_) => "array",
            Node::Text(_) => "text",
            Node::Binary(_) => "binary",
            Node::VarList(_) => "varlist",
        }
    }

    /// Push every node referenced from this node onto `out`.
    fn children(&self, out: &mut Vec<NodeId>) {
        let cells: &[Cell] = match self {
            Node::Pairing(pair) => pair,
            Node::Array(array) => &array.cells,
            Node::VarList(vars) => &vars.vars,
            Node::Text(_) | Node::Binary(_) => return,
        };
        out.extend(cells.iter().filter_map(Cell::node_id));
    }
}

/// Ordered sequence of cells.
#[derive(Clone, Debug, Default)]
pub struct Array {
    cells: Vec<Cell>,
    frozen: bool,
}

impl Array {
    pub fn new(cells: Vec<Cell>) -> Self {
        Array {
            cells,
            frozen: false,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    #[track_caller]
    pub fn push(&mut self, cell: Cell) {
        self.assert_mutable();
        self.cells.push(cell);
    }

    /// Overwrite the cell at `index`. Returns `false` when out of range.
    #[track_caller]
    pub fn set(&mut self, index: usize, cell: Cell) -> bool {
        self.assert_mutable();
        match self.cells.get_mut(index) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    #[track_caller]
    fn assert_mutable(&self) {
        if self.frozen {
            fatal(format_args!("mutation of a frozen array"));
        }
    }
}

/// UTF-8 string with a cached codepoint count.
#[derive(Clone, Debug, Default)]
pub struct TextSeries {
    utf8: String,
    codepoints: usize,
    frozen: bool,
}

impl TextSeries {
    pub fn new(text: &str) -> Self {
        TextSeries {
            utf8: text.to_owned(),
            codepoints: text.chars().count(),
            frozen: false,
        }
    }

    /// An immutable string, as used by heap-backed tokens.
    pub fn frozen(text: &str, codepoints: usize) -> Self {
        debug_assert_eq!(text.chars().count(), codepoints);
        TextSeries {
            utf8: text.to_owned(),
            codepoints,
            frozen: true,
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.utf8
    }

    /// Length in codepoints.
    #[inline]
    pub fn len(&self) -> usize {
        self.codepoints
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.codepoints == 0
    }

    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Byte offset of codepoint `index` (or the end of the string).
    pub fn byte_offset(&self, index: usize) -> usize {
        self.utf8
            .char_indices()
            .nth(index)
            .map_or(self.utf8.len(), |(offset, _)| offset)
    }

    pub fn char_at(&self, index: usize) -> Option<char> {
        self.utf8.chars().nth(index)
    }

    #[track_caller]
    pub fn push_str(&mut self, text: &str) {
        self.assert_mutable();
        self.utf8.push_str(text);
        self.codepoints += text.chars().count();
    }

    /// Replace the codepoint at `index`. Returns `false` when out of range.
    #[track_caller]
    pub fn set_char(&mut self, index: usize, ch: char) -> bool {
        self.assert_mutable();
        let Some((offset, old)) = self.utf8.char_indices().nth(index) else {
            return false;
        };
        let mut buf = [0u8; 4];
        self.utf8
            .replace_range(offset..offset + old.len_utf8(), ch.encode_utf8(&mut buf));
        true
    }

    #[track_caller]
    fn assert_mutable(&self) {
        if self.frozen {
            fatal(format_args!("mutation of a frozen string"));
        }
    }
}

/// Raw bytes.
#[derive(Clone, Debug, Default)]
pub struct BinarySeries {
    bytes: Vec<u8>,
    frozen: bool,
}

impl BinarySeries {
    pub fn new(bytes: &[u8]) -> Self {
        BinarySeries {
            bytes: bytes.to_vec(),
            frozen: false,
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
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
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    #[track_caller]
    pub fn extend(&mut self, bytes: &[u8]) {
        if self.frozen {
            fatal(format_args!("mutation of a frozen binary"));
        }
        self.bytes.extend_from_slice(bytes);
    }

    /// Returns `false` when out of range.
    #[track_caller]
    pub fn set(&mut self, index: usize, byte: u8) -> bool {
        if self.frozen {
            fatal(format_args!("mutation of a frozen binary"));
        }
        match self.bytes.get_mut(index) {
            Some(slot) => {
                *slot = byte;
                true
            }
            None => false,
        }
    }
}

/// Symbol-keyed variables in insertion order (objects, binding contexts).
#[derive(Clone, Debug, Default)]
pub struct VarList {
    keys: Vec<Symbol>,
    vars: Vec<Cell>,
    index: FxHashMap<Symbol, usize>,
}

impl VarList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key` to `value`, adding the key if it is new.
    pub fn bind(&mut self, key: Symbol, value: Cell) {
        if let Some(&slot) = self.index.get(&key) {
            self.vars[slot] = value;
        } else {
            self.index.insert(key, self.keys.len());
            self.keys.push(key);
            self.vars.push(value);
        }
    }

    pub fn get(&self, key: Symbol) -> Option<&Cell> {
        self.index.get(&key).map(|&slot| &self.vars[slot])
    }

    pub fn get_mut(&mut self, key: Symbol) -> Option<&mut Cell> {
        self.index.get(&key).map(|&slot| &mut self.vars[slot])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &Cell)> {
        self.keys.iter().copied().zip(self.vars.iter())
    }
}

struct Slot {
    generation: u32,
    managed: bool,
    marked: bool,
    node: Option<Node>,
}

/// Counts reported by one collection.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CollectStats {
    pub marked: usize,
    pub swept: usize,
}

/// Owner of every node.
pub struct Heap {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
    allocs_since_collect: usize,
    ballast: usize,
    guarded: Vec<Cell>,
}

impl Heap {
    pub fn new(config: &RuntimeConfig) -> Self {
        Heap {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
            allocs_since_collect: 0,
            ballast: config.gc_ballast,
            guarded: Vec::new(),
        }
    }

    /// Allocate a manual (unmanaged) node.
    pub fn alloc(&mut self, node: Node) -> NodeId {
        self.live += 1;
        self.allocs_since_collect += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.managed = false;
            slot.marked = false;
            slot.node = Some(node);
            return NodeId {
                index,
                generation: slot.generation,
            };
        }
        let index = match u32::try_from(self.slots.len()) {
            Ok(index) => index,
            Err(_) => fatal(format_args!("heap exceeded u32::MAX nodes")),
        };
        self.slots.push(Slot {
            generation: 0,
            managed: false,
            marked: false,
            node: Some(node),
        });
        NodeId {
            index,
            generation: 0,
        }
    }

    /// Allocate and immediately hand to the collector.
    pub fn alloc_managed(&mut self, node: Node) -> NodeId {
        let id = self.alloc(node);
        self.manage(id);
        id
    }

    /// Mark `id` as reachable-by-tracing: the collector now owns it.
    #[track_caller]
    pub fn manage(&mut self, id: NodeId) {
        self.slot_mut(id).managed = true;
    }

    pub fn is_managed(&self, id: NodeId) -> bool {
        self.slot(id).managed
    }

    /// Whether `id` still names a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.slots
            .get(id.index())
            .is_some_and(|slot| slot.generation == id.generation && slot.node.is_some())
    }

    /// Free a manual node. Managed nodes belong to the collector.
    #[track_caller]
    pub fn free(&mut self, id: NodeId) {
        if self.slot(id).managed {
            fatal(format_args!("manual free of managed node {id:?}"));
        }
        self.release(id.index);
    }

    /// Freeze a series node. Freezing is permanent.
    #[track_caller]
    pub fn freeze(&mut self, id: NodeId) {
        match self.node_mut(id) {
            Node::Array(array) => array.freeze(),
            Node::Text(text) => text.freeze(),
            Node::Binary(binary) => binary.freeze(),
            other => wrong_node("series", other),
        }
    }

    /// Whether a series node is frozen.
    #[track_caller]
    pub fn is_frozen(&self, id: NodeId) -> bool {
        match self.node(id) {
            Node::Array(array) => array.is_frozen(),
            Node::Text(text) => text.is_frozen(),
            Node::Binary(binary) => binary.is_frozen(),
            other => wrong_node("series", other),
        }
    }

    /// Keep `cell` (and everything it reaches) alive until the guard stack
    /// is released below this point.
    pub fn guard(&mut self, cell: Cell) {
        if cell.node_id().is_some() {
            self.guarded.push(cell);
        }
    }

    #[inline]
    pub fn guard_height(&self) -> usize {
        self.guarded.len()
    }

    /// Drop every guard pushed since the stack was at `height`.
    pub fn release_guards(&mut self, height: usize) {
        debug_assert!(height <= self.guarded.len(), "guard stack underflow");
        self.guarded.truncate(height);
    }

    #[inline]
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Enough allocations since the last collection to make one worthwhile.
    pub fn should_collect(&self) -> bool {
        self.allocs_since_collect >= self.ballast
    }

    #[track_caller]
    pub fn node(&self, id: NodeId) -> &Node {
        match &self.slot(id).node {
            Some(node) => node,
            None => fatal(format_args!("stale node handle {id:?}")),
        }
    }

    #[track_caller]
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        match &mut self.slot_mut(id).node {
            Some(node) => node,
            None => fatal(format_args!("stale node handle {id:?}")),
        }
    }

    #[track_caller]
    pub fn pairing(&self, id: NodeId) -> &[Cell; 2] {
        match self.node(id) {
            Node::Pairing(pair) => pair,
            other => wrong_node("pairing", other),
        }
    }

    #[track_caller]
    pub fn pairing_mut(&mut self, id: NodeId) -> &mut [Cell; 2] {
        match self.node_mut(id) {
            Node::Pairing(pair) => pair,
            other => wrong_node("pairing", other),
        }
    }

    #[track_caller]
    pub fn array(&self, id: NodeId) -> &Array {
        match self.node(id) {
            Node::Array(array) => array,
            other => wrong_node("array", other),
        }
    }

    #[track_caller]
    pub fn array_mut(&mut self, id: NodeId) -> &mut Array {
        match self.node_mut(id) {
            Node::Array(array) => array,
            other => wrong_node("array", other),
        }
    }

    #[track_caller]
    pub fn text(&self, id: NodeId) -> &TextSeries {
        match self.node(id) {
            Node::Text(text) => text,
            other => wrong_node("text", other),
        }
    }

    #[track_caller]
    pub fn text_mut(&mut self, id: NodeId) -> &mut TextSeries {
        match self.node_mut(id) {
            Node::Text(text) => text,
            other => wrong_node("text", other),
        }
    }

    #[track_caller]
    pub fn binary(&self, id: NodeId) -> &BinarySeries {
        match self.node(id) {
            Node::Binary(binary) => binary,
            other => wrong_node("binary", other),
        }
    }

    #[track_caller]
    pub fn binary_mut(&mut self, id: NodeId) -> &mut BinarySeries {
        match self.node_mut(id) {
            Node::Binary(binary) => binary,
            other => wrong_node("binary", other),
        }
    }

    #[track_caller]
    pub fn varlist(&self, id: NodeId) -> &VarList {
        match self.node(id) {
            Node::VarList(vars) => vars,
            other => wrong_node("varlist", other),
        }
    }

    #[track_caller]
    pub fn varlist_mut(&mut self, id: NodeId) -> &mut VarList {
        match self.node_mut(id) {
            Node::VarList(vars) => vars,
            other => wrong_node("varlist", other),
        }
    }

    /// Mark everything reachable from `roots` (and from manual nodes and
    /// guarded cells), then free every managed node that was not reached.
    pub fn collect<'a>(&mut self, roots: impl IntoIterator<Item = &'a Cell>) -> CollectStats {
        let mut pending: Vec<NodeId> = roots.into_iter().filter_map(Cell::node_id).collect();
        pending.extend(self.guarded.iter().filter_map(Cell::node_id));
        for (index, slot) in self.slots.iter().enumerate() {
            if slot.node.is_some() && !slot.managed {
                #[allow(clippy::cast_possible_truncation, reason = "slot count fits u32")]
                pending.push(NodeId {
                    index: index as u32,
                    generation: slot.generation,
                });
            }
        }

        let mut stats = CollectStats::default();
        while let Some(id) = pending.pop() {
            let Some(slot) = self.slots.get_mut(id.index()) else {
                fatal(format_args!("root references unknown node {id:?}"));
            };
            if slot.generation != id.generation {
                fatal(format_args!("root references stale node {id:?}"));
            }
            if slot.marked {
                continue;
            }
            slot.marked = true;
            stats.marked += 1;
            if let Some(node) = &slot.node {
                node.children(&mut pending);
            }
        }

        for index in 0..self.slots.len() {
            let slot = &mut self.slots[index];
            let garbage = slot.managed && !slot.marked && slot.node.is_some();
            slot.marked = false;
            if garbage {
                #[allow(clippy::cast_possible_truncation, reason = "slot count fits u32")]
                self.release(index as u32);
                stats.swept += 1;
            }
        }

        self.allocs_since_collect = 0;
        tracing::debug!(
            marked = stats.marked,
            swept = stats.swept,
            live = self.live,
            "heap collection finished"
        );
        stats
    }

    fn release(&mut self, index: u32) {
        let slot = &mut self.slots[index as usize];
        slot.node = None;
        slot.managed = false;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(index);
        self.live -= 1;
    }

    #[track_caller]
    fn slot(&self, id: NodeId) -> &Slot {
        match self.slots.get(id.index()) {
            Some(slot) if slot.generation == id.generation => slot,
            _ => fatal(format_args!("stale node handle {id:?}")),
        }
    }

    #[track_caller]
    fn slot_mut(&mut self, id: NodeId) -> &mut Slot {
        match self.slots.get_mut(id.index()) {
            Some(slot) if slot.generation == id.generation => slot,
            _ => fatal(format_args!("stale node handle {id:?}")),
        }
    }
}

impl std::fmt::Debug for Heap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Heap")
            .field("live", &self.live)
            .field("slots", &self.slots.len())
            .field("ballast", &self.ballast)
            .field("guarded", &self.guarded.len())
            .finish_non_exhaustive()
    }
}

impl Default for Heap {
    fn default() -> Self {
        Heap::new(&RuntimeConfig::default())
    }
}

#[cold]
#[track_caller]
fn wrong_node(expected: &str, found: &Node) -> ! {
    fatal(format_args!(
        "expected {expected} node, found {}",
        found.label()
    ))
}
