//! Process-wide symbol table.
//!
//! Words, set-words, refinements and bad-words all carry a [`Symbol`]: a
//! 32-bit handle into a sharded interner shared by every runtime in the
//! process. Spellings are leaked, so [`Symbol::as_str`] hands out `'static`
//! slices and a cell holding a symbol stays `Copy`.
//!
//! The first few symbols are pre-interned in a fixed order so they can be
//! named as constants ([`Symbol::SLASH`], [`Symbol::NULL`], ...).

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::OnceLock;

/// Interned spelling of a word.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Symbol(u32);

/// Number of interner shards; the shard index takes the top four bits.
const NUM_SHARDS: usize = 16;

/// Largest per-shard index (low 28 bits).
const MAX_LOCAL: u32 = 0x0FFF_FFFF;

/// Spellings interned at table creation, in `Symbol` constant order.
const BUILTINS: [&str; 8] = ["", "/", "null", "void", "x", "y", "true", "false"];

impl Symbol {
    /// The empty spelling.
    pub const EMPTY: Symbol = Symbol(0);
    /// `/`, the spelling behind the slash-form path.
    pub const SLASH: Symbol = Symbol(1);
    /// `null`, labels the null isotope.
    pub const NULL: Symbol = Symbol(2);
    pub const VOID: Symbol = Symbol(3);
    /// `x`, first pair slot.
    pub const X: Symbol = Symbol(4);
    /// `y`, second pair slot.
    pub const Y: Symbol = Symbol(5);
    pub const TRUE: Symbol = Symbol(6);
    pub const FALSE: Symbol = Symbol(7);

    /// Intern `spelling`, returning its symbol.
    ///
    /// # Panics
    /// Panics if a shard exceeds 2^28 symbols. Use
    /// [`Symbol::try_intern`] to handle that case.
    pub fn intern(spelling: &str) -> Symbol {
        Self::try_intern(spelling).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Intern `spelling`, or report table overflow.
    pub fn try_intern(spelling: &str) -> Result<Symbol, SymbolError> {
        table().try_intern(spelling)
    }

    /// The spelling of this symbol.
    pub fn as_str(self) -> &'static str {
        table().lookup(self)
    }

    /// Raw handle: shard in the top four bits, shard-local index below.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    const fn from_parts(shard: u32, local: u32) -> Symbol {
        Symbol((shard << 28) | local)
    }

    #[inline]
    const fn shard(self) -> usize {
        (self.0 >> 28) as usize
    }

    #[inline]
    const fn local(self) -> usize {
        (self.0 & MAX_LOCAL) as usize
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({}, {:?})", self.0, self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when interning a spelling fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SymbolError {
    #[error("symbol shard {shard} exceeded capacity: {count} symbols, max is {}", MAX_LOCAL)]
    Overflow { shard: usize, count: usize },
}

struct Spellings {
    map: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

impl Spellings {
    fn new() -> Self {
        Spellings {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(256),
        }
    }
}

/// The interner behind [`Symbol`], split into independently locked shards.
///
/// Builtins always live in shard 0 at their constant positions; every other
/// spelling goes to the shard its hash selects.
struct SymbolTable {
    shards: [RwLock<Spellings>; NUM_SHARDS],
}

impl SymbolTable {
    fn new() -> Self {
        let shards = std::array::from_fn(|_| RwLock::new(Spellings::new()));
        let table = SymbolTable { shards };
        {
            let mut first = table.shards[0].write();
            for (local, builtin) in (0u32..).zip(BUILTINS) {
                first.map.insert(builtin, local);
                first.strings.push(builtin);
            }
        }
        table
    }

    #[inline]
    fn shard_for(s: &str) -> usize {
        let mut hash = 0u32;
        for byte in s.bytes().take(8) {
            hash = hash.wrapping_mul(31).wrapping_add(u32::from(byte));
        }
        (hash as usize) % NUM_SHARDS
    }

    fn try_intern(&self, s: &str) -> Result<Symbol, SymbolError> {
        if let Some(local) = BUILTINS.iter().position(|builtin| *builtin == s) {
            #[expect(clippy::cast_possible_truncation, reason = "BUILTINS has 8 entries")]
            return Ok(Symbol::from_parts(0, local as u32));
        }

        let shard_idx = Self::shard_for(s);
        #[expect(clippy::cast_possible_truncation, reason = "shard_idx < NUM_SHARDS (16)")]
        let shard_u32 = shard_idx as u32;
        let shard = &self.shards[shard_idx];

        // Fast path: already interned
        {
            let guard = shard.read();
            if let Some(&local) = guard.map.get(s) {
                return Ok(Symbol::from_parts(shard_u32, local));
            }
        }

        let mut guard = shard.write();

        // Double-check after acquiring write lock
        if let Some(&local) = guard.map.get(s) {
            return Ok(Symbol::from_parts(shard_u32, local));
        }

        let local = u32::try_from(guard.strings.len())
            .ok()
            .filter(|&local| local <= MAX_LOCAL)
            .ok_or(SymbolError::Overflow {
                shard: shard_idx,
                count: guard.strings.len(),
            })?;
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        guard.strings.push(leaked);
        guard.map.insert(leaked, local);
        Ok(Symbol::from_parts(shard_u32, local))
    }

    fn lookup(&self, symbol: Symbol) -> &'static str {
        let guard = self.shards[symbol.shard()].read();
        match guard.strings.get(symbol.local()) {
            Some(&s) => s,
            None => panic!("symbol {:#x} was never interned", symbol.0),
        }
    }
}

fn table() -> &'static SymbolTable {
    static TABLE: OnceLock<SymbolTable> = OnceLock::new();
    TABLE.get_or_init(SymbolTable::new)
}

#[cfg(test)]
mod tests;
