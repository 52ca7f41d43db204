//! Kind and heart discriminants.
//!
//! Every cell carries two discriminants:
//!
//! - [`Kind`] is the type user code sees (`integer!`, `path!`, ...).
//! - [`Heart`] is the storage layout actually backing the payload.
//!
//! Most kinds have exactly one heart. The exceptions are the reason the split
//! exists: a token may live inline ([`Heart::Bytes`]) or in a frozen heap
//! string ([`Heart::Text`]), and a path may be a re-tagged word
//! ([`Heart::Word`]), a two-slot pairing ([`Heart::Pairing`]) or a frozen
//! array ([`Heart::Array`]).
//!
//! The declaration order of [`Kind`] is significant: everything ordered after
//! [`Kind::Logic`] is truthy regardless of its payload.

use std::fmt;

/// The type of a cell as presented to user code.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Kind {
    /// Absence of a value.
    Null = 0,
    /// `~foo~` placeholder; with the isotope flag, a "quasi" variant.
    BadWord,
    /// `_` placeholder.
    Blank,
    /// `true` / `false`.
    Logic,

    // Everything below is truthy unconditionally.
    Integer,
    Decimal,
    Pair,
    Tuple,
    /// Immutable codepoint sequence; characters are single-codepoint tokens.
    Token,
    Text,
    Tag,
    File,
    Url,
    Binary,
    Word,
    SetWord,
    GetWord,
    SymWord,
    Block,
    SetBlock,
    GetBlock,
    SymBlock,
    Group,
    SetGroup,
    GetGroup,
    SymGroup,
    Path,
    SetPath,
    GetPath,
    SymPath,
    Object,
}

impl Kind {
    /// Number of kinds (size of kind-indexed tables).
    pub const COUNT: usize = Kind::Object as usize + 1;

    /// All kinds in declaration order.
    pub const ALL: [Kind; Kind::COUNT] = [
        Kind::Null,
        Kind::BadWord,
        Kind::Blank,
        Kind::Logic,
        Kind::Integer,
        Kind::Decimal,
        Kind::Pair,
        Kind::Tuple,
        Kind::Token,
        Kind::Text,
        Kind::Tag,
        Kind::File,
        Kind::Url,
        Kind::Binary,
        Kind::Word,
        Kind::SetWord,
        Kind::GetWord,
        Kind::SymWord,
        Kind::Block,
        Kind::SetBlock,
        Kind::GetBlock,
        Kind::SymBlock,
        Kind::Group,
        Kind::SetGroup,
        Kind::GetGroup,
        Kind::SymGroup,
        Kind::Path,
        Kind::SetPath,
        Kind::GetPath,
        Kind::SymPath,
        Kind::Object,
    ];

    /// Index into kind-keyed tables.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// User-facing type name.
    pub const fn name(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::BadWord => "bad-word!",
            Kind::Blank => "blank!",
            Kind::Logic => "logic!",
            Kind::Integer => "integer!",
            Kind::Decimal => "decimal!",
            Kind::Pair => "pair!",
            Kind::Tuple => "tuple!",
            Kind::Token => "issue!",
            Kind::Text => "text!",
            Kind::Tag => "tag!",
            Kind::File => "file!",
            Kind::Url => "url!",
            Kind::Binary => "binary!",
            Kind::Word => "word!",
            Kind::SetWord => "set-word!",
            Kind::GetWord => "get-word!",
            Kind::SymWord => "sym-word!",
            Kind::Block => "block!",
            Kind::SetBlock => "set-block!",
            Kind::GetBlock => "get-block!",
            Kind::SymBlock => "sym-block!",
            Kind::Group => "group!",
            Kind::SetGroup => "set-group!",
            Kind::GetGroup => "get-group!",
            Kind::SymGroup => "sym-group!",
            Kind::Path => "path!",
            Kind::SetPath => "set-path!",
            Kind::GetPath => "get-path!",
            Kind::SymPath => "sym-path!",
            Kind::Object => "object!",
        }
    }

    /// Kinds ordered after `Logic` are truthy whatever their payload.
    #[inline]
    pub fn is_default_truthy(self) -> bool {
        self > Kind::Logic
    }

    #[inline]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Kind::Integer | Kind::Decimal)
    }

    #[inline]
    pub const fn is_any_word(self) -> bool {
        matches!(
            self,
            Kind::Word | Kind::SetWord | Kind::GetWord | Kind::SymWord
        )
    }

    #[inline]
    pub const fn is_any_block(self) -> bool {
        matches!(
            self,
            Kind::Block | Kind::SetBlock | Kind::GetBlock | Kind::SymBlock
        )
    }

    #[inline]
    pub const fn is_any_group(self) -> bool {
        matches!(
            self,
            Kind::Group | Kind::SetGroup | Kind::GetGroup | Kind::SymGroup
        )
    }

    /// Blocks and groups: mutable arrays of cells.
    #[inline]
    pub const fn is_any_array(self) -> bool {
        self.is_any_block() || self.is_any_group()
    }

    #[inline]
    pub const fn is_any_path(self) -> bool {
        matches!(
            self,
            Kind::Path | Kind::SetPath | Kind::GetPath | Kind::SymPath
        )
    }

    /// Kinds whose payload is a UTF-8 text series.
    #[inline]
    pub const fn is_any_string(self) -> bool {
        matches!(self, Kind::Text | Kind::Tag | Kind::File | Kind::Url)
    }

    /// The heart a freshly initialized cell of this kind uses.
    ///
    /// Tokens and paths may later be stored under a different heart; see the
    /// module docs.
    pub const fn canonical_heart(self) -> Heart {
        match self {
            Kind::Null => Heart::Null,
            Kind::BadWord => Heart::BadWord,
            Kind::Blank => Heart::Blank,
            Kind::Logic => Heart::Logic,
            Kind::Integer => Heart::Integer,
            Kind::Decimal => Heart::Decimal,
            Kind::Pair => Heart::Pairing,
            Kind::Tuple | Kind::Token => Heart::Bytes,
            Kind::Text | Kind::Tag | Kind::File | Kind::Url => Heart::Text,
            Kind::Binary => Heart::Binary,
            Kind::Word | Kind::SetWord | Kind::GetWord | Kind::SymWord => Heart::Word,
            Kind::Block
            | Kind::SetBlock
            | Kind::GetBlock
            | Kind::SymBlock
            | Kind::Group
            | Kind::SetGroup
            | Kind::GetGroup
            | Kind::SymGroup
            | Kind::Path
            | Kind::SetPath
            | Kind::GetPath
            | Kind::SymPath => Heart::Array,
            Kind::Object => Heart::VarList,
        }
    }

    /// Whether `heart` is a legal storage layout for this kind.
    pub const fn accepts_heart(self, heart: Heart) -> bool {
        match self {
            Kind::Token => matches!(heart, Heart::Bytes | Heart::Text),
            Kind::Path | Kind::SetPath | Kind::GetPath | Kind::SymPath => {
                matches!(heart, Heart::Word | Heart::Pairing | Heart::Array)
            }
            _ => self.canonical_heart() as u8 == heart as u8,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The storage layout backing a cell's payload.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Heart {
    Null,
    Blank,
    Logic,
    Integer,
    Decimal,
    /// Up to 8 inline bytes (tuples, small tokens).
    Bytes,
    /// A symbol.
    Word,
    /// An optional symbol (`~` or `~foo~`).
    BadWord,
    /// Reference to a two-cell pairing node.
    Pairing,
    /// Reference to an array node plus an index.
    Array,
    /// Reference to a UTF-8 string node plus a codepoint index.
    Text,
    /// Reference to a byte node plus an index.
    Binary,
    /// Reference to a variable list (object).
    VarList,
}

impl Heart {
    /// Whether payloads of this heart reference a heap node.
    #[inline]
    pub const fn is_node(self) -> bool {
        matches!(
            self,
            Heart::Pairing | Heart::Array | Heart::Text | Heart::Binary | Heart::VarList
        )
    }
}
