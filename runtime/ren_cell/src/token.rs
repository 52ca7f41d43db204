//! Tokens: immutable codepoint sequences (`#a`, `#foo-bar`, characters).
//!
//! A token whose UTF-8 fits in seven bytes is stored inline under
//! [`Heart::Bytes`], with byte length and codepoint count cached in the cell.
//! Anything longer goes to a frozen heap string under [`Heart::Text`]. Both
//! forms report [`Kind::Token`]; [`utf8_view`] reads either without copying.
//!
//! A character is a single-codepoint token. Codepoint 0 is the *blackhole*:
//! the empty token. It is truthy, writes aimed at it do nothing, appending
//! it to a binary adds one zero byte, and appending it to text is an error.

use std::str;

use crate::cell::{fatal, Cell, InlineBytes, Payload};
use crate::config::MAX_CODEPOINT;
use crate::errors::{
    bad_poke_value, codepoint_too_high, illegal_zero_byte, invalid_codepoint, series_frozen,
    RuntimeError,
};
use crate::flags::CellFlags;
use crate::heap::{Heap, Node, TextSeries};
use crate::kind::{Heart, Kind};
use crate::numeric::to_byte;
use crate::tuple::tuple_bytes;

/// Content bytes that fit inline (one byte of the buffer is the terminator).
pub const MAX_INLINE_UTF8: usize = InlineBytes::CAPACITY - 1;

/// Borrowed UTF-8 content of a token, string or word.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Utf8View<'a> {
    pub text: &'a str,
    pub codepoints: usize,
}

impl<'a> Utf8View<'a> {
    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.text.as_bytes()
    }

    /// Byte length.
    #[inline]
    pub fn size(&self) -> usize {
        self.text.len()
    }
}

/// Write a token holding `utf8` (`codepoints` long) into `out`.
///
/// Heap-backed tokens are managed before this returns.
#[track_caller]
pub fn init_token_from_utf8(heap: &mut Heap, out: &mut Cell, utf8: &str, codepoints: usize) {
    debug_assert_eq!(utf8.chars().count(), codepoints);
    if utf8.len() <= MAX_INLINE_UTF8 {
        #[allow(clippy::cast_possible_truncation, reason = "at most 7 codepoints fit inline")]
        let inline = InlineBytes::new(utf8.as_bytes(), codepoints as u8);
        let Some(inline) = inline else {
            fatal(format_args!("inline token overflow"));
        };
        out.reset(Kind::Token, Heart::Bytes, CellFlags::empty());
        out.populate(Payload::Bytes(inline));
    } else {
        let id = heap.alloc(Node::Text(TextSeries::frozen(utf8, codepoints)));
        heap.manage(id);
        out.reset(Kind::Token, Heart::Text, CellFlags::empty());
        out.populate(Payload::Series { node: id, index: 0 });
    }
}

/// A token cell for `text`.
#[track_caller]
pub fn make_token(heap: &mut Heap, text: &str) -> Cell {
    let mut out = Cell::NULL;
    init_token_from_utf8(heap, &mut out, text, text.chars().count());
    out
}

/// Write the character `codepoint` into `out`.
///
/// Codepoint 0 produces the blackhole (the empty token).
pub fn init_char(out: &mut Cell, codepoint: u32) -> Result<(), RuntimeError> {
    if codepoint > MAX_CODEPOINT {
        return Err(codepoint_too_high(codepoint, MAX_CODEPOINT));
    }
    let inline = if codepoint == 0 {
        InlineBytes::default()
    } else {
        let ch = char::from_u32(codepoint).ok_or_else(|| invalid_codepoint(codepoint))?;
        let mut buf = [0u8; 4];
        let encoded = ch.encode_utf8(&mut buf);
        match InlineBytes::new(encoded.as_bytes(), 1) {
            Some(inline) => inline,
            None => fatal(format_args!("4-byte character does not fit inline")),
        }
    };
    out.reset(Kind::Token, Heart::Bytes, CellFlags::empty());
    out.populate(Payload::Bytes(inline));
    Ok(())
}

pub fn make_char(codepoint: u32) -> Result<Cell, RuntimeError> {
    let mut out = Cell::NULL;
    init_char(&mut out, codepoint)?;
    Ok(out)
}

/// The empty token.
pub fn is_blackhole(cell: &Cell) -> bool {
    cell.kind() == Kind::Token && cell.heart() == Heart::Bytes && cell.as_bytes().is_empty()
}

/// The single codepoint of a character, or `None` for longer tokens.
///
/// The blackhole decodes as `'\0'`.
#[track_caller]
pub fn as_single_codepoint(cell: &Cell) -> Option<char> {
    if cell.kind() != Kind::Token {
        fatal(format_args!("expected issue!, got {}", cell.kind()));
    }
    if cell.heart() != Heart::Bytes {
        // heap tokens are longer than any single codepoint
        return None;
    }
    let bytes = cell.as_bytes();
    match bytes.codepoints() {
        0 => Some('\0'),
        1 => inline_str(bytes).chars().next(),
        _ => None,
    }
}

/// Number of codepoints in a token.
#[track_caller]
pub fn token_len(heap: &Heap, cell: &Cell) -> usize {
    match cell.heart() {
        Heart::Bytes => cell.as_bytes().codepoints(),
        _ => {
            let (node, _) = cell.as_series();
            heap.text(node).len()
        }
    }
}

#[track_caller]
fn inline_str(bytes: &InlineBytes) -> &str {
    match str::from_utf8(bytes.as_slice()) {
        Ok(text) => text,
        Err(err) => fatal(format_args!("inline token is not UTF-8: {err}")),
    }
}

/// Prefix of `text` holding at most `limit` codepoints.
fn scan(text: &str, limit: usize) -> Utf8View<'_> {
    let mut codepoints = 0;
    let mut end = 0;
    for (offset, ch) in text.char_indices() {
        if codepoints == limit {
            break;
        }
        codepoints += 1;
        end = offset + ch.len_utf8();
    }
    Utf8View {
        text: &text[..end],
        codepoints,
    }
}

/// UTF-8 content of a token, string or word, without copying.
///
/// At most `limit` codepoints are returned. Tokens and strings know their
/// codepoint count already; words are scanned, so the cost follows `limit`
/// rather than the spelling length.
#[track_caller]
pub fn utf8_view<'a>(heap: &'a Heap, cell: &'a Cell, limit: usize) -> Utf8View<'a> {
    let kind = cell.kind();
    match cell.heart() {
        Heart::Bytes if kind == Kind::Token => {
            let bytes = cell.as_bytes();
            let text = inline_str(bytes);
            if bytes.codepoints() <= limit {
                Utf8View {
                    text,
                    codepoints: bytes.codepoints(),
                }
            } else {
                scan(text, limit)
            }
        }
        Heart::Text if kind == Kind::Token || kind.is_any_string() => {
            let (node, index) = cell.as_series();
            let series = heap.text(node);
            let text = &series.as_str()[series.byte_offset(index)..];
            let available = series.len().saturating_sub(index);
            if available <= limit {
                Utf8View {
                    text,
                    codepoints: available,
                }
            } else {
                scan(text, limit)
            }
        }
        Heart::Word if kind.is_any_word() => scan(cell.as_symbol().as_str(), limit),
        _ => fatal(format_args!("utf8_view on {kind}")),
    }
}

/// Append the textual form of `value` to the string `text`.
///
/// The blackhole cannot be represented in a string and raises
/// `IllegalZeroByte`.
pub fn append_value_to_text(heap: &mut Heap, text: &Cell, value: &Cell) -> Result<(), RuntimeError> {
    if !text.kind().is_any_string() {
        fatal(format_args!("append target is {}, not a string", text.kind()));
    }
    if is_blackhole(value) {
        return Err(illegal_zero_byte());
    }
    let addition = match value.kind() {
        Kind::Token | Kind::Text | Kind::Tag | Kind::File | Kind::Url => {
            utf8_view(heap, value, usize::MAX).text.to_owned()
        }
        k if k.is_any_word() => value.as_symbol().as_str().to_owned(),
        Kind::Integer => value.as_integer().to_string(),
        Kind::Decimal => value.as_decimal().to_string(),
        Kind::Tuple => tuple_bytes(value).to_string(),
        other => return Err(bad_poke_value(text.kind(), other)),
    };
    let (node, _) = text.as_series();
    let series = heap.text_mut(node);
    if series.is_frozen() {
        return Err(series_frozen());
    }
    series.push_str(&addition);
    Ok(())
}

/// Append the bytes of `value` to the binary `binary`.
///
/// The blackhole appends a single zero byte.
pub fn append_value_to_binary(
    heap: &mut Heap,
    binary: &Cell,
    value: &Cell,
) -> Result<(), RuntimeError> {
    if binary.kind() != Kind::Binary {
        fatal(format_args!("append target is {}, not binary!", binary.kind()));
    }
    let addition: Vec<u8> = match value.kind() {
        Kind::Token if is_blackhole(value) => vec![0],
        Kind::Token | Kind::Text | Kind::Tag | Kind::File | Kind::Url => {
            utf8_view(heap, value, usize::MAX).as_bytes().to_vec()
        }
        Kind::Integer => vec![to_byte(value.as_integer())?],
        Kind::Tuple => tuple_bytes(value).as_slice().to_vec(),
        Kind::Binary => {
            let (node, index) = value.as_series();
            heap.binary(node).as_slice().get(index..).unwrap_or_default().to_vec()
        }
        other => return Err(bad_poke_value(Kind::Binary, other)),
    };
    let (node, _) = binary.as_series();
    let series = heap.binary_mut(node);
    if series.is_frozen() {
        return Err(series_frozen());
    }
    series.extend(&addition);
    Ok(())
}
