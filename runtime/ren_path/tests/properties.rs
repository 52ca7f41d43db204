//! Cross-crate properties of cells and paths.
//!
//! These exercise the public surface of `ren_cell` and `ren_path` together:
//! numeric narrowing, tuple and token encodings, truthiness, and the storage
//! forms paths take when built.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::uninlined_format_args,
    clippy::cast_possible_truncation,
    reason = "Proptest macros generate code with these patterns"
)]

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use ren_cell::numeric::{round_to_int, to_int32};
use ren_cell::series::{make_block, make_text};
use ren_cell::token::{append_value_to_binary, append_value_to_text, make_char, make_token, utf8_view};
use ren_cell::tuple::make_tuple;
use ren_cell::{is_truthy, Cell, ErrorKind, Heap, Heart, Kind, Symbol};
use ren_path::{
    init_tracing, is_refinement, path_len, try_build_from_elements, try_init_refinement, DataStack,
    PathFlavor,
};

fn word(name: &str) -> Cell {
    Cell::word(Symbol::intern(name))
}

fn build(heap: &mut Heap, elements: &[Cell]) -> Result<Cell, ren_path::PathBuildError> {
    let mut stack = DataStack::new();
    for element in elements {
        stack.push(*element);
    }
    try_build_from_elements(heap, &mut stack, 0, PathFlavor::Plain)
}

// Numeric narrowing

proptest! {
    #[test]
    fn to_int32_accepts_exactly_the_i32_range(value in any::<i64>()) {
        match to_int32(value) {
            Ok(narrow) => prop_assert_eq!(i64::from(narrow), value),
            Err(error) => {
                prop_assert!(i32::try_from(value).is_err());
                prop_assert_eq!(error.kind, ErrorKind::OutOfRange { value });
            }
        }
    }

    #[test]
    fn round_to_int_stays_within_half(d in -1.0e9_f64..1.0e9_f64) {
        let rounded = f64::from(round_to_int(d));
        prop_assert!((rounded - d).abs() <= 0.5);
    }
}

#[test]
fn round_to_int_edges() {
    assert_eq!(round_to_int(2.5), 3);
    assert_eq!(round_to_int(-2.5), -2);
    assert_eq!(round_to_int(1.0e300), i32::MAX);
    assert_eq!(round_to_int(-1.0e300), i32::MIN);
    assert_eq!(round_to_int(f64::NAN), 0);
}

// Tuples

proptest! {
    #[test]
    fn tuples_equal_iff_zero_padded_bytes_equal(
        a in prop::collection::vec(any::<u8>(), 0..=8),
        b in prop::collection::vec(any::<u8>(), 0..=8),
    ) {
        let heap = Heap::default();
        let (ta, tb) = (make_tuple(&a), make_tuple(&b));
        let padded = |bytes: &[u8]| {
            let mut buffer = [0u8; 8];
            buffer[..bytes.len()].copy_from_slice(bytes);
            buffer
        };
        prop_assert_eq!(ta.equals(&tb, &heap), padded(&a) == padded(&b));
    }
}

// Tokens

#[test]
fn tokens_read_the_same_whatever_their_storage() {
    let mut heap = Heap::default();
    let short = make_token(&mut heap, "abcd");
    let long_text = "x".repeat(1000);
    let long = make_token(&mut heap, &long_text);

    assert_eq!(short.heart(), Heart::Bytes);
    assert_eq!(long.heart(), Heart::Text);
    assert_eq!(short.kind(), long.kind());

    let view = utf8_view(&heap, &short, usize::MAX);
    assert_eq!((view.text, view.codepoints, view.size()), ("abcd", 4, 4));
    let view = utf8_view(&heap, &long, usize::MAX);
    assert_eq!((view.codepoints, view.size()), (1000, 1000));
    assert_eq!(view.text, long_text);
}

#[test]
fn blackhole_appends() {
    let mut heap = Heap::default();
    let hole = make_char(0).unwrap();
    let text = make_text(&mut heap, Kind::Text, "ab");
    let binary = ren_cell::series::make_binary(&mut heap, &[1]);

    let error = append_value_to_text(&mut heap, &text, &hole).unwrap_err();
    assert_eq!(error.kind, ErrorKind::IllegalZeroByte);
    assert_eq!(utf8_view(&heap, &text, usize::MAX).text, "ab");

    append_value_to_binary(&mut heap, &binary, &hole).unwrap();
    assert_eq!(heap.binary(binary.as_series().0).as_slice(), &[1, 0]);
}

// Truthiness

#[test]
fn truthiness_table() {
    let mut heap = Heap::default();
    let empty_block = make_block(&mut heap, Kind::Block, vec![]);
    let empty_text = make_text(&mut heap, Kind::Text, "");
    for truthy in [
        Cell::TRUE,
        Cell::integer(0),
        Cell::decimal(0.0),
        empty_block,
        empty_text,
        word("false"),
        make_char(0).unwrap(),
    ] {
        assert!(is_truthy(&truthy).unwrap(), "{:?} should be truthy", truthy.kind());
    }
    for falsey in [Cell::FALSE, Cell::NULL, Cell::BLANK, Cell::NULL_ISOTOPE] {
        assert!(!is_truthy(&falsey).unwrap(), "{:?} should be falsey", falsey.kind());
    }
    let error = is_truthy(&Cell::bad_word(Some(Symbol::VOID), true)).unwrap_err();
    assert_eq!(error.kind, ErrorKind::BadConditional { kind: Kind::BadWord });
}

// Path construction

#[test]
fn three_words_make_an_array_path() {
    let mut heap = Heap::default();
    let path = build(&mut heap, &[word("a"), word("b"), word("c")]).unwrap();
    assert_eq!(path.kind(), Kind::Path);
    assert_eq!(path.heart(), Heart::Array);
    assert_eq!(path_len(&heap, &path), 3);
}

#[test]
fn zero_elements_make_null() {
    let mut heap = Heap::default();
    assert!(build(&mut heap, &[]).unwrap().is_null());
}

#[test]
fn blank_then_word_is_the_refinement() {
    let mut heap = Heap::default();
    let built = build(&mut heap, &[Cell::BLANK, word("only")]).unwrap();
    let direct = try_init_refinement(PathFlavor::Plain, Symbol::intern("only")).unwrap();
    assert!(is_refinement(&heap, &built));
    assert!(built.equals(&direct, &heap));
    assert_eq!(heap.live_count(), 0);
}

#[test]
fn nested_paths_are_rejected_by_position() {
    let mut heap = Heap::default();
    let inner = build(&mut heap, &[word("x"), word("y")]).unwrap();
    let error = build(&mut heap, &[word("a"), word("b"), inner]).unwrap_err();
    assert_eq!(error.index, 2);
    assert_eq!(error.element.kind(), Kind::Path);
}

#[test]
fn tracing_init_is_idempotent() {
    init_tracing();
    init_tracing();
}
