use super::*;

use crate::cell::Payload;
use crate::flags::CellFlags;
use crate::heap::Node;
use crate::pair::make_pair;
use crate::series::{make_binary, make_block, make_text};
use crate::symbol::Symbol;
use crate::token::{make_char, make_token};
use crate::tuple::make_tuple;

#[test]
fn different_kinds_are_never_equal() {
    let heap = Heap::default();
    assert!(!Cell::integer(1).equals(&Cell::decimal(1.0), &heap));
    assert!(!Cell::BLANK.equals(&Cell::NULL, &heap));
}

#[test]
fn pairs_compare_by_content() {
    let mut heap = Heap::default();
    let a = make_pair(&mut heap, Cell::integer(1), Cell::integer(2));
    let b = make_pair(&mut heap, Cell::integer(1), Cell::integer(2));
    let c = make_pair(&mut heap, Cell::integer(1), Cell::decimal(2.0));
    assert_ne!(a, b);
    assert!(a.equals(&b, &heap));
    assert!(!a.equals(&c, &heap));
}

#[test]
fn tuples_ignore_trailing_zeros() {
    let heap = Heap::default();
    assert!(make_tuple(&[1, 0, 0]).equals(&make_tuple(&[1, 0, 0, 0]), &heap));
    assert!(!make_tuple(&[1, 0, 1]).equals(&make_tuple(&[1, 0]), &heap));
}

#[test]
fn tokens_compare_across_storage() {
    let mut heap = Heap::default();
    let short = make_token(&mut heap, "a");
    let ch = make_char(u32::from('a')).unwrap();
    assert!(short.equals(&ch, &heap));

    let long_a = make_token(&mut heap, "long-token-text");
    let long_b = make_token(&mut heap, "long-token-text");
    assert!(long_a.equals(&long_b, &heap));
    assert!(!long_a.equals(&short, &heap));
}

#[test]
fn strings_are_case_sensitive() {
    let mut heap = Heap::default();
    let a = make_text(&mut heap, Kind::Text, "Hello");
    let b = make_text(&mut heap, Kind::Text, "Hello");
    let c = make_text(&mut heap, Kind::Text, "hello");
    assert!(a.equals(&b, &heap));
    assert!(!a.equals(&c, &heap));
}

#[test]
fn blocks_compare_element_wise() {
    let mut heap = Heap::default();
    let inner_a = make_block(&mut heap, Kind::Group, vec![Cell::integer(1)]);
    let inner_b = make_block(&mut heap, Kind::Group, vec![Cell::integer(1)]);
    let a = make_block(&mut heap, Kind::Block, vec![inner_a, Cell::BLANK]);
    let b = make_block(&mut heap, Kind::Block, vec![inner_b, Cell::BLANK]);
    assert!(a.equals(&b, &heap));

    let bin_a = make_binary(&mut heap, &[1, 2]);
    let bin_b = make_binary(&mut heap, &[1, 2]);
    assert!(bin_a.equals(&bin_b, &heap));
}

#[test]
fn refinement_equals_pairing_form() {
    let mut heap = Heap::default();
    let sym = Symbol::intern("compare-x");
    let word_form = Cell::new(Kind::Path, Heart::Word, CellFlags::empty(), Payload::Symbol(sym));
    let id = heap.alloc_managed(Node::Pairing([Cell::BLANK, Cell::word(sym)]));
    let pair_form = Cell::new(Kind::Path, Heart::Pairing, CellFlags::empty(), Payload::Node(id));
    assert!(word_form.equals(&pair_form, &heap));
    assert!(pair_form.equals(&word_form, &heap));
}

#[test]
fn bad_words_compare_label_and_isotope() {
    let heap = Heap::default();
    assert!(Cell::NULL_ISOTOPE.equals(&Cell::bad_word(Some(Symbol::NULL), true), &heap));
    assert!(!Cell::NULL_ISOTOPE.equals(&Cell::bad_word(Some(Symbol::NULL), false), &heap));
}
