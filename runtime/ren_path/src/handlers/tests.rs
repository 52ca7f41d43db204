use super::*;

use pretty_assertions::assert_eq;
use ren_cell::pair::{make_pair, x_as_int, y_as_int};
use ren_cell::series::{array_cells, make_binary, make_block, make_object, make_text};
use ren_cell::token::{make_char, make_token, utf8_view};
use ren_cell::tuple::{make_tuple, tuple_bytes};
use ren_cell::{Cell, ErrorKind, Heap, Kind, Symbol, VarList};

use crate::construct::{try_build_from_elements, PathFlavor};
use crate::data_stack::DataStack;
use crate::dispatch::{PathHandler, PokeOutcome};

fn word(name: &str) -> Cell {
    Cell::word(Symbol::intern(name))
}

fn kind_of(result: Result<impl std::fmt::Debug, ren_cell::RuntimeError>) -> ErrorKind {
    result.unwrap_err().kind
}

// Arrays

#[test]
fn array_pick_by_index() {
    let mut heap = Heap::default();
    let block = make_block(&mut heap, Kind::Block, vec![Cell::integer(10), Cell::integer(20)]);
    assert_eq!(ArrayHandler.pick(&heap, &block, &Cell::integer(2)).unwrap(), Cell::integer(20));
    assert!(ArrayHandler.pick(&heap, &block, &Cell::integer(3)).unwrap().is_null());
    assert!(ArrayHandler.pick(&heap, &block, &Cell::integer(0)).unwrap().is_null());
    assert!(ArrayHandler.pick(&heap, &block, &Cell::integer(-1)).unwrap().is_null());
}

#[test]
fn array_pick_selects_after_word() {
    let mut heap = Heap::default();
    let block = make_block(
        &mut heap,
        Kind::Block,
        vec![word("a"), Cell::integer(1), word("b"), Cell::integer(2)],
    );
    assert_eq!(ArrayHandler.pick(&heap, &block, &word("b")).unwrap(), Cell::integer(2));
    assert!(ArrayHandler.pick(&heap, &block, &word("zz")).unwrap().is_null());
}

#[test]
fn array_pick_rejects_other_pickers() {
    let mut heap = Heap::default();
    let block = make_block(&mut heap, Kind::Block, vec![Cell::integer(1)]);
    assert!(matches!(
        kind_of(ArrayHandler.pick(&heap, &block, &Cell::decimal(1.0))),
        ErrorKind::BadPick { container: Kind::Block, .. }
    ));
}

#[test]
fn array_poke_mutates_in_place() {
    let mut heap = Heap::default();
    let mut block = make_block(&mut heap, Kind::Block, vec![word("k"), Cell::integer(1)]);
    let alias = block;
    let outcome = ArrayHandler
        .poke(&mut heap, &mut block, &word("k"), &Cell::integer(99))
        .unwrap();
    assert_eq!(outcome, PokeOutcome::Done);
    assert_eq!(array_cells(&heap, &alias)[1], Cell::integer(99));
}

#[test]
fn array_poke_errors() {
    let mut heap = Heap::default();
    let mut block = make_block(&mut heap, Kind::Block, vec![Cell::integer(1)]);
    assert!(matches!(
        kind_of(ArrayHandler.poke(&mut heap, &mut block, &Cell::integer(1), &Cell::NULL)),
        ErrorKind::BadPokeValue { value: Kind::Null, .. }
    ));
    assert!(matches!(
        kind_of(ArrayHandler.poke(&mut heap, &mut block, &Cell::integer(5), &Cell::integer(2))),
        ErrorKind::BadPoke { .. }
    ));
    assert!(matches!(
        kind_of(ArrayHandler.poke(&mut heap, &mut block, &word("missing"), &Cell::integer(2))),
        ErrorKind::BadPoke { .. }
    ));

    heap.freeze(block.as_series().0);
    assert_eq!(
        kind_of(ArrayHandler.poke(&mut heap, &mut block, &Cell::integer(1), &Cell::integer(2))),
        ErrorKind::SeriesFrozen
    );
}

#[test]
fn path_elements_are_read_only() {
    let mut heap = Heap::default();
    let mut stack = DataStack::new();
    for element in [word("a"), word("b"), word("c")] {
        stack.push(element);
    }
    let mut path = try_build_from_elements(&mut heap, &mut stack, 0, PathFlavor::Plain).unwrap();
    assert_eq!(PathElementsHandler.pick(&heap, &path, &Cell::integer(3)).unwrap(), word("c"));
    assert!(PathElementsHandler.pick(&heap, &path, &Cell::integer(4)).unwrap().is_null());
    assert_eq!(
        kind_of(PathElementsHandler.poke(&mut heap, &mut path, &Cell::integer(1), &word("z"))),
        ErrorKind::SeriesFrozen
    );
}

// Objects

#[test]
fn object_fields() {
    let mut heap = Heap::default();
    let mut vars = VarList::new();
    vars.bind(Symbol::intern("size"), Cell::integer(3));
    let mut object = make_object(&mut heap, vars);

    assert_eq!(ObjectHandler.pick(&heap, &object, &word("size")).unwrap(), Cell::integer(3));
    assert!(matches!(
        kind_of(ObjectHandler.pick(&heap, &object, &word("color"))),
        ErrorKind::BadPick { container: Kind::Object, .. }
    ));

    let outcome = ObjectHandler
        .poke(&mut heap, &mut object, &word("size"), &Cell::integer(4))
        .unwrap();
    assert_eq!(outcome, PokeOutcome::Done);
    assert_eq!(
        heap.varlist(object.as_node()).get(Symbol::intern("size")),
        Some(&Cell::integer(4))
    );
    assert!(matches!(
        kind_of(ObjectHandler.poke(&mut heap, &mut object, &word("color"), &Cell::integer(1))),
        ErrorKind::BadPoke { .. }
    ));
}

// Pairs

#[test]
fn pair_pick_by_slot_and_axis() {
    let mut heap = Heap::default();
    let pair = make_pair(&mut heap, Cell::integer(3), Cell::decimal(4.5));
    assert_eq!(PairHandler.pick(&heap, &pair, &Cell::integer(1)).unwrap(), Cell::integer(3));
    assert_eq!(PairHandler.pick(&heap, &pair, &Cell::word(Symbol::Y)).unwrap(), Cell::decimal(4.5));
    assert!(PairHandler.pick(&heap, &pair, &Cell::integer(3)).is_err());
}

#[test]
fn pair_poke_copies() {
    let mut heap = Heap::default();
    let original = make_pair(&mut heap, Cell::integer(1), Cell::integer(2));
    let mut temp = original;
    let outcome = PairHandler
        .poke(&mut heap, &mut temp, &Cell::word(Symbol::X), &Cell::integer(7))
        .unwrap();
    assert_eq!(outcome, PokeOutcome::Updated);
    assert_eq!((x_as_int(&heap, &temp), y_as_int(&heap, &temp)), (7, 2));
    assert_eq!(x_as_int(&heap, &original), 1);

    assert!(matches!(
        kind_of(PairHandler.poke(&mut heap, &mut temp, &Cell::integer(1), &Cell::BLANK)),
        ErrorKind::BadPokeValue { value: Kind::Blank, .. }
    ));
}

// Tuples

#[test]
fn tuple_pick() {
    let heap = Heap::default();
    let tuple = make_tuple(&[1, 2, 3]);
    assert_eq!(TupleHandler.pick(&heap, &tuple, &Cell::integer(3)).unwrap(), Cell::integer(3));
    assert!(TupleHandler.pick(&heap, &tuple, &Cell::integer(4)).unwrap().is_null());
}

#[test]
fn tuple_poke_updates_temporary() {
    let mut heap = Heap::default();
    let original = make_tuple(&[1, 2, 3]);
    let mut temp = original;
    let outcome = TupleHandler
        .poke(&mut heap, &mut temp, &Cell::integer(2), &Cell::integer(200))
        .unwrap();
    assert_eq!(outcome, PokeOutcome::Updated);
    assert_eq!(tuple_bytes(&temp).as_slice(), &[1, 200, 3]);
    assert_eq!(tuple_bytes(&original).as_slice(), &[1, 2, 3]);
}

#[test]
fn tuple_poke_errors() {
    let mut heap = Heap::default();
    let mut tuple = make_tuple(&[1, 2, 3]);
    assert_eq!(
        kind_of(TupleHandler.poke(&mut heap, &mut tuple, &Cell::integer(1), &Cell::integer(256))),
        ErrorKind::OutOfRange { value: 256 }
    );
    assert!(matches!(
        kind_of(TupleHandler.poke(&mut heap, &mut tuple, &Cell::integer(9), &Cell::integer(1))),
        ErrorKind::BadPoke { .. }
    ));
    assert!(matches!(
        kind_of(TupleHandler.poke(&mut heap, &mut tuple, &Cell::integer(1), &Cell::decimal(1.0))),
        ErrorKind::BadPokeValue { .. }
    ));
}

// Tokens and strings

#[test]
fn token_pick_returns_chars() {
    let mut heap = Heap::default();
    let short = make_token(&mut heap, "abc");
    let long = make_token(&mut heap, "abcdefghijk");
    assert_eq!(TokenHandler.pick(&heap, &short, &Cell::integer(2)).unwrap(), make_char('b'.into()).unwrap());
    assert_eq!(TokenHandler.pick(&heap, &long, &Cell::integer(11)).unwrap(), make_char('k'.into()).unwrap());
    assert!(TokenHandler.pick(&heap, &short, &Cell::integer(4)).unwrap().is_null());
}

#[test]
fn token_poke_blackhole_is_accepted() {
    let mut heap = Heap::default();
    let mut hole = make_char(0).unwrap();
    let outcome = TokenHandler
        .poke(&mut heap, &mut hole, &Cell::integer(1), &Cell::integer(5))
        .unwrap();
    assert_eq!(outcome, PokeOutcome::Done);
    assert_eq!(hole, make_char(0).unwrap());

    let mut other = make_token(&mut heap, "ab");
    assert_eq!(
        kind_of(TokenHandler.poke(&mut heap, &mut other, &Cell::integer(1), &Cell::integer(5))),
        ErrorKind::SeriesFrozen
    );
}

#[test]
fn string_pick_and_poke() {
    let mut heap = Heap::default();
    let mut text = make_text(&mut heap, Kind::Text, "héllo");
    assert_eq!(StringHandler.pick(&heap, &text, &Cell::integer(2)).unwrap(), make_char('é'.into()).unwrap());

    let outcome = StringHandler
        .poke(&mut heap, &mut text, &Cell::integer(2), &make_char('e'.into()).unwrap())
        .unwrap();
    assert_eq!(outcome, PokeOutcome::Done);
    assert_eq!(utf8_view(&heap, &text, usize::MAX).text, "hello");
}

#[test]
fn string_poke_errors() {
    let mut heap = Heap::default();
    let mut text = make_text(&mut heap, Kind::Text, "abc");
    let hole = make_char(0).unwrap();
    assert_eq!(
        kind_of(StringHandler.poke(&mut heap, &mut text, &Cell::integer(1), &hole)),
        ErrorKind::IllegalZeroByte
    );
    assert!(matches!(
        kind_of(StringHandler.poke(&mut heap, &mut text, &Cell::integer(1), &Cell::integer(65))),
        ErrorKind::BadPokeValue { .. }
    ));
    let two = make_token(&mut heap, "xy");
    assert!(matches!(
        kind_of(StringHandler.poke(&mut heap, &mut text, &Cell::integer(1), &two)),
        ErrorKind::BadPokeValue { .. }
    ));
    let z = make_char('z'.into()).unwrap();
    assert!(matches!(
        kind_of(StringHandler.poke(&mut heap, &mut text, &Cell::integer(4), &z)),
        ErrorKind::BadPoke { .. }
    ));

    heap.freeze(text.as_series().0);
    assert_eq!(
        kind_of(StringHandler.poke(&mut heap, &mut text, &Cell::integer(1), &z)),
        ErrorKind::SeriesFrozen
    );
}

#[test]
fn binary_pick_and_poke() {
    let mut heap = Heap::default();
    let mut binary = make_binary(&mut heap, &[1, 2, 3]);
    assert_eq!(BinaryHandler.pick(&heap, &binary, &Cell::integer(3)).unwrap(), Cell::integer(3));
    assert!(BinaryHandler.pick(&heap, &binary, &Cell::integer(4)).unwrap().is_null());

    BinaryHandler
        .poke(&mut heap, &mut binary, &Cell::integer(1), &Cell::integer(255))
        .unwrap();
    let hole = make_char(0).unwrap();
    BinaryHandler.poke(&mut heap, &mut binary, &Cell::integer(2), &hole).unwrap();
    assert_eq!(heap.binary(binary.as_series().0).as_slice(), &[255, 0, 3]);

    assert_eq!(
        kind_of(BinaryHandler.poke(&mut heap, &mut binary, &Cell::integer(1), &Cell::integer(-1))),
        ErrorKind::OutOfRange { value: -1 }
    );
}
