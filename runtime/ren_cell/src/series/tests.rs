use super::*;

use crate::symbol::Symbol;

#[test]
fn constructors_manage_their_nodes() {
    let mut heap = Heap::default();
    let text = make_text(&mut heap, Kind::Tag, "div");
    let binary = make_binary(&mut heap, &[1, 2]);
    let block = make_block(&mut heap, Kind::Group, vec![Cell::integer(1)]);
    let object = make_object(&mut heap, VarList::new());

    for cell in [text, binary, block, object] {
        let node = cell.node_id().unwrap();
        assert!(heap.is_managed(node), "{:?} not managed", cell.kind());
    }
    assert_eq!(text.kind(), Kind::Tag);
    assert_eq!(object.heart(), Heart::VarList);
}

#[test]
fn array_cells_respects_position() {
    let mut heap = Heap::default();
    let block = make_block(
        &mut heap,
        Kind::Block,
        vec![Cell::integer(1), Cell::integer(2), Cell::integer(3)],
    );
    let (node, _) = block.as_series();
    let advanced = Cell::new(
        Kind::Block,
        Heart::Array,
        CellFlags::empty(),
        Payload::Series { node, index: 2 },
    );
    assert_eq!(array_cells(&heap, &block).len(), 3);
    assert_eq!(array_cells(&heap, &advanced), &[Cell::integer(3)]);
}

#[test]
fn object_holds_bindings() {
    let mut heap = Heap::default();
    let key = Symbol::intern("series-test-key");
    let mut vars = VarList::new();
    vars.bind(key, Cell::integer(5));
    let object = make_object(&mut heap, vars);
    assert_eq!(
        heap.varlist(object.as_node()).get(key).map(Cell::as_integer),
        Some(5)
    );
}

#[test]
#[should_panic(expected = "is not a string kind")]
fn text_rejects_non_string_kind() {
    let mut heap = Heap::default();
    make_text(&mut heap, Kind::Word, "nope");
}
