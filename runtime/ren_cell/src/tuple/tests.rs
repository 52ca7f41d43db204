use super::*;

use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn init_tuple_records_length() {
    let tuple = make_tuple(&[1, 2, 3]);
    assert_eq!(tuple.kind(), Kind::Tuple);
    assert_eq!(tuple.heart(), Heart::Bytes);
    assert_eq!(tuple_len(&tuple), 3);
    assert_eq!(tuple_at(&tuple, 0), Some(1));
    assert_eq!(tuple_at(&tuple, 2), Some(3));
    assert_eq!(tuple_at(&tuple, 3), None);
    assert!(tuple.node_id().is_none());
}

#[test]
fn trailing_zeros_compare_equal() {
    let short = make_tuple(&[1, 0, 0]);
    let long = make_tuple(&[1, 0, 0, 0]);
    assert_eq!(tuple_bytes(&short), tuple_bytes(&long));
    assert_eq!(compare_tuples(&short, &long), Ordering::Equal);
    // identity still sees the different lengths
    assert_ne!(short, long);
}

#[test]
fn ordering_is_bytewise() {
    let a = make_tuple(&[1, 2]);
    let b = make_tuple(&[1, 2, 1]);
    let c = make_tuple(&[1, 3]);
    assert_eq!(compare_tuples(&a, &b), Ordering::Less);
    assert_eq!(compare_tuples(&b, &c), Ordering::Less);
    assert_eq!(compare_tuples(&c, &a), Ordering::Greater);
}

#[test]
fn full_width_tuple() {
    let tuple = make_tuple(&[255; MAX_TUPLE]);
    assert_eq!(tuple_len(&tuple), 8);
    assert_eq!(tuple_bytes(&tuple).to_string(), "255.255.255.255.255.255.255.255");
}

#[test]
#[should_panic(expected = "exceeds 8")]
fn oversized_tuple_is_fatal() {
    make_tuple(&[0; 9]);
}

#[test]
fn poke_overwrites_and_extends() {
    let mut tuple = make_tuple(&[10, 20]);
    assert!(poke_tuple(&mut tuple, 0, 11));
    assert!(poke_tuple(&mut tuple, 2, 30));
    assert!(!poke_tuple(&mut tuple, 4, 50));
    assert_eq!(tuple_bytes(&tuple).as_slice(), &[11, 20, 30]);

    let mut full = make_tuple(&[0; MAX_TUPLE]);
    assert!(!poke_tuple(&mut full, MAX_TUPLE, 1));
}

proptest! {
    #[test]
    fn zero_padding_never_changes_equality(
        bytes in prop::collection::vec(any::<u8>(), 0..=4),
        pad in 0usize..=4,
    ) {
        let mut padded = bytes.clone();
        padded.extend(std::iter::repeat(0).take(pad));
        let a = make_tuple(&bytes);
        let b = make_tuple(&padded);
        prop_assert_eq!(tuple_bytes(&a), tuple_bytes(&b));
    }
}
