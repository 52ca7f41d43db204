use super::*;

// Kind → message

#[test]
fn out_of_range_carries_value() {
    let err = out_of_range(1 << 40);
    assert_eq!(err.kind, ErrorKind::OutOfRange { value: 1 << 40 });
    assert_eq!(err.message, "1099511627776 is out of range");
}

#[test]
fn bad_conditional_names_kind() {
    let err = bad_conditional(Kind::BadWord);
    assert_eq!(err.kind, ErrorKind::BadConditional { kind: Kind::BadWord });
    assert_eq!(err.message, "bad-word! cannot be used as a condition");
}

#[test]
fn codepoint_too_high_renders_hex() {
    let err = codepoint_too_high(0x11_0000, 0x10_FFFF);
    assert_eq!(err.message, "codepoint 0x110000 exceeds maximum 0x10ffff");
}

#[test]
fn bad_pick_names_container_and_picker() {
    let err = bad_pick(Kind::Pair, "z");
    assert_eq!(
        err.kind,
        ErrorKind::BadPick {
            container: Kind::Pair,
            picker: "z".to_string()
        }
    );
    assert_eq!(err.message, "cannot pick z from pair!");
}

#[test]
fn with_message_keeps_kind() {
    let err = not_bound("foo").with_message("foo is unset in this context");
    assert_eq!(
        err.kind,
        ErrorKind::NotBound {
            word: "foo".to_string()
        }
    );
    assert_eq!(err.to_string(), "foo is unset in this context");
}

// Control actions

#[test]
fn runtime_error_lifts_into_control_action() {
    fn raise() -> EvalResult<()> {
        let frozen: Result<(), RuntimeError> = Err(series_frozen());
        frozen?;
        Ok(())
    }
    let action = raise().unwrap_err();
    assert!(!action.is_throw());
    assert_eq!(
        action.as_error().map(|e| &e.kind),
        Some(&ErrorKind::SeriesFrozen)
    );
}

#[test]
fn thrown_is_not_an_error() {
    let action = ControlAction::from(Thrown {
        label: Cell::NULL,
        arg: Cell::integer(7),
    });
    assert!(action.is_throw());
    assert!(action.as_error().is_none());
}
