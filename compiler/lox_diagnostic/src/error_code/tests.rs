use super::*;

#[test]
fn codes_round_trip_through_strings() {
    for &code in ErrorCode::ALL {
        assert_eq!(ErrorCode::from_str_code(code.as_str()), Some(code));
    }
    assert_eq!(ErrorCode::from_str_code("E9999"), None);
}

#[test]
fn phase_is_encoded_in_first_digit() {
    assert!(ErrorCode::E0002.is_lexer_error());
    assert!(ErrorCode::E1003.is_parser_error());
    assert!(ErrorCode::E2003.is_resolver_error());
    assert!(!ErrorCode::E2003.is_parser_error());
}

#[test]
fn every_code_has_a_description() {
    for &code in ErrorCode::ALL {
        assert!(!code.description().is_empty(), "{code} has no description");
    }
}
