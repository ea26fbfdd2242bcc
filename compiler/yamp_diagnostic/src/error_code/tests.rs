use super::*;

#[test]
fn test_codes_are_unique() {
    let mut seen = std::collections::HashSet::new();
    for code in ErrorCode::ALL {
        assert!(seen.insert(code.as_str()), "duplicate {code}");
    }
}

#[test]
fn test_round_trip_from_str() {
    for code in ErrorCode::ALL {
        assert_eq!(code.as_str().parse::<ErrorCode>(), Ok(*code));
    }
    assert_eq!("e6001".parse::<ErrorCode>(), Ok(ErrorCode::E6001));
    assert!("E9999".parse::<ErrorCode>().is_err());
}

#[test]
fn test_phase_classification() {
    assert!(ErrorCode::E1004.is_parse_error());
    assert!(!ErrorCode::E1004.is_eval_error());
    assert!(ErrorCode::E6002.is_eval_error());
    assert!(!ErrorCode::E2001.is_parse_error());
}
