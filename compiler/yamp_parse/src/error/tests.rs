#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_kind_follows_code() {
    assert_eq!(
        expected_expression(Span::point(2), "").kind(),
        ParseErrorKind::Syntax
    );
    assert_eq!(
        no_operator_found(Span::point(2), "x").kind(),
        ParseErrorKind::NoOperatorFound
    );
    let dup: ParseError = GrammarError::DuplicateRegistration {
        table: "operator",
        key: "+".into(),
    }
    .into();
    assert_eq!(dup.kind(), ParseErrorKind::DuplicateRegistration);
}

#[test]
fn test_expected_expression_message() {
    let err = expected_expression(Span::point(2), "");
    assert_eq!(err.message, "expected an expression, found end of input");
    assert_eq!(err.code, ErrorCode::E1002);
}

#[test]
fn test_context_keeps_innermost() {
    let err = expected_expression(Span::point(0), ")")
        .in_context(ErrorContext::Arguments)
        .in_context(ErrorContext::Statement);
    assert_eq!(err.context, Some(ErrorContext::Arguments));
}

#[test]
fn test_diagnostic_has_context_note() {
    let err = unclosed_delimiter(Span::new(0, 1), '(', ')').in_context(ErrorContext::Group);
    let diagnostic = err.to_diagnostic();
    assert_eq!(diagnostic.code, ErrorCode::E1003);
    assert_eq!(
        diagnostic.notes,
        vec!["while parsing a parenthesised expression".to_string()]
    );
}

#[test]
fn test_grammar_error_display() {
    let err = GrammarError::DuplicateRegistration {
        table: "transform",
        key: "/".into(),
    };
    assert_eq!(err.to_string(), "transform `/` is already registered");
    assert_eq!(err.code(), ErrorCode::E2001);
}
