use pretty_assertions::assert_eq;
use yamp_ir::Span;

use super::*;
use crate::ErrorCode;

#[test]
fn test_render_with_caret() {
    let diag = Diagnostic::error(ErrorCode::E1002)
        .with_message("expected expression after `+`")
        .with_label(Span::new(2, 2), "expected expression");
    let rendered = render(&diag, "2+");
    assert_eq!(
        rendered,
        "error[E1002]: expected expression after `+`\n \
         --> 1:3\n  |\n1 | 2+\n  |   ^ expected expression\n"
    );
}

#[test]
fn test_render_second_line_and_notes() {
    let diag = Diagnostic::error(ErrorCode::E6001)
        .with_message("The symbol foo could not be found.")
        .with_label(Span::new(6, 9), "")
        .with_note("define it before use");
    let rendered = render(&diag, "x = 1\nfoo + x");
    assert!(rendered.contains("--> 2:1"));
    assert!(rendered.contains("2 | foo + x"));
    assert!(rendered.contains("  | ^^^\n"));
    assert!(rendered.ends_with("  = note: define it before use\n"));
}

#[test]
fn test_render_without_labels() {
    let diag = Diagnostic::error(ErrorCode::E6009).with_message("out of time");
    assert_eq!(render(&diag, "x"), "error[E6009]: out of time\n");
}
