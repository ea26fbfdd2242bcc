use super::*;

#[test]
fn test_merge_covers_both() {
    let a = Span::new(4, 9);
    let b = Span::new(1, 6);
    assert_eq!(a.merge(b), Span::new(1, 9));
    assert_eq!(b.merge(a), Span::new(1, 9));
}

#[test]
fn test_point_is_empty() {
    let p = Span::point(7);
    assert!(p.is_empty());
    assert_eq!(p.len(), 0);
    assert!(!p.contains(7));
}

#[test]
fn test_from_range_saturates() {
    let s = Span::from_range(3..usize::MAX);
    assert_eq!(s.start, 3);
    assert_eq!(s.end, u32::MAX);
}

#[test]
fn test_display() {
    assert_eq!(Span::new(2, 5).to_string(), "2..5");
    assert_eq!(Span::new(2, 5).to_range(), 2..5);
}
