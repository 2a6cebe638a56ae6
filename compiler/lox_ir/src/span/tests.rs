use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_merge_covers_both() {
    let a = Span::new(4, 8);
    let b = Span::new(1, 5);
    assert_eq!(a.merge(b), Span::new(1, 8));
    assert_eq!(b.merge(a), Span::new(1, 8));
}

#[test]
fn test_from_range_saturates() {
    let too_big = (u32::MAX as usize) + 1;
    assert_eq!(Span::from_range(3..too_big), Span::new(3, u32::MAX));
}

#[test]
fn test_slice() {
    let source = "var answer = 42;";
    assert_eq!(Span::new(4, 10).slice(source), "answer");
    assert_eq!(Span::new(40, 50).slice(source), "");
}
