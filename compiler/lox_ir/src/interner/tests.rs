use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_intern_and_lookup() {
    let interner = StringInterner::new();

    let hello = interner.intern("hello");
    let world = interner.intern("world");
    let hello2 = interner.intern("hello");

    assert_eq!(hello, hello2);
    assert_ne!(hello, world);

    assert_eq!(interner.lookup(hello), "hello");
    assert_eq!(interner.lookup(world), "world");
}

#[test]
fn test_empty_string() {
    let interner = StringInterner::new();
    assert_eq!(interner.intern(""), Name::EMPTY);
    assert_eq!(interner.lookup(Name::EMPTY), "");
}

#[test]
fn test_names_follow_intern_order() {
    let interner = StringInterner::new();
    let first = interner.intern("first");
    let second = interner.intern("second");
    assert_eq!(first, Name::from_index(1));
    assert_eq!(second, Name::from_index(2));
    assert_eq!(interner.intern("first"), first);
}

#[test]
fn test_unknown_name_reads_empty() {
    let interner = StringInterner::new();
    assert_eq!(interner.lookup(Name::from_index(99)), "");
}

#[test]
fn test_shared_interner_clones_share_storage() {
    let interner = SharedInterner::new();
    let other = interner.clone();

    let a = interner.intern("counter");
    let b = other.intern("counter");

    assert_eq!(a, b);
    assert_eq!(other.lookup(a), "counter");
}
