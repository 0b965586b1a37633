use super::*;
use pretty_assertions::assert_eq;

#[test]
fn same_text_same_name() {
    let interner = StringInterner::new();
    let a = interner.intern("counter");
    let b = interner.intern("counter");
    assert_eq!(a, b);
}

#[test]
fn different_text_different_name() {
    let interner = StringInterner::new();
    let a = interner.intern("x");
    let b = interner.intern("y");
    assert_ne!(a, b);
}

#[test]
fn lookup_round_trips() {
    let interner = StringInterner::new();
    let name = interner.intern("while");
    assert_eq!(interner.lookup(name), "while");
}

#[test]
fn empty_string_is_pre_interned() {
    let interner = StringInterner::new();
    assert_eq!(interner.intern(""), Name::EMPTY);
    assert_eq!(interner.lookup(Name::EMPTY), "");
}

#[test]
fn shared_across_threads() {
    let interner: SharedInterner = std::sync::Arc::new(StringInterner::new());
    let clone = std::sync::Arc::clone(&interner);
    let handle = std::thread::spawn(move || clone.intern("spawned"));
    let from_thread = handle.join().expect("intern thread panicked");
    assert_eq!(from_thread, interner.intern("spawned"));
}
