use super::*;
use pretty_assertions::assert_eq;

#[test]
fn plain_text_passes_through() {
    let cooked = unescape("hello");
    assert_eq!(cooked.value, "hello");
    assert!(cooked.bad_escapes.is_empty());
}

#[test]
fn recognized_escapes() {
    let cooked = unescape(r#"a\nb\tc\\d\"e\0f"#);
    assert_eq!(cooked.value, "a\nb\tc\\d\"e\0f");
    assert!(cooked.bad_escapes.is_empty());
}

#[test]
fn unknown_escape_substitutes_zero() {
    let cooked = unescape(r"a\qb");
    assert_eq!(cooked.value, "a0b");
    assert_eq!(cooked.bad_escapes, vec!['q']);
}

#[test]
fn decimal_radix() {
    assert_eq!(parse_radix(10, "123"), 123.0);
    assert_eq!(parse_radix(10, "1.5"), 1.5);
}

#[test]
fn hex_radix_with_fraction() {
    assert_eq!(parse_radix(16, "ff"), 255.0);
    assert_eq!(parse_radix(16, "1.8"), 1.5);
    assert_eq!(parse_radix(16, "A.4"), 10.25);
}

#[test]
fn binary_and_octal() {
    assert_eq!(parse_radix(2, "1010"), 10.0);
    assert_eq!(parse_radix(2, "0.1"), 0.5);
    assert_eq!(parse_radix(8, "17"), 15.0);
}
