use super::*;
use crate::TokenKind;
use pretty_assertions::assert_eq;

#[test]
fn equal_structure_equal_hash() {
    let a = binary(number(1.0), number(2.0), TokenKind::Plus);
    let b = binary(number(1.0), number(2.0), TokenKind::Plus);
    assert_eq!(a, b);
}

#[test]
fn operator_kind_changes_hash() {
    let plus = binary(number(1.0), number(2.0), TokenKind::Plus);
    let minus = binary(number(1.0), number(2.0), TokenKind::Minus);
    assert_ne!(plus, minus);
}

#[test]
fn operand_order_changes_hash() {
    let ab = binary(number(1.0), number(2.0), TokenKind::Minus);
    let ba = binary(number(2.0), number(1.0), TokenKind::Minus);
    assert_ne!(ab, ba);
}

#[test]
fn single_child_kinds_do_not_collide() {
    let child = number(4.0);
    assert_ne!(grouping(child), unary(child, TokenKind::Minus));
    assert_ne!(expression(child), print(child));
}

#[test]
fn literals_hash_by_value() {
    assert_eq!(number(2.5), number(2.5));
    assert_ne!(number(2.5), number(2.0));
    assert_ne!(bool_lit(true), bool_lit(false));
    assert_eq!(nil(), nil());
}

#[test]
fn zero_and_negative_zero_differ() {
    // f64 bit patterns, not numeric equality.
    assert_ne!(number(0.0), number(-0.0));
}

#[test]
fn arg_count_feeds_call_hash() {
    let callee = var(crate::Name::EMPTY);
    let one = call(callee, &[number(1.0)]);
    let two = call(callee, &[number(1.0), number(1.0)]);
    assert_ne!(one, two);
}
