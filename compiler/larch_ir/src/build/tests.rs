use super::*;
use crate::node::Expr;
use crate::TokenKind;
use pretty_assertions::assert_eq;

fn op(kind: TokenKind) -> Token {
    Token::new(kind, Name::EMPTY, 1, 0)
}

// 1 + 2, built through any builder.
fn one_plus_two<B: NodeBuilder>(builder: &mut B) -> ExprRef<B::P> {
    let one = builder.number(1.0);
    let two = builder.number(2.0);
    builder.binary(one, two, op(TokenKind::Plus))
}

#[test]
fn boxed_builder_produces_owned_nodes() {
    let mut builder = BoxedBuilder::<()>::new();
    let expr = one_plus_two(&mut builder);
    match *expr {
        Expr::Binary(ref node) => {
            assert!(matches!(*node.lhs, Expr::Number(ref n) if n.value == 1.0));
            assert!(matches!(*node.rhs, Expr::Number(ref n) if n.value == 2.0));
        }
        ref other => panic!("expected a binary node, got {other:?}"),
    }
}

#[test]
fn shared_builder_allows_aliasing() {
    let mut builder = SharedBuilder::<()>::new();
    let shared = builder.number(5.0);
    let lhs = std::rc::Rc::clone(&shared);
    let sum = builder.binary(lhs, shared, op(TokenKind::Plus));
    match *sum {
        Expr::Binary(ref node) => assert!(std::rc::Rc::ptr_eq(&node.lhs, &node.rhs)),
        ref other => panic!("expected a binary node, got {other:?}"),
    }
}

#[test]
fn arena_builder_appends_every_node() {
    let mut builder = ArenaBuilder::<()>::new();
    let _ = one_plus_two(&mut builder);
    let _ = one_plus_two(&mut builder);
    // No sharing: 2 numbers + 1 binary, twice.
    assert_eq!(builder.arena().expr_count(), 6);
}

#[test]
fn dedup_builder_reuses_identical_subtrees() {
    let mut builder = DedupBuilder::new();
    let first = one_plus_two(&mut builder);
    let second = one_plus_two(&mut builder);
    assert_eq!(first, second);
    // 1, 2 and the sum stored once each.
    assert_eq!(builder.arena().expr_count(), 3);
    // Second round was answered entirely from the map.
    assert_eq!(builder.dedup_hits(), 3);
}

#[test]
fn dedup_distinguishes_operator_kinds() {
    let mut builder = DedupBuilder::new();
    let one = builder.number(1.0);
    let two = builder.number(2.0);
    let plus = builder.binary(one, two, op(TokenKind::Plus));
    let minus = builder.binary(one, two, op(TokenKind::Minus));
    assert_ne!(plus, minus);
}

#[test]
fn dedup_ignores_source_position_of_operators() {
    let mut builder = DedupBuilder::new();
    let a1 = builder.number(1.0);
    let b1 = builder.number(2.0);
    let first = builder.binary(a1, b1, Token::new(TokenKind::Plus, Name::EMPTY, 1, 4));
    let a2 = builder.number(1.0);
    let b2 = builder.number(2.0);
    let second = builder.binary(a2, b2, Token::new(TokenKind::Plus, Name::EMPTY, 9, 2));
    assert_eq!(first, second);
}

#[test]
fn dedup_payload_is_the_structural_hash() {
    let mut builder = DedupBuilder::new();
    let expr = one_plus_two(&mut builder);
    let stored = *builder.arena().expr_payload(expr);
    let expected = crate::hash::binary(
        crate::hash::number(1.0),
        crate::hash::number(2.0),
        TokenKind::Plus,
    );
    assert_eq!(stored, expected);
}

#[test]
fn dedup_merges_statements_too() {
    let mut builder = DedupBuilder::new();
    let e1 = builder.number(3.0);
    let s1 = builder.print_stmt(e1);
    let e2 = builder.number(3.0);
    let s2 = builder.print_stmt(e2);
    assert_eq!(s1, s2);
    assert_eq!(builder.arena().stmt_count(), 1);
}
