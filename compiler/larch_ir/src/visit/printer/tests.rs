use super::*;
use crate::build::{ArenaBuilder, BoxedBuilder, NodeBuilder};
use crate::TokenKind;
use pretty_assertions::assert_eq;

fn op(interner: &StringInterner, kind: TokenKind, text: &str) -> crate::Token {
    crate::Token::new(kind, interner.intern(text), 1, 0)
}

#[test]
fn precedence_is_visible_in_the_rendering() {
    let interner = StringInterner::new();
    let mut builder = BoxedBuilder::<()>::new();
    // 1 + 2 * 3, with multiplication bound tighter.
    let two = builder.number(2.0);
    let three = builder.number(3.0);
    let product = builder.binary(two, three, op(&interner, TokenKind::Star, "*"));
    let one = builder.number(1.0);
    let sum = builder.binary(one, product, op(&interner, TokenKind::Plus, "+"));

    assert_eq!(render_expr::<crate::policy::Boxed>(&sum, (), &interner), "+ (1) (* (2) (3))");
}

#[test]
fn same_output_for_indexed_trees() {
    let interner = StringInterner::new();
    let mut builder = ArenaBuilder::<()>::new();
    let two = builder.number(2.0);
    let three = builder.number(3.0);
    let product = builder.binary(two, three, op(&interner, TokenKind::Star, "*"));
    let one = builder.number(1.0);
    let sum = builder.binary(one, product, op(&interner, TokenKind::Plus, "+"));

    let arena = builder.into_arena();
    assert_eq!(
        render_expr::<crate::policy::Indexed>(&sum, &arena, &interner),
        "+ (1) (* (2) (3))"
    );
}

#[test]
fn literals_and_variables() {
    let interner = StringInterner::new();
    let mut builder = BoxedBuilder::<()>::new();

    let truthy = builder.bool_lit(true);
    assert_eq!(render_expr::<crate::policy::Boxed>(&truthy, (), &interner), "true");

    let nil = builder.nil();
    assert_eq!(render_expr::<crate::policy::Boxed>(&nil, (), &interner), "nil");

    let name = interner.intern("counter");
    let var = builder.var(name);
    assert_eq!(render_expr::<crate::policy::Boxed>(&var, (), &interner), "counter");

    let text = builder.string(interner.intern("hi"));
    assert_eq!(render_expr::<crate::policy::Boxed>(&text, (), &interner), "\"hi\"");
}

#[test]
fn integral_numbers_render_without_fraction() {
    assert_eq!(fmt_number(2.0), "2");
    assert_eq!(fmt_number(-7.0), "-7");
    assert_eq!(fmt_number(2.5), "2.5");
}

#[test]
fn statements_render_with_terminators() {
    let interner = StringInterner::new();
    let mut builder = BoxedBuilder::<()>::new();
    let name = interner.intern("x");
    let init = builder.number(4.0);
    let decl = builder.var_decl(name, Some(init));
    assert_eq!(render_stmt::<crate::policy::Boxed>(&decl, (), &interner), "var x = 4;");

    let cond = builder.bool_lit(true);
    let body_expr = builder.var(name);
    let body = builder.print_stmt(body_expr);
    let loop_stmt = builder.while_stmt(cond, body);
    assert_eq!(
        render_stmt::<crate::policy::Boxed>(&loop_stmt, (), &interner),
        "while (true) print x;"
    );
}
