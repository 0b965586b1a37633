use super::*;
use crate::build::{ArenaBuilder, BoxedBuilder, DedupBuilder, NodeBuilder};
use crate::interner::StringInterner;
use crate::policy::{Boxed, Indexed};
use crate::visit::hasher::{hash_expr, hash_stmt};
use crate::visit::printer::render_stmt;
use crate::{Token, TokenKind};
use pretty_assertions::assert_eq;

fn sample_unit(interner: &StringInterner) -> TranslationUnit<Boxed> {
    // var x = 1 + 2; print x;
    let mut builder = BoxedBuilder::<()>::new();
    let x = interner.intern("x");
    let one = builder.number(1.0);
    let two = builder.number(2.0);
    let sum = builder.binary(one, two, Token::new(TokenKind::Plus, interner.intern("+"), 1, 8));
    let decl = builder.var_decl(x, Some(sum));
    let read = builder.var(x);
    let print = builder.print_stmt(read);
    TranslationUnit {
        statements: vec![decl, print],
    }
}

#[test]
fn copy_preserves_structure_across_policies() {
    let interner = StringInterner::new();
    let unit = sample_unit(&interner);

    let mut arena = ArenaBuilder::<()>::new();
    let copied = copy_unit(&unit, (), &mut arena);
    let store = arena.into_arena();

    assert_eq!(unit.statements.len(), copied.statements.len());
    for (src, dst) in unit.statements.iter().zip(&copied.statements) {
        assert_eq!(
            render_stmt::<Boxed>(src, (), &interner),
            render_stmt::<Indexed>(dst, &store, &interner)
        );
    }
}

#[test]
fn copy_preserves_structural_hashes() {
    let interner = StringInterner::new();
    let unit = sample_unit(&interner);

    let mut arena = ArenaBuilder::<()>::new();
    let copied = copy_unit(&unit, (), &mut arena);
    let store = arena.into_arena();

    for (src, dst) in unit.statements.iter().zip(&copied.statements) {
        assert_eq!(hash_stmt::<Boxed>(src, ()), hash_stmt::<Indexed>(dst, &store));
    }
}

#[test]
fn copying_through_dedup_shares_repeated_subtrees() {
    let interner = StringInterner::new();
    let mut builder = BoxedBuilder::<()>::new();
    let plus = Token::new(TokenKind::Plus, interner.intern("+"), 1, 0);
    // (1 + 2) + (1 + 2) as a fully expanded boxed tree.
    let a = builder.number(1.0);
    let b = builder.number(2.0);
    let left = builder.binary(a, b, plus);
    let c = builder.number(1.0);
    let d = builder.number(2.0);
    let right = builder.binary(c, d, plus);
    let root = builder.binary(left, right, plus);

    let mut dedup = DedupBuilder::new();
    let copied = {
        let mut copier = Copier::new(&mut dedup);
        walk_expr::<Boxed, _>(&mut copier, &root, ())
    };
    let arena = dedup.into_arena();

    // 1, 2, 1+2 and the root: four distinct slots, not seven.
    assert_eq!(arena.expr_count(), 4);
    assert_eq!(hash_expr::<Boxed>(&root, ()), *arena.expr_payload(copied));
}
