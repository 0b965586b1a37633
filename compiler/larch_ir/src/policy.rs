//! Storage policies: how child references are represented and resolved.
//!
//! A [`Policy`] fixes three things at once:
//! - the payload type attached to every node,
//! - the representation of a reference to a child node,
//! - the external context (resolver) needed to reach the node behind a
//!   reference.
//!
//! [`Boxed`] and [`Shared`] resolve with no context (`Resolver = ()`);
//! [`Indexed`] stores plain offsets and needs the owning
//! [`NodeArena`](crate::arena::NodeArena) at every dereference. All call
//! sites share one shape: a resolver is always passed, and is `()` where
//! the policy needs none.
//!
//! Dispatch lives here rather than on the nodes because only the policy
//! knows how to get from a reference to the node behind it. Visitors stay
//! representation-agnostic: the same visitor runs against all three
//! policies, differing only in the resolver supplied at the call site.

use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use crate::arena::{ExprIx, NodeArena, StmtIx};
use crate::node::{Expr, ExprKind, Stmt, StmtKind};
use crate::visit::{ExprVisitor, StmtVisitor};

/// Bound alias for node payloads.
pub trait Payload: Clone + fmt::Debug + Default + 'static {}

impl<T: Clone + fmt::Debug + Default + 'static> Payload for T {}

/// A storage/ownership strategy for tree nodes.
///
/// The policy is orthogonal to node kind: one policy instance covers both
/// unions and every kind within them.
pub trait Policy: Sized + 'static {
    /// Annotation attached to every node (`()` by default, a
    /// [`NodeHash`](crate::hash::NodeHash) under the deduplicating arena).
    type Payload: Payload;

    /// Representation of a reference to an expression node.
    type ExprRef: fmt::Debug;

    /// Representation of a reference to a statement node.
    type StmtRef: fmt::Debug;

    /// External context required to resolve a reference.
    type Resolver<'t>: Copy;

    /// Resolve `expr` and invoke the visitor handler for its kind.
    fn dispatch_expr<'t, V: ExprVisitor<'t, Self>>(
        visitor: &mut V,
        expr: &'t Self::ExprRef,
        cx: Self::Resolver<'t>,
    ) -> V::Output;

    /// Resolve `stmt` and invoke the visitor handler for its kind.
    fn dispatch_stmt<'t, V: StmtVisitor<'t, Self>>(
        visitor: &mut V,
        stmt: &'t Self::StmtRef,
        cx: Self::Resolver<'t>,
    ) -> V::Output;
}

/// Exclusive ownership: children are `Box`ed, dropping a node drops its
/// subtree, no aliasing.
#[derive(Clone, Copy, Debug, Default)]
pub struct Boxed<PL = ()>(PhantomData<PL>);

/// Shared ownership: children are reference-counted, subtrees may alias.
/// Single-threaded by design (trees never cross threads).
#[derive(Clone, Copy, Debug, Default)]
pub struct Shared<PL = ()>(PhantomData<PL>);

/// Arena indices: children are plain offsets carrying no ownership; every
/// dereference needs the owning arena as resolver. Many indices may alias
/// one slot (the deduplicating builder relies on this).
#[derive(Clone, Copy, Debug, Default)]
pub struct Indexed<PL = ()>(PhantomData<PL>);

fn expr_handler<'t, P: Policy, V: ExprVisitor<'t, P>>(
    visitor: &mut V,
    expr: &'t Expr<P>,
    cx: P::Resolver<'t>,
) -> V::Output {
    match expr {
        Expr::Binary(node) => visitor.visit_binary(node, cx),
        Expr::Unary(node) => visitor.visit_unary(node, cx),
        Expr::Grouping(node) => visitor.visit_grouping(node, cx),
        Expr::Number(node) => visitor.visit_number(node, cx),
        Expr::Str(node) => visitor.visit_string(node, cx),
        Expr::Bool(node) => visitor.visit_bool(node, cx),
        Expr::Nil(node) => visitor.visit_nil(node, cx),
        Expr::Var(node) => visitor.visit_var(node, cx),
        Expr::Assign(node) => visitor.visit_assign(node, cx),
        Expr::Call(node) => visitor.visit_call(node, cx),
    }
}

fn stmt_handler<'t, P: Policy, V: StmtVisitor<'t, P>>(
    visitor: &mut V,
    stmt: &'t Stmt<P>,
    cx: P::Resolver<'t>,
) -> V::Output {
    match stmt {
        Stmt::Expression(node) => visitor.visit_expression(node, cx),
        Stmt::Print(node) => visitor.visit_print(node, cx),
        Stmt::VarDecl(node) => visitor.visit_var_decl(node, cx),
        Stmt::FunDecl(node) => visitor.visit_fun_decl(node, cx),
        Stmt::Block(node) => visitor.visit_block(node, cx),
        Stmt::If(node) => visitor.visit_if(node, cx),
        Stmt::While(node) => visitor.visit_while(node, cx),
        Stmt::Return(node) => visitor.visit_return(node, cx),
    }
}

impl<PL: Payload> Policy for Boxed<PL> {
    type Payload = PL;
    type ExprRef = Box<Expr<Self>>;
    type StmtRef = Box<Stmt<Self>>;
    type Resolver<'t> = ();

    fn dispatch_expr<'t, V: ExprVisitor<'t, Self>>(
        visitor: &mut V,
        expr: &'t Self::ExprRef,
        cx: (),
    ) -> V::Output {
        expr_handler(visitor, expr, cx)
    }

    fn dispatch_stmt<'t, V: StmtVisitor<'t, Self>>(
        visitor: &mut V,
        stmt: &'t Self::StmtRef,
        cx: (),
    ) -> V::Output {
        stmt_handler(visitor, stmt, cx)
    }
}

impl<PL: Payload> Policy for Shared<PL> {
    type Payload = PL;
    type ExprRef = Rc<Expr<Self>>;
    type StmtRef = Rc<Stmt<Self>>;
    type Resolver<'t> = ();

    fn dispatch_expr<'t, V: ExprVisitor<'t, Self>>(
        visitor: &mut V,
        expr: &'t Self::ExprRef,
        cx: (),
    ) -> V::Output {
        expr_handler(visitor, expr, cx)
    }

    fn dispatch_stmt<'t, V: StmtVisitor<'t, Self>>(
        visitor: &mut V,
        stmt: &'t Self::StmtRef,
        cx: (),
    ) -> V::Output {
        stmt_handler(visitor, stmt, cx)
    }
}

impl<PL: Payload> Policy for Indexed<PL> {
    type Payload = PL;
    type ExprRef = ExprIx;
    type StmtRef = StmtIx;
    type Resolver<'t> = &'t NodeArena<PL>;

    fn dispatch_expr<'t, V: ExprVisitor<'t, Self>>(
        visitor: &mut V,
        expr: &'t ExprIx,
        cx: &'t NodeArena<PL>,
    ) -> V::Output {
        match expr.kind() {
            ExprKind::Binary => visitor.visit_binary(cx.binary(*expr), cx),
            ExprKind::Unary => visitor.visit_unary(cx.unary(*expr), cx),
            ExprKind::Grouping => visitor.visit_grouping(cx.grouping(*expr), cx),
            ExprKind::Number => visitor.visit_number(cx.number(*expr), cx),
            ExprKind::Str => visitor.visit_string(cx.string(*expr), cx),
            ExprKind::Bool => visitor.visit_bool(cx.bool_lit(*expr), cx),
            ExprKind::Nil => visitor.visit_nil(cx.nil(*expr), cx),
            ExprKind::Var => visitor.visit_var(cx.var(*expr), cx),
            ExprKind::Assign => visitor.visit_assign(cx.assign(*expr), cx),
            ExprKind::Call => visitor.visit_call(cx.call(*expr), cx),
        }
    }

    fn dispatch_stmt<'t, V: StmtVisitor<'t, Self>>(
        visitor: &mut V,
        stmt: &'t StmtIx,
        cx: &'t NodeArena<PL>,
    ) -> V::Output {
        match stmt.kind() {
            StmtKind::Expression => visitor.visit_expression(cx.expression(*stmt), cx),
            StmtKind::Print => visitor.visit_print(cx.print(*stmt), cx),
            StmtKind::VarDecl => visitor.visit_var_decl(cx.var_decl(*stmt), cx),
            StmtKind::FunDecl => visitor.visit_fun_decl(cx.fun_decl(*stmt), cx),
            StmtKind::Block => visitor.visit_block(cx.block(*stmt), cx),
            StmtKind::If => visitor.visit_if(cx.if_stmt(*stmt), cx),
            StmtKind::While => visitor.visit_while(cx.while_stmt(*stmt), cx),
            StmtKind::Return => visitor.visit_return(cx.return_stmt(*stmt), cx),
        }
    }
}
