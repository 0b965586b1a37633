//! Visitor traits and dispatch entry points.
//!
//! A visitor implements one handler per node kind and works unchanged
//! across every storage policy: handlers receive the resolved node plus
//! the policy's resolver, and recurse by calling [`walk_expr`] /
//! [`walk_stmt`] on child references with that same resolver.
//!
//! The `'t` lifetime ties handler arguments to the tree, so a visitor may
//! keep `&'t` borrows of node data beyond a single call (the evaluator's
//! function values do).

use crate::node::{
    AssignExpr, BinaryExpr, BlockStmt, BoolExpr, CallExpr, ExpressionStmt, FunDecl, GroupingExpr,
    IfStmt, NilExpr, NumberExpr, PrintStmt, ReturnStmt, StringExpr, UnaryExpr, VarDecl, VarExpr,
    WhileStmt,
};
use crate::policy::Policy;

pub mod copier;
pub mod hasher;
pub mod payload;
pub mod printer;

/// Expression visitor: one handler per expression kind.
pub trait ExprVisitor<'t, P: Policy>: Sized {
    type Output;

    fn visit_binary(&mut self, node: &'t BinaryExpr<P>, cx: P::Resolver<'t>) -> Self::Output;
    fn visit_unary(&mut self, node: &'t UnaryExpr<P>, cx: P::Resolver<'t>) -> Self::Output;
    fn visit_grouping(&mut self, node: &'t GroupingExpr<P>, cx: P::Resolver<'t>) -> Self::Output;
    fn visit_number(&mut self, node: &'t NumberExpr<P>, cx: P::Resolver<'t>) -> Self::Output;
    fn visit_string(&mut self, node: &'t StringExpr<P>, cx: P::Resolver<'t>) -> Self::Output;
    fn visit_bool(&mut self, node: &'t BoolExpr<P>, cx: P::Resolver<'t>) -> Self::Output;
    fn visit_nil(&mut self, node: &'t NilExpr<P>, cx: P::Resolver<'t>) -> Self::Output;
    fn visit_var(&mut self, node: &'t VarExpr<P>, cx: P::Resolver<'t>) -> Self::Output;
    fn visit_assign(&mut self, node: &'t AssignExpr<P>, cx: P::Resolver<'t>) -> Self::Output;
    fn visit_call(&mut self, node: &'t CallExpr<P>, cx: P::Resolver<'t>) -> Self::Output;
}

/// Statement visitor: one handler per statement kind.
pub trait StmtVisitor<'t, P: Policy>: Sized {
    type Output;

    fn visit_expression(&mut self, node: &'t ExpressionStmt<P>, cx: P::Resolver<'t>)
        -> Self::Output;
    fn visit_print(&mut self, node: &'t PrintStmt<P>, cx: P::Resolver<'t>) -> Self::Output;
    fn visit_var_decl(&mut self, node: &'t VarDecl<P>, cx: P::Resolver<'t>) -> Self::Output;
    fn visit_fun_decl(&mut self, node: &'t FunDecl<P>, cx: P::Resolver<'t>) -> Self::Output;
    fn visit_block(&mut self, node: &'t BlockStmt<P>, cx: P::Resolver<'t>) -> Self::Output;
    fn visit_if(&mut self, node: &'t IfStmt<P>, cx: P::Resolver<'t>) -> Self::Output;
    fn visit_while(&mut self, node: &'t WhileStmt<P>, cx: P::Resolver<'t>) -> Self::Output;
    fn visit_return(&mut self, node: &'t ReturnStmt<P>, cx: P::Resolver<'t>) -> Self::Output;
}

/// Resolve an expression reference and call the matching handler.
#[inline]
pub fn walk_expr<'t, P: Policy, V: ExprVisitor<'t, P>>(
    visitor: &mut V,
    expr: &'t P::ExprRef,
    cx: P::Resolver<'t>,
) -> V::Output {
    P::dispatch_expr(visitor, expr, cx)
}

/// Resolve a statement reference and call the matching handler.
#[inline]
pub fn walk_stmt<'t, P: Policy, V: StmtVisitor<'t, P>>(
    visitor: &mut V,
    stmt: &'t P::StmtRef,
    cx: P::Resolver<'t>,
) -> V::Output {
    P::dispatch_stmt(visitor, stmt, cx)
}
