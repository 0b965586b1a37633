//! Tree-to-tree copying across storage policies.
//!
//! Walks a source tree under one policy and rebuilds it through any
//! [`NodeBuilder`]. Copying a boxed tree through a `DedupBuilder` is how a
//! plain tree gets hash-consed after the fact.

use crate::build::{ExprRef, NodeBuilder, StmtRef};
use crate::node::{
    AssignExpr, BinaryExpr, BlockStmt, BoolExpr, CallExpr, ExpressionStmt, FunDecl, GroupingExpr,
    IfStmt, NilExpr, NumberExpr, PrintStmt, ReturnStmt, StringExpr, TranslationUnit, UnaryExpr,
    VarDecl, VarExpr, WhileStmt,
};
use crate::policy::Policy;
use crate::visit::{walk_expr, walk_stmt, ExprVisitor, StmtVisitor};

/// Rebuilds visited nodes through the wrapped builder.
pub struct Copier<'b, B> {
    builder: &'b mut B,
}

impl<'b, B: NodeBuilder> Copier<'b, B> {
    pub fn new(builder: &'b mut B) -> Self {
        Copier { builder }
    }
}

impl<'t, 'b, P: Policy, B: NodeBuilder> ExprVisitor<'t, P> for Copier<'b, B> {
    type Output = ExprRef<B::P>;

    fn visit_binary(&mut self, node: &'t BinaryExpr<P>, cx: P::Resolver<'t>) -> Self::Output {
        let lhs = walk_expr::<P, _>(self, &node.lhs, cx);
        let rhs = walk_expr::<P, _>(self, &node.rhs, cx);
        self.builder.binary(lhs, rhs, node.op)
    }

    fn visit_unary(&mut self, node: &'t UnaryExpr<P>, cx: P::Resolver<'t>) -> Self::Output {
        let operand = walk_expr::<P, _>(self, &node.operand, cx);
        self.builder.unary(operand, node.op)
    }

    fn visit_grouping(&mut self, node: &'t GroupingExpr<P>, cx: P::Resolver<'t>) -> Self::Output {
        let expr = walk_expr::<P, _>(self, &node.expr, cx);
        self.builder.grouping(expr)
    }

    fn visit_number(&mut self, node: &'t NumberExpr<P>, _cx: P::Resolver<'t>) -> Self::Output {
        self.builder.number(node.value)
    }

    fn visit_string(&mut self, node: &'t StringExpr<P>, _cx: P::Resolver<'t>) -> Self::Output {
        self.builder.string(node.value)
    }

    fn visit_bool(&mut self, node: &'t BoolExpr<P>, _cx: P::Resolver<'t>) -> Self::Output {
        self.builder.bool_lit(node.value)
    }

    fn visit_nil(&mut self, _node: &'t NilExpr<P>, _cx: P::Resolver<'t>) -> Self::Output {
        self.builder.nil()
    }

    fn visit_var(&mut self, node: &'t VarExpr<P>, _cx: P::Resolver<'t>) -> Self::Output {
        self.builder.var(node.name)
    }

    fn visit_assign(&mut self, node: &'t AssignExpr<P>, cx: P::Resolver<'t>) -> Self::Output {
        let value = walk_expr::<P, _>(self, &node.value, cx);
        self.builder.assign(node.name, value)
    }

    fn visit_call(&mut self, node: &'t CallExpr<P>, cx: P::Resolver<'t>) -> Self::Output {
        let callee = walk_expr::<P, _>(self, &node.callee, cx);
        let args = node.args.iter().map(|arg| walk_expr::<P, _>(self, arg, cx)).collect();
        self.builder.call(callee, args)
    }
}

impl<'t, 'b, P: Policy, B: NodeBuilder> StmtVisitor<'t, P> for Copier<'b, B> {
    type Output = StmtRef<B::P>;

    fn visit_expression(&mut self, node: &'t ExpressionStmt<P>, cx: P::Resolver<'t>) -> Self::Output {
        let expr = walk_expr::<P, _>(self, &node.expr, cx);
        self.builder.expression_stmt(expr)
    }

    fn visit_print(&mut self, node: &'t PrintStmt<P>, cx: P::Resolver<'t>) -> Self::Output {
        let expr = walk_expr::<P, _>(self, &node.expr, cx);
        self.builder.print_stmt(expr)
    }

    fn visit_var_decl(&mut self, node: &'t VarDecl<P>, cx: P::Resolver<'t>) -> Self::Output {
        let init = node.init.as_ref().map(|init| walk_expr::<P, _>(self, init, cx));
        self.builder.var_decl(node.name, init)
    }

    fn visit_fun_decl(&mut self, node: &'t FunDecl<P>, cx: P::Resolver<'t>) -> Self::Output {
        let body = node.body.iter().map(|stmt| walk_stmt::<P, _>(self, stmt, cx)).collect();
        self.builder.fun_decl(node.name, node.params.clone(), body)
    }

    fn visit_block(&mut self, node: &'t BlockStmt<P>, cx: P::Resolver<'t>) -> Self::Output {
        let statements = node
            .statements
            .iter()
            .map(|stmt| walk_stmt::<P, _>(self, stmt, cx))
            .collect();
        self.builder.block(statements)
    }

    fn visit_if(&mut self, node: &'t IfStmt<P>, cx: P::Resolver<'t>) -> Self::Output {
        let condition = walk_expr::<P, _>(self, &node.condition, cx);
        let then_branch = walk_stmt::<P, _>(self, &node.then_branch, cx);
        let else_branch = node.else_branch.as_ref().map(|stmt| walk_stmt::<P, _>(self, stmt, cx));
        self.builder.if_stmt(condition, then_branch, else_branch)
    }

    fn visit_while(&mut self, node: &'t WhileStmt<P>, cx: P::Resolver<'t>) -> Self::Output {
        let condition = walk_expr::<P, _>(self, &node.condition, cx);
        let body = walk_stmt::<P, _>(self, &node.body, cx);
        self.builder.while_stmt(condition, body)
    }

    fn visit_return(&mut self, node: &'t ReturnStmt<P>, cx: P::Resolver<'t>) -> Self::Output {
        let value = walk_expr::<P, _>(self, &node.value, cx);
        self.builder.return_stmt(value)
    }
}

/// Copy a whole unit into `builder`, preserving statement order.
pub fn copy_unit<'t, P: Policy, B: NodeBuilder>(
    unit: &'t TranslationUnit<P>,
    cx: P::Resolver<'t>,
    builder: &mut B,
) -> TranslationUnit<B::P> {
    let mut copier = Copier::new(builder);
    let statements = unit
        .statements
        .iter()
        .map(|stmt| walk_stmt::<P, _>(&mut copier, stmt, cx))
        .collect();
    TranslationUnit { statements }
}

#[cfg(test)]
mod tests;
