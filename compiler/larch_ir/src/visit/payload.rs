//! Payload access through dispatch: read a node's annotation slot without
//! naming its kind.

use crate::node::{
    AssignExpr, BinaryExpr, BlockStmt, BoolExpr, CallExpr, ExpressionStmt, FunDecl, GroupingExpr,
    IfStmt, NilExpr, NumberExpr, PrintStmt, ReturnStmt, StringExpr, UnaryExpr, VarDecl, VarExpr,
    WhileStmt,
};
use crate::policy::Policy;
use crate::visit::{walk_expr, walk_stmt, ExprVisitor, StmtVisitor};

/// Visitor whose output is a borrow of the node's payload.
pub struct PayloadOf;

impl<'t, P: Policy> ExprVisitor<'t, P> for PayloadOf {
    type Output = &'t P::Payload;

    fn visit_binary(&mut self, node: &'t BinaryExpr<P>, _cx: P::Resolver<'t>) -> Self::Output {
        &node.payload
    }

    fn visit_unary(&mut self, node: &'t UnaryExpr<P>, _cx: P::Resolver<'t>) -> Self::Output {
        &node.payload
    }

    fn visit_grouping(&mut self, node: &'t GroupingExpr<P>, _cx: P::Resolver<'t>) -> Self::Output {
        &node.payload
    }

    fn visit_number(&mut self, node: &'t NumberExpr<P>, _cx: P::Resolver<'t>) -> Self::Output {
        &node.payload
    }

    fn visit_string(&mut self, node: &'t StringExpr<P>, _cx: P::Resolver<'t>) -> Self::Output {
        &node.payload
    }

    fn visit_bool(&mut self, node: &'t BoolExpr<P>, _cx: P::Resolver<'t>) -> Self::Output {
        &node.payload
    }

    fn visit_nil(&mut self, node: &'t NilExpr<P>, _cx: P::Resolver<'t>) -> Self::Output {
        &node.payload
    }

    fn visit_var(&mut self, node: &'t VarExpr<P>, _cx: P::Resolver<'t>) -> Self::Output {
        &node.payload
    }

    fn visit_assign(&mut self, node: &'t AssignExpr<P>, _cx: P::Resolver<'t>) -> Self::Output {
        &node.payload
    }

    fn visit_call(&mut self, node: &'t CallExpr<P>, _cx: P::Resolver<'t>) -> Self::Output {
        &node.payload
    }
}

impl<'t, P: Policy> StmtVisitor<'t, P> for PayloadOf {
    type Output = &'t P::Payload;

    fn visit_expression(&mut self, node: &'t ExpressionStmt<P>, _cx: P::Resolver<'t>) -> Self::Output {
        &node.payload
    }

    fn visit_print(&mut self, node: &'t PrintStmt<P>, _cx: P::Resolver<'t>) -> Self::Output {
        &node.payload
    }

    fn visit_var_decl(&mut self, node: &'t VarDecl<P>, _cx: P::Resolver<'t>) -> Self::Output {
        &node.payload
    }

    fn visit_fun_decl(&mut self, node: &'t FunDecl<P>, _cx: P::Resolver<'t>) -> Self::Output {
        &node.payload
    }

    fn visit_block(&mut self, node: &'t BlockStmt<P>, _cx: P::Resolver<'t>) -> Self::Output {
        &node.payload
    }

    fn visit_if(&mut self, node: &'t IfStmt<P>, _cx: P::Resolver<'t>) -> Self::Output {
        &node.payload
    }

    fn visit_while(&mut self, node: &'t WhileStmt<P>, _cx: P::Resolver<'t>) -> Self::Output {
        &node.payload
    }

    fn visit_return(&mut self, node: &'t ReturnStmt<P>, _cx: P::Resolver<'t>) -> Self::Output {
        &node.payload
    }
}

/// Payload of an expression node, resolved under the active policy.
pub fn payload_of_expr<'t, P: Policy>(expr: &'t P::ExprRef, cx: P::Resolver<'t>) -> &'t P::Payload {
    walk_expr::<P, _>(&mut PayloadOf, expr, cx)
}

/// Payload of a statement node, resolved under the active policy.
pub fn payload_of_stmt<'t, P: Policy>(stmt: &'t P::StmtRef, cx: P::Resolver<'t>) -> &'t P::Payload {
    walk_stmt::<P, _>(&mut PayloadOf, stmt, cx)
}
