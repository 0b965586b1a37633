//! Structural hashing as a visitor: computes the same hashes the
//! deduplicating builder stores, for trees built under any policy.

use crate::hash::{self, NodeHash};
use crate::node::{
    AssignExpr, BinaryExpr, BlockStmt, BoolExpr, CallExpr, ExpressionStmt, FunDecl, GroupingExpr,
    IfStmt, NilExpr, NumberExpr, PrintStmt, ReturnStmt, StringExpr, UnaryExpr, VarDecl, VarExpr,
    WhileStmt,
};
use crate::policy::Policy;
use crate::visit::{walk_expr, walk_stmt, ExprVisitor, StmtVisitor};

/// Stateless structural hasher.
#[derive(Clone, Copy, Debug, Default)]
pub struct TreeHasher;

impl<'t, P: Policy> ExprVisitor<'t, P> for TreeHasher {
    type Output = NodeHash;

    fn visit_binary(&mut self, node: &'t BinaryExpr<P>, cx: P::Resolver<'t>) -> NodeHash {
        let lhs = walk_expr::<P, _>(self, &node.lhs, cx);
        let rhs = walk_expr::<P, _>(self, &node.rhs, cx);
        hash::binary(lhs, rhs, node.op.kind)
    }

    fn visit_unary(&mut self, node: &'t UnaryExpr<P>, cx: P::Resolver<'t>) -> NodeHash {
        let operand = walk_expr::<P, _>(self, &node.operand, cx);
        hash::unary(operand, node.op.kind)
    }

    fn visit_grouping(&mut self, node: &'t GroupingExpr<P>, cx: P::Resolver<'t>) -> NodeHash {
        hash::grouping(walk_expr::<P, _>(self, &node.expr, cx))
    }

    fn visit_number(&mut self, node: &'t NumberExpr<P>, _cx: P::Resolver<'t>) -> NodeHash {
        hash::number(node.value)
    }

    fn visit_string(&mut self, node: &'t StringExpr<P>, _cx: P::Resolver<'t>) -> NodeHash {
        hash::string(node.value)
    }

    fn visit_bool(&mut self, node: &'t BoolExpr<P>, _cx: P::Resolver<'t>) -> NodeHash {
        hash::bool_lit(node.value)
    }

    fn visit_nil(&mut self, _node: &'t NilExpr<P>, _cx: P::Resolver<'t>) -> NodeHash {
        hash::nil()
    }

    fn visit_var(&mut self, node: &'t VarExpr<P>, _cx: P::Resolver<'t>) -> NodeHash {
        hash::var(node.name)
    }

    fn visit_assign(&mut self, node: &'t AssignExpr<P>, cx: P::Resolver<'t>) -> NodeHash {
        hash::assign(node.name, walk_expr::<P, _>(self, &node.value, cx))
    }

    fn visit_call(&mut self, node: &'t CallExpr<P>, cx: P::Resolver<'t>) -> NodeHash {
        let callee = walk_expr::<P, _>(self, &node.callee, cx);
        let args: Vec<NodeHash> = node.args.iter().map(|arg| walk_expr::<P, _>(self, arg, cx)).collect();
        hash::call(callee, &args)
    }
}

impl<'t, P: Policy> StmtVisitor<'t, P> for TreeHasher {
    type Output = NodeHash;

    fn visit_expression(&mut self, node: &'t ExpressionStmt<P>, cx: P::Resolver<'t>) -> NodeHash {
        hash::expression(walk_expr::<P, _>(self, &node.expr, cx))
    }

    fn visit_print(&mut self, node: &'t PrintStmt<P>, cx: P::Resolver<'t>) -> NodeHash {
        hash::print(walk_expr::<P, _>(self, &node.expr, cx))
    }

    fn visit_var_decl(&mut self, node: &'t VarDecl<P>, cx: P::Resolver<'t>) -> NodeHash {
        hash::var_decl(node.name, node.init.as_ref().map(|init| walk_expr::<P, _>(self, init, cx)))
    }

    fn visit_fun_decl(&mut self, node: &'t FunDecl<P>, cx: P::Resolver<'t>) -> NodeHash {
        let body: Vec<NodeHash> = node.body.iter().map(|stmt| walk_stmt::<P, _>(self, stmt, cx)).collect();
        hash::fun_decl(node.name, &node.params, &body)
    }

    fn visit_block(&mut self, node: &'t BlockStmt<P>, cx: P::Resolver<'t>) -> NodeHash {
        let statements: Vec<NodeHash> = node
            .statements
            .iter()
            .map(|stmt| walk_stmt::<P, _>(self, stmt, cx))
            .collect();
        hash::block(&statements)
    }

    fn visit_if(&mut self, node: &'t IfStmt<P>, cx: P::Resolver<'t>) -> NodeHash {
        hash::if_stmt(
            walk_expr::<P, _>(self, &node.condition, cx),
            walk_stmt::<P, _>(self, &node.then_branch, cx),
            node.else_branch.as_ref().map(|stmt| walk_stmt::<P, _>(self, stmt, cx)),
        )
    }

    fn visit_while(&mut self, node: &'t WhileStmt<P>, cx: P::Resolver<'t>) -> NodeHash {
        hash::while_stmt(
            walk_expr::<P, _>(self, &node.condition, cx),
            walk_stmt::<P, _>(self, &node.body, cx),
        )
    }

    fn visit_return(&mut self, node: &'t ReturnStmt<P>, cx: P::Resolver<'t>) -> NodeHash {
        hash::return_stmt(walk_expr::<P, _>(self, &node.value, cx))
    }
}

/// Hash one expression subtree.
pub fn hash_expr<'t, P: Policy>(expr: &'t P::ExprRef, cx: P::Resolver<'t>) -> NodeHash {
    walk_expr::<P, _>(&mut TreeHasher, expr, cx)
}

/// Hash one statement subtree.
pub fn hash_stmt<'t, P: Policy>(stmt: &'t P::StmtRef, cx: P::Resolver<'t>) -> NodeHash {
    walk_stmt::<P, _>(&mut TreeHasher, stmt, cx)
}
