//! Tree rendering, mainly for diagnostics and tests.
//!
//! Expressions render prefix-style with each child parenthesized, so
//! `1 + 2 * 3` becomes `+ (1) (* (2) (3))` and precedence is visible
//! without consulting the grammar.

use std::fmt::{self, Write};

use crate::interner::StringInterner;
use crate::node::{
    AssignExpr, BinaryExpr, BlockStmt, BoolExpr, CallExpr, ExpressionStmt, FunDecl, GroupingExpr,
    IfStmt, NilExpr, NumberExpr, PrintStmt, ReturnStmt, StringExpr, TranslationUnit, UnaryExpr,
    VarDecl, VarExpr, WhileStmt,
};
use crate::policy::Policy;
use crate::visit::{walk_expr, walk_stmt, ExprVisitor, StmtVisitor};

/// Format a number the way the language surfaces it: integral values
/// without a trailing `.0`.
pub fn fmt_number(value: f64) -> String {
    if value == value.trunc() && value.is_finite() && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// Renders nodes into any [`fmt::Write`] sink.
pub struct AstPrinter<'a, W> {
    out: &'a mut W,
    interner: &'a StringInterner,
}

impl<'a, W: Write> AstPrinter<'a, W> {
    pub fn new(out: &'a mut W, interner: &'a StringInterner) -> Self {
        AstPrinter { out, interner }
    }
}

impl<'t, 'a, P: Policy, W: Write> ExprVisitor<'t, P> for AstPrinter<'a, W> {
    type Output = fmt::Result;

    fn visit_binary(&mut self, node: &'t BinaryExpr<P>, cx: P::Resolver<'t>) -> fmt::Result {
        write!(self.out, "{} (", self.interner.lookup(node.op.lexeme))?;
        walk_expr::<P, _>(self, &node.lhs, cx)?;
        self.out.write_str(") (")?;
        walk_expr::<P, _>(self, &node.rhs, cx)?;
        self.out.write_str(")")
    }

    fn visit_unary(&mut self, node: &'t UnaryExpr<P>, cx: P::Resolver<'t>) -> fmt::Result {
        write!(self.out, "{} (", self.interner.lookup(node.op.lexeme))?;
        walk_expr::<P, _>(self, &node.operand, cx)?;
        self.out.write_str(")")
    }

    fn visit_grouping(&mut self, node: &'t GroupingExpr<P>, cx: P::Resolver<'t>) -> fmt::Result {
        self.out.write_str("(")?;
        walk_expr::<P, _>(self, &node.expr, cx)?;
        self.out.write_str(")")
    }

    fn visit_number(&mut self, node: &'t NumberExpr<P>, _cx: P::Resolver<'t>) -> fmt::Result {
        self.out.write_str(&fmt_number(node.value))
    }

    fn visit_string(&mut self, node: &'t StringExpr<P>, _cx: P::Resolver<'t>) -> fmt::Result {
        write!(self.out, "\"{}\"", self.interner.lookup(node.value))
    }

    fn visit_bool(&mut self, node: &'t BoolExpr<P>, _cx: P::Resolver<'t>) -> fmt::Result {
        self.out.write_str(if node.value { "true" } else { "false" })
    }

    fn visit_nil(&mut self, _node: &'t NilExpr<P>, _cx: P::Resolver<'t>) -> fmt::Result {
        self.out.write_str("nil")
    }

    fn visit_var(&mut self, node: &'t VarExpr<P>, _cx: P::Resolver<'t>) -> fmt::Result {
        self.out.write_str(self.interner.lookup(node.name))
    }

    fn visit_assign(&mut self, node: &'t AssignExpr<P>, cx: P::Resolver<'t>) -> fmt::Result {
        write!(self.out, "{} = (", self.interner.lookup(node.name))?;
        walk_expr::<P, _>(self, &node.value, cx)?;
        self.out.write_str(")")
    }

    fn visit_call(&mut self, node: &'t CallExpr<P>, cx: P::Resolver<'t>) -> fmt::Result {
        self.out.write_str("call (")?;
        walk_expr::<P, _>(self, &node.callee, cx)?;
        self.out.write_str(")(")?;
        for (i, arg) in node.args.iter().enumerate() {
            if i > 0 {
                self.out.write_str(", ")?;
            }
            walk_expr::<P, _>(self, arg, cx)?;
        }
        self.out.write_str(")")
    }
}

impl<'t, 'a, P: Policy, W: Write> StmtVisitor<'t, P> for AstPrinter<'a, W> {
    type Output = fmt::Result;

    fn visit_expression(&mut self, node: &'t ExpressionStmt<P>, cx: P::Resolver<'t>) -> fmt::Result {
        walk_expr::<P, _>(self, &node.expr, cx)?;
        self.out.write_str(";")
    }

    fn visit_print(&mut self, node: &'t PrintStmt<P>, cx: P::Resolver<'t>) -> fmt::Result {
        self.out.write_str("print ")?;
        walk_expr::<P, _>(self, &node.expr, cx)?;
        self.out.write_str(";")
    }

    fn visit_var_decl(&mut self, node: &'t VarDecl<P>, cx: P::Resolver<'t>) -> fmt::Result {
        write!(self.out, "var {}", self.interner.lookup(node.name))?;
        if let Some(init) = &node.init {
            self.out.write_str(" = ")?;
            walk_expr::<P, _>(self, init, cx)?;
        }
        self.out.write_str(";")
    }

    fn visit_fun_decl(&mut self, node: &'t FunDecl<P>, cx: P::Resolver<'t>) -> fmt::Result {
        write!(self.out, "fun {}(", self.interner.lookup(node.name))?;
        for (i, param) in node.params.iter().enumerate() {
            if i > 0 {
                self.out.write_str(", ")?;
            }
            self.out.write_str(self.interner.lookup(*param))?;
        }
        self.out.write_str(") { ")?;
        for stmt in &node.body {
            walk_stmt::<P, _>(self, stmt, cx)?;
            self.out.write_str(" ")?;
        }
        self.out.write_str("}")
    }

    fn visit_block(&mut self, node: &'t BlockStmt<P>, cx: P::Resolver<'t>) -> fmt::Result {
        self.out.write_str("{ ")?;
        for stmt in &node.statements {
            walk_stmt::<P, _>(self, stmt, cx)?;
            self.out.write_str(" ")?;
        }
        self.out.write_str("}")
    }

    fn visit_if(&mut self, node: &'t IfStmt<P>, cx: P::Resolver<'t>) -> fmt::Result {
        self.out.write_str("if (")?;
        walk_expr::<P, _>(self, &node.condition, cx)?;
        self.out.write_str(") ")?;
        walk_stmt::<P, _>(self, &node.then_branch, cx)?;
        if let Some(else_branch) = &node.else_branch {
            self.out.write_str(" else ")?;
            walk_stmt::<P, _>(self, else_branch, cx)?;
        }
        Ok(())
    }

    fn visit_while(&mut self, node: &'t WhileStmt<P>, cx: P::Resolver<'t>) -> fmt::Result {
        self.out.write_str("while (")?;
        walk_expr::<P, _>(self, &node.condition, cx)?;
        self.out.write_str(") ")?;
        walk_stmt::<P, _>(self, &node.body, cx)
    }

    fn visit_return(&mut self, node: &'t ReturnStmt<P>, cx: P::Resolver<'t>) -> fmt::Result {
        self.out.write_str("return ")?;
        walk_expr::<P, _>(self, &node.value, cx)?;
        self.out.write_str(";")
    }
}

/// Render a single expression to a string.
pub fn render_expr<'t, P: Policy>(
    expr: &'t P::ExprRef,
    cx: P::Resolver<'t>,
    interner: &StringInterner,
) -> String {
    let mut out = String::new();
    let mut printer = AstPrinter::new(&mut out, interner);
    // Writing into a String cannot fail.
    let _ = walk_expr::<P, _>(&mut printer, expr, cx);
    out
}

/// Render a single statement to a string.
pub fn render_stmt<'t, P: Policy>(
    stmt: &'t P::StmtRef,
    cx: P::Resolver<'t>,
    interner: &StringInterner,
) -> String {
    let mut out = String::new();
    let mut printer = AstPrinter::new(&mut out, interner);
    let _ = walk_stmt::<P, _>(&mut printer, stmt, cx);
    out
}

/// Render every top-level statement, one per line.
pub fn render_unit<'t, P: Policy>(
    unit: &'t TranslationUnit<P>,
    cx: P::Resolver<'t>,
    interner: &StringInterner,
) -> String {
    let mut out = String::new();
    for stmt in &unit.statements {
        out.push_str(&render_stmt::<P>(stmt, cx, interner));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests;
