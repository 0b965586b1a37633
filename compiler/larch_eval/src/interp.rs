//! The tree-walking interpreter.
//!
//! One visitor implements both visitor traits; expression handlers produce
//! values, statement handlers produce side effects. Because dispatch goes
//! through the storage policy, the same interpreter runs boxed, shared and
//! arena-indexed trees.
//!
//! `return` is modelled as a slot rather than an unwind: the return
//! handler fills it, and every statement sequence stops as soon as it is
//! occupied. The function call drains it.

use std::time::Instant;

use rustc_hash::FxHashMap;
use tracing::trace;

use larch_ir::node::{
    AssignExpr, BinaryExpr, BlockStmt, BoolExpr, CallExpr, ExpressionStmt, FunDecl, GroupingExpr,
    IfStmt, NilExpr, NumberExpr, PrintStmt, ReturnStmt, StringExpr, UnaryExpr, VarDecl, VarExpr,
    WhileStmt,
};
use larch_ir::{
    walk_expr, walk_stmt, ExprVisitor, Name, Policy, StmtVisitor, StringInterner, TokenKind,
    TranslationUnit,
};

use crate::error::RuntimeError;
use crate::value::Value;

type EvalResult<T> = Result<T, RuntimeError>;

/// Where `print` output goes. The REPL and batch driver write to stdout;
/// tests collect lines in a `Vec`.
pub trait PrintSink {
    fn print_line(&mut self, text: &str);
}

/// Sink that writes each line to standard output.
pub struct Stdout;

impl PrintSink for Stdout {
    fn print_line(&mut self, text: &str) {
        println!("{text}");
    }
}

impl PrintSink for Vec<String> {
    fn print_line(&mut self, text: &str) {
        self.push(text.to_owned());
    }
}

/// Evaluates a translation unit.
///
/// Holds a stack of scopes (the bottom one is the globals, pre-seeded with
/// `clock`) and borrows the tree for as long as it runs, since function
/// values point back into it.
pub struct Interpreter<'t, P: Policy, O> {
    interner: &'t StringInterner,
    out: O,
    scopes: Vec<FxHashMap<Name, Value<'t, P>>>,
    ret: Option<Value<'t, P>>,
    start: Instant,
}

impl<'t, P: Policy, O: PrintSink> Interpreter<'t, P, O> {
    pub fn new(interner: &'t StringInterner, out: O) -> Self {
        let mut globals = FxHashMap::default();
        globals.insert(interner.intern("clock"), Value::NativeClock);
        Interpreter {
            interner,
            out,
            scopes: vec![globals],
            ret: None,
            start: Instant::now(),
        }
    }

    /// Execute every top-level statement in order, stopping at the first
    /// runtime error. A top-level `return` ends the statement list early
    /// but is not itself an error.
    pub fn run(&mut self, unit: &'t TranslationUnit<P>, cx: P::Resolver<'t>) -> EvalResult<()> {
        self.execute_all(&unit.statements, cx)?;
        self.ret = None;
        Ok(())
    }

    pub fn output(&self) -> &O {
        &self.out
    }

    pub fn into_output(self) -> O {
        self.out
    }

    // ---- environment ----------------------------------------------------

    fn define(&mut self, name: Name, value: Value<'t, P>) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name, value);
        }
    }

    fn get(&self, name: Name) -> Option<Value<'t, P>> {
        self.scopes.iter().rev().find_map(|s| s.get(&name)).cloned()
    }

    fn set(&mut self, name: Name, value: Value<'t, P>) -> bool {
        for scope in self.scopes.iter_mut().rev() {
            if let Some(slot) = scope.get_mut(&name) {
                *slot = value;
                return true;
            }
        }
        false
    }

    // ---- execution helpers ----------------------------------------------

    fn execute_all(&mut self, stmts: &'t [P::StmtRef], cx: P::Resolver<'t>) -> EvalResult<()> {
        for stmt in stmts {
            walk_stmt::<P, _>(self, stmt, cx)?;
            if self.ret.is_some() {
                break;
            }
        }
        Ok(())
    }

    fn call_function(
        &mut self,
        decl: &'t FunDecl<P>,
        args: Vec<Value<'t, P>>,
        cx: P::Resolver<'t>,
    ) -> EvalResult<Value<'t, P>> {
        if args.len() != decl.params.len() {
            return Err(RuntimeError::ArityMismatch {
                name: self.interner.lookup(decl.name).to_owned(),
                expected: decl.params.len(),
                got: args.len(),
            });
        }
        trace!(function = self.interner.lookup(decl.name), "call");

        let mut scope = FxHashMap::default();
        for (param, arg) in decl.params.iter().zip(args) {
            scope.insert(*param, arg);
        }
        self.scopes.push(scope);
        let result = self.execute_all(&decl.body, cx);
        self.scopes.pop();
        result?;
        Ok(self.ret.take().unwrap_or(Value::Nil))
    }

    fn op_text(&self, op: larch_ir::Token) -> String {
        self.interner.lookup(op.lexeme).to_owned()
    }

    fn number_operands(
        &self,
        op: larch_ir::Token,
        lhs: &Value<'t, P>,
        rhs: &Value<'t, P>,
    ) -> EvalResult<(f64, f64)> {
        match (lhs, rhs) {
            (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
            _ => Err(RuntimeError::InvalidOperands {
                op: self.op_text(op),
                lhs: lhs.type_name(),
                rhs: rhs.type_name(),
            }),
        }
    }
}

impl<'t, P: Policy, O: PrintSink> ExprVisitor<'t, P> for Interpreter<'t, P, O> {
    type Output = EvalResult<Value<'t, P>>;

    fn visit_binary(&mut self, node: &'t BinaryExpr<P>, cx: P::Resolver<'t>) -> Self::Output {
        // `and`/`or` short-circuit and yield the deciding operand; the
        // comma operator discards its left-hand side.
        match node.op.kind {
            TokenKind::And => {
                let lhs = walk_expr::<P, _>(self, &node.lhs, cx)?;
                if !lhs.is_truthy() {
                    return Ok(lhs);
                }
                return walk_expr::<P, _>(self, &node.rhs, cx);
            }
            TokenKind::Or => {
                let lhs = walk_expr::<P, _>(self, &node.lhs, cx)?;
                if lhs.is_truthy() {
                    return Ok(lhs);
                }
                return walk_expr::<P, _>(self, &node.rhs, cx);
            }
            TokenKind::Comma => {
                walk_expr::<P, _>(self, &node.lhs, cx)?;
                return walk_expr::<P, _>(self, &node.rhs, cx);
            }
            _ => {}
        }

        let lhs = walk_expr::<P, _>(self, &node.lhs, cx)?;
        let rhs = walk_expr::<P, _>(self, &node.rhs, cx)?;
        match node.op.kind {
            TokenKind::Plus => match (&lhs, &rhs) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::Str(a), Value::Str(b)) => {
                    let joined =
                        format!("{}{}", self.interner.lookup(*a), self.interner.lookup(*b));
                    Ok(Value::Str(self.interner.intern(&joined)))
                }
                _ => Err(RuntimeError::InvalidOperands {
                    op: self.op_text(node.op),
                    lhs: lhs.type_name(),
                    rhs: rhs.type_name(),
                }),
            },
            TokenKind::Minus => {
                let (a, b) = self.number_operands(node.op, &lhs, &rhs)?;
                Ok(Value::Number(a - b))
            }
            TokenKind::Star => {
                let (a, b) = self.number_operands(node.op, &lhs, &rhs)?;
                Ok(Value::Number(a * b))
            }
            TokenKind::Slash => {
                let (a, b) = self.number_operands(node.op, &lhs, &rhs)?;
                Ok(Value::Number(a / b))
            }
            TokenKind::Gt => {
                let (a, b) = self.number_operands(node.op, &lhs, &rhs)?;
                Ok(Value::Bool(a > b))
            }
            TokenKind::GtEq => {
                let (a, b) = self.number_operands(node.op, &lhs, &rhs)?;
                Ok(Value::Bool(a >= b))
            }
            TokenKind::Lt => {
                let (a, b) = self.number_operands(node.op, &lhs, &rhs)?;
                Ok(Value::Bool(a < b))
            }
            TokenKind::LtEq => {
                let (a, b) = self.number_operands(node.op, &lhs, &rhs)?;
                Ok(Value::Bool(a <= b))
            }
            TokenKind::EqEq => Ok(Value::Bool(lhs.equals(&rhs))),
            TokenKind::BangEq => Ok(Value::Bool(!lhs.equals(&rhs))),
            _ => Err(RuntimeError::InvalidOperands {
                op: self.op_text(node.op),
                lhs: lhs.type_name(),
                rhs: rhs.type_name(),
            }),
        }
    }

    fn visit_unary(&mut self, node: &'t UnaryExpr<P>, cx: P::Resolver<'t>) -> Self::Output {
        let operand = walk_expr::<P, _>(self, &node.operand, cx)?;
        match node.op.kind {
            TokenKind::Bang => Ok(Value::Bool(!operand.is_truthy())),
            TokenKind::Minus => match operand {
                Value::Number(n) => Ok(Value::Number(-n)),
                _ => Err(RuntimeError::InvalidOperand {
                    op: self.op_text(node.op),
                    operand: operand.type_name(),
                }),
            },
            _ => Err(RuntimeError::InvalidOperand {
                op: self.op_text(node.op),
                operand: operand.type_name(),
            }),
        }
    }

    fn visit_grouping(&mut self, node: &'t GroupingExpr<P>, cx: P::Resolver<'t>) -> Self::Output {
        walk_expr::<P, _>(self, &node.expr, cx)
    }

    fn visit_number(&mut self, node: &'t NumberExpr<P>, _cx: P::Resolver<'t>) -> Self::Output {
        Ok(Value::Number(node.value))
    }

    fn visit_string(&mut self, node: &'t StringExpr<P>, _cx: P::Resolver<'t>) -> Self::Output {
        Ok(Value::Str(node.value))
    }

    fn visit_bool(&mut self, node: &'t BoolExpr<P>, _cx: P::Resolver<'t>) -> Self::Output {
        Ok(Value::Bool(node.value))
    }

    fn visit_nil(&mut self, _node: &'t NilExpr<P>, _cx: P::Resolver<'t>) -> Self::Output {
        Ok(Value::Nil)
    }

    fn visit_var(&mut self, node: &'t VarExpr<P>, _cx: P::Resolver<'t>) -> Self::Output {
        self.get(node.name)
            .ok_or_else(|| RuntimeError::UndefinedVariable {
                name: self.interner.lookup(node.name).to_owned(),
            })
    }

    fn visit_assign(&mut self, node: &'t AssignExpr<P>, cx: P::Resolver<'t>) -> Self::Output {
        let value = walk_expr::<P, _>(self, &node.value, cx)?;
        if self.set(node.name, value.clone()) {
            Ok(value)
        } else {
            Err(RuntimeError::UndefinedVariable {
                name: self.interner.lookup(node.name).to_owned(),
            })
        }
    }

    fn visit_call(&mut self, node: &'t CallExpr<P>, cx: P::Resolver<'t>) -> Self::Output {
        let callee = walk_expr::<P, _>(self, &node.callee, cx)?;
        let mut args = Vec::with_capacity(node.args.len());
        for arg in &node.args {
            args.push(walk_expr::<P, _>(self, arg, cx)?);
        }
        match callee {
            Value::Function(decl) => self.call_function(decl, args, cx),
            Value::NativeClock => {
                if !args.is_empty() {
                    return Err(RuntimeError::ArityMismatch {
                        name: "clock".to_owned(),
                        expected: 0,
                        got: args.len(),
                    });
                }
                Ok(Value::Number(self.start.elapsed().as_secs_f64()))
            }
            other => Err(RuntimeError::NotCallable {
                callee: other.type_name(),
            }),
        }
    }
}

impl<'t, P: Policy, O: PrintSink> StmtVisitor<'t, P> for Interpreter<'t, P, O> {
    type Output = EvalResult<()>;

    fn visit_expression(
        &mut self,
        node: &'t ExpressionStmt<P>,
        cx: P::Resolver<'t>,
    ) -> Self::Output {
        walk_expr::<P, _>(self, &node.expr, cx)?;
        Ok(())
    }

    fn visit_print(&mut self, node: &'t PrintStmt<P>, cx: P::Resolver<'t>) -> Self::Output {
        let value = walk_expr::<P, _>(self, &node.expr, cx)?;
        let line = value.display(self.interner);
        self.out.print_line(&line);
        Ok(())
    }

    fn visit_var_decl(&mut self, node: &'t VarDecl<P>, cx: P::Resolver<'t>) -> Self::Output {
        let value = match &node.init {
            Some(init) => walk_expr::<P, _>(self, init, cx)?,
            None => Value::Nil,
        };
        self.define(node.name, value);
        Ok(())
    }

    fn visit_fun_decl(&mut self, node: &'t FunDecl<P>, _cx: P::Resolver<'t>) -> Self::Output {
        self.define(node.name, Value::Function(node));
        Ok(())
    }

    fn visit_block(&mut self, node: &'t BlockStmt<P>, cx: P::Resolver<'t>) -> Self::Output {
        self.scopes.push(FxHashMap::default());
        let result = self.execute_all(&node.statements, cx);
        self.scopes.pop();
        result
    }

    fn visit_if(&mut self, node: &'t IfStmt<P>, cx: P::Resolver<'t>) -> Self::Output {
        if walk_expr::<P, _>(self, &node.condition, cx)?.is_truthy() {
            walk_stmt::<P, _>(self, &node.then_branch, cx)
        } else if let Some(else_branch) = &node.else_branch {
            walk_stmt::<P, _>(self, else_branch, cx)
        } else {
            Ok(())
        }
    }

    fn visit_while(&mut self, node: &'t WhileStmt<P>, cx: P::Resolver<'t>) -> Self::Output {
        while walk_expr::<P, _>(self, &node.condition, cx)?.is_truthy() {
            walk_stmt::<P, _>(self, &node.body, cx)?;
            if self.ret.is_some() {
                break;
            }
        }
        Ok(())
    }

    fn visit_return(&mut self, node: &'t ReturnStmt<P>, cx: P::Resolver<'t>) -> Self::Output {
        let value = walk_expr::<P, _>(self, &node.value, cx)?;
        self.ret = Some(value);
        Ok(())
    }
}

#[cfg(test)]
mod tests;
