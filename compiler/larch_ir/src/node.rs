//! The Larch node model.
//!
//! Two closed unions — [`Expr`] and [`Stmt`] — with one struct per node
//! kind. Every node carries a `payload` slot (the policy's annotation type)
//! plus its structural fields. Child references are `P::ExprRef` /
//! `P::StmtRef`, so the same node definitions serve owning, shared and
//! arena-indexed trees.
//!
//! Nodes are immutable once built; construction goes through a
//! [`NodeBuilder`](crate::build::NodeBuilder).

use crate::policy::Policy;
use crate::{Name, Token};

/// Kind tag for expression nodes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ExprKind {
    Binary,
    Unary,
    Grouping,
    Number,
    Str,
    Bool,
    Nil,
    Var,
    Assign,
    Call,
}

/// Kind tag for statement nodes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum StmtKind {
    Expression,
    Print,
    VarDecl,
    FunDecl,
    Block,
    If,
    While,
    Return,
}

/// Binary operation: `lhs op rhs`. Also carries `and`/`or` (short-circuit
/// behavior is the interpreter's concern) and the comma operator.
#[derive(Debug)]
pub struct BinaryExpr<P: Policy> {
    pub payload: P::Payload,
    pub lhs: P::ExprRef,
    pub rhs: P::ExprRef,
    pub op: Token,
}

/// Unary operation: `op operand` (`-` or `!`).
#[derive(Debug)]
pub struct UnaryExpr<P: Policy> {
    pub payload: P::Payload,
    pub operand: P::ExprRef,
    pub op: Token,
}

/// Parenthesized expression.
#[derive(Debug)]
pub struct GroupingExpr<P: Policy> {
    pub payload: P::Payload,
    pub expr: P::ExprRef,
}

/// Number literal.
#[derive(Debug)]
pub struct NumberExpr<P: Policy> {
    pub payload: P::Payload,
    pub value: f64,
}

/// String literal (interned, escapes already applied).
#[derive(Debug)]
pub struct StringExpr<P: Policy> {
    pub payload: P::Payload,
    pub value: Name,
}

/// Boolean literal.
#[derive(Debug)]
pub struct BoolExpr<P: Policy> {
    pub payload: P::Payload,
    pub value: bool,
}

/// The `nil` literal.
#[derive(Debug)]
pub struct NilExpr<P: Policy> {
    pub payload: P::Payload,
}

/// Variable reference.
#[derive(Debug)]
pub struct VarExpr<P: Policy> {
    pub payload: P::Payload,
    pub name: Name,
}

/// Assignment: `name = value`.
#[derive(Debug)]
pub struct AssignExpr<P: Policy> {
    pub payload: P::Payload,
    pub name: Name,
    pub value: P::ExprRef,
}

/// Call: `callee(args...)`.
#[derive(Debug)]
pub struct CallExpr<P: Policy> {
    pub payload: P::Payload,
    pub callee: P::ExprRef,
    pub args: Vec<P::ExprRef>,
}

/// Expression evaluated for its side effects.
#[derive(Debug)]
pub struct ExpressionStmt<P: Policy> {
    pub payload: P::Payload,
    pub expr: P::ExprRef,
}

/// `print expr;`
#[derive(Debug)]
pub struct PrintStmt<P: Policy> {
    pub payload: P::Payload,
    pub expr: P::ExprRef,
}

/// `var name [= init];`
#[derive(Debug)]
pub struct VarDecl<P: Policy> {
    pub payload: P::Payload,
    pub name: Name,
    pub init: Option<P::ExprRef>,
}

/// `fun name(params) { body }`
#[derive(Debug)]
pub struct FunDecl<P: Policy> {
    pub payload: P::Payload,
    pub name: Name,
    pub params: Vec<Name>,
    pub body: Vec<P::StmtRef>,
}

/// `{ statements }`
#[derive(Debug)]
pub struct BlockStmt<P: Policy> {
    pub payload: P::Payload,
    pub statements: Vec<P::StmtRef>,
}

/// `if (condition) then_branch [else else_branch]`
#[derive(Debug)]
pub struct IfStmt<P: Policy> {
    pub payload: P::Payload,
    pub condition: P::ExprRef,
    pub then_branch: P::StmtRef,
    pub else_branch: Option<P::StmtRef>,
}

/// `while (condition) body`
#[derive(Debug)]
pub struct WhileStmt<P: Policy> {
    pub payload: P::Payload,
    pub condition: P::ExprRef,
    pub body: P::StmtRef,
}

/// `return value;` — a bare `return;` stores a `nil` literal.
#[derive(Debug)]
pub struct ReturnStmt<P: Policy> {
    pub payload: P::Payload,
    pub value: P::ExprRef,
}

/// Expression union. Each concrete node belongs to exactly one variant.
#[derive(Debug)]
pub enum Expr<P: Policy> {
    Binary(BinaryExpr<P>),
    Unary(UnaryExpr<P>),
    Grouping(GroupingExpr<P>),
    Number(NumberExpr<P>),
    Str(StringExpr<P>),
    Bool(BoolExpr<P>),
    Nil(NilExpr<P>),
    Var(VarExpr<P>),
    Assign(AssignExpr<P>),
    Call(CallExpr<P>),
}

impl<P: Policy> Expr<P> {
    /// The kind tag of this node.
    pub fn kind(&self) -> ExprKind {
        match self {
            Expr::Binary(_) => ExprKind::Binary,
            Expr::Unary(_) => ExprKind::Unary,
            Expr::Grouping(_) => ExprKind::Grouping,
            Expr::Number(_) => ExprKind::Number,
            Expr::Str(_) => ExprKind::Str,
            Expr::Bool(_) => ExprKind::Bool,
            Expr::Nil(_) => ExprKind::Nil,
            Expr::Var(_) => ExprKind::Var,
            Expr::Assign(_) => ExprKind::Assign,
            Expr::Call(_) => ExprKind::Call,
        }
    }
}

/// Statement union.
#[derive(Debug)]
pub enum Stmt<P: Policy> {
    Expression(ExpressionStmt<P>),
    Print(PrintStmt<P>),
    VarDecl(VarDecl<P>),
    FunDecl(FunDecl<P>),
    Block(BlockStmt<P>),
    If(IfStmt<P>),
    While(WhileStmt<P>),
    Return(ReturnStmt<P>),
}

impl<P: Policy> Stmt<P> {
    /// The kind tag of this node.
    pub fn kind(&self) -> StmtKind {
        match self {
            Stmt::Expression(_) => StmtKind::Expression,
            Stmt::Print(_) => StmtKind::Print,
            Stmt::VarDecl(_) => StmtKind::VarDecl,
            Stmt::FunDecl(_) => StmtKind::FunDecl,
            Stmt::Block(_) => StmtKind::Block,
            Stmt::If(_) => StmtKind::If,
            Stmt::While(_) => StmtKind::While,
            Stmt::Return(_) => StmtKind::Return,
        }
    }
}

/// Root of a parsed translation unit: the top-level statements in order.
#[derive(Debug, Default)]
pub struct TranslationUnit<P: Policy> {
    pub statements: Vec<P::StmtRef>,
}

impl<P: Policy> TranslationUnit<P> {
    /// An empty unit.
    pub fn new() -> Self {
        TranslationUnit {
            statements: Vec::new(),
        }
    }
}
