//! Flat node storage for the [`Indexed`](crate::policy::Indexed) policy.
//!
//! Nodes live in per-kind vectors, so an index is a `(kind, offset)` pair
//! rather than a position in one mixed pool. Indices carry no ownership:
//! the arena must outlive every index into it, and several indices may
//! name the same slot (the deduplicating builder hands out exactly that).

use std::fmt;

use crate::node::{
    AssignExpr, BinaryExpr, BlockStmt, BoolExpr, CallExpr, ExprKind, ExpressionStmt, FunDecl,
    GroupingExpr, IfStmt, NilExpr, NumberExpr, PrintStmt, ReturnStmt, StmtKind, StringExpr,
    UnaryExpr, VarDecl, VarExpr, WhileStmt,
};
use crate::policy::{Indexed, Payload};

/// Index of an expression node: kind tag plus offset into that kind's pool.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExprIx {
    kind: ExprKind,
    raw: u32,
}

impl ExprIx {
    pub(crate) fn new(kind: ExprKind, raw: u32) -> Self {
        ExprIx { kind, raw }
    }

    /// Kind of the node this index names.
    #[inline]
    pub fn kind(self) -> ExprKind {
        self.kind
    }

    /// Offset within the kind's pool.
    #[inline]
    pub fn raw(self) -> u32 {
        self.raw
    }
}

impl fmt::Debug for ExprIx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}#{}", self.kind, self.raw)
    }
}

/// Index of a statement node.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct StmtIx {
    kind: StmtKind,
    raw: u32,
}

impl StmtIx {
    pub(crate) fn new(kind: StmtKind, raw: u32) -> Self {
        StmtIx { kind, raw }
    }

    /// Kind of the node this index names.
    #[inline]
    pub fn kind(self) -> StmtKind {
        self.kind
    }

    /// Offset within the kind's pool.
    #[inline]
    pub fn raw(self) -> u32 {
        self.raw
    }
}

impl fmt::Debug for StmtIx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}#{}", self.kind, self.raw)
    }
}

/// Per-kind node pools backing index-policy trees.
///
/// Push methods append and return the new node's index; getters panic on an
/// index whose kind does not match the pool, which only happens with an
/// index forged for a different arena.
#[derive(Debug, Default)]
pub struct NodeArena<PL: Payload = ()> {
    binaries: Vec<BinaryExpr<Indexed<PL>>>,
    unaries: Vec<UnaryExpr<Indexed<PL>>>,
    groupings: Vec<GroupingExpr<Indexed<PL>>>,
    numbers: Vec<NumberExpr<Indexed<PL>>>,
    strings: Vec<StringExpr<Indexed<PL>>>,
    bools: Vec<BoolExpr<Indexed<PL>>>,
    nils: Vec<NilExpr<Indexed<PL>>>,
    vars: Vec<VarExpr<Indexed<PL>>>,
    assigns: Vec<AssignExpr<Indexed<PL>>>,
    calls: Vec<CallExpr<Indexed<PL>>>,

    expressions: Vec<ExpressionStmt<Indexed<PL>>>,
    prints: Vec<PrintStmt<Indexed<PL>>>,
    var_decls: Vec<VarDecl<Indexed<PL>>>,
    fun_decls: Vec<FunDecl<Indexed<PL>>>,
    blocks: Vec<BlockStmt<Indexed<PL>>>,
    ifs: Vec<IfStmt<Indexed<PL>>>,
    whiles: Vec<WhileStmt<Indexed<PL>>>,
    returns: Vec<ReturnStmt<Indexed<PL>>>,
}

macro_rules! expr_pool {
    ($push:ident, $get:ident, $field:ident, $node:ident, $kind:ident) => {
        pub fn $push(&mut self, node: $node<Indexed<PL>>) -> ExprIx {
            let raw = self.$field.len() as u32;
            self.$field.push(node);
            ExprIx::new(ExprKind::$kind, raw)
        }

        pub fn $get(&self, ix: ExprIx) -> &$node<Indexed<PL>> {
            debug_assert_eq!(ix.kind(), ExprKind::$kind);
            &self.$field[ix.raw() as usize]
        }
    };
}

macro_rules! stmt_pool {
    ($push:ident, $get:ident, $field:ident, $node:ident, $kind:ident) => {
        pub fn $push(&mut self, node: $node<Indexed<PL>>) -> StmtIx {
            let raw = self.$field.len() as u32;
            self.$field.push(node);
            StmtIx::new(StmtKind::$kind, raw)
        }

        pub fn $get(&self, ix: StmtIx) -> &$node<Indexed<PL>> {
            debug_assert_eq!(ix.kind(), StmtKind::$kind);
            &self.$field[ix.raw() as usize]
        }
    };
}

impl<PL: Payload> NodeArena<PL> {
    pub fn new() -> Self {
        NodeArena::default()
    }

    expr_pool!(push_binary, binary, binaries, BinaryExpr, Binary);
    expr_pool!(push_unary, unary, unaries, UnaryExpr, Unary);
    expr_pool!(push_grouping, grouping, groupings, GroupingExpr, Grouping);
    expr_pool!(push_number, number, numbers, NumberExpr, Number);
    expr_pool!(push_string, string, strings, StringExpr, Str);
    expr_pool!(push_bool, bool_lit, bools, BoolExpr, Bool);
    expr_pool!(push_nil, nil, nils, NilExpr, Nil);
    expr_pool!(push_var, var, vars, VarExpr, Var);
    expr_pool!(push_assign, assign, assigns, AssignExpr, Assign);
    expr_pool!(push_call, call, calls, CallExpr, Call);

    stmt_pool!(
        push_expression,
        expression,
        expressions,
        ExpressionStmt,
        Expression
    );
    stmt_pool!(push_print, print, prints, PrintStmt, Print);
    stmt_pool!(push_var_decl, var_decl, var_decls, VarDecl, VarDecl);
    stmt_pool!(push_fun_decl, fun_decl, fun_decls, FunDecl, FunDecl);
    stmt_pool!(push_block, block, blocks, BlockStmt, Block);
    stmt_pool!(push_if, if_stmt, ifs, IfStmt, If);
    stmt_pool!(push_while, while_stmt, whiles, WhileStmt, While);
    stmt_pool!(push_return, return_stmt, returns, ReturnStmt, Return);

    /// Resolve an expression index to its union view.
    ///
    /// Allocates nothing; mainly useful to tests and debugging, hot paths go
    /// through per-kind getters via dispatch.
    pub fn expr(&self, ix: ExprIx) -> ExprView<'_, PL> {
        match ix.kind() {
            ExprKind::Binary => ExprView::Binary(self.binary(ix)),
            ExprKind::Unary => ExprView::Unary(self.unary(ix)),
            ExprKind::Grouping => ExprView::Grouping(self.grouping(ix)),
            ExprKind::Number => ExprView::Number(self.number(ix)),
            ExprKind::Str => ExprView::Str(self.string(ix)),
            ExprKind::Bool => ExprView::Bool(self.bool_lit(ix)),
            ExprKind::Nil => ExprView::Nil(self.nil(ix)),
            ExprKind::Var => ExprView::Var(self.var(ix)),
            ExprKind::Assign => ExprView::Assign(self.assign(ix)),
            ExprKind::Call => ExprView::Call(self.call(ix)),
        }
    }

    /// Payload of the expression node behind `ix`, whatever its kind.
    pub fn expr_payload(&self, ix: ExprIx) -> &PL {
        match ix.kind() {
            ExprKind::Binary => &self.binary(ix).payload,
            ExprKind::Unary => &self.unary(ix).payload,
            ExprKind::Grouping => &self.grouping(ix).payload,
            ExprKind::Number => &self.number(ix).payload,
            ExprKind::Str => &self.string(ix).payload,
            ExprKind::Bool => &self.bool_lit(ix).payload,
            ExprKind::Nil => &self.nil(ix).payload,
            ExprKind::Var => &self.var(ix).payload,
            ExprKind::Assign => &self.assign(ix).payload,
            ExprKind::Call => &self.call(ix).payload,
        }
    }

    /// Payload of the statement node behind `ix`, whatever its kind.
    pub fn stmt_payload(&self, ix: StmtIx) -> &PL {
        match ix.kind() {
            StmtKind::Expression => &self.expression(ix).payload,
            StmtKind::Print => &self.print(ix).payload,
            StmtKind::VarDecl => &self.var_decl(ix).payload,
            StmtKind::FunDecl => &self.fun_decl(ix).payload,
            StmtKind::Block => &self.block(ix).payload,
            StmtKind::If => &self.if_stmt(ix).payload,
            StmtKind::While => &self.while_stmt(ix).payload,
            StmtKind::Return => &self.return_stmt(ix).payload,
        }
    }

    /// Number of expression nodes stored, across all kinds.
    pub fn expr_count(&self) -> usize {
        self.binaries.len()
            + self.unaries.len()
            + self.groupings.len()
            + self.numbers.len()
            + self.strings.len()
            + self.bools.len()
            + self.nils.len()
            + self.vars.len()
            + self.assigns.len()
            + self.calls.len()
    }

    /// Number of statement nodes stored, across all kinds.
    pub fn stmt_count(&self) -> usize {
        self.expressions.len()
            + self.prints.len()
            + self.var_decls.len()
            + self.fun_decls.len()
            + self.blocks.len()
            + self.ifs.len()
            + self.whiles.len()
            + self.returns.len()
    }
}

/// Borrowed union view over an arena-resident expression node.
#[derive(Debug)]
pub enum ExprView<'a, PL: Payload> {
    Binary(&'a BinaryExpr<Indexed<PL>>),
    Unary(&'a UnaryExpr<Indexed<PL>>),
    Grouping(&'a GroupingExpr<Indexed<PL>>),
    Number(&'a NumberExpr<Indexed<PL>>),
    Str(&'a StringExpr<Indexed<PL>>),
    Bool(&'a BoolExpr<Indexed<PL>>),
    Nil(&'a NilExpr<Indexed<PL>>),
    Var(&'a VarExpr<Indexed<PL>>),
    Assign(&'a AssignExpr<Indexed<PL>>),
    Call(&'a CallExpr<Indexed<PL>>),
}
