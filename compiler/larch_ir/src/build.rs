//! Uniform node construction.
//!
//! The parser builds trees through [`NodeBuilder`] and never names a
//! storage policy directly, so swapping `BoxedBuilder` for `DedupBuilder`
//! changes the tree's representation without touching the grammar code.
//!
//! Builder methods take children that were themselves produced by the same
//! builder, which keeps arena indices from crossing arenas by construction.

use rustc_hash::FxHashMap;

use crate::arena::{ExprIx, NodeArena, StmtIx};
use crate::hash::{self, NodeHash};
use crate::node::{
    AssignExpr, BinaryExpr, BlockStmt, BoolExpr, CallExpr, Expr, ExpressionStmt, FunDecl,
    GroupingExpr, IfStmt, NilExpr, NumberExpr, PrintStmt, ReturnStmt, Stmt, StringExpr, UnaryExpr,
    VarDecl, VarExpr, WhileStmt,
};
use crate::policy::{Boxed, Indexed, Payload, Policy, Shared};
use crate::{Name, Token};

pub type ExprRef<P> = <P as Policy>::ExprRef;
pub type StmtRef<P> = <P as Policy>::StmtRef;

/// One constructor per node kind, all returning the policy's reference
/// type.
pub trait NodeBuilder {
    type P: Policy;

    fn binary(&mut self, lhs: ExprRef<Self::P>, rhs: ExprRef<Self::P>, op: Token)
        -> ExprRef<Self::P>;
    fn unary(&mut self, operand: ExprRef<Self::P>, op: Token) -> ExprRef<Self::P>;
    fn grouping(&mut self, expr: ExprRef<Self::P>) -> ExprRef<Self::P>;
    fn number(&mut self, value: f64) -> ExprRef<Self::P>;
    fn string(&mut self, value: Name) -> ExprRef<Self::P>;
    fn bool_lit(&mut self, value: bool) -> ExprRef<Self::P>;
    fn nil(&mut self) -> ExprRef<Self::P>;
    fn var(&mut self, name: Name) -> ExprRef<Self::P>;
    fn assign(&mut self, name: Name, value: ExprRef<Self::P>) -> ExprRef<Self::P>;
    fn call(&mut self, callee: ExprRef<Self::P>, args: Vec<ExprRef<Self::P>>) -> ExprRef<Self::P>;

    fn expression_stmt(&mut self, expr: ExprRef<Self::P>) -> StmtRef<Self::P>;
    fn print_stmt(&mut self, expr: ExprRef<Self::P>) -> StmtRef<Self::P>;
    fn var_decl(&mut self, name: Name, init: Option<ExprRef<Self::P>>) -> StmtRef<Self::P>;
    fn fun_decl(
        &mut self,
        name: Name,
        params: Vec<Name>,
        body: Vec<StmtRef<Self::P>>,
    ) -> StmtRef<Self::P>;
    fn block(&mut self, statements: Vec<StmtRef<Self::P>>) -> StmtRef<Self::P>;
    fn if_stmt(
        &mut self,
        condition: ExprRef<Self::P>,
        then_branch: StmtRef<Self::P>,
        else_branch: Option<StmtRef<Self::P>>,
    ) -> StmtRef<Self::P>;
    fn while_stmt(&mut self, condition: ExprRef<Self::P>, body: StmtRef<Self::P>)
        -> StmtRef<Self::P>;
    fn return_stmt(&mut self, value: ExprRef<Self::P>) -> StmtRef<Self::P>;
}

macro_rules! ptr_builder {
    ($builder:ident, $policy:ident, $wrap:path) => {
        impl<PL: Payload> NodeBuilder for $builder<PL> {
            type P = $policy<PL>;

            fn binary(
                &mut self,
                lhs: ExprRef<Self::P>,
                rhs: ExprRef<Self::P>,
                op: Token,
            ) -> ExprRef<Self::P> {
                $wrap(Expr::Binary(BinaryExpr {
                    payload: PL::default(),
                    lhs,
                    rhs,
                    op,
                }))
            }

            fn unary(&mut self, operand: ExprRef<Self::P>, op: Token) -> ExprRef<Self::P> {
                $wrap(Expr::Unary(UnaryExpr {
                    payload: PL::default(),
                    operand,
                    op,
                }))
            }

            fn grouping(&mut self, expr: ExprRef<Self::P>) -> ExprRef<Self::P> {
                $wrap(Expr::Grouping(GroupingExpr {
                    payload: PL::default(),
                    expr,
                }))
            }

            fn number(&mut self, value: f64) -> ExprRef<Self::P> {
                $wrap(Expr::Number(NumberExpr {
                    payload: PL::default(),
                    value,
                }))
            }

            fn string(&mut self, value: Name) -> ExprRef<Self::P> {
                $wrap(Expr::Str(StringExpr {
                    payload: PL::default(),
                    value,
                }))
            }

            fn bool_lit(&mut self, value: bool) -> ExprRef<Self::P> {
                $wrap(Expr::Bool(BoolExpr {
                    payload: PL::default(),
                    value,
                }))
            }

            fn nil(&mut self) -> ExprRef<Self::P> {
                $wrap(Expr::Nil(NilExpr {
                    payload: PL::default(),
                }))
            }

            fn var(&mut self, name: Name) -> ExprRef<Self::P> {
                $wrap(Expr::Var(VarExpr {
                    payload: PL::default(),
                    name,
                }))
            }

            fn assign(&mut self, name: Name, value: ExprRef<Self::P>) -> ExprRef<Self::P> {
                $wrap(Expr::Assign(AssignExpr {
                    payload: PL::default(),
                    name,
                    value,
                }))
            }

            fn call(
                &mut self,
                callee: ExprRef<Self::P>,
                args: Vec<ExprRef<Self::P>>,
            ) -> ExprRef<Self::P> {
                $wrap(Expr::Call(CallExpr {
                    payload: PL::default(),
                    callee,
                    args,
                }))
            }

            fn expression_stmt(&mut self, expr: ExprRef<Self::P>) -> StmtRef<Self::P> {
                $wrap(Stmt::Expression(ExpressionStmt {
                    payload: PL::default(),
                    expr,
                }))
            }

            fn print_stmt(&mut self, expr: ExprRef<Self::P>) -> StmtRef<Self::P> {
                $wrap(Stmt::Print(PrintStmt {
                    payload: PL::default(),
                    expr,
                }))
            }

            fn var_decl(&mut self, name: Name, init: Option<ExprRef<Self::P>>) -> StmtRef<Self::P> {
                $wrap(Stmt::VarDecl(VarDecl {
                    payload: PL::default(),
                    name,
                    init,
                }))
            }

            fn fun_decl(
                &mut self,
                name: Name,
                params: Vec<Name>,
                body: Vec<StmtRef<Self::P>>,
            ) -> StmtRef<Self::P> {
                $wrap(Stmt::FunDecl(FunDecl {
                    payload: PL::default(),
                    name,
                    params,
                    body,
                }))
            }

            fn block(&mut self, statements: Vec<StmtRef<Self::P>>) -> StmtRef<Self::P> {
                $wrap(Stmt::Block(BlockStmt {
                    payload: PL::default(),
                    statements,
                }))
            }

            fn if_stmt(
                &mut self,
                condition: ExprRef<Self::P>,
                then_branch: StmtRef<Self::P>,
                else_branch: Option<StmtRef<Self::P>>,
            ) -> StmtRef<Self::P> {
                $wrap(Stmt::If(IfStmt {
                    payload: PL::default(),
                    condition,
                    then_branch,
                    else_branch,
                }))
            }

            fn while_stmt(
                &mut self,
                condition: ExprRef<Self::P>,
                body: StmtRef<Self::P>,
            ) -> StmtRef<Self::P> {
                $wrap(Stmt::While(WhileStmt {
                    payload: PL::default(),
                    condition,
                    body,
                }))
            }

            fn return_stmt(&mut self, value: ExprRef<Self::P>) -> StmtRef<Self::P> {
                $wrap(Stmt::Return(ReturnStmt {
                    payload: PL::default(),
                    value,
                }))
            }
        }
    };
}

/// Builds exclusively owned trees. Stateless.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoxedBuilder<PL: Payload = ()>(std::marker::PhantomData<PL>);

impl<PL: Payload> BoxedBuilder<PL> {
    pub fn new() -> Self {
        BoxedBuilder(std::marker::PhantomData)
    }
}

/// Builds reference-counted trees. Stateless.
#[derive(Clone, Copy, Debug, Default)]
pub struct SharedBuilder<PL: Payload = ()>(std::marker::PhantomData<PL>);

impl<PL: Payload> SharedBuilder<PL> {
    pub fn new() -> Self {
        SharedBuilder(std::marker::PhantomData)
    }
}

ptr_builder!(BoxedBuilder, Boxed, Box::new);
ptr_builder!(SharedBuilder, Shared, std::rc::Rc::new);

/// Builds arena-resident trees; owns the arena it fills.
#[derive(Debug, Default)]
pub struct ArenaBuilder<PL: Payload = ()> {
    arena: NodeArena<PL>,
}

impl<PL: Payload> ArenaBuilder<PL> {
    pub fn new() -> Self {
        ArenaBuilder::default()
    }

    /// Borrow the arena, typically as a dispatch resolver.
    pub fn arena(&self) -> &NodeArena<PL> {
        &self.arena
    }

    /// Give up the arena once building is done.
    pub fn into_arena(self) -> NodeArena<PL> {
        self.arena
    }
}

impl<PL: Payload> NodeBuilder for ArenaBuilder<PL> {
    type P = Indexed<PL>;

    fn binary(&mut self, lhs: ExprIx, rhs: ExprIx, op: Token) -> ExprIx {
        self.arena.push_binary(BinaryExpr {
            payload: PL::default(),
            lhs,
            rhs,
            op,
        })
    }

    fn unary(&mut self, operand: ExprIx, op: Token) -> ExprIx {
        self.arena.push_unary(UnaryExpr {
            payload: PL::default(),
            operand,
            op,
        })
    }

    fn grouping(&mut self, expr: ExprIx) -> ExprIx {
        self.arena.push_grouping(GroupingExpr {
            payload: PL::default(),
            expr,
        })
    }

    fn number(&mut self, value: f64) -> ExprIx {
        self.arena.push_number(NumberExpr {
            payload: PL::default(),
            value,
        })
    }

    fn string(&mut self, value: Name) -> ExprIx {
        self.arena.push_string(StringExpr {
            payload: PL::default(),
            value,
        })
    }

    fn bool_lit(&mut self, value: bool) -> ExprIx {
        self.arena.push_bool(BoolExpr {
            payload: PL::default(),
            value,
        })
    }

    fn nil(&mut self) -> ExprIx {
        self.arena.push_nil(NilExpr {
            payload: PL::default(),
        })
    }

    fn var(&mut self, name: Name) -> ExprIx {
        self.arena.push_var(VarExpr {
            payload: PL::default(),
            name,
        })
    }

    fn assign(&mut self, name: Name, value: ExprIx) -> ExprIx {
        self.arena.push_assign(AssignExpr {
            payload: PL::default(),
            name,
            value,
        })
    }

    fn call(&mut self, callee: ExprIx, args: Vec<ExprIx>) -> ExprIx {
        self.arena.push_call(CallExpr {
            payload: PL::default(),
            callee,
            args,
        })
    }

    fn expression_stmt(&mut self, expr: ExprIx) -> StmtIx {
        self.arena.push_expression(ExpressionStmt {
            payload: PL::default(),
            expr,
        })
    }

    fn print_stmt(&mut self, expr: ExprIx) -> StmtIx {
        self.arena.push_print(PrintStmt {
            payload: PL::default(),
            expr,
        })
    }

    fn var_decl(&mut self, name: Name, init: Option<ExprIx>) -> StmtIx {
        self.arena.push_var_decl(VarDecl {
            payload: PL::default(),
            name,
            init,
        })
    }

    fn fun_decl(&mut self, name: Name, params: Vec<Name>, body: Vec<StmtIx>) -> StmtIx {
        self.arena.push_fun_decl(FunDecl {
            payload: PL::default(),
            name,
            params,
            body,
        })
    }

    fn block(&mut self, statements: Vec<StmtIx>) -> StmtIx {
        self.arena.push_block(BlockStmt {
            payload: PL::default(),
            statements,
        })
    }

    fn if_stmt(
        &mut self,
        condition: ExprIx,
        then_branch: StmtIx,
        else_branch: Option<StmtIx>,
    ) -> StmtIx {
        self.arena.push_if(IfStmt {
            payload: PL::default(),
            condition,
            then_branch,
            else_branch,
        })
    }

    fn while_stmt(&mut self, condition: ExprIx, body: StmtIx) -> StmtIx {
        self.arena.push_while(WhileStmt {
            payload: PL::default(),
            condition,
            body,
        })
    }

    fn return_stmt(&mut self, value: ExprIx) -> StmtIx {
        self.arena.push_return(ReturnStmt {
            payload: PL::default(),
            value,
        })
    }
}

/// Arena builder that hash-conses: structurally identical subtrees share
/// one slot.
///
/// Every node's payload is its structural hash; a new node's hash is
/// computed from its children's payloads before insertion, and a hash-map
/// hit returns the existing index instead of pushing. Kind seeds keep
/// hashes of different kinds apart, so a hit's kind always matches the
/// kind being built.
///
/// Distinct subtrees whose hashes collide would be merged silently. With
/// 64-bit structural hashes that is accepted rather than paying for a full
/// equality walk on every hit.
#[derive(Debug, Default)]
pub struct DedupBuilder {
    arena: NodeArena<NodeHash>,
    expr_slots: FxHashMap<NodeHash, ExprIx>,
    stmt_slots: FxHashMap<NodeHash, StmtIx>,
    hits: u64,
}

impl DedupBuilder {
    pub fn new() -> Self {
        DedupBuilder::default()
    }

    pub fn arena(&self) -> &NodeArena<NodeHash> {
        &self.arena
    }

    pub fn into_arena(self) -> NodeArena<NodeHash> {
        self.arena
    }

    /// How many constructions were answered from the map.
    pub fn dedup_hits(&self) -> u64 {
        self.hits
    }

    fn expr_hash(&self, ix: ExprIx) -> NodeHash {
        *self.arena.expr_payload(ix)
    }

    fn stmt_hash(&self, ix: StmtIx) -> NodeHash {
        *self.arena.stmt_payload(ix)
    }

    fn intern_expr(
        &mut self,
        hash: NodeHash,
        push: impl FnOnce(&mut NodeArena<NodeHash>) -> ExprIx,
    ) -> ExprIx {
        if let Some(&ix) = self.expr_slots.get(&hash) {
            self.hits += 1;
            return ix;
        }
        let ix = push(&mut self.arena);
        self.expr_slots.insert(hash, ix);
        ix
    }

    fn intern_stmt(
        &mut self,
        hash: NodeHash,
        push: impl FnOnce(&mut NodeArena<NodeHash>) -> StmtIx,
    ) -> StmtIx {
        if let Some(&ix) = self.stmt_slots.get(&hash) {
            self.hits += 1;
            return ix;
        }
        let ix = push(&mut self.arena);
        self.stmt_slots.insert(hash, ix);
        ix
    }
}

impl NodeBuilder for DedupBuilder {
    type P = Indexed<NodeHash>;

    fn binary(&mut self, lhs: ExprIx, rhs: ExprIx, op: Token) -> ExprIx {
        let hash = hash::binary(self.expr_hash(lhs), self.expr_hash(rhs), op.kind);
        self.intern_expr(hash, |arena| {
            arena.push_binary(BinaryExpr {
                payload: hash,
                lhs,
                rhs,
                op,
            })
        })
    }

    fn unary(&mut self, operand: ExprIx, op: Token) -> ExprIx {
        let hash = hash::unary(self.expr_hash(operand), op.kind);
        self.intern_expr(hash, |arena| {
            arena.push_unary(UnaryExpr {
                payload: hash,
                operand,
                op,
            })
        })
    }

    fn grouping(&mut self, expr: ExprIx) -> ExprIx {
        let hash = hash::grouping(self.expr_hash(expr));
        self.intern_expr(hash, |arena| {
            arena.push_grouping(GroupingExpr {
                payload: hash,
                expr,
            })
        })
    }

    fn number(&mut self, value: f64) -> ExprIx {
        let hash = hash::number(value);
        self.intern_expr(hash, |arena| {
            arena.push_number(NumberExpr {
                payload: hash,
                value,
            })
        })
    }

    fn string(&mut self, value: Name) -> ExprIx {
        let hash = hash::string(value);
        self.intern_expr(hash, |arena| {
            arena.push_string(StringExpr {
                payload: hash,
                value,
            })
        })
    }

    fn bool_lit(&mut self, value: bool) -> ExprIx {
        let hash = hash::bool_lit(value);
        self.intern_expr(hash, |arena| {
            arena.push_bool(BoolExpr {
                payload: hash,
                value,
            })
        })
    }

    fn nil(&mut self) -> ExprIx {
        let hash = hash::nil();
        self.intern_expr(hash, |arena| arena.push_nil(NilExpr { payload: hash }))
    }

    fn var(&mut self, name: Name) -> ExprIx {
        let hash = hash::var(name);
        self.intern_expr(hash, |arena| arena.push_var(VarExpr {
            payload: hash,
            name,
        }))
    }

    fn assign(&mut self, name: Name, value: ExprIx) -> ExprIx {
        let hash = hash::assign(name, self.expr_hash(value));
        self.intern_expr(hash, |arena| {
            arena.push_assign(AssignExpr {
                payload: hash,
                name,
                value,
            })
        })
    }

    fn call(&mut self, callee: ExprIx, args: Vec<ExprIx>) -> ExprIx {
        let arg_hashes: Vec<NodeHash> = args.iter().map(|&arg| self.expr_hash(arg)).collect();
        let hash = hash::call(self.expr_hash(callee), &arg_hashes);
        self.intern_expr(hash, |arena| {
            arena.push_call(CallExpr {
                payload: hash,
                callee,
                args,
            })
        })
    }

    fn expression_stmt(&mut self, expr: ExprIx) -> StmtIx {
        let hash = hash::expression(self.expr_hash(expr));
        self.intern_stmt(hash, |arena| {
            arena.push_expression(ExpressionStmt {
                payload: hash,
                expr,
            })
        })
    }

    fn print_stmt(&mut self, expr: ExprIx) -> StmtIx {
        let hash = hash::print(self.expr_hash(expr));
        self.intern_stmt(hash, |arena| {
            arena.push_print(PrintStmt {
                payload: hash,
                expr,
            })
        })
    }

    fn var_decl(&mut self, name: Name, init: Option<ExprIx>) -> StmtIx {
        let hash = hash::var_decl(name, init.map(|ix| self.expr_hash(ix)));
        self.intern_stmt(hash, |arena| {
            arena.push_var_decl(VarDecl {
                payload: hash,
                name,
                init,
            })
        })
    }

    fn fun_decl(&mut self, name: Name, params: Vec<Name>, body: Vec<StmtIx>) -> StmtIx {
        let body_hashes: Vec<NodeHash> = body.iter().map(|&ix| self.stmt_hash(ix)).collect();
        let hash = hash::fun_decl(name, &params, &body_hashes);
        self.intern_stmt(hash, |arena| {
            arena.push_fun_decl(FunDecl {
                payload: hash,
                name,
                params,
                body,
            })
        })
    }

    fn block(&mut self, statements: Vec<StmtIx>) -> StmtIx {
        let stmt_hashes: Vec<NodeHash> =
            statements.iter().map(|&ix| self.stmt_hash(ix)).collect();
        let hash = hash::block(&stmt_hashes);
        self.intern_stmt(hash, |arena| {
            arena.push_block(BlockStmt {
                payload: hash,
                statements,
            })
        })
    }

    fn if_stmt(
        &mut self,
        condition: ExprIx,
        then_branch: StmtIx,
        else_branch: Option<StmtIx>,
    ) -> StmtIx {
        let hash = hash::if_stmt(
            self.expr_hash(condition),
            self.stmt_hash(then_branch),
            else_branch.map(|ix| self.stmt_hash(ix)),
        );
        self.intern_stmt(hash, |arena| {
            arena.push_if(IfStmt {
                payload: hash,
                condition,
                then_branch,
                else_branch,
            })
        })
    }

    fn while_stmt(&mut self, condition: ExprIx, body: StmtIx) -> StmtIx {
        let hash = hash::while_stmt(self.expr_hash(condition), self.stmt_hash(body));
        self.intern_stmt(hash, |arena| {
            arena.push_while(WhileStmt {
                payload: hash,
                condition,
                body,
            })
        })
    }

    fn return_stmt(&mut self, value: ExprIx) -> StmtIx {
        let hash = hash::return_stmt(self.expr_hash(value));
        self.intern_stmt(hash, |arena| {
            arena.push_return(ReturnStmt {
                payload: hash,
                value,
            })
        })
    }
}

#[cfg(test)]
mod tests;
