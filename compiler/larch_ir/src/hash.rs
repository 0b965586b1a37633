//! Structural node hashing.
//!
//! Each node kind combines the hashes of its children with its own scalar
//! fields under a per-kind seed, so `-x` and `(x)` never share a hash even
//! though both wrap a single child. Source positions are deliberately left
//! out: two occurrences of `1 + 2` on different lines hash the same, which
//! is what lets the deduplicating builder merge them.
//!
//! Operator tokens contribute only their kind, not their lexeme or
//! position.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::token::TokenKind;
use crate::Name;

/// Structural hash of a subtree.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub struct NodeHash(u64);

impl NodeHash {
    pub const fn new(raw: u64) -> Self {
        NodeHash(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

// Per-kind seeds. Arbitrary but fixed: they only need to differ from each
// other so single-child kinds stay distinguishable.
mod seed {
    pub const BINARY: u64 = 0xdf19_dc17_3a8e_41a2;
    pub const UNARY: u64 = 0x80cb_5a2b_f8b9_530d;
    pub const GROUPING: u64 = 0x7def_d7ff_fbea_69b0;
    pub const STRING: u64 = 0xca57_01cb_b09a_8b67;
    pub const NUMBER: u64 = 0x966b_69e4_958b_14b4;
    pub const BOOL: u64 = 0x80b6_38fc_880e_8b96;
    pub const NIL: u64 = 0xce50_7b06_2704_1fb7;
    pub const VAR: u64 = 0x1336_42d7_af86_ffa1;
    pub const ASSIGN: u64 = 0x5338_a440_b013_71e1;
    pub const CALL: u64 = 0x2193_2106_6ff0_25b2;

    pub const EXPRESSION: u64 = 0x4239_3e68_7862_b5db;
    pub const PRINT: u64 = 0x71e0_36f6_91c8_6a45;
    pub const VAR_DECL: u64 = 0xab68_e3a5_8d3d_1488;
    pub const FUN_DECL: u64 = 0xbff0_16c6_52ab_530f;
    pub const BLOCK: u64 = 0x67e5_5544_689b_663b;
    pub const IF: u64 = 0x8240_8d58_9ed2_6d2c;
    pub const WHILE: u64 = 0x7d49_3bf5_efc2_588b;
    pub const RETURN: u64 = 0x8fcc_1111_60a8_cd3a;
}

fn seeded(seed: u64) -> FxHasher {
    let mut hasher = FxHasher::default();
    hasher.write_u64(seed);
    hasher
}

fn finish(hasher: FxHasher) -> NodeHash {
    NodeHash(hasher.finish())
}

pub fn binary(lhs: NodeHash, rhs: NodeHash, op: TokenKind) -> NodeHash {
    let mut h = seeded(seed::BINARY);
    h.write_u64(lhs.0);
    h.write_u64(rhs.0);
    op.hash(&mut h);
    finish(h)
}

pub fn unary(operand: NodeHash, op: TokenKind) -> NodeHash {
    let mut h = seeded(seed::UNARY);
    h.write_u64(operand.0);
    op.hash(&mut h);
    finish(h)
}

pub fn grouping(expr: NodeHash) -> NodeHash {
    let mut h = seeded(seed::GROUPING);
    h.write_u64(expr.0);
    finish(h)
}

pub fn number(value: f64) -> NodeHash {
    let mut h = seeded(seed::NUMBER);
    h.write_u64(value.to_bits());
    finish(h)
}

pub fn string(value: Name) -> NodeHash {
    let mut h = seeded(seed::STRING);
    h.write_u32(value.raw());
    finish(h)
}

pub fn bool_lit(value: bool) -> NodeHash {
    let mut h = seeded(seed::BOOL);
    h.write_u8(value as u8);
    finish(h)
}

pub fn nil() -> NodeHash {
    finish(seeded(seed::NIL))
}

pub fn var(name: Name) -> NodeHash {
    let mut h = seeded(seed::VAR);
    h.write_u32(name.raw());
    finish(h)
}

pub fn assign(name: Name, value: NodeHash) -> NodeHash {
    let mut h = seeded(seed::ASSIGN);
    h.write_u32(name.raw());
    h.write_u64(value.0);
    finish(h)
}

pub fn call(callee: NodeHash, args: &[NodeHash]) -> NodeHash {
    let mut h = seeded(seed::CALL);
    h.write_u64(callee.0);
    h.write_usize(args.len());
    for arg in args {
        h.write_u64(arg.0);
    }
    finish(h)
}

pub fn expression(expr: NodeHash) -> NodeHash {
    let mut h = seeded(seed::EXPRESSION);
    h.write_u64(expr.0);
    finish(h)
}

pub fn print(expr: NodeHash) -> NodeHash {
    let mut h = seeded(seed::PRINT);
    h.write_u64(expr.0);
    finish(h)
}

pub fn var_decl(name: Name, init: Option<NodeHash>) -> NodeHash {
    let mut h = seeded(seed::VAR_DECL);
    h.write_u32(name.raw());
    match init {
        Some(hash) => {
            h.write_u8(1);
            h.write_u64(hash.0);
        }
        None => h.write_u8(0),
    }
    finish(h)
}

pub fn fun_decl(name: Name, params: &[Name], body: &[NodeHash]) -> NodeHash {
    let mut h = seeded(seed::FUN_DECL);
    h.write_u32(name.raw());
    h.write_usize(params.len());
    for param in params {
        h.write_u32(param.raw());
    }
    h.write_usize(body.len());
    for stmt in body {
        h.write_u64(stmt.0);
    }
    finish(h)
}

pub fn block(statements: &[NodeHash]) -> NodeHash {
    let mut h = seeded(seed::BLOCK);
    h.write_usize(statements.len());
    for stmt in statements {
        h.write_u64(stmt.0);
    }
    finish(h)
}

pub fn if_stmt(condition: NodeHash, then_branch: NodeHash, else_branch: Option<NodeHash>) -> NodeHash {
    let mut h = seeded(seed::IF);
    h.write_u64(condition.0);
    h.write_u64(then_branch.0);
    match else_branch {
        Some(hash) => {
            h.write_u8(1);
            h.write_u64(hash.0);
        }
        None => h.write_u8(0),
    }
    finish(h)
}

pub fn while_stmt(condition: NodeHash, body: NodeHash) -> NodeHash {
    let mut h = seeded(seed::WHILE);
    h.write_u64(condition.0);
    h.write_u64(body.0);
    finish(h)
}

pub fn return_stmt(value: NodeHash) -> NodeHash {
    let mut h = seeded(seed::RETURN);
    h.write_u64(value.0);
    finish(h)
}

#[cfg(test)]
mod tests;
