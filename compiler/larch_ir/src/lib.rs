//! Larch IR - Tree Data Model
//!
//! This crate contains the core data structures for the Larch front-end
//! kit:
//! - Names for interned identifiers and the interner behind them
//! - Tokens shared by the lexer and parser
//! - The node model (Expr, Stmt and their per-kind structs)
//! - Storage policies (boxed, shared, arena-indexed) and the arena
//! - Structural hashing and the hash-consing node builder
//! - Visitor traits plus the stock printer, hasher and copier visitors
//!
//! # Design Philosophy
//!
//! - **Intern strings**: identifiers and string literals become `Name(u32)`
//! - **One node model, many layouts**: node structs are generic over a
//!   [`Policy`] that decides how children are referenced and resolved
//! - **Construction behind a trait**: parsers call a [`NodeBuilder`] and
//!   never commit to a layout
//!
//! Types that contain floats store them as `u64` bits wherever `Eq`/`Hash`
//! is needed.

mod arena;
pub mod build;
pub mod hash;
mod interner;
mod name;
pub mod node;
mod policy;
mod token;
pub mod visit;

pub use arena::{ExprIx, ExprView, NodeArena, StmtIx};
pub use build::{ArenaBuilder, BoxedBuilder, DedupBuilder, NodeBuilder, SharedBuilder};
pub use hash::NodeHash;
pub use interner::{SharedInterner, StringInterner};
pub use name::Name;
pub use node::{Expr, ExprKind, Stmt, StmtKind, TranslationUnit};
pub use policy::{Boxed, Indexed, Payload, Policy, Shared};
pub use token::{Token, TokenKind};
pub use visit::{walk_expr, walk_stmt, ExprVisitor, StmtVisitor};
