//! Tree-walking evaluation for Larch.
//!
//! The interpreter is one more visitor over the node model, so it runs on
//! any storage policy the parser happened to build: hand it the
//! translation unit and the policy's resolver (`()` for pointer trees, the
//! arena for indexed ones) and it executes the program.

mod error;
mod interp;
mod value;

pub use error::RuntimeError;
pub use interp::{Interpreter, PrintSink, Stdout};
pub use value::Value;
