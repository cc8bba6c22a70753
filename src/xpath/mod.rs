//! Path Query Engine
//!
//! A compact XPath-like language over [`crate::dom`] trees:
//! - `/` root anchor, `name` and `*` child steps
//! - `//` descendant steps, `@` attribute steps
//! - `[sub-path relop literal]` predicates
//! - Compiled pipeline caching

pub mod cache;
pub mod compiler;
pub mod eval;
pub mod lexer;
pub mod operator;
pub mod parser;
pub mod value;

pub use cache::PathCache;
pub use compiler::{compile, try_compile, CompiledPath};
pub use eval::{evaluate, evaluate_first, evaluate_first_str, evaluate_str};
pub use operator::{NodeSet, Op};
pub use value::{Literal, RelOp};
