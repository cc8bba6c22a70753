//! RustyPath - Compiled path queries over arena XML trees
//!
//! Layers:
//! A: Arena document model (dom)
//! B: Lexer, parser and compiler to operator pipelines (xpath)
//! C: Set-at-a-time evaluation with deferred syntax errors (xpath::eval)
//! D: LRU cache of compiled pipelines (xpath::cache, engine)
//! E: Parallel evaluation (strategy::parallel, `parallel` feature)
//!
//! ```
//! use rustypath::{evaluate_str, DocumentBuilder, DOCUMENT_NODE_ID};
//!
//! let mut b = DocumentBuilder::new();
//! b.start_element("bookstore")
//!     .start_element("book")
//!     .attribute("category", "WEB")
//!     .text_element("price", "30")
//!     .end_element()
//!     .end_element();
//! let doc = b.finish();
//!
//! let books = evaluate_str(&doc, "//book[price > 20]", DOCUMENT_NODE_ID).unwrap();
//! assert_eq!(books.len(), 1);
//! assert_eq!(doc.get_attribute(books[0], "category"), Some("WEB"));
//! ```

pub mod dom;
pub mod engine;
pub mod error;
pub mod strategy;
pub mod xpath;

pub use dom::{
    node_string_value, DocumentAccess, DocumentBuilder, NodeId, NodeKind, XmlDocument,
    DOCUMENT_NODE_ID,
};
pub use engine::{EngineConfig, PathEngine};
pub use error::{PathError, Result};
pub use xpath::{
    compile, evaluate, evaluate_first, evaluate_first_str, evaluate_str, try_compile,
    CompiledPath, Literal, NodeSet, Op, PathCache, RelOp,
};

#[cfg(feature = "parallel")]
pub use strategy::{evaluate_each, evaluate_parallel, xmap};
