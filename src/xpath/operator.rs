//! Pipeline Operators
//!
//! Each operator answers two questions about a context node: whether the
//! step applies to it (`matches`) and which nodes it yields (`expand`).
//! The evaluator only calls `expand` on nodes that matched; `expand`
//! re-checks cheap preconditions where skipping them could yield wrong nodes.

use super::compiler::CompiledPath;
use super::eval::run_pipeline;
use super::value::{Literal, RelOp};
use crate::dom::{node_string_value, DocumentAccess, NodeId, NodeKind};
use crate::error::{PathError, Result};

/// Ordered node references into a document
pub type NodeSet = Vec<NodeId>;

/// One step of a compiled pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    /// Keep the context only if it is the document root
    Root,
    /// Every descendant of the context, pre-order, unfiltered
    DescendantOrSelf,
    /// Direct children, filtered by name unless None
    Children(Option<String>),
    /// Attribute nodes of an element, unfiltered
    AttributeAxis,
    /// Keep the context only if its name matches
    NamedFilter(String),
    /// Keep the context if any node of `path` compares true against `literal`
    Predicate {
        path: CompiledPath,
        op: RelOp,
        literal: Literal,
    },
    /// Deferred syntax error, raised whenever the operator is used
    Error { message: String, offset: usize },
}

impl Op {
    /// Whether this step applies to `node`
    pub fn matches<D: DocumentAccess + ?Sized>(&self, doc: &D, node: NodeId) -> Result<bool> {
        Ok(match self {
            Op::Root => doc.parent_of(node).is_none(),
            Op::DescendantOrSelf | Op::Children(_) => doc.has_children(node),
            Op::AttributeAxis => {
                doc.node_kind_of(node) == Some(NodeKind::Element) && doc.has_attributes(node)
            }
            Op::NamedFilter(name) => doc.node_name(node) == Some(name.as_str()),
            Op::Predicate { .. } => true,
            Op::Error { message, offset } => {
                return Err(PathError::syntax(message.clone(), *offset))
            }
        })
    }

    /// Candidate nodes this step yields for `node`.
    ///
    /// Precondition: `matches(doc, node)` returned true.
    pub fn expand<D: DocumentAccess + ?Sized>(&self, doc: &D, node: NodeId) -> Result<NodeSet> {
        match self {
            Op::Root => Ok(vec![node]),
            Op::DescendantOrSelf => Ok(doc.descendants_vec(node)),
            Op::Children(None) => Ok(doc.children_vec(node)),
            Op::Children(Some(name)) => Ok(doc
                .children_vec(node)
                .into_iter()
                .filter(|&child| doc.node_name(child) == Some(name.as_str()))
                .collect()),
            Op::AttributeAxis => Ok(doc.attributes_vec(node)),
            Op::NamedFilter(name) => {
                if doc.node_name(node) == Some(name.as_str()) {
                    Ok(vec![node])
                } else {
                    Ok(Vec::new())
                }
            }
            Op::Predicate { path, op, literal } => {
                let inner = run_pipeline(doc, path.ops(), node)?;
                // Any-match: stops at the first inner node that satisfies the comparison
                let satisfied = inner.into_iter().any(|candidate| {
                    literal.satisfied_by(&node_string_value(doc, candidate), *op)
                });
                if satisfied {
                    Ok(vec![node])
                } else {
                    Ok(Vec::new())
                }
            }
            Op::Error { message, offset } => Err(PathError::syntax(message.clone(), *offset)),
        }
    }

    /// Whether this is the deferred-error sentinel
    pub fn is_error(&self) -> bool {
        matches!(self, Op::Error { .. })
    }
}
