//! Path Evaluation Engine
//!
//! Drives a node-set through a compiled pipeline against a document. Each
//! stage keeps the order produced by its predecessor, so results come out
//! in document order for every supported operator.

use super::compiler::{compile, CompiledPath};
use super::operator::{NodeSet, Op};
use crate::dom::{DocumentAccess, NodeId};
use crate::error::{PathError, Result};

/// Evaluate a compiled path from `context`
#[must_use = "path evaluation result should be used"]
pub fn evaluate<D: DocumentAccess + ?Sized>(
    doc: &D,
    path: &CompiledPath,
    context: NodeId,
) -> Result<NodeSet> {
    if !doc.contains(context) {
        return Err(PathError::InvalidNode(context));
    }
    let result = run_pipeline(doc, path.ops(), context)?;
    tracing::trace!(
        expression = path.expression(),
        stages = path.len(),
        matched = result.len(),
        "path evaluated"
    );
    Ok(result)
}

/// Evaluate a compiled path and return the first match.
///
/// The whole pipeline runs before the head is taken; there is no early exit
/// once a first candidate is known.
#[must_use = "path evaluation result should be used"]
pub fn evaluate_first<D: DocumentAccess + ?Sized>(
    doc: &D,
    path: &CompiledPath,
    context: NodeId,
) -> Result<Option<NodeId>> {
    Ok(evaluate(doc, path, context)?.into_iter().next())
}

/// Compile and evaluate an expression in one call
#[must_use = "path evaluation result should be used"]
pub fn evaluate_str<D: DocumentAccess + ?Sized>(
    doc: &D,
    expression: &str,
    context: NodeId,
) -> Result<NodeSet> {
    evaluate(doc, &compile(expression), context)
}

/// Compile an expression and return its first match from `context`
#[must_use = "path evaluation result should be used"]
pub fn evaluate_first_str<D: DocumentAccess + ?Sized>(
    doc: &D,
    expression: &str,
    context: NodeId,
) -> Result<Option<NodeId>> {
    evaluate_first(doc, &compile(expression), context)
}

/// Run `ops` in order, narrowing or expanding the candidate set at each stage
pub(crate) fn run_pipeline<D: DocumentAccess + ?Sized>(
    doc: &D,
    ops: &[Op],
    context: NodeId,
) -> Result<NodeSet> {
    let mut candidates: NodeSet = vec![context];

    for op in ops {
        let mut next = Vec::with_capacity(candidates.len());
        for &node in &candidates {
            // Failing a step is ordinary filtering, not an error
            if op.matches(doc, node)? {
                next.extend(op.expand(doc, node)?);
            }
        }
        candidates = next;
    }

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{DocumentBuilder, XmlDocument, DOCUMENT_NODE_ID};

    fn doc() -> XmlDocument {
        let mut b = DocumentBuilder::new();
        b.start_element("root")
            .start_element("a")
            .start_element("b")
            .attribute("id", "1")
            .end_element()
            .end_element()
            .start_element("b")
            .attribute("id", "2")
            .end_element()
            .end_element();
        b.finish()
    }

    #[test]
    fn test_simple_path() {
        let doc = doc();
        let result = evaluate_str(&doc, "/root/a/b", DOCUMENT_NODE_ID).unwrap();
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_descendant() {
        let doc = doc();
        let result = evaluate_str(&doc, "//b", DOCUMENT_NODE_ID).unwrap();
        assert_eq!(result.len(), 2);
        assert!(result[0] < result[1]);
    }

    #[test]
    fn test_relative_from_element() {
        let doc = doc();
        let root = doc.root_element_id().unwrap();
        let result = evaluate_str(&doc, "b/@id", root).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(doc.node_value(result[0]), Some("2"));
    }

    #[test]
    fn test_root_anchor_from_non_root_context() {
        let doc = doc();
        let root = doc.root_element_id().unwrap();
        assert!(evaluate_str(&doc, "/root", root).unwrap().is_empty());
    }

    #[test]
    fn test_predicate() {
        let doc = doc();
        let result = evaluate_str(&doc, "//b[@id > 1]", DOCUMENT_NODE_ID).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(doc.get_attribute(result[0], "id"), Some("2"));
    }

    #[test]
    fn test_first() {
        let doc = doc();
        let first = evaluate_first_str(&doc, "//b", DOCUMENT_NODE_ID).unwrap();
        let all = evaluate_str(&doc, "//b", DOCUMENT_NODE_ID).unwrap();
        assert_eq!(first, Some(all[0]));
        assert_eq!(evaluate_first_str(&doc, "//zzz", DOCUMENT_NODE_ID), Ok(None));
    }

    #[test]
    fn test_deferred_syntax_error() {
        let doc = doc();
        let compiled = compile("/root/a[");
        let err = evaluate(&doc, &compiled, DOCUMENT_NODE_ID).unwrap_err();
        assert!(matches!(err, PathError::Syntax { .. }));
        assert!(!err.message().is_empty());
        assert!(evaluate_first(&doc, &compiled, DOCUMENT_NODE_ID).is_err());
    }

    #[test]
    fn test_invalid_context() {
        let doc = doc();
        assert_eq!(
            evaluate_str(&doc, "/", 10_000),
            Err(PathError::InvalidNode(10_000))
        );
    }

    #[test]
    fn test_repeatable() {
        let doc = doc();
        let compiled = compile("//b/@id");
        let first = evaluate(&doc, &compiled, DOCUMENT_NODE_ID).unwrap();
        let second = evaluate(&doc, &compiled, DOCUMENT_NODE_ID).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }
}
