//! Parallel Path Evaluation
//!
//! Uses Rayon to evaluate several paths, or one path from several context
//! nodes, at once. Documents are only read, so any `DocumentAccess + Sync`
//! tree can be shared across worker threads.

use rayon::prelude::*;

use crate::dom::{DocumentAccess, NodeId};
use crate::error::Result;
use crate::xpath::{evaluate, try_compile, CompiledPath, NodeSet};

/// Evaluate multiple compiled paths from the document node in parallel.
///
/// Results are returned in the same order as `paths`.
pub fn evaluate_parallel<D: DocumentAccess + Sync>(
    doc: &D,
    paths: &[&CompiledPath],
) -> Vec<Result<NodeSet>> {
    let root = doc.document_node_id();
    paths
        .par_iter()
        .map(|path| evaluate(doc, path, root))
        .collect()
}

/// Evaluate one path from each of `contexts` in parallel
pub fn evaluate_each<D: DocumentAccess + Sync>(
    doc: &D,
    path: &CompiledPath,
    contexts: &[NodeId],
) -> Result<Vec<NodeSet>> {
    contexts
        .par_iter()
        .map(|&context| evaluate(doc, path, context))
        .collect()
}

/// Parallel xmap - evaluate keyed expressions from the document node.
///
/// Every expression is compiled strictly, so a syntax error in any of them
/// fails the whole batch.
pub fn xmap<D: DocumentAccess + Sync>(
    doc: &D,
    queries: &[(&str, &str)], // (key, expression)
) -> Result<Vec<(String, NodeSet)>> {
    let root = doc.document_node_id();
    queries
        .par_iter()
        .map(|(key, expression)| {
            let compiled = try_compile(expression)?;
            evaluate(doc, &compiled, root).map(|nodes| (key.to_string(), nodes))
        })
        .collect()
}
