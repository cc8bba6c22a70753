//! DOM Module - Arena-based tree model
//!
//! Implements the tree the path engine queries:
//! - Arena allocation for nodes
//! - NodeId (u32) indices for cache-friendly traversal
//! - String interning for names and values
//! - Attributes as first-class nodes parented by their element

pub mod document;
pub mod node;
pub mod strings;

pub use document::{DocumentBuilder, XmlDocument, DOCUMENT_NODE_ID};
pub use node::{NodeId, NodeKind, XmlNode};
pub use strings::StringPool;

/// Read-only capabilities the path engine needs from a tree.
///
/// Implementations must keep ids stable for as long as the document is
/// borrowed. Children are reported in document order and attributes in
/// declaration order; attribute nodes report their element as parent but
/// never appear among its children.
pub trait DocumentAccess {
    /// Id of the document root (the only node without a parent)
    fn document_node_id(&self) -> NodeId;

    /// Kind of a node, or None if the id is unknown
    fn node_kind_of(&self, id: NodeId) -> Option<NodeKind>;

    /// Get node name as string
    fn node_name(&self, id: NodeId) -> Option<&str>;

    /// Get node value (meaningful for attribute and character-data nodes)
    fn node_value(&self, id: NodeId) -> Option<&str>;

    /// Get the parent of a node
    fn parent_of(&self, id: NodeId) -> Option<NodeId>;

    /// Children in document order - returns collected Vec for trait object compatibility
    fn children_vec(&self, id: NodeId) -> Vec<NodeId>;

    /// Attribute nodes of an element, empty for anything else
    fn attributes_vec(&self, id: NodeId) -> Vec<NodeId>;

    /// Whether the id refers to a node of this document
    fn contains(&self, id: NodeId) -> bool {
        self.node_kind_of(id).is_some()
    }

    fn has_children(&self, id: NodeId) -> bool {
        !self.children_vec(id).is_empty()
    }

    fn has_attributes(&self, id: NodeId) -> bool {
        self.node_kind_of(id) == Some(NodeKind::Element) && !self.attributes_vec(id).is_empty()
    }

    /// All descendants in pre-order, excluding `id` itself
    fn descendants_vec(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = self.children_vec(id).into_iter().rev().collect();
        while let Some(current) = stack.pop() {
            result.push(current);
            stack.extend(self.children_vec(current).into_iter().rev());
        }
        result
    }
}

/// String-value of a node.
///
/// Nodes that carry a value report it directly. Elements and the document
/// concatenate the text and CDATA descendants in document order.
pub fn node_string_value<D: DocumentAccess + ?Sized>(doc: &D, id: NodeId) -> String {
    match doc.node_kind_of(id) {
        Some(NodeKind::Element) | Some(NodeKind::Document) => {
            let mut out = String::new();
            for desc in doc.descendants_vec(id) {
                if matches!(
                    doc.node_kind_of(desc),
                    Some(NodeKind::Text) | Some(NodeKind::CData)
                ) {
                    out.push_str(doc.node_value(desc).unwrap_or(""));
                }
            }
            out
        }
        Some(_) => doc.node_value(id).unwrap_or("").to_string(),
        None => String::new(),
    }
}
