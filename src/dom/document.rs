//! XML Document - Arena-based tree representation
//!
//! Efficient tree storage with:
//! - Arena allocation for nodes (attributes included)
//! - NodeId indices for traversal
//! - String interning for names and values
//!
//! Documents are assembled with [`DocumentBuilder`] and are read-only once
//! built.

use super::node::{NodeId, NodeKind, XmlNode};
use super::strings::StringPool;
use super::DocumentAccess;

/// Id of the document node in every [`XmlDocument`]
pub const DOCUMENT_NODE_ID: NodeId = 0;

/// A tree stored in arena format
#[derive(Debug)]
pub struct XmlDocument {
    /// Arena of nodes; index 0 is the document node
    nodes: Vec<XmlNode>,
    /// Interned strings
    strings: StringPool,
    /// Root element node ID (not document node)
    root_element: Option<NodeId>,
}

impl XmlDocument {
    /// Get root element ID
    pub fn root_element_id(&self) -> Option<NodeId> {
        self.root_element
    }

    /// Get a node by ID
    pub fn get_node(&self, id: NodeId) -> Option<&XmlNode> {
        self.nodes.get(id as usize)
    }

    /// Get node name as string
    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        let node = self.get_node(id)?;
        match node.kind.default_name() {
            Some(name) => Some(name),
            None => self.strings.get_str(node.name_id),
        }
    }

    /// Get node value (attributes, text, CDATA, comments, PIs)
    pub fn node_value(&self, id: NodeId) -> Option<&str> {
        let node = self.get_node(id)?;
        if node.kind.has_value() {
            self.strings.get_str(node.value_id)
        } else {
            None
        }
    }

    /// Get attribute value by name
    pub fn get_attribute(&self, node_id: NodeId, name: &str) -> Option<&str> {
        // A name that was never interned cannot be on any attribute
        let name_id = self.strings.lookup(name)?;
        self.attributes(node_id)
            .find(|&attr| self.nodes[attr as usize].name_id == name_id)
            .and_then(|attr| self.node_value(attr))
    }

    /// Iterate over children of a node
    pub fn children(&self, id: NodeId) -> SiblingIter<'_> {
        let first = self.get_node(id).and_then(|n| n.first_child);
        SiblingIter { doc: self, next: first }
    }

    /// Iterate over the attribute nodes of an element
    pub fn attributes(&self, id: NodeId) -> SiblingIter<'_> {
        let first = self.get_node(id).and_then(|n| n.first_attr);
        SiblingIter { doc: self, next: first }
    }

    /// Iterate over all descendants of a node (pre-order, attributes excluded)
    pub fn descendants(&self, id: NodeId) -> DescendantIter<'_> {
        let mut iter = DescendantIter {
            doc: self,
            stack: Vec::new(),
        };
        iter.push_children(id);
        iter
    }

    /// Get total number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// Iterator over a sibling chain (children or attributes)
pub struct SiblingIter<'d> {
    doc: &'d XmlDocument,
    next: Option<NodeId>,
}

impl<'d> Iterator for SiblingIter<'d> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.doc.get_node(current).and_then(|n| n.next_sibling);
        Some(current)
    }
}

/// Iterator over descendant nodes (depth-first)
pub struct DescendantIter<'d> {
    doc: &'d XmlDocument,
    stack: Vec<NodeId>,
}

impl<'d> DescendantIter<'d> {
    // Children go on the stack in reverse so the first child pops first
    fn push_children(&mut self, id: NodeId) {
        let mut child_id = self.doc.get_node(id).and_then(|n| n.last_child);
        while let Some(cid) = child_id {
            self.stack.push(cid);
            child_id = self.doc.get_node(cid).and_then(|n| n.prev_sibling);
        }
    }
}

impl<'d> Iterator for DescendantIter<'d> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        self.push_children(current);
        Some(current)
    }
}

/// Incremental builder for [`XmlDocument`]
///
/// Mirrors a stream of parse events: elements are opened and closed,
/// attributes attach to the innermost open element, and leaf nodes are
/// appended to it. The builder is lenient: unbalanced `end_element` calls
/// are ignored and `finish` closes anything still open.
#[derive(Debug)]
pub struct DocumentBuilder {
    doc: XmlDocument,
    stack: Vec<NodeId>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        let mut nodes = Vec::with_capacity(256);
        nodes.push(XmlNode::document());
        DocumentBuilder {
            doc: XmlDocument {
                nodes,
                strings: StringPool::new(),
                root_element: None,
            },
            stack: vec![DOCUMENT_NODE_ID],
        }
    }

    fn current(&self) -> NodeId {
        *self.stack.last().unwrap_or(&DOCUMENT_NODE_ID)
    }

    fn depth(&self) -> u16 {
        self.stack.len().min(u16::MAX as usize) as u16
    }

    fn push_node(&mut self, node: XmlNode) -> NodeId {
        let id = self.doc.nodes.len() as NodeId;
        self.doc.nodes.push(node);
        id
    }

    /// Link a child node to its parent
    fn link_child(&mut self, parent_id: NodeId, child_id: NodeId) {
        let last_child_opt = self.doc.nodes[parent_id as usize].last_child;

        if let Some(last_child_id) = last_child_opt {
            self.doc.nodes[child_id as usize].prev_sibling = Some(last_child_id);
            self.doc.nodes[last_child_id as usize].next_sibling = Some(child_id);
        } else {
            self.doc.nodes[parent_id as usize].first_child = Some(child_id);
        }
        self.doc.nodes[parent_id as usize].last_child = Some(child_id);
    }

    /// Link an attribute node to its element
    fn link_attribute(&mut self, element_id: NodeId, attr_id: NodeId) {
        let last_attr_opt = self.doc.nodes[element_id as usize].last_attr;

        if let Some(last_attr_id) = last_attr_opt {
            self.doc.nodes[attr_id as usize].prev_sibling = Some(last_attr_id);
            self.doc.nodes[last_attr_id as usize].next_sibling = Some(attr_id);
        } else {
            self.doc.nodes[element_id as usize].first_attr = Some(attr_id);
        }
        self.doc.nodes[element_id as usize].last_attr = Some(attr_id);
    }

    /// Open an element as the last child of the current node
    pub fn start_element(&mut self, name: &str) -> &mut Self {
        let parent_id = self.current();
        let name_id = self.doc.strings.intern(name);
        let node = XmlNode::element(name_id, parent_id, self.depth());
        let node_id = self.push_node(node);
        self.link_child(parent_id, node_id);

        if self.doc.root_element.is_none() && parent_id == DOCUMENT_NODE_ID {
            self.doc.root_element = Some(node_id);
        }

        self.stack.push(node_id);
        self
    }

    /// Close the innermost open element
    pub fn end_element(&mut self) -> &mut Self {
        if self.stack.len() > 1 {
            self.stack.pop();
        } else {
            tracing::debug!("end_element with no open element ignored");
        }
        self
    }

    /// Add an attribute to the innermost open element
    pub fn attribute(&mut self, name: &str, value: &str) -> &mut Self {
        let element_id = self.current();
        if element_id == DOCUMENT_NODE_ID {
            tracing::debug!(name, "attribute outside of an element ignored");
            return self;
        }
        let name_id = self.doc.strings.intern(name);
        let value_id = self.doc.strings.intern(value);
        let node = XmlNode::attribute(name_id, value_id, element_id, self.depth());
        let attr_id = self.push_node(node);
        self.link_attribute(element_id, attr_id);
        self
    }

    fn leaf(&mut self, kind: NodeKind, value: &str) -> &mut Self {
        let parent_id = self.current();
        let value_id = self.doc.strings.intern(value);
        let node = XmlNode::leaf(kind, value_id, parent_id, self.depth());
        let node_id = self.push_node(node);
        self.link_child(parent_id, node_id);
        self
    }

    /// Append a text node
    pub fn text(&mut self, content: &str) -> &mut Self {
        self.leaf(NodeKind::Text, content)
    }

    /// Append a CDATA section
    pub fn cdata(&mut self, content: &str) -> &mut Self {
        self.leaf(NodeKind::CData, content)
    }

    /// Append a comment
    pub fn comment(&mut self, content: &str) -> &mut Self {
        self.leaf(NodeKind::Comment, content)
    }

    /// Append a processing instruction
    pub fn processing_instruction(&mut self, target: &str, data: &str) -> &mut Self {
        let parent_id = self.current();
        let target_id = self.doc.strings.intern(target);
        let data_id = self.doc.strings.intern(data);
        let node = XmlNode::processing_instruction(target_id, data_id, parent_id, self.depth());
        let node_id = self.push_node(node);
        self.link_child(parent_id, node_id);
        self
    }

    /// Shorthand for `<name>content</name>`
    pub fn text_element(&mut self, name: &str, content: &str) -> &mut Self {
        self.start_element(name).text(content).end_element()
    }

    /// Finish the document, closing any elements still open
    pub fn finish(self) -> XmlDocument {
        if self.stack.len() > 1 {
            tracing::debug!(open = self.stack.len() - 1, "closing unterminated elements");
        }
        self.doc
    }
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// DocumentAccess trait implementation
// =============================================================================

impl DocumentAccess for XmlDocument {
    fn document_node_id(&self) -> NodeId {
        DOCUMENT_NODE_ID
    }

    fn node_kind_of(&self, id: NodeId) -> Option<NodeKind> {
        self.get_node(id).map(|n| n.kind)
    }

    fn node_name(&self, id: NodeId) -> Option<&str> {
        XmlDocument::node_name(self, id)
    }

    fn node_value(&self, id: NodeId) -> Option<&str> {
        XmlDocument::node_value(self, id)
    }

    fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.get_node(id).and_then(|n| n.parent)
    }

    fn has_children(&self, id: NodeId) -> bool {
        self.get_node(id).is_some_and(|n| n.has_children())
    }

    fn has_attributes(&self, id: NodeId) -> bool {
        self.get_node(id).is_some_and(|n| n.is_element() && n.has_attributes())
    }

    fn children_vec(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id).collect()
    }

    fn attributes_vec(&self, id: NodeId) -> Vec<NodeId> {
        self.attributes(id).collect()
    }

    fn descendants_vec(&self, id: NodeId) -> Vec<NodeId> {
        self.descendants(id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> XmlDocument {
        let mut b = DocumentBuilder::new();
        b.start_element("root")
            .attribute("id", "r1")
            .attribute("lang", "en")
            .start_element("a")
            .text("hello")
            .end_element()
            .start_element("b")
            .start_element("c")
            .end_element()
            .end_element()
            .comment("note")
            .end_element();
        b.finish()
    }

    #[test]
    fn test_build_simple() {
        let doc = sample();
        let root = doc.root_element_id().unwrap();
        assert_eq!(doc.node_name(root), Some("root"));
        assert_eq!(doc.parent_of(root), Some(DOCUMENT_NODE_ID));
        assert!(doc.parent_of(DOCUMENT_NODE_ID).is_none());
    }

    #[test]
    fn test_children_exclude_attributes() {
        let doc = sample();
        let root = doc.root_element_id().unwrap();
        let names: Vec<_> = doc
            .children(root)
            .map(|c| doc.node_name(c).unwrap())
            .collect();
        assert_eq!(names, vec!["a", "b", "#comment"]);
    }

    #[test]
    fn test_attributes() {
        let doc = sample();
        let root = doc.root_element_id().unwrap();
        let attrs: Vec<_> = doc.attributes(root).collect();
        assert_eq!(attrs.len(), 2);
        assert_eq!(doc.node_name(attrs[0]), Some("id"));
        assert_eq!(doc.node_value(attrs[1]), Some("en"));
        assert_eq!(doc.parent_of(attrs[0]), Some(root));
        assert_eq!(doc.get_attribute(root, "lang"), Some("en"));
        assert_eq!(doc.get_attribute(root, "missing"), None);
    }

    #[test]
    fn test_descendants() {
        let doc = sample();
        let root = doc.root_element_id().unwrap();
        let names: Vec<_> = doc
            .descendants(root)
            .map(|d| doc.node_name(d).unwrap())
            .collect();
        assert_eq!(names, vec!["a", "#text", "b", "c", "#comment"]);
    }

    #[test]
    fn test_siblings() {
        let doc = sample();
        let root = doc.root_element_id().unwrap();
        let children: Vec<_> = doc.children(root).collect();
        let first = doc.get_node(children[0]).unwrap();
        assert!(first.prev_sibling.is_none());
        assert_eq!(first.next_sibling, Some(children[1]));
    }

    #[test]
    fn test_values() {
        let doc = sample();
        let root = doc.root_element_id().unwrap();
        assert_eq!(doc.node_value(root), None);
        let text = doc.descendants(root).nth(1).unwrap();
        assert_eq!(doc.node_value(text), Some("hello"));
    }

    #[test]
    fn test_lenient_builder() {
        let mut b = DocumentBuilder::new();
        b.end_element().attribute("stray", "x").start_element("open");
        let doc = b.finish();
        assert_eq!(doc.node_count(), 2);
        assert!(doc.root_element_id().is_some());
    }
}
