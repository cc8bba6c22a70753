//! Tree node representation
//!
//! Uses NodeId (u32) for compact, cache-friendly node references.

/// Compact node identifier (index into arena)
pub type NodeId = u32;

/// Type of tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Document root
    Document,
    /// Element node
    Element,
    /// Attribute of an element (parented by it, not one of its children)
    Attribute,
    /// Text content
    Text,
    /// CDATA section
    CData,
    /// Comment
    Comment,
    /// Processing instruction
    ProcessingInstruction,
}

impl NodeKind {
    /// Fixed name reported for kinds that carry no name of their own
    pub fn default_name(self) -> Option<&'static str> {
        match self {
            NodeKind::Document => Some("#document"),
            NodeKind::Text => Some("#text"),
            NodeKind::CData => Some("#cdata-section"),
            NodeKind::Comment => Some("#comment"),
            NodeKind::Element | NodeKind::Attribute | NodeKind::ProcessingInstruction => None,
        }
    }

    /// Whether nodes of this kind carry a value
    pub fn has_value(self) -> bool {
        !matches!(self, NodeKind::Document | NodeKind::Element)
    }
}

/// A node in the arena
///
/// Attributes live in the same arena as every other node. An element links
/// its attributes through `first_attr`/`last_attr`, and attribute nodes chain
/// to each other through the sibling links.
#[derive(Debug, Clone)]
pub struct XmlNode {
    /// Type of this node
    pub kind: NodeKind,
    /// Parent node (None for document root)
    pub parent: Option<NodeId>,
    /// First child node
    pub first_child: Option<NodeId>,
    /// Last child node
    pub last_child: Option<NodeId>,
    /// Previous sibling (previous attribute for attribute nodes)
    pub prev_sibling: Option<NodeId>,
    /// Next sibling (next attribute for attribute nodes)
    pub next_sibling: Option<NodeId>,
    /// First attribute (elements only)
    pub first_attr: Option<NodeId>,
    /// Last attribute (elements only)
    pub last_attr: Option<NodeId>,
    /// Index into string pool for name, or 0
    pub name_id: u32,
    /// Index into string pool for value, or 0
    pub value_id: u32,
    /// Depth in document tree
    pub depth: u16,
}

impl XmlNode {
    fn new(kind: NodeKind, parent: Option<NodeId>, depth: u16) -> Self {
        XmlNode {
            kind,
            parent,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            first_attr: None,
            last_attr: None,
            name_id: 0,
            value_id: 0,
            depth,
        }
    }

    /// Create a new document root node
    pub fn document() -> Self {
        Self::new(NodeKind::Document, None, 0)
    }

    /// Create a new element node
    pub fn element(name_id: u32, parent: NodeId, depth: u16) -> Self {
        XmlNode {
            name_id,
            ..Self::new(NodeKind::Element, Some(parent), depth)
        }
    }

    /// Create a new attribute node owned by `element`
    pub fn attribute(name_id: u32, value_id: u32, element: NodeId, depth: u16) -> Self {
        XmlNode {
            name_id,
            value_id,
            ..Self::new(NodeKind::Attribute, Some(element), depth)
        }
    }

    /// Create a value-only node (text, CDATA, comment)
    pub fn leaf(kind: NodeKind, value_id: u32, parent: NodeId, depth: u16) -> Self {
        XmlNode {
            value_id,
            ..Self::new(kind, Some(parent), depth)
        }
    }

    /// Create a processing instruction node
    pub fn processing_instruction(
        target_id: u32,
        data_id: u32,
        parent: NodeId,
        depth: u16,
    ) -> Self {
        XmlNode {
            name_id: target_id,
            value_id: data_id,
            ..Self::new(NodeKind::ProcessingInstruction, Some(parent), depth)
        }
    }

    /// Check if this is an element node
    #[inline]
    pub fn is_element(&self) -> bool {
        self.kind == NodeKind::Element
    }

    /// Check if this node has children
    #[inline]
    pub fn has_children(&self) -> bool {
        self.first_child.is_some()
    }

    /// Check if this node has attributes
    #[inline]
    pub fn has_attributes(&self) -> bool {
        self.first_attr.is_some()
    }
}
