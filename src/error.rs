//! Error types for path compilation and evaluation.

use crate::dom::NodeId;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PathError {
    /// Malformed or unsupported expression syntax.
    #[error("syntax error at offset {offset}: {message}")]
    Syntax { message: String, offset: usize },

    #[error("context node {0} does not exist in the document")]
    InvalidNode(NodeId),
}

impl PathError {
    pub fn syntax(message: impl Into<String>, offset: usize) -> Self {
        PathError::Syntax {
            message: message.into(),
            offset,
        }
    }

    /// Human-readable message without the offset prefix
    pub fn message(&self) -> String {
        match self {
            PathError::Syntax { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PathError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_display() {
        let err = PathError::syntax("Expected ]", 7);
        assert_eq!(err.to_string(), "syntax error at offset 7: Expected ]");
        assert_eq!(err.message(), "Expected ]");
    }

    #[test]
    fn test_invalid_node_display() {
        let err = PathError::InvalidNode(42);
        assert!(err.to_string().contains("42"));
    }
}
