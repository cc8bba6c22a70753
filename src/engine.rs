//! Path engine facade.
//!
//! Bundles the compiled-path cache with the evaluation entry points.
//!
//! Configuration resolution order:
//! 1. Values set explicitly on [`EngineConfig`]
//! 2. `RUSTYPATH_CACHE_CAPACITY` / `RUSTYPATH_STRICT` environment variables
//!    (via [`EngineConfig::from_env`])
//! 3. Defaults: 256 cached expressions, lenient compilation

use std::sync::Arc;

use crate::dom::{DocumentAccess, NodeId};
use crate::error::Result;
use crate::xpath::cache::DEFAULT_CACHE_CAPACITY;
use crate::xpath::{evaluate, CompiledPath, NodeSet, PathCache};

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Number of compiled expressions kept in the LRU cache.
    pub cache_capacity: usize,

    /// Report syntax errors from [`PathEngine::compile`] instead of
    /// deferring them to evaluation.
    pub strict: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            strict: false,
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by environment variables when they parse.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup("RUSTYPATH_CACHE_CAPACITY") {
            match raw.trim().parse() {
                Ok(capacity) => config.cache_capacity = capacity,
                Err(_) => tracing::warn!(value = %raw, "ignoring invalid RUSTYPATH_CACHE_CAPACITY"),
            }
        }

        if let Some(raw) = lookup("RUSTYPATH_STRICT") {
            match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => config.strict = true,
                "0" | "false" | "no" | "off" => config.strict = false,
                _ => tracing::warn!(value = %raw, "ignoring invalid RUSTYPATH_STRICT"),
            }
        }

        config
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Compiles (with caching) and evaluates path expressions.
#[derive(Debug)]
pub struct PathEngine {
    config: EngineConfig,
    cache: PathCache,
}

impl PathEngine {
    pub fn new(config: EngineConfig) -> Self {
        let cache = PathCache::new(config.cache_capacity);
        Self { config, cache }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cache(&self) -> &PathCache {
        &self.cache
    }

    /// Compile through the cache.
    ///
    /// In strict mode a malformed expression fails here; otherwise the
    /// returned pipeline raises when evaluated.
    pub fn compile(&self, expression: &str) -> Result<Arc<CompiledPath>> {
        let compiled = self.cache.get_or_compile(expression);
        if self.config.strict {
            if let Some(err) = compiled.error() {
                return Err(err);
            }
        }
        Ok(compiled)
    }

    /// All nodes matching `expression` from `context`
    pub fn select<D: DocumentAccess + ?Sized>(
        &self,
        doc: &D,
        context: NodeId,
        expression: &str,
    ) -> Result<NodeSet> {
        let compiled = self.compile(expression)?;
        evaluate(doc, &compiled, context)
    }

    /// First node matching `expression` from `context`
    pub fn select_first<D: DocumentAccess + ?Sized>(
        &self,
        doc: &D,
        context: NodeId,
        expression: &str,
    ) -> Result<Option<NodeId>> {
        Ok(self.select(doc, context, expression)?.into_iter().next())
    }
}

impl Default for PathEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{DocumentBuilder, XmlDocument, DOCUMENT_NODE_ID};
    use crate::error::PathError;

    fn doc() -> XmlDocument {
        let mut b = DocumentBuilder::new();
        b.start_element("list")
            .text_element("item", "1")
            .text_element("item", "2")
            .end_element();
        b.finish()
    }

    #[test]
    fn test_select() {
        let engine = PathEngine::default();
        let doc = doc();
        let items = engine.select(&doc, DOCUMENT_NODE_ID, "/list/item").unwrap();
        assert_eq!(items.len(), 2);
        let first = engine
            .select_first(&doc, DOCUMENT_NODE_ID, "/list/item[")
            .unwrap_err();
        assert!(matches!(first, PathError::Syntax { .. }));
    }

    #[test]
    fn test_select_first() {
        let engine = PathEngine::default();
        let doc = doc();
        let items = engine.select(&doc, DOCUMENT_NODE_ID, "//item").unwrap();
        assert_eq!(
            engine.select_first(&doc, DOCUMENT_NODE_ID, "//item").unwrap(),
            Some(items[0])
        );
        assert_eq!(
            engine.select_first(&doc, DOCUMENT_NODE_ID, "//none").unwrap(),
            None
        );
    }

    #[test]
    fn test_compile_uses_cache() {
        let engine = PathEngine::new(EngineConfig::default().with_cache_capacity(8));
        let a = engine.compile("//item").unwrap();
        let b = engine.compile("//item").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(engine.cache().len(), 1);
        assert_eq!(engine.cache().capacity(), 8);
    }

    #[test]
    fn test_strict_mode() {
        let lenient = PathEngine::default();
        assert!(lenient.compile("//item[").is_ok());

        let strict = PathEngine::new(EngineConfig::default().with_strict(true));
        assert!(matches!(
            strict.compile("//item["),
            Err(PathError::Syntax { .. })
        ));
        assert!(strict.compile("//item").is_ok());
    }

    #[test]
    fn test_config_from_lookup() {
        let config = EngineConfig::from_lookup(|key| match key {
            "RUSTYPATH_CACHE_CAPACITY" => Some("32".to_string()),
            "RUSTYPATH_STRICT" => Some("Yes".to_string()),
            _ => None,
        });
        assert_eq!(config.cache_capacity, 32);
        assert!(config.strict);
    }

    #[test]
    fn test_config_ignores_invalid_values() {
        let config = EngineConfig::from_lookup(|key| match key {
            "RUSTYPATH_CACHE_CAPACITY" => Some("lots".to_string()),
            "RUSTYPATH_STRICT" => Some("maybe".to_string()),
            _ => None,
        });
        assert_eq!(config, EngineConfig::default());
    }
}
