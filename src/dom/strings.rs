//! String Interning Pool
//!
//! Deduplicated storage for element names, attribute names and node values.
//! Every string is copied into a single buffer and addressed by a `u32` id.
//! Id 0 is reserved for the empty string.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// Span of an interned string inside the pool buffer: (offset, length)
#[derive(Debug, Clone, Copy)]
struct StringEntry(u32, u32);

/// String interning pool
///
/// Memory layout:
/// - `entries`: span for each interned string ID
/// - `data`: concatenated UTF-8 bytes of every distinct string
/// - `hash_index`: hash -> list of IDs (handles rare collisions)
#[derive(Debug)]
pub struct StringPool {
    entries: Vec<StringEntry>,
    data: String,
    hash_index: HashMap<u64, Vec<u32>>,
}

impl StringPool {
    /// Create a new empty string pool
    pub fn new() -> Self {
        let mut pool = StringPool {
            entries: Vec::with_capacity(256),
            data: String::with_capacity(4096),
            hash_index: HashMap::new(),
        };
        pool.entries.push(StringEntry(0, 0));
        pool
    }

    #[inline]
    fn compute_hash(s: &str) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        let mut hasher = DefaultHasher::new();
        s.hash(&mut hasher);
        hasher.finish()
    }

    /// Intern a string, returning the id of an existing copy when present
    pub fn intern(&mut self, s: &str) -> u32 {
        if s.is_empty() {
            return 0;
        }

        let hash = Self::compute_hash(s);

        if let Some(ids) = self.hash_index.get(&hash) {
            for &id in ids {
                if self.get_str(id) == Some(s) {
                    return id;
                }
            }
        }

        let offset = self.data.len() as u32;
        self.data.push_str(s);

        let id = self.entries.len() as u32;
        self.entries.push(StringEntry(offset, s.len() as u32));
        self.hash_index.entry(hash).or_default().push(id);

        id
    }

    /// Get a string by ID
    pub fn get_str(&self, id: u32) -> Option<&str> {
        let StringEntry(offset, len) = *self.entries.get(id as usize)?;
        let start = offset as usize;
        self.data.get(start..start + len as usize)
    }

    /// Look up the id of an already-interned string without inserting it
    pub fn lookup(&self, s: &str) -> Option<u32> {
        if s.is_empty() {
            return Some(0);
        }
        self.hash_index
            .get(&Self::compute_hash(s))?
            .iter()
            .copied()
            .find(|&id| self.get_str(id) == Some(s))
    }

    /// Get the number of unique strings stored (including the reserved empty entry)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the pool is empty
    pub fn is_empty(&self) -> bool {
        self.entries.len() <= 1 // Entry 0 is reserved
    }

}

impl Default for StringPool {
    fn default() -> Self {
        Self::new()
    }
}
