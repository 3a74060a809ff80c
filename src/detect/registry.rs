//! Ordered catalog of the header names the engine considers important.
//!
//! The engine hands the list over once at start-up and again whenever its
//! header set changes. A registry is never edited: a change produces a new
//! registry that replaces the old one wholesale.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::ConfigurationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRegistry {
    // lower-cased name -> canonical name; position is registry order
    names: IndexMap<String, Arc<str>>,
}

impl HeaderRegistry {
    /// Builds a registry from the engine's ordered name list.
    ///
    /// Empty lists, blank names and names that collide ignoring case are
    /// rejected rather than silently repaired.
    pub fn build<I, S>(names: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = IndexMap::new();
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                return Err(ConfigurationError::EmptyHeaderName);
            }
            let key = name.to_ascii_lowercase();
            if index.contains_key(&key) {
                return Err(ConfigurationError::DuplicateHeaderName(name.to_string()));
            }
            index.insert(key, Arc::from(name));
        }

        if index.is_empty() {
            return Err(ConfigurationError::EmptyRegistry);
        }
        Ok(Self { names: index })
    }

    /// Position of `name` in registry order, ignoring ASCII case.
    pub fn lookup(&self, name: &str) -> Option<usize> {
        self.names.get_index_of(&name.to_ascii_lowercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Canonical spelling of the name at `index`.
    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.names.get_index(index).map(|(_, name)| name.as_ref())
    }

    pub fn ordered_names(&self) -> impl Iterator<Item = &str> {
        self.names.values().map(|name| name.as_ref())
    }

    /// Shared handles to the canonical names, for building subsets without
    /// copying the strings.
    pub(crate) fn canonical_names(&self) -> impl Iterator<Item = &Arc<str>> {
        self.names.values()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always `false`: an empty registry cannot be built.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
