//! Case-insensitive HTTP header collection used as input to
//! [`assemble`](crate::detect::assembler::assemble).
//!
//! Headers are stored in an ordered map keyed by the lower-cased name, so a
//! lookup costs one hash regardless of how the caller spelled the key. The
//! spelling of the most recent write is kept for display.
//!
//! Repeated names follow one policy: **last write wins**. For ordered inputs
//! (pairs, [`IndexMap`], parsed requests) that is input order. A [`HashMap`]
//! has no order of its own, so its keys are applied in byte order, which
//! makes the outcome deterministic: `"Accept-Encoding"` sorts before
//! `"accept-encoding"`, so the lower-case key's value is the one kept.
//!
//! No validation is performed on names or values.

use std::collections::HashMap;

use indexmap::IndexMap;

/// Anything a header value can be read from by case-insensitive name.
pub trait HeaderSource {
    /// Returns the value stored under `name`, ignoring ASCII case.
    fn header(&self, name: &str) -> Option<&str>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpHeaders {
    // lower-cased name -> (name as last written, value)
    headers: IndexMap<String, (String, String)>,
}

impl HttpHeaders {
    pub fn new() -> Self {
        Self {
            headers: IndexMap::new(),
        }
    }

    /// Stores `value` under `name`, replacing any value whose name differs
    /// only in case. The entry keeps its original position.
    pub fn set_raw(&mut self, name: &str, value: &str) {
        self.headers.insert(
            name.to_ascii_lowercase(),
            (name.to_string(), value.to_string()),
        );
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        // Avoid the allocation when the caller already uses lower case.
        let entry = if name.bytes().any(|b| b.is_ascii_uppercase()) {
            self.headers.get(&name.to_ascii_lowercase())
        } else {
            self.headers.get(name)
        };
        entry.map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.headers
            .shift_remove(&name.to_ascii_lowercase())
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Iterates `(name, value)` in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .values()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn stringify(&self) -> String {
        let mut result = String::new();
        for (name, value) in self.iter() {
            result.push_str(&format!("{}: {}\r\n", name, value));
        }
        result
    }
}

impl HeaderSource for HttpHeaders {
    fn header(&self, name: &str) -> Option<&str> {
        self.get(name)
    }
}

impl<N: AsRef<str>, V: AsRef<str>> FromIterator<(N, V)> for HttpHeaders {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut headers = HttpHeaders::new();
        for (name, value) in iter {
            headers.set_raw(name.as_ref(), value.as_ref());
        }
        headers
    }
}

impl<N: AsRef<str>, V: AsRef<str>> From<&IndexMap<N, V>> for HttpHeaders {
    fn from(map: &IndexMap<N, V>) -> Self {
        map.iter().collect()
    }
}

impl<N: AsRef<str>, V: AsRef<str>> From<&HashMap<N, V>> for HttpHeaders {
    fn from(map: &HashMap<N, V>) -> Self {
        let mut entries: Vec<(&str, &str)> = map
            .iter()
            .map(|(name, value)| (name.as_ref(), value.as_ref()))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries.into_iter().collect()
    }
}
