//! Projection of a caller's headers onto the registry.

use std::iter::FusedIterator;
use std::slice;
use std::sync::Arc;

use crate::detect::registry::HeaderRegistry;
use crate::http::headers::HeaderSource;

/// The important headers found for one lookup, in registry order.
///
/// Names are the registry's canonical spelling. Values are never empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportantHeaders {
    entries: Vec<(Arc<str>, String)>,
}

impl ImportantHeaders {
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_ref())
    }

    /// Value for `name`, ignoring ASCII case. Subsets are a handful of
    /// entries long, so a scan is cheaper than an index.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Borrowing iterator over `(name, value)` pairs of [`ImportantHeaders`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: slice::Iter<'a, (Arc<str>, String)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(name, value)| (name.as_ref(), value.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner
            .next_back()
            .map(|(name, value)| (name.as_ref(), value.as_str()))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a ImportantHeaders {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Picks the registry's headers out of `headers`.
///
/// Each registry name costs one case-insensitive lookup on the source, so the
/// whole pass is linear in the registry size. Missing and empty values are
/// skipped; finding nothing yields an empty subset.
pub fn assemble<H>(registry: &HeaderRegistry, headers: &H) -> ImportantHeaders
where
    H: HeaderSource + ?Sized,
{
    let entries = registry
        .canonical_names()
        .filter_map(|name| {
            headers
                .header(name)
                .filter(|value| !value.is_empty())
                .map(|value| (Arc::clone(name), value.to_string()))
        })
        .collect();

    ImportantHeaders { entries }
}
