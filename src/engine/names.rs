//! Pre-converted capability names.
//!
//! Every capability read hands the engine a NUL-terminated name. Converting
//! on each call costs an allocation, so the known names are converted once
//! per engine load and shared read-only by all devices.

use std::borrow::Cow;
use std::collections::HashMap;
use std::ffi::{CStr, CString};

use log::debug;

use crate::error::{EngineError, ErrorCode};

#[derive(Debug, Default)]
pub struct CapabilityNameCache {
    names: HashMap<String, CString>,
}

impl CapabilityNameCache {
    /// A cache that converts on every call.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Converts every name once. Names with an interior NUL byte cannot be
    /// passed to the engine and are left out.
    pub fn build<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cache = HashMap::new();
        for name in names {
            let name = name.into();
            if cache.contains_key(&name) {
                continue;
            }
            match CString::new(name.as_str()) {
                Ok(c_name) => {
                    cache.insert(name, c_name);
                }
                Err(_) => debug!("Skipping capability name with NUL byte: {:?}", name),
            }
        }
        Self { names: cache }
    }

    /// The engine-ready form of `name`, borrowed from the cache when known.
    ///
    /// Unknown names are still converted so the engine can report them as
    /// not found; a name containing NUL fails with `InvalidParameter`.
    pub fn c_name<'a>(&'a self, name: &str) -> Result<Cow<'a, CStr>, EngineError> {
        if let Some(c_name) = self.names.get(name) {
            return Ok(Cow::Borrowed(c_name.as_c_str()));
        }
        CString::new(name)
            .map(Cow::Owned)
            .map_err(|_| EngineError::Native {
                code: ErrorCode::InvalidParameter,
                message: format!("capability name {name:?} contains a NUL byte"),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_are_borrowed() {
        let cache = CapabilityNameCache::build(["brand_name", "model_name", "brand_name"]);
        assert_eq!(cache.len(), 2);
        assert!(matches!(cache.c_name("brand_name").unwrap(), Cow::Borrowed(_)));
    }

    #[test]
    fn unknown_names_are_converted() {
        let cache = CapabilityNameCache::empty();
        let c_name = cache.c_name("is_smartphone").unwrap();
        assert!(matches!(c_name, Cow::Owned(_)));
        assert_eq!(c_name.to_str().unwrap(), "is_smartphone");
    }

    #[test]
    fn nul_bytes_are_rejected() {
        let cache = CapabilityNameCache::build(["bad\0name", "ok"]);
        assert_eq!(cache.len(), 1);
        let err = cache.c_name("bad\0name").unwrap_err();
        assert!(err.is(ErrorCode::InvalidParameter));
    }
}
