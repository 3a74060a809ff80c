use std::sync::Arc;

use indexmap::IndexMap;

use crate::engine::names::CapabilityNameCache;
use crate::engine::{MatchType, NativeDevice};
use crate::error::{CapabilityBatchError, EngineError};

/// A matched device.
///
/// Owns the native handle; dropping the `Device` releases it. Holds its own
/// snapshot of the capability name cache, so a registry refresh on the
/// detector never invalidates a device that is still in use.
pub struct Device<D: NativeDevice> {
    inner: D,
    names: Arc<CapabilityNameCache>,
}

impl<D: NativeDevice> Device<D> {
    pub(crate) fn new(inner: D, names: Arc<CapabilityNameCache>) -> Self {
        Self { inner, names }
    }

    pub fn id(&self) -> Result<String, EngineError> {
        self.inner.device_id()
    }

    pub fn root_id(&self) -> String {
        self.inner.root_id()
    }

    pub fn parent_id(&self) -> String {
        self.inner.parent_id()
    }

    pub fn is_root(&self) -> bool {
        self.inner.is_root()
    }

    pub fn match_type(&self) -> MatchType {
        self.inner.match_type()
    }

    pub fn user_agent(&self) -> Result<String, EngineError> {
        self.inner.user_agent()
    }

    pub fn original_user_agent(&self) -> Result<String, EngineError> {
        self.inner.original_user_agent()
    }

    /// The User-Agent after engine normalization. Meant for tooling.
    pub fn normalized_user_agent(&self) -> Result<String, EngineError> {
        self.inner.normalized_user_agent()
    }

    pub fn static_cap(&self, name: &str) -> Result<String, EngineError> {
        let c_name = self.names.c_name(name)?;
        self.inner.static_cap(&c_name)
    }

    /// Fails when the capability is not numeric (e.g. `brand_name`).
    pub fn static_cap_as_int(&self, name: &str) -> Result<i64, EngineError> {
        let c_name = self.names.c_name(name)?;
        self.inner.static_cap_as_int(&c_name)
    }

    pub fn virtual_cap(&self, name: &str) -> Result<String, EngineError> {
        let c_name = self.names.c_name(name)?;
        self.inner.virtual_cap(&c_name)
    }

    pub fn virtual_cap_as_int(&self, name: &str) -> Result<i64, EngineError> {
        let c_name = self.names.c_name(name)?;
        self.inner.virtual_cap_as_int(&c_name)
    }

    /// Reads several static capabilities. Every name is attempted; on failure
    /// the error still carries the values that resolved.
    pub fn static_caps(&self, names: &[&str]) -> Result<IndexMap<String, String>, CapabilityBatchError> {
        collect_caps(names, |name| self.static_cap(name))
    }

    pub fn virtual_caps(&self, names: &[&str]) -> Result<IndexMap<String, String>, CapabilityBatchError> {
        collect_caps(names, |name| self.virtual_cap(name))
    }

    /// Borrows the binding's own handle type.
    pub fn native(&self) -> &D {
        &self.inner
    }
}

fn collect_caps<F>(names: &[&str], mut read: F) -> Result<IndexMap<String, String>, CapabilityBatchError>
where
    F: FnMut(&str) -> Result<String, EngineError>,
{
    let mut values = IndexMap::with_capacity(names.len());
    let mut failed = Vec::new();
    let mut first_error = None;

    for name in names {
        match read(name) {
            Ok(value) => {
                values.insert(name.to_string(), value);
            }
            Err(err) => {
                failed.push(name.to_string());
                first_error.get_or_insert(err);
            }
        }
    }

    match first_error {
        None => Ok(values),
        Some(source) => Err(CapabilityBatchError {
            values,
            failed,
            source,
        }),
    }
}
