//! Boundary with the native detection engine.
//!
//! The engine is an opaque collaborator: matching, device data and caching
//! all happen on its side. A binding exposes it through [`Engine`] and
//! [`NativeDevice`]; this crate wraps those in [`Detector`] and [`Device`],
//! which own the header registry, the capability name cache and the handle
//! lifetimes.
//!
//! ## Handle ownership
//!
//! Every device returned by a lookup owns one native handle. Implementations
//! of [`NativeDevice`] release that handle in [`Drop`], so it is released
//! exactly once on every path: normal use, early `?` returns and panics.

use std::ffi::CStr;

use serde::Deserialize;

use crate::detect::ImportantHeaders;
use crate::error::EngineError;

pub mod detector;
pub mod device;
pub mod names;
pub mod updater;

pub use detector::{Detection, Detector};
pub use device::Device;
pub use names::CapabilityNameCache;
pub use updater::{UpdateFrequency, UpdaterControl};

/// How the engine arrived at a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchType {
    Exact,
    Conclusive,
    Recovery,
    Catchall,
    HighPerformance,
    None,
    Cached,
}

/// Engine attributes settable at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineAttr {
    /// Makes the engine read additional, experimental headers. Changes the
    /// important header list.
    ExtraHeadersExperimental,
    /// Controls the engine's capability fallback cache; see
    /// [`FallbackCacheMode`].
    CapabilityFallbackCache,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackCacheMode {
    Default = 0,
    Disabled = 1,
    Limited = 2,
}

impl FallbackCacheMode {
    pub fn as_attr_value(self) -> i32 {
        self as i32
    }
}

/// A loaded native engine.
///
/// Implementations must be safe to share between threads; the native
/// library synchronizes its own state.
pub trait Engine: Send + Sync {
    type Device: NativeDevice;

    fn api_version(&self) -> String;
    fn info(&self) -> String;
    fn last_load_time(&self) -> String;
    fn last_updated(&self) -> String;

    /// Header names the matcher reads, in the engine's precedence order.
    fn important_header_names(&self) -> Result<Vec<String>, EngineError>;

    fn static_capability_names(&self) -> Vec<String>;
    fn virtual_capability_names(&self) -> Vec<String>;
    fn device_ids(&self) -> Vec<String>;

    fn has_static_capability(&self, name: &str) -> bool;
    fn has_virtual_capability(&self, name: &str) -> bool;
    fn is_user_agent_frozen(&self, user_agent: &str) -> bool;

    fn set_attr(&self, attr: EngineAttr, value: i32) -> Result<(), EngineError>;
    fn attr(&self, attr: EngineAttr) -> Result<i32, EngineError>;

    fn lookup_user_agent(&self, user_agent: &str) -> Result<Self::Device, EngineError>;
    fn lookup_important_headers(
        &self,
        headers: &ImportantHeaders,
    ) -> Result<Self::Device, EngineError>;
    /// Fetches a device by id. When `headers` is given, virtual capabilities
    /// are computed against them.
    fn lookup_device_id(
        &self,
        device_id: &str,
        headers: Option<&ImportantHeaders>,
    ) -> Result<Self::Device, EngineError>;
}

/// One matched device, owning its native handle until dropped.
pub trait NativeDevice: Send {
    fn device_id(&self) -> Result<String, EngineError>;
    fn root_id(&self) -> String;
    fn parent_id(&self) -> String;
    fn is_root(&self) -> bool;
    fn match_type(&self) -> MatchType;

    /// Default User-Agent of the matched device.
    fn user_agent(&self) -> Result<String, EngineError>;
    /// User-Agent passed to the lookup.
    fn original_user_agent(&self) -> Result<String, EngineError>;
    fn normalized_user_agent(&self) -> Result<String, EngineError>;

    fn static_cap(&self, name: &CStr) -> Result<String, EngineError>;
    fn static_cap_as_int(&self, name: &CStr) -> Result<i64, EngineError>;
    fn virtual_cap(&self, name: &CStr) -> Result<String, EngineError>;
    fn virtual_cap_as_int(&self, name: &CStr) -> Result<i64, EngineError>;
}
