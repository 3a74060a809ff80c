//! The engine owner that callers talk to.
//!
//! A [`Detector`] keeps the current header registry and capability name
//! cache in one immutable snapshot. Lookups clone the snapshot's `Arc` and
//! work on it without further locking; a refresh builds a new snapshot and
//! swaps it in with a single write, so a lookup sees either the old
//! registry or the new one and never a mix.

use std::cmp::Ordering;
use std::sync::{Arc, PoisonError, RwLock};

use log::{debug, info};

use crate::config::DetectorConfig;
use crate::detect::{HeaderQuality, HeaderRegistry, ImportantHeaders, QualityClassifier, assemble};
use crate::engine::device::Device;
use crate::engine::names::CapabilityNameCache;
use crate::engine::updater::{UPDATER_USER_AGENT_MIN_API, UpdateFrequency, UpdaterControl};
use crate::engine::{Engine, EngineAttr};
use crate::error::{EngineError, Error};
use crate::http::headers::HeaderSource;
use crate::http::parser::parse_request_head;
use crate::http::request::HttpRequest;
use crate::version::compare_versions;

/// User-Agent this binding announces to the updater's data server.
pub const BINDING_USER_AGENT: &str = concat!("hintnet/", env!("CARGO_PKG_VERSION"));

#[derive(Debug)]
struct Snapshot {
    registry: Arc<HeaderRegistry>,
    names: Arc<CapabilityNameCache>,
}

/// A device together with the quality of the headers it was matched from.
pub struct Detection<D: crate::engine::NativeDevice> {
    pub device: Device<D>,
    pub quality: HeaderQuality,
}

pub struct Detector<E: Engine> {
    engine: E,
    classifier: QualityClassifier,
    cache_capability_names: bool,
    max_request_head_size: usize,
    snapshot: RwLock<Arc<Snapshot>>,
}

impl<E: Engine> Detector<E> {
    /// Wraps a loaded engine.
    ///
    /// Configured attributes are applied first, since they can change the
    /// engine's header list; the registry is then read from the engine.
    pub fn new(engine: E, config: &DetectorConfig) -> Result<Self, Error> {
        if let Some(enabled) = config.extra_headers_experimental {
            engine.set_attr(EngineAttr::ExtraHeadersExperimental, i32::from(enabled))?;
        }
        if let Some(mode) = config.capability_fallback_cache {
            engine.set_attr(EngineAttr::CapabilityFallbackCache, mode.as_attr_value())?;
        }

        let snapshot = build_snapshot(&engine, config.cache_capability_names)?;
        info!(
            "Detection engine {} ready: {} important headers, {} cached capability names",
            engine.api_version(),
            snapshot.registry.len(),
            snapshot.names.len()
        );

        Ok(Self {
            engine,
            classifier: QualityClassifier::new(&config.quality),
            cache_capability_names: config.cache_capability_names,
            max_request_head_size: config.max_request_head_size,
            snapshot: RwLock::new(Arc::new(snapshot)),
        })
    }

    fn current(&self) -> Arc<Snapshot> {
        // The lock only guards an Arc swap, so a poisoned lock still holds a
        // complete snapshot.
        let guard = self.snapshot.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn classifier(&self) -> &QualityClassifier {
        &self.classifier
    }

    /// The registry in effect right now. The returned handle stays valid and
    /// unchanged across later refreshes.
    pub fn registry(&self) -> Arc<HeaderRegistry> {
        Arc::clone(&self.current().registry)
    }

    pub fn important_header_names(&self) -> Vec<String> {
        self.registry().ordered_names().map(str::to_string).collect()
    }

    /// Re-reads the header list and capability names from the engine and
    /// swaps them in. On error the previous snapshot stays in place.
    pub fn refresh(&self) -> Result<(), Error> {
        let snapshot = Arc::new(build_snapshot(&self.engine, self.cache_capability_names)?);
        debug!(
            "Swapping in registry with {} important headers",
            snapshot.registry.len()
        );
        let mut guard = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        *guard = snapshot;
        Ok(())
    }

    /// Sets an engine attribute. Toggling experimental headers changes the
    /// engine's header list, so the registry is refreshed afterwards.
    pub fn set_attr(&self, attr: EngineAttr, value: i32) -> Result<(), Error> {
        self.engine.set_attr(attr, value)?;
        if attr == EngineAttr::ExtraHeadersExperimental {
            self.refresh()?;
        }
        Ok(())
    }

    pub fn attr(&self, attr: EngineAttr) -> Result<i32, EngineError> {
        self.engine.attr(attr)
    }

    pub fn important_headers<H>(&self, headers: &H) -> ImportantHeaders
    where
        H: HeaderSource + ?Sized,
    {
        assemble(&self.current().registry, headers)
    }

    pub fn header_quality<H>(&self, headers: &H) -> HeaderQuality
    where
        H: HeaderSource + ?Sized,
    {
        self.classifier.classify(&self.important_headers(headers))
    }

    pub fn lookup_headers<H>(&self, headers: &H) -> Result<Device<E::Device>, EngineError>
    where
        H: HeaderSource + ?Sized,
    {
        let snapshot = self.current();
        let subset = assemble(&snapshot.registry, headers);
        debug!("Looking up device from {} important headers", subset.len());
        self.lookup_subset(&snapshot, &subset)
    }

    pub fn lookup_request(&self, request: &HttpRequest) -> Result<Device<E::Device>, EngineError> {
        self.lookup_headers(request)
    }

    /// Parses a raw request head, bounded by the configured head size, and
    /// looks up the device it describes.
    pub fn lookup_raw_head(&self, head: &[u8]) -> Result<Device<E::Device>, Error> {
        let request = parse_request_head(head, self.max_request_head_size)?;
        Ok(self.lookup_request(&request)?)
    }

    /// Looks up a device and scores the same header subset in one pass.
    pub fn detect<H>(&self, headers: &H) -> Result<Detection<E::Device>, EngineError>
    where
        H: HeaderSource + ?Sized,
    {
        let snapshot = self.current();
        let subset = assemble(&snapshot.registry, headers);
        let quality = self.classifier.classify(&subset);
        let device = self.lookup_subset(&snapshot, &subset)?;
        Ok(Detection { device, quality })
    }

    pub fn lookup_user_agent(&self, user_agent: &str) -> Result<Device<E::Device>, EngineError> {
        let names = Arc::clone(&self.current().names);
        let device = self.engine.lookup_user_agent(user_agent)?;
        Ok(Device::new(device, names))
    }

    pub fn lookup_device_id(&self, device_id: &str) -> Result<Device<E::Device>, EngineError> {
        let names = Arc::clone(&self.current().names);
        let device = self.engine.lookup_device_id(device_id, None)?;
        Ok(Device::new(device, names))
    }

    /// Fetches a device by id, computing virtual capabilities from `headers`.
    pub fn lookup_device_id_with_headers<H>(
        &self,
        device_id: &str,
        headers: &H,
    ) -> Result<Device<E::Device>, EngineError>
    where
        H: HeaderSource + ?Sized,
    {
        let snapshot = self.current();
        let subset = assemble(&snapshot.registry, headers);
        let device = self.engine.lookup_device_id(device_id, Some(&subset))?;
        Ok(Device::new(device, Arc::clone(&snapshot.names)))
    }

    fn lookup_subset(
        &self,
        snapshot: &Snapshot,
        subset: &ImportantHeaders,
    ) -> Result<Device<E::Device>, EngineError> {
        let device = self.engine.lookup_important_headers(subset)?;
        Ok(Device::new(device, Arc::clone(&snapshot.names)))
    }

    pub fn is_user_agent_frozen(&self, user_agent: &str) -> bool {
        self.engine.is_user_agent_frozen(user_agent)
    }

    pub fn device_ids(&self) -> Vec<String> {
        self.engine
            .device_ids()
            .into_iter()
            .filter(|id| !id.is_empty())
            .collect()
    }

    pub fn static_capability_names(&self) -> Vec<String> {
        self.engine.static_capability_names()
    }

    pub fn virtual_capability_names(&self) -> Vec<String> {
        self.engine.virtual_capability_names()
    }

    pub fn has_static_capability(&self, name: &str) -> bool {
        self.engine.has_static_capability(name)
    }

    pub fn has_virtual_capability(&self, name: &str) -> bool {
        self.engine.has_virtual_capability(name)
    }
}

impl<E: Engine + UpdaterControl> Detector<E> {
    /// Points the updater at a data snapshot URL.
    ///
    /// Engines from API 1.13.0.0 on are told this binding's User-Agent first;
    /// older ones would let it overwrite their own.
    pub fn set_updater_data_url(&self, url: &str) -> Result<(), EngineError> {
        let api_version = self.engine.api_version();
        if compare_versions(&api_version, UPDATER_USER_AGENT_MIN_API) != Ordering::Less {
            self.engine.set_updater_user_agent(BINDING_USER_AGENT)?;
        }
        self.engine.set_updater_data_url(url)
    }

    pub fn set_updater_user_agent(&self, user_agent: &str) -> Result<(), EngineError> {
        self.engine.set_updater_user_agent(user_agent)
    }

    pub fn updater_user_agent(&self) -> String {
        self.engine.updater_user_agent()
    }

    pub fn set_updater_frequency(&self, frequency: UpdateFrequency) -> Result<(), EngineError> {
        self.engine.set_updater_frequency(frequency)
    }

    pub fn set_updater_timeouts(&self, connection_ms: i32, transfer_ms: i32) -> Result<(), EngineError> {
        self.engine.set_updater_timeouts(connection_ms, transfer_ms)
    }

    pub fn set_updater_log_path(&self, path: &str) -> Result<(), EngineError> {
        self.engine.set_updater_log_path(path)
    }

    pub fn updater_run_once(&self) -> Result<(), EngineError> {
        self.engine.updater_run_once()
    }

    pub fn updater_start(&self) -> Result<(), EngineError> {
        self.engine.updater_start()
    }

    pub fn updater_stop(&self) -> Result<(), EngineError> {
        self.engine.updater_stop()
    }
}

fn build_snapshot<E: Engine>(engine: &E, cache_capability_names: bool) -> Result<Snapshot, Error> {
    let registry = HeaderRegistry::build(engine.important_header_names()?)?;

    let names = if cache_capability_names {
        CapabilityNameCache::build(
            engine
                .static_capability_names()
                .into_iter()
                .chain(engine.virtual_capability_names()),
        )
    } else {
        CapabilityNameCache::empty()
    };

    Ok(Snapshot {
        registry: Arc::new(registry),
        names: Arc::new(names),
    })
}
