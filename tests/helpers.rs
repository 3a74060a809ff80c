// Shared fake engine for integration tests.
//
// The fake stands in for the native library: it hands out device handles,
// counts how many were acquired and released, and records what the
// detector passed to it.

#![allow(dead_code)] // not every test file uses every helper

use std::collections::HashMap;
use std::ffi::CStr;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use hintnet::detect::ImportantHeaders;
use hintnet::engine::{EngineAttr, MatchType, UpdateFrequency, UpdaterControl};
use hintnet::{Engine, EngineError, ErrorCode, NativeDevice};

pub const CHROME_LINUX_UA: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/96.0.4664.93 Safari/537.36";

pub const BASE_HEADERS: &[&str] = &[
    "User-Agent",
    "Sec-CH-UA",
    "Sec-CH-UA-Platform",
    "Sec-CH-UA-Platform-Version",
    "Sec-CH-UA-Full-Version",
];

pub const EXPERIMENTAL_HEADERS: &[&str] = &["Sec-CH-UA-Model", "X-UCBrowser-Device-UA"];

pub const STATIC_CAPS: &[(&str, &str)] = &[
    ("brand_name", "Google"),
    ("model_name", "Pixel 4 XL"),
    ("resolution_width", "1440"),
];

pub const VIRTUAL_CAPS: &[(&str, &str)] = &[
    ("is_smartphone", "true"),
    ("complete_device_name", "Google Pixel 4 XL"),
    ("pixel_density", "537"),
];

pub const DEVICE_IDS: &[&str] = &["generic_web_browser", "google_pixel_4_xl_ver1", ""];

#[derive(Debug, Default)]
pub struct Counters {
    pub acquired: AtomicUsize,
    pub released: AtomicUsize,
}

impl Counters {
    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

pub struct FakeDevice {
    id: String,
    original_user_agent: String,
    platform: Option<String>,
    counters: Arc<Counters>,
}

impl FakeDevice {
    fn acquire(id: &str, user_agent: &str, platform: Option<String>, counters: &Arc<Counters>) -> Self {
        counters.acquired.fetch_add(1, Ordering::SeqCst);
        Self {
            id: id.to_string(),
            original_user_agent: user_agent.to_string(),
            platform,
            counters: Arc::clone(counters),
        }
    }
}

impl Drop for FakeDevice {
    fn drop(&mut self) {
        self.counters.released.fetch_add(1, Ordering::SeqCst);
    }
}

fn cap(table: &[(&str, &str)], name: &CStr, missing: ErrorCode) -> Result<String, EngineError> {
    let name = name.to_str().map_err(|_| EngineError::native(ErrorCode::InvalidParameter))?;
    table
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, v)| v.to_string())
        .ok_or_else(|| EngineError::native(missing))
}

fn as_int(value: String) -> Result<i64, EngineError> {
    value
        .parse::<i64>()
        .map_err(|_| EngineError::native(ErrorCode::InvalidCapabilityValue))
}

impl NativeDevice for FakeDevice {
    fn device_id(&self) -> Result<String, EngineError> {
        Ok(self.id.clone())
    }

    fn root_id(&self) -> String {
        "generic".to_string()
    }

    fn parent_id(&self) -> String {
        "generic".to_string()
    }

    fn is_root(&self) -> bool {
        false
    }

    fn match_type(&self) -> MatchType {
        MatchType::Conclusive
    }

    fn user_agent(&self) -> Result<String, EngineError> {
        Ok("DO_NOT_MATCH_GENERIC".to_string())
    }

    fn original_user_agent(&self) -> Result<String, EngineError> {
        Ok(self.original_user_agent.clone())
    }

    fn normalized_user_agent(&self) -> Result<String, EngineError> {
        Ok(self.original_user_agent.to_lowercase())
    }

    fn static_cap(&self, name: &CStr) -> Result<String, EngineError> {
        cap(STATIC_CAPS, name, ErrorCode::CapabilityNotFound)
    }

    fn static_cap_as_int(&self, name: &CStr) -> Result<i64, EngineError> {
        as_int(self.static_cap(name)?)
    }

    fn virtual_cap(&self, name: &CStr) -> Result<String, EngineError> {
        if name.to_bytes() == b"advertised_device_os" {
            return Ok(self.platform.clone().unwrap_or_default());
        }
        cap(VIRTUAL_CAPS, name, ErrorCode::VirtualCapabilityNotFound)
    }

    fn virtual_cap_as_int(&self, name: &CStr) -> Result<i64, EngineError> {
        as_int(self.virtual_cap(name)?)
    }
}

pub struct FakeEngine {
    pub api_version: String,
    pub counters: Arc<Counters>,
    pub extra_headers: AtomicBool,
    pub fallback_cache: AtomicI32,
    pub fail_header_list: AtomicBool,
    pub last_subset: Mutex<Vec<(String, String)>>,
    pub updater_calls: Mutex<Vec<String>>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::with_api_version("1.13.2.1")
    }

    pub fn with_api_version(version: &str) -> Self {
        Self {
            api_version: version.to_string(),
            counters: Arc::new(Counters::default()),
            extra_headers: AtomicBool::new(false),
            fallback_cache: AtomicI32::new(0),
            fail_header_list: AtomicBool::new(false),
            last_subset: Mutex::new(Vec::new()),
            updater_calls: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, headers: &ImportantHeaders) {
        *self.last_subset.lock().unwrap() = headers
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect();
    }

    fn updater(&self, call: String) -> Result<(), EngineError> {
        self.updater_calls.lock().unwrap().push(call);
        Ok(())
    }
}

impl Engine for FakeEngine {
    type Device = FakeDevice;

    fn api_version(&self) -> String {
        self.api_version.clone()
    }

    fn info(&self) -> String {
        "fake data for tests".to_string()
    }

    fn last_load_time(&self) -> String {
        "2026-10-18 00:00:00".to_string()
    }

    fn last_updated(&self) -> String {
        "2026-10-17".to_string()
    }

    fn important_header_names(&self) -> Result<Vec<String>, EngineError> {
        if self.fail_header_list.load(Ordering::SeqCst) {
            return Err(EngineError::native(ErrorCode::EngineNotLoaded));
        }
        let mut names: Vec<String> = BASE_HEADERS.iter().map(|s| s.to_string()).collect();
        if self.extra_headers.load(Ordering::SeqCst) {
            names.extend(EXPERIMENTAL_HEADERS.iter().map(|s| s.to_string()));
        }
        Ok(names)
    }

    fn static_capability_names(&self) -> Vec<String> {
        STATIC_CAPS.iter().map(|(n, _)| n.to_string()).collect()
    }

    fn virtual_capability_names(&self) -> Vec<String> {
        VIRTUAL_CAPS.iter().map(|(n, _)| n.to_string()).collect()
    }

    fn device_ids(&self) -> Vec<String> {
        DEVICE_IDS.iter().map(|s| s.to_string()).collect()
    }

    fn has_static_capability(&self, name: &str) -> bool {
        STATIC_CAPS.iter().any(|(n, _)| *n == name)
    }

    fn has_virtual_capability(&self, name: &str) -> bool {
        VIRTUAL_CAPS.iter().any(|(n, _)| *n == name)
    }

    fn is_user_agent_frozen(&self, user_agent: &str) -> bool {
        user_agent.contains("Chrome/") && user_agent.contains(".0.0.0")
    }

    fn set_attr(&self, attr: EngineAttr, value: i32) -> Result<(), EngineError> {
        match attr {
            EngineAttr::ExtraHeadersExperimental => self.extra_headers.store(value != 0, Ordering::SeqCst),
            EngineAttr::CapabilityFallbackCache => {
                if !(0..=2).contains(&value) {
                    return Err(EngineError::native(ErrorCode::InvalidParameter));
                }
                self.fallback_cache.store(value, Ordering::SeqCst)
            }
        }
        Ok(())
    }

    fn attr(&self, attr: EngineAttr) -> Result<i32, EngineError> {
        Ok(match attr {
            EngineAttr::ExtraHeadersExperimental => i32::from(self.extra_headers.load(Ordering::SeqCst)),
            EngineAttr::CapabilityFallbackCache => self.fallback_cache.load(Ordering::SeqCst),
        })
    }

    fn lookup_user_agent(&self, user_agent: &str) -> Result<FakeDevice, EngineError> {
        if user_agent.is_empty() {
            return Err(EngineError::native(ErrorCode::MissingUseragent));
        }
        Ok(FakeDevice::acquire("generic_web_browser", user_agent, None, &self.counters))
    }

    fn lookup_important_headers(&self, headers: &ImportantHeaders) -> Result<FakeDevice, EngineError> {
        self.record(headers);
        let user_agent = headers
            .get("User-Agent")
            .ok_or_else(|| EngineError::native(ErrorCode::MissingUseragent))?;
        let platform = headers.get("Sec-CH-UA-Platform").map(str::to_string);
        let id = if platform.is_some() {
            "google_pixel_4_xl_ver1"
        } else {
            "generic_web_browser"
        };
        Ok(FakeDevice::acquire(id, user_agent, platform, &self.counters))
    }

    fn lookup_device_id(
        &self,
        device_id: &str,
        headers: Option<&ImportantHeaders>,
    ) -> Result<FakeDevice, EngineError> {
        if device_id.is_empty() {
            return Err(EngineError::native(ErrorCode::EmptyId));
        }
        if !DEVICE_IDS.contains(&device_id) {
            return Err(EngineError::Native {
                code: ErrorCode::DeviceNotFound,
                message: format!("device id '{device_id}' not found"),
            });
        }
        if let Some(headers) = headers {
            self.record(headers);
        }
        let user_agent = headers.and_then(|h| h.get("User-Agent")).unwrap_or_default();
        let platform = headers
            .and_then(|h| h.get("Sec-CH-UA-Platform"))
            .map(str::to_string);
        Ok(FakeDevice::acquire(device_id, user_agent, platform, &self.counters))
    }
}

impl UpdaterControl for FakeEngine {
    fn set_updater_user_agent(&self, user_agent: &str) -> Result<(), EngineError> {
        self.updater(format!("user_agent:{user_agent}"))
    }

    fn updater_user_agent(&self) -> String {
        self.updater_calls
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find_map(|c| c.strip_prefix("user_agent:").map(str::to_string))
            .unwrap_or_else(|| "libengine".to_string())
    }

    fn set_updater_data_url(&self, url: &str) -> Result<(), EngineError> {
        if !url.starts_with("https://") {
            return Err(EngineError::native(ErrorCode::UpdaterInvalidDataUrl));
        }
        self.updater(format!("data_url:{url}"))
    }

    fn set_updater_frequency(&self, frequency: UpdateFrequency) -> Result<(), EngineError> {
        self.updater(format!("frequency:{frequency:?}"))
    }

    fn set_updater_timeouts(&self, connection_ms: i32, transfer_ms: i32) -> Result<(), EngineError> {
        self.updater(format!("timeouts:{connection_ms}:{transfer_ms}"))
    }

    fn set_updater_log_path(&self, path: &str) -> Result<(), EngineError> {
        self.updater(format!("log_path:{path}"))
    }

    fn updater_run_once(&self) -> Result<(), EngineError> {
        self.updater("run_once".to_string())
    }

    fn updater_start(&self) -> Result<(), EngineError> {
        self.updater("start".to_string())
    }

    fn updater_stop(&self) -> Result<(), EngineError> {
        Err(EngineError::native(ErrorCode::UpdaterNotRunning))
    }
}

pub fn headers(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(n, v)| (n.to_string(), v.to_string()))
        .collect()
}
