use log::warn;
use serde::Deserialize;

use crate::detect::QualityMarkers;
use crate::engine::FallbackCacheMode;
use crate::error::ConfigurationError;

pub const DEFAULT_MAX_REQUEST_HEAD_SIZE: usize = 8192;

/// Settings for a [`Detector`](crate::engine::Detector).
///
/// The important header list itself is not configured here: it always comes
/// from the engine, which knows which headers its matcher reads.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub quality: QualityMarkers,

    /// Pre-convert every capability name once so capability reads do not
    /// allocate a C string per call.
    pub cache_capability_names: bool,

    /// Applied to the engine at start-up when set.
    pub extra_headers_experimental: Option<bool>,
    pub capability_fallback_cache: Option<FallbackCacheMode>,

    /// Largest request head [`Detector::lookup_raw_head`](crate::engine::Detector::lookup_raw_head)
    /// will parse.
    pub max_request_head_size: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            quality: QualityMarkers::default(),
            cache_capability_names: true,

            extra_headers_experimental: None,
            capability_fallback_cache: None,

            max_request_head_size: DEFAULT_MAX_REQUEST_HEAD_SIZE,
        }
    }
}

impl DetectorConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigurationError> {
        Ok(toml::from_str::<DetectorConfig>(content)?)
    }

    /// Loads the config at `path`, falling back to defaults when the file is
    /// missing or invalid.
    pub fn from_file(path: &str) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                warn!("Fail to read {}: {err}. Falling back to default config", path);
                return DetectorConfig::default();
            }
        };

        match Self::from_toml_str(content.as_str()) {
            Ok(config) => config,
            Err(err) => {
                warn!("Fail to deserialize config file {}: {err}. Falling back to default config", path);
                DetectorConfig::default()
            }
        }
    }
}
