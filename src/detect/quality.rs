//! Client-hint quality of an important-header subset.
//!
//! Browsers that freeze their User-Agent only reveal platform and version
//! details through `Sec-CH-UA-*` client hints. The tier tells the caller how
//! much of that detail reached the engine.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::detect::assembler::ImportantHeaders;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HeaderQuality {
    /// No client hints are present.
    None,
    /// Some of the hints needed for a precise detection are present.
    Basic,
    /// Every hint needed for a precise detection is present.
    Full,
}

impl fmt::Display for HeaderQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HeaderQuality::None => "None",
            HeaderQuality::Basic => "Basic",
            HeaderQuality::Full => "Full",
        };
        f.write_str(s)
    }
}

/// Which header names decide each tier.
///
/// The exact set depends on the engine version, so it is configuration
/// rather than a constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityMarkers {
    pub user_agent: String,
    pub required_full_tier_markers: Vec<String>,
    pub any_tier_markers: Vec<String>,
}

impl Default for QualityMarkers {
    fn default() -> Self {
        Self {
            user_agent: "User-Agent".to_string(),
            required_full_tier_markers: vec![
                "Sec-CH-UA".to_string(),
                "Sec-CH-UA-Platform".to_string(),
                "Sec-CH-UA-Platform-Version".to_string(),
                "Sec-CH-UA-Full-Version".to_string(),
            ],
            // Sec-CH-UA alone is sent by every Chromium browser and says
            // nothing beyond the frozen User-Agent.
            any_tier_markers: vec![
                "Sec-CH-UA-Platform".to_string(),
                "Sec-CH-UA-Platform-Version".to_string(),
                "Sec-CH-UA-Full-Version".to_string(),
                "Sec-CH-UA-Full-Version-List".to_string(),
                "Sec-CH-UA-Model".to_string(),
                "Sec-CH-UA-Mobile".to_string(),
                "Sec-CH-UA-Arch".to_string(),
                "Sec-CH-UA-Bitness".to_string(),
            ],
        }
    }
}

/// Scores [`ImportantHeaders`] against a set of [`QualityMarkers`].
///
/// Holds only lower-cased copies of the markers and is never mutated after
/// construction, so one instance can be shared by any number of threads.
#[derive(Debug, Clone)]
pub struct QualityClassifier {
    user_agent: String,
    required: Vec<String>,
    any: HashSet<String>,
}

impl Default for QualityClassifier {
    fn default() -> Self {
        Self::new(&QualityMarkers::default())
    }
}

impl QualityClassifier {
    pub fn new(markers: &QualityMarkers) -> Self {
        let mut required: Vec<String> = markers
            .required_full_tier_markers
            .iter()
            .map(|m| m.trim().to_ascii_lowercase())
            .filter(|m| !m.is_empty())
            .collect();
        required.sort_unstable();
        required.dedup();

        let any = markers
            .any_tier_markers
            .iter()
            .map(|m| m.trim().to_ascii_lowercase())
            .filter(|m| !m.is_empty())
            .collect();

        Self {
            user_agent: markers.user_agent.trim().to_ascii_lowercase(),
            required,
            any,
        }
    }

    /// Full needs the User-Agent and every required marker; Basic needs one
    /// of the any-tier markers; everything else, including an empty subset,
    /// is None. A required marker that is not also listed as an any-tier
    /// marker never makes a subset Basic on its own.
    pub fn classify(&self, subset: &ImportantHeaders) -> HeaderQuality {
        let present: HashSet<String> = subset.names().map(|n| n.to_ascii_lowercase()).collect();

        if !self.required.is_empty()
            && present.contains(&self.user_agent)
            && self.required.iter().all(|m| present.contains(m))
        {
            return HeaderQuality::Full;
        }

        if present.iter().any(|name| self.any.contains(name)) {
            return HeaderQuality::Basic;
        }

        HeaderQuality::None
    }
}
