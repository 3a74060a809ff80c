//! hintnet: important-header assembly and client-hint quality scoring for a
//! native device-detection engine.
//!
//! The engine itself (device matching, device data, caching, updates) is an
//! opaque native library reached through the [`engine::Engine`] trait. This
//! crate decides which of a request's headers the engine gets to see, how
//! much client-hint detail they carry, and keeps engine handles and errors
//! well-behaved on the Rust side.
//!
//! # Example
//!
//! ```
//! use hintnet::detect::{HeaderQuality, HeaderRegistry, QualityClassifier, assemble};
//! use hintnet::http::HttpHeaders;
//!
//! let registry = HeaderRegistry::build([
//!     "User-Agent",
//!     "Sec-CH-UA",
//!     "Sec-CH-UA-Platform",
//!     "Sec-CH-UA-Platform-Version",
//!     "Sec-CH-UA-Full-Version",
//! ])?;
//!
//! let headers: HttpHeaders = [
//!     ("user-agent", "Mozilla/5.0 (X11; Linux x86_64)"),
//!     ("SEC-CH-UA-PLATFORM", "Linux"),
//!     ("Accept", "*/*"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let subset = assemble(&registry, &headers);
//! assert_eq!(subset.names().collect::<Vec<_>>(), ["User-Agent", "Sec-CH-UA-Platform"]);
//! assert_eq!(QualityClassifier::default().classify(&subset), HeaderQuality::Basic);
//! # Ok::<(), hintnet::error::ConfigurationError>(())
//! ```

pub mod config;
pub mod detect;
pub mod engine;
pub mod error;
pub mod http;
pub mod logger;
pub mod version;

pub use config::DetectorConfig;
pub use detect::{HeaderQuality, HeaderRegistry, ImportantHeaders, QualityClassifier, QualityMarkers};
pub use engine::{Detection, Detector, Device, Engine, NativeDevice};
pub use error::{ConfigurationError, EngineError, Error, ErrorCode};
pub use http::{HeaderSource, HttpHeaders, HttpRequest};
