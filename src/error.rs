//! Error types for the crate.
//!
//! Only [`ConfigurationError`] and [`ParseError`] originate here. Engine
//! failures arrive as native error codes and are mapped once, through
//! [`EngineError::from_code`], into [`EngineError`]; after that they are
//! passed to the caller untouched.

use std::fmt;

use indexmap::IndexMap;
use thiserror::Error;

/// Errors raised while building a registry or loading configuration.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// The engine reported zero important headers.
    #[error("important header list is empty")]
    EmptyRegistry,

    /// A header name was empty or whitespace only.
    #[error("important header name is empty")]
    EmptyHeaderName,

    /// Two names collide under case-insensitive comparison.
    #[error("duplicate important header name: {0}")]
    DuplicateHeaderName(String),

    /// The TOML document could not be deserialized.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors raised by [`RequestParser`](crate::http::parser::RequestParser).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed request line")]
    MalformedRequestLine,

    #[error("unknown request method: {0}")]
    UnknownMethod(String),

    #[error("unsupported HTTP version {0}.{1}")]
    UnsupportedVersion(u8, u8),

    #[error("malformed header line")]
    MalformedHeader,

    #[error("request head exceeds {0} bytes")]
    HeadTooLarge(usize),

    #[error("request head is incomplete")]
    Incomplete,
}

macro_rules! error_codes {
    ($($variant:ident = $code:literal => $desc:literal,)+) => {
        /// Native engine error codes. `0` is success and has no variant.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(i32)]
        pub enum ErrorCode {
            $($variant = $code,)+
        }

        impl ErrorCode {
            /// Maps a raw native code, returning `None` for success and for
            /// codes newer than this table.
            pub fn from_i32(code: i32) -> Option<Self> {
                match code {
                    $($code => Some(ErrorCode::$variant),)+
                    _ => None,
                }
            }

            /// Canonical description used when the engine gives no message.
            pub fn description(self) -> &'static str {
                match self {
                    $(ErrorCode::$variant => $desc,)+
                }
            }
        }
    };
}

error_codes! {
    InvalidHandle = 1 => "invalid handle",
    AlreadyLoad = 2 => "already loaded",
    FileNotFound = 3 => "file not found",
    UnexpectedEndOfFile = 4 => "unexpected end of file",
    InputOutputFailure = 5 => "input output failure",
    DeviceNotFound = 6 => "device not found",
    CapabilityNotFound = 7 => "capability not found",
    InvalidCapabilityValue = 8 => "invalid capability value",
    VirtualCapabilityNotFound = 9 => "virtual capability not found",
    CantLoadCapabilityNotFound = 10 => "can't load capability not found",
    CantLoadVirtualCapabilityNotFound = 11 => "can't load virtual capability not found",
    EmptyId = 12 => "empty id",
    CapabilityGroupNotFound = 13 => "capability group not found",
    CapabilityGroupMismatch = 14 => "capability group mismatch",
    DeviceAlreadyDefined = 15 => "device already defined",
    UseragentAlreadyDefined = 16 => "useragent already defined",
    DeviceHierarchyCircularReference = 17 => "device hierarchy circular reference",
    Unknown = 18 => "unknown error",
    InvalidUseragentPriority = 19 => "invalid useragent priority",
    InvalidParameter = 20 => "invalid parameter",
    InvalidCacheSize = 21 => "invalid cache size",
    XmlConsistency = 22 => "xml consistency error",
    Internal = 23 => "internal error",
    VirtualCapabilityNotAvailable = 24 => "virtual capability not available",
    MissingUseragent = 25 => "missing useragent",
    XmlParse = 26 => "xml parse error",
    UpdaterInvalidDataUrl = 27 => "updater invalid data url",
    UpdaterInvalidLicense = 28 => "updater invalid license",
    UpdaterNetworkError = 29 => "updater network error",
    EngineNotInitialized = 30 => "engine not initialized",
    UpdaterAlreadyRunning = 31 => "updater already running",
    UpdaterNotRunning = 32 => "updater not running",
    UpdaterTooManyRequests = 33 => "updater too many requests",
    UpdaterCmdlineDownloaderUnavailable = 34 => "updater cmdline downloader unavailable",
    UpdaterTimedout = 35 => "updater timed out",
    RootNotSet = 36 => "root not set",
    WrongEngineTarget = 37 => "wrong engine target",
    CannotFilterStaticCap = 38 => "cannot filter static cap",
    UnableToAllocateMemory = 39 => "unable to allocate memory",
    EngineNotLoaded = 40 => "engine not loaded",
    UpdaterCannotStartThread = 41 => "updater cannot start thread",
    EnumEmptySet = 42 => "enum empty set",
    UpdaterWrongDataFormat = 43 => "updater wrong data format",
    UpdaterInvalidUseragent = 44 => "updater invalid useragent",
    PermissionDenied = 45 => "permission denied",
    NotZipFile = 46 => "not zip file",
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A failure reported by the native engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A code present in [`ErrorCode`]. `message` is the engine's own text.
    #[error("{message}")]
    Native { code: ErrorCode, message: String },

    /// A code this table does not know, typically from a newer engine.
    #[error("{message} (code {code})")]
    Unmapped { code: i32, message: String },
}

impl EngineError {
    /// Builds an error from a raw native code and the engine's message.
    ///
    /// Returns `None` for `0`. An empty message is replaced with the code's
    /// canonical description so the error always renders something useful.
    pub fn from_code(code: i32, message: impl Into<String>) -> Option<Self> {
        if code == 0 {
            return None;
        }

        let message = message.into();
        match ErrorCode::from_i32(code) {
            Some(code) => {
                let message = if message.is_empty() {
                    code.description().to_string()
                } else {
                    message
                };
                Some(EngineError::Native { code, message })
            }
            None => {
                let message = if message.is_empty() {
                    format!("undefined error message for code {code}")
                } else {
                    message
                };
                Some(EngineError::Unmapped { code, message })
            }
        }
    }

    /// Shorthand for a mapped code carrying its canonical description.
    pub fn native(code: ErrorCode) -> Self {
        EngineError::Native {
            code,
            message: code.description().to_string(),
        }
    }

    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            EngineError::Native { code, .. } => Some(*code),
            EngineError::Unmapped { .. } => None,
        }
    }

    pub fn raw_code(&self) -> i32 {
        match self {
            EngineError::Native { code, .. } => *code as i32,
            EngineError::Unmapped { code, .. } => *code,
        }
    }

    /// `true` when this error carries `code`, whatever its message.
    pub fn is(&self, code: ErrorCode) -> bool {
        self.code() == Some(code)
    }
}

/// A batch capability read where at least one name failed.
///
/// The values that did resolve are kept so the caller can still use them.
#[derive(Debug, Clone)]
pub struct CapabilityBatchError {
    pub values: IndexMap<String, String>,
    pub failed: Vec<String>,
    pub source: EngineError,
}

impl fmt::Display for CapabilityBatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} capabilities failed, first error: {}",
            self.failed.len(),
            self.failed.len() + self.values.len(),
            self.source
        )
    }
}

impl std::error::Error for CapabilityBatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Crate-level error for operations that span several layers.
#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("request parse error: {0}")]
    Parse(#[from] ParseError),
}
