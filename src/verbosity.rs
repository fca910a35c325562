use std::fmt;
use std::str::FromStr;

/// Environment variable read by [`Verbosity::from_env`].
pub const VERBOSITY_ENV_VAR: &str = "DBAPI_LOG_LEVEL";

/// Logging detail level observed when an error record is built.
///
/// Only [`Verbosity::Debug`] and [`Verbosity::Info`] embed the request id
/// into rendered messages. The level is always passed explicitly; nothing
/// in this crate consults global logger state on its own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Verbosity {
    /// Most detailed; includes the request id.
    Debug,
    /// Includes the request id.
    Info,
    /// Default level.
    #[default]
    Warning,
    /// Errors only.
    Error,
    /// Least detailed.
    Critical,
}

impl Verbosity {
    /// Whether rendered messages should carry the request id.
    pub fn includes_request_id(self) -> bool {
        matches!(self, Self::Debug | Self::Info)
    }

    /// Reads the level from `DBAPI_LOG_LEVEL`.
    ///
    /// Returns an error if the variable is missing, empty, or not a known level.
    pub fn from_env() -> std::result::Result<Self, String> {
        let raw = std::env::var(VERBOSITY_ENV_VAR)
            .map_err(|_| format!("missing {VERBOSITY_ENV_VAR} environment variable"))?;
        if raw.trim().is_empty() {
            return Err(format!("{VERBOSITY_ENV_VAR} is set but empty"));
        }
        raw.parse()
    }

    /// Derives the level from the active `tracing` max level.
    #[cfg(feature = "tracing")]
    pub fn current() -> Self {
        tracing::level_filters::LevelFilter::current().into()
    }
}

impl FromStr for Verbosity {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            // no finer level exists here
            "trace" | "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            "critical" | "off" => Ok(Self::Critical),
            other => Err(format!("unknown verbosity level '{other}'")),
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        })
    }
}

#[cfg(feature = "tracing")]
impl From<tracing::Level> for Verbosity {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE | tracing::Level::DEBUG => Self::Debug,
            tracing::Level::INFO => Self::Info,
            tracing::Level::WARN => Self::Warning,
            tracing::Level::ERROR => Self::Error,
        }
    }
}

#[cfg(feature = "tracing")]
impl From<tracing::level_filters::LevelFilter> for Verbosity {
    fn from(filter: tracing::level_filters::LevelFilter) -> Self {
        filter.into_level().map_or(Self::Critical, Self::from)
    }
}
