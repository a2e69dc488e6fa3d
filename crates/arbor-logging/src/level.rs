use std::fmt;

/// Environment variable naming the process logging threshold.
pub const LOG_LEVEL_VAR: &str = "ARBOR_LOG_LEVEL";

/// Logging threshold levels recognized by the arbor server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    /// Parse a level name, case-insensitive. Unrecognized names fall back to
    /// `Info` rather than failing — a bad value must never abort the process.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_uppercase().as_str() {
            "DEBUG" => Self::Debug,
            "INFO" => Self::Info,
            "WARNING" => Self::Warning,
            "ERROR" => Self::Error,
            "CRITICAL" => Self::Critical,
            _ => Self::Info,
        }
    }

    /// Read the process threshold from `ARBOR_LOG_LEVEL`, defaulting to INFO.
    pub fn from_env() -> Self {
        match std::env::var(LOG_LEVEL_VAR) {
            Ok(v) => Self::parse(&v),
            Err(_) => Self::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }

    /// Filter directive for the tracing backend. `tracing` has no CRITICAL,
    /// so it maps to `error`.
    pub fn filter_directive(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warn",
            Self::Error | Self::Critical => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
