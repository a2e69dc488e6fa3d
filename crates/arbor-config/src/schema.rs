use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration — maps to `config.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub cache: CacheConfig,
    pub security: SecurityConfig,
    pub language: LanguageConfig,
    /// Process log level: "DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL".
    pub log_level: String,
    /// Cap on results returned by a single query when the caller gives none.
    pub max_results_default: u32,
}

// ── Cache ──────────────────────────────────────────────────────

/// Parse-tree cache behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    pub max_size_mb: u64,
    /// Time-to-live for cached trees.
    pub ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_size_mb: 100,
            ttl_seconds: 300,
        }
    }
}

// ── Security ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub max_file_size_mb: u64,
    /// Directory names skipped during project scans.
    pub excluded_dirs: Vec<String>,
    /// File extensions accepted for analysis. `None` means all are allowed.
    pub allowed_extensions: Option<Vec<String>>,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 5,
            excluded_dirs: vec![".git".into(), "node_modules".into(), "target".into()],
            allowed_extensions: None,
        }
    }
}

// ── Language ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    /// DEPRECATED: grammars ship bundled now; the flag is parsed but ignored.
    pub auto_install: bool,
    /// Default depth cap for syntax-tree traversal.
    pub default_max_depth: u32,
    pub preferred_languages: Vec<String>,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            auto_install: false,
            default_max_depth: 5,
            preferred_languages: vec![],
        }
    }
}

// ── Default for root ───────────────────────────────────────────

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            security: SecurityConfig::default(),
            language: LanguageConfig::default(),
            log_level: "INFO".into(),
            max_results_default: 100,
        }
    }
}

impl ServerConfig {
    /// Load from a YAML file, falling back to defaults on any failure, then
    /// apply environment overrides so `ARBOR_*` variables keep top precedence.
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let mut config = match crate::loader::load_file(path) {
            Ok(config) => config,
            Err(e) => {
                e.log(path);
                Self::default()
            }
        };
        crate::env::apply_env_overrides(&mut config);
        config
    }

    /// Defaults plus environment overrides, no file involved.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        crate::env::apply_env_overrides(&mut config);
        config
    }

    /// Copy every field from `other` into `self`.
    ///
    /// Sequences and optional sequences are cloned so the live instance never
    /// shares storage with a freshly loaded one across reconfiguration.
    pub fn copy_from(&mut self, other: &ServerConfig) {
        self.cache.enabled = other.cache.enabled;
        self.cache.max_size_mb = other.cache.max_size_mb;
        self.cache.ttl_seconds = other.cache.ttl_seconds;

        self.security.max_file_size_mb = other.security.max_file_size_mb;
        self.security.excluded_dirs = other.security.excluded_dirs.clone();
        self.security.allowed_extensions = other.security.allowed_extensions.clone();

        self.language.auto_install = other.language.auto_install;
        self.language.default_max_depth = other.language.default_max_depth;
        self.language.preferred_languages = other.language.preferred_languages.clone();

        self.log_level = other.log_level.clone();
        self.max_results_default = other.max_results_default;
    }
}
