//! The configuration manager: one live `ServerConfig` instance plus the
//! precedence engine that keeps it consistent.
//!
//! Precedence, highest first: environment variables, explicit
//! [`ConfigManager::update_value`] calls, the loaded file, built-in defaults.
//! The ordering is a standing invariant — the environment overlay is
//! re-applied after every mutating call, so a direct update can still be
//! overridden by an already-set variable.

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use arbor_core::{CacheControl, LogLevelControl};

use crate::schema::ServerConfig;
use crate::{env, fields, loader};

/// Owns the single live configuration and pushes derived settings to
/// dependents. No method returns an error: every fallible step degrades to
/// "retain the last good configuration" plus a log record.
pub struct ConfigManager {
    config: Arc<RwLock<ServerConfig>>,
    cache: Option<Arc<dyn CacheControl>>,
    levels: Option<Arc<dyn LogLevelControl>>,
}

impl ConfigManager {
    /// Defaults with the environment overlay applied immediately.
    pub fn new() -> Self {
        Self::with_initial(ServerConfig::default())
    }

    /// Start from a caller-provided config; the overlay still runs so
    /// environment variables keep top precedence from the first read on.
    pub fn with_initial(mut initial: ServerConfig) -> Self {
        env::apply_env_overrides(&mut initial);
        Self {
            config: Arc::new(RwLock::new(initial)),
            cache: None,
            levels: None,
        }
    }

    /// Register the cache controller that receives `cache.*` settings.
    pub fn with_cache_control(mut self, cache: Arc<dyn CacheControl>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Register the logging backend that receives `log_level` changes.
    pub fn with_level_control(mut self, levels: Arc<dyn LogLevelControl>) -> Self {
        self.levels = Some(levels);
        self
    }

    /// Snapshot of the current configuration.
    pub fn get(&self) -> ServerConfig {
        self.config.read().clone()
    }

    /// Shared handle to the live instance, for readers that want to follow
    /// reconfiguration without going through the manager.
    pub fn shared(&self) -> Arc<RwLock<ServerConfig>> {
        Arc::clone(&self.config)
    }

    /// Load a YAML file into the live configuration.
    ///
    /// On success every field is copied by value into the live instance, the
    /// environment overlay is re-applied so `ARBOR_*` variables win over the
    /// just-loaded file, and `cache.*` / `log_level` are pushed to the
    /// registered dependents. Any loader failure leaves the live instance
    /// untouched. Returns the (possibly unchanged) current snapshot.
    pub fn load_from_file(&self, path: impl AsRef<Path>) -> ServerConfig {
        let path = path.as_ref();
        info!(path = %path.display(), "loading configuration");

        match loader::load_file(path) {
            Ok(new_config) => {
                {
                    let mut live = self.config.write();
                    live.copy_from(&new_config);
                    env::apply_env_overrides(&mut live);
                }
                info!(path = %path.display(), "configuration loaded");
                self.push_to_dependents();
            }
            Err(e) => e.log(path),
        }
        self.get()
    }

    /// Update a single value by dotted path: `"key"` or `"section.key"`.
    ///
    /// Unknown paths, sections, or keys warn and change nothing. Deeper paths
    /// are rejected as unknown — the two-level contract is deliberate. After
    /// any outcome the environment overlay is re-applied.
    pub fn update_value(&self, path: &str, value: &Value) {
        let parts: Vec<&str> = path.split('.').collect();
        let spec = match *parts.as_slice() {
            [key] => {
                let spec = fields::lookup(None, key);
                if spec.is_none() {
                    warn!(path, "unknown config path");
                }
                spec
            }
            [section, key] => {
                if !fields::is_section(section) {
                    warn!(path, section, "unknown config section");
                    None
                } else {
                    let spec = fields::lookup(Some(section), key);
                    if spec.is_none() {
                        warn!(path, section, key, "unknown config key in section");
                    }
                    spec
                }
            }
            _ => {
                warn!(path, "unknown config path");
                None
            }
        };

        let mut updated = false;
        if let Some(spec) = spec {
            let mut live = self.config.write();
            if (spec.set_json)(&mut live, value) {
                debug!(path, %value, "updated config value");
                updated = true;
            } else {
                warn!(path, %value, "value has the wrong type for this field, ignoring");
            }
        }

        // log_level additionally re-points the logging hierarchy
        if updated && path == "log_level" {
            if let (Some(levels), Some(level)) = (&self.levels, value.as_str()) {
                levels.update_root_level(level);
            }
        }

        // Standing invariant: environment variables keep precedence even over
        // a direct update.
        env::apply_env_overrides(&mut self.config.write());
    }

    /// Nested snapshot of the dependent-facing subset of the configuration.
    pub fn to_dict(&self) -> Value {
        let config = self.config.read();
        json!({
            "cache": {
                "enabled": config.cache.enabled,
                "max_size_mb": config.cache.max_size_mb,
                "ttl_seconds": config.cache.ttl_seconds,
            },
            "security": {
                "max_file_size_mb": config.security.max_file_size_mb,
                "excluded_dirs": config.security.excluded_dirs,
            },
            "language": {
                "auto_install": config.language.auto_install,
                "default_max_depth": config.language.default_max_depth,
            },
            "log_level": config.log_level,
        })
    }

    fn push_to_dependents(&self) {
        let config = self.get();

        if let Some(cache) = &self.cache {
            info!(
                enabled = config.cache.enabled,
                max_size_mb = config.cache.max_size_mb,
                ttl_seconds = config.cache.ttl_seconds,
                "applying cache settings"
            );
            cache.set_enabled(config.cache.enabled);
            cache.set_max_size_mb(config.cache.max_size_mb);
            cache.set_ttl_seconds(config.cache.ttl_seconds);
        } else {
            debug!("no cache controller registered, skipping cache push");
        }

        if let Some(levels) = &self.levels {
            levels.update_root_level(&config.log_level);
            debug!(level = %config.log_level, "applied log level to managed loggers");
        } else {
            debug!("no logging backend registered, skipping level push");
        }
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
