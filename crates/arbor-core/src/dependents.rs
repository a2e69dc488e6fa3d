//! Traits for the subsystems that consume resolved configuration.
//!
//! The config core owns precedence and pushes derived settings outward; the
//! cache controller and the logging backend receive them through these traits.
//! Eviction internals and log emission live with the implementations.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tracing::info;

/// Settings sink implemented by the parse-tree cache controller.
pub trait CacheControl: Send + Sync {
    fn set_enabled(&self, enabled: bool);
    fn set_max_size_mb(&self, max_size_mb: u64);
    fn set_ttl_seconds(&self, ttl_seconds: u64);
}

/// Settings sink implemented by the process logging backend.
pub trait LogLevelControl: Send + Sync {
    /// Re-point the managed root logger at `level` and re-synchronize handler
    /// levels across the hierarchy. Unrecognized level names fall back to INFO.
    fn update_root_level(&self, level: &str);
}

/// Shared cache settings: the config core writes them, the cache reads them.
///
/// Plain atomics; the cache polls current values on its own schedule, so no
/// locking is needed on either side.
#[derive(Debug)]
pub struct CacheSettings {
    enabled: AtomicBool,
    max_size_mb: AtomicU64,
    ttl_seconds: AtomicU64,
}

impl CacheSettings {
    pub fn new(enabled: bool, max_size_mb: u64, ttl_seconds: u64) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
            max_size_mb: AtomicU64::new(max_size_mb),
            ttl_seconds: AtomicU64::new(ttl_seconds),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn max_size_mb(&self) -> u64 {
        self.max_size_mb.load(Ordering::Relaxed)
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds.load(Ordering::Relaxed)
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self::new(true, 100, 300)
    }
}

impl CacheControl for CacheSettings {
    fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
        info!(enabled, "cache enabled flag updated");
    }

    fn set_max_size_mb(&self, max_size_mb: u64) {
        self.max_size_mb.store(max_size_mb, Ordering::Relaxed);
        info!(max_size_mb, "cache size limit updated");
    }

    fn set_ttl_seconds(&self, ttl_seconds: u64) {
        self.ttl_seconds.store(ttl_seconds, Ordering::Relaxed);
        info!(ttl_seconds, "cache ttl updated");
    }
}
