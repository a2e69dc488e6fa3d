//! # arbor-config
//!
//! Layered configuration for the arbor server. Values resolve with a strict
//! precedence: environment variables (`ARBOR_*`) over explicit
//! [`ConfigManager::update_value`] calls over `config.yaml` over built-in
//! defaults — and the ordering is re-asserted after every mutation, not
//! computed once at startup.
//!
//! No operation on the public surface returns an error: a missing file, a
//! malformed document, or an unconvertible environment value degrades to
//! "keep the last good configuration" plus a log record.

pub mod env;
pub mod fields;
pub mod loader;
pub mod manager;
pub mod schema;

pub use manager::ConfigManager;
pub use schema::{CacheConfig, LanguageConfig, SecurityConfig, ServerConfig};
