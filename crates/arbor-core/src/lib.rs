//! # arbor-core
//!
//! Core error types and the dependent-facing traits shared by every other
//! crate in the workspace. The configuration core pushes resolved settings to
//! its dependents through the traits defined here, so the config crate never
//! links against a concrete cache or logging implementation.

pub mod dependents;
pub mod error;

pub use dependents::{CacheControl, CacheSettings, LogLevelControl};
pub use error::{ArborError, Result};
