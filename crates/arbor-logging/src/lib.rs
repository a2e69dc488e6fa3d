//! # arbor-logging
//!
//! Hierarchical log-level coordination for the arbor server.
//!
//! A [`LevelCoordinator`] owns a forest of named logger nodes rooted at the
//! managed package name. Levels resolve through dotted-name inheritance:
//! a node with no explicit level inherits from the nearest ancestor that has
//! one, defaulting to INFO. Synchronization passes keep every handler's
//! threshold equal to its logger's effective level without ever installing
//! explicit levels on descendants — a module's own override survives global
//! level changes.
//!
//! The coordinator is plain owned state, constructed explicitly (one per
//! process, one per test); there is no global registry.

pub mod bootstrap;
pub mod coordinator;
pub mod level;

pub use bootstrap::init_tracing;
pub use coordinator::{Handler, LevelCoordinator, LoggerSnapshot};
pub use level::{LOG_LEVEL_VAR, LogLevel};
