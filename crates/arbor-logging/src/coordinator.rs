//! The logger forest and its synchronization rules.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use arbor_core::LogLevelControl;

use crate::bootstrap;
use crate::level::LogLevel;

/// A handler attached to a logger node. It carries its own threshold, which
/// synchronization passes keep equal to the owning logger's effective level.
#[derive(Debug, Clone)]
pub struct Handler {
    pub name: String,
    pub level: LogLevel,
}

#[derive(Debug)]
struct LoggerNode {
    /// Explicit level; `None` means inherit from the dotted parent.
    level: Option<LogLevel>,
    handlers: Vec<Handler>,
    propagate: bool,
}

impl Default for LoggerNode {
    fn default() -> Self {
        Self {
            level: None,
            handlers: Vec::new(),
            propagate: true,
        }
    }
}

/// Point-in-time view of a logger node, returned by [`LevelCoordinator::get_logger`].
#[derive(Debug, Clone)]
pub struct LoggerSnapshot {
    pub name: String,
    pub level: Option<LogLevel>,
    pub effective_level: LogLevel,
    pub handler_levels: Vec<LogLevel>,
    pub propagate: bool,
}

/// Owns the forest of logger nodes rooted at one managed package name and
/// keeps handler thresholds consistent with effective levels.
///
/// Explicit levels are changed only at the managed root by this subsystem;
/// a descendant's own override (installed via [`set_module_level`]) survives
/// every synchronization pass.
///
/// [`set_module_level`]: LevelCoordinator::set_module_level
pub struct LevelCoordinator {
    root: String,
    nodes: RwLock<HashMap<String, LoggerNode>>,
}

impl LevelCoordinator {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            nodes: RwLock::new(HashMap::new()),
        }
    }

    /// Name of the managed root logger.
    pub fn root(&self) -> &str {
        &self.root
    }

    fn in_hierarchy(&self, name: &str) -> bool {
        name == self.root
            || name
                .strip_prefix(self.root.as_str())
                .is_some_and(|rest| rest.starts_with('.'))
    }

    /// Nearest explicit level walking dotted ancestors, else INFO.
    fn resolve(nodes: &HashMap<String, LoggerNode>, name: &str) -> LogLevel {
        let mut current = name;
        loop {
            if let Some(level) = nodes.get(current).and_then(|n| n.level) {
                return level;
            }
            match current.rsplit_once('.') {
                Some((parent, _)) => current = parent,
                None => return LogLevel::Info,
            }
        }
    }

    /// The level actually enforced for `name`: its explicit level if present,
    /// else the nearest ancestor's, else INFO.
    pub fn effective_level(&self, name: &str) -> LogLevel {
        Self::resolve(&self.nodes.read(), name)
    }

    /// Set the explicit level on the managed root node only, bringing the
    /// root's own handlers along. Descendants never receive explicit levels
    /// from this call, so per-module overrides stay intact.
    pub fn set_root_level(&self, level: LogLevel) {
        let mut nodes = self.nodes.write();
        let root = nodes.entry(self.root.clone()).or_default();
        root.level = Some(level);
        for handler in &mut root.handlers {
            handler.level = level;
        }
        debug!(root = %self.root, %level, "root logger level updated");
    }

    /// For every known node in the managed hierarchy, set each handler's
    /// threshold to the node's effective level and force propagation back on.
    /// A handler's cached level must never lag the level that actually
    /// governs its logger.
    pub fn synchronize_handlers(&self) {
        let mut nodes = self.nodes.write();
        let resolved: Vec<(String, LogLevel)> = nodes
            .keys()
            .filter(|name| self.in_hierarchy(name))
            .map(|name| (name.clone(), Self::resolve(&nodes, name)))
            .collect();
        for (name, level) in resolved {
            if let Some(node) = nodes.get_mut(&name) {
                for handler in &mut node.handlers {
                    handler.level = level;
                }
                node.propagate = true;
            }
        }
    }

    /// Look up a logger node, creating it if absent.
    ///
    /// The managed root is pinned to the environment-derived level and its
    /// handlers synchronized. Any other node is left to inherit — no explicit
    /// level installed — with only its own handlers brought up to date and
    /// propagation forced on.
    pub fn get_logger(&self, name: &str) -> LoggerSnapshot {
        let mut nodes = self.nodes.write();
        nodes.entry(name.to_string()).or_default();

        if name == self.root {
            let level = LogLevel::from_env();
            if let Some(node) = nodes.get_mut(name) {
                node.level = Some(level);
                for handler in &mut node.handlers {
                    handler.level = level;
                }
            }
        } else {
            let effective = Self::resolve(&nodes, name);
            if let Some(node) = nodes.get_mut(name) {
                for handler in &mut node.handlers {
                    handler.level = effective;
                }
                node.propagate = true;
            }
        }

        Self::snapshot(&nodes, name)
    }

    /// Attach a handler to `name`, creating the node if needed. The handler
    /// starts at the logger's current effective level.
    pub fn attach_handler(&self, name: &str, handler_name: impl Into<String>) {
        let mut nodes = self.nodes.write();
        nodes.entry(name.to_string()).or_default();
        let level = Self::resolve(&nodes, name);
        if let Some(node) = nodes.get_mut(name) {
            node.handlers.push(Handler {
                name: handler_name.into(),
                level,
            });
        }
    }

    /// Install (or clear) a module's own explicit level.
    ///
    /// This models the override a module places on itself to run quieter or
    /// louder than the package default; synchronization passes respect it and
    /// only the owning module is expected to change it.
    pub fn set_module_level(&self, name: &str, level: Option<LogLevel>) {
        let mut nodes = self.nodes.write();
        nodes.entry(name.to_string()).or_default().level = level;
    }

    /// Turn propagation off for a node. The next synchronization pass forces
    /// it back on; this subsystem never leaves propagation disabled.
    pub fn set_propagate(&self, name: &str, propagate: bool) {
        let mut nodes = self.nodes.write();
        nodes.entry(name.to_string()).or_default().propagate = propagate;
    }

    /// Process-start bootstrap: read the threshold from the environment,
    /// configure the process-wide tracing backend at it, pin the managed root
    /// to it, then synchronize handlers across every already-known node so
    /// pre-existing handlers immediately reflect the new effective levels.
    pub fn bootstrap(&self) {
        let level = LogLevel::from_env();
        bootstrap::init_tracing(level);
        self.set_root_level(level);
        self.synchronize_handlers();
    }

    fn snapshot(nodes: &HashMap<String, LoggerNode>, name: &str) -> LoggerSnapshot {
        let effective_level = Self::resolve(nodes, name);
        let (level, handler_levels, propagate) = match nodes.get(name) {
            Some(node) => (
                node.level,
                node.handlers.iter().map(|h| h.level).collect(),
                node.propagate,
            ),
            None => (None, Vec::new(), true),
        };
        LoggerSnapshot {
            name: name.to_string(),
            level,
            effective_level,
            handler_levels,
            propagate,
        }
    }
}

impl LogLevelControl for LevelCoordinator {
    fn update_root_level(&self, level: &str) {
        let level = LogLevel::parse(level);
        self.set_root_level(level);
        self.synchronize_handlers();
    }
}
