#[cfg(test)]
mod tests {
    use std::sync::{Mutex, MutexGuard, OnceLock};

    use arbor_core::LogLevelControl;
    use arbor_logging::{LOG_LEVEL_VAR, LevelCoordinator, LogLevel};

    // The coordinator reads ARBOR_LOG_LEVEL for the root logger and during
    // bootstrap, so tests touching the environment hold this lock.
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    struct EnvGuard {
        _lock: MutexGuard<'static, ()>,
        saved: Option<String>,
    }

    impl EnvGuard {
        fn with_level(value: Option<&str>) -> Self {
            let lock = ENV_LOCK
                .get_or_init(|| Mutex::new(()))
                .lock()
                .unwrap_or_else(|e| e.into_inner());
            let saved = std::env::var(LOG_LEVEL_VAR).ok();
            // SAFETY: all environment access in this binary is serialized
            // through ENV_LOCK.
            unsafe {
                match value {
                    Some(v) => std::env::set_var(LOG_LEVEL_VAR, v),
                    None => std::env::remove_var(LOG_LEVEL_VAR),
                }
            }
            Self { _lock: lock, saved }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            // SAFETY: still holding ENV_LOCK.
            unsafe {
                match self.saved.take() {
                    Some(v) => std::env::set_var(LOG_LEVEL_VAR, v),
                    None => std::env::remove_var(LOG_LEVEL_VAR),
                }
            }
        }
    }

    // ── Effective level resolution ─────────────────────────────

    #[test]
    fn test_default_effective_level_is_info() {
        let coord = LevelCoordinator::new("arbor");
        assert_eq!(coord.effective_level("arbor"), LogLevel::Info);
        assert_eq!(coord.effective_level("arbor.parser"), LogLevel::Info);
    }

    #[test]
    fn test_effective_level_inherits_from_root() {
        let coord = LevelCoordinator::new("arbor");
        coord.set_root_level(LogLevel::Warning);

        assert_eq!(coord.effective_level("arbor"), LogLevel::Warning);
        assert_eq!(
            coord.effective_level("arbor.parser.queries"),
            LogLevel::Warning
        );
    }

    #[test]
    fn test_effective_level_nearest_ancestor_wins() {
        let coord = LevelCoordinator::new("arbor");
        coord.set_root_level(LogLevel::Error);
        coord.set_module_level("arbor.parser", Some(LogLevel::Debug));

        assert_eq!(coord.effective_level("arbor.parser.c"), LogLevel::Debug);
        assert_eq!(coord.effective_level("arbor.cache"), LogLevel::Error);
    }

    // ── Synchronization ────────────────────────────────────────

    #[test]
    fn test_sync_respects_module_overrides() {
        let coord = LevelCoordinator::new("arbor");
        coord.attach_handler("arbor.parser", "stderr");
        coord.set_module_level("arbor.cache", Some(LogLevel::Warning));
        coord.attach_handler("arbor.cache", "stderr");

        coord.set_root_level(LogLevel::Debug);
        coord.synchronize_handlers();

        // No explicit level: inherits DEBUG, handlers follow
        let parser = coord.get_logger("arbor.parser");
        assert_eq!(parser.level, None);
        assert_eq!(parser.effective_level, LogLevel::Debug);
        assert_eq!(parser.handler_levels, vec![LogLevel::Debug]);

        // Explicit WARNING survives; its handlers sync to WARNING, not DEBUG
        let cache = coord.get_logger("arbor.cache");
        assert_eq!(cache.level, Some(LogLevel::Warning));
        assert_eq!(cache.handler_levels, vec![LogLevel::Warning]);
    }

    #[test]
    fn test_sync_forces_propagation_back_on() {
        let coord = LevelCoordinator::new("arbor");
        coord.attach_handler("arbor.parser", "file");
        coord.set_propagate("arbor.parser", false);

        coord.synchronize_handlers();
        assert!(coord.get_logger("arbor.parser").propagate);
    }

    #[test]
    fn test_sync_ignores_nodes_outside_hierarchy() {
        let coord = LevelCoordinator::new("arbor");
        coord.attach_handler("other.module", "stderr");
        // "arborist" shares a prefix but is not under the managed root
        coord.attach_handler("arborist", "stderr");

        coord.set_root_level(LogLevel::Debug);
        coord.synchronize_handlers();

        let other = coord.get_logger("other.module");
        assert_eq!(other.handler_levels, vec![LogLevel::Info]);
        let arborist = coord.get_logger("arborist");
        assert_eq!(arborist.handler_levels, vec![LogLevel::Info]);
    }

    // ── get_logger ─────────────────────────────────────────────

    #[test]
    fn test_get_logger_root_pins_env_level() {
        let _guard = EnvGuard::with_level(Some("ERROR"));
        let coord = LevelCoordinator::new("arbor");
        coord.attach_handler("arbor", "stderr");

        let root = coord.get_logger("arbor");
        assert_eq!(root.level, Some(LogLevel::Error));
        assert_eq!(root.handler_levels, vec![LogLevel::Error]);
    }

    #[test]
    fn test_get_logger_child_stays_inherit() {
        let _guard = EnvGuard::with_level(None);
        let coord = LevelCoordinator::new("arbor");
        coord.set_root_level(LogLevel::Debug);

        let child = coord.get_logger("arbor.io");
        assert_eq!(child.level, None);
        assert_eq!(child.effective_level, LogLevel::Debug);
        assert!(child.propagate);
    }

    #[test]
    fn test_attached_handler_starts_at_effective_level() {
        let coord = LevelCoordinator::new("arbor");
        coord.set_root_level(LogLevel::Debug);
        coord.attach_handler("arbor.query", "stderr");

        let node = coord.get_logger("arbor.query");
        assert_eq!(node.handler_levels, vec![LogLevel::Debug]);
    }

    // ── Trait surface used by the config manager ───────────────

    #[test]
    fn test_update_root_level_parses_and_syncs() {
        let coord = LevelCoordinator::new("arbor");
        coord.attach_handler("arbor.parser", "stderr");

        let control: &dyn LogLevelControl = &coord;
        control.update_root_level("warning");

        assert_eq!(coord.effective_level("arbor.parser"), LogLevel::Warning);
        assert_eq!(
            coord.get_logger("arbor.parser").handler_levels,
            vec![LogLevel::Warning]
        );
    }

    #[test]
    fn test_update_root_level_unrecognized_falls_back_to_info() {
        let coord = LevelCoordinator::new("arbor");
        coord.set_root_level(LogLevel::Debug);

        let control: &dyn LogLevelControl = &coord;
        control.update_root_level("INVALID_LEVEL");

        assert_eq!(coord.effective_level("arbor"), LogLevel::Info);
    }

    // ── Bootstrap ──────────────────────────────────────────────

    #[test]
    fn test_bootstrap_syncs_preexisting_nodes() {
        let _guard = EnvGuard::with_level(Some("DEBUG"));
        let coord = LevelCoordinator::new("arbor");

        // Handlers attached before bootstrap start at the INFO default
        coord.attach_handler("arbor.parser", "stderr");
        coord.attach_handler("arbor.cache.trees", "stderr");
        assert_eq!(
            coord.get_logger("arbor.parser").handler_levels,
            vec![LogLevel::Info]
        );

        coord.bootstrap();

        let root = coord.get_logger("arbor");
        assert_eq!(root.level, Some(LogLevel::Debug));
        assert_eq!(
            coord.get_logger("arbor.parser").handler_levels,
            vec![LogLevel::Debug]
        );
        assert_eq!(
            coord.get_logger("arbor.cache.trees").handler_levels,
            vec![LogLevel::Debug]
        );
    }

    #[test]
    fn test_bootstrap_invalid_env_level_defaults_to_info() {
        let _guard = EnvGuard::with_level(Some("INVALID_LEVEL"));
        let coord = LevelCoordinator::new("arbor");
        coord.bootstrap();
        assert_eq!(coord.effective_level("arbor"), LogLevel::Info);
    }
}
