use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use arbor_config::{ConfigManager, loader};
use arbor_core::{CacheControl, CacheSettings, LogLevelControl};
use arbor_logging::{LOG_LEVEL_VAR, LevelCoordinator};

/// arbor — source code analysis server.
#[derive(Parser)]
#[command(name = "arbor", version, about)]
struct Cli {
    /// Path to a YAML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(long)]
    debug: bool,

    /// Start with the parse-tree cache disabled.
    #[arg(long)]
    disable_cache: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> arbor_core::Result<()> {
    if cli.debug {
        // Keep the environment consistent with the flag so the overlay and
        // any later bootstrap agree on the threshold.
        // SAFETY: called before any other thread is spawned.
        unsafe {
            std::env::set_var(LOG_LEVEL_VAR, "DEBUG");
        }
    }

    // Logging first so config resolution is observable.
    let coordinator = Arc::new(LevelCoordinator::new("arbor"));
    coordinator.bootstrap();

    let cache = Arc::new(CacheSettings::default());
    let manager = ConfigManager::new()
        .with_cache_control(Arc::clone(&cache) as Arc<dyn CacheControl>)
        .with_level_control(Arc::clone(&coordinator) as Arc<dyn LogLevelControl>);

    if let Some(path) = loader::resolve_path(cli.config.as_deref()) {
        manager.load_from_file(&path);
    } else {
        info!("no configuration file found, using defaults");
    }

    if cli.debug {
        manager.update_value("log_level", &serde_json::json!("DEBUG"));
    }

    if cli.disable_cache {
        info!("disabling parse-tree cache as requested");
        manager.update_value("cache.enabled", &serde_json::json!(false));
        cache.set_enabled(false);
    }

    let rendered = serde_json::to_string_pretty(&manager.to_dict())?;
    println!("{rendered}");
    Ok(())
}
