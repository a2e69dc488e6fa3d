//! Environment overlay: `ARBOR_*` variables applied on top of a resolved
//! configuration.
//!
//! Naming scheme, single-underscore format only:
//! - `ARBOR_<SECTION>_<SETTING>` for section settings (e.g. `ARBOR_CACHE_MAX_SIZE_MB`)
//! - `ARBOR_<SETTING>` for top-level settings (e.g. `ARBOR_LOG_LEVEL`)
//!
//! The first token after the prefix is greedily matched against known section
//! names; everything that does not match a section is treated as a top-level
//! setting. This is ambiguous when section and setting names both contain
//! underscores; the greedy rule is kept as-is for compatibility with existing
//! deployments.

use tracing::{debug, warn};

use crate::fields;
use crate::schema::ServerConfig;

pub const ENV_PREFIX: &str = "ARBOR_";

/// Apply every `ARBOR_*` environment variable on top of `config`.
///
/// Unknown names and unconvertible values are logged and skipped; the pass
/// always completes and never returns an error. Re-running with an unchanged
/// environment is idempotent.
pub fn apply_env_overrides(config: &mut ServerConfig) {
    for (name, raw) in std::env::vars() {
        if let Some(stripped) = name.strip_prefix(ENV_PREFIX) {
            apply_one(config, &name, stripped, &raw);
        }
    }
}

fn apply_one(config: &mut ServerConfig, var: &str, stripped: &str, raw: &str) {
    let key = stripped.to_lowercase();
    let parts: Vec<&str> = key.split('_').collect();

    if parts.len() > 1 && fields::is_section(parts[0]) {
        let setting = parts[1..].join("_");
        match fields::lookup(Some(parts[0]), &setting) {
            Some(spec) => apply_spec(config, spec, var, raw),
            None => warn!(
                variable = var,
                section = parts[0],
                setting = %setting,
                "unknown setting in section, ignoring"
            ),
        }
    } else {
        match fields::lookup(None, &key) {
            Some(spec) => apply_spec(config, spec, var, raw),
            None => warn!(
                variable = var,
                setting = %key,
                "unknown top-level setting, ignoring"
            ),
        }
    }
}

fn apply_spec(config: &mut ServerConfig, spec: &fields::FieldSpec, var: &str, raw: &str) {
    if (spec.set_env)(config, raw) {
        debug!(variable = var, value = raw, "applied environment override");
    } else {
        warn!(
            variable = var,
            value = raw,
            "could not convert environment value, keeping previous"
        );
    }
}
