//! Static table mapping config paths to typed field accessors.
//!
//! Both the environment overlay and `update_value` resolve fields through
//! this table; there is no runtime reflection. Each entry carries two
//! setters: one coercing a raw environment string according to the field's
//! type, one accepting a dynamic JSON value from the update surface. Setters
//! return `false` when the input cannot be converted, leaving the field
//! unchanged.

use std::str::FromStr;

use serde_json::Value;

use crate::schema::ServerConfig;

/// One reachable config field: `section.key`, or a top-level `key` when
/// `section` is `None`.
pub struct FieldSpec {
    pub section: Option<&'static str>,
    pub key: &'static str,
    pub set_env: fn(&mut ServerConfig, &str) -> bool,
    pub set_json: fn(&mut ServerConfig, &Value) -> bool,
}

macro_rules! bool_field {
    ($section:expr, $key:expr, $($field:ident).+) => {
        FieldSpec {
            section: $section,
            key: $key,
            // The boolean rule never fails: non-truthy input means false.
            set_env: |config, raw| {
                config.$($field).+ = bool_value(raw);
                true
            },
            set_json: |config, value| match value.as_bool() {
                Some(v) => {
                    config.$($field).+ = v;
                    true
                }
                None => false,
            },
        }
    };
}

macro_rules! int_field {
    ($section:expr, $key:expr, $($field:ident).+, $ty:ty) => {
        FieldSpec {
            section: $section,
            key: $key,
            set_env: |config, raw| match number::<$ty>(raw) {
                Some(v) => {
                    config.$($field).+ = v;
                    true
                }
                None => false,
            },
            set_json: |config, value| {
                match value.as_u64().and_then(|v| <$ty>::try_from(v).ok()) {
                    Some(v) => {
                        config.$($field).+ = v;
                        true
                    }
                    None => false,
                }
            },
        }
    };
}

macro_rules! str_field {
    ($section:expr, $key:expr, $($field:ident).+) => {
        FieldSpec {
            section: $section,
            key: $key,
            set_env: |config, raw| {
                config.$($field).+ = raw.to_string();
                true
            },
            set_json: |config, value| match value.as_str() {
                Some(s) => {
                    config.$($field).+ = s.to_string();
                    true
                }
                None => false,
            },
        }
    };
}

macro_rules! list_field {
    ($section:expr, $key:expr, $($field:ident).+) => {
        FieldSpec {
            section: $section,
            key: $key,
            set_env: |config, raw| {
                config.$($field).+ = string_list(raw);
                true
            },
            set_json: |config, value| match json_string_list(value) {
                Some(list) => {
                    config.$($field).+ = list;
                    true
                }
                None => false,
            },
        }
    };
}

macro_rules! opt_list_field {
    ($section:expr, $key:expr, $($field:ident).+) => {
        FieldSpec {
            section: $section,
            key: $key,
            set_env: |config, raw| {
                config.$($field).+ = Some(string_list(raw));
                true
            },
            set_json: |config, value| match value {
                // Explicit null clears the restriction
                Value::Null => {
                    config.$($field).+ = None;
                    true
                }
                other => match json_string_list(other) {
                    Some(list) => {
                        config.$($field).+ = Some(list);
                        true
                    }
                    None => false,
                },
            },
        }
    };
}

/// Every field reachable through `update_value` and the environment overlay.
pub static FIELDS: &[FieldSpec] = &[
    bool_field!(Some("cache"), "enabled", cache.enabled),
    int_field!(Some("cache"), "max_size_mb", cache.max_size_mb, u64),
    int_field!(Some("cache"), "ttl_seconds", cache.ttl_seconds, u64),
    int_field!(
        Some("security"),
        "max_file_size_mb",
        security.max_file_size_mb,
        u64
    ),
    list_field!(Some("security"), "excluded_dirs", security.excluded_dirs),
    opt_list_field!(
        Some("security"),
        "allowed_extensions",
        security.allowed_extensions
    ),
    bool_field!(Some("language"), "auto_install", language.auto_install),
    int_field!(
        Some("language"),
        "default_max_depth",
        language.default_max_depth,
        u32
    ),
    list_field!(
        Some("language"),
        "preferred_languages",
        language.preferred_languages
    ),
    str_field!(None, "log_level", log_level),
    int_field!(None, "max_results_default", max_results_default, u32),
];

/// Section names recognized by the greedy first-token rule of the overlay.
pub const SECTIONS: &[&str] = &["cache", "security", "language"];

pub fn is_section(name: &str) -> bool {
    SECTIONS.contains(&name)
}

pub fn lookup(section: Option<&str>, key: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|f| f.section == section && f.key == key)
}

// ── Coercion primitives ────────────────────────────────────────

/// Truthy set for boolean env values; anything outside it means false.
const TRUTHY: &[&str] = &["true", "yes", "1", "y", "t", "on"];

pub fn bool_value(raw: &str) -> bool {
    TRUTHY.contains(&raw.trim().to_lowercase().as_str())
}

/// Parse a numeric env value (integer or float, picked by `T`).
/// `None` when it does not parse; the caller keeps the previous value.
pub fn number<T: FromStr>(raw: &str) -> Option<T> {
    raw.trim().parse().ok()
}

/// Split a comma-separated env value, trimming surrounding whitespace from
/// each element.
pub fn string_list(raw: &str) -> Vec<String> {
    raw.split(',').map(|s| s.trim().to_string()).collect()
}

fn json_string_list(value: &Value) -> Option<Vec<String>> {
    match value {
        // A bare string behaves like an env value: comma-separated
        Value::String(s) => Some(string_list(s)),
        Value::Array(items) => items
            .iter()
            .map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => None,
    }
}
