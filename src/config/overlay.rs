//! Source overlay resolution: file base plus environment overrides.
//!
//! Produces the merged configuration tree consumed by `ConfigStore`. The file
//! is the base layer; a fixed table of environment variables is written on
//! top of it, coercing each value to its most specific type. Profile defaults
//! are deliberately not applied here; layering them in is the store's job.

use super::{coerce, path};
use crate::error::{ConfigError, ConfigResult};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// One environment-variable override: variable name and target dot-path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvOverride {
    pub var: &'static str,
    pub path: &'static str,
}

/// The fixed override table. Order matters only for log output; the paths are
/// disjoint so application order does not change the result.
pub const ENV_OVERRIDES: &[EnvOverride] = &[
    EnvOverride { var: "MQTT_HOST", path: "mqtt.host" },
    EnvOverride { var: "MQTT_PORT", path: "mqtt.port" },
    EnvOverride { var: "MQTT_USERNAME", path: "mqtt.username" },
    EnvOverride { var: "MQTT_PASSWORD", path: "mqtt.password" },
    EnvOverride { var: "MQTT_USE_TLS", path: "mqtt.use_tls" },
    EnvOverride { var: "SENSOR_PIN", path: "sensor_pin" },
    EnvOverride { var: "SENSOR_TYPE", path: "sensor_type" },
    EnvOverride { var: "UPDATE_INTERVAL", path: "update_interval" },
    EnvOverride { var: "CLIENT_ID", path: "client_id" },
    EnvOverride { var: "DATABASE_PATH", path: "database.path" },
    EnvOverride { var: "DASHBOARD_PORT", path: "dashboard.port" },
    EnvOverride { var: "LOG_LEVEL", path: "logging.level" },
];

/// A captured snapshot of environment variables.
///
/// Resolution reads from a snapshot rather than the live process environment
/// so a single resolve sees one consistent environment and tests can inject
/// variables without mutating process-global state.
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot(HashMap<String, String>);

impl EnvSnapshot {
    /// Capture the current process environment.
    pub fn capture() -> Self {
        Self(std::env::vars().collect())
    }

    /// Capture the process environment, with entries from a dotenv-style
    /// file filling in variables the process does not define.
    ///
    /// A variable set in both places keeps its process value; the file never
    /// overrides the live environment. A missing file is skipped silently,
    /// and unparseable lines are skipped with a warning.
    pub fn capture_with_env_file(env_path: &Path) -> Self {
        let mut vars: HashMap<String, String> = HashMap::new();

        if env_path.exists() {
            match dotenvy::from_path_iter(env_path) {
                Ok(entries) => {
                    for entry in entries {
                        match entry {
                            Ok((key, value)) => {
                                vars.insert(key, value);
                            }
                            Err(err) => {
                                warn!(path = %env_path.display(), %err, "skipping malformed env file entry");
                            }
                        }
                    }
                }
                Err(err) => {
                    warn!(path = %env_path.display(), %err, "failed to read env file");
                }
            }
        }

        vars.extend(std::env::vars());
        Self(vars)
    }

    /// Build a snapshot from explicit pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn get(&self, var: &str) -> Option<&str> {
        self.0.get(var).map(String::as_str)
    }
}

/// Resolve the merged configuration tree from a file and an environment
/// snapshot.
///
/// A missing file is not an error: resolution continues from an empty tree
/// and logs a warning. A file that exists but is malformed YAML, or whose
/// root is not a mapping, aborts with [`ConfigError::Parse`].
pub fn resolve(
    file_path: &Path,
    env: &EnvSnapshot,
    overrides: &[EnvOverride],
) -> ConfigResult<Value> {
    let mut tree = load_file(file_path)?;

    for entry in overrides {
        if let Some(raw) = env.get(entry.var) {
            let value = coerce::coerce(raw);
            debug!(var = entry.var, path = entry.path, "applying environment override");
            path::write(&mut tree, entry.path, value)?;
        }
    }

    Ok(tree)
}

fn load_file(file_path: &Path) -> ConfigResult<Value> {
    let content = match std::fs::read_to_string(file_path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %file_path.display(), "config file not found, starting from empty tree");
            return Ok(Value::Object(Map::new()));
        }
        Err(err) => return Err(ConfigError::io(file_path, err)),
    };

    let parsed: Value = serde_yaml::from_str(&content)
        .map_err(|err| ConfigError::parse(file_path, err))?;

    match parsed {
        Value::Object(_) => Ok(parsed),
        // An empty file parses as null; treat it like a missing file.
        Value::Null => Ok(Value::Object(Map::new())),
        other => Err(ConfigError::parse(
            file_path,
            format!("root must be a mapping, got {}", kind_name(&other)),
        )),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
