//! The configuration store facade.
//!
//! Owns the resolved configuration tree and exposes the full access surface:
//! dot-path reads and writes, section iteration, schema validation,
//! persistence, and reload. The tree lives behind an `ArcSwap`, so readers
//! take a lock-free snapshot and mutations publish a complete replacement
//! tree in a single pointer store; a reader in flight during `reload` sees
//! either the fully-old or fully-new tree, never a partial one.

use super::overlay::{self, EnvSnapshot, ENV_OVERRIDES};
use super::profiles::Profile;
use super::schema::{self, Schema};
use super::path;
use crate::error::{ConfigError, ConfigResult};
use arc_swap::ArcSwap;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

/// Construction options beyond the config file path.
#[derive(Debug, Clone, Default)]
pub struct StoreOptions {
    /// Optional dotenv-style file whose entries fill environment variables
    /// the process does not define, before the override pass. Re-read on
    /// every `reload`.
    pub env_path: Option<PathBuf>,
    /// Role profile whose defaults fill unset top-level keys.
    pub profile: Option<Profile>,
}

/// Layered configuration store: file base, environment overrides, optional
/// role defaults, runtime mutations.
pub struct ConfigStore {
    file_path: PathBuf,
    env_path: Option<PathBuf>,
    profile: Option<Profile>,
    tree: ArcSwap<Value>,
    /// Serializes mutations (`set`, `reload`). Readers never take it.
    write_lock: Mutex<()>,
}

impl ConfigStore {
    /// Load a store without role defaults.
    pub fn load(file_path: impl Into<PathBuf>) -> ConfigResult<Self> {
        Self::new(file_path.into(), StoreOptions::default())
    }

    /// Load a store and fill gaps from the given role's default profile.
    pub fn load_with_profile(
        file_path: impl Into<PathBuf>,
        profile: Profile,
    ) -> ConfigResult<Self> {
        Self::new(
            file_path.into(),
            StoreOptions {
                profile: Some(profile),
                ..StoreOptions::default()
            },
        )
    }

    /// Load a store with explicit options (env file, role profile).
    pub fn load_with_options(
        file_path: impl Into<PathBuf>,
        options: StoreOptions,
    ) -> ConfigResult<Self> {
        Self::new(file_path.into(), options)
    }

    fn new(file_path: PathBuf, options: StoreOptions) -> ConfigResult<Self> {
        let tree = Self::resolve(&file_path, options.env_path.as_deref(), options.profile)?;
        Ok(Self {
            file_path,
            env_path: options.env_path,
            profile: options.profile,
            tree: ArcSwap::from_pointee(tree),
            write_lock: Mutex::new(()),
        })
    }

    fn resolve(
        file_path: &Path,
        env_path: Option<&Path>,
        profile: Option<Profile>,
    ) -> ConfigResult<Value> {
        let env = match env_path {
            Some(env_path) => EnvSnapshot::capture_with_env_file(env_path),
            None => EnvSnapshot::capture(),
        };
        let mut tree = overlay::resolve(file_path, &env, ENV_OVERRIDES)?;
        if let Some(profile) = profile {
            profile.apply(&mut tree);
        }
        Ok(tree)
    }

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        // A poisoned lock only means a panicking writer; the tree itself is
        // always a complete snapshot, so continue.
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// The file path the store loads from and saves to by default.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// The role profile this store was constructed with, if any.
    pub fn profile(&self) -> Option<Profile> {
        self.profile
    }

    /// A snapshot of the whole tree.
    pub fn snapshot(&self) -> Arc<Value> {
        self.tree.load_full()
    }

    /// Read the value at a dot-path. `None` when the path is absent or walks
    /// through a non-mapping value; never panics.
    pub fn get(&self, key: &str) -> Option<Value> {
        path::read(&self.tree.load(), key).cloned()
    }

    /// Read the value at a dot-path, falling back to `default` when absent.
    pub fn get_or(&self, key: &str, default: Value) -> Value {
        self.get(key).unwrap_or(default)
    }

    /// Read a string value; `None` if absent or not a string.
    pub fn get_str(&self, key: &str) -> Option<String> {
        match self.get(key) {
            Some(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Read an integer value; `None` if absent or not an integer.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| v.as_i64())
    }

    /// Read a boolean value; `None` if absent or not a boolean.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| v.as_bool())
    }

    /// Write a value at a dot-path, creating intermediate mappings as needed.
    ///
    /// No validation is performed; the write is rejected only if an existing
    /// intermediate segment holds a non-mapping value.
    pub fn set(&self, key: &str, value: Value) -> ConfigResult<()> {
        let _guard = self.lock_writes();
        let mut tree = Value::clone(&self.tree.load());
        path::write(&mut tree, key, value)?;
        self.tree.store(Arc::new(tree));
        Ok(())
    }

    /// Read an entire section as a mapping; empty when absent or not a
    /// mapping, so callers can always iterate.
    pub fn section(&self, key: &str) -> Map<String, Value> {
        path::section(&self.tree.load(), key)
    }

    /// Validate the current tree against a schema. Logs the first violation
    /// and returns `false`; never mutates the tree.
    pub fn validate(&self, schema: &Schema) -> bool {
        schema::validate(&self.tree.load(), schema)
    }

    /// Persist the current tree to the original load path.
    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(&self.file_path)
    }

    /// Persist the current tree as YAML at `path`, creating parent
    /// directories as needed.
    ///
    /// The write goes to a temporary file in the target directory and is
    /// renamed into place, so a failed save never leaves a half-written
    /// config file behind.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|err| ConfigError::io(parent, err))?;
            }
        }

        let snapshot = self.tree.load_full();
        let yaml = serde_yaml::to_string(snapshot.as_ref())
            .map_err(|err| ConfigError::Serialize(err.to_string()))?;

        let tmp = path.with_extension("yaml.tmp");
        std::fs::write(&tmp, yaml).map_err(|err| ConfigError::io(&tmp, err))?;
        std::fs::rename(&tmp, path).map_err(|err| ConfigError::io(path, err))?;

        info!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// Re-resolve from the original file path and a fresh environment
    /// snapshot, re-apply the role profile, and swap the new tree in.
    ///
    /// On failure the previously-published tree stays active.
    pub fn reload(&self) -> ConfigResult<()> {
        let _guard = self.lock_writes();
        let tree = Self::resolve(&self.file_path, self.env_path.as_deref(), self.profile)?;
        self.tree.store(Arc::new(tree));
        info!(path = %self.file_path.display(), "configuration reloaded");
        Ok(())
    }

    /// The root tree as a key-value map snapshot.
    pub fn to_map(&self) -> Map<String, Value> {
        match self.tree.load().as_ref() {
            Value::Object(map) => map.clone(),
            _ => Map::new(),
        }
    }

    /// Pretty-printed JSON rendering of the tree, for diagnostics and
    /// transport. Persistence uses YAML; this does not.
    pub fn to_json_string(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(self.tree.load().as_ref())
            .map_err(|err| ConfigError::Serialize(err.to_string()))
    }
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore")
            .field("file_path", &self.file_path)
            .field("env_path", &self.env_path)
            .field("profile", &self.profile)
            .finish_non_exhaustive()
    }
}
