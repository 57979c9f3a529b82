use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};

/// Local persistent cache: one JSON document per fixed key, stored as
/// `<root>/<key>.json`. Entries never expire; they are only replaced by a
/// store or discarded when they fail to parse.
#[derive(Debug, Clone)]
pub struct CacheStore {
    root: PathBuf,
}

impl CacheStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    /// Loads the value stored under `key`. A missing entry is `Ok(None)`; an
    /// unreadable or unparseable entry is an error, which callers treat as a
    /// cache miss after logging it.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.entry_path(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to read cache entry '{}'", path.display()))
            }
        };

        let value = serde_json::from_str(&raw)
            .with_context(|| format!("corrupt cache entry '{}'", path.display()))?;
        Ok(Some(value))
    }

    /// Stores `value` under `key`, creating the cache directory if needed.
    pub fn store<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let path = self.entry_path(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create cache directory '{}'", parent.display())
            })?;
        }

        let raw = serde_json::to_string(value).context("failed to serialize cache value")?;
        fs::write(&path, raw)
            .with_context(|| format!("failed to write cache entry '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
