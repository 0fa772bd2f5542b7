//! Optional `KEY=VALUE` env files
//!
//! Build secrets (keystore passwords, OAuth client IDs) live in a `.env`
//! file at the Flutter project root that is never committed. Builds must
//! still work without it, so a missing file loads as an empty map and every
//! consumer supplies its own default through [`EnvMap::get_or`].
//!
//! Line rules:
//! - a line starting with `#` is a comment (checked before any trimming)
//! - a line without `=` is ignored
//! - otherwise the line is split on the first `=` and both halves are trimmed
//! - a later line with the same key overwrites the earlier value

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Conventional env file location relative to the Android app module
pub const DEFAULT_ENV_FILE: &str = "../../.env";

/// A single parsed `KEY=VALUE` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvEntry {
    /// Trimmed, non-empty key
    pub key: String,
    /// Trimmed value, may be empty
    pub value: String,
}

impl EnvEntry {
    /// Parse one raw line, returning `None` for comments and lines without `=`.
    #[must_use]
    pub fn parse_line(line: &str) -> Option<Self> {
        if line.starts_with('#') {
            return None;
        }
        let (key, value) = line.split_once('=')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        Some(Self {
            key: key.to_string(),
            value: value.trim().to_string(),
        })
    }
}

/// Resolved key/value pairs from a single load
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvMap {
    entries: BTreeMap<String, String>,
    source: Option<PathBuf>,
}

impl EnvMap {
    /// Create an empty map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Look up a key, falling back to `default` when it is absent.
    ///
    /// A key that is present with an empty value is returned as-is.
    #[must_use]
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Look up a key that must be present
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key).ok_or_else(|| Error::missing_key(key))
    }

    /// Whether the key was present in the file
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert or overwrite an entry, returning the previous value
    pub fn insert(&mut self, entry: EnvEntry) -> Option<String> {
        self.entries.insert(entry.key, entry.value)
    }

    /// Number of keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no keys were loaded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Path the map was loaded from, if the file existed
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            source: None,
        }
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for EnvMap {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// Parse env file content held in memory.
///
/// Lines end at `\n`, `\r\n` or a lone `\r`.
#[must_use]
pub fn parse_str(content: &str) -> EnvMap {
    let mut map = EnvMap::new();
    for (index, line) in content.lines().flat_map(|l| l.split('\r')).enumerate() {
        match EnvEntry::parse_line(line) {
            Some(entry) => {
                if let Some(previous) = map.insert(entry) {
                    trace!(line = index + 1, previous_len = previous.len(), "Overwrote duplicate key");
                }
            }
            None => trace!(line = index + 1, "Skipped line"),
        }
    }
    map
}

/// Load an env file from disk.
///
/// A missing file yields an empty map. Any other read failure, including
/// permission errors and non-UTF-8 content, is returned as an error.
pub fn load(path: impl AsRef<Path>) -> Result<EnvMap> {
    let path = path.as_ref();
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "Env file not found, using defaults");
            return Ok(EnvMap::new());
        }
        Err(e) => return Err(Error::env_file_read(path, e)),
    };

    let mut map = parse_str(&content);
    map.source = Some(path.to_path_buf());
    debug!(path = %path.display(), keys = map.len(), "Loaded env file");
    Ok(map)
}

/// Env file path for an Android app module directory
#[must_use]
pub fn default_env_path(module_dir: &Path) -> PathBuf {
    module_dir.join(DEFAULT_ENV_FILE)
}
