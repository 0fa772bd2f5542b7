//! Release signing configuration
//!
//! Keystore passwords come from the env file when present and fall back to
//! the debug-friendly defaults otherwise, so a release build can always be
//! configured even on machines without the real secrets.

use serde::{Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;
use wasseobi_core::config::SigningDefaults;
use wasseobi_core::env_file::EnvMap;

/// Env key holding the keystore password
pub const RELEASE_STORE_PASSWORD: &str = "RELEASE_STORE_PASSWORD";
/// Env key holding the signing key password
pub const RELEASE_KEY_PASSWORD: &str = "RELEASE_KEY_PASSWORD";

/// Where a resolved value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueSource {
    /// Read from the env file
    EnvFile,
    /// Built-in or configured default
    Default,
}

/// A secret value that never prints itself
#[derive(Clone, PartialEq, Eq)]
pub struct Secret {
    value: String,
    source: ValueSource,
}

impl Secret {
    /// Resolve `key` from `env`, falling back to `default`
    #[must_use]
    pub fn resolve(env: &EnvMap, key: &str, default: &str) -> Self {
        match env.get(key) {
            Some(value) => Self {
                value: value.to_string(),
                source: ValueSource::EnvFile,
            },
            None => Self {
                value: default.to_string(),
                source: ValueSource::Default,
            },
        }
    }

    /// The plain value, for handing to Gradle
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.value
    }

    /// Where the value came from
    #[must_use]
    pub fn source(&self) -> ValueSource {
        self.source
    }

    /// True when the env file did not set the key
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.source == ValueSource::Default
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("value", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

impl Serialize for Secret {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str("<redacted>")
    }
}

/// A named signing configuration
#[derive(Debug, Clone, Serialize)]
pub struct SigningConfig {
    pub name: String,
    pub store_file: PathBuf,
    pub store_password: Secret,
    pub key_alias: String,
    pub key_password: Secret,
}

impl SigningConfig {
    /// Resolve the `release` signing config for an app module
    #[must_use]
    pub fn release(module_dir: &Path, env: &EnvMap, defaults: &SigningDefaults) -> Self {
        let store_password =
            Secret::resolve(env, RELEASE_STORE_PASSWORD, &defaults.default_store_password);
        let key_password =
            Secret::resolve(env, RELEASE_KEY_PASSWORD, &defaults.default_key_password);

        if store_password.is_default() {
            info!(key = RELEASE_STORE_PASSWORD, "Not set, using default keystore password");
        }
        if key_password.is_default() {
            info!(key = RELEASE_KEY_PASSWORD, "Not set, using default key password");
        }

        Self {
            name: "release".to_string(),
            store_file: module_dir.join(&defaults.store_file),
            store_password,
            key_alias: defaults.key_alias.clone(),
            key_password,
        }
    }

    /// Whether the keystore file exists on disk
    #[must_use]
    pub fn has_store_file(&self) -> bool {
        self.store_file.is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_defaults_without_env() {
        let signing = SigningConfig::release(
            Path::new("android/app"),
            &EnvMap::new(),
            &SigningDefaults::default(),
        );

        assert_eq!(signing.name, "release");
        assert_eq!(signing.store_password.expose(), "android");
        assert_eq!(signing.key_password.expose(), "android");
        assert_eq!(signing.key_alias, "release_key");
        assert_eq!(
            signing.store_file,
            Path::new("android/app/../../keys/seobi.keystore")
        );
        assert!(signing.store_password.is_default());
    }

    #[test]
    fn test_release_reads_env() {
        let env = EnvMap::from([
            (RELEASE_STORE_PASSWORD, "store-secret"),
            (RELEASE_KEY_PASSWORD, "key-secret"),
        ]);
        let signing = SigningConfig::release(Path::new("."), &env, &SigningDefaults::default());

        assert_eq!(signing.store_password.expose(), "store-secret");
        assert_eq!(signing.key_password.expose(), "key-secret");
        assert_eq!(signing.store_password.source(), ValueSource::EnvFile);
    }

    #[test]
    fn test_empty_env_value_is_not_defaulted() {
        let env = EnvMap::from([(RELEASE_KEY_PASSWORD, "")]);
        let signing = SigningConfig::release(Path::new("."), &env, &SigningDefaults::default());

        assert_eq!(signing.key_password.expose(), "");
        assert_eq!(signing.key_password.source(), ValueSource::EnvFile);
    }

    #[test]
    fn test_configured_defaults() {
        let defaults = SigningDefaults {
            key_alias: "upload".to_string(),
            default_store_password: "changeit".to_string(),
            ..SigningDefaults::default()
        };
        let signing = SigningConfig::release(Path::new("."), &EnvMap::new(), &defaults);

        assert_eq!(signing.key_alias, "upload");
        assert_eq!(signing.store_password.expose(), "changeit");
        assert_eq!(signing.key_password.expose(), "android");
    }

    #[test]
    fn test_secret_never_printed() {
        let env = EnvMap::from([(RELEASE_STORE_PASSWORD, "hunter2")]);
        let signing = SigningConfig::release(Path::new("."), &env, &SigningDefaults::default());

        let debug = format!("{signing:?}");
        let json = serde_json::to_string(&signing).unwrap();
        assert!(!debug.contains("hunter2"));
        assert!(!json.contains("hunter2"));
        assert_eq!(signing.store_password.to_string(), "<redacted>");
    }
}
