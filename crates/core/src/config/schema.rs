//! Configuration schema definitions

use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ToolConfig {
    #[serde(default)]
    pub env: EnvConfig,

    #[serde(default)]
    pub app: AppConfig,

    #[serde(default)]
    pub signing: SigningDefaults,
}

/// Env file location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct EnvConfig {
    /// Env file path, relative to the Android app module directory
    #[serde(default = "default_env_path")]
    pub path: String,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            path: default_env_path(),
        }
    }
}

fn default_env_path() -> String {
    crate::env_file::DEFAULT_ENV_FILE.to_string()
}

/// Application identity and toolchain versions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Kotlin/resource namespace
    #[serde(default = "default_application_id")]
    pub namespace: String,

    /// Published application ID
    #[serde(default = "default_application_id")]
    pub application_id: String,

    /// Pinned NDK version
    #[serde(default = "default_ndk_version")]
    pub ndk_version: String,

    /// Java source/target compatibility and Kotlin `jvmTarget`
    #[serde(default = "default_java_version")]
    pub java_version: u8,

    /// Flutter project root, relative to the app module
    #[serde(default = "default_flutter_source")]
    pub flutter_source: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            namespace: default_application_id(),
            application_id: default_application_id(),
            ndk_version: default_ndk_version(),
            java_version: default_java_version(),
            flutter_source: default_flutter_source(),
        }
    }
}

fn default_application_id() -> String {
    "com.wasseobi.app".to_string()
}

fn default_ndk_version() -> String {
    "27.0.12077973".to_string()
}

fn default_java_version() -> u8 {
    11
}

fn default_flutter_source() -> String {
    "../..".to_string()
}

/// Release signing values used when the env file does not provide them
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SigningDefaults {
    /// Keystore path, relative to the app module
    #[serde(default = "default_store_file")]
    pub store_file: String,

    #[serde(default = "default_key_alias")]
    pub key_alias: String,

    #[serde(default = "default_password")]
    pub default_store_password: String,

    #[serde(default = "default_password")]
    pub default_key_password: String,
}

impl Default for SigningDefaults {
    fn default() -> Self {
        Self {
            store_file: default_store_file(),
            key_alias: default_key_alias(),
            default_store_password: default_password(),
            default_key_password: default_password(),
        }
    }
}

fn default_store_file() -> String {
    "../../keys/seobi.keystore".to_string()
}

fn default_key_alias() -> String {
    "release_key".to_string()
}

fn default_password() -> String {
    "android".to_string()
}
