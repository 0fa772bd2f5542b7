//! Typed build configuration for the Android app module
//!
//! Mirrors what the module's Gradle build declares: identity, toolchain
//! versions, manifest placeholders, signing and build types. Values the
//! Flutter Gradle plugin supplies at build time are listed in
//! [`FLUTTER_PROVIDED`] and never resolved here.
//!
//! [`AndroidAppConfig::gradle_properties`] only reaches Gradle as
//! `ORG_GRADLE_PROJECT_wasseobi*` variables. The module's build file has to
//! read those properties (e.g. `findProperty("wasseobiReleaseStorePassword")`)
//! instead of parsing `../../.env` itself, or `build` changes nothing.

use crate::signing::{SigningConfig, ValueSource};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;
use wasseobi_core::config::ToolConfig;
use wasseobi_core::env_file::EnvMap;
use wasseobi_core::validation::{ValidationIssue, ValidationResult};

/// Env key holding the Google Sign-In web client ID
pub const GOOGLE_WEB_CLIENT_ID: &str = "GOOGLE_WEB_CLIENT_ID";

/// Manifest placeholder that receives the web client ID
pub const WEB_CLIENT_ID_PLACEHOLDER: &str = "com.google.android.gms.login.api.webClientId";

/// Settings supplied by the Flutter Gradle plugin
pub const FLUTTER_PROVIDED: [&str; 5] = [
    "compileSdk",
    "minSdk",
    "targetSdk",
    "versionCode",
    "versionName",
];

/// Prefix Gradle uses to read project properties from the environment
pub const GRADLE_ENV_PREFIX: &str = "ORG_GRADLE_PROJECT_";

/// A Gradle build type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildType {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id_suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signing_config: Option<String>,
    pub minify_enabled: bool,
    pub proguard_files: Vec<String>,
}

impl BuildType {
    /// Debug builds install side by side with release via an ID suffix
    #[must_use]
    pub fn debug() -> Self {
        Self {
            name: "debug".to_string(),
            application_id_suffix: Some(".debug".to_string()),
            signing_config: None,
            minify_enabled: false,
            proguard_files: Vec::new(),
        }
    }

    /// Release builds are signed, minified and shrunk with R8
    #[must_use]
    pub fn release() -> Self {
        Self {
            name: "release".to_string(),
            application_id_suffix: None,
            signing_config: Some("release".to_string()),
            minify_enabled: true,
            proguard_files: vec![
                "proguard-android.txt".to_string(),
                "proguard-rules.pro".to_string(),
            ],
        }
    }

    /// Application ID with this build type's suffix applied
    #[must_use]
    pub fn effective_application_id(&self, base: &str) -> String {
        match &self.application_id_suffix {
            Some(suffix) => format!("{base}{suffix}"),
            None => base.to_string(),
        }
    }

    /// Gradle task for this build type, e.g. `assembleRelease`
    #[must_use]
    pub fn task(&self, verb: &str) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => format!("{verb}{}{}", first.to_uppercase(), chars.as_str()),
            None => verb.to_string(),
        }
    }
}

/// A project property handed to Gradle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradleProperty {
    pub name: String,
    pub value: String,
    pub secret: bool,
}

impl GradleProperty {
    fn plain(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
            secret: false,
        }
    }

    fn secret(name: &str, value: impl Into<String>) -> Self {
        Self {
            secret: true,
            ..Self::plain(name, value)
        }
    }

    /// Environment variable form Gradle picks up as a project property
    #[must_use]
    pub fn env_var(&self) -> (String, String) {
        (format!("{GRADLE_ENV_PREFIX}{}", self.name), self.value.clone())
    }

    /// `-Pname=value` with secrets masked
    #[must_use]
    pub fn display_arg(&self, mask: &str) -> String {
        let value = if self.secret { mask } else { self.value.as_str() };
        format!("-P{}={}", self.name, value)
    }
}

/// Fully resolved app module configuration
#[derive(Debug, Clone, Serialize)]
pub struct AndroidAppConfig {
    pub namespace: String,
    pub application_id: String,
    pub ndk_version: String,
    pub java_version: u8,
    pub flutter_source: String,
    pub manifest_placeholders: BTreeMap<String, String>,
    pub web_client_id_source: ValueSource,
    pub signing: SigningConfig,
    pub build_types: Vec<BuildType>,
    pub flutter_provided: Vec<&'static str>,
}

impl AndroidAppConfig {
    /// Resolve the configuration for `module_dir` from the env map and tool config
    #[must_use]
    pub fn resolve(module_dir: &Path, env: &EnvMap, config: &ToolConfig) -> Self {
        let (web_client_id, web_client_id_source) = match env.get(GOOGLE_WEB_CLIENT_ID) {
            Some(id) => (id.to_string(), ValueSource::EnvFile),
            None => (String::new(), ValueSource::Default),
        };

        let mut manifest_placeholders = BTreeMap::new();
        manifest_placeholders.insert(WEB_CLIENT_ID_PLACEHOLDER.to_string(), web_client_id);

        let resolved = Self {
            namespace: config.app.namespace.clone(),
            application_id: config.app.application_id.clone(),
            ndk_version: config.app.ndk_version.clone(),
            java_version: config.app.java_version,
            flutter_source: config.app.flutter_source.clone(),
            manifest_placeholders,
            web_client_id_source,
            signing: SigningConfig::release(module_dir, env, &config.signing),
            build_types: vec![BuildType::debug(), BuildType::release()],
            flutter_provided: FLUTTER_PROVIDED.to_vec(),
        };
        debug!(
            application_id = %resolved.application_id,
            env_keys = env.len(),
            "Resolved app configuration"
        );
        resolved
    }

    /// Look up a build type by name
    #[must_use]
    pub fn build_type(&self, name: &str) -> Option<&BuildType> {
        self.build_types.iter().find(|bt| bt.name == name)
    }

    /// The web client ID placeholder value
    #[must_use]
    pub fn web_client_id(&self) -> &str {
        self.manifest_placeholders
            .get(WEB_CLIENT_ID_PLACEHOLDER)
            .map_or("", String::as_str)
    }

    /// Project properties consumed by the Gradle build, in a stable order
    #[must_use]
    pub fn gradle_properties(&self) -> Vec<GradleProperty> {
        vec![
            GradleProperty::plain("wasseobiApplicationId", &self.application_id),
            GradleProperty::plain("wasseobiNdkVersion", &self.ndk_version),
            GradleProperty::plain(
                "wasseobiReleaseStoreFile",
                self.signing.store_file.to_string_lossy(),
            ),
            GradleProperty::secret(
                "wasseobiReleaseStorePassword",
                self.signing.store_password.expose(),
            ),
            GradleProperty::plain("wasseobiReleaseKeyAlias", &self.signing.key_alias),
            GradleProperty::secret(
                "wasseobiReleaseKeyPassword",
                self.signing.key_password.expose(),
            ),
            GradleProperty::plain("wasseobiGoogleWebClientId", self.web_client_id()),
        ]
    }

    /// Check the configuration for a build of `build_type`
    #[must_use]
    pub fn validate(&self, build_type: &str) -> ValidationResult {
        let mut result = ValidationResult::new();

        if self.application_id.trim().is_empty() {
            result.add_error(ValidationIssue::new(
                "app.application_id",
                "REQUIRED",
                "application ID must not be empty",
            ));
        }

        match self.build_type(build_type) {
            None => result.add_error(ValidationIssue::new(
                "build_type",
                "UNKNOWN_BUILD_TYPE",
                format!("unknown build type '{build_type}' (expected debug or release)"),
            )),
            Some(bt) if bt.signing_config.is_some() => {
                if !self.signing.has_store_file() {
                    result.add_error(ValidationIssue::new(
                        "signing.store_file",
                        "MISSING_FILE",
                        format!("keystore not found at {}", self.signing.store_file.display()),
                    ));
                }
                if self.signing.store_password.is_default() {
                    result.add_warning(ValidationIssue::new(
                        "signing.store_password",
                        "DEFAULT_SECRET",
                        "RELEASE_STORE_PASSWORD not set, using default",
                    ));
                }
                if self.signing.key_password.is_default() {
                    result.add_warning(ValidationIssue::new(
                        "signing.key_password",
                        "DEFAULT_SECRET",
                        "RELEASE_KEY_PASSWORD not set, using default",
                    ));
                }
            }
            Some(_) => {}
        }

        if self.web_client_id().is_empty() {
            result.add_warning(ValidationIssue::new(
                "manifest.web_client_id",
                "EMPTY",
                "GOOGLE_WEB_CLIENT_ID not set, Google Sign-In will not work",
            ));
        }

        result
    }
}
