//! Paths and configuration for one Android project

use crate::app_config::AndroidAppConfig;
use std::path::{Path, PathBuf};
use wasseobi_core::config::ToolConfig;
use wasseobi_core::env_file::{self, EnvMap};
use wasseobi_core::error::{Result, ResultExt};

/// Default app module directory name inside the Gradle project
pub const DEFAULT_MODULE: &str = "app";

/// Where the Gradle project, app module and env file live
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// Gradle root (the directory holding `gradlew`)
    pub project_dir: PathBuf,
    /// App module directory; relative paths in the config resolve against it
    pub module_dir: PathBuf,
    /// Env file to load
    pub env_path: PathBuf,
    /// Tool configuration
    pub config: ToolConfig,
}

impl BuildContext {
    /// Context for `project_dir/module` using the configured env file location
    pub fn new(project_dir: impl Into<PathBuf>, module: &str, config: ToolConfig) -> Self {
        let project_dir = project_dir.into();
        let module_dir = project_dir.join(module);
        let env_path = module_dir.join(&config.env.path);
        Self {
            project_dir,
            module_dir,
            env_path,
            config,
        }
    }

    /// Use a specific env file instead of the configured one
    #[must_use]
    pub fn with_env_path(mut self, env_path: Option<&Path>) -> Self {
        if let Some(path) = env_path {
            self.env_path = path.to_path_buf();
        }
        self
    }

    /// Load the env file, treating a missing file as empty
    pub fn load_env(&self) -> Result<EnvMap> {
        env_file::load(&self.env_path).context("Loading build secrets")
    }

    /// Load the env file and resolve the app configuration
    pub fn resolve(&self) -> Result<(EnvMap, AndroidAppConfig)> {
        let env = self.load_env()?;
        let app = AndroidAppConfig::resolve(&self.module_dir, &env, &self.config);
        Ok((env, app))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_layout() {
        let ctx = BuildContext::new("android", DEFAULT_MODULE, ToolConfig::default());
        assert_eq!(ctx.module_dir, Path::new("android/app"));
        assert_eq!(ctx.env_path, Path::new("android/app/../../.env"));
    }

    #[test]
    fn test_env_override() {
        let ctx = BuildContext::new(".", DEFAULT_MODULE, ToolConfig::default())
            .with_env_path(Some(Path::new("/secrets/.env.release")));
        assert_eq!(ctx.env_path, Path::new("/secrets/.env.release"));
    }

    #[test]
    fn test_resolve_from_flutter_root_env() {
        let root = TempDir::new().unwrap();
        let project_dir = root.path().join("android");
        fs::create_dir_all(project_dir.join("app")).unwrap();
        fs::write(
            root.path().join(".env"),
            "# release secrets\nRELEASE_STORE_PASSWORD = from-file \nGOOGLE_WEB_CLIENT_ID=abc=def\n",
        )
        .unwrap();

        let ctx = BuildContext::new(&project_dir, DEFAULT_MODULE, ToolConfig::default());
        let (env, app) = ctx.resolve().unwrap();

        assert_eq!(env.len(), 2);
        assert_eq!(app.signing.store_password.expose(), "from-file");
        assert_eq!(app.signing.key_password.expose(), "android");
        assert_eq!(app.web_client_id(), "abc=def");
    }

    #[test]
    fn test_resolve_without_env_file() {
        let root = TempDir::new().unwrap();
        let ctx = BuildContext::new(root.path().join("android"), DEFAULT_MODULE, ToolConfig::default());

        let (env, app) = ctx.resolve().unwrap();
        assert!(env.is_empty());
        assert_eq!(app.signing.store_password.expose(), "android");
    }
}
