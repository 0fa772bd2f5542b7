//! Configuration file loading

use super::schema::ToolConfig;
use crate::error::{Error, Result, ResultExt};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File names searched for, in order, when no path is given
pub const CONFIG_CANDIDATES: [&str; 3] = [
    ".wasseobi-android.toml",
    "wasseobi-android.toml",
    ".config/wasseobi-android.toml",
];

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub schema: ToolConfig,
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from an explicit path, or search the current directory
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_in(Path::new("."), path)
    }

    /// Load configuration for a Gradle project.
    ///
    /// An explicit path is taken as given (relative to the current
    /// directory); otherwise the candidates are searched in `project_dir`.
    pub fn load_for_project(project_dir: &Path, path: Option<&Path>) -> Result<Self> {
        match path {
            Some(_) => Self::load(path),
            None => Self::load_in(project_dir, None),
        }
    }

    /// Load configuration relative to `base_dir`.
    ///
    /// An explicit path must exist. Without one, the first candidate found
    /// in `base_dir` is used, falling back to defaults.
    pub fn load_in(base_dir: &Path, path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => {
                let p = base_dir.join(p);
                if !p.is_file() {
                    return Err(Error::config_not_found(&p));
                }
                Some(p)
            }
            None => find_config_file(base_dir),
        };

        let schema = match config_path {
            Some(ref p) => load_config_file(p)?,
            None => ToolConfig::default(),
        };

        Ok(Self {
            schema,
            path: config_path,
        })
    }
}

/// Find configuration file in standard locations
fn find_config_file(base_dir: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|candidate| base_dir.join(candidate))
        .find(|p| p.is_file())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ToolConfig> {
    debug!(path = %path.display(), "Loading configuration");
    let content = std::fs::read_to_string(path)
        .map_err(Error::from)
        .context(format!("Reading config file {}", path.display()))?;

    toml::from_str(&content)
        .map_err(Error::from)
        .context(format!("Parsing config file {}", path.display()))
}
