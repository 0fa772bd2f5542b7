//! Gradle build system integration
//!
//! Runs tasks through the project's Gradle wrapper. Resolved properties are
//! passed as `ORG_GRADLE_PROJECT_*` environment variables, never as `-P`
//! arguments, so keystore passwords stay out of the process list.

use crate::app_config::{BuildType, GradleProperty};
use std::path::{Path, PathBuf};
use tracing::info;
use wasseobi_core::error::{Error, Result};
use wasseobi_core::process::{run_command_in_dir_with_env, CommandResult};

/// Wrapper script name for the current platform
#[must_use]
pub fn wrapper_name() -> &'static str {
    if cfg!(windows) {
        "gradlew.bat"
    } else {
        "gradlew"
    }
}

/// Path of the wrapper script inside `project_dir`
#[must_use]
pub fn wrapper_path(project_dir: &Path) -> PathBuf {
    project_dir.join(wrapper_name())
}

/// Output artifact kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    /// APK via `assemble*`
    Apk,
    /// App bundle (AAB) via `bundle*`
    Bundle,
}

impl Artifact {
    fn verb(self) -> &'static str {
        match self {
            Artifact::Apk => "assemble",
            Artifact::Bundle => "bundle",
        }
    }

    /// Name shown in progress output
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Artifact::Apk => "APK",
            Artifact::Bundle => "bundle",
        }
    }
}

/// Run Gradle tasks with the given project properties
pub fn run_tasks(
    project_dir: &Path,
    tasks: &[&str],
    properties: &[GradleProperty],
) -> Result<CommandResult> {
    let wrapper = wrapper_path(project_dir);
    if !wrapper.is_file() {
        return Err(Error::gradle(format!(
            "Gradle wrapper not found at {}",
            wrapper.display()
        ))
        .with_suggestion("Run from the Android project directory or pass --project-dir"));
    }

    let program = if cfg!(windows) {
        wrapper_name().to_string()
    } else {
        format!("./{}", wrapper_name())
    };
    let env: Vec<(String, String)> = properties.iter().map(GradleProperty::env_var).collect();

    info!(?tasks, properties = properties.len(), "Running Gradle");
    run_command_in_dir_with_env(&program, tasks, project_dir, &env)
}

/// Build an APK or bundle for a build type
pub fn build(
    project_dir: &Path,
    build_type: &BuildType,
    artifact: Artifact,
    properties: &[GradleProperty],
) -> Result<CommandResult> {
    let task = build_type.task(artifact.verb());
    run_tasks(project_dir, &[task.as_str()], properties)
}

/// Clean build artifacts
pub fn clean(project_dir: &Path) -> Result<CommandResult> {
    run_tasks(project_dir, &["clean"], &[])
}
