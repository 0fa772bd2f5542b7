//! Build environment diagnostics
//!
//! Reports whether the env file, signing secrets, keystore and Gradle
//! wrapper are in place. Missing secrets are warnings because the build
//! still configures with defaults; a missing wrapper is a failure.

use crate::app_config::{AndroidAppConfig, GOOGLE_WEB_CLIENT_ID};
use crate::context::BuildContext;
use crate::gradle;
use crate::signing::{RELEASE_KEY_PASSWORD, RELEASE_STORE_PASSWORD};
use serde::Serialize;
use wasseobi_core::env_file::EnvMap;
use wasseobi_core::process::command_exists;

/// Outcome of a single check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Warn,
    /// Blocks a build
    Fail,
}

/// A named check result
#[derive(Debug, Clone, Serialize)]
pub struct Check {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
}

impl Check {
    fn new(name: &str, status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.into(),
        }
    }
}

/// All check results
#[derive(Debug, Clone, Default, Serialize)]
pub struct DoctorReport {
    pub checks: Vec<Check>,
}

impl DoctorReport {
    /// True when any check failed
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.checks.iter().any(|c| c.status == CheckStatus::Fail)
    }

    /// Number of checks with the given status
    #[must_use]
    pub fn count(&self, status: CheckStatus) -> usize {
        self.checks.iter().filter(|c| c.status == status).count()
    }
}

/// Run all checks for a build context
#[must_use]
pub fn run(ctx: &BuildContext) -> DoctorReport {
    let mut report = DoctorReport::default();

    let env = match ctx.load_env() {
        Ok(env) => {
            report.checks.push(env_file_check(ctx, &env));
            env
        }
        Err(e) => {
            report
                .checks
                .push(Check::new("env file", CheckStatus::Fail, e.message));
            EnvMap::new()
        }
    };

    for key in [RELEASE_STORE_PASSWORD, RELEASE_KEY_PASSWORD, GOOGLE_WEB_CLIENT_ID] {
        report.checks.push(key_check(&env, key));
    }

    let app = AndroidAppConfig::resolve(&ctx.module_dir, &env, &ctx.config);
    report.checks.push(if app.signing.has_store_file() {
        Check::new(
            "keystore",
            CheckStatus::Pass,
            app.signing.store_file.display().to_string(),
        )
    } else {
        Check::new(
            "keystore",
            CheckStatus::Warn,
            format!(
                "not found at {}, release builds will fail",
                app.signing.store_file.display()
            ),
        )
    });

    let wrapper = gradle::wrapper_path(&ctx.project_dir);
    report.checks.push(if wrapper.is_file() {
        Check::new("gradle wrapper", CheckStatus::Pass, wrapper.display().to_string())
    } else {
        Check::new(
            "gradle wrapper",
            CheckStatus::Fail,
            format!("not found at {}", wrapper.display()),
        )
    });

    report.checks.push(if command_exists("java") {
        Check::new("java", CheckStatus::Pass, "found in PATH")
    } else {
        Check::new("java", CheckStatus::Warn, "not found in PATH, Gradle needs a JDK")
    });

    report
}

fn env_file_check(ctx: &BuildContext, env: &EnvMap) -> Check {
    match env.source() {
        Some(path) => Check::new(
            "env file",
            CheckStatus::Pass,
            format!("{} ({} keys)", path.display(), env.len()),
        ),
        None => Check::new(
            "env file",
            CheckStatus::Warn,
            format!("not found at {}, using defaults", ctx.env_path.display()),
        ),
    }
}

fn key_check(env: &EnvMap, key: &str) -> Check {
    match env.get(key) {
        Some(value) if !value.is_empty() => Check::new(key, CheckStatus::Pass, "set"),
        Some(_) => Check::new(key, CheckStatus::Warn, "set but empty"),
        None => Check::new(key, CheckStatus::Warn, "not set, using default"),
    }
}
