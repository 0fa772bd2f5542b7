//! Wasseobi Android CLI
//!
//! Resolves build secrets and signing configuration for the Android app
//! module and runs Gradle with them injected.

use anyhow::Result;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};
use tracing::debug;
use wasseobi_android::context::{BuildContext, DEFAULT_MODULE};
use wasseobi_android::doctor::{self, CheckStatus};
use wasseobi_android::gradle::{self, Artifact};
use wasseobi_android::{AndroidAppConfig, ValueSource};
use wasseobi_cli::logging::{self, LogConfig};
use wasseobi_cli::output::{self, format_count, key_value, mask_secret, Status, MASK};
use wasseobi_cli::progress;
use wasseobi_core::config::Config;
use wasseobi_core::error::{exit_codes, Error};

#[derive(Parser)]
#[command(name = "wasseobi-android")]
#[command(about = "Build configuration and signing tools for Wasseobi Android")]
#[command(version)]
struct Cli {
    /// Config file path (default: searched in --project-dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Android Gradle project directory (contains gradlew)
    #[arg(long, global = true, default_value = ".")]
    project_dir: PathBuf,

    /// App module directory name inside the project
    #[arg(long, global = true, default_value = DEFAULT_MODULE)]
    module: String,

    /// Env file to load instead of the configured location
    #[arg(long, global = true, env = "WASSEOBI_ENV_FILE")]
    env_file: Option<PathBuf>,

    /// Increase output verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect the env file
    Env {
        #[command(subcommand)]
        action: EnvAction,
    },

    /// Show the resolved build configuration
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the Gradle project properties that builds receive
    Properties,

    /// Build with Gradle
    Build {
        /// Build type: debug, release
        #[arg(long, default_value = "debug")]
        configuration: String,
        /// Build bundle (AAB) instead of APK
        #[arg(long)]
        bundle: bool,
        /// Clean before building
        #[arg(long)]
        clean: bool,
    },

    /// Diagnose the build environment
    Doctor {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum EnvAction {
    /// List loaded keys
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Show values instead of masking them
        #[arg(long)]
        reveal: bool,
    },
    /// Print one value
    Get {
        /// Key to look up
        key: String,
        /// Value to print when the key is absent
        #[arg(long)]
        default: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        owo_colors::set_override(false);
    }

    if let Err(e) = logging::init(&LogConfig::from_verbosity(cli.verbose, cli.quiet)) {
        Status::warning(&format!("Logging disabled: {e}"));
    }

    let config = match Config::load_for_project(&cli.project_dir, cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => std::process::exit(report_error(&e)),
    };
    debug!(path = ?config.path, "Configuration loaded");

    let ctx = BuildContext::new(&cli.project_dir, &cli.module, config.schema)
        .with_env_path(cli.env_file.as_deref());

    let exit_code = match cli.command {
        Commands::Env { action } => match action {
            EnvAction::List { json, reveal } => run_env_list(&ctx, json, reveal),
            EnvAction::Get { key, default } => run_env_get(&ctx, &key, default.as_deref()),
        },
        Commands::Config { json } => run_config(&ctx, json, cli.quiet),
        Commands::Properties => run_properties(&ctx),
        Commands::Build { configuration, bundle, clean } => {
            run_build(&ctx, &configuration, bundle, clean, cli.quiet)
        }
        Commands::Doctor { json } => run_doctor(&ctx, json),
    };

    std::process::exit(exit_code);
}

fn report_error(e: &Error) -> i32 {
    Status::error(&e.to_string());
    e.code.exit_code()
}

fn source_label(source: ValueSource) -> &'static str {
    match source {
        ValueSource::EnvFile => "env file",
        ValueSource::Default => "default",
    }
}

fn run_env_list(ctx: &BuildContext, json: bool, reveal: bool) -> i32 {
    let env = match ctx.load_env() {
        Ok(env) => env,
        Err(e) => return report_error(&e),
    };
    let shown = |value: &str| {
        if reveal {
            value.to_string()
        } else {
            mask_secret(value)
        }
    };

    if json {
        let entries: serde_json::Map<String, serde_json::Value> = env
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(shown(v))))
            .collect();
        let doc = serde_json::json!({
            "path": env.source().map(|p| p.display().to_string()),
            "entries": entries,
        });
        println!("{}", serde_json::to_string_pretty(&doc).unwrap_or_default());
        return exit_codes::SUCCESS;
    }

    match env.source() {
        Some(path) => Status::header(&format!(
            "{} ({})",
            path.display(),
            format_count(env.len(), "key", "keys")
        )),
        None => {
            Status::info(&format!(
                "No env file at {}, defaults will be used",
                ctx.env_path.display()
            ));
            return exit_codes::SUCCESS;
        }
    }

    let width = env.keys().map(str::len).max().unwrap_or(0);
    for (key, value) in env.iter() {
        key_value(key, &shown(value), width);
    }
    exit_codes::SUCCESS
}

fn run_env_get(ctx: &BuildContext, key: &str, default: Option<&str>) -> i32 {
    let env = match ctx.load_env() {
        Ok(env) => env,
        Err(e) => return report_error(&e),
    };

    match env.get(key).or(default) {
        Some(value) => {
            println!("{value}");
            exit_codes::SUCCESS
        }
        None => report_error(&Error::missing_key(key)),
    }
}

fn resolve(ctx: &BuildContext) -> Result<AndroidAppConfig, i32> {
    ctx.resolve().map(|(_, app)| app).map_err(|e| report_error(&e))
}

fn run_config(ctx: &BuildContext, json: bool, quiet: bool) -> i32 {
    let app = match resolve(ctx) {
        Ok(app) => app,
        Err(code) => return code,
    };

    if json {
        match serde_json::to_string_pretty(&app) {
            Ok(s) => println!("{s}"),
            Err(e) => return report_error(&Error::from(e)),
        }
        return exit_codes::SUCCESS;
    }

    const WIDTH: usize = 22;
    Status::header("Android app module");
    key_value("namespace", &app.namespace, WIDTH);
    key_value("applicationId", &app.application_id, WIDTH);
    key_value("ndkVersion", &app.ndk_version, WIDTH);
    key_value("java", &app.java_version.to_string(), WIDTH);
    key_value("flutter source", &app.flutter_source, WIDTH);
    key_value(
        "webClientId",
        &format!(
            "{} ({})",
            if app.web_client_id().is_empty() { "(empty)" } else { app.web_client_id() },
            source_label(app.web_client_id_source)
        ),
        WIDTH,
    );

    Status::header("Signing (release)");
    let signing = &app.signing;
    key_value("storeFile", &signing.store_file.display().to_string(), WIDTH);
    key_value(
        "storePassword",
        &format!("{} ({})", MASK, source_label(signing.store_password.source())),
        WIDTH,
    );
    key_value("keyAlias", &signing.key_alias, WIDTH);
    key_value(
        "keyPassword",
        &format!("{} ({})", MASK, source_label(signing.key_password.source())),
        WIDTH,
    );

    Status::header("Build types");
    for bt in &app.build_types {
        let mut details = vec![bt.effective_application_id(&app.application_id)];
        if let Some(signing) = &bt.signing_config {
            details.push(format!("signed with {signing}"));
        }
        if bt.minify_enabled {
            details.push("minified".to_string());
        }
        key_value(&bt.name, &details.join(", "), WIDTH);
    }

    println!();
    println!(
        "{} {}",
        "Provided by Flutter:".dimmed(),
        app.flutter_provided.join(", ")
    );

    if !quiet {
        for warning in app.validate("release").warnings() {
            Status::warning(&warning.to_string());
        }
    }
    exit_codes::SUCCESS
}

fn run_properties(ctx: &BuildContext) -> i32 {
    let app = match resolve(ctx) {
        Ok(app) => app,
        Err(code) => return code,
    };

    for property in app.gradle_properties() {
        println!("{}", property.display_arg(MASK));
    }
    exit_codes::SUCCESS
}

fn run_build(ctx: &BuildContext, configuration: &str, bundle: bool, clean: bool, quiet: bool) -> i32 {
    let app = match resolve(ctx) {
        Ok(app) => app,
        Err(code) => return code,
    };

    let validation = app.validate(configuration);
    for warning in validation.warnings() {
        Status::warning(&warning.to_string());
    }
    if let Err(e) = validation.into_result() {
        return report_error(&e);
    }
    let Some(build_type) = app.build_type(configuration) else {
        return report_error(&Error::validation(format!("Unknown build type: {configuration}")));
    };

    let project_dir: &Path = &ctx.project_dir;
    if clean {
        if !quiet {
            Status::info("Cleaning...");
        }
        match gradle::clean(project_dir) {
            Ok(r) if r.success => {}
            Ok(r) => {
                Status::error("Clean failed");
                eprintln!("{}", r.stderr);
                return exit_codes::FAILURE;
            }
            Err(e) => return report_error(&e),
        }
    }

    let artifact = if bundle { Artifact::Bundle } else { Artifact::Apk };
    let message = format!(
        "Building {} {} ({})",
        configuration,
        artifact.label(),
        build_type.effective_application_id(&app.application_id)
    );
    let pb = if quiet { progress::hidden() } else { progress::spinner(&message) };
    let started = std::time::Instant::now();

    match gradle::build(project_dir, build_type, artifact, &app.gradle_properties()) {
        Ok(r) if r.success => {
            progress::finish_success(
                &pb,
                &format!("Build succeeded in {}", output::format_duration(started.elapsed())),
            );
            exit_codes::SUCCESS
        }
        Ok(r) => {
            progress::finish_error(&pb, "Build failed");
            eprintln!("{}", r.combined_output());
            exit_codes::FAILURE
        }
        Err(e) => {
            progress::finish_error(&pb, "Build failed");
            report_error(&e)
        }
    }
}

fn run_doctor(ctx: &BuildContext, json: bool) -> i32 {
    let report = doctor::run(ctx);

    if json {
        println!("{}", serde_json::to_string_pretty(&report).unwrap_or_default());
    } else {
        Status::header("Environment Check");
        for check in &report.checks {
            let line = format!("{}: {}", check.name, check.message);
            match check.status {
                CheckStatus::Pass => Status::success(&line),
                CheckStatus::Warn => Status::warning(&line),
                CheckStatus::Fail => Status::error(&line),
            }
        }
        println!();
        println!(
            "{} passed, {} warnings, {} failed",
            report.count(CheckStatus::Pass),
            report.count(CheckStatus::Warn),
            report.count(CheckStatus::Fail)
        );
    }

    if report.has_failures() {
        exit_codes::FAILURE
    } else {
        exit_codes::SUCCESS
    }
}
