//! Core utilities for Wasseobi build tools
//!
//! This crate provides shared functionality used by the platform tools:
//!
//! - **Error handling**: Structured errors with codes, context, and recovery suggestions
//! - **Env files**: Optional `KEY=VALUE` secret files with safe defaults
//! - **Configuration**: TOML-based tool configuration with defaults
//! - **Process execution**: Command execution with injected environment
//! - **Validation**: Error/warning accumulation for resolved configuration
//!
//! # Example
//!
//! ```rust,no_run
//! use wasseobi_core::env_file;
//!
//! let env = env_file::load("../../.env")?;
//! let store_password = env.get_or("RELEASE_STORE_PASSWORD", "android");
//! # Ok::<(), wasseobi_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod env_file;
pub mod error;
pub mod process;
pub mod validation;

pub use error::{Error, ErrorCode, Result, ResultExt};
