//! Android build tools for Wasseobi
//!
//! This crate provides Android-specific functionality:
//! - Release signing resolved from the project env file
//! - The typed app module build configuration
//! - Gradle wrapper integration with injected project properties
//! - Environment diagnostics

#![warn(missing_docs)]

pub mod app_config;
pub mod context;
pub mod doctor;
pub mod gradle;
pub mod signing;

pub use app_config::{AndroidAppConfig, BuildType};
pub use context::BuildContext;
pub use signing::{Secret, SigningConfig, ValueSource};
