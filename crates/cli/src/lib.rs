//! CLI utilities for Wasseobi build tools
//!
//! Provides shared CLI functionality:
//! - Terminal output formatting and secret masking
//! - Progress spinners
//! - Logging setup

#![warn(missing_docs)]

pub mod logging;
pub mod output;
pub mod progress;
