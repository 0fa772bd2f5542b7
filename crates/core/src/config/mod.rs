//! Tool configuration loading and schema definitions
//!
//! Every field defaults to the values the Android app module has always
//! used, so running without a configuration file is the normal case.

mod loader;
mod schema;

pub use loader::{Config, CONFIG_CANDIDATES};
pub use schema::*;
