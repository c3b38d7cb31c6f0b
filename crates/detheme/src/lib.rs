//! # detheme - SublimeText color theme downgrader
//!
//! Command-line front end for [`detheme_core`]: reads a
//! `.sublime-color-scheme` file, prints a short summary of it, converts it and
//! writes the resulting `.tmTheme` next to the input (or to `--output`).
//!
//! The binary is a thin wrapper around these modules so that everything except
//! argument parsing and process exit codes can be exercised from tests.

pub mod app;
pub mod cli;
pub mod config;
pub mod logging;
pub mod report;

pub use cli::{Action, Args};
pub use config::{Config, Terminals};
