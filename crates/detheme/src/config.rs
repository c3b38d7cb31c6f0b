//! Run configuration resolved from arguments and the environment.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use uuid::Uuid;

use crate::cli::Args;

const SOURCE_SUFFIX: &str = ".sublime-color-scheme";
const TARGET_EXTENSION: &str = "tmTheme";

/// Everything a conversion run needs, with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Whether stdout may use ANSI styling.
    pub color: bool,
    /// Whether stderr (errors and log lines) may use ANSI styling.
    pub stderr_color: bool,
    /// Fixed theme UUID; `None` generates a random one.
    pub uuid: Option<Uuid>,
}

impl Config {
    /// Resolves the configuration against the real process environment.
    pub fn from_args(args: Args) -> Result<Self> {
        let terminals = Terminals {
            stdout: console::Term::stdout().is_term(),
            stderr: console::Term::stderr().is_term(),
        };
        Self::resolve(args, std::env::var_os("NO_COLOR"), terminals)
    }

    /// Resolves the configuration from explicit inputs.
    ///
    /// Colors are off when `--no-color` is given, when `NO_COLOR` is set to a
    /// non-empty value, or when the stream in question is not a terminal.
    pub fn resolve(
        args: Args,
        no_color_env: Option<OsString>,
        terminals: Terminals,
    ) -> Result<Self> {
        let input = args.theme_file.context("No theme file given")?;
        let no_color_env = no_color_env.is_some_and(|v| !v.is_empty());
        let allowed = !args.no_color && !no_color_env;
        let output = args.output.unwrap_or_else(|| default_output(&input));

        Ok(Self {
            input,
            output,
            color: allowed && terminals.stdout,
            stderr_color: allowed && terminals.stderr,
            uuid: args.uuid,
        })
    }
}

/// Which standard streams are attached to a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Terminals {
    pub stdout: bool,
    pub stderr: bool,
}

impl Terminals {
    pub const NONE: Self = Self {
        stdout: false,
        stderr: false,
    };
    pub const BOTH: Self = Self {
        stdout: true,
        stderr: true,
    };
}

/// Derives the output path from the input path.
///
/// `name.sublime-color-scheme` becomes `name.tmTheme`; any other file name
/// gets its extension replaced (or added).
pub fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_suffix(SOURCE_SUFFIX))
        .filter(|stem| !stem.is_empty());

    match stem {
        Some(stem) => input.with_file_name(format!("{}.{}", stem, TARGET_EXTENSION)),
        None => input.with_extension(TARGET_EXTENSION),
    }
}
