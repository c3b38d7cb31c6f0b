//! Conversion run: file I/O around the core entry points.

use std::fs;

use anyhow::{Context, Result};
use detheme_core::{PlistSerializer, Theme};

use crate::config::Config;
use crate::report;

/// Reads and parses the input theme.
pub fn load(config: &Config) -> Result<Theme> {
    let data = fs::read(&config.input)
        .with_context(|| format!("Can't load theme: can't read {}", config.input.display()))?;
    let theme = detheme_core::parse(&data).context("Can't load theme")?;

    tracing::info!(path = %config.input.display(), "loaded theme");
    Ok(theme)
}

/// Serializes `theme` and writes it to the configured output path.
pub fn save(config: &Config, theme: &Theme) -> Result<()> {
    let serializer = match config.uuid {
        Some(uuid) => PlistSerializer::with_uuid(uuid),
        None => PlistSerializer::new(),
    };
    let data = serializer.serialize(theme);

    fs::write(&config.output, data)
        .with_context(|| format!("Can't save theme to {}", config.output.display()))?;

    tracing::info!(path = %config.output.display(), "saved theme");
    Ok(())
}

/// Loads the theme, prints its summary, converts and saves it, then prints
/// the success message.
pub fn run(config: &Config) -> Result<Theme> {
    let theme = load(config)?;
    print!("{}", report::summary(&theme));

    save(config, &theme)?;
    print!("{}", report::saved(&config.output));

    Ok(theme)
}
