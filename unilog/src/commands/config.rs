//! Printing and writing the built-in configuration.

use anyhow::{Context, Result};
use log::info;
use std::io::Write;
use std::path::Path;

use unilog_core::ParserConfig;

use crate::cli::ConfigFormat;

/// Writes `config` to `writer` in the requested format.
pub fn print_config<W: Write>(config: &ParserConfig, format: ConfigFormat, writer: &mut W) -> Result<()> {
    let rendered = match format {
        ConfigFormat::Yaml => config.as_yaml()?,
        ConfigFormat::Json => config.as_json()?,
    };
    writeln!(writer, "{}", rendered.trim_end()).context("Failed to write configuration")?;
    writer.flush()?;
    Ok(())
}

pub fn print_default_config<W: Write>(format: ConfigFormat, writer: &mut W) -> Result<()> {
    print_config(&ParserConfig::load_default()?, format, writer)
}

pub fn write_default_config(path: &Path) -> Result<()> {
    ParserConfig::load_default()?.to_file(path)?;
    info!("Default configuration written to {}", path.display());
    Ok(())
}
