//! Subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod inspect;
pub mod process;

use std::path::{Path, PathBuf};

use console::style;
use tracing::debug;

use dschema_core::tables::read_dump_file;
use dschema_core::{Compiled, DschemaConfig, SourceDocument};

/// Platform location of the user configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dschema")
        .join("config.json")
}

/// Load the explicit config, else the user config file, else defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<DschemaConfig> {
    if let Some(path) = path {
        return Ok(DschemaConfig::from_file(path)?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config at {}", default_path.display());
        Ok(DschemaConfig::from_file(&default_path)?)
    } else {
        Ok(DschemaConfig::default())
    }
}

/// Read one agreement as handed over by the extractor.
///
/// A `.json` input is an extraction file. Anything else is plain text,
/// optionally paired with a table dump.
pub fn load_source(input: &Path, tables: Option<&Path>) -> anyhow::Result<SourceDocument> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let is_json = input
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let mut source = if is_json && tables.is_none() {
        SourceDocument::from_file(input)?
    } else {
        let text = std::fs::read_to_string(input)?;
        let mut source = SourceDocument::new(text, Vec::new());
        if let Some(name) = input.file_name() {
            source = source.with_name(name.to_string_lossy());
        }
        source
    };

    if let Some(dump) = tables {
        source.tables = read_dump_file(dump)?;
        debug!("Read {} table(s) from {}", source.tables.len(), dump.display());
    }

    Ok(source)
}

/// Print validation warnings and skipped rows to stderr.
pub fn report_notes(compiled: &Compiled) {
    for warning in &compiled.warnings {
        eprintln!("{} {}", style("!").yellow(), warning);
    }
    for issue in &compiled.issues {
        eprintln!("{} skipped {}", style("!").yellow(), issue);
    }
}
