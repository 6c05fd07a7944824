//! Config command - inspect and edit the area table and profiles.
//!
//! Every action works on the file named by the global `--config` flag,
//! falling back to the platform location.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail};
use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use dschema_core::DschemaConfig;

use super::default_config_path;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write the built-in defaults to a file
    Init {
        /// Destination (defaults to the active config path)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print one value, addressed by a dotted key such as "batch.sequencing"
    Get { key: String },

    /// Change one value; JSON literals are accepted, anything else is a string
    Set { key: String, value: String },

    /// Print where the configuration is read from
    Path,
}

pub fn run(args: ConfigArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let target = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(default_config_path);

    match args.action {
        ConfigAction::Show => {
            if !target.exists() {
                eprintln!("{} {} not found, using defaults", style("ℹ").blue(), target.display());
            }
            println!("{}", serde_json::to_string_pretty(&read_or_default(&target)?)?);
        }
        ConfigAction::Init { output, force } => {
            let output = output.unwrap_or(target);
            if output.exists() && !force {
                bail!("{} already exists, pass --force to replace it", output.display());
            }
            write_config(&output, &DschemaConfig::default())?;
            println!("{} Wrote defaults to {}", style("✓").green(), output.display());
        }
        ConfigAction::Get { key } => {
            let tree = serde_json::to_value(read_or_default(&target)?)?;
            let value = tree
                .pointer(&pointer(&key))
                .ok_or_else(|| anyhow!("unknown config key: {key}"))?;
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        ConfigAction::Set { key, value } => {
            let updated = assign(read_or_default(&target)?, &key, &value)?;
            write_config(&target, &updated)?;
            println!("{} {} = {}", style("✓").green(), key, value);
        }
        ConfigAction::Path => {
            let status = if target.exists() {
                style("present").green()
            } else {
                style("missing, defaults apply").yellow()
            };
            println!("{} ({})", target.display(), status);
        }
    }

    Ok(())
}

fn read_or_default(path: &Path) -> anyhow::Result<DschemaConfig> {
    if path.exists() {
        Ok(DschemaConfig::from_file(path)?)
    } else {
        Ok(DschemaConfig::default())
    }
}

fn write_config(path: &Path, config: &DschemaConfig) -> anyhow::Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    config.save(path)?;
    Ok(())
}

/// Dotted key to JSON pointer: `areas.01` becomes `/areas/01`.
fn pointer(key: &str) -> String {
    key.split('.')
        .map(|part| format!("/{}", part.replace('~', "~0").replace('/', "~1")))
        .collect()
}

/// Set `key` to `raw` and re-read the result as a typed config, so a value
/// of the wrong shape is rejected before anything is written.
fn assign(config: DschemaConfig, key: &str, raw: &str) -> anyhow::Result<DschemaConfig> {
    let mut tree = serde_json::to_value(config)?;
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));

    let (parent, field) = match key.rsplit_once('.') {
        Some((parent, field)) => (pointer(parent), field),
        None => (String::new(), key),
    };
    let slot = tree
        .pointer_mut(&parent)
        .and_then(Value::as_object_mut)
        .ok_or_else(|| anyhow!("unknown config section in {key}"))?;
    slot.insert(field.to_string(), value);

    serde_json::from_value(tree).map_err(|e| anyhow!("invalid value for {key}: {e}"))
}
