//! Inspect command - show how table blocks are classified and read.

use std::path::{Path, PathBuf};

use clap::Args;
use console::style;

use dschema_core::tables::{read_dump_file, TableKind};
use dschema_core::{Pipeline, SourceDocument};

use super::{load_config, load_source};

/// Arguments for the inspect command.
#[derive(Args)]
pub struct InspectArgs {
    /// Extraction file (JSON), plain text file, or table dump (CSV)
    #[arg(required = true)]
    input: PathBuf,

    /// Table dump to pair with a plain text input
    #[arg(short, long)]
    tables: Option<PathBuf>,

    /// Print block summaries as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: InspectArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let is_dump = args
        .input
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    let source = if is_dump {
        SourceDocument::new(String::new(), read_dump_file(&args.input)?)
    } else {
        load_source(&args.input, args.tables.as_deref())?
    };

    let outcome = Pipeline::single(&config).draft(&source);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.blocks)?);
        return Ok(());
    }

    for block in &outcome.blocks {
        let c = &block.classification;
        let kind = match c.kind {
            TableKind::Unclassified => style(c.kind.to_string()).yellow(),
            _ => style(c.kind.to_string()).green(),
        };
        println!(
            "Block {}: {} ({} rows, data from row {}, {} applied)",
            block.index, kind, block.rows, c.data_start, block.applied
        );
        if let Some(header) = &c.header {
            println!("  header:    {}", header.join(" | "));
        }
        if let Some(subheader) = &c.subheader {
            println!("  subheader: {}", subheader.join(" | "));
        }
    }

    if !outcome.issues.is_empty() {
        println!();
        println!("{}", style("Skipped rows:").yellow());
        for issue in &outcome.issues {
            println!("  - {}", issue);
        }
    }

    let draft = &outcome.draft;
    println!();
    println!(
        "{} {} SKU(s), {} outlet(s), allocated quantity {}",
        style("ℹ").blue(),
        draft.sku_entries.len(),
        draft.outlets.len(),
        draft
            .qty_allocated
            .map(|q| q.to_string())
            .unwrap_or_else(|| "not found".to_string())
    );

    Ok(())
}
