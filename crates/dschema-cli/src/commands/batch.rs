//! Batch command - compile a set of related agreements together.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error};

use dschema_core::models::ValidationPolicy;
use dschema_core::{process_batch, BatchError, Compiled};

use super::{load_config, load_source, report_notes};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern of extraction files
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Reject documents with missing quantities or SKU data instead of defaulting
    #[arg(long)]
    strict: bool,
}

pub fn run(args: BatchArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if args.strict {
        config.batch.validation = ValidationPolicy::Strict;
    }

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "json" | "txt")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut sources = Vec::with_capacity(files.len());
    for path in &files {
        pb.set_message(path.display().to_string());
        sources.push(load_source(path, None)?);
        pb.inc(1);
    }
    pb.finish_and_clear();

    // Nothing is written unless every document compiles.
    let compiled = match process_batch(&config, &sources) {
        Ok(compiled) => compiled,
        Err(BatchError::DocumentsFailed { failures }) => {
            eprintln!("{}", style("Failed files:").red());
            for failure in &failures {
                eprintln!("  - {}", failure);
            }
            anyhow::bail!("Batch aborted: {} document(s) failed", failures.len());
        }
        Err(e) => {
            error!("Batch rejected: {}", e);
            return Err(e.into());
        }
    };

    fs::create_dir_all(&args.output_dir)?;
    for result in &compiled {
        report_notes(result);
        let output_path = args
            .output_dir
            .join(format!("{}.json", result.document.identifier));
        fs::write(&output_path, serde_json::to_string_pretty(&result.schema)?)?;
        debug!("Wrote output to {}", output_path.display());
    }

    if args.summary {
        let summary_path = args.output_dir.join("summary.csv");
        write_summary(&summary_path, &files, &compiled)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!(
        "{} Compiled {} documents in {:?}",
        style("✓").green(),
        compiled.len(),
        start.elapsed()
    );

    Ok(())
}

fn write_summary(path: &Path, files: &[PathBuf], compiled: &[Compiled]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "identifier",
        "brand",
        "area",
        "selectiontype",
        "skus",
        "breaks",
        "customers",
        "warnings",
    ])?;

    for (file, result) in files.iter().zip(compiled) {
        let filename = file.file_name().and_then(|s| s.to_str()).unwrap_or("");
        let doc = &result.document;

        wtr.write_record([
            filename,
            &doc.identifier,
            &doc.brand,
            &doc.area.name,
            doc.selection_mode.code(),
            &doc.sku_entries.len().to_string(),
            &result.schema.breaks.len().to_string(),
            &result.schema.customers.len().to_string(),
            &(result.warnings.len() + result.issues.len()).to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
