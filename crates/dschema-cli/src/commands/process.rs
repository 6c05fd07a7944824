//! Process command - compile a single agreement.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use dschema_core::models::{BreakKind, ValidationPolicy};
use dschema_core::{process_single, Compiled};

use super::{load_config, load_source, report_notes};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Extraction file (JSON) or plain text file
    #[arg(required = true)]
    input: PathBuf,

    /// Table dump to pair with a plain text input
    #[arg(short, long)]
    tables: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Reject documents with missing quantities or SKU data instead of defaulting
    #[arg(long)]
    strict: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Discount schema JSON
    Json,
    /// One CSV row per break line
    Csv,
    /// Plain text summary
    Text,
}

pub fn run(args: ProcessArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if args.strict {
        config.single.validation = ValidationPolicy::Strict;
    }

    info!("Processing file: {}", args.input.display());
    let source = load_source(&args.input, args.tables.as_deref())?;

    let compiled = process_single(&config, &source)?;
    report_notes(&compiled);

    let output = format_compiled(&compiled, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

pub fn format_compiled(compiled: &Compiled, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&compiled.schema)?),
        OutputFormat::Csv => format_csv(compiled),
        OutputFormat::Text => Ok(format_text(compiled)),
    }
}

fn format_csv(compiled: &Compiled) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "identifier",
        "seqno",
        "sku",
        "kind",
        "uom_code",
        "break_from",
        "break_to",
        "discount",
    ])?;

    for group in &compiled.schema.breaks {
        let kind = match group.kind() {
            BreakKind::VendorCashback => "vendor_cashback",
            BreakKind::ShareDiscount => "share_discount",
        };
        for line in &group.lines {
            wtr.write_record([
                compiled.document.identifier.as_str(),
                &group.sequence_number.to_string(),
                &group.sku,
                kind,
                &group.uom_code.to_string(),
                &line.break_from.to_string(),
                &line.break_to.to_string(),
                &line.discount_value.to_string(),
            ])?;
        }
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(compiled: &Compiled) -> String {
    let doc = &compiled.document;
    let mut output = String::new();

    output.push_str(&format!("Agreement: {}\n", doc.identifier));
    output.push_str(&format!("Schema: {}\n", compiled.schema.name));
    output.push_str(&format!("Period: {} - {}\n", doc.valid_from, doc.valid_to));
    output.push_str(&format!(
        "Area: {} {} ({})\n",
        doc.area.code, doc.area.name, doc.area.org_id
    ));
    output.push_str(&format!(
        "Allocated: {} {}\n",
        doc.qty_allocated, doc.uom
    ));
    output.push_str(&format!(
        "Selection: {} ({} customer(s))\n",
        doc.selection_mode.code(),
        compiled.schema.customers.len()
    ));
    output.push('\n');

    output.push_str("SKUs:\n");
    for entry in &doc.sku_entries {
        output.push_str(&format!(
            "  {} - {} {} ({} tier(s))\n",
            entry.sku,
            entry.qty_allocated,
            entry.uom,
            entry.strata_tiers.len()
        ));
    }
    output.push('\n');

    output.push_str("Breaks:\n");
    for group in &compiled.schema.breaks {
        let label = match group.kind() {
            BreakKind::VendorCashback => "cashback",
            BreakKind::ShareDiscount => "share",
        };
        output.push_str(&format!("  [{}] {} {}\n", group.sequence_number, group.sku, label));
        for line in &group.lines {
            output.push_str(&format!(
                "    {} - {}: {}%\n",
                line.break_from, line.break_to, line.discount_value
            ));
        }
    }

    output
}
