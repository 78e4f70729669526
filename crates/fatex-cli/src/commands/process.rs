//! Process command - flatten a single invoice file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use fatex_core::export::ExportFormat;
use fatex_core::{
    AuditRecord, AuditSink, FatexConfig, FlattenResult, InvoiceFlattener, TableExporter,
};

use crate::audit::JsonLinesAuditSink;
use crate::export::{to_json, DelimitedExporter};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input XML invoice file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Group rows by the reference key and sum line totals
    #[arg(short, long)]
    group: bool,

    /// Append an execution-audit record to this JSON-lines file
    #[arg(long)]
    audit_log: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Delimited text (';' fields, ',' decimals)
    Csv,
    /// JSON array of row objects
    Json,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let grouping = args.group || config.extraction.group_by_reference;
    let parameter = format!("grouping={}", if grouping { "on" } else { "off" });

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let filename = display_name(&args.input);
    info!("Processing file: {}", args.input.display());

    let result = flatten_file(&args.input, &config, grouping);

    // Audit before surfacing the outcome; transport failures only warn.
    if let Some(audit_path) = &args.audit_log {
        let record = match &result {
            Ok(res) => AuditRecord::success(
                &filename,
                &parameter,
                format!("{} rows", res.table.row_count()),
            ),
            Err(e) => AuditRecord::failure(&filename, &parameter, e.to_string()),
        };
        if let Err(e) = JsonLinesAuditSink::new(audit_path).record(&record) {
            eprintln!(
                "{} Could not write audit record: {}",
                style("!").yellow(),
                e
            );
        }
    }

    let result = result?;

    for warning in &result.warnings {
        eprintln!("{} {}", style("!").yellow(), warning);
    }

    println!(
        "{} {} output rows from {} line items",
        style("ℹ").blue(),
        result.table.row_count(),
        result.nr_lines
    );

    let output = format_table(&result, args.format, &config)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

pub fn load_config(config_path: Option<&str>) -> anyhow::Result<FatexConfig> {
    Ok(match config_path {
        Some(path) => FatexConfig::from_file(Path::new(path))?,
        None => FatexConfig::default(),
    })
}

/// Filename shown in output rows and audit records.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn flatten_file(
    path: &Path,
    config: &FatexConfig,
    grouping: bool,
) -> anyhow::Result<FlattenResult> {
    let xml = fs::read_to_string(path)?;
    let flattener =
        InvoiceFlattener::with_config(config.extraction.clone()).with_grouping(grouping);
    Ok(flattener.flatten(&xml, &display_name(path))?)
}

pub fn format_table(
    result: &FlattenResult,
    format: OutputFormat,
    config: &FatexConfig,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Csv => {
            let bytes = DelimitedExporter
                .export(&result.table, &ExportFormat::delimited(&config.export))?;
            Ok(String::from_utf8(bytes)?)
        }
        OutputFormat::Json => Ok(to_json(&result.table)?),
    }
}
