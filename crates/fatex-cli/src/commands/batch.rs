//! Batch command - flatten multiple invoice files.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use fatex_core::{AuditRecord, AuditSink, FlattenResult};

use crate::audit::JsonLinesAuditSink;

use super::process::{display_name, flatten_file, format_table, load_config, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Group rows by the reference key and sum line totals
    #[arg(short, long)]
    group: bool,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Append execution-audit records to this JSON-lines file
    #[arg(long)]
    audit_log: Option<PathBuf>,
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    outcome: Option<FlattenResult>,
    error: Option<String>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let grouping = args.group || config.extraction.group_by_reference;
    let parameter = format!("grouping={}", if grouping { "on" } else { "off" });

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("xml"))
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

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let mut audit_sink = args.audit_log.as_deref().map(JsonLinesAuditSink::new);

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    // Each document is independent; process sequentially and merge here.
    let mut results = Vec::with_capacity(files.len());
    for path in files {
        let outcome = flatten_file(&path, &config, grouping);

        if let Some(sink) = audit_sink.as_mut() {
            let record = match &outcome {
                Ok(res) => AuditRecord::success(
                    &display_name(&path),
                    &parameter,
                    format!("{} rows", res.table.row_count()),
                ),
                Err(e) => AuditRecord::failure(&display_name(&path), &parameter, e.to_string()),
            };
            if let Err(e) = sink.record(&record) {
                warn!("could not write audit record: {e}");
            }
        }

        match outcome {
            Ok(res) => {
                results.push(FileResult {
                    path: path.clone(),
                    outcome: Some(res),
                    error: None,
                });
            }
            Err(e) => {
                let message = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), message);
                    results.push(FileResult {
                        path: path.clone(),
                        outcome: None,
                        error: Some(message),
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), message);
                    anyhow::bail!("Processing failed: {}", message);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    // Write per-file outputs
    let successful: Vec<_> = results.iter().filter(|r| r.outcome.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    for result in &successful {
        if let (Some(res), Some(output_dir)) = (&result.outcome, &args.output_dir) {
            let stem = result
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("invoice");
            let extension = match args.format {
                OutputFormat::Csv => "csv",
                OutputFormat::Json => "json",
            };
            let output_path = output_dir.join(format!("{}.{}", stem, extension));

            let content = format_table(res, args.format, &config)?;
            fs::write(&output_path, content)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn write_summary(path: &PathBuf, results: &[FileResult]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record([
        "filename",
        "status",
        "nr_lines",
        "output_rows",
        "warnings",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = display_name(&result.path);
        match (&result.outcome, &result.error) {
            (Some(res), _) => {
                writer.write_record([
                    filename.as_str(),
                    "ok",
                    &res.nr_lines.to_string(),
                    &res.table.row_count().to_string(),
                    &res.warnings.len().to_string(),
                    &res.processing_time_ms.to_string(),
                    "",
                ])?;
            }
            (None, Some(error)) => {
                writer.write_record([filename.as_str(), "failed", "", "", "", "", error])?;
            }
            (None, None) => {}
        }
    }

    writer.flush()?;
    Ok(())
}
