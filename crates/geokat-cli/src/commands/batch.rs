//! Batch command for processing multiple document files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use geokat_core::parser::{DocumentParser, DocumentReport};
use geokat_core::stats::FieldStats;
use geokat_core::{sanitize_filename, TypeCatalog};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern (e.g. "scans/*.txt")
    #[arg(required = true)]
    input: String,

    /// Output directory for catalog and issues files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Write a registry CSV with one row per document
    #[arg(long)]
    summary: bool,

    /// Move processed files into per-type subfolders of this directory
    #[arg(long)]
    move_to: Option<PathBuf>,

    /// Continue with the remaining files when one fails
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessOutcome {
    path: PathBuf,
    report: Option<DocumentReport>,
    error: Option<String>,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let catalog = match config_path {
        Some(path) => TypeCatalog::from_file(Path::new(path))?,
        None => TypeCatalog::default(),
    };

    // Expand the glob pattern; only text documents qualify
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|entry| entry.ok())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
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

    if let Some(output_dir) = &args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let parser = DocumentParser::with_catalog(&catalog);
    let mut stats = FieldStats::new();
    let mut outcomes = Vec::with_capacity(files.len());

    for path in files {
        match process_file(&path, &parser, &args) {
            Ok(report) => {
                stats.record(&report.record);
                if let Some(move_dir) = &args.move_to {
                    if let Err(e) = move_by_type(&path, &report, move_dir) {
                        warn!("Failed to move {}: {}", path.display(), e);
                    }
                }
                outcomes.push(ProcessOutcome {
                    path,
                    report: Some(report),
                    error: None,
                });
            }
            Err(e) => {
                if !args.continue_on_error {
                    error!("Failed to process {}: {}", path.display(), e);
                    anyhow::bail!("Processing failed on {}: {}", path.display(), e);
                }
                warn!("Failed to process {}: {}", path.display(), e);
                outcomes.push(ProcessOutcome {
                    path,
                    report: None,
                    error: Some(e.to_string()),
                });
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    if args.summary {
        let registry_path = args
            .output_dir
            .as_ref()
            .map(|dir| dir.join("registry.csv"))
            .unwrap_or_else(|| PathBuf::from("registry.csv"));
        write_registry(&registry_path, &outcomes)?;
        println!(
            "{} Registry written to {}",
            style("✓").green(),
            registry_path.display()
        );
    }

    let successful = outcomes.iter().filter(|o| o.report.is_some()).count();
    let failed: Vec<&ProcessOutcome> = outcomes.iter().filter(|o| o.error.is_some()).collect();

    println!();
    println!(
        "{} Processed {} files in {:.2}s",
        style("✓").green(),
        outcomes.len(),
        start.elapsed().as_secs_f64()
    );
    println!(
        "   {} successful, {} failed",
        style(successful).green(),
        style(failed.len()).red()
    );

    if stats.documents() > 0 {
        println!();
        println!("Field coverage:");
        for coverage in stats.coverage() {
            println!(
                "   {}: {}/{} ({:.1}%)",
                coverage.field,
                coverage.count,
                stats.documents(),
                coverage.percent
            );
        }
    }

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for outcome in &failed {
            println!(
                "  - {}: {}",
                outcome.path.display(),
                outcome.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_file(
    path: &Path,
    parser: &DocumentParser,
    args: &BatchArgs,
) -> anyhow::Result<DocumentReport> {
    let text = fs::read_to_string(path)?;
    if text.trim().is_empty() {
        anyhow::bail!("document is empty");
    }

    let out_dir = args
        .output_dir
        .clone()
        .or_else(|| path.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    let report = parser.process(&text, &out_dir)?;
    debug!("Processed {}: {}", path.display(), report.catalog.status);
    Ok(report)
}

/// File the source document under a per-type subfolder, mirroring the
/// paper archive layout. Unclassified documents land in "Без_типа".
fn move_by_type(path: &Path, report: &DocumentReport, move_dir: &Path) -> anyhow::Result<()> {
    let type_name = report
        .record
        .communication_type
        .as_deref()
        .unwrap_or("Без_типа");
    let target_dir = move_dir.join(sanitize_filename(type_name));
    fs::create_dir_all(&target_dir)?;

    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("invalid file name: {}", path.display()))?;
    fs::rename(path, target_dir.join(file_name))?;
    Ok(())
}

fn write_registry(path: &Path, outcomes: &[ProcessOutcome]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "file",
        "communication_type",
        "contract_number",
        "document_id",
        "survey_date",
        "points",
        "status",
        "catalog",
        "error",
    ])?;

    for outcome in outcomes {
        let file_name = outcome
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("");

        match &outcome.report {
            Some(report) => {
                let points = report.catalog.valid.to_string();
                let status = report.catalog.status.to_string();
                wtr.write_record([
                    file_name,
                    report.record.communication_type.as_deref().unwrap_or(""),
                    report.record.contract_number.as_deref().unwrap_or(""),
                    report.record.document_id.as_deref().unwrap_or(""),
                    report.record.survey_date.as_deref().unwrap_or(""),
                    &points,
                    &status,
                    &report.catalog.counts,
                    "",
                ])?;
            }
            None => {
                wtr.write_record([
                    file_name,
                    "",
                    "",
                    "",
                    "",
                    "",
                    "error",
                    "",
                    outcome.error.as_deref().unwrap_or(""),
                ])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
