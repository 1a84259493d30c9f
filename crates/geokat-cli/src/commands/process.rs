//! Process command for extracting data from a single document file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use geokat_core::parser::{DocumentParser, DocumentReport};
use geokat_core::TypeCatalog;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input document text file
    #[arg(required = true)]
    input: PathBuf,

    /// Directory for catalog and issues files (default: next to the input)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for the field record
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Print extraction warnings
    #[arg(long)]
    show_warnings: bool,

    /// Print processing time
    #[arg(long)]
    show_timing: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let catalog = match config_path {
        Some(path) => TypeCatalog::from_file(Path::new(path))?,
        None => TypeCatalog::default(),
    };

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    pb.set_message("Reading document...");
    pb.set_position(10);

    let text = fs::read_to_string(&args.input)?;
    if text.trim().is_empty() {
        pb.finish_and_clear();
        anyhow::bail!("Document is empty: {}", args.input.display());
    }

    let out_dir = args
        .output_dir
        .clone()
        .or_else(|| args.input.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    pb.set_message("Extracting fields...");
    pb.set_position(40);

    let parser = DocumentParser::with_catalog(&catalog);
    let report = parser.process(&text, &out_dir)?;

    pb.set_position(100);
    pb.finish_with_message("Done");

    println!("{}", format_report(&report, args.format)?);
    println!(
        "{} Catalog: {} ({})",
        style("✓").green(),
        report.catalog.status,
        report.catalog.counts
    );

    if args.show_warnings {
        for warning in &report.warnings {
            println!("{} {}", style("⚠").yellow(), warning);
        }
    }

    if args.show_timing {
        println!(
            "{} Processing time: {}ms",
            style("ℹ").blue(),
            report.processing_time_ms
        );
    }

    debug!("Total time including output: {:?}", start.elapsed());

    Ok(())
}

fn format_report(report: &DocumentReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => format_csv(report),
        OutputFormat::Text => Ok(format_text(report)),
    }
}

fn format_csv(report: &DocumentReport) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "communication_type",
        "contract_number",
        "document_id",
        "survey_date",
        "points",
        "status",
        "catalog",
    ])?;

    let points = report.catalog.valid.to_string();
    let status = report.catalog.status.to_string();
    wtr.write_record([
        report.record.communication_type.as_deref().unwrap_or(""),
        report.record.contract_number.as_deref().unwrap_or(""),
        report.record.document_id.as_deref().unwrap_or(""),
        report.record.survey_date.as_deref().unwrap_or(""),
        &points,
        &status,
        &report.catalog.counts,
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(report: &DocumentReport) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Communication type: {}\n",
        report.record.communication_type.as_deref().unwrap_or("-")
    ));
    output.push_str(&format!(
        "Contract number:    {}\n",
        report.record.contract_number.as_deref().unwrap_or("-")
    ));
    output.push_str(&format!(
        "Document id:        {}\n",
        report.record.document_id.as_deref().unwrap_or("-")
    ));
    output.push_str(&format!(
        "Survey date:        {}\n",
        report.record.survey_date.as_deref().unwrap_or("-")
    ));
    output.push_str(&format!(
        "Points:             {} ({})",
        report.catalog.counts, report.catalog.status
    ));
    output
}
