//! Convert command - turn a batch of slip documents into record tables.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::task::JoinSet;
use tracing::{debug, warn};

use payslip_core::document::{BatchReport, DocumentOutcome, DocumentProcessor, FileDocument};
use payslip_core::export::{XlsxExporter, write_records, write_summaries};
use payslip_core::models::config::PayslipConfig;
use payslip_core::models::{MonthlySummary, SalaryRecord};
use payslip_core::summary::MonthlyAggregator;

use super::load_config;

/// Arguments for the convert command.
#[derive(Args)]
pub struct ConvertArgs {
    /// Input files or glob pattern (PDF or page text)
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Output format for the record table
    #[arg(short, long, value_enum, default_value = "csv")]
    format: TableFormat,

    /// Also write the monthly summary
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Stop at the first document that cannot be read
    #[arg(long)]
    fail_fast: bool,

    /// Do not append a timestamp to output file names
    #[arg(long)]
    no_timestamp: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum TableFormat {
    /// Comma-separated values
    Csv,
    /// Excel workbook
    Xlsx,
    /// JSON array
    Json,
}

impl TableFormat {
    fn extension(self) -> &'static str {
        match self {
            TableFormat::Csv => "csv",
            TableFormat::Xlsx => "xlsx",
            TableFormat::Json => "json",
        }
    }
}

pub async fn run(args: ConvertArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "pdf" | "txt")
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

    let processor = Arc::new(DocumentProcessor::from_config(&config.extraction)?);
    let batch = process_files(&files, processor, &config, args.jobs.max(1), args.fail_fast).await?;

    let records = batch.records();
    if records.is_empty() {
        print_report(&batch, 0, start);
        anyhow::bail!("No salary records found in the input files");
    }

    // Records are written even if the summary cannot be built
    let aggregation = MonthlyAggregator::new()
        .with_policy(config.summary.unknown_month_policy)
        .aggregate(&records);

    fs::create_dir_all(&args.output_dir)?;
    let stem = output_stem(&config, args.no_timestamp);

    let summaries = match (&aggregation, args.summary) {
        (Ok(summaries), true) => Some(summaries.as_slice()),
        _ => None,
    };

    let records_path = args
        .output_dir
        .join(format!("{}.{}", stem, args.format.extension()));
    write_table(&records_path, args.format, &records, summaries, &config)?;
    println!(
        "{} Records written to {}",
        style("✓").green(),
        records_path.display()
    );

    if let Some(summaries) = summaries {
        if !matches!(args.format, TableFormat::Xlsx) {
            let summary_path = args.output_dir.join(format!(
                "{}_summary.{}",
                stem,
                args.format.extension()
            ));
            write_summary_table(&summary_path, args.format, summaries)?;
            println!(
                "{} Summary written to {}",
                style("✓").green(),
                summary_path.display()
            );
        }
    }

    let months = aggregation.as_ref().map(|s| s.len()).unwrap_or(0);
    print_report(&batch, months, start);

    if let Err(e) = aggregation {
        if args.summary {
            anyhow::bail!("Monthly summary failed: {}", e);
        }
        warn!("Monthly summary unavailable: {}", e);
    }

    Ok(())
}

async fn process_files(
    files: &[PathBuf],
    processor: Arc<DocumentProcessor>,
    config: &PayslipConfig,
    jobs: usize,
    fail_fast: bool,
) -> anyhow::Result<BatchReport> {
    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut outcomes: Vec<Option<DocumentOutcome>> = vec![None; files.len()];
    let mut tasks = JoinSet::new();

    for (index, path) in files.iter().cloned().enumerate() {
        if tasks.len() >= jobs {
            collect_next(&mut tasks, &mut outcomes, &pb, fail_fast).await?;
        }

        let processor = Arc::clone(&processor);
        let pdf_config = config.pdf.clone();
        tasks.spawn_blocking(move || {
            let document = FileDocument::new(&path).with_config(pdf_config);
            (index, processor.process(&document))
        });
    }

    while !tasks.is_empty() {
        collect_next(&mut tasks, &mut outcomes, &pb, fail_fast).await?;
    }

    pb.finish_with_message("Complete");
    Ok(outcomes.into_iter().flatten().collect())
}

async fn collect_next(
    tasks: &mut JoinSet<(usize, DocumentOutcome)>,
    outcomes: &mut [Option<DocumentOutcome>],
    pb: &ProgressBar,
    fail_fast: bool,
) -> anyhow::Result<()> {
    let Some(joined) = tasks.join_next().await else {
        return Ok(());
    };
    let (index, outcome) = joined?;
    pb.inc(1);

    match &outcome {
        DocumentOutcome::Failed { source, reason } => {
            if fail_fast {
                tasks.abort_all();
                anyhow::bail!("Processing {} failed: {}", source, reason);
            }
            warn!("Failed to process {}: {}", source, reason);
        }
        DocumentOutcome::Empty(report) => {
            debug!("{} contained no salary records", report.source);
        }
        DocumentOutcome::Parsed(report) => {
            debug!(
                "{}: {} records in {}ms",
                report.source,
                report.records.len(),
                report.processing_time_ms
            );
        }
    }

    outcomes[index] = Some(outcome);
    Ok(())
}

fn output_stem(config: &PayslipConfig, no_timestamp: bool) -> String {
    if config.export.timestamped_names && !no_timestamp {
        format!(
            "{}_{}",
            config.export.file_stem,
            chrono::Local::now().format("%Y%m%d_%H%M%S")
        )
    } else {
        config.export.file_stem.clone()
    }
}

fn write_table(
    path: &Path,
    format: TableFormat,
    records: &[SalaryRecord],
    summaries: Option<&[MonthlySummary]>,
    config: &PayslipConfig,
) -> anyhow::Result<()> {
    match format {
        TableFormat::Csv => write_records(BufWriter::new(File::create(path)?), records)?,
        TableFormat::Json => serde_json::to_writer_pretty(BufWriter::new(File::create(path)?), records)?,
        TableFormat::Xlsx => XlsxExporter::from_config(&config.export).save(path, records, summaries)?,
    }
    Ok(())
}

fn write_summary_table(
    path: &Path,
    format: TableFormat,
    summaries: &[MonthlySummary],
) -> anyhow::Result<()> {
    match format {
        TableFormat::Json => {
            serde_json::to_writer_pretty(BufWriter::new(File::create(path)?), summaries)?
        }
        _ => write_summaries(BufWriter::new(File::create(path)?), summaries)?,
    }
    Ok(())
}

fn print_report(batch: &BatchReport, months: usize, start: Instant) {
    let succeeded = batch.succeeded().count();
    let empty: Vec<&str> = batch.empty().collect();
    let failed: Vec<(&str, &str)> = batch.failed().collect();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        batch.outcomes.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} without records, {} failed",
        style(succeeded).green(),
        style(empty.len()).yellow(),
        style(failed.len()).red()
    );

    if !empty.is_empty() {
        println!();
        println!("{}", style("Files without salary records:").yellow());
        for source in &empty {
            println!("  - {}", source);
        }
    }

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for (source, reason) in &failed {
            println!("  - {}: {}", source, reason);
        }
    }

    println!();
    println!("Total records processed: {}", batch.record_count());
    println!("Total months covered: {}", months);
}
