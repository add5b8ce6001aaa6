//! Extract command - read the salary records of a single document.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::info;

use payslip_core::document::{DocumentOutcome, DocumentProcessor, FileDocument};
use payslip_core::export::records_to_csv;
use payslip_core::models::{Field, SalaryRecord};

use super::load_config;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (PDF or page text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// One block of fields per slip
    Text,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let processor = DocumentProcessor::from_config(&config.extraction)?;
    let document = FileDocument::new(&args.input).with_config(config.pdf.clone());

    let records = match processor.process(&document) {
        DocumentOutcome::Failed { source, reason } => {
            anyhow::bail!("Failed to process {}: {}", source, reason);
        }
        DocumentOutcome::Empty(report) => {
            eprintln!(
                "{} No salary records found in {} ({} pages, {} slips)",
                style("ℹ").blue(),
                report.source,
                report.pages,
                report.slips
            );
            report.records
        }
        DocumentOutcome::Parsed(report) => {
            info!(
                "{} pages, {} slips, {} records",
                report.pages,
                report.slips,
                report.records.len()
            );
            report.records
        }
    };

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&records)?,
        OutputFormat::Csv => records_to_csv(&records)?,
        OutputFormat::Text => render_text(&records),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Wrote {} records to {} in {:?}",
            style("✓").green(),
            records.len(),
            output_path.display(),
            start.elapsed()
        );
    } else {
        print!("{}", output);
    }

    Ok(())
}

fn render_text(records: &[SalaryRecord]) -> String {
    let width = Field::ALL.iter().map(|f| f.name().len()).max().unwrap_or(0);
    let mut out = String::new();

    for (i, record) in records.iter().enumerate() {
        out.push_str(&format!("Slip {}\n", i + 1));
        for (field, value) in record.values() {
            out.push_str(&format!("  {:<width$}  {}\n", field.name(), value, width = width));
        }
        out.push('\n');
    }

    out
}
