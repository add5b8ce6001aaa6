//! Summarize command - monthly totals from an exported record table.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::PathBuf;

use clap::Args;
use console::style;

use payslip_core::export::{read_records, summaries_to_csv};
use payslip_core::models::{MonthlySummary, SummaryView};
use payslip_core::summary::MonthlyAggregator;

use super::load_config;

/// Arguments for the summarize command.
#[derive(Args)]
pub struct SummarizeArgs {
    /// Record CSV written by `payslip convert`
    #[arg(required = true)]
    input: PathBuf,

    /// Column group to display (default: allowances, deductions and overall)
    #[arg(long, value_enum)]
    view: Option<View>,

    /// Write the full summary table to a file instead of printing it
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Format of the output file
    #[arg(short, long, value_enum, default_value = "csv")]
    format: SummaryFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum View {
    Allowances,
    Deductions,
    Overall,
    All,
}

impl From<View> for SummaryView {
    fn from(view: View) -> Self {
        match view {
            View::Allowances => SummaryView::Allowances,
            View::Deductions => SummaryView::Deductions,
            View::Overall => SummaryView::Overall,
            View::All => SummaryView::All,
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum SummaryFormat {
    Csv,
    Json,
}

pub async fn run(args: SummarizeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let file = File::open(&args.input)
        .map_err(|e| anyhow::anyhow!("Cannot open {}: {}", args.input.display(), e))?;
    let records = read_records(BufReader::new(file))?;

    if records.is_empty() {
        anyhow::bail!("No salary records in {}", args.input.display());
    }

    let summaries = MonthlyAggregator::new()
        .with_policy(config.summary.unknown_month_policy)
        .aggregate(&records)?;

    if let Some(output_path) = &args.output {
        let content = match args.format {
            SummaryFormat::Csv => summaries_to_csv(&summaries)?,
            SummaryFormat::Json => serde_json::to_string_pretty(&summaries)?,
        };
        fs::write(output_path, content)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        let views = match args.view {
            Some(view) => vec![view.into()],
            None => vec![
                SummaryView::Allowances,
                SummaryView::Deductions,
                SummaryView::Overall,
            ],
        };
        for view in views {
            println!("{}", style(view.title()).bold());
            print!("{}", render_table(&summaries, view));
            println!();
        }
    }

    println!("Total records processed: {}", records.len());
    println!("Total months covered: {}", summaries.len());

    Ok(())
}

/// Render the columns of `view` as a right-aligned text table.
fn render_table(summaries: &[MonthlySummary], view: SummaryView) -> String {
    let columns = view.columns();
    let rows: Vec<Vec<String>> = summaries
        .iter()
        .map(|s| {
            columns
                .iter()
                .map(|c| s.value(c).map(|v| v.to_string()).unwrap_or_default())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            rows.iter()
                .map(|r| r[i].len())
                .chain(std::iter::once(c.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(c, w)| format!("{:>w$}", c, w = *w))
        .collect();
    out.push_str(&header.join("  "));
    out.push('\n');

    for row in &rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!("{:>w$}", v, w = *w))
            .collect();
        out.push_str(&line.join("  "));
        out.push('\n');
    }

    out
}
