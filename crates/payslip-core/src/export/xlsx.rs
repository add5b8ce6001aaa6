//! Excel export of records and monthly summaries using rust_xlsxwriter.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::debug;

use crate::error::ExportError;
use crate::models::config::ExportConfig;
use crate::models::record::{Field, FieldKind, SalaryRecord};
use crate::models::summary::{MonthlySummary, SummaryValue};

/// Integers above this many digits lose precision as spreadsheet numbers.
const MAX_EXACT_DIGITS: usize = 15;

/// Builds a workbook with a records sheet and an optional summary sheet.
pub struct XlsxExporter {
    records_sheet: String,
    summary_sheet: String,
}

impl XlsxExporter {
    pub fn new() -> Self {
        Self::from_config(&ExportConfig::default())
    }

    pub fn from_config(config: &ExportConfig) -> Self {
        Self {
            records_sheet: config.records_sheet.clone(),
            summary_sheet: config.summary_sheet.clone(),
        }
    }

    /// Write the workbook to `path`.
    pub fn save(
        &self,
        path: &Path,
        records: &[SalaryRecord],
        summaries: Option<&[MonthlySummary]>,
    ) -> Result<(), ExportError> {
        let mut workbook = self.build(records, summaries)?;
        workbook.save(path)?;
        debug!("Wrote workbook to {}", path.display());
        Ok(())
    }

    /// Render the workbook into memory.
    pub fn to_bytes(
        &self,
        records: &[SalaryRecord],
        summaries: Option<&[MonthlySummary]>,
    ) -> Result<Vec<u8>, ExportError> {
        let mut workbook = self.build(records, summaries)?;
        Ok(workbook.save_to_buffer()?)
    }

    fn build(
        &self,
        records: &[SalaryRecord],
        summaries: Option<&[MonthlySummary]>,
    ) -> Result<Workbook, ExportError> {
        let mut workbook = Workbook::new();

        let worksheet = workbook.add_worksheet().set_name(&self.records_sheet)?;
        write_records(worksheet, records)?;

        if let Some(summaries) = summaries {
            let worksheet = workbook.add_worksheet().set_name(&self.summary_sheet)?;
            write_summaries(worksheet, summaries)?;
        }

        Ok(workbook)
    }
}

impl Default for XlsxExporter {
    fn default() -> Self {
        Self::new()
    }
}

fn write_records(worksheet: &mut Worksheet, records: &[SalaryRecord]) -> Result<(), ExportError> {
    let header = Format::new().set_bold();
    let integer = Format::new().set_num_format("0");

    for (col, field) in Field::ALL.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, field.name(), &header)?;
    }

    for (row, record) in records.iter().enumerate() {
        let row = (row + 1) as u32;
        for (col, (field, value)) in record.values().enumerate() {
            let col = col as u16;
            match record_cell(field, value) {
                Cell::Integer(n) => worksheet.write_number_with_format(row, col, n, &integer)?,
                Cell::IntegerText(s) => worksheet.write_string_with_format(row, col, s, &integer)?,
                Cell::Number(n) => worksheet.write_number(row, col, n)?,
                Cell::Text(s) => worksheet.write_string(row, col, s)?,
            };
        }
    }

    Ok(())
}

/// How one record value lands in the sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Cell<'a> {
    /// Number with the integer format.
    Integer(f64),
    /// Integer-formatted column whose value cannot be held exactly.
    IntegerText(&'a str),
    Number(f64),
    Text(&'a str),
}

fn record_cell(field: Field, value: &str) -> Cell<'_> {
    if field.integer_formatted() {
        match exact_integer(value) {
            Some(n) => Cell::Integer(n),
            None => Cell::IntegerText(value),
        }
    } else if field.kind() == FieldKind::Numeric {
        match value.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Cell::Number(n),
            _ => Cell::Text(value),
        }
    } else {
        Cell::Text(value)
    }
}

fn write_summaries(
    worksheet: &mut Worksheet,
    summaries: &[MonthlySummary],
) -> Result<(), ExportError> {
    let header = Format::new().set_bold();

    for (col, column) in MonthlySummary::COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *column, &header)?;
    }

    for (row, summary) in summaries.iter().enumerate() {
        let row = (row + 1) as u32;
        for (col, column) in MonthlySummary::COLUMNS.iter().enumerate() {
            let col = col as u16;
            match summary.value(column) {
                Some(SummaryValue::Text(s)) => worksheet.write_string(row, col, s)?,
                Some(SummaryValue::Count(n)) => worksheet.write_number(row, col, n as f64)?,
                Some(SummaryValue::Amount(v)) => worksheet.write_number(row, col, v)?,
                None => continue,
            };
        }
    }

    Ok(())
}

/// Parse a plain digit string that a spreadsheet can hold exactly.
///
/// Values with leading zeros are kept as text so account numbers survive.
fn exact_integer(value: &str) -> Option<f64> {
    let digits = value.trim();
    let plain = !digits.is_empty()
        && digits.len() <= MAX_EXACT_DIGITS
        && digits.bytes().all(|b| b.is_ascii_digit())
        && (digits == "0" || !digits.starts_with('0'));
    if plain { digits.parse().ok() } else { None }
}
