//! CSV export and import of records and summaries.

use std::io;

use csv::{ReaderBuilder, WriterBuilder};

use crate::error::ExportError;
use crate::models::record::{Field, SalaryRecord};
use crate::models::summary::MonthlySummary;

/// Write records with a header row in column order.
///
/// The header is written even when there are no records.
pub fn write_records<W: io::Write>(writer: W, records: &[SalaryRecord]) -> Result<(), ExportError> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);

    wtr.write_record(Field::ALL.map(Field::name))?;
    for record in records {
        wtr.serialize(record)?;
    }

    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Render records as a CSV string.
pub fn records_to_csv(records: &[SalaryRecord]) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_records(&mut buf, records)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Read records previously written by [`write_records`].
///
/// Every field is read back verbatim, so digit strings keep their leading
/// zeros.
pub fn read_records<R: io::Read>(reader: R) -> Result<Vec<SalaryRecord>, ExportError> {
    let mut rdr = ReaderBuilder::new().from_reader(reader);

    let found: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let expected: Vec<String> = Field::ALL.iter().map(|f| f.name().to_string()).collect();
    if found != expected {
        return Err(ExportError::Header {
            expected: expected.join(","),
            found: found.join(","),
        });
    }

    rdr.deserialize()
        .collect::<Result<Vec<SalaryRecord>, csv::Error>>()
        .map_err(ExportError::from)
}

/// Write monthly summaries with a header row.
pub fn write_summaries<W: io::Write>(
    writer: W,
    summaries: &[MonthlySummary],
) -> Result<(), ExportError> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);

    wtr.write_record(MonthlySummary::COLUMNS)?;
    for summary in summaries {
        wtr.serialize(summary)?;
    }

    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Render summaries as a CSV string.
pub fn summaries_to_csv(summaries: &[MonthlySummary]) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_summaries(&mut buf, summaries)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
