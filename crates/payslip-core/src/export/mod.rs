//! Tabular export of salary records and monthly summaries.

pub mod csv;
mod xlsx;

pub use self::csv::{read_records, records_to_csv, summaries_to_csv, write_records, write_summaries};
pub use xlsx::XlsxExporter;
