//! Error types for the payslip-core library.

use thiserror::Error;

/// Main error type for the payslip library.
#[derive(Error, Debug)]
pub enum PayslipError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Monthly aggregation error.
    #[error("aggregation error: {0}")]
    Aggregation(#[from] AggregationError),

    /// Export or import error.
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to obtaining page text from a document.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),

    /// The underlying source could not be read.
    #[error("failed to read document: {0}")]
    Read(String),
}

/// Errors raised while building monthly summaries.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AggregationError {
    /// A numeric field holds text that is not a number.
    #[error("{field} of employee {employee_id} ({month} {year}) is not numeric: {value:?}")]
    DataFormat {
        field: &'static str,
        value: String,
        employee_id: String,
        year: String,
        month: String,
    },

    /// A month name outside the known month table.
    #[error("unknown month name {month:?} in {year}")]
    UnknownMonth { year: String, month: String },

    /// A year that is not an integer.
    #[error("invalid year {year:?} for {month}")]
    InvalidYear { year: String, month: String },
}

/// Errors related to tabular export and import.
#[derive(Error, Debug)]
pub enum ExportError {
    /// CSV encoding or decoding failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Spreadsheet writing failed.
    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// JSON encoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The CSV header does not match the expected columns.
    #[error("unexpected CSV header: expected {expected:?}, found {found:?}")]
    Header { expected: String, found: String },
}

/// Result type for the payslip library.
pub type Result<T> = std::result::Result<T, PayslipError>;
