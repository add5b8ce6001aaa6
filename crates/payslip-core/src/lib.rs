//! Core library for payroll slip processing.
//!
//! This crate provides:
//! - PDF page text extraction
//! - Slip segmentation on the recurring `SNO:` marker
//! - Rule-based field extraction into [`SalaryRecord`]s
//! - Per-document processing with failure isolation
//! - Monthly aggregation into [`MonthlySummary`] tables
//! - CSV and Excel export

pub mod document;
pub mod error;
pub mod export;
pub mod models;
pub mod pdf;
pub mod slip;
pub mod summary;

pub use document::{BatchReport, DocumentOutcome, DocumentProcessor, FileDocument, PageSource, PdfDocument, TextDocument};
pub use error::{AggregationError, ExportError, PayslipError, PdfError, Result};
pub use models::{Field, MonthlySummary, PayslipConfig, SalaryRecord, SummaryView, UnknownMonthPolicy};
pub use pdf::{PdfExtractor, PdfProcessor};
pub use slip::{RuleSlipExtractor, SlipExtractor, SlipSegmenter, extract_slip};
pub use summary::{MonthlyAggregator, monthly_summary};
