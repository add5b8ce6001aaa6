//! Document-level processing: page sources, per-document outcomes and batches.

mod processor;
mod source;

pub use processor::{BatchReport, DocumentOutcome, DocumentProcessor, DocumentReport};
pub use source::{FileDocument, PAGE_BREAK, PageSource, PdfDocument, TextDocument};
