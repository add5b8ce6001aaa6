//! Per-document orchestration of segmentation and extraction.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use tracing::{debug, info, warn};

use super::PageSource;
use crate::error::{PayslipError, Result};
use crate::models::config::ExtractionConfig;
use crate::models::record::SalaryRecord;
use crate::slip::{RuleSlipExtractor, SlipExtractor, SlipSegmenter};

/// Records and counters for a document whose text could be read.
#[derive(Debug, Clone)]
pub struct DocumentReport {
    /// Document identifier.
    pub source: String,
    /// Number of pages read.
    pub pages: usize,
    /// Number of slip sections found across all pages.
    pub slips: usize,
    /// Records that carried an employee number.
    pub records: Vec<SalaryRecord>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl DocumentReport {
    /// Slips dropped for lacking an employee number.
    pub fn dropped(&self) -> usize {
        self.slips - self.records.len()
    }
}

/// Result of processing one document.
#[derive(Debug, Clone)]
pub enum DocumentOutcome {
    /// The document yielded at least one record.
    Parsed(DocumentReport),
    /// The document was readable but held no valid slips.
    Empty(DocumentReport),
    /// The document's text could not be obtained.
    Failed { source: String, reason: String },
}

impl DocumentOutcome {
    pub fn source(&self) -> &str {
        match self {
            DocumentOutcome::Parsed(report) | DocumentOutcome::Empty(report) => &report.source,
            DocumentOutcome::Failed { source, .. } => source,
        }
    }

    /// Records contributed by this document (none when it failed).
    pub fn records(&self) -> &[SalaryRecord] {
        match self {
            DocumentOutcome::Parsed(report) | DocumentOutcome::Empty(report) => &report.records,
            DocumentOutcome::Failed { .. } => &[],
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, DocumentOutcome::Failed { .. })
    }

    pub fn report(&self) -> Option<&DocumentReport> {
        match self {
            DocumentOutcome::Parsed(report) | DocumentOutcome::Empty(report) => Some(report),
            DocumentOutcome::Failed { .. } => None,
        }
    }
}

/// Outcomes of a batch of documents, in input order.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub outcomes: Vec<DocumentOutcome>,
}

impl BatchReport {
    /// Documents that produced records.
    pub fn succeeded(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, DocumentOutcome::Parsed(_)))
            .map(DocumentOutcome::source)
    }

    /// Documents that were readable but yielded no records.
    pub fn empty(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, DocumentOutcome::Empty(_)))
            .map(DocumentOutcome::source)
    }

    /// Failed documents with their failure reasons.
    pub fn failed(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outcomes.iter().filter_map(|o| match o {
            DocumentOutcome::Failed { source, reason } => Some((source.as_str(), reason.as_str())),
            _ => None,
        })
    }

    /// Number of records across all documents.
    pub fn record_count(&self) -> usize {
        self.outcomes.iter().map(|o| o.records().len()).sum()
    }

    /// Merged record set, documents in input order.
    pub fn records(&self) -> Vec<SalaryRecord> {
        self.outcomes
            .iter()
            .flat_map(|o| o.records().iter().cloned())
            .collect()
    }

    /// Consume the report, keeping only the merged record set.
    pub fn into_records(self) -> Vec<SalaryRecord> {
        self.outcomes
            .into_iter()
            .flat_map(|o| match o {
                DocumentOutcome::Parsed(report) | DocumentOutcome::Empty(report) => report.records,
                DocumentOutcome::Failed { .. } => Vec::new(),
            })
            .collect()
    }
}

impl FromIterator<DocumentOutcome> for BatchReport {
    fn from_iter<I: IntoIterator<Item = DocumentOutcome>>(iter: I) -> Self {
        Self {
            outcomes: iter.into_iter().collect(),
        }
    }
}

/// Runs the segmenter and extractor over every page of a document.
pub struct DocumentProcessor<E = RuleSlipExtractor> {
    segmenter: SlipSegmenter,
    extractor: E,
    require_employee_id: bool,
}

impl DocumentProcessor<RuleSlipExtractor> {
    /// Create a processor with the standard marker and rule table.
    pub fn new() -> Self {
        Self::with_parts(SlipSegmenter::new(), RuleSlipExtractor::new())
    }

    /// Create a processor from extraction settings.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self> {
        let segmenter = SlipSegmenter::with_marker(&config.slip_marker).map_err(|e| {
            PayslipError::Config(format!("invalid slip marker {:?}: {}", config.slip_marker, e))
        })?;
        Ok(Self::with_parts(segmenter, RuleSlipExtractor::new())
            .with_employee_id_required(config.require_employee_id))
    }
}

impl Default for DocumentProcessor<RuleSlipExtractor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: SlipExtractor> DocumentProcessor<E> {
    pub fn with_parts(segmenter: SlipSegmenter, extractor: E) -> Self {
        Self {
            segmenter,
            extractor,
            require_employee_id: true,
        }
    }

    /// Set whether records without an employee number are dropped.
    pub fn with_employee_id_required(mut self, required: bool) -> Self {
        self.require_employee_id = required;
        self
    }

    /// Extract records from page texts.
    ///
    /// Returns the number of slip sections seen and the records kept.
    pub fn extract_pages<S: AsRef<str>>(&self, pages: &[S]) -> (usize, Vec<SalaryRecord>) {
        let mut slips = 0;
        let mut records = Vec::new();

        for (index, page) in pages.iter().enumerate() {
            let sections = self.segmenter.segment(page.as_ref());
            debug!("Page {}: {} slip sections", index + 1, sections.len());
            slips += sections.len();

            for section in sections {
                let record = self.extractor.extract(section);
                if self.require_employee_id && !record.is_valid() {
                    debug!("Dropping slip without employee number on page {}", index + 1);
                    continue;
                }
                records.push(record);
            }
        }

        (slips, records)
    }

    /// Process one document.
    ///
    /// Failure to obtain the document's text is reported as
    /// [`DocumentOutcome::Failed`]; no partial records are returned.
    pub fn process<S: PageSource + ?Sized>(&self, document: &S) -> DocumentOutcome {
        let start = Instant::now();
        let source = document.name().to_string();

        // PDF parsers can panic on malformed input
        let pages = match panic::catch_unwind(AssertUnwindSafe(|| document.pages())) {
            Ok(Ok(pages)) => pages,
            Ok(Err(e)) => {
                warn!("Failed to read {}: {}", source, e);
                return DocumentOutcome::Failed {
                    source,
                    reason: e.to_string(),
                };
            }
            Err(payload) => {
                let reason = format!("reader panicked: {}", panic_message(payload.as_ref()));
                warn!("Failed to read {}: {}", source, reason);
                return DocumentOutcome::Failed { source, reason };
            }
        };

        let (slips, records) = self.extract_pages(&pages);
        let report = DocumentReport {
            source,
            pages: pages.len(),
            slips,
            records,
            processing_time_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            "{}: {} pages, {} slips, {} records",
            report.source,
            report.pages,
            report.slips,
            report.records.len()
        );

        if report.records.is_empty() {
            DocumentOutcome::Empty(report)
        } else {
            DocumentOutcome::Parsed(report)
        }
    }

    /// Process documents one after another, isolating failures.
    pub fn process_batch<'a, S, I>(&self, documents: I) -> BatchReport
    where
        S: PageSource + ?Sized + 'a,
        I: IntoIterator<Item = &'a S>,
    {
        documents.into_iter().map(|doc| self.process(doc)).collect()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown cause")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::TextDocument;
    use crate::error::PdfError;
    use pretty_assertions::assert_eq;

    struct UnreadableDocument;

    impl PageSource for UnreadableDocument {
        fn name(&self) -> &str {
            "corrupt.pdf"
        }

        fn pages(&self) -> std::result::Result<Vec<String>, PdfError> {
            Err(PdfError::Parse("invalid file trailer".to_string()))
        }
    }

    struct PanickingDocument;

    impl PageSource for PanickingDocument {
        fn name(&self) -> &str {
            "malformed.pdf"
        }

        fn pages(&self) -> std::result::Result<Vec<String>, PdfError> {
            panic!("unexpected end of content stream")
        }
    }

    fn page(slips: &[(&str, &str)]) -> String {
        let mut text = String::from("OFFICE OF THE TREASURY\n");
        for (i, (emp, gross)) in slips.iter().enumerate() {
            text.push_str(&format!(
                "SNO: {}\nMonth Of March 2023\nEMP No {}\nGross Salary: Rs. {}\n",
                i + 1,
                emp,
                gross
            ));
        }
        text
    }

    #[test]
    fn test_collects_records_from_all_pages() {
        let doc = TextDocument::new(
            "march.txt",
            vec![page(&[("1001", "50000"), ("1002", "60000")]), page(&[("1003", "40000")])],
        );

        let outcome = DocumentProcessor::new().process(&doc);
        let DocumentOutcome::Parsed(report) = outcome else {
            panic!("expected parsed outcome");
        };

        assert_eq!(report.pages, 2);
        assert_eq!(report.slips, 3);
        let ids: Vec<&str> = report.records.iter().map(|r| r.employee_id.as_str()).collect();
        assert_eq!(ids, vec!["1001", "1002", "1003"]);
    }

    #[test]
    fn test_drops_slips_without_employee_number() {
        let text = "SNO: 1\nEMP No 1001\nBasic : 100\nSNO: 2\nBasic : 200\n";
        let doc = TextDocument::new("mixed.txt", vec![text.to_string()]);

        let outcome = DocumentProcessor::new().process(&doc);
        let report = outcome.report().unwrap();
        assert_eq!(report.slips, 2);
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.dropped(), 1);
    }

    #[test]
    fn test_readable_document_without_slips_is_empty() {
        let doc = TextDocument::new("cover.txt", vec!["No slips here".to_string()]);
        let outcome = DocumentProcessor::new().process(&doc);

        assert!(matches!(outcome, DocumentOutcome::Empty(_)));
        assert!(!outcome.is_failed());
        assert!(outcome.records().is_empty());
    }

    #[test]
    fn test_unreadable_document_fails() {
        let outcome = DocumentProcessor::new().process(&UnreadableDocument);
        match outcome {
            DocumentOutcome::Failed { source, reason } => {
                assert_eq!(source, "corrupt.pdf");
                assert!(reason.contains("invalid file trailer"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_batch_isolates_failures() {
        let good = TextDocument::new("good.txt", vec![page(&[("1001", "50000")])]);
        let empty = TextDocument::new("empty.txt", vec![String::new()]);
        let docs: Vec<&dyn PageSource> = vec![&good, &UnreadableDocument, &empty];

        let batch = DocumentProcessor::new().process_batch(docs);

        assert_eq!(batch.succeeded().collect::<Vec<_>>(), vec!["good.txt"]);
        assert_eq!(batch.empty().collect::<Vec<_>>(), vec!["empty.txt"]);
        assert_eq!(batch.failed().map(|(s, _)| s).collect::<Vec<_>>(), vec!["corrupt.pdf"]);
        assert_eq!(batch.record_count(), 1);
        assert_eq!(batch.into_records()[0].employee_id, "1001");
    }

    #[test]
    fn test_panicking_reader_fails_only_its_document() {
        let good = TextDocument::new("good.txt", vec![page(&[("1001", "50000")])]);
        let docs: Vec<&dyn PageSource> = vec![&PanickingDocument, &good];

        let batch = DocumentProcessor::new().process_batch(docs);

        let failed: Vec<(&str, &str)> = batch.failed().collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].0, "malformed.pdf");
        assert!(failed[0].1.contains("unexpected end of content stream"));
        assert_eq!(batch.succeeded().collect::<Vec<_>>(), vec!["good.txt"]);
        assert_eq!(batch.record_count(), 1);
    }

    #[test]
    fn test_custom_marker_from_config() {
        let config = ExtractionConfig {
            slip_marker: r"SLIP\s+\d+".to_string(),
            require_employee_id: false,
        };
        let processor = DocumentProcessor::from_config(&config).unwrap();
        let (slips, records) = processor.extract_pages(&["SLIP 1\nBasic : 10\nSLIP 2\nEMP No 4"]);

        assert_eq!(slips, 2);
        assert_eq!(records.len(), 2);

        let bad = ExtractionConfig {
            slip_marker: "[".to_string(),
            require_employee_id: true,
        };
        assert!(matches!(
            DocumentProcessor::from_config(&bad),
            Err(PayslipError::Config(_))
        ));
    }
}
