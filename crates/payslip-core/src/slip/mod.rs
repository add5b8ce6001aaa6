//! Slip segmentation and field extraction.

mod extractor;
pub mod rules;
mod segmenter;

pub use extractor::{RuleSlipExtractor, SlipExtraction, extract_slip};
pub use rules::{Capture, FieldRule, SLIP_RULES};
pub use segmenter::SlipSegmenter;

use crate::models::record::SalaryRecord;

/// Marker opening every slip section: `SNO:` followed by the serial number.
pub const DEFAULT_SLIP_MARKER: &str = r"SNO:\s+\d+";

/// Trait for slip field extractors.
pub trait SlipExtractor {
    /// Extract a best-effort record from one slip's text.
    ///
    /// Never fails: unmatched fields keep their default values. Callers
    /// decide whether the record is complete enough to keep.
    fn extract(&self, slip: &str) -> SalaryRecord;
}
