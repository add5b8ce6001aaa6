//! Splits page text into individual slip sections.

use regex::Regex;
use tracing::trace;

use super::rules::patterns::SLIP_MARKER;

/// Splits a page on the recurring marker that opens every slip.
#[derive(Debug, Clone)]
pub struct SlipSegmenter {
    marker: Regex,
}

impl SlipSegmenter {
    /// Create a segmenter using the standard `SNO: <n>` marker.
    pub fn new() -> Self {
        Self {
            marker: SLIP_MARKER.clone(),
        }
    }

    /// Create a segmenter with a custom marker pattern.
    pub fn with_marker(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            marker: Regex::new(pattern)?,
        })
    }

    /// Split `page` into slip sections.
    ///
    /// Text before the first marker is a preamble and never a slip, so N
    /// markers give N sections. A page without markers gives none.
    pub fn segment<'a>(&self, page: &'a str) -> Vec<&'a str> {
        let slips: Vec<&'a str> = self.marker.split(page).skip(1).collect();
        trace!("Segmented page into {} slips", slips.len());
        slips
    }
}

impl Default for SlipSegmenter {
    fn default() -> Self {
        Self::new()
    }
}
