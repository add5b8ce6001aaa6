//! Configuration structures for the slip conversion pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the payslip pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PayslipConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Slip extraction configuration.
    pub extraction: ExtractionConfig,

    /// Monthly summary configuration.
    pub summary: SummaryConfig,

    /// Export configuration.
    pub export: ExportConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Try to open encrypted PDFs with an empty user password.
    pub decrypt_with_empty_password: bool,

    /// Maximum pages to process per document (0 = unlimited).
    pub max_pages: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            decrypt_with_empty_password: true,
            max_pages: 0,
        }
    }
}

/// Slip extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Regex marking the start of each slip within a page.
    pub slip_marker: String,

    /// Drop records that carry no employee number.
    pub require_employee_id: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            slip_marker: crate::slip::DEFAULT_SLIP_MARKER.to_string(),
            require_employee_id: true,
        }
    }
}

/// How to place summaries whose month or year cannot be ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownMonthPolicy {
    /// Sort after every orderable month.
    #[default]
    SortLast,
    /// Fail the aggregation.
    Reject,
}

/// Monthly summary configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    pub unknown_month_policy: UnknownMonthPolicy,
}

/// Export configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Append a `_YYYYmmdd_HHMMSS` timestamp to output file names.
    pub timestamped_names: bool,

    /// Stem of generated output files.
    pub file_stem: String,

    /// Worksheet holding the salary records.
    pub records_sheet: String,

    /// Worksheet holding the monthly summary.
    pub summary_sheet: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            timestamped_names: true,
            file_stem: "salary_data".to_string(),
            records_sheet: "Salary Data".to_string(),
            summary_sheet: "Monthly Summary".to_string(),
        }
    }
}

impl PayslipConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
