//! Data models for salary records, summaries and configuration.

pub mod config;
pub mod record;
pub mod summary;

pub use config::{PayslipConfig, UnknownMonthPolicy};
pub use record::{Field, FieldKind, SalaryRecord};
pub use summary::{MonthlySummary, SummaryValue, SummaryView};
