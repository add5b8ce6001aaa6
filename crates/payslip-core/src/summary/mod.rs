//! Monthly aggregation of salary records.

mod months;

pub use months::{month_index, title_case};

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::error::AggregationError;
use crate::models::config::UnknownMonthPolicy;
use crate::models::record::{Field, SalaryRecord};
use crate::models::summary::MonthlySummary;

/// Result type for aggregation.
pub type Result<T> = std::result::Result<T, AggregationError>;

/// Chronological position of a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Dated { year: i64, month: u32 },
    Unordered,
}

/// Groups records by (Year, Month) and totals their numeric fields.
#[derive(Debug, Clone, Default)]
pub struct MonthlyAggregator {
    policy: UnknownMonthPolicy,
}

impl MonthlyAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how unknown month names and non-integer years are handled.
    pub fn with_policy(mut self, policy: UnknownMonthPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Build one summary per literal (Year, Month) pair, oldest first.
    ///
    /// Fails if any numeric field of any record is not a number; the input
    /// records are left untouched either way.
    pub fn aggregate(&self, records: &[SalaryRecord]) -> Result<Vec<MonthlySummary>> {
        let mut groups: BTreeMap<(&str, &str), Vec<&SalaryRecord>> = BTreeMap::new();
        for record in records {
            groups
                .entry((record.year.as_str(), record.month.as_str()))
                .or_default()
                .push(record);
        }

        let mut keyed = Vec::with_capacity(groups.len());
        for ((year, month), group) in groups {
            let key = self.sort_key(year, month)?;
            keyed.push((key, summarize(year, month, &group)?));
        }

        keyed.sort_by_key(|(key, _)| *key);
        debug!(
            "Aggregated {} records into {} monthly summaries",
            records.len(),
            keyed.len()
        );

        Ok(keyed.into_iter().map(|(_, summary)| summary).collect())
    }

    fn sort_key(&self, year: &str, month: &str) -> Result<SortKey> {
        let parsed_year = year.trim().parse::<i64>();
        let index = month_index(month);

        match (parsed_year, index) {
            (Ok(year), Some(month)) => Ok(SortKey::Dated { year, month }),
            (Err(_), _) if self.policy == UnknownMonthPolicy::Reject => {
                Err(AggregationError::InvalidYear {
                    year: year.to_string(),
                    month: month.to_string(),
                })
            }
            (_, None) if self.policy == UnknownMonthPolicy::Reject => {
                Err(AggregationError::UnknownMonth {
                    year: year.to_string(),
                    month: month.to_string(),
                })
            }
            _ => {
                warn!("Cannot order {:?} {:?}, placing it last", month, year);
                Ok(SortKey::Unordered)
            }
        }
    }
}

/// Aggregate records with the default policy.
pub fn monthly_summary(records: &[SalaryRecord]) -> Result<Vec<MonthlySummary>> {
    MonthlyAggregator::new().aggregate(records)
}

fn amount(record: &SalaryRecord, field: Field) -> Result<f64> {
    let value = record.get(field);
    // "NaN" and "inf" parse as f64 but are not amounts
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| AggregationError::DataFormat {
            field: field.name(),
            value: value.to_string(),
            employee_id: record.employee_id.clone(),
            year: record.year.clone(),
            month: record.month.clone(),
        })
}

fn total(group: &[&SalaryRecord], field: Field) -> Result<f64> {
    group.iter().try_fold(0.0, |sum, record| Ok(sum + amount(record, field)?))
}

fn summarize(year: &str, month: &str, group: &[&SalaryRecord]) -> Result<MonthlySummary> {
    let count = group.len();
    let total_gross = total(group, Field::GrossSalary)?;
    let total_net = total(group, Field::NetSalary)?;

    Ok(MonthlySummary {
        year: year.to_string(),
        month: month.to_string(),
        employee_count: count,
        total_basic: total(group, Field::BasicPay)?,
        total_da: total(group, Field::Da)?,
        total_hra: total(group, Field::Hra)?,
        total_ir: total(group, Field::Ir)?,
        total_sfn: total(group, Field::Sfn)?,
        total_p: total(group, Field::P)?,
        total_spay_typist: total(group, Field::SpayTypist)?,
        total_it: total(group, Field::ItDeduction)?,
        total_pt: total(group, Field::PtDeduction)?,
        total_gslic: total(group, Field::GslicDeduction)?,
        total_lic: total(group, Field::LicDeduction)?,
        total_fbf: total(group, Field::FbfDeduction)?,
        total_gross,
        total_deductions: total(group, Field::TotalDeductions)?,
        total_net,
        avg_gross_salary: total_gross / count as f64,
        avg_net_salary: total_net / count as f64,
    })
}
