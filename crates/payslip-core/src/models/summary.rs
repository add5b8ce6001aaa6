//! Monthly summary model.

use serde::{Deserialize, Serialize};

/// Aggregate of all records sharing a (Year, Month) key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Month")]
    pub month: String,
    #[serde(rename = "Employee_Count")]
    pub employee_count: usize,

    // Allowances
    #[serde(rename = "Total_Basic")]
    pub total_basic: f64,
    #[serde(rename = "Total_DA")]
    pub total_da: f64,
    #[serde(rename = "Total_HRA")]
    pub total_hra: f64,
    #[serde(rename = "Total_IR")]
    pub total_ir: f64,
    #[serde(rename = "Total_SFN")]
    pub total_sfn: f64,
    #[serde(rename = "Total_P")]
    pub total_p: f64,
    #[serde(rename = "Total_SPAY_TYPIST")]
    pub total_spay_typist: f64,

    // Deductions
    #[serde(rename = "Total_IT")]
    pub total_it: f64,
    #[serde(rename = "Total_PT")]
    pub total_pt: f64,
    #[serde(rename = "Total_GSLIC")]
    pub total_gslic: f64,
    #[serde(rename = "Total_LIC")]
    pub total_lic: f64,
    #[serde(rename = "Total_FBF")]
    pub total_fbf: f64,

    // Overall
    #[serde(rename = "Total_Gross")]
    pub total_gross: f64,
    #[serde(rename = "Total_Deductions")]
    pub total_deductions: f64,
    #[serde(rename = "Total_Net")]
    pub total_net: f64,
    #[serde(rename = "Avg_Gross_Salary")]
    pub avg_gross_salary: f64,
    #[serde(rename = "Avg_Net_Salary")]
    pub avg_net_salary: f64,
}

/// A value in a summary table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryValue<'a> {
    Text(&'a str),
    Count(usize),
    Amount(f64),
}

impl std::fmt::Display for SummaryValue<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SummaryValue::Text(s) => f.write_str(s),
            SummaryValue::Count(n) => write!(f, "{}", n),
            SummaryValue::Amount(v) => write!(f, "{:.2}", v),
        }
    }
}

impl MonthlySummary {
    /// All column names in serialization order.
    pub const COLUMNS: [&'static str; 20] = [
        "Year",
        "Month",
        "Employee_Count",
        "Total_Basic",
        "Total_DA",
        "Total_HRA",
        "Total_IR",
        "Total_SFN",
        "Total_P",
        "Total_SPAY_TYPIST",
        "Total_IT",
        "Total_PT",
        "Total_GSLIC",
        "Total_LIC",
        "Total_FBF",
        "Total_Gross",
        "Total_Deductions",
        "Total_Net",
        "Avg_Gross_Salary",
        "Avg_Net_Salary",
    ];

    /// Look up a column value by name.
    pub fn value(&self, column: &str) -> Option<SummaryValue<'_>> {
        let amount = match column {
            "Year" => return Some(SummaryValue::Text(&self.year)),
            "Month" => return Some(SummaryValue::Text(&self.month)),
            "Employee_Count" => return Some(SummaryValue::Count(self.employee_count)),
            "Total_Basic" => self.total_basic,
            "Total_DA" => self.total_da,
            "Total_HRA" => self.total_hra,
            "Total_IR" => self.total_ir,
            "Total_SFN" => self.total_sfn,
            "Total_P" => self.total_p,
            "Total_SPAY_TYPIST" => self.total_spay_typist,
            "Total_IT" => self.total_it,
            "Total_PT" => self.total_pt,
            "Total_GSLIC" => self.total_gslic,
            "Total_LIC" => self.total_lic,
            "Total_FBF" => self.total_fbf,
            "Total_Gross" => self.total_gross,
            "Total_Deductions" => self.total_deductions,
            "Total_Net" => self.total_net,
            "Avg_Gross_Salary" => self.avg_gross_salary,
            "Avg_Net_Salary" => self.avg_net_salary,
            _ => return None,
        };
        Some(SummaryValue::Amount(amount))
    }
}

/// Column subsets used when presenting summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryView {
    /// Basic pay and allowance totals.
    Allowances,
    /// Deduction totals.
    Deductions,
    /// Gross, deductions, net and averages.
    Overall,
    /// Every column.
    All,
}

impl SummaryView {
    pub fn title(self) -> &'static str {
        match self {
            SummaryView::Allowances => "Allowances Summary",
            SummaryView::Deductions => "Deductions Summary",
            SummaryView::Overall => "Overall Summary",
            SummaryView::All => "Monthly Summary",
        }
    }

    pub fn columns(self) -> &'static [&'static str] {
        match self {
            SummaryView::Allowances => &[
                "Year",
                "Month",
                "Employee_Count",
                "Total_Basic",
                "Total_DA",
                "Total_HRA",
                "Total_IR",
                "Total_SFN",
                "Total_P",
                "Total_SPAY_TYPIST",
            ],
            SummaryView::Deductions => &[
                "Year",
                "Month",
                "Employee_Count",
                "Total_IT",
                "Total_PT",
                "Total_GSLIC",
                "Total_LIC",
                "Total_FBF",
            ],
            SummaryView::Overall => &[
                "Year",
                "Month",
                "Employee_Count",
                "Total_Gross",
                "Total_Deductions",
                "Total_Net",
                "Avg_Gross_Salary",
                "Avg_Net_Salary",
            ],
            SummaryView::All => &MonthlySummary::COLUMNS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_view_column_resolves() {
        let summary = MonthlySummary {
            year: "2023".to_string(),
            month: "March".to_string(),
            employee_count: 2,
            total_basic: 0.0,
            total_da: 0.0,
            total_hra: 0.0,
            total_ir: 0.0,
            total_sfn: 0.0,
            total_p: 0.0,
            total_spay_typist: 0.0,
            total_it: 0.0,
            total_pt: 0.0,
            total_gslic: 0.0,
            total_lic: 0.0,
            total_fbf: 0.0,
            total_gross: 110000.0,
            total_deductions: 0.0,
            total_net: 0.0,
            avg_gross_salary: 55000.0,
            avg_net_salary: 0.0,
        };

        for view in [
            SummaryView::Allowances,
            SummaryView::Deductions,
            SummaryView::Overall,
            SummaryView::All,
        ] {
            for column in view.columns() {
                assert!(summary.value(column).is_some(), "{}", column);
            }
        }

        assert_eq!(
            summary.value("Avg_Gross_Salary").map(|v| v.to_string()),
            Some("55000.00".to_string())
        );
        assert_eq!(summary.value("Employee_Count"), Some(SummaryValue::Count(2)));
        assert_eq!(summary.value("Unknown"), None);
    }
}
