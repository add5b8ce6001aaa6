//! Rule-based field extraction for a single slip.

use tracing::trace;

use super::rules::{FieldRule, SLIP_RULES};
use super::SlipExtractor;
use crate::models::record::{Field, SalaryRecord};

/// Outcome of extracting one slip, with the fields that were not found.
#[derive(Debug, Clone)]
pub struct SlipExtraction {
    /// Extracted record, absent fields at their defaults.
    pub record: SalaryRecord,
    /// Fields whose pattern did not match.
    pub missing: Vec<Field>,
}

/// Extractor that evaluates a table of [`FieldRule`]s against slip text.
pub struct RuleSlipExtractor {
    rules: &'static [FieldRule],
}

impl RuleSlipExtractor {
    /// Create an extractor over the standard rule table.
    pub fn new() -> Self {
        Self {
            rules: SLIP_RULES.as_slice(),
        }
    }

    /// Extract a record and report which fields fell back to defaults.
    pub fn extract_detailed(&self, slip: &str) -> SlipExtraction {
        let mut record = SalaryRecord::default();
        let mut missing = Vec::new();

        for rule in self.rules {
            match rule.apply(slip) {
                Some(value) => record = record.with(rule.field, value),
                None => missing.push(rule.field),
            }
        }

        trace!(
            "Extracted slip for employee {:?}, {} fields missing",
            record.employee_id,
            missing.len()
        );

        SlipExtraction { record, missing }
    }
}

impl Default for RuleSlipExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl SlipExtractor for RuleSlipExtractor {
    fn extract(&self, slip: &str) -> SalaryRecord {
        self.extract_detailed(slip).record
    }
}

/// Extract a record from slip text using the standard rules.
pub fn extract_slip(slip: &str) -> SalaryRecord {
    RuleSlipExtractor::new().extract(slip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SLIP: &str = r#"
        Pay Slip for the Month Of March 2023
        EMP No 104523
        Sri / Smt: RAMESH KUMAR
        Designation: HIGH SCHOOL TEACHER
        Pay Scale : 27650-52650
        DDO Code : DDO0451
        Days Worked: 31
        Next Increment Date: July 2023
        Group : C
        Basic : 33450
        DA 10703
        HRA 2676
        IR 0
        SFN 150
        SPAY-TYPIST 200
        IT 1200
        PT 200
        GSLIC 500
        LIC 300
        FBF 20
        Gross Salary: Rs. 47179
        sum of deductions &Recoveries : Rs. 2220
        Net Salary : Rs. 44959
        Bank A/C Number: 00123456789
    "#;

    #[test]
    fn test_extract_full_slip() {
        let record = extract_slip(SLIP);

        assert_eq!(record.month, "March");
        assert_eq!(record.year, "2023");
        assert_eq!(record.employee_id, "104523");
        assert_eq!(record.name, "RAMESH KUMAR");
        assert_eq!(record.designation, "HIGH SCHOOL TEACHER");
        assert_eq!(record.pay_scale, "27650-52650");
        assert_eq!(record.ddo_code, "DDO0451");
        assert_eq!(record.days_worked, "31");
        assert_eq!(record.next_increment_date, "July 2023");
        assert_eq!(record.group, "C");
        assert_eq!(record.basic_pay, "33450");
        assert_eq!(record.da, "10703");
        assert_eq!(record.hra, "2676");
        assert_eq!(record.ir, "0");
        assert_eq!(record.sfn, "150");
        assert_eq!(record.spay_typist, "200");
        assert_eq!(record.it_deduction, "1200");
        assert_eq!(record.pt_deduction, "200");
        assert_eq!(record.gslic_deduction, "500");
        assert_eq!(record.lic_deduction, "300");
        assert_eq!(record.fbf_deduction, "20");
        assert_eq!(record.gross_salary, "47179");
        assert_eq!(record.total_deductions, "2220");
        assert_eq!(record.net_salary, "44959");
        assert_eq!(record.account_number, "00123456789");
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let detailed = RuleSlipExtractor::new().extract_detailed("EMP No 77\nBasic : 15000\n");
        let record = detailed.record;

        assert_eq!(record.employee_id, "77");
        assert_eq!(record.basic_pay, "15000");
        assert_eq!(record.da, "0");
        assert_eq!(record.net_salary, "0");
        assert_eq!(record.month, "");
        assert_eq!(record.year, "");
        assert_eq!(record.name, "");
        assert!(detailed.missing.contains(&Field::Da));
        assert!(detailed.missing.contains(&Field::Month));
        assert!(!detailed.missing.contains(&Field::BasicPay));
    }

    #[test]
    fn test_lic_ignores_gslic_label() {
        let record = extract_slip("EMP No 1\nGSLIC 500\nLIC 300\n");
        assert_eq!(record.gslic_deduction, "500");
        assert_eq!(record.lic_deduction, "300");

        let record = extract_slip("EMP No 1\nGSLIC 500\n");
        assert_eq!(record.gslic_deduction, "500");
        assert_eq!(record.lic_deduction, "0");
    }

    #[test]
    fn test_slip_without_employee_number() {
        let record = extract_slip("Month Of April 2024\nBasic : 21000\n");
        assert_eq!(record.employee_id, "");
        assert!(!record.is_valid());
        assert_eq!(record.month, "April");
    }

    #[test]
    fn test_month_and_year_match_together() {
        let record = extract_slip("EMP No 3\nMonth Of March\n");
        assert_eq!(record.month, "");
        assert_eq!(record.year, "");
    }
}
