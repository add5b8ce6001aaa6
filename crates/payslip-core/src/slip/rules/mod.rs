//! Declarative field extraction rules for payroll slips.
//!
//! Each [`FieldRule`] ties one record column to one pattern. Rules are
//! evaluated independently, so a missing label only leaves its own field at
//! the default value.

pub mod patterns;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::models::record::Field;
use patterns::*;

/// How the captured groups of a match become the field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    /// A capture group as matched.
    Group(usize),
    /// A capture group with surrounding whitespace removed.
    Trimmed(usize),
    /// Two capture groups joined as `low-high`.
    Range(usize, usize),
}

impl Capture {
    fn render(self, caps: &Captures<'_>) -> Option<String> {
        match self {
            Capture::Group(i) => caps.get(i).map(|m| m.as_str().to_string()),
            Capture::Trimmed(i) => caps.get(i).map(|m| m.as_str().trim().to_string()),
            Capture::Range(lo, hi) => {
                let lo = caps.get(lo)?;
                let hi = caps.get(hi)?;
                Some(format!("{}-{}", lo.as_str(), hi.as_str()))
            }
        }
    }
}

/// One field's extraction rule.
#[derive(Debug, Clone)]
pub struct FieldRule {
    /// Target column.
    pub field: Field,
    /// Label-anchored pattern.
    pub pattern: &'static Regex,
    /// How to turn captures into the value.
    pub capture: Capture,
    /// A match immediately preceded by this text is ignored.
    pub excluded_prefix: Option<&'static str>,
}

impl FieldRule {
    pub fn new(field: Field, pattern: &'static Regex, capture: Capture) -> Self {
        Self {
            field,
            pattern,
            capture,
            excluded_prefix: None,
        }
    }

    /// Ignore matches that directly follow `prefix`.
    pub fn not_preceded_by(mut self, prefix: &'static str) -> Self {
        self.excluded_prefix = Some(prefix);
        self
    }

    /// Find the first acceptable match in `text` and render its value.
    pub fn apply(&self, text: &str) -> Option<String> {
        self.pattern
            .captures_iter(text)
            .find(|caps| self.accepts(text, caps))
            .and_then(|caps| self.capture.render(&caps))
    }

    fn accepts(&self, text: &str, caps: &Captures<'_>) -> bool {
        match (self.excluded_prefix, caps.get(0)) {
            (Some(prefix), Some(m)) => !text[..m.start()].ends_with(prefix),
            _ => true,
        }
    }
}

lazy_static! {
    /// The standard rule table, one rule per record column.
    pub static ref SLIP_RULES: Vec<FieldRule> = vec![
        FieldRule::new(Field::Month, &PAY_PERIOD, Capture::Group(1)),
        FieldRule::new(Field::Year, &PAY_PERIOD, Capture::Group(2)),
        FieldRule::new(Field::EmployeeId, &EMPLOYEE_NO, Capture::Group(1)),
        FieldRule::new(Field::Name, &EMPLOYEE_NAME, Capture::Trimmed(1)),
        FieldRule::new(Field::Designation, &DESIGNATION, Capture::Trimmed(1)),
        FieldRule::new(Field::PayScale, &PAY_SCALE, Capture::Range(1, 2)),
        FieldRule::new(Field::DdoCode, &DDO_CODE, Capture::Group(1)),
        FieldRule::new(Field::DaysWorked, &DAYS_WORKED, Capture::Group(1)),
        FieldRule::new(Field::NextIncrementDate, &NEXT_INCREMENT, Capture::Group(1)),
        FieldRule::new(Field::Group, &GROUP, Capture::Group(1)),
        FieldRule::new(Field::BasicPay, &BASIC_PAY, Capture::Group(1)),
        FieldRule::new(Field::Da, &DA, Capture::Group(1)),
        FieldRule::new(Field::Hra, &HRA, Capture::Group(1)),
        FieldRule::new(Field::Ir, &IR, Capture::Group(1)),
        FieldRule::new(Field::Sfn, &SFN, Capture::Group(1)),
        FieldRule::new(Field::P, &P, Capture::Group(1)),
        FieldRule::new(Field::SpayTypist, &SPAY_TYPIST, Capture::Group(1)),
        FieldRule::new(Field::ItDeduction, &IT, Capture::Group(1)),
        FieldRule::new(Field::PtDeduction, &PT, Capture::Group(1)),
        FieldRule::new(Field::GslicDeduction, &GSLIC, Capture::Group(1)),
        FieldRule::new(Field::LicDeduction, &LIC, Capture::Group(1)).not_preceded_by("GS"),
        FieldRule::new(Field::FbfDeduction, &FBF, Capture::Group(1)),
        FieldRule::new(Field::GrossSalary, &GROSS_SALARY, Capture::Group(1)),
        FieldRule::new(Field::NetSalary, &NET_SALARY, Capture::Group(1)),
        FieldRule::new(Field::TotalDeductions, &TOTAL_DEDUCTIONS, Capture::Group(1)),
        FieldRule::new(Field::AccountNumber, &ACCOUNT_NUMBER, Capture::Group(1)),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_field_has_one_rule() {
        for field in Field::ALL {
            let count = SLIP_RULES.iter().filter(|r| r.field == field).count();
            assert_eq!(count, 1, "{}", field);
        }
    }

    #[test]
    fn test_excluded_prefix_skips_to_next_match() {
        let rule = FieldRule::new(Field::LicDeduction, &LIC, Capture::Group(1))
            .not_preceded_by("GS");

        assert_eq!(rule.apply("GSLIC 500\nLIC 300"), Some("300".to_string()));
        assert_eq!(rule.apply("LIC 300\nGSLIC 500"), Some("300".to_string()));
        assert_eq!(rule.apply("GSLIC 500"), None);
        assert_eq!(rule.apply("LIC 120"), Some("120".to_string()));
    }

    #[test]
    fn test_range_capture() {
        let rule = FieldRule::new(Field::PayScale, &PAY_SCALE, Capture::Range(1, 2));
        assert_eq!(
            rule.apply("Pay Scale : 27650-52650"),
            Some("27650-52650".to_string())
        );
        assert_eq!(rule.apply("Pay Scale : 27650"), None);
    }

    #[test]
    fn test_trimmed_capture_stays_on_one_line() {
        let rule = FieldRule::new(Field::Name, &EMPLOYEE_NAME, Capture::Trimmed(1));
        assert_eq!(
            rule.apply("Sri / Smt:  RAMESH KUMAR  \nDesignation: TEACHER"),
            Some("RAMESH KUMAR".to_string())
        );
    }
}
