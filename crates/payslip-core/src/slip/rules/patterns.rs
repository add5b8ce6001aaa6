//! Label-anchored regex patterns for payroll slip fields.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Slip boundary
    pub static ref SLIP_MARKER: Regex = Regex::new(r"SNO:\s+\d+").unwrap();

    // Pay period: "Month Of March 2023"
    pub static ref PAY_PERIOD: Regex = Regex::new(
        r"Month Of\s+([A-Za-z]+)\s+(\d{4})"
    ).unwrap();

    // Employee details
    pub static ref EMPLOYEE_NO: Regex = Regex::new(r"EMP No\s+(\d+)").unwrap();

    pub static ref EMPLOYEE_NAME: Regex = Regex::new(
        r"Sri / Smt:\s+([A-Z][A-Z \t]*)"
    ).unwrap();

    pub static ref DESIGNATION: Regex = Regex::new(
        r"Designation:\s+([A-Z][A-Z \t]*)"
    ).unwrap();

    pub static ref PAY_SCALE: Regex = Regex::new(r"Pay Scale\s*:\s*(\d+)-(\d+)").unwrap();

    pub static ref DDO_CODE: Regex = Regex::new(r"DDO Code\s*:\s*(\w+)").unwrap();

    pub static ref DAYS_WORKED: Regex = Regex::new(r"Days Worked:\s*(\d+)").unwrap();

    pub static ref NEXT_INCREMENT: Regex = Regex::new(
        r"Next Increment Date:\s*([A-Za-z]+\s+\d{4})"
    ).unwrap();

    pub static ref GROUP: Regex = Regex::new(r"Group\s*:\s*([A-Z])").unwrap();

    pub static ref BASIC_PAY: Regex = Regex::new(r"Basic\s*:\s*(\d+)").unwrap();

    // Allowances
    pub static ref DA: Regex = Regex::new(r"DA\s+(\d+)").unwrap();
    pub static ref HRA: Regex = Regex::new(r"HRA\s+(\d+)").unwrap();
    pub static ref IR: Regex = Regex::new(r"IR\s+(\d+)").unwrap();
    pub static ref SFN: Regex = Regex::new(r"SFN\s+(\d+)").unwrap();
    pub static ref P: Regex = Regex::new(r"P\s+(\d+)").unwrap();
    pub static ref SPAY_TYPIST: Regex = Regex::new(r"SPAY-TYPIST\s+(\d+)").unwrap();

    // Deductions
    pub static ref IT: Regex = Regex::new(r"IT\s+(\d+)").unwrap();
    pub static ref PT: Regex = Regex::new(r"PT\s+(\d+)").unwrap();
    pub static ref GSLIC: Regex = Regex::new(r"GSLIC\s+(\d+)").unwrap();
    // Matches inside "GSLIC" too; the rule skips hits preceded by "GS".
    pub static ref LIC: Regex = Regex::new(r"LIC\s+(\d+)").unwrap();
    pub static ref FBF: Regex = Regex::new(r"FBF\s+(\d+)").unwrap();

    // Totals
    pub static ref GROSS_SALARY: Regex = Regex::new(
        r"Gross Salary:\s*Rs\.\s*(\d+)"
    ).unwrap();

    pub static ref NET_SALARY: Regex = Regex::new(
        r"Net Salary\s*:\s*Rs\.\s*(\d+)"
    ).unwrap();

    pub static ref TOTAL_DEDUCTIONS: Regex = Regex::new(
        r"sum of deductions &Recoveries\s*:\s*Rs\.\s*(\d+)"
    ).unwrap();

    // Bank details
    pub static ref ACCOUNT_NUMBER: Regex = Regex::new(r"Bank A/C Number:\s*(\d+)").unwrap();
}
