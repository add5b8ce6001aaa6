//! Salary record model: one employee's slip for one month.

use serde::{Deserialize, Serialize};

/// Whether a field holds free text or a digit string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, defaults to the empty string.
    Text,
    /// Decimal digit string, defaults to `"0"`.
    Numeric,
}

/// A column of the salary record table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Month,
    Year,
    EmployeeId,
    Name,
    Designation,
    PayScale,
    DdoCode,
    DaysWorked,
    NextIncrementDate,
    Group,
    BasicPay,
    Da,
    Hra,
    Ir,
    Sfn,
    P,
    SpayTypist,
    ItDeduction,
    PtDeduction,
    GslicDeduction,
    LicDeduction,
    FbfDeduction,
    GrossSalary,
    NetSalary,
    TotalDeductions,
    AccountNumber,
}

impl Field {
    /// All fields in column order.
    pub const ALL: [Field; 26] = [
        Field::Month,
        Field::Year,
        Field::EmployeeId,
        Field::Name,
        Field::Designation,
        Field::PayScale,
        Field::DdoCode,
        Field::DaysWorked,
        Field::NextIncrementDate,
        Field::Group,
        Field::BasicPay,
        Field::Da,
        Field::Hra,
        Field::Ir,
        Field::Sfn,
        Field::P,
        Field::SpayTypist,
        Field::ItDeduction,
        Field::PtDeduction,
        Field::GslicDeduction,
        Field::LicDeduction,
        Field::FbfDeduction,
        Field::GrossSalary,
        Field::NetSalary,
        Field::TotalDeductions,
        Field::AccountNumber,
    ];

    /// Allowance columns added on top of basic pay.
    pub const ALLOWANCES: [Field; 6] = [
        Field::Da,
        Field::Hra,
        Field::Ir,
        Field::Sfn,
        Field::P,
        Field::SpayTypist,
    ];

    /// Deduction columns subtracted from gross pay.
    pub const DEDUCTIONS: [Field; 5] = [
        Field::ItDeduction,
        Field::PtDeduction,
        Field::GslicDeduction,
        Field::LicDeduction,
        Field::FbfDeduction,
    ];

    /// Column name used in tabular output.
    pub fn name(self) -> &'static str {
        match self {
            Field::Month => "Month",
            Field::Year => "Year",
            Field::EmployeeId => "Employee_ID",
            Field::Name => "Name",
            Field::Designation => "Designation",
            Field::PayScale => "Pay_Scale",
            Field::DdoCode => "DDO_Code",
            Field::DaysWorked => "Days_Worked",
            Field::NextIncrementDate => "Next_Increment_Date",
            Field::Group => "Group",
            Field::BasicPay => "Basic_Pay",
            Field::Da => "DA",
            Field::Hra => "HRA",
            Field::Ir => "IR",
            Field::Sfn => "SFN",
            Field::P => "P",
            Field::SpayTypist => "SPAY_TYPIST",
            Field::ItDeduction => "IT_Deduction",
            Field::PtDeduction => "PT_Deduction",
            Field::GslicDeduction => "GSLIC_Deduction",
            Field::LicDeduction => "LIC_Deduction",
            Field::FbfDeduction => "FBF_Deduction",
            Field::GrossSalary => "Gross_Salary",
            Field::NetSalary => "Net_Salary",
            Field::TotalDeductions => "Total_Deductions",
            Field::AccountNumber => "Account_Number",
        }
    }

    /// Look a field up by its column name.
    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.name() == name)
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::BasicPay
            | Field::Da
            | Field::Hra
            | Field::Ir
            | Field::Sfn
            | Field::P
            | Field::SpayTypist
            | Field::ItDeduction
            | Field::PtDeduction
            | Field::GslicDeduction
            | Field::LicDeduction
            | Field::FbfDeduction
            | Field::GrossSalary
            | Field::NetSalary
            | Field::TotalDeductions => FieldKind::Numeric,
            _ => FieldKind::Text,
        }
    }

    /// Value stored when the field's pattern does not match.
    pub fn default_value(self) -> &'static str {
        match self.kind() {
            FieldKind::Text => "",
            FieldKind::Numeric => "0",
        }
    }

    /// Columns rendered with an integer number format in spreadsheets.
    pub fn integer_formatted(self) -> bool {
        matches!(self, Field::EmployeeId | Field::Year | Field::AccountNumber)
            || Field::ALLOWANCES.contains(&self)
            || Field::DEDUCTIONS.contains(&self)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One employee's payroll slip for one month.
///
/// Every field is a string: text fields default to `""`, numeric fields to
/// `"0"`. Numeric content is only parsed when summaries are built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRecord {
    #[serde(rename = "Month")]
    pub month: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Employee_ID")]
    pub employee_id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Designation")]
    pub designation: String,
    #[serde(rename = "Pay_Scale")]
    pub pay_scale: String,
    #[serde(rename = "DDO_Code")]
    pub ddo_code: String,
    #[serde(rename = "Days_Worked")]
    pub days_worked: String,
    #[serde(rename = "Next_Increment_Date")]
    pub next_increment_date: String,
    #[serde(rename = "Group")]
    pub group: String,

    #[serde(rename = "Basic_Pay")]
    pub basic_pay: String,

    // Allowances
    #[serde(rename = "DA")]
    pub da: String,
    #[serde(rename = "HRA")]
    pub hra: String,
    #[serde(rename = "IR")]
    pub ir: String,
    #[serde(rename = "SFN")]
    pub sfn: String,
    #[serde(rename = "P")]
    pub p: String,
    #[serde(rename = "SPAY_TYPIST")]
    pub spay_typist: String,

    // Deductions
    #[serde(rename = "IT_Deduction")]
    pub it_deduction: String,
    #[serde(rename = "PT_Deduction")]
    pub pt_deduction: String,
    #[serde(rename = "GSLIC_Deduction")]
    pub gslic_deduction: String,
    #[serde(rename = "LIC_Deduction")]
    pub lic_deduction: String,
    #[serde(rename = "FBF_Deduction")]
    pub fbf_deduction: String,

    // Summary
    #[serde(rename = "Gross_Salary")]
    pub gross_salary: String,
    #[serde(rename = "Net_Salary")]
    pub net_salary: String,
    #[serde(rename = "Total_Deductions")]
    pub total_deductions: String,

    #[serde(rename = "Account_Number")]
    pub account_number: String,
}

impl SalaryRecord {
    /// Borrow the value of a field.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Month => &self.month,
            Field::Year => &self.year,
            Field::EmployeeId => &self.employee_id,
            Field::Name => &self.name,
            Field::Designation => &self.designation,
            Field::PayScale => &self.pay_scale,
            Field::DdoCode => &self.ddo_code,
            Field::DaysWorked => &self.days_worked,
            Field::NextIncrementDate => &self.next_increment_date,
            Field::Group => &self.group,
            Field::BasicPay => &self.basic_pay,
            Field::Da => &self.da,
            Field::Hra => &self.hra,
            Field::Ir => &self.ir,
            Field::Sfn => &self.sfn,
            Field::P => &self.p,
            Field::SpayTypist => &self.spay_typist,
            Field::ItDeduction => &self.it_deduction,
            Field::PtDeduction => &self.pt_deduction,
            Field::GslicDeduction => &self.gslic_deduction,
            Field::LicDeduction => &self.lic_deduction,
            Field::FbfDeduction => &self.fbf_deduction,
            Field::GrossSalary => &self.gross_salary,
            Field::NetSalary => &self.net_salary,
            Field::TotalDeductions => &self.total_deductions,
            Field::AccountNumber => &self.account_number,
        }
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Month => &mut self.month,
            Field::Year => &mut self.year,
            Field::EmployeeId => &mut self.employee_id,
            Field::Name => &mut self.name,
            Field::Designation => &mut self.designation,
            Field::PayScale => &mut self.pay_scale,
            Field::DdoCode => &mut self.ddo_code,
            Field::DaysWorked => &mut self.days_worked,
            Field::NextIncrementDate => &mut self.next_increment_date,
            Field::Group => &mut self.group,
            Field::BasicPay => &mut self.basic_pay,
            Field::Da => &mut self.da,
            Field::Hra => &mut self.hra,
            Field::Ir => &mut self.ir,
            Field::Sfn => &mut self.sfn,
            Field::P => &mut self.p,
            Field::SpayTypist => &mut self.spay_typist,
            Field::ItDeduction => &mut self.it_deduction,
            Field::PtDeduction => &mut self.pt_deduction,
            Field::GslicDeduction => &mut self.gslic_deduction,
            Field::LicDeduction => &mut self.lic_deduction,
            Field::FbfDeduction => &mut self.fbf_deduction,
            Field::GrossSalary => &mut self.gross_salary,
            Field::NetSalary => &mut self.net_salary,
            Field::TotalDeductions => &mut self.total_deductions,
            Field::AccountNumber => &mut self.account_number,
        }
    }

    /// Return a copy with one field replaced.
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        *self.slot(field) = value.into();
        self
    }

    /// Whether the record carries an employee number and may be kept.
    pub fn is_valid(&self) -> bool {
        !self.employee_id.is_empty()
    }

    /// Values in column order.
    pub fn values(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::ALL.into_iter().map(move |f| (f, self.get(f)))
    }
}

impl Default for SalaryRecord {
    /// A record with every field at its default value.
    fn default() -> Self {
        Self {
            month: String::new(),
            year: String::new(),
            employee_id: String::new(),
            name: String::new(),
            designation: String::new(),
            pay_scale: String::new(),
            ddo_code: String::new(),
            days_worked: String::new(),
            next_increment_date: String::new(),
            group: String::new(),
            basic_pay: "0".to_string(),
            da: "0".to_string(),
            hra: "0".to_string(),
            ir: "0".to_string(),
            sfn: "0".to_string(),
            p: "0".to_string(),
            spay_typist: "0".to_string(),
            it_deduction: "0".to_string(),
            pt_deduction: "0".to_string(),
            gslic_deduction: "0".to_string(),
            lic_deduction: "0".to_string(),
            fbf_deduction: "0".to_string(),
            gross_salary: "0".to_string(),
            net_salary: "0".to_string(),
            total_deductions: "0".to_string(),
            account_number: String::new(),
        }
    }
}
