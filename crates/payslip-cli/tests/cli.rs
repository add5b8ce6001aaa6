use std::fs;
use std::path::Path;

use assert_cmd::Command;
use payslip_core::Field;
use predicates::prelude::*;
use tempfile::TempDir;

fn slip(sno: u32, month: &str, emp: &str, name: &str, basic: u32, net: u32) -> String {
    format!(
        "SNO: {sno}\n\
         Pay Slip for the Month Of {month} 2023\n\
         EMP No {emp}\n\
         Sri / Smt: {name}\n\
         Designation: CLERK\n\
         Basic : {basic}\n\
         DA 1000\n\
         HRA 500\n\
         IT 100\n\
         GSLIC 50\n\
         LIC 25\n\
         Gross Salary: Rs. {gross}\n\
         sum of deductions &Recoveries : Rs. 175\n\
         Net Salary : Rs. {net}\n\
         Bank A/C Number: 4455667788\n",
        gross = basic + 1500,
    )
}

fn payslip(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("payslip").unwrap();
    cmd.env("HOME", home).env("XDG_CONFIG_HOME", home.join(".config"));
    cmd
}

fn write_inputs(dir: &Path) {
    let first = format!(
        "Header page text\n{}{}",
        slip(1, "January", "1001", "ASHA RAO", 50000, 51325),
        slip(2, "January", "1002", "VINOD K", 60000, 61325),
    );
    fs::write(dir.join("january.txt"), first).unwrap();
    fs::write(
        dir.join("february.txt"),
        slip(1, "February", "1001", "ASHA RAO", 50000, 51325),
    )
    .unwrap();
}

#[test]
fn test_convert_writes_csv_and_reports() {
    let dir = TempDir::new().unwrap();
    write_inputs(dir.path());
    let out = dir.path().join("out");

    payslip(dir.path())
        .arg("convert")
        .arg(dir.path().join("*.txt").to_str().unwrap())
        .arg("--output-dir")
        .arg(&out)
        .arg("--no-timestamp")
        .arg("--summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total records processed: 3"))
        .stdout(predicate::str::contains("Total months covered: 2"));

    let csv = fs::read_to_string(out.join("salary_data.csv")).unwrap();
    let mut lines = csv.lines();
    assert!(lines.next().unwrap().starts_with("Month,Year,Employee_ID,Name,"));
    assert_eq!(lines.count(), 3);
    assert!(csv.contains("ASHA RAO"));

    let summary = fs::read_to_string(out.join("salary_data_summary.csv")).unwrap();
    assert!(summary.contains("2023,January,2,110000"));
}

#[test]
fn test_convert_isolates_unreadable_document() {
    let dir = TempDir::new().unwrap();
    write_inputs(dir.path());
    fs::write(dir.path().join("broken.pdf"), b"not a pdf at all").unwrap();
    let out = dir.path().join("out");

    payslip(dir.path())
        .arg("convert")
        .arg(dir.path().join("*").to_str().unwrap())
        .arg("-o")
        .arg(&out)
        .arg("--no-timestamp")
        .assert()
        .success()
        .stdout(predicate::str::contains("Failed files:"))
        .stdout(predicate::str::contains("broken.pdf"))
        .stdout(predicate::str::contains("Total records processed: 3"));

    assert!(out.join("salary_data.csv").exists());
}

#[test]
fn test_convert_fail_fast_stops() {
    let dir = TempDir::new().unwrap();
    write_inputs(dir.path());
    fs::write(dir.path().join("broken.pdf"), b"garbage").unwrap();

    payslip(dir.path())
        .arg("convert")
        .arg(dir.path().join("*").to_str().unwrap())
        .arg("-o")
        .arg(dir.path().join("out"))
        .arg("--fail-fast")
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.pdf"));
}

#[test]
fn test_convert_without_records_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("notes.txt"), "no slips in here").unwrap();

    payslip(dir.path())
        .arg("convert")
        .arg(dir.path().join("*.txt").to_str().unwrap())
        .arg("-o")
        .arg(dir.path().join("out"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("Files without salary records:"))
        .stderr(predicate::str::contains("No salary records found"));
}

#[test]
fn test_extract_json() {
    let dir = TempDir::new().unwrap();
    write_inputs(dir.path());

    let output = payslip(dir.path())
        .arg("extract")
        .arg(dir.path().join("january.txt"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let records: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["Employee_ID"], "1001");
    assert_eq!(records[1]["Name"], "VINOD K");
    assert_eq!(records[0]["GSLIC_Deduction"], "50");
    assert_eq!(records[0]["LIC_Deduction"], "25");
    assert_eq!(records[0]["P"], "0");
}

#[test]
fn test_extract_missing_file() {
    let dir = TempDir::new().unwrap();

    payslip(dir.path())
        .arg("extract")
        .arg(dir.path().join("missing.pdf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_summarize_exported_records() {
    let dir = TempDir::new().unwrap();
    write_inputs(dir.path());
    let out = dir.path().join("out");

    payslip(dir.path())
        .arg("convert")
        .arg(dir.path().join("*.txt").to_str().unwrap())
        .arg("-o")
        .arg(&out)
        .arg("--no-timestamp")
        .assert()
        .success();

    payslip(dir.path())
        .arg("summarize")
        .arg(out.join("salary_data.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Allowances Summary"))
        .stdout(predicate::str::contains("Deductions Summary"))
        .stdout(predicate::str::contains("Overall Summary"))
        .stdout(predicate::str::contains("110000.00"))
        .stdout(predicate::str::contains("Total months covered: 2"));
}

#[test]
fn test_summarize_rejects_unknown_month_when_configured() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, r#"{"summary": {"unknown_month_policy": "reject"}}"#).unwrap();

    let records = dir.path().join("records.csv");
    let header: Vec<&str> = Field::ALL.iter().map(|f| f.name()).collect();
    let row: Vec<&str> = Field::ALL
        .iter()
        .map(|f| match f {
            Field::Month => "Smarch",
            Field::Year => "2023",
            Field::EmployeeId => "1001",
            _ => f.default_value(),
        })
        .collect();
    let csv = format!("{}\n{}\n", header.join(","), row.join(","));
    fs::write(&records, csv).unwrap();

    payslip(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("summarize")
        .arg(&records)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Smarch"));
}

#[test]
fn test_config_init_get_set() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("payslip.json");

    payslip(dir.path())
        .args(["config", "init", "--config"])
        .arg(&config)
        .assert()
        .success();
    assert!(config.exists());

    payslip(dir.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "set", "export.file_stem", "payroll"])
        .assert()
        .success();

    payslip(dir.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "get", "export.file_stem"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"payroll\""));

    payslip(dir.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "set", "export.no_such_key", "1"])
        .assert()
        .failure();
}

#[test]
fn test_config_validate_rejects_bad_marker() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, r#"{"extraction": {"slip_marker": "SNO:("}}"#).unwrap();

    payslip(dir.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "validate"])
        .assert()
        .failure();
}

#[test]
fn test_convert_summary_failure_only_fatal_when_requested() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, r#"{"summary": {"unknown_month_policy": "reject"}}"#).unwrap();
    fs::write(
        dir.path().join("smarch.txt"),
        slip(1, "Smarch", "1001", "ASHA RAO", 50000, 51325),
    )
    .unwrap();
    let input = dir.path().join("*.txt");
    let out = dir.path().join("out");

    payslip(dir.path())
        .arg("-c")
        .arg(&config)
        .arg("convert")
        .arg(input.to_str().unwrap())
        .arg("-o")
        .arg(&out)
        .arg("--no-timestamp")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total records processed: 1"));
    assert!(out.join("salary_data.csv").exists());

    payslip(dir.path())
        .arg("-c")
        .arg(&config)
        .arg("convert")
        .arg(input.to_str().unwrap())
        .arg("-o")
        .arg(&out)
        .arg("--no-timestamp")
        .arg("--summary")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Smarch"));
}
