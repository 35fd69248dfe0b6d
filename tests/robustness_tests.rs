use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_malformed_csv_handling() {
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("robustness_test.csv");
    let mut wtr = csv::Writer::from_path(&output_path).unwrap();
    wtr.write_record(["type", "order", "plan_free", "initial", "total", "gateway", "coupon", "student"])
        .unwrap();

    // Valid free order
    wtr.write_record(["pending", "1", "true", "0", "0", "manual", "", "1"])
        .unwrap();
    // Invalid type
    wtr.write_record(["refund", "1", "", "", "", "", "", ""]).unwrap();
    // Missing initial price for a new order
    wtr.write_record(["pending", "2", "false", "", "", "manual", "", ""])
        .unwrap();
    // Switch without a gateway
    wtr.write_record(["switch", "1", "", "", "", "", "", ""]).unwrap();
    // Valid priced order
    wtr.write_record(["pending", "3", "false", "5.0", "5.0", "manual", "", "1"])
        .unwrap();
    wtr.flush().unwrap();
    drop(wtr);

    let mut cmd = Command::new(cargo_bin!("coursepay"));
    cmd.arg("orders").arg(&output_path);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("error reading order command"))
        .stderr(predicate::str::contains("Pending order missing initial price"))
        .stderr(predicate::str::contains("Switch missing gateway"))
        .stdout(predicate::str::contains("1,completed,manual,0,0,0,0"))
        .stdout(predicate::str::contains("3,pending,manual,5,5,0,0"))
        .stdout(predicate::str::contains("\n2,").not());
}

#[test]
fn test_invalid_data_types() {
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("data_type_test.csv");
    let mut wtr = csv::Writer::from_path(&output_path).unwrap();
    wtr.write_record(["type", "order", "plan_free", "initial", "total", "gateway", "coupon", "student"])
        .unwrap();

    // Text in price field
    wtr.write_record(["pending", "1", "false", "not_a_number", "", "manual", "", ""])
        .unwrap();
    // Negative price
    wtr.write_record(["pending", "2", "false", "-3.0", "", "manual", "", ""])
        .unwrap();
    // Non-integer order ID
    wtr.write_record(["pending", "abc", "false", "1.0", "", "manual", "", ""])
        .unwrap();
    // Valid order
    wtr.write_record(["pending", "4", "false", "8.0", "8.0", "manual", "", ""])
        .unwrap();
    wtr.flush().unwrap();
    drop(wtr);

    let mut cmd = Command::new(cargo_bin!("coursepay"));
    cmd.arg("orders").arg(&output_path);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("error reading order command"))
        .stdout(predicate::str::contains("4,pending,manual,8,8,0,0"));
}
