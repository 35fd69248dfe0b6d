use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_boundary_order_id() {
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("boundary_test.csv");
    let mut wtr = csv::Writer::from_path(&output_path).unwrap();
    wtr.write_record(["type", "order", "plan_free", "initial", "total", "gateway", "coupon", "student"])
        .unwrap();

    // u64::MAX = 18446744073709551615
    wtr.write_record([
        "pending",
        "18446744073709551615",
        "false",
        "1000000.0000",
        "1000000.0000",
        "manual",
        "",
        "",
    ])
    .unwrap();
    wtr.flush().unwrap();
    drop(wtr);

    let mut cmd = Command::new(cargo_bin!("coursepay"));
    cmd.arg("orders").arg(&output_path);

    cmd.assert().success().stdout(predicate::str::contains(
        "18446744073709551615,pending,manual,1000000,1000000,0,0",
    ));
}

#[test]
fn test_tiny_price_is_not_free() {
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("precision_test.csv");
    let mut wtr = csv::Writer::from_path(&output_path).unwrap();
    wtr.write_record(["type", "order", "plan_free", "initial", "total", "gateway", "coupon", "student"])
        .unwrap();

    wtr.write_record(["pending", "1", "false", "0.0001", "0.0001", "manual", "", ""])
        .unwrap();
    wtr.write_record(["pending", "2", "false", "0.0000", "0.0001", "manual", "", ""])
        .unwrap();
    wtr.flush().unwrap();
    drop(wtr);

    let mut cmd = Command::new(cargo_bin!("coursepay"));
    cmd.arg("orders").arg(&output_path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1,pending,manual,0.0001,0.0001,0,0"))
        .stdout(predicate::str::contains("2,completed,manual,0,0.0001,1,0"));
}
