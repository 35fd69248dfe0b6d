use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

const HEADER: &str = "type, order, plan_free, initial, total, gateway, coupon, student";

#[test]
fn test_priced_order_waits_for_payment() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{HEADER}").unwrap();
    writeln!(file, "pending, 1, false, 99.0, 99.0, manual, , 1").unwrap();

    let mut cmd = Command::new(cargo_bin!("coursepay"));
    cmd.arg("orders").arg(file.path());

    // No transaction until the payment actually arrives.
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1,pending,manual,99,99,0,0"));
}

#[test]
fn test_switch_to_manual_then_settle() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{HEADER}").unwrap();
    // Card gateway is not installed, so the order cannot be settled yet.
    writeln!(file, "pending, 7, false, 0, 20.0, stripe, TRIAL, 4").unwrap();
    writeln!(file, "switch, 7, , , , manual, , ").unwrap();
    writeln!(file, "switch, 7, , , , manual, , ").unwrap(); // Already manual
    writeln!(file, "pending, 7, false, , , , TRIAL, 4").unwrap();

    let mut cmd = Command::new(cargo_bin!("coursepay"));
    cmd.arg("orders").arg(file.path());

    // One note for the single real switch, one $0 receipt.
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Unknown payment gateway: stripe"))
        .stdout(predicate::str::contains("7,completed,manual,0,20,1,1"));
}

#[test]
fn test_zero_total_recurring_is_ignored() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{HEADER}").unwrap();
    writeln!(file, "pending, 2, true, 0, 0, manual, , 1").unwrap();
    writeln!(file, "recurring, 2, , , , , , ").unwrap();

    let mut cmd = Command::new(cargo_bin!("coursepay"));
    cmd.arg("orders").arg(file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("2,completed,manual,0,0,0,0"));
}

#[test]
fn test_completed_order_is_not_reprocessed() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{HEADER}").unwrap();
    writeln!(file, "pending, 3, false, 0, 10.0, manual, , 1").unwrap();
    writeln!(file, "pending, 3, false, 0, 10.0, manual, , 1").unwrap();

    let mut cmd = Command::new(cargo_bin!("coursepay"));
    cmd.arg("orders").arg(file.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("error processing order command"))
        .stdout(predicate::str::contains("3,completed,manual,0,10,1,0"));
}

#[test]
fn test_recurring_for_unknown_order() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{HEADER}").unwrap();
    writeln!(file, "recurring, 404, , , , , , ").unwrap();

    let mut cmd = Command::new(cargo_bin!("coursepay"));
    cmd.arg("orders").arg(file.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Order 404 not found"));
}
