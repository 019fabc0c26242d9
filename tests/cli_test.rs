use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

mod common;

#[test]
fn test_cli_request_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!("paynl-checkout"));
    cmd.arg("request")
        .arg(common::FIXTURE_ORDER)
        .arg("--method")
        .arg("paynl_payment_ideal");

    let output = cmd.output()?;
    assert!(output.status.success());
    let request: serde_json::Value = serde_json::from_slice(&output.stdout)?;

    assert_eq!(request["currency"], "USD");
    assert_eq!(request["amount"], "110.00");
    assert_eq!(request["paymentMethod"], 10);
    assert_eq!(request["invoiceAddress"]["initials"], "A");
    assert_eq!(request["invoiceAddress"]["streetName"], "Main Street");
    assert_eq!(request["invoiceAddress"]["houseNumber"], "12a");
    assert_eq!(request["enduser"]["birthDate"], "1990-12-31");
    assert_eq!(request["ipaddress"], "198.51.100.7");
    // Non-numeric bank id and missing shipping address are left out.
    assert!(request.get("bank").is_none());
    assert!(request.get("address").is_none());

    let products = request["products"].as_array().unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[1]["id"], "discount");
    assert_eq!(products[1]["price"], "-11.00");
    assert_eq!(products[1]["tax"], "-1.10");

    Ok(())
}

#[test]
fn test_cli_request_for_klarna_uses_full_first_name() {
    let mut cmd = Command::new(cargo_bin!("paynl-checkout"));
    cmd.arg("request")
        .arg(common::FIXTURE_ORDER)
        .arg("--method")
        .arg("paynl_payment_klarna");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"paymentMethod\": 1717"))
        .stdout(predicate::str::contains("\"initials\": \"anna\""));
}

#[test]
fn test_cli_state_for_default_status() {
    let mut cmd = Command::new(cargo_bin!("paynl-checkout"));
    cmd.arg("state").arg("--method").arg("paynl_payment_paypal");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"state\": \"new\""))
        .stdout(predicate::str::contains("\"status\": \"pending\""));
}
