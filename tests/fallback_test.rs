use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

mod common;

#[cfg(not(feature = "http-gateway"))]
#[test]
fn test_http_gateway_fallback_warning() {
    let mut cmd = Command::new(cargo_bin!("paynl-checkout"));
    cmd.arg("start")
        .arg(common::FIXTURE_ORDER)
        .arg("--method")
        .arg("paynl_payment_ideal");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains(
            "WARNING: Remote gateway requested, but 'http-gateway' feature is not enabled. \
             Falling back to the in-memory gateway.",
        ))
        .stdout(predicate::str::contains("\"redirect_url\": \"https://sandbox.invalid/payment/"))
        .stdout(predicate::str::contains("\"hold_order\": false"));
}

#[cfg(feature = "http-gateway")]
#[test]
fn test_incomplete_credentials_fallback_warning() {
    let mut cmd = Command::new(cargo_bin!("paynl-checkout"));
    cmd.arg("start")
        .arg(common::FIXTURE_ORDER)
        .arg("--method")
        .arg("paynl_payment_ideal")
        .env_remove("PAYNL__GATEWAY__API_TOKEN")
        .env_remove("PAYNL__GATEWAY__SERVICE_ID");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Gateway credentials are incomplete"));
}
