mod common;

use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_cli_checkout_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!("applepay-bridge"));
    cmd.arg("tests/fixtures/checkout.jsonl");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            r#""callbackId":"cb-1","status":"OK""#,
        ))
        .stdout(predicate::str::contains(r#""canMakePayments":true"#))
        .stdout(predicate::str::contains("transactionIdentifier"))
        .stdout(predicate::str::contains(r#"\"network\":\"VISA\""#));

    Ok(())
}

#[test]
fn test_cli_cancelled_payment() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!("applepay-bridge"));
    cmd.arg("tests/fixtures/checkout.jsonl").arg("--outcome").arg("cancel");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""canMakePayments":true"#))
        .stdout(predicate::str::contains("Payment cancelled"));

    Ok(())
}

#[test]
fn test_cli_reports_validation_errors_per_command() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let script = dir.path().join("bad_request.jsonl");

    let mut args = common::payment_args();
    args.as_object_mut().unwrap().remove("countryCode");
    common::write_script(
        &script,
        &[
            common::envelope("requestPayment", "cb-1", args),
            common::envelope("requestPayment", "cb-2", common::payment_args()),
        ],
    )?;

    let mut cmd = Command::new(cargo_bin!("applepay-bridge"));
    cmd.arg(&script);

    // The first command fails validation, the second still completes.
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("countryCode is required"))
        .stdout(predicate::str::contains(
            r#""callbackId":"cb-2","status":"OK""#,
        ));

    Ok(())
}

#[test]
fn test_cli_rejects_malformed_script() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let script = dir.path().join("garbage.jsonl");
    common::write_script(&script, &["not json at all".to_string()])?;

    let mut cmd = Command::new(cargo_bin!("applepay-bridge"));
    cmd.arg(&script);

    cmd.assert().failure();

    Ok(())
}
