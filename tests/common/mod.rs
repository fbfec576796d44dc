use serde_json::{Value, json};
use std::fs::File;
use std::io::{Error, Write};
use std::path::Path;

pub fn capability_args(networks: &[&str], capabilities: &[&str]) -> Value {
    json!({
        "supportedNetworks": networks,
        "merchantCapabilities": capabilities,
    })
}

pub fn payment_args() -> Value {
    json!({
        "countryCode": "US",
        "currencyCode": "USD",
        "merchantIdentifier": "merchant.com.example.shop",
        "supportedNetworks": ["visa", "mastercard"],
        "merchantCapabilities": ["3DS", "CREDIT_CARD"],
        "paymentSummaryItems": [
            {"label": "Subtotal", "amount": "12.50"},
            {"label": "Shipping", "amount": "1.25"},
            {"label": "Total", "amount": "13.75"}
        ]
    })
}

pub fn envelope(action: &str, callback_id: &str, args: Value) -> String {
    json!({
        "action": action,
        "callbackId": callback_id,
        "args": [args],
    })
    .to_string()
}

pub fn write_script(path: &Path, lines: &[String]) -> Result<(), Error> {
    let mut file = File::create(path)?;
    for line in lines {
        writeln!(file, "{line}")?;
    }
    Ok(())
}
