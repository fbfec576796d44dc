use crate::domain::network::{MerchantCapability, PaymentNetwork};
use crate::error::{BridgeError, Result};
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;

/// A capability query as supplied by the caller: raw token lists, before
/// translation through the shared mapping table.
#[derive(Debug, PartialEq, Clone)]
pub struct CapabilityQuery {
    pub supported_networks: Vec<String>,
    pub merchant_capabilities: Vec<String>,
}

impl CapabilityQuery {
    /// Parses the first bridge argument.
    ///
    /// Any structural problem (missing argument object, missing list, or a
    /// non-string list entry) collapses to the single "Invalid arguments"
    /// error the bridge contract promises for this operation.
    pub fn from_args(args: &[Value]) -> Result<Self> {
        let object = args
            .first()
            .and_then(Value::as_object)
            .ok_or(BridgeError::InvalidArguments)?;
        let supported_networks =
            string_list(object, "supportedNetworks").ok_or(BridgeError::InvalidArguments)?;
        let merchant_capabilities =
            string_list(object, "merchantCapabilities").ok_or(BridgeError::InvalidArguments)?;
        Ok(Self {
            supported_networks,
            merchant_capabilities,
        })
    }

    pub fn networks(&self) -> Vec<PaymentNetwork> {
        PaymentNetwork::parse_list(&self.supported_networks)
    }

    pub fn capabilities(&self) -> Vec<MerchantCapability> {
        MerchantCapability::parse_list(&self.merchant_capabilities)
    }
}

/// A line item shown in the payment sheet.
#[derive(Debug, PartialEq, Clone)]
pub struct SummaryItem {
    pub label: String,
    pub amount: Decimal,
}

/// A validated payment request, ready for presentation by the platform port.
///
/// Network and capability tokens are translated through the same table the
/// capability prober uses; unrecognized tokens are dropped on this path too.
#[derive(Debug, PartialEq, Clone)]
pub struct SheetRequest {
    pub country_code: String,
    pub currency_code: String,
    pub merchant_identifier: String,
    pub supported_networks: Vec<PaymentNetwork>,
    pub merchant_capabilities: Vec<MerchantCapability>,
    pub summary_items: Vec<SummaryItem>,
}

impl SheetRequest {
    /// Validates the first bridge argument field by field.
    ///
    /// Missing fields fail with "<field> is required", ill-typed fields with
    /// "<field> must be <expected>"; nothing is constructed on failure.
    pub fn from_args(args: &[Value]) -> Result<Self> {
        let object = args
            .first()
            .and_then(Value::as_object)
            .ok_or(BridgeError::InvalidArguments)?;

        let country_code = required_string(object, "countryCode")?;
        let currency_code = required_string(object, "currencyCode")?;
        let merchant_identifier = required_string(object, "merchantIdentifier")?;
        let supported_networks = required_string_list(object, "supportedNetworks")?;
        let merchant_capabilities = required_string_list(object, "merchantCapabilities")?;

        let items = require(object, "paymentSummaryItems")?
            .as_array()
            .ok_or(BridgeError::InvalidField {
                field: "paymentSummaryItems",
                expected: "an array of summary items",
            })?;
        let summary_items = items
            .iter()
            .map(summary_item)
            .collect::<Result<Vec<SummaryItem>>>()?;

        Ok(Self {
            country_code,
            currency_code,
            merchant_identifier,
            supported_networks: PaymentNetwork::parse_list(&supported_networks),
            merchant_capabilities: MerchantCapability::parse_list(&merchant_capabilities),
            summary_items,
        })
    }
}

fn require<'a>(object: &'a Map<String, Value>, field: &'static str) -> Result<&'a Value> {
    object.get(field).ok_or(BridgeError::MissingField(field))
}

fn required_string(object: &Map<String, Value>, field: &'static str) -> Result<String> {
    require(object, field)?
        .as_str()
        .map(str::to_string)
        .ok_or(BridgeError::InvalidField {
            field,
            expected: "a string",
        })
}

fn required_string_list(object: &Map<String, Value>, field: &'static str) -> Result<Vec<String>> {
    let values = require(object, field)?
        .as_array()
        .ok_or(BridgeError::InvalidField {
            field,
            expected: "an array of strings",
        })?;
    values
        .iter()
        .map(|value| {
            value
                .as_str()
                .map(str::to_string)
                .ok_or(BridgeError::InvalidField {
                    field,
                    expected: "an array of strings",
                })
        })
        .collect()
}

fn string_list(object: &Map<String, Value>, field: &str) -> Option<Vec<String>> {
    object
        .get(field)?
        .as_array()?
        .iter()
        .map(|value| value.as_str().map(str::to_string))
        .collect()
}

fn summary_item(value: &Value) -> Result<SummaryItem> {
    let object = value.as_object().ok_or(BridgeError::InvalidField {
        field: "paymentSummaryItems",
        expected: "an array of summary items",
    })?;
    let label = required_string(object, "label")?;
    let amount = required_string(object, "amount")?;
    let amount = Decimal::from_str(amount.trim()).map_err(|_| BridgeError::InvalidField {
        field: "amount",
        expected: "a decimal string",
    })?;
    Ok(SummaryItem { label, amount })
}
