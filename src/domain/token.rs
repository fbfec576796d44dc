use crate::domain::network::{MethodType, classify_network};
use serde::{Deserialize, Serialize};

/// Metadata about the instrument the user authorized with, as reported by the
/// platform. Raw strings rather than enums so values this crate does not know
/// about survive until classification.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct TokenPaymentMethod {
    pub display_name: Option<String>,
    pub network: Option<String>,
    pub method_type: String,
}

/// The opaque authorization token produced by the platform after user
/// approval. The payment data is never validated or decrypted here, only
/// forwarded.
#[derive(Debug, PartialEq, Clone)]
pub struct PaymentToken {
    pub transaction_identifier: String,
    pub payment_data: Vec<u8>,
    pub payment_method: TokenPaymentMethod,
}

/// The `paymentMethod` object of an authorization result.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizedMethod {
    pub display_name: String,
    pub network: String,
    pub r#type: MethodType,
}

/// The result delivered to the caller after a successful authorization,
/// serialized to JSON text. Produced once per presentation, then discarded.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationResult {
    pub transaction_identifier: String,
    pub payment_data: String,
    pub payment_method: AuthorizedMethod,
}

impl AuthorizationResult {
    /// Assembles the wire result from a platform token.
    ///
    /// The token payload is decoded as UTF-8 best-effort: a decode failure
    /// yields an empty string, never an error. Network and method type are
    /// classified through the shared mapping table with unknown fallbacks.
    pub fn from_token(token: PaymentToken) -> Self {
        let payment_data = String::from_utf8(token.payment_data).unwrap_or_default();
        let method = token.payment_method;
        Self {
            transaction_identifier: token.transaction_identifier,
            payment_data,
            payment_method: AuthorizedMethod {
                display_name: method.display_name.unwrap_or_default(),
                network: classify_network(method.network.as_deref()).to_string(),
                r#type: MethodType::from_raw(&method.method_type),
            },
        }
    }
}
