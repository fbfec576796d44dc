use serde::{Deserialize, Serialize};

/// Payment networks the bridge knows how to request.
///
/// Both bridge entry points translate caller-supplied network tokens through
/// [`PaymentNetwork::from_token`], so they always agree on which tokens are
/// accepted. Unrecognized tokens are dropped by the callers, never an error.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum PaymentNetwork {
    Visa,
    Mastercard,
    Amex,
}

impl PaymentNetwork {
    /// Matches a caller-supplied network token, case-insensitively.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "visa" => Some(Self::Visa),
            "mastercard" => Some(Self::Mastercard),
            "amex" => Some(Self::Amex),
            _ => None,
        }
    }

    /// Upper-case network code used in authorization results.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Visa => "VISA",
            Self::Mastercard => "MASTERCARD",
            Self::Amex => "AMEX",
        }
    }

    /// Translates a token list, dropping unrecognized entries.
    pub fn parse_list(tokens: &[String]) -> Vec<Self> {
        tokens
            .iter()
            .filter_map(|token| {
                let network = Self::from_token(token);
                if network.is_none() {
                    tracing::debug!(%token, "dropping unrecognized payment network");
                }
                network
            })
            .collect()
    }
}

/// Classifies raw platform network metadata into an authorization-result code.
pub fn classify_network(raw: Option<&str>) -> &'static str {
    raw.and_then(PaymentNetwork::from_token)
        .map(|network| network.code())
        .unwrap_or("UNKNOWN")
}

/// Merchant capabilities the bridge knows how to request.
///
/// Tokens are matched exactly (`3DS`, `CREDIT_CARD`, `DEBIT_CARD`).
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub enum MerchantCapability {
    #[serde(rename = "3DS")]
    ThreeDSecure,
    #[serde(rename = "CREDIT_CARD")]
    Credit,
    #[serde(rename = "DEBIT_CARD")]
    Debit,
}

impl MerchantCapability {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "3DS" => Some(Self::ThreeDSecure),
            "CREDIT_CARD" => Some(Self::Credit),
            "DEBIT_CARD" => Some(Self::Debit),
            _ => None,
        }
    }

    /// Translates a token list with set semantics: unrecognized entries are
    /// dropped and duplicates collapse to one.
    pub fn parse_list(tokens: &[String]) -> Vec<Self> {
        let mut capabilities = Vec::new();
        for token in tokens {
            match Self::from_token(token) {
                Some(capability) if !capabilities.contains(&capability) => {
                    capabilities.push(capability);
                }
                Some(_) => {}
                None => {
                    tracing::debug!(%token, "dropping unrecognized merchant capability");
                }
            }
        }
        capabilities
    }
}

/// Classification of the authorized payment method's type.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum MethodType {
    Debit,
    Credit,
    Store,
    Prepaid,
    Unknown,
}

impl MethodType {
    /// Classifies the raw platform value; unknown or future values fall back
    /// to [`MethodType::Unknown`].
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "debit" => Self::Debit,
            "credit" => Self::Credit,
            "store" => Self::Store,
            "prepaid" => Self::Prepaid,
            _ => Self::Unknown,
        }
    }
}
