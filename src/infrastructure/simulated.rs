use crate::domain::network::{MerchantCapability, PaymentNetwork};
use crate::domain::ports::{PaymentSheet, SheetEvents};
use crate::domain::request::SheetRequest;
use crate::domain::token::{PaymentToken, TokenPaymentMethod};
use crate::error::{BridgeError, Result};
use async_trait::async_trait;
use clap::ValueEnum;
use std::fmt;
use std::sync::Arc;

/// How a [`SimulatedSheet`] resolves a presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SheetOutcome {
    /// Authorize with the configured token, then finish.
    #[default]
    Authorize,
    /// Finish without authorizing, as when the user backs out of the sheet.
    Cancel,
    /// Refuse to present at all.
    Unavailable,
}

impl fmt::Display for SheetOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Authorize => "authorize",
            Self::Cancel => "cancel",
            Self::Unavailable => "unavailable",
        })
    }
}

/// In-process stand-in for the native payment sheet.
///
/// Answers capability queries from a configured set of card networks and
/// drives the delegate events from a background task, the way the real sheet
/// reports user interaction asynchronously. Used by the harness binary and
/// throughout the tests.
#[derive(Debug, Clone)]
pub struct SimulatedSheet {
    outcome: SheetOutcome,
    card_networks: Vec<PaymentNetwork>,
    token: PaymentToken,
}

impl SimulatedSheet {
    /// Creates a sheet holding cards on every known network.
    pub fn new(outcome: SheetOutcome) -> Self {
        Self {
            outcome,
            card_networks: vec![
                PaymentNetwork::Visa,
                PaymentNetwork::Mastercard,
                PaymentNetwork::Amex,
            ],
            token: Self::default_token(),
        }
    }

    /// Restricts which networks the simulated wallet holds cards on.
    pub fn with_card_networks(mut self, networks: Vec<PaymentNetwork>) -> Self {
        self.card_networks = networks;
        self
    }

    /// Replaces the token handed to the delegate on authorization.
    pub fn with_token(mut self, token: PaymentToken) -> Self {
        self.token = token;
        self
    }

    fn default_token() -> PaymentToken {
        PaymentToken {
            transaction_identifier: "simulated-transaction-0001".to_string(),
            payment_data: br#"{"version":"EC_v1","data":"b3BhcXVlLXBheWxvYWQ="}"#.to_vec(),
            payment_method: TokenPaymentMethod {
                display_name: Some("Simulated Visa 4242".to_string()),
                network: Some("Visa".to_string()),
                method_type: "credit".to_string(),
            },
        }
    }
}

#[async_trait]
impl PaymentSheet for SimulatedSheet {
    async fn can_make_payments(
        &self,
        networks: &[PaymentNetwork],
        capabilities: &[MerchantCapability],
    ) -> bool {
        !capabilities.is_empty()
            && networks
                .iter()
                .any(|network| self.card_networks.contains(network))
    }

    async fn present(&self, request: SheetRequest, events: Arc<dyn SheetEvents>) -> Result<()> {
        if self.outcome == SheetOutcome::Unavailable {
            return Err(BridgeError::Presentation(
                "payment sheet unavailable".to_string(),
            ));
        }
        if request.merchant_identifier.is_empty() {
            return Err(BridgeError::Presentation(
                "invalid merchant identifier".to_string(),
            ));
        }

        let outcome = self.outcome;
        let token = self.token.clone();
        tokio::spawn(async move {
            if outcome == SheetOutcome::Authorize {
                events.authorized(token).await;
            }
            events.finished().await;
        });
        Ok(())
    }

    async fn dismiss(&self) {
        tracing::debug!("simulated sheet dismissed");
    }
}
