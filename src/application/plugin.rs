use crate::domain::ports::{
    AuthorizationStatus, CallbackId, InvokedCommand, PluginResult, SharedCommandDelegate,
    SharedPaymentSheet, SheetEvents,
};
use crate::domain::request::{CapabilityQuery, SheetRequest};
use crate::domain::token::{AuthorizationResult, PaymentToken};
use crate::error::{BridgeError, Result};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::sync::RwLock;

/// The main entry point for the bridge adapter.
///
/// `ApplePayPlugin` handles the two bridge operations: the capability probe
/// and the payment-request flow. It owns the platform and delegate ports and
/// hands the asynchronous half of the payment flow to its [`AuthorizationRelay`].
pub struct ApplePayPlugin {
    sheet: SharedPaymentSheet,
    delegate: SharedCommandDelegate,
    relay: Arc<AuthorizationRelay>,
}

impl ApplePayPlugin {
    /// Creates a new `ApplePayPlugin` instance wired to the given ports.
    pub fn new(sheet: SharedPaymentSheet, delegate: SharedCommandDelegate) -> Self {
        let relay = Arc::new(AuthorizationRelay::new(sheet.clone(), delegate.clone()));
        Self {
            sheet,
            delegate,
            relay,
        }
    }

    /// Capability probe: answers whether the platform can take a payment for
    /// the requested networks and capabilities.
    ///
    /// Unrecognized tokens are dropped from the query set; only a malformed
    /// arguments object produces an error result.
    pub async fn can_make_payment(&self, command: InvokedCommand) -> Result<()> {
        let query = match CapabilityQuery::from_args(&command.arguments) {
            Ok(query) => query,
            Err(error) => {
                return self
                    .delegate
                    .send(PluginResult::error(&error), &command.callback_id)
                    .await;
            }
        };

        let can_make_payments = self
            .sheet
            .can_make_payments(&query.networks(), &query.capabilities())
            .await;
        tracing::debug!(
            callback_id = %command.callback_id,
            can_make_payments,
            "capability probe answered"
        );

        self.delegate
            .send(
                PluginResult::ok(json!({"canMakePayments": can_make_payments})),
                &command.callback_id,
            )
            .await
    }

    /// Validates the payment request and presents the payment sheet.
    ///
    /// The callback handle is registered with the relay before validation, so
    /// every failure on this path is delivered through the same pending handle
    /// and the relay is back in idle afterwards. A valid request triggers
    /// presentation exactly once; the eventual outcome arrives through the
    /// relay's [`SheetEvents`] implementation.
    pub async fn request_payment(&self, command: InvokedCommand) -> Result<()> {
        self.relay.begin(command.callback_id.clone()).await;

        let request = match SheetRequest::from_args(&command.arguments) {
            Ok(request) => request,
            Err(error) => return self.relay.reject(&error).await,
        };

        tracing::debug!(
            callback_id = %command.callback_id,
            merchant = %request.merchant_identifier,
            "presenting payment sheet"
        );
        if let Err(error) = self
            .sheet
            .present(request, self.relay.clone() as Arc<dyn SheetEvents>)
            .await
        {
            return self.relay.reject(&error).await;
        }
        Ok(())
    }

    /// Whether no payment flow is currently awaiting user action.
    pub async fn is_idle(&self) -> bool {
        self.relay.is_idle().await
    }
}

/// Lifecycle of one payment presentation. `Resolved` is momentary: delivering
/// the outcome puts the relay straight back to `Idle`.
enum RelayState {
    Idle,
    AwaitingUserAction {
        callback_id: CallbackId,
        result: Option<AuthorizationResult>,
    },
}

/// Resolves the single outstanding payment callback from the sheet's
/// asynchronous events.
///
/// At most one flow is tracked. Registering a new flow while one is pending
/// overwrites the handle; the overwritten flow is never resolved. Duplicate or
/// out-of-order platform events are tolerated, not asserted against.
pub struct AuthorizationRelay {
    sheet: SharedPaymentSheet,
    delegate: SharedCommandDelegate,
    state: RwLock<RelayState>,
}

impl AuthorizationRelay {
    fn new(sheet: SharedPaymentSheet, delegate: SharedCommandDelegate) -> Self {
        Self {
            sheet,
            delegate,
            state: RwLock::new(RelayState::Idle),
        }
    }

    /// Registers the pending callback handle, overwriting any in-flight flow.
    async fn begin(&self, callback_id: CallbackId) {
        let mut state = self.state.write().await;
        if let RelayState::AwaitingUserAction {
            callback_id: pending,
            ..
        } = &*state
        {
            tracing::warn!(%pending, "overwriting pending payment flow");
        }
        *state = RelayState::AwaitingUserAction {
            callback_id,
            result: None,
        };
    }

    /// Resolves the pending flow with an error and returns to idle.
    async fn reject(&self, error: &BridgeError) -> Result<()> {
        let resolved = {
            let mut state = self.state.write().await;
            std::mem::replace(&mut *state, RelayState::Idle)
        };
        if let RelayState::AwaitingUserAction { callback_id, .. } = resolved {
            self.delegate
                .send(PluginResult::error(error), &callback_id)
                .await?;
        }
        Ok(())
    }

    async fn is_idle(&self) -> bool {
        matches!(*self.state.read().await, RelayState::Idle)
    }
}

#[async_trait]
impl SheetEvents for AuthorizationRelay {
    /// Stashes the classified authorization result pending final dismissal.
    ///
    /// The platform expects an immediate answer and no further validation
    /// happens here, so the status is always `Success`. With no flow pending
    /// the token is discarded.
    async fn authorized(&self, token: PaymentToken) -> AuthorizationStatus {
        let mut state = self.state.write().await;
        match &mut *state {
            RelayState::AwaitingUserAction { result, .. } => {
                *result = Some(AuthorizationResult::from_token(token));
            }
            RelayState::Idle => {
                tracing::warn!("authorization event with no payment flow pending");
            }
        }
        AuthorizationStatus::Success
    }

    /// Terminal event: delivers the stashed result as success, or the
    /// cancellation error, then resets to idle and dismisses the sheet.
    async fn finished(&self) {
        let resolved = {
            let mut state = self.state.write().await;
            std::mem::replace(&mut *state, RelayState::Idle)
        };
        let (callback_id, result) = match resolved {
            RelayState::AwaitingUserAction {
                callback_id,
                result,
            } => (callback_id, result),
            RelayState::Idle => {
                tracing::warn!("dismissal event with no payment flow pending");
                return;
            }
        };

        let outcome = match result {
            Some(result) => match serde_json::to_string(&result) {
                Ok(text) => PluginResult::ok(Value::String(text)),
                Err(source) => PluginResult::error(BridgeError::ResultEncoding(source)),
            },
            None => PluginResult::error(BridgeError::Cancelled),
        };
        if let Err(error) = self.delegate.send(outcome, &callback_id).await {
            tracing::warn!(%error, %callback_id, "failed to deliver payment result");
        }
        self.sheet.dismiss().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::CommandStatus;
    use crate::infrastructure::channel::ChannelDelegate;
    use crate::infrastructure::simulated::{SheetOutcome, SimulatedSheet};
    use serde_json::json;

    fn command(callback_id: &str, args: Value) -> InvokedCommand {
        InvokedCommand {
            callback_id: callback_id.into(),
            arguments: vec![args],
        }
    }

    fn payment_args() -> Value {
        json!({
            "countryCode": "US",
            "currencyCode": "USD",
            "merchantIdentifier": "merchant.com.example.shop",
            "supportedNetworks": ["visa"],
            "merchantCapabilities": ["3DS"],
            "paymentSummaryItems": [{"label": "Total", "amount": "9.99"}]
        })
    }

    fn plugin(
        outcome: SheetOutcome,
    ) -> (
        ApplePayPlugin,
        tokio::sync::mpsc::UnboundedReceiver<crate::domain::ports::DeliveredResult>,
    ) {
        let (delegate, deliveries) = ChannelDelegate::new();
        let plugin = ApplePayPlugin::new(
            Arc::new(SimulatedSheet::new(outcome)),
            Arc::new(delegate),
        );
        (plugin, deliveries)
    }

    #[tokio::test]
    async fn test_capability_probe_success() {
        let (plugin, mut deliveries) = plugin(SheetOutcome::Authorize);
        let args = json!({
            "supportedNetworks": ["visa", "discover"],
            "merchantCapabilities": ["3DS"]
        });
        plugin.can_make_payment(command("cb-1", args)).await.unwrap();

        let delivered = deliveries.recv().await.unwrap();
        assert_eq!(delivered.status, CommandStatus::Ok);
        assert_eq!(delivered.message, json!({"canMakePayments": true}));
    }

    #[tokio::test]
    async fn test_capability_probe_invalid_arguments() {
        let (plugin, mut deliveries) = plugin(SheetOutcome::Authorize);
        plugin
            .can_make_payment(command("cb-1", json!({"supportedNetworks": ["visa"]})))
            .await
            .unwrap();

        let delivered = deliveries.recv().await.unwrap();
        assert_eq!(delivered.status, CommandStatus::Error);
        assert_eq!(delivered.message, json!("Invalid arguments"));
    }

    #[tokio::test]
    async fn test_payment_flow_authorized() {
        let (plugin, mut deliveries) = plugin(SheetOutcome::Authorize);
        plugin
            .request_payment(command("cb-1", payment_args()))
            .await
            .unwrap();

        let delivered = deliveries.recv().await.unwrap();
        assert_eq!(delivered.callback_id, "cb-1".into());
        assert_eq!(delivered.status, CommandStatus::Ok);

        let result: Value =
            serde_json::from_str(delivered.message.as_str().unwrap()).unwrap();
        assert!(result["transactionIdentifier"].is_string());
        assert!(result["paymentData"].is_string());
        assert!(result["paymentMethod"]["displayName"].is_string());

        assert!(plugin.is_idle().await);
    }

    #[tokio::test]
    async fn test_payment_flow_cancelled() {
        let (plugin, mut deliveries) = plugin(SheetOutcome::Cancel);
        plugin
            .request_payment(command("cb-1", payment_args()))
            .await
            .unwrap();

        let delivered = deliveries.recv().await.unwrap();
        assert_eq!(delivered.status, CommandStatus::Error);
        assert_eq!(delivered.message, json!("Payment cancelled"));
        assert!(plugin.is_idle().await);
    }

    #[tokio::test]
    async fn test_payment_flow_missing_field() {
        let (plugin, mut deliveries) = plugin(SheetOutcome::Authorize);
        let mut args = payment_args();
        args.as_object_mut().unwrap().remove("merchantIdentifier");
        plugin.request_payment(command("cb-1", args)).await.unwrap();

        let delivered = deliveries.recv().await.unwrap();
        assert_eq!(delivered.status, CommandStatus::Error);
        assert_eq!(delivered.message, json!("merchantIdentifier is required"));
        assert!(plugin.is_idle().await);
    }

    #[tokio::test]
    async fn test_payment_flow_sheet_unavailable() {
        let (plugin, mut deliveries) = plugin(SheetOutcome::Unavailable);
        plugin
            .request_payment(command("cb-1", payment_args()))
            .await
            .unwrap();

        let delivered = deliveries.recv().await.unwrap();
        assert_eq!(delivered.status, CommandStatus::Error);
        let message = delivered.message.as_str().unwrap();
        assert!(message.starts_with("Unable to present the payment sheet"));
        assert!(plugin.is_idle().await);
    }

    #[tokio::test]
    async fn test_flow_resets_between_requests() {
        let (plugin, mut deliveries) = plugin(SheetOutcome::Cancel);

        plugin
            .request_payment(command("cb-1", payment_args()))
            .await
            .unwrap();
        deliveries.recv().await.unwrap();

        plugin
            .request_payment(command("cb-2", payment_args()))
            .await
            .unwrap();
        let delivered = deliveries.recv().await.unwrap();
        assert_eq!(delivered.callback_id, "cb-2".into());
    }
}
