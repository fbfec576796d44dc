use crate::domain::network::{MerchantCapability, PaymentNetwork};
use crate::domain::request::SheetRequest;
use crate::domain::token::PaymentToken;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Correlation id routing an asynchronous result back to the original caller.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct CallbackId(pub String);

impl fmt::Display for CallbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for CallbackId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A command as dispatched by the host bridge: the caller's correlation id
/// plus the marshaled argument array.
#[derive(Debug, Clone, PartialEq)]
pub struct InvokedCommand {
    pub callback_id: CallbackId,
    pub arguments: Vec<Value>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub enum CommandStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "ERROR")]
    Error,
}

/// A result delivered through the bridge: a status plus a JSON message.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct PluginResult {
    pub status: CommandStatus,
    pub message: Value,
}

impl PluginResult {
    pub fn ok(message: Value) -> Self {
        Self {
            status: CommandStatus::Ok,
            message,
        }
    }

    pub fn error(message: impl fmt::Display) -> Self {
        Self {
            status: CommandStatus::Error,
            message: Value::String(message.to_string()),
        }
    }
}

/// A result paired with the callback handle it was delivered to.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DeliveredResult {
    pub callback_id: CallbackId,
    pub status: CommandStatus,
    pub message: Value,
}

/// Answer returned to the platform from the authorization event.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AuthorizationStatus {
    Success,
    Failure,
}

/// Outbound half of the host bridge: delivers a result to the callback
/// registered under `callback_id`.
#[async_trait]
pub trait CommandDelegate: Send + Sync {
    async fn send(&self, result: PluginResult, callback_id: &CallbackId) -> Result<()>;
}

/// Delegate surface the payment sheet drives while the user interacts with it.
///
/// The platform fires `authorized` at most once before `finished`; the relay
/// implementing this trait tolerates violations rather than asserting.
#[async_trait]
pub trait SheetEvents: Send + Sync {
    async fn authorized(&self, token: PaymentToken) -> AuthorizationStatus;
    async fn finished(&self);
}

/// Outbound platform port: capability queries and sheet presentation.
#[async_trait]
pub trait PaymentSheet: Send + Sync {
    async fn can_make_payments(
        &self,
        networks: &[PaymentNetwork],
        capabilities: &[MerchantCapability],
    ) -> bool;

    /// Presents the payment UI for `request`, reporting user interaction
    /// through `events`. Fails if the sheet cannot be constructed.
    async fn present(&self, request: SheetRequest, events: Arc<dyn SheetEvents>) -> Result<()>;

    async fn dismiss(&self);
}

pub type SharedPaymentSheet = Arc<dyn PaymentSheet>;
pub type SharedCommandDelegate = Arc<dyn CommandDelegate>;
