use crate::domain::ports::{CallbackId, CommandDelegate, DeliveredResult, PluginResult};
use crate::error::{BridgeError, Result};
use async_trait::async_trait;
use tokio::sync::mpsc;

/// A `CommandDelegate` that forwards every delivered result over an unbounded
/// channel. The harness prints what it receives; tests await it.
pub struct ChannelDelegate {
    tx: mpsc::UnboundedSender<DeliveredResult>,
}

impl ChannelDelegate {
    /// Creates the delegate together with the receiving end of its channel.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<DeliveredResult>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl CommandDelegate for ChannelDelegate {
    async fn send(&self, result: PluginResult, callback_id: &CallbackId) -> Result<()> {
        self.tx
            .send(DeliveredResult {
                callback_id: callback_id.clone(),
                status: result.status,
                message: result.message,
            })
            .map_err(|_| BridgeError::ChannelClosed)
    }
}
