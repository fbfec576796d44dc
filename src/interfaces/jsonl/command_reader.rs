use crate::domain::ports::{CallbackId, InvokedCommand};
use crate::error::Result;
use serde::Deserialize;
use serde_json::Value;
use std::io::{BufRead, BufReader, Read};

/// The bridge operations a command envelope can name.
#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub enum BridgeAction {
    CanMakePayment,
    RequestPayment,
}

/// One line of a command script: the action to dispatch, the caller's
/// callback id, and the marshaled argument array.
#[derive(Debug, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CommandEnvelope {
    pub action: BridgeAction,
    pub callback_id: String,
    #[serde(default)]
    pub args: Vec<Value>,
}

impl CommandEnvelope {
    pub fn command(&self) -> InvokedCommand {
        InvokedCommand {
            callback_id: CallbackId(self.callback_id.clone()),
            arguments: self.args.clone(),
        }
    }
}

/// Reads command envelopes from a JSON-lines source.
///
/// Blank lines are skipped; a malformed line yields an error for that line
/// without consuming the rest of the stream.
pub struct CommandReader<R: Read> {
    reader: BufReader<R>,
}

impl<R: Read> CommandReader<R> {
    /// Creates a new `CommandReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        Self {
            reader: BufReader::new(source),
        }
    }

    /// Returns an iterator that lazily reads and deserializes envelopes.
    pub fn commands(self) -> impl Iterator<Item = Result<CommandEnvelope>> {
        self.reader.lines().filter_map(|line| match line {
            Ok(line) if line.trim().is_empty() => None,
            Ok(line) => Some(serde_json::from_str(&line).map_err(Into::into)),
            Err(error) => Some(Err(error.into())),
        })
    }
}
