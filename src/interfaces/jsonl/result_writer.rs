use crate::domain::ports::DeliveredResult;
use crate::error::{BridgeError, Result};
use std::io::Write;

/// Writes delivered results as JSON lines.
pub struct ResultWriter<W: Write> {
    writer: W,
}

impl<W: Write> ResultWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_result(&mut self, result: &DeliveredResult) -> Result<()> {
        let line = serde_json::to_string(result).map_err(BridgeError::ResultEncoding)?;
        writeln!(self.writer, "{line}")?;
        Ok(())
    }
}
