//! Print-instead-of-post messenger for local runs

use std::io::Write;
use std::sync::Mutex;

use async_trait::async_trait;
use zoilist_core::{Messenger, OutgoingMessage};

use crate::Error;

/// Writes messages to an output stream instead of sending them
pub struct DryRunMessenger {
    out: Mutex<Box<dyn Write + Send>>,
}

impl DryRunMessenger {
    pub fn stdout() -> Self {
        Self::with_writer(std::io::stdout())
    }

    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            out: Mutex::new(Box::new(writer)),
        }
    }

    fn write(&self, message: &OutgoingMessage) -> std::io::Result<()> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| std::io::Error::other("dry-run output lock poisoned"))?;
        writeln!(out, "[dry run] {}", message.channel)?;
        writeln!(out, "{}", message.text)?;
        out.flush()
    }
}

#[async_trait]
impl Messenger for DryRunMessenger {
    async fn post(&self, message: &OutgoingMessage) -> zoilist_core::Result<()> {
        self.write(message).map_err(Error::Io)?;
        Ok(())
    }
}
