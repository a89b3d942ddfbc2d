// transport.rs - MessageTransport: where rendered summaries go.

use std::io::Write;

use crate::error::TransportError;

/// How the receiving side should interpret the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageFormat {
    Plain,
    Markdown,
}

/// Delivers one message to one destination.
///
/// Implementations report per-destination failures; the notifier logs them
/// and moves on to the next destination.
pub trait MessageTransport: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    fn send(&self, destination: &str, text: &str, format: MessageFormat) -> Result<(), TransportError>;
}

/// Prints messages to stdout instead of sending them.
#[derive(Debug, Default)]
pub struct StdoutTransport;

impl MessageTransport for StdoutTransport {
    fn name(&self) -> &str {
        "stdout"
    }

    fn send(&self, destination: &str, text: &str, _format: MessageFormat) -> Result<(), TransportError> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "--- message to {destination} ---")?;
        writeln!(out, "{text}")?;
        Ok(())
    }
}
