// error.rs - Notification and delivery errors.

use thiserror::Error;

/// Failure to deliver one message to one destination.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request never got a response (DNS, TLS, timeout).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Required transport settings are missing.
    #[error("transport not configured: {0}")]
    NotConfigured(String),
}

