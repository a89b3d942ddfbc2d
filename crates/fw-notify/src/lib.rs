//! # fw-notify
//!
//! Tells people which shipments can be picked up, once per change.
//!
//! The ready set is filtered, grouped by carrier and rendered as a Markdown
//! summary. A digest over the ready set's `(id, payment)` pairs decides
//! whether the summary must be sent: wording, timestamps and status text
//! never trigger a re-send, a new shipment or a payment change does.
//!
//! ## Key components
//!
//! - [`ReadySummary`]: filtered, carrier-grouped ready set and its digest
//! - [`ExclusionRules`]: sender and destination filters
//! - [`MessageTransport`]: outbound delivery ([`TelegramTransport`], [`StdoutTransport`])
//! - [`DigestStore`]: the last successfully sent digest
//! - [`Notifier`]: filter, dedup, dispatch

pub mod config;
pub mod digest;
pub mod error;
pub mod notifier;
pub mod render;
pub mod summary;
pub mod telegram;
pub mod transport;

pub use config::{parse_destinations, ExclusionRules, NotifyConfig, TransportKind};
pub use digest::DigestStore;
pub use error::TransportError;
pub use notifier::{NotifyOutcome, Notifier};
pub use render::render_markdown;
pub use summary::ReadySummary;
pub use telegram::TelegramTransport;
pub use transport::{MessageFormat, MessageTransport, StdoutTransport};
