// notify.rs - Build a Notifier from PipelineConfig.

use std::time::Duration;

use fw_notify::{
    DigestStore, MessageTransport, Notifier, StdoutTransport, TelegramTransport, TransportError,
    TransportKind,
};

use crate::config::{PipelineConfig, ENV_TELEGRAM_TOKEN};
use crate::error::PipelineError;

/// Notifier for the configured transport. `dry_run` forces stdout.
pub fn build_notifier(config: &PipelineConfig, dry_run: bool) -> Result<Notifier, PipelineError> {
    let notify = &config.notify;
    let kind = if dry_run {
        TransportKind::Stdout
    } else {
        notify.transport
    };

    let transport: Box<dyn MessageTransport> = match kind {
        TransportKind::Stdout => Box::new(StdoutTransport),
        TransportKind::Telegram => {
            let token = notify.telegram_token.as_deref().ok_or_else(|| {
                TransportError::NotConfigured(format!("{ENV_TELEGRAM_TOKEN} is not set"))
            })?;
            Box::new(TelegramTransport::new(
                &notify.api_base,
                token,
                Duration::from_secs(notify.timeout_secs),
            )?)
        }
    };

    let mut destinations = notify.destinations.clone();
    if kind == TransportKind::Stdout && destinations.is_empty() {
        destinations.push("stdout".to_string());
    }

    Ok(Notifier::new(
        config.status.clone(),
        notify.exclusions.clone(),
        transport,
        DigestStore::new(&config.paths.digest),
    )
    .with_destinations(destinations))
}
