// telegram.rs - TelegramTransport: Bot API `sendMessage`.
//
// Blocking client, no async runtime. The bot token is part of the URL path,
// so request URLs are never logged.

use std::time::Duration;

use serde_json::json;

use crate::error::TransportError;
use crate::transport::{MessageFormat, MessageTransport};

pub struct TelegramTransport {
    http: reqwest::blocking::Client,
    api_base: String,
    token: String,
}

impl TelegramTransport {
    pub fn new(api_base: &str, token: &str, timeout: Duration) -> Result<Self, TransportError> {
        if token.trim().is_empty() {
            return Err(TransportError::NotConfigured(
                "telegram bot token is empty".to_string(),
            ));
        }
        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("fw/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.trim().to_string(),
        })
    }

    fn send_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.token)
    }
}

/// `sendMessage` request body.
fn message_body(chat_id: &str, text: &str, format: MessageFormat) -> serde_json::Value {
    let mut body = json!({
        "chat_id": chat_id,
        "text": text,
    });
    if format == MessageFormat::Markdown {
        body["parse_mode"] = json!("Markdown");
    }
    body
}

impl MessageTransport for TelegramTransport {
    fn name(&self) -> &str {
        "telegram"
    }

    fn send(&self, destination: &str, text: &str, format: MessageFormat) -> Result<(), TransportError> {
        let response = self
            .http
            .post(self.send_url())
            .json(&message_body(destination, text, format))
            .send()
            .map_err(|e| TransportError::Network(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(TransportError::Http {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markdown_body_sets_parse_mode() {
        let body = message_body("42", "*hi*", MessageFormat::Markdown);
        assert_eq!(body["chat_id"], "42");
        assert_eq!(body["parse_mode"], "Markdown");

        let plain = message_body("42", "hi", MessageFormat::Plain);
        assert!(plain.get("parse_mode").is_none());
    }

    #[test]
    fn empty_token_is_rejected() {
        let result = TelegramTransport::new("https://api.telegram.org", "  ", Duration::from_secs(10));
        assert!(matches!(result, Err(TransportError::NotConfigured(_))));
    }

    #[test]
    fn url_joins_base_and_token() {
        let transport =
            TelegramTransport::new("http://localhost:8081/", "123:abc", Duration::from_secs(1)).unwrap();
        assert_eq!(transport.send_url(), "http://localhost:8081/bot123:abc/sendMessage");
    }
}
