// config.rs - `[notify]` section of fw.toml.
//
// ```toml
// [notify]
// transport = "telegram"
// destinations = ["12345", "-100987"]
//
// [notify.exclusions]
// exclude_senders = ["ЮЖНЫЙ ФОРПОСТ"]
// destination_cities = ["АСТРА"]
// ```
//
// The bot token never lives in the file; it comes from FW_TELEGRAM_TOKEN.

use serde::{Deserialize, Serialize};

use fw_shipment::ShipmentRecord;

/// Which shipments drivers never need to hear about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionRules {
    /// Sender names (uppercase substring match) that are never collected.
    #[serde(default = "default_exclude_senders")]
    pub exclude_senders: Vec<String>,

    /// The route destination must contain one of these. Empty admits all.
    #[serde(default = "default_destination_cities")]
    pub destination_cities: Vec<String>,
}

fn default_exclude_senders() -> Vec<String> {
    vec!["ЮЖНЫЙ ФОРПОСТ".to_string()]
}

fn default_destination_cities() -> Vec<String> {
    vec!["АСТРА".to_string()]
}

impl Default for ExclusionRules {
    fn default() -> Self {
        Self {
            exclude_senders: default_exclude_senders(),
            destination_cities: default_destination_cities(),
        }
    }
}

impl ExclusionRules {
    /// No exclusions at all.
    pub fn none() -> Self {
        Self {
            exclude_senders: Vec::new(),
            destination_cities: Vec::new(),
        }
    }

    /// True when the record may appear in a ready summary.
    pub fn admits(&self, record: &ShipmentRecord) -> bool {
        let sender = record.sender.to_uppercase();
        if self
            .exclude_senders
            .iter()
            .any(|excluded| sender.contains(&excluded.to_uppercase()))
        {
            return false;
        }
        if self.destination_cities.is_empty() {
            return true;
        }
        let destination = record.route.destination.to_uppercase();
        self.destination_cities
            .iter()
            .any(|city| destination.contains(&city.to_uppercase()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    #[default]
    Telegram,
    /// Print summaries instead of sending them.
    Stdout,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyConfig {
    #[serde(default)]
    pub transport: TransportKind,

    /// Chat ids to deliver to.
    #[serde(default)]
    pub destinations: Vec<String>,

    #[serde(default)]
    pub exclusions: ExclusionRules,

    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Bot token. Read from the environment only.
    #[serde(skip)]
    pub telegram_token: Option<String>,
}

fn default_api_base() -> String {
    "https://api.telegram.org".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            transport: TransportKind::default(),
            destinations: Vec::new(),
            exclusions: ExclusionRules::default(),
            api_base: default_api_base(),
            timeout_secs: default_timeout_secs(),
            telegram_token: None,
        }
    }
}

/// Split a comma-separated destination list, dropping quotes and blanks.
pub fn parse_destinations(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|part| part.trim().replace(['"', '\''], ""))
        .filter(|part| !part.is_empty())
        .collect()
}
