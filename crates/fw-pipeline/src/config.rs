// config.rs - PipelineConfig: fw.toml plus environment overrides.
//
// Every section is optional:
//
// ```toml
// [status]          # classification rules, vanished status
// [notify]          # transport, destinations, exclusions
// [retention]       # report_days
// [normalizer]      # legal_forms, cities
// ```
//
// Secrets come from the environment only: FW_TELEGRAM_TOKEN and
// FW_TELEGRAM_CHAT_IDS (comma-separated, overrides `notify.destinations`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use fw_archive::DEFAULT_RETENTION_DAYS;
use fw_canon::NameNormalizer;
use fw_notify::{parse_destinations, NotifyConfig};
use fw_shipment::StatusRules;

use crate::error::PipelineError;

pub const CONFIG_FILE: &str = "fw.toml";
pub const ENV_TELEGRAM_TOKEN: &str = "FW_TELEGRAM_TOKEN";
pub const ENV_TELEGRAM_CHAT_IDS: &str = "FW_TELEGRAM_CHAT_IDS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionConfig {
    /// Dated report files older than this many days are deleted.
    #[serde(default = "default_report_days")]
    pub report_days: u32,
}

fn default_report_days() -> u32 {
    DEFAULT_RETENTION_DAYS
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            report_days: default_report_days(),
        }
    }
}

/// Standard file layout inside the data directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataPaths {
    pub data_dir: PathBuf,
    pub active_state: PathBuf,
    pub archive: PathBuf,
    pub digest: PathBuf,
    pub manual_entries: PathBuf,
    pub raw_payloads: PathBuf,
    pub report_dir: PathBuf,
}

impl DataPaths {
    pub fn for_data_dir(data_dir: impl AsRef<Path>) -> Self {
        let dir = data_dir.as_ref();
        Self {
            data_dir: dir.to_path_buf(),
            active_state: dir.join("last_active_state.json"),
            archive: dir.join("history_archive.json"),
            digest: dir.join("last_report_hash.txt"),
            manual_entries: dir.join("manual_entries.json"),
            raw_payloads: dir.join("raw_payloads.json"),
            report_dir: dir.to_path_buf(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub status: StatusRules,

    #[serde(default)]
    pub notify: NotifyConfig,

    #[serde(default)]
    pub retention: RetentionConfig,

    #[serde(default)]
    pub normalizer: NameNormalizer,

    #[serde(skip)]
    pub paths: DataPaths,
}

impl PipelineConfig {
    /// Parse a config file. Status rules are validated.
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let content = std::fs::read_to_string(path).map_err(|source| PipelineError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| PipelineError::Config {
            path: path.display().to_string(),
            source,
        })?;
        config.status.validate()?;
        Ok(config)
    }

    /// Load the config, falling back to defaults when the file is missing
    /// or invalid. An invalid file is logged.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "using default configuration");
                Self::default()
            }
        }
    }

    /// Config for a data directory: `<dir>/fw.toml`, standard file layout
    /// and process environment overrides.
    pub fn for_data_dir(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        let mut config = Self::load_or_default(&data_dir.join(CONFIG_FILE));
        config.paths = DataPaths::for_data_dir(data_dir);
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Apply environment overrides through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(token) = lookup(ENV_TELEGRAM_TOKEN).filter(|t| !t.trim().is_empty()) {
            self.notify.telegram_token = Some(token.trim().to_string());
        }
        if let Some(ids) = lookup(ENV_TELEGRAM_CHAT_IDS) {
            let destinations = parse_destinations(&ids);
            if !destinations.is_empty() {
                self.notify.destinations = destinations;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fw_notify::TransportKind;
    use fw_shipment::Phase;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults_and_layout() {
        let dir = tempdir().unwrap();
        let config = PipelineConfig::for_data_dir(dir.path());
        assert_eq!(config.retention.report_days, 14);
        assert_eq!(config.paths.archive, dir.path().join("history_archive.json"));
        assert_eq!(config.paths.digest, dir.path().join("last_report_hash.txt"));
        assert_eq!(config.paths.report_dir, dir.path());
    }

    #[test]
    fn sections_override_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(
            &path,
            r#"
            [status]
            vanished_status = "Выдан (автоархив)"

            [[status.rules]]
            phase = "completed"
            keywords = ["выдан"]

            [notify]
            transport = "stdout"

            [notify.exclusions]
            destination_cities = []

            [retention]
            report_days = 30

            [[normalizer.cities]]
            full = "пенза"
            short = "ПНЗ"
            "#,
        )
        .unwrap();

        let config = PipelineConfig::load(&path).unwrap();
        assert_eq!(config.status.vanished_status, "Выдан (автоархив)");
        assert_eq!(config.status.rules.len(), 1);
        assert_eq!(config.status.rules[0].phase, Phase::Completed);
        assert_eq!(config.notify.transport, TransportKind::Stdout);
        assert!(config.notify.exclusions.destination_cities.is_empty());
        assert_eq!(config.retention.report_days, 30);
        assert_eq!(config.normalizer.city(Some("Пенза")), "ПНЗ");
        assert!(!config.normalizer.legal_forms.is_empty());
    }

    #[test]
    fn invalid_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[retention]\nreport_days = \"soon\"").unwrap();
        assert!(matches!(
            PipelineConfig::load(&path),
            Err(PipelineError::Config { .. })
        ));
        assert_eq!(PipelineConfig::load_or_default(&path), PipelineConfig::default());
    }

    #[test]
    fn environment_overrides_destinations_and_token() {
        let mut config = PipelineConfig::default();
        config.notify.destinations = vec!["from-file".to_string()];
        config.apply_env(|key| match key {
            ENV_TELEGRAM_TOKEN => Some(" 123:abc ".to_string()),
            ENV_TELEGRAM_CHAT_IDS => Some("\"111\", 222".to_string()),
            _ => None,
        });
        assert_eq!(config.notify.telegram_token.as_deref(), Some("123:abc"));
        assert_eq!(config.notify.destinations, vec!["111", "222"]);
    }

    #[test]
    fn blank_environment_keeps_file_values() {
        let mut config = PipelineConfig::default();
        config.notify.destinations = vec!["from-file".to_string()];
        config.apply_env(|key| (key == ENV_TELEGRAM_CHAT_IDS).then(|| " ".to_string()));
        assert_eq!(config.notify.destinations, vec!["from-file"]);
        assert!(config.notify.telegram_token.is_none());
    }
}
