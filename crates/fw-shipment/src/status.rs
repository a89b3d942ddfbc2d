// status.rs - Keyword-based lifecycle classification of carrier statuses.
//
// Carriers never expose enumerated status codes we can rely on, only
// free-text strings in their own vocabulary. A shipment's lifecycle phase is
// therefore decided by case-insensitive substring matching against an
// ordered list of rules. The list is configuration: a new carrier vocabulary
// is a new keyword, not a code change.
//
// Substring matching means "выдан" also matches "выдана" and "невыдан".
// TODO: whole-word matching once a carrier sends a status that trips this.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ShipmentError;

/// Lifecycle phase a status string can be classified into.
///
/// Statuses matching no rule are plain "in transit".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Delivered, issued, completed or archived. Leaves the active set.
    Completed,
    /// Arrived and available for pickup.
    Ready,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Completed => write!(f, "completed"),
            Phase::Ready => write!(f, "ready"),
        }
    }
}

/// One phase and the keywords that select it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRule {
    pub phase: Phase,
    pub keywords: Vec<String>,
}

impl ClassificationRule {
    pub fn new(phase: Phase, keywords: &[&str]) -> Self {
        Self {
            phase,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Whether any keyword occurs in the (already lowercased) status.
    fn matches_lowered(&self, lowered: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| lowered.contains(&keyword.to_lowercase()))
    }
}

/// Ordered classification rules plus the status given to vanished shipments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRules {
    /// Evaluated in order; the first matching rule decides the phase.
    #[serde(default = "default_rules")]
    pub rules: Vec<ClassificationRule>,

    /// Status written onto a shipment that disappeared from its carrier's
    /// response between two polls.
    #[serde(default = "default_vanished_status")]
    pub vanished_status: String,
}

fn default_rules() -> Vec<ClassificationRule> {
    vec![
        ClassificationRule::new(
            Phase::Completed,
            &[
                "выдан",
                "доставлен",
                "завершен",
                "архив",
                "выдача",
                "получен",
                "delivered",
                "completed",
                "archived",
            ],
        ),
        ClassificationRule::new(
            Phase::Ready,
            &[
                "прибыл",
                "готов",
                "выдаче",
                "терминал",
                "хранение",
                "складе",
                "arrived",
                "ready",
            ],
        ),
    ]
}

fn default_vanished_status() -> String {
    "auto-archived — vanished from source".to_string()
}

impl Default for StatusRules {
    fn default() -> Self {
        Self {
            rules: default_rules(),
            vanished_status: default_vanished_status(),
        }
    }
}

impl StatusRules {
    /// First phase whose rule matches `status`, if any.
    pub fn classify(&self, status: &str) -> Option<Phase> {
        let lowered = status.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches_lowered(&lowered))
            .map(|rule| rule.phase)
    }

    /// Whether `status` contains any keyword of any rule for `phase`,
    /// regardless of rule order.
    pub fn matches(&self, status: &str, phase: Phase) -> bool {
        let lowered = status.to_lowercase();
        self.rules
            .iter()
            .filter(|rule| rule.phase == phase)
            .any(|rule| rule.matches_lowered(&lowered))
    }

    pub fn is_completed(&self, status: &str) -> bool {
        self.matches(status, Phase::Completed)
    }

    pub fn is_ready(&self, status: &str) -> bool {
        self.classify(status) == Some(Phase::Ready)
    }

    /// Reject rule sets that cannot detect completion or that contain an
    /// empty keyword.
    pub fn validate(&self) -> Result<(), ShipmentError> {
        for rule in &self.rules {
            if rule.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(ShipmentError::EmptyKeyword {
                    phase: rule.phase.to_string(),
                });
            }
        }
        let has_completed = self
            .rules
            .iter()
            .any(|rule| rule.phase == Phase::Completed && !rule.keywords.is_empty());
        if !has_completed {
            return Err(ShipmentError::MissingPhase {
                phase: Phase::Completed.to_string(),
            });
        }
        Ok(())
    }
}
