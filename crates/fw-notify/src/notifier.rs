// notifier.rs - Notifier: ready filter, dedup and dispatch.
//
//   active ──ready + exclusions──> ReadySummary ──digest──┐
//                                        │                ├─ equal and !force -> skip
//                                        │   DigestStore ─┘
//                                        └──render──> every destination
//                                                     any ok -> save digest

use chrono::{DateTime, Utc};

use fw_shipment::{ShipmentRecord, StatusRules};

use crate::config::ExclusionRules;
use crate::digest::DigestStore;
use crate::render::render_markdown;
use crate::summary::ReadySummary;
use crate::transport::{MessageFormat, MessageTransport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyOutcome {
    /// At least one destination received the summary.
    pub sent: bool,
    pub ready_count: usize,
    pub digest: String,
}

pub struct Notifier {
    rules: StatusRules,
    exclusions: ExclusionRules,
    destinations: Vec<String>,
    transport: Box<dyn MessageTransport>,
    digests: DigestStore,
}

impl Notifier {
    pub fn new(
        rules: StatusRules,
        exclusions: ExclusionRules,
        transport: Box<dyn MessageTransport>,
        digests: DigestStore,
    ) -> Self {
        Self {
            rules,
            exclusions,
            destinations: Vec::new(),
            transport,
            digests,
        }
    }

    pub fn with_destinations(mut self, destinations: Vec<String>) -> Self {
        self.destinations = destinations;
        self
    }

    pub fn summarize(&self, active: &[ShipmentRecord]) -> ReadySummary {
        ReadySummary::collect(active, &self.rules, &self.exclusions)
    }

    /// Send the ready summary unless an identical one was already delivered.
    ///
    /// `force` skips the digest comparison. Delivery failures are logged per
    /// destination; the digest is recorded only if some destination got it.
    /// A digest that cannot be recorded is logged and the next run resends.
    pub fn notify(
        &self,
        active: &[ShipmentRecord],
        force: bool,
        now: DateTime<Utc>,
    ) -> NotifyOutcome {
        let summary = self.summarize(active);
        let digest = summary.digest();
        let ready_count = summary.len();
        let mut outcome = NotifyOutcome {
            sent: false,
            ready_count,
            digest,
        };

        if !force && self.digests.load().as_deref() == Some(outcome.digest.as_str()) {
            tracing::info!(ready = ready_count, "ready set unchanged, not sending");
            return outcome;
        }
        if force {
            tracing::info!("forced send, ignoring last digest");
        }
        if self.destinations.is_empty() {
            tracing::warn!("no notification destinations configured");
            return outcome;
        }

        let text = render_markdown(&summary, now);
        let mut delivered = 0usize;
        for destination in &self.destinations {
            match self.transport.send(destination, &text, MessageFormat::Markdown) {
                Ok(()) => {
                    delivered += 1;
                    tracing::info!(
                        transport = self.transport.name(),
                        destination = %destination,
                        "summary delivered"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        transport = self.transport.name(),
                        destination = %destination,
                        error = %e,
                        "summary delivery failed"
                    );
                }
            }
        }

        if delivered == 0 {
            return outcome;
        }
        outcome.sent = true;
        if let Err(e) = self.digests.save(&outcome.digest) {
            tracing::error!(error = %e, "summary delivered but digest not recorded");
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use chrono::TimeZone;
    use fw_shipment::{Carrier, Route};
    use std::sync::{Arc, Mutex};
    use tempfile::tempdir;

    /// Records deliveries; fails for destinations listed in `failing`.
    #[derive(Clone, Default)]
    struct RecordingTransport {
        sent: Arc<Mutex<Vec<(String, String)>>>,
        failing: Vec<String>,
    }

    impl MessageTransport for RecordingTransport {
        fn name(&self) -> &str {
            "recording"
        }

        fn send(&self, destination: &str, text: &str, format: MessageFormat) -> Result<(), TransportError> {
            assert_eq!(format, MessageFormat::Markdown);
            if self.failing.iter().any(|d| d == destination) {
                return Err(TransportError::Http {
                    status: 400,
                    body: "chat not found".to_string(),
                });
            }
            self.sent
                .lock()
                .unwrap()
                .push((destination.to_string(), text.to_string()));
            Ok(())
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 2, 10, 0, 0).unwrap()
    }

    fn ready(id: &str, payment: &str) -> ShipmentRecord {
        ShipmentRecord::new(Carrier::Dellin, id)
            .with_status("Прибыл на терминал (100%)")
            .with_payment(payment)
            .with_route(Route::new("МСК", "АСТРА"))
    }

    fn notifier(transport: RecordingTransport, dir: &std::path::Path) -> Notifier {
        Notifier::new(
            StatusRules::default(),
            ExclusionRules::default(),
            Box::new(transport),
            DigestStore::new(dir.join("last_report_hash.txt")),
        )
        .with_destinations(vec!["100".to_string(), "200".to_string()])
    }

    #[test]
    fn unchanged_ready_set_is_sent_once() {
        let dir = tempdir().unwrap();
        let transport = RecordingTransport::default();
        let n = notifier(transport.clone(), dir.path());
        let active = vec![ready("D1", "Оплачено")];

        let first = n.notify(&active, false, now());
        assert!(first.sent);
        assert_eq!(first.ready_count, 1);

        let second = n.notify(&active, false, now());
        assert!(!second.sent);
        assert_eq!(second.digest, first.digest);
        assert_eq!(transport.sent.lock().unwrap().len(), 2);
    }

    #[test]
    fn payment_change_is_sent_again() {
        let dir = tempdir().unwrap();
        let n = notifier(RecordingTransport::default(), dir.path());

        assert!(n.notify(&[ready("D1", "Не оплачено")], false, now()).sent);
        assert!(n.notify(&[ready("D1", "Оплачено")], false, now()).sent);
    }

    #[test]
    fn force_ignores_digest() {
        let dir = tempdir().unwrap();
        let n = notifier(RecordingTransport::default(), dir.path());
        let active = vec![ready("D1", "Оплачено")];
        assert!(n.notify(&active, false, now()).sent);
        assert!(n.notify(&active, true, now()).sent);
    }

    #[test]
    fn failing_destination_does_not_block_others() {
        let dir = tempdir().unwrap();
        let transport = RecordingTransport {
            failing: vec!["100".to_string()],
            ..RecordingTransport::default()
        };
        let n = notifier(transport.clone(), dir.path());

        let outcome = n.notify(&[ready("D1", "Оплачено")], false, now());
        assert!(outcome.sent);
        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "200");
    }

    #[test]
    fn all_destinations_failing_keeps_digest_unsaved() {
        let dir = tempdir().unwrap();
        let transport = RecordingTransport {
            failing: vec!["100".to_string(), "200".to_string()],
            ..RecordingTransport::default()
        };
        let n = notifier(transport, dir.path());
        let active = vec![ready("D1", "Оплачено")];

        assert!(!n.notify(&active, false, now()).sent);
        assert!(DigestStore::new(dir.path().join("last_report_hash.txt")).load().is_none());
    }

    #[test]
    fn no_destinations_sends_nothing() {
        let dir = tempdir().unwrap();
        let n = Notifier::new(
            StatusRules::default(),
            ExclusionRules::default(),
            Box::new(RecordingTransport::default()),
            DigestStore::new(dir.path().join("last_report_hash.txt")),
        );
        let outcome = n.notify(&[ready("D1", "Оплачено")], false, now());
        assert!(!outcome.sent);
        assert_eq!(outcome.ready_count, 1);
    }

    #[test]
    fn empty_ready_set_sends_nothing_ready_once() {
        let dir = tempdir().unwrap();
        let transport = RecordingTransport::default();
        let n = notifier(transport.clone(), dir.path());
        let in_transit = vec![ShipmentRecord::new(Carrier::Pecom, "P1").with_status("В пути")];

        let outcome = n.notify(&in_transit, false, now());
        assert!(outcome.sent);
        assert_eq!(outcome.ready_count, 0);
        assert!(!n.notify(&in_transit, false, now()).sent);

        let sent = transport.sent.lock().unwrap();
        assert!(sent[0].1.contains("на данный момент нет"));
    }

    #[test]
    fn unrecorded_digest_still_counts_as_sent() {
        let dir = tempdir().unwrap();
        // A directory where the digest file should be makes every save fail.
        std::fs::create_dir(dir.path().join("last_report_hash.txt")).unwrap();
        let transport = RecordingTransport::default();
        let n = notifier(transport.clone(), dir.path());
        let active = vec![ready("D1", "Оплачено")];

        let outcome = n.notify(&active, false, now());
        assert!(outcome.sent);
        assert_eq!(outcome.ready_count, 1);

        // Nothing was recorded, so the same summary goes out again.
        assert!(n.notify(&active, false, now()).sent);
        assert_eq!(transport.sent.lock().unwrap().len(), 4);
    }
}
