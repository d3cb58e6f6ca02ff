//! Labelled counters for debounce, upload, and permission decisions.
//!
//! Labels are flattened into sorted key vectors to keep deterministic
//! ordering in the rendered output.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_key(labels: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut key: Vec<(String, String)> = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<Vec<(String, String)>, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value for an exact label set (0 if never touched).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Render in Prometheus text exposition format.
    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} counter", name);
        let mut rows: Vec<(String, u64)> = self
            .map
            .iter()
            .map(|r| {
                let label_str = r
                    .key()
                    .iter()
                    .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
                    .collect::<Vec<_>>()
                    .join(",");
                (label_str, r.value().load(Ordering::Relaxed))
            })
            .collect();
        rows.sort();
        for (label_str, val) in rows {
            let _ = writeln!(out, "{}{{{}}} {}", name, label_str, val);
        }
    }
}

/// Debounce event labels.
pub const EV_SUBMITTED: &str = "submitted";
pub const EV_DELIVERED: &str = "delivered";
pub const EV_SUPERSEDED: &str = "superseded";
pub const EV_CANCELED: &str = "canceled";

#[derive(Default)]
pub struct DeskMetrics {
    /// Labels: `field`, `event` (submitted/delivered/superseded/canceled).
    pub debounce_events: CounterVec,
    /// Labels: `result` (accepted/unsupported_type/too_large).
    pub upload_decisions: CounterVec,
    /// Labels: `permission`, `decision` (allow/deny).
    pub permission_checks: CounterVec,
}

impl DeskMetrics {
    pub fn debounce(&self, field: &str, event: &str) {
        self.debounce_events.inc(&[("field", field), ("event", event)]);
    }

    pub fn debounce_count(&self, field: &str, event: &str) -> u64 {
        self.debounce_events.get(&[("field", field), ("event", event)])
    }

    /// Render all counters.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.debounce_events.render("hrdesk_debounce_events_total", &mut out);
        self.upload_decisions.render("hrdesk_upload_decisions_total", &mut out);
        self.permission_checks.render("hrdesk_permission_checks_total", &mut out);
        out
    }
}
