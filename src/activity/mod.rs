//! Activity history.
//!
//! An explicit, injectable container for the most recent analyses. The
//! owner creates it, passes it where needed and decides whether to persist
//! it. The 10-entry cap is enforced here, newest first.

mod store;

pub use store::{load_history, save_history};

use crate::constants::history::CAPACITY;
use crate::diagnostic::Diagnosis;
use crate::risk::{PredictionAnalysis, RiskLevel, worst_of};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Kind of recorded activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    /// Environment forecast analysis.
    Prediction,
    /// Droppings photo diagnosis.
    Diagnostic,
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Self::Prediction => "prediction",
            Self::Diagnostic => "diagnostic",
        })
    }
}

/// Payload of an activity entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityRecord {
    /// A forecast analysis.
    Prediction(PredictionAnalysis),
    /// A photo diagnosis.
    Diagnostic(Diagnosis),
}

impl ActivityRecord {
    /// Kind of this record.
    pub const fn kind(&self) -> ActivityKind {
        match self {
            Self::Prediction(_) => ActivityKind::Prediction,
            Self::Diagnostic(_) => ActivityKind::Diagnostic,
        }
    }

    /// Title shown in the history list.
    pub fn title(&self) -> String {
        match self {
            Self::Prediction(analysis) => analysis.title(),
            Self::Diagnostic(diagnosis) => diagnosis.title(),
        }
    }

    /// Severity carried by the record.
    pub const fn level(&self) -> RiskLevel {
        match self {
            Self::Prediction(analysis) => analysis.global_risk,
            Self::Diagnostic(diagnosis) => diagnosis.severity,
        }
    }
}

/// One history entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// Monotonic identifier.
    pub id: u64,
    /// When the entry was recorded.
    pub timestamp: DateTime<Utc>,
    /// Kind of the recorded result.
    pub kind: ActivityKind,
    /// Display title.
    pub title: String,
    /// Recorded result.
    pub result: ActivityRecord,
}

/// Change notification sent to subscribers.
#[derive(Debug, Clone, Copy)]
pub enum ActivityEvent<'a> {
    /// A new entry was added (possibly evicting the oldest).
    Added(&'a ActivityEntry),
    /// The history was emptied.
    Cleared,
}

/// Handle returned by [`ActivityLog::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn Fn(&ActivityEvent<'_>) + Send>;

/// Worst current state of the flock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlockStatus {
    /// Worst of the last forecast and the last diagnosis.
    pub level: RiskLevel,
    /// Banner label (OPTIMAL, ATTENTION, DANGER, CRITIQUE).
    pub label: &'static str,
}

/// Capped, newest-first activity history with change subscribers.
#[derive(Default)]
pub struct ActivityLog {
    entries: VecDeque<ActivityEntry>,
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl std::fmt::Debug for ActivityLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivityLog")
            .field("entries", &self.entries)
            .field("next_id", &self.next_id)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl ActivityLog {
    /// Empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a history from entries ordered newest first.
    ///
    /// Entries beyond the capacity are dropped.
    pub fn from_entries(entries: Vec<ActivityEntry>) -> Self {
        let mut entries: VecDeque<_> = entries.into();
        entries.truncate(CAPACITY);
        let next_id = entries.iter().map(|e| e.id + 1).max().unwrap_or(0);
        Self {
            entries,
            next_id,
            ..Self::default()
        }
    }

    /// Record a result now.
    pub fn append(&mut self, record: ActivityRecord) -> &ActivityEntry {
        self.append_at(record, Utc::now())
    }

    /// Record a result with an explicit timestamp.
    pub fn append_at(&mut self, record: ActivityRecord, timestamp: DateTime<Utc>) -> &ActivityEntry {
        let entry = ActivityEntry {
            id: self.next_id,
            timestamp,
            kind: record.kind(),
            title: record.title(),
            result: record,
        };
        self.next_id += 1;

        self.entries.push_front(entry);
        self.entries.truncate(CAPACITY);

        let event = ActivityEvent::Added(&self.entries[0]);
        for (_, subscriber) in &self.subscribers {
            subscriber(&event);
        }
        &self.entries[0]
    }

    /// Record a forecast analysis.
    pub fn record_prediction(&mut self, analysis: PredictionAnalysis) -> &ActivityEntry {
        self.append(ActivityRecord::Prediction(analysis))
    }

    /// Record a photo diagnosis.
    pub fn record_diagnostic(&mut self, diagnosis: Diagnosis) -> &ActivityEntry {
        self.append(ActivityRecord::Diagnostic(diagnosis))
    }

    /// Entries, newest first.
    pub fn history(&self) -> impl Iterator<Item = &ActivityEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent entry of a kind.
    pub fn latest_of_type(&self, kind: ActivityKind) -> Option<&ActivityEntry> {
        self.entries.iter().find(|e| e.kind == kind)
    }

    /// Most recent forecast analysis still in the history.
    pub fn last_prediction(&self) -> Option<&PredictionAnalysis> {
        match self.latest_of_type(ActivityKind::Prediction).map(|e| &e.result) {
            Some(ActivityRecord::Prediction(analysis)) => Some(analysis),
            _ => None,
        }
    }

    /// Most recent diagnosis still in the history.
    pub fn last_diagnostic(&self) -> Option<&Diagnosis> {
        match self.latest_of_type(ActivityKind::Diagnostic).map(|e| &e.result) {
            Some(ActivityRecord::Diagnostic(diagnosis)) => Some(diagnosis),
            _ => None,
        }
    }

    /// Worst of the last forecast's global risk and the last diagnosis.
    pub fn flock_status(&self) -> FlockStatus {
        let level = worst_of(
            self.last_prediction()
                .map(|a| a.global_risk)
                .into_iter()
                .chain(self.last_diagnostic().map(|d| d.severity)),
        );
        FlockStatus {
            level,
            label: level.status_label(),
        }
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        for (_, subscriber) in &self.subscribers {
            subscriber(&ActivityEvent::Cleared);
        }
    }

    /// Register a change callback.
    pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: Fn(&ActivityEvent<'_>) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Remove a callback. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }
}
