use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Rendering severity of a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Danger,
    Neutral,
}

/// Which source sequence a history entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSource {
    PaymentAttempt,
    StatusTransition,
}

/// One entry in the merged invoice timeline.
///
/// Built fresh on every `history()` call and never persisted; payment
/// attempts and status transitions are mapped into this shared shape rather
/// than being mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingEvent {
    pub occurred_at: DateTime<Utc>,
    pub description: String,
    pub source: EventSource,
    pub severity: Severity,
}
