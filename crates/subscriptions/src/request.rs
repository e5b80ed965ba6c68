//! The immutable creation request produced by the builder.
//!
//! The provider distinguishes "field absent" from "field explicitly null",
//! so every unset optional is omitted from the serialized form entirely.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use billkit_core::PlanId;

/// Trial-end directive sent to the provider.
///
/// Serializes as the literal string `"now"` (skip any plan trial) or as an
/// absolute epoch-second timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialEndDirective {
    Now,
    At(DateTime<Utc>),
}

impl Serialize for TrialEndDirective {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            TrialEndDirective::Now => serializer.serialize_str("now"),
            TrialEndDirective::At(ts) => serializer.serialize_i64(ts.timestamp()),
        }
    }
}

/// How the provider collects payment, on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionMethod {
    ChargeAutomatically,
    SendInvoice,
}

/// Immutable output of a build session.
///
/// Optional fields that were never configured are skipped during
/// serialization, never emitted as null.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscriptionCreationRequest {
    pub plan: PlanId,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial_end: Option<TrialEndDirective>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, String>>,
    pub collection_method: CollectionMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_until_due: Option<u32>,
    /// Single resolved tax percentage (legacy provider field).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_percent: Option<f64>,
    /// Epoch seconds; normalized from whatever the caller anchored on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_cycle_anchor: Option<i64>,
}
