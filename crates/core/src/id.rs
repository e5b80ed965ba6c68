//! Strongly-typed identifiers used across the billing layer.
//!
//! Provider identifiers are opaque strings minted by the billing provider
//! (e.g. `"sub_1MowQVLkdIwHu7ix"`); local record identifiers stay UUIDv7.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::BillingError;

/// Identifier of a plan/price on the billing provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanId(String);

/// Identifier of a remote customer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(String);

/// Identifier of a remote subscription.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionId(String);

/// Identifier of a remote invoice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceId(String);

/// Identifier of a coupon.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CouponId(String);

/// Identifier of a named tax rate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxRateId(String);

macro_rules! impl_provider_id {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Wrap a provider-issued identifier without validation.
            ///
            /// Prefer `FromStr` at trust boundaries; this is for values the
            /// provider itself returned.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = BillingError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if s.is_empty() {
                    return Err(BillingError::invalid_id(concat!($name, ": empty")));
                }
                Ok(Self(s.to_owned()))
            }
        }
    };
}

impl_provider_id!(PlanId, "PlanId");
impl_provider_id!(CustomerId, "CustomerId");
impl_provider_id!(SubscriptionId, "SubscriptionId");
impl_provider_id!(InvoiceId, "InvoiceId");
impl_provider_id!(CouponId, "CouponId");
impl_provider_id!(TaxRateId, "TaxRateId");

/// Identifier of a locally persisted subscription record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalSubscriptionId(Uuid);

impl LocalSubscriptionId {
    /// Create a new identifier.
    ///
    /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in tests
    /// for determinism.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for LocalSubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for LocalSubscriptionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_id_round_trips_through_from_str() {
        let id: SubscriptionId = "sub_123".parse().unwrap();
        assert_eq!(id.as_str(), "sub_123");
        assert_eq!(id.to_string(), "sub_123");
    }

    #[test]
    fn empty_provider_id_is_rejected() {
        let err = "".parse::<InvoiceId>().unwrap_err();
        match err {
            BillingError::InvalidId(msg) => assert!(msg.contains("InvoiceId")),
            other => panic!("expected InvalidId, got {other:?}"),
        }
    }

    #[test]
    fn provider_id_serializes_transparently() {
        let id = PlanId::new("price_gold");
        assert_eq!(serde_json::to_value(&id).unwrap(), "price_gold");
    }
}
