use serde::{Deserialize, Serialize};

use billkit_core::SubscriptionId;

/// Subscription status as reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteSubscriptionStatus {
    Active,
    Trialing,
    PastDue,
    Unpaid,
    Canceled,
    Incomplete,
    IncompleteExpired,
}

impl RemoteSubscriptionStatus {
    /// Statuses that mean the first payment did not go through and the
    /// remote subscription must not be kept.
    pub fn is_incomplete(&self) -> bool {
        matches!(
            self,
            RemoteSubscriptionStatus::Incomplete | RemoteSubscriptionStatus::IncompleteExpired
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RemoteSubscriptionStatus::Active => "active",
            RemoteSubscriptionStatus::Trialing => "trialing",
            RemoteSubscriptionStatus::PastDue => "past_due",
            RemoteSubscriptionStatus::Unpaid => "unpaid",
            RemoteSubscriptionStatus::Canceled => "canceled",
            RemoteSubscriptionStatus::Incomplete => "incomplete",
            RemoteSubscriptionStatus::IncompleteExpired => "incomplete_expired",
        }
    }
}

impl core::fmt::Display for RemoteSubscriptionStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of submitting a creation request to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSubscription {
    pub id: SubscriptionId,
    pub status: RemoteSubscriptionStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_incomplete_statuses_classify_as_incomplete() {
        assert!(RemoteSubscriptionStatus::Incomplete.is_incomplete());
        assert!(RemoteSubscriptionStatus::IncompleteExpired.is_incomplete());
        assert!(!RemoteSubscriptionStatus::Active.is_incomplete());
        assert!(!RemoteSubscriptionStatus::Trialing.is_incomplete());
        assert!(!RemoteSubscriptionStatus::PastDue.is_incomplete());
    }

    #[test]
    fn status_wire_names_are_snake_case() {
        assert_eq!(
            serde_json::to_value(RemoteSubscriptionStatus::IncompleteExpired).unwrap(),
            "incomplete_expired"
        );
        assert_eq!(RemoteSubscriptionStatus::PastDue.to_string(), "past_due");
    }
}
