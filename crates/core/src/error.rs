//! Billing error model.

use thiserror::Error;

use crate::id::SubscriptionId;

/// Result type used across the billing layer.
pub type BillingResult<T> = Result<T, BillingError>;

/// Billing-level error.
///
/// Keep this focused on deterministic billing failures (configuration,
/// creation outcomes, identifier parsing). Transport failures surface through
/// `Provider` as opaque messages.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BillingError {
    /// A builder configuration failed validation at build time.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The provider created the subscription in an incomplete state.
    ///
    /// The remote subscription has already been cancelled when this is
    /// raised; id and status are kept for diagnostics.
    #[error("subscription creation failed: remote {subscription_id} is {status}")]
    CreationFailed {
        subscription_id: SubscriptionId,
        status: String,
    },

    /// A collaborator (gateway, payment source) reported a failure.
    #[error("provider error: {0}")]
    Provider(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl BillingError {
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    pub fn creation_failed(subscription_id: SubscriptionId, status: impl Into<String>) -> Self {
        Self::CreationFailed {
            subscription_id,
            status: status.into(),
        }
    }

    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
