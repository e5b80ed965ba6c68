//! Collaborator contracts consumed by the creation flow.
//!
//! These traits are the only boundary the builder needs; the wire protocol
//! behind them belongs to the gateway layer.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use billkit_core::{BillingResult, CustomerId, LocalSubscriptionId, PlanId, SubscriptionId};

use crate::request::SubscriptionCreationRequest;
use crate::status::RemoteSubscription;

/// A remote customer the provider knows about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerHandle {
    pub id: CustomerId,
}

/// Passthrough options for remote-customer creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerOptions {
    pub email: Option<String>,
    pub description: Option<String>,
    pub metadata: BTreeMap<String, String>,
}

/// The account that owns the subscription being created.
pub trait OwnerAccount {
    /// Return the owner's remote customer, creating it if necessary.
    fn ensure_remote_customer(&self, options: &CustomerOptions) -> BillingResult<CustomerHandle>;

    /// Attach a payment method token to the owner's remote customer.
    fn attach_payment_method(&self, token: &str) -> BillingResult<()>;

    /// The owner's tax percentage, if any applies.
    fn resolve_tax_percentage(&self) -> Option<f64>;
}

/// Boundary to the provider's subscription API.
pub trait SubscriptionGateway {
    fn submit(
        &self,
        request: &SubscriptionCreationRequest,
        customer: &CustomerHandle,
    ) -> BillingResult<RemoteSubscription>;

    fn cancel(&self, id: &SubscriptionId) -> BillingResult<()>;
}

/// Fields of a local subscription record at creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubscriptionRecord {
    pub name: String,
    pub remote_id: SubscriptionId,
    pub plan: PlanId,
    pub quantity: u32,
    pub trial_ends_at: Option<DateTime<Utc>>,
    /// Always `None` at creation; set later when the subscription is ended.
    pub ends_at: Option<DateTime<Utc>>,
}

/// A persisted local subscription record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionRecord {
    pub id: LocalSubscriptionId,
    pub name: String,
    pub remote_id: SubscriptionId,
    pub plan: PlanId,
    pub quantity: u32,
    pub trial_ends_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

/// Local persistence for successfully created subscriptions.
pub trait LocalSubscriptionStore {
    fn persist(&self, record: NewSubscriptionRecord) -> BillingResult<SubscriptionRecord>;
}
