//! `billkit-subscriptions` — subscription request building and creation.
//!
//! A [`SubscriptionRequestBuilder`] accumulates optional billing parameters
//! (trial, quantity, coupon, tax, billing mode, metadata, anchor date) and
//! resolves them into one sparse [`SubscriptionCreationRequest`], then drives
//! the creation flow against the gateway: an incomplete remote subscription
//! is cancelled and reported, a live one is persisted locally.

pub mod builder;
pub mod config;
pub mod request;
pub mod status;
pub mod traits;

pub use builder::SubscriptionRequestBuilder;
pub use config::{BillingMode, SubscriptionConfiguration, TrialPolicy, DEFAULT_DAYS_UNTIL_DUE};
pub use request::{CollectionMethod, SubscriptionCreationRequest, TrialEndDirective};
pub use status::{RemoteSubscription, RemoteSubscriptionStatus};
pub use traits::{
    CustomerHandle, CustomerOptions, LocalSubscriptionStore, NewSubscriptionRecord, OwnerAccount,
    SubscriptionGateway, SubscriptionRecord,
};
