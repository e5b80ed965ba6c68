use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use billkit_core::{PlanId, TaxRateId};

/// Number of days an invoiced subscription gets to pay when the caller does
/// not specify a window.
pub const DEFAULT_DAYS_UNTIL_DUE: u32 = 7;

/// Trial resolution for a subscription under construction.
///
/// Modeled as a discriminated choice rather than a timestamp plus a flag so
/// that precedence is carried by the type: `Skip` is sticky, and trial-value
/// setters leave it in place once set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrialPolicy {
    /// No trial; the subscription bills immediately on its normal cycle.
    #[default]
    NoTrial,
    /// Trial runs until the given instant.
    Until(DateTime<Utc>),
    /// Any trial configured on the plan is skipped; trial ends "now".
    Skip,
}

impl TrialPolicy {
    pub fn is_skip(&self) -> bool {
        matches!(self, TrialPolicy::Skip)
    }
}

/// How the provider collects payment for the subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingMode {
    /// Charge the customer's default payment method on each cycle.
    ChargeAutomatically,
    /// Email an invoice and wait for payment within the due window.
    SendInvoice { days_until_due: u32 },
}

impl Default for BillingMode {
    fn default() -> Self {
        BillingMode::ChargeAutomatically
    }
}

/// Mutable accumulator for one subscription build session.
///
/// Consumed exactly once by the builder; setters do not validate eagerly,
/// validation happens at `build()`.
#[derive(Debug, Clone)]
pub struct SubscriptionConfiguration {
    name: String,
    plan: PlanId,
    quantity: u32,
    trial: TrialPolicy,
    billing_cycle_anchor: Option<DateTime<Utc>>,
    coupon: Option<String>,
    metadata: BTreeMap<String, String>,
    billing_mode: BillingMode,
    tax_rates: Vec<TaxRateId>,
}

impl SubscriptionConfiguration {
    pub fn new(name: impl Into<String>, plan: PlanId) -> Self {
        Self {
            name: name.into(),
            plan,
            quantity: 1,
            trial: TrialPolicy::default(),
            billing_cycle_anchor: None,
            coupon: None,
            metadata: BTreeMap::new(),
            billing_mode: BillingMode::default(),
            tax_rates: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn plan(&self) -> &PlanId {
        &self.plan
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn trial(&self) -> TrialPolicy {
        self.trial
    }

    pub fn billing_cycle_anchor(&self) -> Option<DateTime<Utc>> {
        self.billing_cycle_anchor
    }

    pub fn coupon(&self) -> Option<&str> {
        self.coupon.as_deref()
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    pub fn billing_mode(&self) -> BillingMode {
        self.billing_mode
    }

    /// Accumulated tax-rate identifiers, in insertion order.
    ///
    /// Duplicates are preserved as provided. These are carried on the
    /// configuration but not serialized into the creation request; the
    /// request sends the single resolved legacy percentage instead.
    pub fn tax_rates(&self) -> &[TaxRateId] {
        &self.tax_rates
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    /// Set a trial-end instant unless the trial is already being skipped.
    pub(crate) fn set_trial_until(&mut self, until: DateTime<Utc>) {
        if !self.trial.is_skip() {
            self.trial = TrialPolicy::Until(until);
        }
    }

    /// Skip the trial; overrides any trial instant, past or future.
    pub(crate) fn set_skip_trial(&mut self) {
        self.trial = TrialPolicy::Skip;
    }

    pub(crate) fn set_billing_mode(&mut self, mode: BillingMode) {
        self.billing_mode = mode;
    }

    pub(crate) fn set_billing_cycle_anchor(&mut self, anchor: DateTime<Utc>) {
        self.billing_cycle_anchor = Some(anchor);
    }

    pub(crate) fn set_coupon(&mut self, code: impl Into<String>) {
        self.coupon = Some(code.into());
    }

    pub(crate) fn merge_metadata(&mut self, metadata: BTreeMap<String, String>) {
        self.metadata.extend(metadata);
    }

    pub(crate) fn push_tax_rate(&mut self, rate: TaxRateId) {
        self.tax_rates.push(rate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn trial_until_after_skip_leaves_skip_in_place() {
        let mut config = SubscriptionConfiguration::new("default", PlanId::new("price_gold"));
        config.set_skip_trial();
        config.set_trial_until(utc("2024-06-01T00:00:00Z"));
        assert_eq!(config.trial(), TrialPolicy::Skip);
    }

    #[test]
    fn skip_after_trial_until_overrides_it() {
        let mut config = SubscriptionConfiguration::new("default", PlanId::new("price_gold"));
        config.set_trial_until(utc("2024-06-01T00:00:00Z"));
        config.set_skip_trial();
        assert_eq!(config.trial(), TrialPolicy::Skip);
    }

    #[test]
    fn later_trial_until_replaces_earlier_one() {
        let mut config = SubscriptionConfiguration::new("default", PlanId::new("price_gold"));
        config.set_trial_until(utc("2024-06-01T00:00:00Z"));
        config.set_trial_until(utc("2024-07-01T00:00:00Z"));
        assert_eq!(
            config.trial(),
            TrialPolicy::Until(utc("2024-07-01T00:00:00Z"))
        );
    }

    #[test]
    fn tax_rates_preserve_order_and_duplicates() {
        let mut config = SubscriptionConfiguration::new("default", PlanId::new("price_gold"));
        config.push_tax_rate(TaxRateId::new("txr_a"));
        config.push_tax_rate(TaxRateId::new("txr_b"));
        config.push_tax_rate(TaxRateId::new("txr_a"));
        let ids: Vec<&str> = config.tax_rates().iter().map(|r| r.as_str()).collect();
        assert_eq!(ids, ["txr_a", "txr_b", "txr_a"]);
    }
}
