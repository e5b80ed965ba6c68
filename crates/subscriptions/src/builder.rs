//! Subscription request builder and creation flow.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use billkit_core::{BillingError, BillingResult, Clock, PlanId, TaxRateId};

use crate::config::{BillingMode, SubscriptionConfiguration, TrialPolicy, DEFAULT_DAYS_UNTIL_DUE};
use crate::request::{CollectionMethod, SubscriptionCreationRequest, TrialEndDirective};
use crate::traits::{
    CustomerOptions, LocalSubscriptionStore, NewSubscriptionRecord, OwnerAccount,
    SubscriptionGateway, SubscriptionRecord,
};

/// Accumulates subscription parameters and resolves them into one creation
/// request.
///
/// Setters never validate; `build()` does. Each builder is single-owner and
/// single-use: `create()` consumes it.
pub struct SubscriptionRequestBuilder<'a> {
    owner: &'a dyn OwnerAccount,
    clock: &'a dyn Clock,
    config: SubscriptionConfiguration,
}

impl<'a> SubscriptionRequestBuilder<'a> {
    pub fn new(
        owner: &'a dyn OwnerAccount,
        clock: &'a dyn Clock,
        name: impl Into<String>,
        plan: PlanId,
    ) -> Self {
        Self {
            owner,
            clock,
            config: SubscriptionConfiguration::new(name, plan),
        }
    }

    pub fn configuration(&self) -> &SubscriptionConfiguration {
        &self.config
    }

    /// Set the subscribed quantity. Range checks beyond positivity are the
    /// gateway's concern.
    pub fn quantity(mut self, quantity: u32) -> Self {
        self.config.set_quantity(quantity);
        self
    }

    /// Trial for `days` days from now.
    ///
    /// The trial end is computed at call time, not at build time, so two
    /// `build()` calls on an unmodified builder produce identical requests.
    pub fn trial_days(mut self, days: i64) -> Self {
        let until = self.clock.now() + Duration::days(days);
        self.config.set_trial_until(until);
        self
    }

    /// Trial until an explicit instant.
    pub fn trial_until(mut self, until: DateTime<Utc>) -> Self {
        self.config.set_trial_until(until);
        self
    }

    /// Skip any trial configured on the plan. Wins over `trial_days` /
    /// `trial_until` regardless of call order.
    pub fn skip_trial(mut self) -> Self {
        self.config.set_skip_trial();
        self
    }

    /// Bill by emailed invoice with the default due window.
    pub fn send_invoices(self) -> Self {
        self.send_invoices_after(DEFAULT_DAYS_UNTIL_DUE)
    }

    /// Bill by emailed invoice, due `days_until_due` days after issue.
    ///
    /// Last billing-mode call wins; switching modes is not an error.
    pub fn send_invoices_after(mut self, days_until_due: u32) -> Self {
        self.config
            .set_billing_mode(BillingMode::SendInvoice { days_until_due });
        self
    }

    /// Charge the default payment method automatically (the default mode).
    pub fn charge_automatically(mut self) -> Self {
        self.config.set_billing_mode(BillingMode::ChargeAutomatically);
        self
    }

    /// Anchor the billing cycle on the given instant.
    pub fn anchor_billing_cycle_on(mut self, anchor: DateTime<Utc>) -> Self {
        self.config.set_billing_cycle_anchor(anchor);
        self
    }

    /// Anchor the billing cycle on a calendar date (midnight UTC).
    pub fn anchor_billing_cycle_on_date(self, date: NaiveDate) -> Self {
        let anchor = date.and_time(chrono::NaiveTime::MIN).and_utc();
        self.anchor_billing_cycle_on(anchor)
    }

    pub fn with_coupon(mut self, code: impl Into<String>) -> Self {
        self.config.set_coupon(code);
        self
    }

    /// Merge metadata entries; later calls overwrite colliding keys.
    pub fn with_metadata(mut self, metadata: BTreeMap<String, String>) -> Self {
        self.config.merge_metadata(metadata);
        self
    }

    /// Append a tax-rate identifier. Repeatable; order and duplicates are
    /// preserved on the configuration.
    pub fn with_tax_rate(mut self, rate: TaxRateId) -> Self {
        self.config.push_tax_rate(rate);
        self
    }

    /// Resolve the accumulated configuration into one creation request.
    ///
    /// Unset optional fields are omitted from the request entirely; the
    /// provider treats presence and absence as semantically different.
    pub fn build(&self) -> BillingResult<SubscriptionCreationRequest> {
        if self.config.plan().as_str().is_empty() {
            return Err(BillingError::invalid_configuration("plan identifier is empty"));
        }
        if self.config.quantity() == 0 {
            return Err(BillingError::invalid_configuration("quantity must be at least 1"));
        }

        let (collection_method, days_until_due) = match self.config.billing_mode() {
            BillingMode::ChargeAutomatically => (CollectionMethod::ChargeAutomatically, None),
            BillingMode::SendInvoice { days_until_due } => {
                if days_until_due == 0 {
                    return Err(BillingError::invalid_configuration(
                        "send_invoice mode needs a due window of at least one day",
                    ));
                }
                (CollectionMethod::SendInvoice, Some(days_until_due))
            }
        };

        let trial_end = match self.config.trial() {
            TrialPolicy::Skip => Some(TrialEndDirective::Now),
            TrialPolicy::Until(until) => Some(TrialEndDirective::At(until)),
            TrialPolicy::NoTrial => None,
        };

        let metadata = if self.config.metadata().is_empty() {
            None
        } else {
            Some(self.config.metadata().clone())
        };

        Ok(SubscriptionCreationRequest {
            plan: self.config.plan().clone(),
            quantity: self.config.quantity(),
            trial_end,
            coupon: self.config.coupon().map(str::to_owned),
            metadata,
            collection_method,
            days_until_due,
            tax_percent: self.owner.resolve_tax_percentage(),
            billing_cycle_anchor: self.config.billing_cycle_anchor().map(|a| a.timestamp()),
        })
    }

    /// Create the subscription remotely and persist the local record.
    ///
    /// Invariant: an incomplete remote subscription is cancelled before the
    /// error is surfaced, never left dangling on the provider.
    pub fn create(
        self,
        gateway: &dyn SubscriptionGateway,
        store: &dyn LocalSubscriptionStore,
        payment_token: Option<&str>,
        options: &CustomerOptions,
    ) -> BillingResult<SubscriptionRecord> {
        let customer = self.owner.ensure_remote_customer(options)?;
        if let Some(token) = payment_token {
            self.owner.attach_payment_method(token)?;
        }

        let request = self.build()?;
        tracing::info!(
            "submitting subscription '{}' on plan {} for customer {}",
            self.config.name(),
            request.plan,
            customer.id
        );
        let remote = gateway.submit(&request, &customer)?;

        if remote.status.is_incomplete() {
            tracing::warn!(
                "remote subscription {} came back {}, cancelling",
                remote.id,
                remote.status
            );
            gateway.cancel(&remote.id)?;
            return Err(BillingError::creation_failed(remote.id, remote.status.as_str()));
        }

        let trial_ends_at = match self.config.trial() {
            TrialPolicy::Until(until) => Some(until),
            TrialPolicy::NoTrial | TrialPolicy::Skip => None,
        };

        store.persist(NewSubscriptionRecord {
            name: self.config.name().to_owned(),
            remote_id: remote.id,
            plan: self.config.plan().clone(),
            quantity: self.config.quantity(),
            trial_ends_at,
            ends_at: None,
        })
    }
}
