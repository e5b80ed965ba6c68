//! Read-only view over a provider invoice snapshot.

use chrono::{DateTime, TimeZone};

use billkit_core::{BillingResult, Clock, CouponId, InvoiceId};

use crate::events::{BillingEvent, EventSource, Severity};
use crate::snapshot::{CouponDescriptor, InvoiceLineItem, LineItemKind, ProviderInvoiceSnapshot};
use crate::traits::{CurrencyFormatter, PaymentAttemptSource};

/// Wraps a [`ProviderInvoiceSnapshot`] and exposes derived financial values
/// and a unified history. Never mutates the snapshot; safe for concurrent
/// reads.
///
/// `raw_*` accessors return minor currency units; their formatted
/// counterparts delegate display to the caller's [`CurrencyFormatter`].
#[derive(Debug, Clone, Copy)]
pub struct InvoiceView<'a> {
    snapshot: &'a ProviderInvoiceSnapshot,
}

impl<'a> InvoiceView<'a> {
    pub fn new(snapshot: &'a ProviderInvoiceSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn snapshot(&self) -> &ProviderInvoiceSnapshot {
        self.snapshot
    }

    pub fn id(&self) -> &InvoiceId {
        &self.snapshot.id
    }

    pub fn number(&self) -> Option<&str> {
        self.snapshot.number.as_deref()
    }

    pub fn currency(&self) -> &str {
        &self.snapshot.currency
    }

    /// Total including any starting balance the provider already applied.
    pub fn raw_total(&self) -> i64 {
        self.snapshot.total + self.raw_starting_balance()
    }

    /// Starting balance; negative when it represents account credit.
    pub fn raw_starting_balance(&self) -> i64 {
        self.snapshot.starting_balance.unwrap_or(0)
    }

    pub fn has_starting_balance(&self) -> bool {
        self.raw_starting_balance() < 0
    }

    pub fn raw_subtotal(&self) -> i64 {
        self.snapshot.subtotal
    }

    pub fn raw_tax(&self) -> i64 {
        self.snapshot.tax.unwrap_or(0)
    }

    pub fn has_tax(&self) -> bool {
        self.raw_tax() > 0
    }

    /// Credit applied via credit notes, before and after payment.
    pub fn raw_credit_balance(&self) -> i64 {
        self.snapshot.pre_payment_credit_notes_amount.unwrap_or(0)
            + self.snapshot.post_payment_credit_notes_amount.unwrap_or(0)
    }

    pub fn has_credit_balance(&self) -> bool {
        self.raw_credit_balance() > 0
    }

    /// Whether a discount actually changed the amount owed.
    pub fn has_discount(&self) -> bool {
        self.snapshot.subtotal > 0
            && self.snapshot.subtotal != self.snapshot.total
            && self.snapshot.discount.is_some()
    }

    /// Discount as a uniform monetary figure, derived from the totals rather
    /// than the descriptor, which may express percent-off or amount-off.
    pub fn raw_discount_amount(&self) -> i64 {
        self.snapshot.subtotal + self.raw_tax() - self.snapshot.total
    }

    pub fn coupon(&self) -> Option<&CouponDescriptor> {
        self.snapshot.discount.as_ref().map(|d| &d.coupon)
    }

    pub fn coupon_id(&self) -> Option<&CouponId> {
        self.coupon().map(|c| &c.id)
    }

    pub fn discount_is_percentage(&self) -> bool {
        self.coupon().is_some_and(|c| c.percent_off.is_some())
    }

    pub fn percent_off(&self) -> f64 {
        self.coupon().and_then(|c| c.percent_off).unwrap_or(0.0)
    }

    pub fn amount_off(&self) -> i64 {
        self.coupon().and_then(|c| c.amount_off).unwrap_or(0)
    }

    pub fn total(&self, formatter: &dyn CurrencyFormatter) -> String {
        formatter.format(self.raw_total(), &self.snapshot.currency)
    }

    pub fn subtotal(&self, formatter: &dyn CurrencyFormatter) -> String {
        formatter.format(self.raw_subtotal(), &self.snapshot.currency)
    }

    pub fn tax(&self, formatter: &dyn CurrencyFormatter) -> String {
        formatter.format(self.raw_tax(), &self.snapshot.currency)
    }

    pub fn starting_balance(&self, formatter: &dyn CurrencyFormatter) -> String {
        formatter.format(self.raw_starting_balance(), &self.snapshot.currency)
    }

    pub fn discount(&self, formatter: &dyn CurrencyFormatter) -> String {
        formatter.format(self.raw_discount_amount(), &self.snapshot.currency)
    }

    /// Creation instant in the caller's timezone.
    pub fn date<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        self.snapshot
            .status_transitions
            .created_at
            .map(|ts| ts.with_timezone(tz))
    }

    /// Due instant in the caller's timezone.
    pub fn due_date<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        self.snapshot.due_date.map(|ts| ts.with_timezone(tz))
    }

    /// An invoice is past due once it has a due date, is unpaid, and either
    /// collection was already attempted or the due date has passed in the
    /// given timezone.
    pub fn past_due<Tz: TimeZone>(&self, clock: &dyn Clock, tz: &Tz) -> bool {
        let Some(due) = self.snapshot.due_date else {
            return false;
        };
        if self.snapshot.paid {
            return false;
        }
        (self.snapshot.attempted && self.snapshot.attempt_count > 0)
            || due.with_timezone(tz) < clock.now().with_timezone(tz)
    }

    /// Lines of the given kind, in source order.
    pub fn line_items_by_kind(&self, kind: LineItemKind) -> Vec<&InvoiceLineItem> {
        self.snapshot
            .lines
            .iter()
            .filter(|line| line.kind == kind)
            .collect()
    }

    pub fn invoice_items(&self) -> Vec<&InvoiceLineItem> {
        self.line_items_by_kind(LineItemKind::InvoiceItem)
    }

    pub fn subscriptions(&self) -> Vec<&InvoiceLineItem> {
        self.line_items_by_kind(LineItemKind::Subscription)
    }

    /// Merge payment attempts and status transitions into one classified
    /// timeline, newest first.
    ///
    /// Payment events are emitted before transition events so that the
    /// stable sort keeps them first on timestamp ties.
    pub fn history(&self, source: &dyn PaymentAttemptSource) -> BillingResult<Vec<BillingEvent>> {
        let mut events = Vec::new();

        let attempts = source.list_for_customer(&self.snapshot.customer)?;
        for attempt in attempts
            .iter()
            .filter(|a| a.invoice_id.as_ref() == Some(&self.snapshot.id))
        {
            if attempt.charges.is_empty() {
                let severity = if attempt.status == "requires_payment_method" {
                    Severity::Danger
                } else {
                    Severity::Neutral
                };
                events.push(BillingEvent {
                    occurred_at: attempt.created_at,
                    description: format!("Payment {}", humanize(&attempt.status)),
                    source: EventSource::PaymentAttempt,
                    severity,
                });
            } else {
                for charge in &attempt.charges {
                    let (description, severity) = if charge.status == "failed" {
                        ("Payment attempt failed".to_owned(), Severity::Danger)
                    } else {
                        (format!("Payment {}", humanize(&charge.status)), Severity::Neutral)
                    };
                    events.push(BillingEvent {
                        occurred_at: charge.created_at,
                        description,
                        source: EventSource::PaymentAttempt,
                        severity,
                    });
                }
            }
        }

        // Reverse declaration order keeps the pre-sort output stable.
        for &(name, occurred_at) in self.snapshot.status_transitions.entries().iter().rev() {
            let Some(occurred_at) = occurred_at else {
                continue;
            };
            // Paid invoices show "created" instead of a redundant "finalized".
            let name = if name == "finalized_at" && self.snapshot.paid {
                "created_at"
            } else {
                name
            };
            let severity = match name {
                "paid_at" if self.snapshot.paid => Severity::Success,
                "voided_at" | "marked_uncollectible_at" => Severity::Warning,
                _ => Severity::Neutral,
            };
            let label = humanize(name.strip_suffix("_at").unwrap_or(name));
            events.push(BillingEvent {
                occurred_at,
                description: format!("Invoice was {label}"),
                source: EventSource::StatusTransition,
                severity,
            });
        }

        events.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
        Ok(events)
    }
}

fn humanize(status: &str) -> String {
    status.replace('_', " ")
}
