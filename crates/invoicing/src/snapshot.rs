//! Raw provider invoice snapshot.
//!
//! Received from the gateway and wrapped read-only by the view. Provider
//! snapshots legitimately omit fields depending on invoice state, so every
//! optional deserializes leniently instead of failing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use billkit_core::{CouponId, CustomerId, InvoiceId};

/// Named lifecycle timestamps on an invoice.
///
/// Field declaration order matters: history assembly iterates these in
/// reverse declaration order, which keeps the pre-sort output stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusTransitions {
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub finalized_at: Option<DateTime<Utc>>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub paid_at: Option<DateTime<Utc>>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub voided_at: Option<DateTime<Utc>>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub marked_uncollectible_at: Option<DateTime<Utc>>,
}

impl StatusTransitions {
    /// Transition field names paired with their timestamps, in declaration
    /// order.
    pub fn entries(&self) -> [(&'static str, Option<DateTime<Utc>>); 5] {
        [
            ("created_at", self.created_at),
            ("finalized_at", self.finalized_at),
            ("paid_at", self.paid_at),
            ("voided_at", self.voided_at),
            ("marked_uncollectible_at", self.marked_uncollectible_at),
        ]
    }
}

/// Coupon attached to the invoice's discount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponDescriptor {
    pub id: CouponId,
    #[serde(default)]
    pub percent_off: Option<f64>,
    #[serde(default)]
    pub amount_off: Option<i64>,
}

/// Discount descriptor as the provider reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountDescriptor {
    pub coupon: CouponDescriptor,
}

/// Line-item discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineItemKind {
    InvoiceItem,
    Subscription,
}

/// One invoice line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLineItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: LineItemKind,
    /// Amount in minor currency units.
    pub amount: i64,
    pub currency: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Read-only invoice value received from the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderInvoiceSnapshot {
    pub id: InvoiceId,
    pub customer: CustomerId,
    #[serde(default)]
    pub number: Option<String>,
    pub currency: String,
    /// Minor currency units, before discount and tax.
    #[serde(default)]
    pub subtotal: i64,
    #[serde(default)]
    pub tax: Option<i64>,
    /// Minor currency units, after discount and tax.
    #[serde(default)]
    pub total: i64,
    /// Negative when it represents account credit applied to this invoice.
    #[serde(default)]
    pub starting_balance: Option<i64>,
    #[serde(default)]
    pub pre_payment_credit_notes_amount: Option<i64>,
    #[serde(default)]
    pub post_payment_credit_notes_amount: Option<i64>,
    #[serde(default)]
    pub discount: Option<DiscountDescriptor>,
    #[serde(default)]
    pub lines: Vec<InvoiceLineItem>,
    #[serde(default)]
    pub paid: bool,
    #[serde(default)]
    pub attempted: bool,
    #[serde(default)]
    pub attempt_count: u32,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status_transitions: StatusTransitions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_snapshot_deserializes_with_defaults() {
        let json = r#"{
            "id": "in_123",
            "customer": "cus_123",
            "currency": "usd",
            "total": 1500
        }"#;
        let snapshot: ProviderInvoiceSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.subtotal, 0);
        assert_eq!(snapshot.tax, None);
        assert_eq!(snapshot.starting_balance, None);
        assert!(snapshot.lines.is_empty());
        assert!(!snapshot.paid);
        assert_eq!(snapshot.attempt_count, 0);
        assert_eq!(snapshot.due_date, None);
        assert_eq!(snapshot.status_transitions, StatusTransitions::default());
    }

    #[test]
    fn transitions_deserialize_from_epoch_seconds() {
        let json = r#"{
            "id": "in_123",
            "customer": "cus_123",
            "currency": "usd",
            "status_transitions": {
                "finalized_at": 1700000000,
                "paid_at": 1700003600,
                "voided_at": null
            }
        }"#;
        let snapshot: ProviderInvoiceSnapshot = serde_json::from_str(json).unwrap();
        let transitions = snapshot.status_transitions;
        assert_eq!(
            transitions.finalized_at.map(|t| t.timestamp()),
            Some(1_700_000_000)
        );
        assert_eq!(
            transitions.paid_at.map(|t| t.timestamp()),
            Some(1_700_003_600)
        );
        assert_eq!(transitions.voided_at, None);
        assert_eq!(transitions.created_at, None);
    }

    #[test]
    fn line_item_kind_uses_provider_wire_names() {
        let json = r#"{
            "id": "il_1",
            "type": "invoiceitem",
            "amount": 500,
            "currency": "usd"
        }"#;
        let line: InvoiceLineItem = serde_json::from_str(json).unwrap();
        assert_eq!(line.kind, LineItemKind::InvoiceItem);

        let json = r#"{
            "id": "il_2",
            "type": "subscription",
            "amount": 2500,
            "currency": "usd"
        }"#;
        let line: InvoiceLineItem = serde_json::from_str(json).unwrap();
        assert_eq!(line.kind, LineItemKind::Subscription);
    }

    #[test]
    fn entries_follow_declaration_order() {
        let transitions = StatusTransitions::default();
        let names: Vec<&str> = transitions.entries().iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            [
                "created_at",
                "finalized_at",
                "paid_at",
                "voided_at",
                "marked_uncollectible_at"
            ]
        );
    }
}
