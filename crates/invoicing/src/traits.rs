//! Collaborator contracts consumed by the invoice view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use billkit_core::{BillingResult, CustomerId, InvoiceId};

/// One charge nested under a payment attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeAttempt {
    /// Provider charge status (`"succeeded"`, `"failed"`, ...).
    pub status: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
}

/// A payment attempt as reported by the payment-history source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentAttempt {
    pub id: String,
    /// Provider intent status (`"requires_payment_method"`, ...).
    pub status: String,
    #[serde(default)]
    pub invoice_id: Option<InvoiceId>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub charges: Vec<ChargeAttempt>,
}

/// Source of payment attempts for a customer.
pub trait PaymentAttemptSource {
    fn list_for_customer(&self, customer: &CustomerId) -> BillingResult<Vec<PaymentAttempt>>;
}

/// Formats minor-unit amounts for display, keyed by currency code.
pub trait CurrencyFormatter {
    fn format(&self, amount: i64, currency: &str) -> String;
}
