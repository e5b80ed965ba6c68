//! `billkit-invoicing` — read-side invoice model.
//!
//! Wraps a raw [`ProviderInvoiceSnapshot`] in an [`InvoiceView`] that derives
//! financial figures (totals, discounts, credits, tax, past-due) and merges
//! payment attempts with invoice status transitions into one chronologically
//! ordered, severity-classified timeline.

pub mod events;
pub mod snapshot;
pub mod traits;
pub mod view;

pub use events::{BillingEvent, EventSource, Severity};
pub use snapshot::{
    CouponDescriptor, DiscountDescriptor, InvoiceLineItem, LineItemKind, ProviderInvoiceSnapshot,
    StatusTransitions,
};
pub use traits::{ChargeAttempt, CurrencyFormatter, PaymentAttempt, PaymentAttemptSource};
pub use view::InvoiceView;
