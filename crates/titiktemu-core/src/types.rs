//! # Domain Types
//!
//! Order snapshots shared by checkout, admin tooling and the document renderer.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Order       │   │   OrderItem     │   │     Coupon      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │◄──│  order_id (FK)  │   │  code (UPPER)   │       │
//! │  │  invoice_number │   │  title snapshot │   │  type / value   │       │
//! │  │  subtotal       │   │  qty            │   │  min_order      │       │
//! │  │  discount       │   │  price snapshot │   │  max_discount   │       │
//! │  │  total          │   └─────────────────┘   │  usage counters │       │
//! │  │  status         │                         └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! - `id`: UUID v4, used for relations and QR links
//! - `invoice_number`: human-readable `TT-2026-AB12CD`, printed on documents

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::status::OrderStatus;

// =============================================================================
// Order
// =============================================================================

/// An order as stored after checkout.
///
/// Financial fields are fixed at creation; only `status` and
/// `payment_proof_path` change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Owning customer. Empty when the snapshot was exported without it.
    #[serde(default)]
    pub user_id: String,

    /// Human-readable number generated at checkout.
    #[serde(default)]
    pub invoice_number: Option<String>,

    pub subtotal: Money,

    #[serde(default)]
    pub discount: Money,

    pub total: Money,

    /// Code of the coupon applied at checkout, if any.
    #[serde(default)]
    pub coupon_code: Option<String>,

    #[serde(default)]
    pub status: OrderStatus,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// Free-text notes from the customer.
    #[serde(default)]
    pub notes: Option<String>,

    /// Object-storage key of the uploaded payment proof.
    #[serde(default)]
    pub payment_proof_path: Option<String>,
}

impl Order {
    /// The number printed on documents: invoice number, or the id when the
    /// order predates invoice numbering.
    pub fn display_number(&self) -> &str {
        self.invoice_number
            .as_deref()
            .map(str::trim)
            .filter(|number| !number.is_empty())
            .unwrap_or(self.id.as_str())
    }

    /// Verifies `0 <= discount <= subtotal` and `total == subtotal - discount`.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::Utc;
    /// use titiktemu_core::{Money, Order, OrderStatus};
    ///
    /// let order = Order {
    ///     id: "ord-1".into(),
    ///     user_id: "user-1".into(),
    ///     invoice_number: Some("TT-2026-AB12CD".into()),
    ///     subtotal: Money::from_amount(100_000),
    ///     discount: Money::from_amount(20_000),
    ///     total: Money::from_amount(80_000),
    ///     coupon_code: Some("NUSA20".into()),
    ///     status: OrderStatus::PendingPayment,
    ///     created_at: Utc::now(),
    ///     notes: None,
    ///     payment_proof_path: None,
    /// };
    /// assert!(order.check_totals().is_ok());
    /// ```
    pub fn check_totals(&self) -> CoreResult<()> {
        let consistent = !self.discount.is_negative()
            && self.discount <= self.subtotal
            && self.total == self.subtotal - self.discount;

        if consistent {
            Ok(())
        } else {
            Err(CoreError::InconsistentTotals {
                order_id: self.id.clone(),
                subtotal: self.subtotal.amount(),
                discount: self.discount.amount(),
                total: self.total.amount(),
            })
        }
    }

    /// Records an uploaded payment proof and moves the order to review.
    pub fn attach_payment_proof(&mut self, path: String) {
        self.payment_proof_path = Some(path);
        self.status = OrderStatus::PaidReview;
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// A line item in an order.
/// Uses snapshot pattern to freeze service data at time of purchase, so
/// historical invoices stay stable when the catalog changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderItem {
    #[serde(default)]
    pub order_id: String,

    /// Service name at time of purchase (frozen).
    pub title: String,

    pub qty: i64,

    /// Unit price at time of purchase (frozen).
    pub price: Money,
}

impl OrderItem {
    /// Unit price × quantity. Fails instead of wrapping when the product
    /// does not fit in `Money`.
    pub fn line_total(&self) -> CoreResult<Money> {
        self.price
            .checked_multiply_quantity(self.qty)
            .ok_or_else(|| amount_overflow("line total"))
    }
}

/// Sum of all line totals, checked like [`OrderItem::line_total`].
pub fn items_subtotal(items: &[OrderItem]) -> CoreResult<Money> {
    items.iter().try_fold(Money::zero(), |sum, item| {
        sum.checked_add(item.line_total()?)
            .ok_or_else(|| amount_overflow("subtotal"))
    })
}

pub(crate) fn amount_overflow(field: &str) -> CoreError {
    ValidationError::OutOfRange {
        field: field.to_string(),
        min: 0,
        max: i64::MAX,
    }
    .into()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_order(subtotal: i64, discount: i64, total: i64) -> Order {
        Order {
            id: "7f1c2a9e-3b4d-4e5f-8a6b-1c2d3e4f5a6b".to_string(),
            user_id: "user-1".to_string(),
            invoice_number: Some("TT-2026-AB12CD".to_string()),
            subtotal: Money::from_amount(subtotal),
            discount: Money::from_amount(discount),
            total: Money::from_amount(total),
            coupon_code: None,
            status: OrderStatus::PendingPayment,
            created_at: DateTime::parse_from_rfc3339("2026-03-01T08:30:00Z")
                .unwrap()
                .with_timezone(&Utc),
            notes: None,
            payment_proof_path: None,
        }
    }

    #[test]
    fn test_check_totals_accepts_consistent_order() {
        assert!(sample_order(100_000, 20_000, 80_000).check_totals().is_ok());
        assert!(sample_order(100_000, 0, 100_000).check_totals().is_ok());
        assert!(sample_order(50_000, 50_000, 0).check_totals().is_ok());
    }

    #[test]
    fn test_check_totals_rejects_inconsistent_order() {
        // total does not match
        assert!(sample_order(100_000, 20_000, 100_000).check_totals().is_err());
        // discount exceeds subtotal
        assert!(sample_order(10_000, 20_000, -10_000).check_totals().is_err());
        // negative discount
        assert!(sample_order(10_000, -5_000, 15_000).check_totals().is_err());
    }

    #[test]
    fn test_display_number_falls_back_to_id() {
        let mut order = sample_order(1, 0, 1);
        assert_eq!(order.display_number(), "TT-2026-AB12CD");

        order.invoice_number = None;
        assert_eq!(order.display_number(), order.id);

        order.invoice_number = Some("   ".to_string());
        assert_eq!(order.display_number(), order.id);
    }

    #[test]
    fn test_attach_payment_proof_moves_to_review() {
        let mut order = sample_order(1, 0, 1);
        order.attach_payment_proof("payments/u/o/1.png".to_string());
        assert_eq!(order.status, OrderStatus::PaidReview);
        assert_eq!(order.payment_proof_path.as_deref(), Some("payments/u/o/1.png"));
    }

    #[test]
    fn test_line_total() {
        let item = OrderItem {
            order_id: String::new(),
            title: "Video editing".to_string(),
            qty: 3,
            price: Money::from_amount(150_000),
        };
        assert_eq!(item.line_total().unwrap().amount(), 450_000);
    }

    #[test]
    fn test_line_total_overflow_is_an_error() {
        let item = OrderItem {
            order_id: String::new(),
            title: "Paket korporat".to_string(),
            qty: 3,
            price: Money::from_amount(i64::MAX / 2),
        };
        assert!(matches!(
            item.line_total(),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
        assert!(items_subtotal(&[item]).is_err());
    }

    #[test]
    fn test_items_subtotal() {
        let item = |qty, price| OrderItem {
            order_id: String::new(),
            title: "Desain".to_string(),
            qty,
            price: Money::from_amount(price),
        };
        assert_eq!(
            items_subtotal(&[item(2, 30_000), item(1, 40_000)]).unwrap().amount(),
            100_000
        );
        assert_eq!(items_subtotal(&[]).unwrap(), Money::zero());

        let near_max = item(1, i64::MAX - 1);
        assert!(items_subtotal(&[near_max.clone(), near_max]).is_err());
    }

    #[test]
    fn test_order_deserializes_from_storage_row() {
        let json = r#"{
            "id": "ord-9",
            "invoice_number": "TT-2026-ZZ99ZZ",
            "subtotal": 100000,
            "discount": 10000,
            "total": 90000,
            "coupon_code": "NUSA10",
            "status": "processing",
            "created_at": "2026-03-01T08:30:00Z"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.total.amount(), 90_000);
        assert!(order.notes.is_none());
        assert!(order.user_id.is_empty());
    }
}
