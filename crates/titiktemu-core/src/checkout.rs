//! # Checkout
//!
//! Turns submitted cart lines and an optional coupon into the money fields
//! of a new order.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  lines ──► validate ──► subtotal = Σ price × qty                       │
//! │                              │                                          │
//! │  coupon? ──► check_eligibility(now)                                    │
//! │                 │ ok                    │ rejected                      │
//! │                 ▼                       ▼                               │
//! │         compute_discount()        discount = 0, no coupon code         │
//! │                 │                       │                               │
//! │                 └──────────┬────────────┘                               │
//! │                            ▼                                            │
//! │        CheckoutQuote { subtotal, discount, total, coupon_code }        │
//! │                            │                                            │
//! │                            ▼                                            │
//! │        into_order() ──► Order (pending_payment) + OrderItem snapshots  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Persisting the order and bumping the coupon's `used_count` stay with the
//! caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::coupon::Coupon;
use crate::discount::compute_discount;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::status::OrderStatus;
use crate::types::{amount_overflow, Order, OrderItem};
use crate::validation::{validate_cart_size, validate_price, validate_quantity, validate_title};
use crate::INVOICE_PREFIX;

/// A cart line as submitted by the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutLine {
    /// Catalog id of the service.
    #[serde(default)]
    pub service_id: String,
    pub title: String,
    pub price: Money,
    pub qty: i64,
}

/// The computed money fields of an order about to be created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutQuote {
    pub subtotal: Money,
    pub discount: Money,
    pub total: Money,
    /// Set only when the coupon was eligible and applied.
    pub coupon_code: Option<String>,
    /// Frozen line snapshots.
    pub items: Vec<CheckoutLine>,
}

/// Computes the quote for `lines` with an optional, already looked-up coupon.
///
/// An ineligible coupon is ignored rather than failing checkout.
///
/// ## Example
/// ```rust
/// use chrono::Utc;
/// use titiktemu_core::checkout::{quote_checkout, CheckoutLine};
/// use titiktemu_core::Money;
///
/// let lines = vec![CheckoutLine {
///     service_id: "svc-1".into(),
///     title: "Video editing".into(),
///     price: Money::from_amount(50_000),
///     qty: 2,
/// }];
/// let quote = quote_checkout(&lines, None, Utc::now()).unwrap();
/// assert_eq!(quote.total.amount(), 100_000);
/// ```
pub fn quote_checkout(
    lines: &[CheckoutLine],
    coupon: Option<&Coupon>,
    now: DateTime<Utc>,
) -> CoreResult<CheckoutQuote> {
    if lines.is_empty() {
        return Err(CoreError::EmptyCart);
    }
    validate_cart_size(lines.len())?;

    for line in lines {
        validate_title(&line.title)?;
        validate_quantity(line.qty)?;
        validate_price(line.price.amount())?;
    }

    let subtotal = lines.iter().try_fold(Money::zero(), |sum, line| {
        line.price
            .checked_multiply_quantity(line.qty)
            .and_then(|amount| sum.checked_add(amount))
            .ok_or_else(|| amount_overflow("subtotal"))
    })?;

    let (discount, coupon_code) = match coupon {
        Some(coupon) if coupon.check_eligibility(now).is_ok() => (
            compute_discount(subtotal, &coupon.terms()),
            Some(coupon.code.clone()),
        ),
        _ => (Money::zero(), None),
    };

    Ok(CheckoutQuote {
        subtotal,
        discount,
        total: subtotal - discount,
        coupon_code,
        items: lines.to_vec(),
    })
}

impl CheckoutQuote {
    /// Materializes the order and its line items in `pending_payment`.
    pub fn into_order(
        self,
        order_id: String,
        user_id: String,
        invoice_number: String,
        notes: Option<String>,
        created_at: DateTime<Utc>,
    ) -> (Order, Vec<OrderItem>) {
        let items = self
            .items
            .into_iter()
            .map(|line| OrderItem {
                order_id: order_id.clone(),
                title: line.title,
                qty: line.qty,
                price: line.price,
            })
            .collect();

        let order = Order {
            id: order_id,
            user_id,
            invoice_number: Some(invoice_number),
            subtotal: self.subtotal,
            discount: self.discount,
            total: self.total,
            coupon_code: self.coupon_code,
            status: OrderStatus::PendingPayment,
            created_at,
            notes: notes.filter(|n| !n.trim().is_empty()),
            payment_proof_path: None,
        };

        (order, items)
    }
}

const SUFFIX_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const SUFFIX_LEN: usize = 6;

/// Builds an invoice number such as `TT-2026-K3P9QZ`.
///
/// The suffix is derived from `source` (normally a fresh UUID v4), so the
/// function itself stays deterministic.
pub fn generate_invoice_number(year: i32, source: Uuid) -> String {
    let suffix: String = source
        .as_bytes()
        .iter()
        .take(SUFFIX_LEN)
        .map(|b| SUFFIX_ALPHABET[(*b as usize) % SUFFIX_ALPHABET.len()] as char)
        .collect();

    format!("{}-{}-{}", INVOICE_PREFIX, year, suffix)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coupon::CouponType;
    use crate::error::ValidationError;
    use chrono::{Datelike, Duration};

    fn line(title: &str, price: i64, qty: i64) -> CheckoutLine {
        CheckoutLine {
            service_id: format!("svc-{}", title.len()),
            title: title.to_string(),
            price: Money::from_amount(price),
            qty,
        }
    }

    fn fixed_coupon(value: i64, min_order: i64) -> Coupon {
        Coupon {
            id: "c-1".to_string(),
            code: "HEMAT20".to_string(),
            coupon_type: CouponType::Fixed,
            value,
            min_order: Money::from_amount(min_order),
            max_discount: None,
            is_active: true,
            starts_at: None,
            ends_at: None,
            usage_limit: None,
            used_count: 0,
        }
    }

    #[test]
    fn test_quote_without_coupon() {
        let lines = vec![line("Video editing", 75_000, 1), line("Thumbnail", 25_000, 1)];
        let quote = quote_checkout(&lines, None, Utc::now()).unwrap();

        assert_eq!(quote.subtotal.amount(), 100_000);
        assert_eq!(quote.discount, Money::zero());
        assert_eq!(quote.total.amount(), 100_000);
        assert_eq!(quote.coupon_code, None);
    }

    #[test]
    fn test_quote_with_eligible_coupon() {
        let lines = vec![line("Video editing", 50_000, 2)];
        let coupon = fixed_coupon(20_000, 50_000);
        let quote = quote_checkout(&lines, Some(&coupon), Utc::now()).unwrap();

        assert_eq!(quote.discount.amount(), 20_000);
        assert_eq!(quote.total.amount(), 80_000);
        assert_eq!(quote.coupon_code.as_deref(), Some("HEMAT20"));
    }

    #[test]
    fn test_quote_below_min_order_keeps_coupon_code() {
        let lines = vec![line("Logo design", 30_000, 1)];
        let coupon = fixed_coupon(20_000, 50_000);
        let quote = quote_checkout(&lines, Some(&coupon), Utc::now()).unwrap();

        // eligible coupon, but the minimum-order gate yields zero
        assert_eq!(quote.discount, Money::zero());
        assert_eq!(quote.total.amount(), 30_000);
        assert_eq!(quote.coupon_code.as_deref(), Some("HEMAT20"));
    }

    #[test]
    fn test_quote_ignores_ineligible_coupon() {
        let lines = vec![line("Video editing", 100_000, 1)];
        let mut coupon = fixed_coupon(20_000, 0);
        coupon.ends_at = Some(Utc::now() - Duration::days(1));

        let quote = quote_checkout(&lines, Some(&coupon), Utc::now()).unwrap();
        assert_eq!(quote.discount, Money::zero());
        assert_eq!(quote.coupon_code, None);
    }

    #[test]
    fn test_quote_rejects_empty_cart() {
        assert!(matches!(
            quote_checkout(&[], None, Utc::now()),
            Err(CoreError::EmptyCart)
        ));
    }

    #[test]
    fn test_quote_rejects_bad_lines() {
        assert!(quote_checkout(&[line("Edit", 10_000, 0)], None, Utc::now()).is_err());
        assert!(quote_checkout(&[line("Edit", -1, 1)], None, Utc::now()).is_err());
        assert!(quote_checkout(&[line("  ", 10_000, 1)], None, Utc::now()).is_err());
    }

    #[test]
    fn test_quote_rejects_price_that_would_overflow() {
        let result = quote_checkout(&[line("Paket korporat", i64::MAX / 2 + 1, 2)], None, Utc::now());
        assert!(matches!(
            result,
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn test_quote_at_limits_stays_in_range() {
        let lines: Vec<CheckoutLine> = (0..crate::MAX_CART_ITEMS)
            .map(|i| line(&format!("Paket {}", i), crate::MAX_PRICE, crate::MAX_ITEM_QUANTITY))
            .collect();
        let quote = quote_checkout(&lines, None, Utc::now()).unwrap();
        assert_eq!(
            quote.subtotal.amount(),
            crate::MAX_PRICE * crate::MAX_ITEM_QUANTITY * crate::MAX_CART_ITEMS as i64
        );
    }

    #[test]
    fn test_into_order_satisfies_totals_invariant() {
        let lines = vec![line("Video editing", 60_000, 2)];
        let coupon = fixed_coupon(150_000, 0);
        let now = Utc::now();
        let quote = quote_checkout(&lines, Some(&coupon), now).unwrap();

        let (order, items) = quote.into_order(
            "ord-1".to_string(),
            "user-1".to_string(),
            "TT-2026-AAAAAA".to_string(),
            Some("  ".to_string()),
            now,
        );

        assert!(order.check_totals().is_ok());
        assert_eq!(order.total, Money::zero());
        assert_eq!(order.status, OrderStatus::PendingPayment);
        assert_eq!(order.notes, None);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].order_id, "ord-1");
    }

    #[test]
    fn test_generate_invoice_number_shape() {
        let year = Utc::now().year();
        let number = generate_invoice_number(year, Uuid::new_v4());
        let parts: Vec<&str> = number.split('-').collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "TT");
        assert_eq!(parts[1], year.to_string());
        assert_eq!(parts[2].len(), 6);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_generate_invoice_number_deterministic() {
        let source = Uuid::nil();
        assert_eq!(generate_invoice_number(2026, source), "TT-2026-AAAAAA");
        assert_eq!(
            generate_invoice_number(2026, source),
            generate_invoice_number(2026, source)
        );
    }
}
