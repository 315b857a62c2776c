//! # Discount Engine
//!
//! Turns a coupon's terms and an order subtotal into a discount amount.
//!
//! ## Computation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  subtotal < min_order ? ───yes──► 0 (coupon silently does not apply)   │
//! │         │ no                                                            │
//! │         ▼                                                               │
//! │  fixed   → raw = value                                                  │
//! │  percent → raw = floor(subtotal × value / 100), capped at max_discount │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  discount = clamp(raw, 0, subtotal)   → total can never go negative    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Activity, validity window and usage limit are checked by the caller
//! beforehand (see [`crate::coupon::Coupon::check_eligibility`]).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::coupon::CouponType;
use crate::money::Money;

/// The part of a coupon that drives the arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountTerms {
    #[serde(rename = "type")]
    pub coupon_type: CouponType,

    /// Percentage points for `percent`, currency units for `fixed`.
    pub value: i64,

    /// Minimum subtotal for the coupon to apply (inclusive).
    pub min_order: Money,

    /// Ceiling for `percent` coupons. Ignored for `fixed`.
    pub max_discount: Option<Money>,
}

/// Computes the discount for `subtotal` under `terms`.
///
/// Pure and total: every input yields a value in `[0, subtotal]`
/// (or `0` when `subtotal` itself is not positive).
///
/// ## Example
/// ```rust
/// use titiktemu_core::coupon::CouponType;
/// use titiktemu_core::discount::{compute_discount, DiscountTerms};
/// use titiktemu_core::Money;
///
/// let terms = DiscountTerms {
///     coupon_type: CouponType::Percent,
///     value: 15,
///     min_order: Money::zero(),
///     max_discount: Some(Money::from_amount(10_000)),
/// };
/// // 15% of 100.000 is 15.000, capped to 10.000
/// let discount = compute_discount(Money::from_amount(100_000), &terms);
/// assert_eq!(discount.amount(), 10_000);
/// ```
pub fn compute_discount(subtotal: Money, terms: &DiscountTerms) -> Money {
    if subtotal < terms.min_order {
        return Money::zero();
    }

    let raw = match terms.coupon_type {
        CouponType::Fixed => Money::from_amount(terms.value),
        CouponType::Percent => {
            let pct = subtotal.percent_floor(terms.value);
            match terms.max_discount {
                Some(cap) => pct.min(cap),
                None => pct,
            }
        }
    };

    raw.clamp_to(Money::zero(), subtotal)
}

// =============================================================================
// Unit Tests
// =============================================================================
