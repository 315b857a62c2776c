//! # Coupons
//!
//! Coupon records and the eligibility rules checked before any discount is
//! computed.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Admin creates ──► is_active = true, used_count = 0                    │
//! │        │                                                                │
//! │        ├── toggle ──► set_active(false/true)                           │
//! │        │                                                                │
//! │  Checkout: normalize_coupon_code() ──► lookup ──► check_eligibility()  │
//! │        │                                               │                │
//! │        │                                    ok ────────┤                │
//! │        ▼                                               ▼                │
//! │  compute_discount()                               redeem()             │
//! │                                              (used_count += 1)         │
//! │                                                                         │
//! │  Coupons are never deleted in normal flow.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::discount::DiscountTerms;
use crate::money::Money;

// =============================================================================
// Coupon Type
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CouponType {
    /// `value` is a percentage of the subtotal.
    Percent,
    /// `value` is an amount in currency units.
    Fixed,
}

// =============================================================================
// Coupon
// =============================================================================

/// A discount rule identified by its code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Coupon {
    #[serde(default)]
    pub id: String,

    /// Canonical uppercase code, e.g. `NUSA10`.
    pub code: String,

    #[serde(rename = "type")]
    pub coupon_type: CouponType,

    pub value: i64,

    #[serde(default)]
    pub min_order: Money,

    #[serde(default)]
    pub max_discount: Option<Money>,

    #[serde(default = "default_active")]
    pub is_active: bool,

    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub starts_at: Option<DateTime<Utc>>,

    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub ends_at: Option<DateTime<Utc>>,

    /// `None` or `0` means unlimited.
    #[serde(default)]
    pub usage_limit: Option<i64>,

    #[serde(default)]
    pub used_count: i64,
}

fn default_active() -> bool {
    true
}

impl Coupon {
    /// The arithmetic-relevant subset handed to the discount engine.
    pub fn terms(&self) -> DiscountTerms {
        DiscountTerms {
            coupon_type: self.coupon_type,
            value: self.value,
            min_order: self.min_order,
            max_discount: self.max_discount,
        }
    }

    /// Checks activity, validity window and usage limit at `now`.
    ///
    /// Both window bounds are inclusive.
    pub fn check_eligibility(&self, now: DateTime<Utc>) -> Result<(), CouponRejection> {
        if !self.is_active {
            return Err(CouponRejection::Inactive);
        }

        if let Some(starts_at) = self.starts_at {
            if starts_at > now {
                return Err(CouponRejection::NotStarted { starts_at });
            }
        }

        if let Some(ends_at) = self.ends_at {
            if ends_at < now {
                return Err(CouponRejection::Expired { ends_at });
            }
        }

        match self.usage_limit {
            Some(limit) if limit > 0 && self.used_count >= limit => {
                Err(CouponRejection::UsageLimitReached)
            }
            _ => Ok(()),
        }
    }

    /// Records one redemption.
    pub fn redeem(&mut self) {
        self.used_count += 1;
    }

    pub fn set_active(&mut self, is_active: bool) {
        self.is_active = is_active;
    }

    /// Remaining redemptions, `None` when unlimited.
    pub fn remaining_uses(&self) -> Option<i64> {
        self.usage_limit
            .filter(|limit| *limit > 0)
            .map(|limit| (limit - self.used_count).max(0))
    }
}

/// Canonical form of a user-typed coupon code: trimmed and uppercased.
///
/// Returns `None` for blank input, which checkout treats as "no coupon".
///
/// ## Example
/// ```rust
/// use titiktemu_core::coupon::normalize_coupon_code;
///
/// assert_eq!(normalize_coupon_code("  nusa10 ").as_deref(), Some("NUSA10"));
/// assert_eq!(normalize_coupon_code("   "), None);
/// ```
pub fn normalize_coupon_code(raw: &str) -> Option<String> {
    let code = raw.trim();
    if code.is_empty() {
        None
    } else {
        Some(code.to_uppercase())
    }
}

// =============================================================================
// Coupon Rejection
// =============================================================================

/// Why a coupon cannot be used right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouponRejection {
    Inactive,
    NotStarted { starts_at: DateTime<Utc> },
    Expired { ends_at: DateTime<Utc> },
    UsageLimitReached,
}

impl fmt::Display for CouponRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CouponRejection::Inactive => write!(f, "coupon is inactive"),
            CouponRejection::NotStarted { starts_at } => {
                write!(f, "valid from {}", starts_at.to_rfc3339())
            }
            CouponRejection::Expired { ends_at } => {
                write!(f, "expired at {}", ends_at.to_rfc3339())
            }
            CouponRejection::UsageLimitReached => write!(f, "usage limit reached"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn coupon() -> Coupon {
        Coupon {
            id: "c-1".to_string(),
            code: "NUSA10".to_string(),
            coupon_type: CouponType::Percent,
            value: 10,
            min_order: Money::zero(),
            max_discount: None,
            is_active: true,
            starts_at: None,
            ends_at: None,
            usage_limit: None,
            used_count: 0,
        }
    }

    #[test]
    fn test_open_coupon_is_eligible() {
        assert!(coupon().check_eligibility(Utc::now()).is_ok());
    }

    #[test]
    fn test_inactive_coupon_rejected() {
        let mut c = coupon();
        c.set_active(false);
        assert_eq!(
            c.check_eligibility(Utc::now()),
            Err(CouponRejection::Inactive)
        );
        c.set_active(true);
        assert!(c.check_eligibility(Utc::now()).is_ok());
    }

    #[test]
    fn test_validity_window() {
        let now = Utc::now();
        let mut c = coupon();

        c.starts_at = Some(now + Duration::hours(1));
        assert!(matches!(
            c.check_eligibility(now),
            Err(CouponRejection::NotStarted { .. })
        ));

        c.starts_at = Some(now);
        c.ends_at = Some(now);
        assert!(c.check_eligibility(now).is_ok(), "bounds are inclusive");

        c.ends_at = Some(now - Duration::seconds(1));
        assert!(matches!(
            c.check_eligibility(now),
            Err(CouponRejection::Expired { .. })
        ));
    }

    #[test]
    fn test_usage_limit() {
        let mut c = coupon();
        c.usage_limit = Some(2);

        assert!(c.check_eligibility(Utc::now()).is_ok());
        c.redeem();
        assert_eq!(c.remaining_uses(), Some(1));
        c.redeem();
        assert_eq!(
            c.check_eligibility(Utc::now()),
            Err(CouponRejection::UsageLimitReached)
        );
        assert_eq!(c.remaining_uses(), Some(0));
    }

    #[test]
    fn test_zero_usage_limit_means_unlimited() {
        let mut c = coupon();
        c.usage_limit = Some(0);
        c.used_count = 500;
        assert!(c.check_eligibility(Utc::now()).is_ok());
        assert_eq!(c.remaining_uses(), None);
    }

    #[test]
    fn test_terms_mirror_coupon() {
        let mut c = coupon();
        c.max_discount = Some(Money::from_amount(10_000));
        let terms = c.terms();
        assert_eq!(terms.coupon_type, CouponType::Percent);
        assert_eq!(terms.value, 10);
        assert_eq!(terms.max_discount, Some(Money::from_amount(10_000)));
    }

    #[test]
    fn test_normalize_coupon_code() {
        assert_eq!(normalize_coupon_code("nusa10").as_deref(), Some("NUSA10"));
        assert_eq!(normalize_coupon_code("\tHemat-5 ").as_deref(), Some("HEMAT-5"));
        assert_eq!(normalize_coupon_code(""), None);
    }

    #[test]
    fn test_coupon_deserializes_storage_row() {
        let json = r#"{
            "code": "NUSA10",
            "type": "fixed",
            "value": 20000,
            "min_order": 50000,
            "max_discount": null,
            "usage_limit": 100,
            "used_count": 3
        }"#;
        let c: Coupon = serde_json::from_str(json).unwrap();
        assert_eq!(c.coupon_type, CouponType::Fixed);
        assert!(c.is_active);
        assert_eq!(c.min_order.amount(), 50_000);
        assert_eq!(c.remaining_uses(), Some(97));
    }
}
