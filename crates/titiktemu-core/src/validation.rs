//! # Validation Module
//!
//! Input validation for checkout lines and admin-created coupons.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront forms (TypeScript)                                │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Checkout lines (qty, price, title)                                │
//! │  └── Coupon definitions (code, value, caps)                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Hosted database constraints                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use titiktemu_core::validation::{validate_coupon_code, validate_quantity};
//!
//! assert!(validate_coupon_code("NUSA10").is_ok());
//! assert!(validate_quantity(5).is_ok());
//! ```

use crate::coupon::{Coupon, CouponType};
use crate::error::ValidationError;
use crate::{MAX_CART_ITEMS, MAX_COUPON_CODE_LEN, MAX_ITEM_QUANTITY, MAX_PRICE, MAX_TITLE_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a canonical coupon code.
///
/// ## Rules
/// - Must not be empty
/// - At most 32 characters
/// - Only `A-Z`, `0-9`, `-` and `_` (run [`crate::coupon::normalize_coupon_code`] first)
///
/// ## Example
/// ```rust
/// use titiktemu_core::validation::validate_coupon_code;
///
/// assert!(validate_coupon_code("HEMAT_50").is_ok());
/// assert!(validate_coupon_code("hemat").is_err());
/// assert!(validate_coupon_code("").is_err());
/// ```
pub fn validate_coupon_code(code: &str) -> ValidationResult<()> {
    if code.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.chars().count() > MAX_COUPON_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: MAX_COUPON_CODE_LEN,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must contain only uppercase letters, digits, hyphens, and underscores"
                .to_string(),
        });
    }

    Ok(())
}

/// Validates a line item title (the snapshot of the service name).
pub fn validate_title(title: &str) -> ValidationResult<()> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: MAX_TITLE_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price. Zero is allowed (free add-ons).
///
/// ## Rules
/// - Must be between 0 and MAX_PRICE (Rp 1.000.000.000.000)
pub fn validate_price(amount: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE).contains(&amount) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE,
        });
    }

    Ok(())
}

/// Validates the number of lines in a checkout.
pub fn validate_cart_size(lines: usize) -> ValidationResult<()> {
    if lines > MAX_CART_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "cart items".to_string(),
            min: 1,
            max: MAX_CART_ITEMS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Coupon Definition
// =============================================================================

/// Validates a coupon as submitted by an administrator.
///
/// ## Rules
/// - Code passes [`validate_coupon_code`]
/// - `value > 0`; percent coupons at most 100
/// - `min_order >= 0`
/// - `max_discount > 0` when set
/// - `usage_limit >= 0` when set
/// - `starts_at <= ends_at` when both are set
pub fn validate_new_coupon(coupon: &Coupon) -> ValidationResult<()> {
    validate_coupon_code(&coupon.code)?;

    if coupon.value <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "value".to_string(),
        });
    }

    if coupon.coupon_type == CouponType::Percent && coupon.value > 100 {
        return Err(ValidationError::OutOfRange {
            field: "value".to_string(),
            min: 1,
            max: 100,
        });
    }

    if coupon.min_order.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "min_order".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    if let Some(cap) = coupon.max_discount {
        if !cap.is_positive() {
            return Err(ValidationError::MustBePositive {
                field: "max_discount".to_string(),
            });
        }
    }

    if let Some(limit) = coupon.usage_limit {
        if limit < 0 {
            return Err(ValidationError::OutOfRange {
                field: "usage_limit".to_string(),
                min: 0,
                max: i64::MAX,
            });
        }
    }

    if let (Some(starts_at), Some(ends_at)) = (coupon.starts_at, coupon.ends_at) {
        if starts_at > ends_at {
            return Err(ValidationError::InvalidFormat {
                field: "ends_at".to_string(),
                reason: "must not be before starts_at".to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Example
/// ```rust
/// use titiktemu_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
