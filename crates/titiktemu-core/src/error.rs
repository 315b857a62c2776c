//! # Error Types
//!
//! Domain-specific error types for titiktemu-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  titiktemu-core errors (this file)                                     │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  titiktemu-docs errors (separate crate)                                │
//! │  └── RenderError      - Document rendering failures                    │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── AppError         - Config / input file failures                   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → RenderError → AppError            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Note that `compute_discount` never fails: an inapplicable coupon yields a
//! zero discount, not an error.

use thiserror::Error;

use crate::coupon::CouponRejection;

// =============================================================================
// Core Error
// =============================================================================

/// Failures of checkout, coupon and order rules.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Checkout attempted with no line items.
    #[error("Cart is empty")]
    EmptyCart,

    /// Coupon exists but cannot be used right now.
    ///
    /// Checkout itself ignores ineligible coupons; this variant is for
    /// callers that want to tell the customer why.
    #[error("Coupon {code} cannot be used: {reason}")]
    CouponRejected {
        code: String,
        reason: CouponRejection,
    },

    /// Status string outside the five known order statuses.
    #[error("Invalid order status: '{0}'")]
    InvalidStatus(String),

    /// Order money fields break `total == subtotal - discount` or
    /// `0 <= discount <= subtotal`.
    #[error(
        "Order {order_id} totals are inconsistent: subtotal {subtotal}, discount {discount}, total {total}"
    )]
    InconsistentTotals {
        order_id: String,
        subtotal: i64,
        discount: i64,
        total: i64,
    },

    /// A field-level rule failed.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// A submitted field broke one of the rules in [`crate::validation`].
///
/// `field` is the human-readable name shown back to the customer or admin.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Blank after trimming.
    #[error("{field} is required")]
    Required { field: String },

    /// Longer than `max` characters.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// e.g. a coupon code with spaces, or a malformed order id.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Outside a fixed allow-list, such as payment proof MIME types.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Result of a core operation.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
