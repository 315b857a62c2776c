//! # titiktemu-core: Pure Business Logic for the Titiktemu Storefront
//!
//! Order arithmetic and rules shared by checkout, admin tooling and the
//! document renderer. No I/O happens here.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Titiktemu Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Storefront / Admin (web)                        │   │
//! │  │    Catalog ──► Cart ──► Checkout ──► Payment proof ──► Admin   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ order snapshots (JSON)                 │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ titiktemu-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │  money   │ │ discount │ │ checkout │ │  status  │          │   │
//! │  │   │  Money   │ │ compute_ │ │ quote_   │ │ Order-   │          │   │
//! │  │   │  format  │ │ discount │ │ checkout │ │ Status   │          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │  types   │ │  coupon  │ │ payment  │ │validation│          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            titiktemu-docs (A4 invoice, 58mm receipt)            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Whole-rupiah `Money` and its display format
//! - [`discount`] - Coupon discount computation
//! - [`coupon`] - Coupon records and eligibility
//! - [`checkout`] - Cart lines to order totals, invoice numbers
//! - [`status`] - Order status values
//! - [`payment`] - Payment proof formats and storage keys
//! - [`types`] - `Order` and `OrderItem` snapshots
//! - [`validation`] - Input rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use titiktemu_core::{compute_discount, CouponType, DiscountTerms, Money};
//!
//! let terms = DiscountTerms {
//!     coupon_type: CouponType::Fixed,
//!     value: 20_000,
//!     min_order: Money::from_amount(50_000),
//!     max_discount: None,
//! };
//! let subtotal = Money::from_amount(100_000);
//! let discount = compute_discount(subtotal, &terms);
//!
//! assert_eq!((subtotal - discount).to_string(), "Rp 80.000");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod coupon;
pub mod discount;
pub mod error;
pub mod money;
pub mod payment;
pub mod status;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use checkout::{quote_checkout, CheckoutLine, CheckoutQuote};
pub use coupon::{Coupon, CouponRejection, CouponType};
pub use discount::{compute_discount, DiscountTerms};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{CurrencyFormat, Money};
pub use status::OrderStatus;
pub use types::{items_subtotal, Order, OrderItem};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Prefix of every generated invoice number.
pub const INVOICE_PREFIX: &str = "TT";

/// Maximum lines allowed in a single checkout.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Highest accepted unit price. With the quantity and cart limits, order
/// totals stay far inside `i64`.
pub const MAX_PRICE: i64 = 1_000_000_000_000;

pub const MAX_COUPON_CODE_LEN: usize = 32;

/// Maximum length of a line title snapshot, in characters.
pub const MAX_TITLE_LEN: usize = 200;
