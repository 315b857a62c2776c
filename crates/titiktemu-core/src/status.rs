//! # Order Status
//!
//! The five order statuses and the rules documents care about.
//!
//! ## Normal Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  pending_payment ──(proof upload)──► paid_review ──(accept)──► processing│
//! │                                          │                       │      │
//! │                                      (reject)                    ▼      │
//! │                                          ▼                      done    │
//! │                                      rejected                           │
//! │                                                                         │
//! │  Admin tooling may set ANY status directly. Nothing in this crate       │
//! │  refuses such a jump; `is_standard_transition` is advisory only.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;

/// The status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum OrderStatus {
    /// Created at checkout, waiting for the customer to pay.
    #[default]
    PendingPayment,
    /// Payment proof uploaded, waiting for an admin.
    PaidReview,
    /// Admin accepted the payment; work in progress.
    Processing,
    /// Delivered.
    Done,
    /// Admin rejected the payment proof.
    Rejected,
}

impl OrderStatus {
    /// Every status, in flow order. Also the admin allow-list.
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::PendingPayment,
        OrderStatus::PaidReview,
        OrderStatus::Processing,
        OrderStatus::Done,
        OrderStatus::Rejected,
    ];

    /// Storage name, e.g. `pending_payment`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::PendingPayment => "pending_payment",
            OrderStatus::PaidReview => "paid_review",
            OrderStatus::Processing => "processing",
            OrderStatus::Done => "done",
            OrderStatus::Rejected => "rejected",
        }
    }

    /// True once payment has been submitted or later.
    ///
    /// Documents stamp "PAID" for these statuses.
    pub const fn is_paid_like(&self) -> bool {
        matches!(
            self,
            OrderStatus::PaidReview | OrderStatus::Processing | OrderStatus::Done
        )
    }

    pub const fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Done | OrderStatus::Rejected)
    }

    /// Whether `self → to` is a step of the normal flow.
    ///
    /// Not enforced anywhere in this crate. A workflow layer that wants
    /// strict transitions can call this before persisting a status change.
    pub const fn is_standard_transition(&self, to: OrderStatus) -> bool {
        matches!(
            (self, to),
            (OrderStatus::PendingPayment, OrderStatus::PaidReview)
                | (OrderStatus::PaidReview, OrderStatus::Processing)
                | (OrderStatus::PaidReview, OrderStatus::Rejected)
                | (OrderStatus::Processing, OrderStatus::Done)
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = CoreError;

    /// Accepts exactly the storage names; anything else is refused the same
    /// way the admin status endpoint refuses it.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| CoreError::InvalidStatus(s.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_pending_payment() {
        assert_eq!(OrderStatus::default(), OrderStatus::PendingPayment);
    }

    #[test]
    fn test_paid_like_statuses() {
        assert!(!OrderStatus::PendingPayment.is_paid_like());
        assert!(OrderStatus::PaidReview.is_paid_like());
        assert!(OrderStatus::Processing.is_paid_like());
        assert!(OrderStatus::Done.is_paid_like());
        assert!(!OrderStatus::Rejected.is_paid_like());
    }

    #[test]
    fn test_parse_round_trips_storage_names() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
        assert!("paid".parse::<OrderStatus>().is_err());
        assert!("".parse::<OrderStatus>().is_err());
        assert!("DONE".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_standard_transitions() {
        use OrderStatus::*;

        assert!(PendingPayment.is_standard_transition(PaidReview));
        assert!(PaidReview.is_standard_transition(Processing));
        assert!(PaidReview.is_standard_transition(Rejected));
        assert!(Processing.is_standard_transition(Done));

        assert!(!PendingPayment.is_standard_transition(Processing));
        assert!(!Done.is_standard_transition(PendingPayment));
        assert!(!Rejected.is_standard_transition(Processing));
    }

    #[test]
    fn test_terminal() {
        assert!(OrderStatus::Done.is_terminal());
        assert!(OrderStatus::Rejected.is_terminal());
        assert!(!OrderStatus::Processing.is_terminal());
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&OrderStatus::PaidReview).unwrap();
        assert_eq!(json, "\"paid_review\"");
        let back: OrderStatus = serde_json::from_str("\"pending_payment\"").unwrap();
        assert_eq!(back, OrderStatus::PendingPayment);
    }
}
