//! Input files and the checks run before anything is rendered.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use titiktemu_core::validation::{
    validate_cart_size, validate_price, validate_quantity, validate_title, validate_uuid,
};
use titiktemu_core::{items_subtotal, CheckoutLine, CoreError, Coupon, Order, OrderItem};

use crate::error::{AppError, AppResult};

/// `order.json`: a stored order and its line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSnapshot {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// `checkout.json`: a cart as submitted, with the coupon looked up by code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub lines: Vec<CheckoutLine>,
    #[serde(default)]
    pub coupon: Option<Coupon>,
}

pub async fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let bytes = tokio::fs::read(path).await.map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_slice(&bytes).map_err(|source| AppError::Json {
        path: path.to_path_buf(),
        source,
    })
}

impl OrderSnapshot {
    /// Rejects snapshots whose items cannot have produced the order.
    pub fn check(&self) -> AppResult<()> {
        validate_uuid(&self.order.id).map_err(CoreError::from)?;

        if self.items.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }
        validate_cart_size(self.items.len()).map_err(CoreError::from)?;

        for item in &self.items {
            validate_title(&item.title).map_err(CoreError::from)?;
            validate_quantity(item.qty).map_err(CoreError::from)?;
            validate_price(item.price.amount()).map_err(CoreError::from)?;

            if !item.order_id.is_empty() && item.order_id != self.order.id {
                return Err(AppError::Input(format!(
                    "item '{}' belongs to order {}, not {}",
                    item.title, item.order_id, self.order.id
                )));
            }
        }

        let lines_total = items_subtotal(&self.items)?;
        if lines_total != self.order.subtotal {
            return Err(AppError::Input(format!(
                "items add up to {} but the order subtotal is {}",
                lines_total.amount(),
                self.order.subtotal.amount()
            )));
        }

        self.order.check_totals()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use titiktemu_core::{Money, OrderStatus, ValidationError};

    fn snapshot() -> OrderSnapshot {
        let order = Order {
            id: "0b7e4c1a-9d2f-4a63-8e15-6c3f2a9b7d40".to_string(),
            user_id: "user-1".to_string(),
            invoice_number: Some("TT-2026-AB12CD".to_string()),
            subtotal: Money::from_amount(100_000),
            discount: Money::from_amount(20_000),
            total: Money::from_amount(80_000),
            coupon_code: Some("HEMAT20".to_string()),
            status: OrderStatus::Processing,
            created_at: Utc.with_ymd_and_hms(2026, 3, 1, 8, 30, 0).unwrap(),
            notes: None,
            payment_proof_path: None,
        };
        let item = |title: &str, qty, price| OrderItem {
            order_id: "0b7e4c1a-9d2f-4a63-8e15-6c3f2a9b7d40".to_string(),
            title: title.to_string(),
            qty,
            price: Money::from_amount(price),
        };

        OrderSnapshot {
            order,
            items: vec![
                item("Video editing reels", 2, 30_000),
                item("Desain thumbnail", 1, 40_000),
            ],
        }
    }

    #[test]
    fn test_consistent_snapshot_passes() {
        assert!(snapshot().check().is_ok());
    }

    #[test]
    fn test_empty_items_rejected() {
        let mut s = snapshot();
        s.items.clear();
        assert!(matches!(s.check(), Err(AppError::Core(CoreError::EmptyCart))));
    }

    #[test]
    fn test_subtotal_mismatch_rejected() {
        let mut s = snapshot();
        s.items[0].qty = 3;
        assert!(matches!(s.check(), Err(AppError::Input(_))));
    }

    #[test]
    fn test_foreign_item_rejected() {
        let mut s = snapshot();
        s.items[1].order_id = "5a1d8f3e-2c4b-4e7a-9b06-d1e2f3a4b5c6".to_string();
        assert!(matches!(s.check(), Err(AppError::Input(_))));
    }

    #[test]
    fn test_bad_quantity_rejected() {
        let mut s = snapshot();
        s.items[0].qty = 0;
        assert!(matches!(s.check(), Err(AppError::Core(CoreError::Validation(_)))));
    }

    #[test]
    fn test_malformed_order_id_rejected() {
        let mut s = snapshot();
        s.order.id = "ord-1".to_string();
        for item in &mut s.items {
            item.order_id = "ord-1".to_string();
        }
        assert!(matches!(
            s.check(),
            Err(AppError::Core(CoreError::Validation(ValidationError::InvalidFormat { .. })))
        ));
    }

    #[test]
    fn test_price_out_of_range_rejected() {
        let mut s = snapshot();
        s.items[0].price = Money::from_amount(i64::MAX / 2);
        s.items[0].qty = 3;
        assert!(matches!(
            s.check(),
            Err(AppError::Core(CoreError::Validation(ValidationError::OutOfRange { .. })))
        ));
    }

    #[test]
    fn test_snapshot_json_shape() {
        let json = r#"{
            "order": {
                "id": "0b7e4c1a-9d2f-4a63-8e15-6c3f2a9b7d40",
                "user_id": "user-1",
                "invoice_number": null,
                "subtotal": 40000,
                "discount": 0,
                "total": 40000,
                "coupon_code": null,
                "status": "pending_payment",
                "created_at": "2026-03-01T08:30:00Z",
                "notes": null,
                "payment_proof_path": null
            },
            "items": [
                { "order_id": "0b7e4c1a-9d2f-4a63-8e15-6c3f2a9b7d40", "title": "Desain thumbnail", "qty": 1, "price": 40000 }
            ]
        }"#;

        let s: OrderSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(s.order.status, OrderStatus::PendingPayment);
        assert!(s.check().is_ok());
    }

    #[test]
    fn test_checkout_request_coupon_optional() {
        let json = r#"{ "lines": [ { "title": "Desain thumbnail", "price": 40000, "qty": 1 } ] }"#;
        let req: CheckoutRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.lines.len(), 1);
        assert!(req.coupon.is_none());
    }
}
