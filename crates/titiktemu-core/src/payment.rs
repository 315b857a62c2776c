//! # Payment Proof
//!
//! Naming rules for customer-uploaded transfer receipts. Storing the bytes
//! is done by whoever owns the object-storage client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;

/// Accepted image formats for a payment proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ProofFormat {
    Png,
    Jpeg,
    Webp,
}

impl ProofFormat {
    pub const ALLOWED_MIME_TYPES: [&'static str; 3] = ["image/png", "image/jpeg", "image/webp"];

    /// Maps an upload's MIME type to a format.
    ///
    /// ## Example
    /// ```rust
    /// use titiktemu_core::payment::ProofFormat;
    ///
    /// assert_eq!(ProofFormat::from_mime("image/jpeg").unwrap().extension(), "jpg");
    /// assert!(ProofFormat::from_mime("application/pdf").is_err());
    /// ```
    pub fn from_mime(mime: &str) -> Result<Self, ValidationError> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/png" => Ok(ProofFormat::Png),
            "image/jpeg" => Ok(ProofFormat::Jpeg),
            "image/webp" => Ok(ProofFormat::Webp),
            _ => Err(ValidationError::NotAllowed {
                field: "payment proof".to_string(),
                allowed: Self::ALLOWED_MIME_TYPES
                    .iter()
                    .map(|m| m.to_string())
                    .collect(),
            }),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ProofFormat::Png => "png",
            ProofFormat::Jpeg => "jpg",
            ProofFormat::Webp => "webp",
        }
    }
}

/// Object key for a proof: `payments/<user_id>/<order_id>/<unix_millis>.<ext>`.
pub fn proof_storage_path(
    user_id: &str,
    order_id: &str,
    format: ProofFormat,
    uploaded_at: DateTime<Utc>,
) -> String {
    format!(
        "payments/{}/{}/{}.{}",
        user_id,
        order_id,
        uploaded_at.timestamp_millis(),
        format.extension()
    )
}
