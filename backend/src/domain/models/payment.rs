//! Domain model for a payment recorded against a fee record.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::PaymentMethod;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Always positive
    pub amount: f64,
    pub date: DateTime<Utc>,
    pub method: PaymentMethod,
    /// Unique within the owning fee record's payment list
    pub receipt_no: String,
    pub reference: Option<String>,
    pub notes: Option<String>,
}

impl Payment {
    /// Generate the next receipt number for a fee record.
    ///
    /// Format: `<prefix>-<fee tag>-<sequence>`, e.g. `RCP-4F2A9C-003`.
    /// The sequence starts after the existing payment count and skips any
    /// number already present, so the result never collides with `existing`.
    pub fn next_receipt_no(prefix: &str, fee_id: &str, existing: &[Payment]) -> String {
        let tag = Self::fee_tag(fee_id);
        let mut sequence = existing.len() + 1;
        loop {
            let candidate = format!("{}-{}-{:03}", prefix, tag, sequence);
            if !existing.iter().any(|p| p.receipt_no == candidate) {
                return candidate;
            }
            sequence += 1;
        }
    }

    /// Short uppercase tag derived from the tail of a fee id
    fn fee_tag(fee_id: &str) -> String {
        let cleaned: Vec<char> = fee_id
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_uppercase())
            .collect();
        let start = cleaned.len().saturating_sub(6);
        let tag: String = cleaned[start..].iter().collect();
        if tag.is_empty() {
            "FEE".to_string()
        } else {
            tag
        }
    }
}
