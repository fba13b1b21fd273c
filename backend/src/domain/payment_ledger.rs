//! Payment ledger logic for fee records.
//!
//! Applying a payment is a pure transform: the caller passes a fee record and
//! gets back a new record with the payment appended and the derived fields
//! (`total_paid`, `remaining_balance`, `status`, `updated_at`) recomputed.
//! Storing the result is the caller's job.
//!
//! ## Status rules
//!
//! - `total_paid >= amount` → Paid
//! - `0 < total_paid < amount` → Partial
//! - `total_paid == 0` → Pending
//!
//! Overdue is never produced here. A record that is already Overdue stays
//! Overdue after a partial payment and becomes Paid once fully settled.
//!
//! The remaining balance is not floored at zero; over-payment yields a
//! negative balance and is left to the form layer to prevent.

use chrono::{DateTime, Utc};
use log::{debug, info};
use shared::PaymentMethod;

use super::errors::PaymentValidationError;
use super::models::{FeeRecord, Payment};

/// A payment as entered, before it is assigned a date and receipt number
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentInput {
    pub amount: f64,
    pub method: PaymentMethod,
    pub reference: Option<String>,
    pub note: Option<String>,
}

impl PaymentInput {
    pub fn new(amount: f64, method: PaymentMethod) -> Self {
        Self {
            amount,
            method,
            reference: None,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }
}

/// Applies payments to fee records
#[derive(Debug, Clone)]
pub struct PaymentLedger {
    receipt_prefix: String,
}

impl Default for PaymentLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl PaymentLedger {
    pub fn new() -> Self {
        Self {
            receipt_prefix: "RCP".to_string(),
        }
    }

    pub fn with_receipt_prefix(receipt_prefix: impl Into<String>) -> Self {
        Self {
            receipt_prefix: receipt_prefix.into(),
        }
    }

    /// Record a payment of `amount` made now
    pub fn apply_payment(
        &self,
        record: &FeeRecord,
        amount: f64,
        method: PaymentMethod,
        note: Option<String>,
    ) -> Result<FeeRecord, PaymentValidationError> {
        let input = PaymentInput {
            amount,
            method,
            reference: None,
            note,
        };
        self.apply_payment_at(record, input, Utc::now())
    }

    /// Record a payment with an explicit timestamp
    pub fn apply_payment_at(
        &self,
        record: &FeeRecord,
        input: PaymentInput,
        now: DateTime<Utc>,
    ) -> Result<FeeRecord, PaymentValidationError> {
        validate_amount(input.amount)?;

        let receipt_no = Payment::next_receipt_no(&self.receipt_prefix, &record.id, &record.payments);
        let payment = Payment {
            amount: input.amount,
            date: now,
            method: input.method,
            receipt_no,
            reference: non_blank(input.reference),
            notes: non_blank(input.note),
        };

        let previous_status = record.status;
        let mut updated = record.clone();
        updated.payments.push(payment);
        updated.recompute();
        updated.updated_at = now;

        info!(
            "Recorded {:.2} via {} on fee {} ({} -> {}), remaining {:.2}",
            input.amount,
            input.method,
            updated.id,
            previous_status,
            updated.status,
            updated.remaining_balance
        );
        debug!("Fee {} now has {} payments", updated.id, updated.payments.len());

        Ok(updated)
    }
}

/// A payment amount must be a finite number greater than zero
pub fn validate_amount(amount: f64) -> Result<f64, PaymentValidationError> {
    if !amount.is_finite() {
        return Err(PaymentValidationError::NonFiniteAmount);
    }
    if amount <= 0.0 {
        return Err(PaymentValidationError::NonPositiveAmount(amount));
    }
    Ok(amount)
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}
