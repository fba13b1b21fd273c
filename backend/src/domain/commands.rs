//! Domain-level command types.
//! These structs are used by services inside the domain layer. The hosting
//! screen maps its own request types (see the `shared` crate) onto them.

use chrono::NaiveDate;
use shared::{EntityRef, PaymentMethod, RecordPaymentRequest};

/// Input for creating a new fee record (fee generation happens outside the fee desk)
#[derive(Debug, Clone)]
pub struct CreateFeeRecordCommand {
    pub student: EntityRef,
    pub class: EntityRef,
    pub section: EntityRef,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub fee_type: String,
    pub academic_year: String,
    pub term: String,
}

/// Input for recording a payment against a stored fee record
#[derive(Debug, Clone)]
pub struct RecordPaymentCommand {
    pub fee_id: String,
    /// Amount exactly as typed, validated before anything is recorded
    pub amount_input: String,
    pub method: PaymentMethod,
    pub reference: Option<String>,
    pub note: Option<String>,
}

impl From<RecordPaymentRequest> for RecordPaymentCommand {
    fn from(request: RecordPaymentRequest) -> Self {
        Self {
            fee_id: request.fee_id,
            amount_input: request.amount_input,
            method: request.method,
            reference: request.reference,
            note: request.note,
        }
    }
}

/// Result of an overdue sweep
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverdueSweepResult {
    /// Fee ids newly marked Overdue
    pub marked_overdue: Vec<String>,
    pub checked: usize,
}
