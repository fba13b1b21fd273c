//! Domain model for a student fee record.
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::{EntityRef, FeeStatus};
use uuid::Uuid;

use super::payment::Payment;
use crate::domain::commands::CreateFeeRecordCommand;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeRecord {
    pub id: String,
    pub student: EntityRef,
    pub class: EntityRef,
    pub section: EntityRef,
    /// Total fee due, fixed at creation
    pub amount: f64,
    pub due_date: NaiveDate,
    pub status: FeeStatus,
    /// Append-only, in the order payments were recorded
    pub payments: Vec<Payment>,
    pub fee_type: String,
    pub academic_year: String,
    pub term: String,
    pub total_paid: f64,
    pub remaining_balance: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FeeRecord {
    pub fn generate_id() -> String {
        format!("fee-{}", Uuid::new_v4())
    }

    /// A freshly generated fee: no payments, Pending, full balance owed
    pub fn create(command: CreateFeeRecordCommand, now: DateTime<Utc>) -> Self {
        Self {
            id: Self::generate_id(),
            student: command.student,
            class: command.class,
            section: command.section,
            amount: command.amount,
            due_date: command.due_date,
            status: FeeStatus::Pending,
            payments: Vec::new(),
            fee_type: command.fee_type,
            academic_year: command.academic_year,
            term: command.term,
            total_paid: 0.0,
            remaining_balance: command.amount,
            created_at: now,
            updated_at: now,
        }
    }

    /// Status implied by a paid total.
    ///
    /// Overdue is sticky: a partial payment on an overdue record keeps it
    /// Overdue, only full settlement moves it to Paid.
    pub fn derive_status(amount: f64, total_paid: f64, current: FeeStatus) -> FeeStatus {
        let paid = to_paise(total_paid);
        if paid >= to_paise(amount) {
            FeeStatus::Paid
        } else if current == FeeStatus::Overdue {
            FeeStatus::Overdue
        } else if paid > 0 {
            FeeStatus::Partial
        } else {
            FeeStatus::Pending
        }
    }

    /// Restore `total_paid`, `remaining_balance` and `status` from the payment list.
    /// Sums are taken in paise so instalments that add up to the fee settle it exactly.
    pub fn recompute(&mut self) {
        let paid: i64 = self.payments.iter().map(|p| to_paise(p.amount)).sum();
        self.total_paid = from_paise(paid);
        self.remaining_balance = from_paise(to_paise(self.amount) - paid);
        self.status = Self::derive_status(self.amount, self.total_paid, self.status);
    }

    pub fn is_fully_paid(&self) -> bool {
        to_paise(self.total_paid) >= to_paise(self.amount)
    }

    /// True when the fee is not settled and its due date is before `today`.
    /// Independent of the stored status, which only the overdue sweep updates.
    pub fn is_overdue_on(&self, today: NaiveDate) -> bool {
        !self.is_fully_paid() && self.due_date < today
    }

    pub fn has_receipt(&self, receipt_no: &str) -> bool {
        self.payments.iter().any(|p| p.receipt_no == receipt_no)
    }

    pub fn last_payment(&self) -> Option<&Payment> {
        self.payments.last()
    }
}

/// Amount in whole paise, rounded to the nearest
pub fn to_paise(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

pub fn from_paise(paise: i64) -> f64 {
    paise as f64 / 100.0
}
