//! Fee list formatting for the fee desk.
//!
//! Turns fee records into display rows for the list view and payment rows for
//! the payment history sheet. Pure formatting: no record is modified.

use chrono::{DateTime, NaiveDate, Utc};
use shared::{FeeDeskConfig, FeeStatus, FormattedFeeRow, FormattedPayment, StatusTone};

use super::models::{FeeRecord, Payment};

#[derive(Debug, Clone)]
pub struct FeeTableService {
    config: FeeDeskConfig,
}

impl Default for FeeTableService {
    fn default() -> Self {
        Self::new()
    }
}

impl FeeTableService {
    pub fn new() -> Self {
        Self {
            config: FeeDeskConfig::default(),
        }
    }

    pub fn with_config(config: FeeDeskConfig) -> Self {
        Self { config }
    }

    pub fn format_fees_for_table(&self, records: &[FeeRecord]) -> Vec<FormattedFeeRow> {
        records.iter().map(|r| self.format_single_fee(r)).collect()
    }

    pub fn format_single_fee(&self, record: &FeeRecord) -> FormattedFeeRow {
        FormattedFeeRow {
            id: record.id.clone(),
            student_name: record.student.name.clone(),
            class_label: format!("{} - {}", record.class.name, record.section.name),
            fee_type: record.fee_type.clone(),
            term_label: format!("{} ({})", record.term, record.academic_year),
            formatted_amount: self.format_amount(record.amount),
            formatted_paid: self.format_amount(record.total_paid),
            formatted_balance: self.format_amount(record.remaining_balance),
            formatted_due_date: self.format_date(record.due_date),
            status_label: record.status.label().to_string(),
            status_tone: self.status_tone(record.status),
            payment_count: record.payments.len(),
            raw_amount: record.amount,
            raw_balance: record.remaining_balance,
        }
    }

    /// Payment history in the order payments were recorded
    pub fn format_payment_history(&self, record: &FeeRecord) -> Vec<FormattedPayment> {
        record.payments.iter().map(|p| self.format_payment(p)).collect()
    }

    pub fn format_payment(&self, payment: &Payment) -> FormattedPayment {
        FormattedPayment {
            receipt_no: payment.receipt_no.clone(),
            formatted_date: self.format_timestamp(payment.date),
            formatted_amount: self.format_amount(payment.amount),
            method_label: payment.method.label().to_string(),
            reference: payment.reference.clone(),
            notes: payment.notes.clone(),
        }
    }

    /// Negative balances (over-payment) keep their sign
    pub fn format_amount(&self, amount: f64) -> String {
        if amount < 0.0 {
            format!("-{}{:.2}", self.config.currency_symbol, amount.abs())
        } else {
            format!("{}{:.2}", self.config.currency_symbol, amount)
        }
    }

    /// "15 Jun 2025"
    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format("%d %b %Y").to_string()
    }

    /// "15 Jun 2025, 10:30"
    pub fn format_timestamp(&self, timestamp: DateTime<Utc>) -> String {
        timestamp.format("%d %b %Y, %H:%M").to_string()
    }

    pub fn status_tone(&self, status: FeeStatus) -> StatusTone {
        match status {
            FeeStatus::Pending => StatusTone::Neutral,
            FeeStatus::Partial => StatusTone::Warning,
            FeeStatus::Paid => StatusTone::Success,
            FeeStatus::Overdue => StatusTone::Danger,
        }
    }

    pub fn status_css_class(&self, status: FeeStatus) -> &'static str {
        match self.status_tone(status) {
            StatusTone::Neutral => "badge pending",
            StatusTone::Warning => "badge partial",
            StatusTone::Success => "badge paid",
            StatusTone::Danger => "badge overdue",
        }
    }
}
