//! Collection summary over a set of fee records.
//!
//! `pending` keeps the screen's historical meaning: the full fee amount of every
//! record that is not Paid, so partly paid fees count their whole amount.
//! `outstanding` is the balance actually still owed on those records.

use shared::{FeeStatus, FeeSummary};

use super::models::FeeRecord;

pub fn summarize(records: &[FeeRecord]) -> FeeSummary {
    records.iter().fold(
        FeeSummary {
            student_count: records.len(),
            ..FeeSummary::default()
        },
        |mut summary, record| {
            summary.received += record.total_paid;
            match record.status {
                FeeStatus::Paid => {
                    summary.collected += record.amount;
                    summary.paid_count += 1;
                }
                status => {
                    summary.pending += record.amount;
                    summary.outstanding += record.remaining_balance;
                    match status {
                        FeeStatus::Pending => summary.pending_count += 1,
                        FeeStatus::Partial => summary.partial_count += 1,
                        FeeStatus::Overdue => summary.overdue_count += 1,
                        FeeStatus::Paid => {}
                    }
                }
            }
            summary
        },
    )
}

/// Share of the billed total that has been received, in percent
pub fn collection_rate(summary: &FeeSummary) -> f64 {
    let billed = summary.collected + summary.pending;
    if billed <= 0.0 {
        0.0
    } else {
        summary.received / billed * 100.0
    }
}
