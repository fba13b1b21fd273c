//! Mock fee records the fee screen seeds itself with.
//!
//! Eight students across a few classes: three fully paid, two partly paid,
//! two pending and one overdue. Due dates and payment dates are relative to
//! `today` so the set stays plausible whenever it is generated.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use shared::{EntityRef, FeeStatus, PaymentMethod};

use super::commands::CreateFeeRecordCommand;
use super::errors::PaymentValidationError;
use super::models::FeeRecord;
use super::payment_ledger::{PaymentInput, PaymentLedger};

const ACADEMIC_YEAR: &str = "2025-26";

struct SampleFee {
    student: (&'static str, &'static str),
    class: (&'static str, &'static str),
    section: (&'static str, &'static str),
    amount: f64,
    fee_type: &'static str,
    due_in_days: i64,
    payments: &'static [(f64, PaymentMethod, i64)],
    overdue: bool,
}

const SAMPLE_FEES: &[SampleFee] = &[
    SampleFee {
        student: ("stu-101", "Aarav Sharma"),
        class: ("cls-10", "Class 10"),
        section: ("sec-10a", "A"),
        amount: 45000.0,
        fee_type: "Tuition",
        due_in_days: -20,
        payments: &[(45000.0, PaymentMethod::Upi, 25)],
        overdue: false,
    },
    SampleFee {
        student: ("stu-102", "Priya Patel"),
        class: ("cls-9", "Class 9"),
        section: ("sec-9b", "B"),
        amount: 50000.0,
        fee_type: "Tuition",
        due_in_days: 10,
        payments: &[(20000.0, PaymentMethod::Cash, 5)],
        overdue: false,
    },
    SampleFee {
        student: ("stu-103", "Rohan Gupta"),
        class: ("cls-8", "Class 8"),
        section: ("sec-8c", "C"),
        amount: 40000.0,
        fee_type: "Tuition",
        due_in_days: 15,
        payments: &[],
        overdue: false,
    },
    SampleFee {
        student: ("stu-104", "Ananya Iyer"),
        class: ("cls-10", "Class 10"),
        section: ("sec-10a", "A"),
        amount: 50000.0,
        fee_type: "Tuition",
        due_in_days: -5,
        payments: &[
            (30000.0, PaymentMethod::Card, 30),
            (20000.0, PaymentMethod::BankTransfer, 8),
        ],
        overdue: false,
    },
    SampleFee {
        student: ("stu-105", "Vikram Singh"),
        class: ("cls-7", "Class 7"),
        section: ("sec-7a", "A"),
        amount: 45000.0,
        fee_type: "Tuition",
        due_in_days: -12,
        payments: &[],
        overdue: true,
    },
    SampleFee {
        student: ("stu-106", "Sneha Reddy"),
        class: ("cls-9", "Class 9"),
        section: ("sec-9b", "B"),
        amount: 50000.0,
        fee_type: "Tuition",
        due_in_days: 3,
        payments: &[(50000.0, PaymentMethod::BankTransfer, 2)],
        overdue: false,
    },
    SampleFee {
        student: ("stu-107", "Arjun Nair"),
        class: ("cls-6", "Class 6"),
        section: ("sec-6b", "B"),
        amount: 40000.0,
        fee_type: "Transport",
        due_in_days: 25,
        payments: &[],
        overdue: false,
    },
    SampleFee {
        student: ("stu-108", "Kavya Menon"),
        class: ("cls-7", "Class 7"),
        section: ("sec-7a", "A"),
        amount: 45000.0,
        fee_type: "Tuition",
        due_in_days: 7,
        payments: &[(15000.0, PaymentMethod::Upi, 1)],
        overdue: false,
    },
];

/// Generate the sample fee records as of `today`
pub fn sample_fee_records(today: NaiveDate) -> Result<Vec<FeeRecord>, PaymentValidationError> {
    let ledger = PaymentLedger::new();
    let morning = morning_of(today);

    SAMPLE_FEES
        .iter()
        .map(|sample| {
            let created_at = morning - Duration::days(45);
            let mut record = FeeRecord::create(
                CreateFeeRecordCommand {
                    student: EntityRef::new(sample.student.0, sample.student.1),
                    class: EntityRef::new(sample.class.0, sample.class.1),
                    section: EntityRef::new(sample.section.0, sample.section.1),
                    amount: sample.amount,
                    due_date: today + Duration::days(sample.due_in_days),
                    fee_type: sample.fee_type.to_string(),
                    academic_year: ACADEMIC_YEAR.to_string(),
                    term: "Term 1".to_string(),
                },
                created_at,
            );

            for (amount, method, days_ago) in sample.payments {
                let paid_at = morning - Duration::days(*days_ago);
                record = ledger.apply_payment_at(&record, PaymentInput::new(*amount, *method), paid_at)?;
            }

            // Lateness was assigned once when the data was generated
            if sample.overdue {
                record.status = FeeStatus::Overdue;
            }

            Ok(record)
        })
        .collect()
}

fn morning_of(day: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_hms_opt(10, 0, 0).unwrap_or_default())
}
