//! Search and status filtering for the fee list.
//!
//! Filtering is pure and stable: records keep their input order, an empty
//! search with no status filter returns every record, and applying the same
//! filter twice gives the same result as applying it once.

use shared::{FeeListRequest, FeeStatus, ParseEnumError};

use super::models::FeeRecord;

/// Search text and status predicates, ANDed together
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeeFilter {
    search: String,
    status: Option<FeeStatus>,
}

impl FeeFilter {
    pub fn new(search: &str, status: Option<FeeStatus>) -> Self {
        Self {
            search: search.trim().to_lowercase(),
            status,
        }
    }

    /// Build a filter from the raw screen inputs; an empty status string means no status filter
    pub fn from_request(request: &FeeListRequest) -> Result<Self, ParseEnumError> {
        let status = if request.status.trim().is_empty() {
            None
        } else {
            Some(request.status.parse::<FeeStatus>()?)
        };
        Ok(Self::new(&request.search, status))
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.status.is_none()
    }

    pub fn matches(&self, record: &FeeRecord) -> bool {
        self.matches_status(record) && self.matches_search(record)
    }

    fn matches_status(&self, record: &FeeRecord) -> bool {
        self.status.map_or(true, |status| record.status == status)
    }

    /// Case-insensitive substring match on the student name or any receipt number
    fn matches_search(&self, record: &FeeRecord) -> bool {
        if self.search.is_empty() {
            return true;
        }
        record.student.name.to_lowercase().contains(&self.search)
            || record
                .payments
                .iter()
                .any(|p| p.receipt_no.to_lowercase().contains(&self.search))
    }

    pub fn apply(&self, records: &[FeeRecord]) -> Vec<FeeRecord> {
        if self.is_empty() {
            return records.to_vec();
        }
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

/// Filter `records` by search text and optional status
pub fn filter_fees(records: &[FeeRecord], search: &str, status: Option<FeeStatus>) -> Vec<FeeRecord> {
    FeeFilter::new(search, status).apply(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Payment;
    use chrono::{NaiveDate, Utc};
    use shared::{EntityRef, PaymentMethod};

    fn fee(id: &str, student: &str, status: FeeStatus, receipts: &[&str]) -> FeeRecord {
        let now = Utc::now();
        let payments: Vec<Payment> = receipts
            .iter()
            .map(|receipt_no| Payment {
                amount: 1000.0,
                date: now,
                method: PaymentMethod::Cash,
                receipt_no: receipt_no.to_string(),
                reference: None,
                notes: None,
            })
            .collect();
        let total_paid = payments.iter().map(|p| p.amount).sum::<f64>();
        FeeRecord {
            id: id.to_string(),
            student: EntityRef::new(format!("stu-{}", id), student),
            class: EntityRef::new("cls-10", "Class 10"),
            section: EntityRef::new("sec-a", "A"),
            amount: 5000.0,
            due_date: NaiveDate::from_ymd_opt(2025, 4, 30).unwrap(),
            status,
            payments,
            fee_type: "Tuition".to_string(),
            academic_year: "2024-25".to_string(),
            term: "Term 1".to_string(),
            total_paid,
            remaining_balance: 5000.0 - total_paid,
            created_at: now,
            updated_at: now,
        }
    }

    fn create_test_records() -> Vec<FeeRecord> {
        vec![
            fee("1", "Aarav Sharma", FeeStatus::Paid, &["RCP-000001-001"]),
            fee("2", "Priya Patel", FeeStatus::Partial, &["RCP-000002-001"]),
            fee("3", "Rohan Gupta", FeeStatus::Pending, &[]),
            fee("4", "Ananya Iyer", FeeStatus::Overdue, &[]),
            fee("5", "Arjun Nair", FeeStatus::Partial, &["RCP-000005-001", "RCP-000005-002"]),
        ]
    }

    fn ids(records: &[FeeRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let records = create_test_records();
        assert_eq!(filter_fees(&records, "", None), records);
        assert_eq!(filter_fees(&records, "   ", None), records);
    }

    #[test]
    fn test_search_by_student_name_is_case_insensitive() {
        let records = create_test_records();
        let result = filter_fees(&records, "priya", None);
        assert_eq!(ids(&result), vec!["2"]);

        let result = filter_fees(&records, "SHARMA", None);
        assert_eq!(ids(&result), vec!["1"]);
    }

    #[test]
    fn test_search_by_receipt_number() {
        let records = create_test_records();
        let result = filter_fees(&records, "rcp-000005-002", None);
        assert_eq!(ids(&result), vec!["5"]);

        // Prefix shared by every receipt matches each record that has a payment
        let result = filter_fees(&records, "RCP-", None);
        assert_eq!(ids(&result), vec!["1", "2", "5"]);
    }

    #[test]
    fn test_status_filter() {
        let records = create_test_records();
        let result = filter_fees(&records, "", Some(FeeStatus::Partial));
        assert_eq!(ids(&result), vec!["2", "5"]);

        let result = filter_fees(&records, "", Some(FeeStatus::Overdue));
        assert_eq!(ids(&result), vec!["4"]);
    }

    #[test]
    fn test_search_and_status_are_anded() {
        let records = create_test_records();
        assert_eq!(ids(&filter_fees(&records, "a", Some(FeeStatus::Partial))), vec!["2", "5"]);
        assert!(filter_fees(&records, "priya", Some(FeeStatus::Paid)).is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let records = create_test_records();
        for (search, status) in [
            ("a", None),
            ("rcp", Some(FeeStatus::Partial)),
            ("", Some(FeeStatus::Pending)),
            ("nobody", None),
        ] {
            let once = filter_fees(&records, search, status);
            let twice = filter_fees(&once, search, status);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_from_request() {
        let filter = FeeFilter::from_request(&FeeListRequest {
            search: " Priya ".to_string(),
            status: "paid".to_string(),
        })
        .unwrap();
        assert_eq!(filter, FeeFilter::new("priya", Some(FeeStatus::Paid)));

        let filter = FeeFilter::from_request(&FeeListRequest::default()).unwrap();
        assert!(filter.is_empty());

        let result = FeeFilter::from_request(&FeeListRequest {
            search: String::new(),
            status: "cancelled".to_string(),
        });
        assert!(result.is_err());
    }
}
