//! Fee ledger service for the fee desk.
//!
//! Orchestrates the record store and the pure fee functions: listing with a
//! filter, recording payments by fee id, the collection summary and the
//! overdue sweep. Every write goes through `FeeStorage::update_fee` with a
//! record produced from the stored copy, so a failed call leaves the store
//! exactly as it was and concurrent writers never overwrite each other.

use chrono::{NaiveDate, Utc};
use log::{info, warn};
use shared::{FeeDeskConfig, FeeListRequest, FeeStatus, FeeSummary, PaymentFormState};
use std::sync::Arc;

use super::commands::{OverdueSweepResult, RecordPaymentCommand};
use super::errors::{FeeLedgerError, PaymentValidationError};
use super::fee_filter::FeeFilter;
use super::fee_summary::summarize;
use super::models::FeeRecord;
use super::payment_form::PaymentFormService;
use super::payment_ledger::{PaymentInput, PaymentLedger};
use crate::storage::FeeStorage;

#[derive(Clone)]
pub struct FeeLedgerService<S: FeeStorage> {
    storage: Arc<S>,
    ledger: PaymentLedger,
    form_service: PaymentFormService,
}

impl<S: FeeStorage> FeeLedgerService<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self::with_config(storage, FeeDeskConfig::default())
    }

    pub fn with_config(storage: Arc<S>, config: FeeDeskConfig) -> Self {
        Self {
            storage,
            ledger: PaymentLedger::with_receipt_prefix(config.receipt_prefix.clone()),
            form_service: PaymentFormService::with_config(config),
        }
    }

    pub fn form_service(&self) -> &PaymentFormService {
        &self.form_service
    }

    pub fn list_fees(&self, filter: &FeeFilter) -> Result<Vec<FeeRecord>, FeeLedgerError> {
        let records = self.storage.list_fees()?;
        Ok(filter.apply(&records))
    }

    /// List using the raw search box and status chip values
    pub fn list_fees_for_request(&self, request: &FeeListRequest) -> Result<Vec<FeeRecord>, FeeLedgerError> {
        let filter = FeeFilter::from_request(request)?;
        self.list_fees(&filter)
    }

    pub fn get_fee(&self, fee_id: &str) -> Result<FeeRecord, FeeLedgerError> {
        self.storage
            .get_fee(fee_id)?
            .ok_or_else(|| FeeLedgerError::NotFound(fee_id.to_string()))
    }

    pub fn summary(&self) -> Result<FeeSummary, FeeLedgerError> {
        Ok(summarize(&self.storage.list_fees()?))
    }

    /// Validate the typed amount, apply the payment and store the updated record
    pub fn record_payment(&self, command: RecordPaymentCommand) -> Result<FeeRecord, FeeLedgerError> {
        let note = command.note.as_deref().unwrap_or("");
        let amount = self
            .form_service
            .parse_payment_amount(&command.amount_input, note)?;

        let input = PaymentInput {
            amount,
            method: command.method,
            reference: command.reference,
            note: command.note,
        };
        let ledger = &self.ledger;
        let now = Utc::now();

        // Read, apply and store under one write so overlapping submits on the
        // same fee cannot drop a payment
        let stored = self
            .storage
            .update_fee(&command.fee_id, |record| Ok(ledger.apply_payment_at(record, input, now)?));

        match stored {
            Ok(Some(updated)) => Ok(updated),
            Ok(None) => {
                warn!("Payment for unknown fee record {}", command.fee_id);
                Err(FeeLedgerError::NotFound(command.fee_id))
            }
            Err(err) => Err(match err.downcast::<PaymentValidationError>() {
                Ok(validation) => FeeLedgerError::Validation(validation),
                Err(other) => FeeLedgerError::Storage(other),
            }),
        }
    }

    /// Put the form into the submitting state.
    /// Rejects a second submission while one is already in flight.
    pub fn begin_submission(&self, form: &mut PaymentFormState) -> Result<(), FeeLedgerError> {
        let fee_id = form.fee_id.clone().unwrap_or_default();
        match self.form_service.set_form_submitting(form.clone()) {
            Some(submitting) => {
                *form = submitting;
                Ok(())
            }
            None => {
                warn!("Ignoring repeated payment submission for fee {}", fee_id);
                Err(FeeLedgerError::SubmissionInProgress(fee_id))
            }
        }
    }

    /// Record the payment described by a submitting form and move the form to
    /// its success or error state
    pub fn complete_submission(&self, form: &mut PaymentFormState) -> Result<FeeRecord, FeeLedgerError> {
        let command = RecordPaymentCommand {
            fee_id: form.fee_id.clone().unwrap_or_default(),
            amount_input: form.amount_input.clone(),
            method: form.method,
            reference: Some(form.reference.clone()),
            note: Some(form.note.clone()),
        };

        match self.record_payment(command) {
            Ok(updated) => {
                let message = match updated.last_payment() {
                    Some(payment) => self
                        .form_service
                        .generate_success_message(payment.amount, &payment.receipt_no),
                    None => "Payment recorded".to_string(),
                };
                *form = self.form_service.clear_form_after_success(form.clone(), message);
                Ok(updated)
            }
            Err(err) => {
                *form = self.form_service.set_form_error(form.clone(), err.to_string());
                Err(err)
            }
        }
    }

    pub fn submit_payment(&self, form: &mut PaymentFormState) -> Result<FeeRecord, FeeLedgerError> {
        self.begin_submission(form)?;
        self.complete_submission(form)
    }

    /// Records that are past due and not settled on `today`, whatever their stored status
    pub fn overdue_on(&self, today: NaiveDate) -> Result<Vec<FeeRecord>, FeeLedgerError> {
        Ok(self
            .storage
            .list_fees()?
            .into_iter()
            .filter(|r| r.is_overdue_on(today))
            .collect())
    }

    /// Mark Pending and Partial records that are past due as Overdue.
    /// Paid records are never touched and nothing is moved out of Overdue.
    pub fn refresh_overdue(&self, today: NaiveDate) -> Result<OverdueSweepResult, FeeLedgerError> {
        let records = self.storage.list_fees()?;
        let mut result = OverdueSweepResult {
            checked: records.len(),
            ..OverdueSweepResult::default()
        };

        for record in records {
            let mut marked = false;
            // Re-checked against the stored copy in case a payment landed since the listing
            self.storage.update_fee(&record.id, |current| {
                let mut current = current.clone();
                let eligible = matches!(current.status, FeeStatus::Pending | FeeStatus::Partial);
                if eligible && current.is_overdue_on(today) {
                    current.status = FeeStatus::Overdue;
                    current.updated_at = Utc::now();
                    marked = true;
                }
                Ok(current)
            })?;
            if marked {
                result.marked_overdue.push(record.id);
            }
        }

        info!(
            "Overdue sweep for {}: {} of {} records marked overdue",
            today,
            result.marked_overdue.len(),
            result.checked
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample_data::sample_fee_records;
    use crate::storage::InMemoryFeeStore;
    use shared::{PaymentMethod, RecordPaymentRequest};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn create_test_service() -> (FeeLedgerService<InMemoryFeeStore>, Arc<InMemoryFeeStore>) {
        let records = sample_fee_records(today()).unwrap();
        let store = Arc::new(InMemoryFeeStore::with_records(records).unwrap());
        (FeeLedgerService::new(store.clone()), store)
    }

    fn find_by_name(service: &FeeLedgerService<InMemoryFeeStore>, name: &str) -> FeeRecord {
        service
            .list_fees(&FeeFilter::new(name, None))
            .unwrap()
            .into_iter()
            .next()
            .unwrap()
    }

    fn command(fee_id: &str, amount_input: &str, method: PaymentMethod) -> RecordPaymentCommand {
        RecordPaymentCommand {
            fee_id: fee_id.to_string(),
            amount_input: amount_input.to_string(),
            method,
            reference: None,
            note: None,
        }
    }

    #[test]
    fn test_list_fees_for_request() {
        let (service, _) = create_test_service();

        let all = service.list_fees_for_request(&FeeListRequest::default()).unwrap();
        assert_eq!(all.len(), 8);

        let paid = service
            .list_fees_for_request(&FeeListRequest {
                search: String::new(),
                status: "paid".to_string(),
            })
            .unwrap();
        assert_eq!(paid.len(), 3);

        let err = service
            .list_fees_for_request(&FeeListRequest {
                search: String::new(),
                status: "refunded".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, FeeLedgerError::InvalidFilter(_)));
    }

    #[test]
    fn test_record_payment_updates_store() {
        let (service, store) = create_test_service();
        let rohan = find_by_name(&service, "Rohan");

        let request = RecordPaymentRequest {
            fee_id: rohan.id.clone(),
            amount_input: "40,000".to_string(),
            method: PaymentMethod::Upi,
            reference: Some("UPI-88213".to_string()),
            note: None,
        };
        let updated = service.record_payment(request.into()).unwrap();

        assert_eq!(updated.status, FeeStatus::Paid);
        assert_eq!(updated.remaining_balance, 0.0);
        assert_eq!(updated.payments[0].reference.as_deref(), Some("UPI-88213"));
        assert_eq!(store.get_fee(&rohan.id).unwrap(), Some(updated));

        let summary = service.summary().unwrap();
        assert_eq!(summary.paid_count, 4);
        assert_eq!(summary.collected, 185000.0);
    }

    #[test]
    fn test_record_payment_validation_leaves_store_unchanged() {
        let (service, store) = create_test_service();
        let before = store.list_fees().unwrap();
        let priya = find_by_name(&service, "Priya");

        for input in ["0", "-100", "abc", ""] {
            let err = service
                .record_payment(command(&priya.id, input, PaymentMethod::Cash))
                .unwrap_err();
            assert!(err.is_validation(), "input {:?} gave {:?}", input, err);
            assert!(matches!(
                err,
                FeeLedgerError::Validation(PaymentValidationError::InvalidForm { .. })
            ));
        }

        assert_eq!(store.list_fees().unwrap(), before);
    }

    #[test]
    fn test_record_payment_unknown_fee() {
        let (service, store) = create_test_service();
        let before = store.list_fees().unwrap();

        let err = service
            .record_payment(command("fee-gone", "100", PaymentMethod::Cash))
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Fee record fee-gone was not found");
        assert_eq!(store.list_fees().unwrap(), before);
    }

    #[test]
    fn test_record_payment_after_external_removal() {
        let (service, store) = create_test_service();
        let priya = find_by_name(&service, "Priya");
        let mut form = service.form_service().open_form(&priya);

        // Removed by its owner between opening the form and submitting it
        store.remove_fee(&priya.id).unwrap();
        let before = store.list_fees().unwrap();

        let err = service.submit_payment(&mut form).unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(store.list_fees().unwrap(), before);
        assert!(!form.is_submitting);
        assert!(form.error_message.is_some());
    }

    #[test]
    fn test_submit_payment_success_resets_form() {
        let (service, _) = create_test_service();
        let kavya = find_by_name(&service, "Kavya");
        let mut form = service.form_service().open_form(&kavya);
        form.amount_input = "10000".to_string();
        form.method = PaymentMethod::Card;
        form.note = "second instalment".to_string();

        let updated = service.submit_payment(&mut form).unwrap();

        assert_eq!(updated.status, FeeStatus::Partial);
        assert_eq!(updated.total_paid, 25000.0);
        assert_eq!(updated.payments[1].notes.as_deref(), Some("second instalment"));
        assert!(form.show_success);
        assert!(!form.is_submitting);
        assert!(form.amount_input.is_empty());
        let message = form.success_message.unwrap();
        assert!(message.contains(&updated.payments[1].receipt_no));
    }

    #[test]
    fn test_second_submission_is_rejected_while_in_flight() {
        let (service, store) = create_test_service();
        let arjun = find_by_name(&service, "Arjun");
        let mut form = service.form_service().open_form(&arjun);

        service.begin_submission(&mut form).unwrap();
        let err = service.submit_payment(&mut form).unwrap_err();
        assert!(matches!(err, FeeLedgerError::SubmissionInProgress(ref id) if *id == arjun.id));
        assert!(store.get_fee(&arjun.id).unwrap().unwrap().payments.is_empty());

        let updated = service.complete_submission(&mut form).unwrap();
        assert_eq!(updated.payments.len(), 1);
        assert_eq!(updated.status, FeeStatus::Paid);
    }

    #[test]
    fn test_submit_invalid_amount_keeps_form_open() {
        let (service, _) = create_test_service();
        let arjun = find_by_name(&service, "Arjun");
        let mut form = service.form_service().open_form(&arjun);
        form.amount_input = "twelve".to_string();

        let err = service.submit_payment(&mut form).unwrap_err();

        assert!(err.is_validation());
        assert_eq!(form.amount_input, "twelve");
        assert!(!form.is_submitting);
        assert!(form.error_message.unwrap().starts_with("Please enter a valid amount"));
    }

    #[test]
    fn test_refresh_overdue() {
        let (service, store) = create_test_service();
        let later = today() + chrono::Duration::days(12);

        let result = service.refresh_overdue(later).unwrap();

        // Priya and Kavya are partly paid and lapse; Vikram was already overdue
        let names: Vec<String> = result
            .marked_overdue
            .iter()
            .map(|id| store.get_fee(id).unwrap().unwrap().student.name)
            .collect();
        assert_eq!(names, vec!["Priya Patel", "Kavya Menon"]);
        assert_eq!(result.checked, 8);

        let paid = service.list_fees(&FeeFilter::new("", Some(FeeStatus::Paid))).unwrap();
        assert_eq!(paid.len(), 3);

        // Already-overdue records are not reported again
        let again = service.refresh_overdue(later).unwrap();
        assert!(again.marked_overdue.is_empty());
    }

    #[test]
    fn test_overdue_on_is_derived_from_due_date() {
        let (service, _) = create_test_service();

        let overdue = service.overdue_on(today()).unwrap();
        let names: Vec<&str> = overdue.iter().map(|r| r.student.name.as_str()).collect();
        assert_eq!(names, vec!["Vikram Singh"]);
    }

    #[test]
    fn test_record_small_positive_payment() {
        let (service, _) = create_test_service();
        let rohan = find_by_name(&service, "Rohan");

        let updated = service
            .record_payment(command(&rohan.id, "0.50", PaymentMethod::Cash))
            .unwrap();

        assert_eq!(updated.status, FeeStatus::Partial);
        assert_eq!(updated.total_paid, 0.5);
        assert_eq!(updated.remaining_balance, 39999.5);
    }

    #[test]
    fn test_overlapping_payments_on_one_fee_are_all_kept() {
        let (service, store) = create_test_service();
        let rohan = find_by_name(&service, "Rohan");

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    service
                        .record_payment(command(&rohan.id, "1000", PaymentMethod::Cash))
                        .unwrap();
                });
            }
        });

        let stored = store.get_fee(&rohan.id).unwrap().unwrap();
        assert_eq!(stored.payments.len(), 8);
        assert_eq!(stored.total_paid, 8000.0);
        assert_eq!(stored.remaining_balance, 32000.0);
        assert_eq!(stored.status, FeeStatus::Partial);

        let receipts: std::collections::HashSet<&str> =
            stored.payments.iter().map(|p| p.receipt_no.as_str()).collect();
        assert_eq!(receipts.len(), 8);
    }

    #[test]
    fn test_custom_receipt_prefix() {
        let records = sample_fee_records(today()).unwrap();
        let store = Arc::new(InMemoryFeeStore::with_records(records).unwrap());
        let service = FeeLedgerService::with_config(
            store,
            FeeDeskConfig {
                receipt_prefix: "SCH".to_string(),
                ..FeeDeskConfig::default()
            },
        );
        let rohan = find_by_name(&service, "Rohan");

        let updated = service
            .record_payment(command(&rohan.id, "1000", PaymentMethod::Cash))
            .unwrap();

        assert!(updated.payments[0].receipt_no.starts_with("SCH-"));
        let found = service
            .list_fees(&FeeFilter::new(&updated.payments[0].receipt_no, None))
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, rohan.id);
    }
}
