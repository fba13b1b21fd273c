//! Record-payment form logic for the fee desk.
//!
//! This module contains the business rules behind the payment modal: amount
//! parsing and validation, user-facing error messages, and the form state
//! transitions (open, submitting, error, success). The screen only renders the
//! state it is handed.

use log::debug;
use shared::{FeeDeskConfig, PaymentFormError, PaymentFormState, PaymentFormValidation, PaymentMethod};

use super::errors::PaymentValidationError;
use super::models::FeeRecord;

#[derive(Debug, Clone)]
pub struct PaymentFormService {
    config: FeeDeskConfig,
}

impl Default for PaymentFormService {
    fn default() -> Self {
        Self::new()
    }
}

impl PaymentFormService {
    pub fn new() -> Self {
        Self {
            config: FeeDeskConfig::default(),
        }
    }

    pub fn with_config(config: FeeDeskConfig) -> Self {
        Self { config }
    }

    /// Form state for a modal opened on `record`, pre-filled with the remaining balance
    pub fn open_form(&self, record: &FeeRecord) -> PaymentFormState {
        let prefill = if record.remaining_balance > 0.0 {
            format!("{:.2}", record.remaining_balance)
        } else {
            String::new()
        };
        PaymentFormState {
            fee_id: Some(record.id.clone()),
            amount_input: prefill,
            method: PaymentMethod::Cash,
            ..PaymentFormState::default()
        }
    }

    /// Validate the amount and note fields of the payment form
    pub fn validate_payment_form(&self, amount_input: &str, note: &str) -> PaymentFormValidation {
        let mut errors = Vec::new();
        let mut suggestions = Vec::new();

        let cleaned_amount = if amount_input.trim().is_empty() {
            errors.push(PaymentFormError::EmptyAmount);
            suggestions.push("Enter the amount received, like 5000 or 12,500".to_string());
            None
        } else {
            match self.clean_and_parse_amount(amount_input) {
                Ok(amount) if !amount.is_finite() => {
                    errors.push(PaymentFormError::InvalidAmountFormat("amount is not a finite number".to_string()));
                    None
                }
                Ok(amount) if amount <= 0.0 => {
                    errors.push(PaymentFormError::AmountNotPositive);
                    suggestions.push("Amount must be greater than 0".to_string());
                    None
                }
                Ok(amount) if amount < self.config.min_amount => {
                    errors.push(PaymentFormError::AmountTooSmall(self.config.min_amount));
                    None
                }
                Ok(amount) if amount > self.config.max_amount => {
                    errors.push(PaymentFormError::AmountTooLarge(self.config.max_amount));
                    None
                }
                Ok(amount) if has_too_many_decimal_places(amount) => {
                    errors.push(PaymentFormError::AmountPrecisionTooHigh);
                    suggestions.push("Use at most 2 decimal places".to_string());
                    None
                }
                Ok(amount) => Some(amount),
                Err(parse_error) => {
                    errors.push(PaymentFormError::InvalidAmountFormat(parse_error));
                    suggestions.push("Enter a valid number like 5000 or 5000.50".to_string());
                    None
                }
            }
        };

        let note_length = note.trim().chars().count();
        if note_length > self.config.max_note_length {
            errors.push(PaymentFormError::NoteTooLong(note_length));
        }

        PaymentFormValidation {
            is_valid: errors.is_empty(),
            errors,
            cleaned_amount,
            suggestions,
        }
    }

    /// Validated amount, or the validation error the ledger surfaces
    pub fn parse_payment_amount(&self, amount_input: &str, note: &str) -> Result<f64, PaymentValidationError> {
        let validation = self.validate_payment_form(amount_input, note);
        match validation.cleaned_amount {
            Some(amount) if validation.is_valid => Ok(amount),
            _ => {
                let message = self
                    .get_first_error_message(&validation.errors)
                    .unwrap_or_else(|| "Invalid payment amount".to_string());
                debug!("Rejected payment input '{}': {}", amount_input, message);
                Err(PaymentValidationError::InvalidForm {
                    message,
                    errors: validation.errors,
                })
            }
        }
    }

    /// Strip the currency symbol, thousands separators and spaces, then parse
    pub fn clean_and_parse_amount(&self, amount_input: &str) -> Result<f64, String> {
        let cleaned = amount_input
            .trim()
            .replace(&self.config.currency_symbol, "")
            .replace(',', "")
            .replace(' ', "");

        if cleaned.is_empty() {
            return Err("Empty amount after cleaning".to_string());
        }

        cleaned
            .parse::<f64>()
            .map_err(|e| format!("Invalid number format: {}", e))
    }

    pub fn format_amount(&self, amount: f64) -> String {
        format!("{}{:.2}", self.config.currency_symbol, amount)
    }

    pub fn get_error_message(&self, error: &PaymentFormError) -> String {
        match error {
            PaymentFormError::EmptyAmount => "Please enter an amount".to_string(),
            PaymentFormError::InvalidAmountFormat(msg) => {
                format!("Please enter a valid amount: {}", msg)
            }
            PaymentFormError::AmountNotPositive => "Amount must be greater than 0".to_string(),
            PaymentFormError::AmountTooSmall(min) => {
                format!("Amount is too small. Minimum is {}", self.format_amount(*min))
            }
            PaymentFormError::AmountTooLarge(max) => {
                format!("Amount is too large. Maximum is {}", self.format_amount(*max))
            }
            PaymentFormError::AmountPrecisionTooHigh => {
                "Amount has too many decimal places. Use at most 2.".to_string()
            }
            PaymentFormError::NoteTooLong(len) => format!(
                "Note is too long ({} characters). Maximum is {}.",
                len, self.config.max_note_length
            ),
        }
    }

    pub fn get_first_error_message(&self, errors: &[PaymentFormError]) -> Option<String> {
        errors.first().map(|e| self.get_error_message(e))
    }

    pub fn generate_success_message(&self, amount: f64, receipt_no: &str) -> String {
        format!("{} recorded. Receipt {}", self.format_amount(amount), receipt_no)
    }

    /// Mark the form as submitting; `None` if a submission is already in flight
    pub fn set_form_submitting(&self, mut state: PaymentFormState) -> Option<PaymentFormState> {
        if state.is_submitting {
            return None;
        }
        state.is_submitting = true;
        state.error_message = None;
        state.show_success = false;
        Some(state)
    }

    /// Keep the user's input so they can correct it
    pub fn set_form_error(&self, mut state: PaymentFormState, error_message: String) -> PaymentFormState {
        state.is_submitting = false;
        state.error_message = Some(error_message);
        state.show_success = false;
        state
    }

    pub fn clear_form_after_success(&self, mut state: PaymentFormState, success_message: String) -> PaymentFormState {
        state.amount_input.clear();
        state.reference.clear();
        state.note.clear();
        state.method = PaymentMethod::Cash;
        state.is_submitting = false;
        state.error_message = None;
        state.success_message = Some(success_message);
        state.show_success = true;
        state
    }
}

fn has_too_many_decimal_places(amount: f64) -> bool {
    let cents = amount * 100.0;
    (cents - cents.round()).abs() > 1e-6
}
