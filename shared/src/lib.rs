use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Payment completeness of a fee record, plus the externally assigned lateness flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeeStatus {
    /// Nothing paid yet
    Pending,
    /// Some payments recorded, balance still owed
    Partial,
    /// Total paid covers the fee amount
    Paid,
    /// Past the due date without full payment (assigned by the overdue sweep)
    Overdue,
}

impl FeeStatus {
    pub const ALL: [FeeStatus; 4] = [
        FeeStatus::Pending,
        FeeStatus::Partial,
        FeeStatus::Paid,
        FeeStatus::Overdue,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FeeStatus::Pending => "Pending",
            FeeStatus::Partial => "Partial",
            FeeStatus::Paid => "Paid",
            FeeStatus::Overdue => "Overdue",
        }
    }
}

impl fmt::Display for FeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FeeStatus {
    type Err = ParseEnumError;

    /// Case-insensitive: "paid", "Paid" and "PAID" are the same status
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        FeeStatus::ALL
            .iter()
            .find(|status| status.label().eq_ignore_ascii_case(wanted))
            .copied()
            .ok_or_else(|| ParseEnumError::UnknownStatus(wanted.to_string()))
    }
}

/// How a payment was remitted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Upi,
    BankTransfer,
    Other,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::Upi,
        PaymentMethod::BankTransfer,
        PaymentMethod::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::Other => "Other",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = ParseEnumError;

    /// Accepts display labels as well as compact forms ("bank_transfer", "BankTransfer")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        match compact.as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            "upi" => Ok(PaymentMethod::Upi),
            "banktransfer" => Ok(PaymentMethod::BankTransfer),
            "other" => Ok(PaymentMethod::Other),
            _ => Err(ParseEnumError::UnknownPaymentMethod(s.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseEnumError {
    UnknownStatus(String),
    UnknownPaymentMethod(String),
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseEnumError::UnknownStatus(value) => write!(f, "Unknown fee status: {}", value),
            ParseEnumError::UnknownPaymentMethod(value) => {
                write!(f, "Unknown payment method: {}", value)
            }
        }
    }
}

impl std::error::Error for ParseEnumError {}

/// Reference to an entity owned outside the fee desk (student, class, section)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: String,
    pub name: String,
}

impl EntityRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Raw filter inputs as the screen collects them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeeListRequest {
    /// Free text matched against student names and receipt numbers
    pub search: String,
    /// Status filter; empty string means "all statuses"
    pub status: String,
}

/// Request to record a payment against a fee record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPaymentRequest {
    pub fee_id: String,
    /// Amount exactly as typed in the form
    pub amount_input: String,
    pub method: PaymentMethod,
    pub reference: Option<String>,
    pub note: Option<String>,
}

/// Aggregate totals shown in the summary cards
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeeSummary {
    /// Sum of fee amounts for Paid records
    pub collected: f64,
    /// Sum of full fee amounts for every record that is not Paid
    pub pending: f64,
    /// Sum of remaining balances for every record that is not Paid
    pub outstanding: f64,
    /// Sum of all payments received across every record
    pub received: f64,
    pub student_count: usize,
    pub pending_count: usize,
    pub partial_count: usize,
    pub paid_count: usize,
    pub overdue_count: usize,
}

/// Form validation result for the record-payment form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentFormValidation {
    pub is_valid: bool,
    pub errors: Vec<PaymentFormError>,
    pub cleaned_amount: Option<f64>,
    pub suggestions: Vec<String>,
}

/// Field-level validation errors for the record-payment form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum PaymentFormError {
    EmptyAmount,
    InvalidAmountFormat(String),
    AmountNotPositive,
    AmountTooSmall(f64),
    AmountTooLarge(f64),
    AmountPrecisionTooHigh,
    NoteTooLong(usize),
}

/// State of the record-payment modal
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PaymentFormState {
    /// Fee record the modal was opened for
    pub fee_id: Option<String>,
    pub amount_input: String,
    pub method: PaymentMethod,
    pub reference: String,
    pub note: String,
    pub is_submitting: bool,
    pub error_message: Option<String>,
    pub success_message: Option<String>,
    pub show_success: bool,
}

/// Styling hint for a status badge
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StatusTone {
    Neutral,
    Warning,
    Success,
    Danger,
}

/// A fee record formatted for the list view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormattedFeeRow {
    pub id: String,
    pub student_name: String,
    pub class_label: String,
    pub fee_type: String,
    pub term_label: String,
    pub formatted_amount: String,
    pub formatted_paid: String,
    pub formatted_balance: String,
    pub formatted_due_date: String,
    pub status_label: String,
    pub status_tone: StatusTone,
    pub payment_count: usize,
    pub raw_amount: f64,
    pub raw_balance: f64,
}

/// A single payment formatted for the payment history list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormattedPayment {
    pub receipt_no: String,
    pub formatted_date: String,
    pub formatted_amount: String,
    pub method_label: String,
    pub reference: Option<String>,
    pub notes: Option<String>,
}

/// Tunables for the fee desk
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeeDeskConfig {
    pub currency_symbol: String,
    pub min_amount: f64,
    pub max_amount: f64,
    pub max_note_length: usize,
    pub receipt_prefix: String,
    pub success_message_duration_ms: u64,
}

impl Default for FeeDeskConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
            min_amount: 0.01,
            max_amount: 10_000_000.0,
            max_note_length: 256,
            receipt_prefix: "RCP".to_string(),
            success_message_duration_ms: 3000,
        }
    }
}
