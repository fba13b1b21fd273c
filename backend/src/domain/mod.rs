//! # Domain Module
//!
//! Contains all business logic for the fee desk.
//!
//! ## Module Organization
//!
//! - **fee_filter**: Search and status filtering of the fee list
//! - **payment_ledger**: Appending payments and deriving balance and status
//! - **fee_summary**: Collected / pending totals for the summary cards
//! - **payment_form**: Amount validation and payment modal state
//! - **fee_table**: Display formatting for fee rows and payment history
//! - **fee_ledger_service**: Orchestration over a `FeeStorage` implementation
//! - **sample_data**: The mock record set the fee screen starts with
//!
//! ## Business Rules
//!
//! - Payments are append-only and always positive
//! - `total_paid` is the sum of payments; `remaining_balance` is `amount - total_paid`
//! - A fee is Paid exactly when `total_paid >= amount`
//! - Overdue is assigned by the overdue sweep, never by recording a payment
//! - Receipt numbers are unique within a fee record

pub mod commands;
pub mod errors;
pub mod fee_filter;
pub mod fee_ledger_service;
pub mod fee_summary;
pub mod fee_table;
pub mod models;
pub mod payment_form;
pub mod payment_ledger;
pub mod sample_data;

pub use commands::*;
pub use errors::*;
pub use fee_filter::*;
pub use fee_ledger_service::*;
pub use fee_summary::*;
pub use fee_table::*;
pub use payment_form::*;
pub use payment_ledger::*;
