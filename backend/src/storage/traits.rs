//! # Storage Traits
//!
//! The fee ledger service only talks to fee records through this trait, so the
//! screen can hand it whatever holds its records (the in-memory store today,
//! a synced cache later) without touching the domain layer.

use anyhow::Result;

use crate::domain::models::FeeRecord;

/// Interface for fee record storage operations
pub trait FeeStorage: Send + Sync {
    /// Store a new fee record; fails if a record with the same id exists
    fn store_fee(&self, record: &FeeRecord) -> Result<()>;

    /// Retrieve a specific fee record by id
    fn get_fee(&self, fee_id: &str) -> Result<Option<FeeRecord>>;

    /// All fee records in insertion order
    fn list_fees(&self) -> Result<Vec<FeeRecord>>;

    /// Replace a stored record with an updated copy.
    /// Returns false (and changes nothing) if no record has that id.
    fn replace_fee(&self, record: &FeeRecord) -> Result<bool>;

    /// Replace a stored record with the result of `update` applied to it,
    /// holding the store's write access for the whole read-modify-write.
    /// Returns `None` if no record has that id; an error from `update`
    /// leaves the stored record untouched.
    fn update_fee<F>(&self, fee_id: &str, update: F) -> Result<Option<FeeRecord>>
    where
        F: FnOnce(&FeeRecord) -> Result<FeeRecord>;

    /// Remove a record. Only the owner of the collection deletes fees;
    /// the ledger service never calls this.
    fn remove_fee(&self, fee_id: &str) -> Result<bool>;
}
