//! # In-Memory Fee Store
//!
//! Holds the fee records for the lifetime of the fee screen. The screen owns
//! the store and passes it to the ledger service; nothing is persisted.

use anyhow::{anyhow, bail, Result};
use log::{debug, info};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::traits::FeeStorage;
use crate::domain::models::FeeRecord;

#[derive(Debug, Default)]
pub struct InMemoryFeeStore {
    records: RwLock<Vec<FeeRecord>>,
}

impl InMemoryFeeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with an initial record set (ids must be unique)
    pub fn with_records(records: Vec<FeeRecord>) -> Result<Self> {
        let store = Self::new();
        for record in &records {
            store.store_fee(record)?;
        }
        info!("Seeded fee store with {} records", records.len());
        Ok(store)
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<FeeRecord>>> {
        self.records
            .read()
            .map_err(|_| anyhow!("Fee store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<FeeRecord>>> {
        self.records
            .write()
            .map_err(|_| anyhow!("Fee store lock poisoned"))
    }
}

impl FeeStorage for InMemoryFeeStore {
    fn store_fee(&self, record: &FeeRecord) -> Result<()> {
        let mut records = self.write()?;
        if records.iter().any(|r| r.id == record.id) {
            bail!("Fee record {} already exists", record.id);
        }
        records.push(record.clone());
        debug!("Stored fee record {} for {}", record.id, record.student.name);
        Ok(())
    }

    fn get_fee(&self, fee_id: &str) -> Result<Option<FeeRecord>> {
        Ok(self.read()?.iter().find(|r| r.id == fee_id).cloned())
    }

    fn list_fees(&self) -> Result<Vec<FeeRecord>> {
        Ok(self.read()?.clone())
    }

    fn replace_fee(&self, record: &FeeRecord) -> Result<bool> {
        let mut records = self.write()?;
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(slot) => {
                *slot = record.clone();
                debug!("Replaced fee record {}", record.id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn update_fee<F>(&self, fee_id: &str, update: F) -> Result<Option<FeeRecord>>
    where
        F: FnOnce(&FeeRecord) -> Result<FeeRecord>,
    {
        let mut records = self.write()?;
        let slot = match records.iter_mut().find(|r| r.id == fee_id) {
            Some(slot) => slot,
            None => return Ok(None),
        };

        let updated = update(slot)?;
        if updated.id != fee_id {
            bail!("Update of fee record {} returned record {}", fee_id, updated.id);
        }
        *slot = updated.clone();
        debug!("Updated fee record {}", fee_id);
        Ok(Some(updated))
    }

    fn remove_fee(&self, fee_id: &str) -> Result<bool> {
        let mut records = self.write()?;
        let before = records.len();
        records.retain(|r| r.id != fee_id);
        Ok(records.len() < before)
    }
}
