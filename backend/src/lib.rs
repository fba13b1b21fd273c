//! # Fee Desk Backend
//!
//! Non-UI logic behind the school fee screen: the fee record model, the
//! payment ledger, filtering, the collection summary and the payment form.
//!
//! ```text
//! Fee screen (hosting UI)
//!     ↓
//! Domain Layer (FeeLedgerService, pure fee functions)
//!     ↓
//! Storage Layer (FeeStorage, in-memory store)
//! ```

pub mod config;
pub mod domain;
pub mod storage;

use anyhow::Result;
use chrono::NaiveDate;
use log::info;
use shared::FeeDeskConfig;
use std::sync::Arc;

pub use domain::*;
pub use storage::*;

/// Everything the fee screen holds while it is open
pub struct FeeDesk {
    pub store: Arc<InMemoryFeeStore>,
    pub ledger_service: FeeLedgerService<InMemoryFeeStore>,
    pub table_service: FeeTableService,
}

impl FeeDesk {
    /// Fee desk over an existing record set
    pub fn new(store: Arc<InMemoryFeeStore>, config: FeeDeskConfig) -> Self {
        Self {
            ledger_service: FeeLedgerService::with_config(store.clone(), config.clone()),
            table_service: FeeTableService::with_config(config),
            store,
        }
    }

    /// Fee desk seeded with the sample records, as the screen does on mount
    pub fn with_sample_data(today: NaiveDate, config: FeeDeskConfig) -> Result<Self> {
        info!("Setting up fee desk with sample data for {}", today);
        let records = sample_data::sample_fee_records(today)?;
        let store = Arc::new(InMemoryFeeStore::with_records(records)?);
        Ok(Self::new(store, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{FeeListRequest, FeeStatus};

    #[test]
    fn test_fee_desk_session() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let desk = FeeDesk::with_sample_data(today, FeeDeskConfig::default()).unwrap();

        let found = desk
            .ledger_service
            .list_fees_for_request(&FeeListRequest {
                search: "priya".to_string(),
                status: String::new(),
            })
            .unwrap();
        assert_eq!(found.len(), 1);

        let mut form = desk.ledger_service.form_service().open_form(&found[0]);
        let updated = desk.ledger_service.submit_payment(&mut form).unwrap();
        assert_eq!(updated.status, FeeStatus::Paid);

        let rows = desk
            .table_service
            .format_fees_for_table(&desk.store.list_fees().unwrap());
        let row = rows.iter().find(|r| r.id == updated.id).unwrap();
        assert_eq!(row.status_label, "Paid");
        assert_eq!(row.formatted_balance, "₹0.00");

        let summary = desk.ledger_service.summary().unwrap();
        assert_eq!(summary.collected, 195000.0);
    }
}
