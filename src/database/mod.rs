//! Referral store: an append-only table with a scan-everything read path.

mod csv_store;
mod memory;

use std::sync::Arc;

pub use csv_store::{csv_writer, CsvStore};
pub use memory::MemoryStore;

use crate::{
    config::{StoreBackend, StoreConfig},
    record::ReferralRecord,
    Result,
};

/// Storage behind intake, the dashboard, export and lookup.
///
/// There is no update or delete: status and bonus-paid changes are made by
/// editing the backing store directly.
pub trait ReferralStore: Send + Sync {
    /// Appends one row, creating the store if it does not exist yet.
    fn append(&self, record: &ReferralRecord) -> Result<()>;

    /// Every stored row in insertion order. A store that was never written is empty.
    fn scan_all(&self) -> Result<Vec<ReferralRecord>>;
}

/// Opens the configured backend.
pub fn open_store(config: &StoreConfig) -> Arc<dyn ReferralStore> {
    match config.backend {
        StoreBackend::Csv => Arc::new(CsvStore::new(&config.path)),
        StoreBackend::Memory => Arc::new(MemoryStore::default()),
    }
}
