use std::sync::{Mutex, PoisonError};

use super::ReferralStore;
use crate::{record::ReferralRecord, Result};

/// In-process store. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<ReferralRecord>>,
}

impl MemoryStore {
    pub fn with_records(records: Vec<ReferralRecord>) -> Self {
        Self {
            rows: Mutex::new(records),
        }
    }
}

impl ReferralStore for MemoryStore {
    fn append(&self, record: &ReferralRecord) -> Result<()> {
        self.rows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        Ok(())
    }

    fn scan_all(&self) -> Result<Vec<ReferralRecord>> {
        Ok(self
            .rows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }
}
