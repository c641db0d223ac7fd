//! In-memory record table.
//!
//! One mutex guards the whole map and is held for the full duration of every
//! operation, so each check-then-act step is atomic and all operations are
//! totally ordered. There is no per-key striping and no read/write split.

use bytes::Bytes;
use corelib::{RecordId, Result, StorageError};
use parking_lot::Mutex;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::trace;

/// The node's shard of records.
#[derive(Debug, Default)]
pub struct Table {
    records: Mutex<HashMap<RecordId, Bytes>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `payload` under `key` if no record exists for it.
    ///
    /// Never overwrites: returns `StorageError::RecordExists` otherwise.
    pub fn put(&self, key: RecordId, payload: Bytes) -> Result<()> {
        let mut records = self.records.lock();
        match records.entry(key) {
            Entry::Occupied(entry) => {
                trace!(key = %entry.key(), "put rejected, record exists");
                Err(StorageError::RecordExists)
            }
            Entry::Vacant(entry) => {
                trace!(key = %entry.key(), len = payload.len(), "record stored");
                entry.insert(payload);
                Ok(())
            }
        }
    }

    /// Return the payload stored under `key`.
    pub fn get(&self, key: &RecordId) -> Result<Bytes> {
        self.records
            .lock()
            .get(key)
            .cloned()
            .ok_or(StorageError::RecordNotFound)
    }

    /// Remove the record stored under `key`.
    pub fn delete(&self, key: &RecordId) -> Result<()> {
        match self.records.lock().remove(key) {
            Some(_) => {
                trace!(key = %key, "record deleted");
                Ok(())
            }
            None => Err(StorageError::RecordNotFound),
        }
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}
