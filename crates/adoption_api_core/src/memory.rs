//! In-memory paged store for tests and local experiments.
//!
//! Behaves like a key-value table: records are keyed by a declared field,
//! `put_record` overwrites, scans come back in fixed-size pages with an
//! offset cursor, and undeclared collections report the same error code a
//! missing DynamoDB table would.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use serde_json::Value;

use crate::record::Record;
use crate::store::{RecordStore, ScanPage, StoreError};

#[derive(Debug, Default)]
struct Collection {
    key_field: String,
    records: Vec<Record>,
}

#[derive(Debug)]
pub struct InMemoryRecordStore {
    page_size: usize,
    collections: Mutex<HashMap<String, Collection>>,
    pending_failure: Mutex<Option<StoreError>>,
    scan_calls: Mutex<usize>,
}

impl InMemoryRecordStore {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            collections: Mutex::new(HashMap::new()),
            pending_failure: Mutex::new(None),
            scan_calls: Mutex::new(0),
        }
    }

    pub fn with_collection(self, name: &str, key_field: &str) -> Self {
        if let Ok(mut collections) = self.collections.lock() {
            collections.insert(
                name.to_string(),
                Collection {
                    key_field: key_field.to_string(),
                    records: Vec::new(),
                },
            );
        }
        self
    }

    /// Makes the next store call fail with `error`.
    pub fn fail_next(&self, error: StoreError) {
        if let Ok(mut pending) = self.pending_failure.lock() {
            *pending = Some(error);
        }
    }

    pub fn records(&self, collection: &str) -> Vec<Record> {
        self.collections
            .lock()
            .map(|collections| {
                collections
                    .get(collection)
                    .map(|entry| entry.records.clone())
                    .unwrap_or_default()
            })
            .unwrap_or_default()
    }

    pub fn scan_calls(&self) -> usize {
        self.scan_calls.lock().map(|calls| *calls).unwrap_or(0)
    }

    fn take_failure(&self) -> Result<(), StoreError> {
        match lock(&self.pending_failure)?.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, StoreError> {
    mutex
        .lock()
        .map_err(|_| StoreError::Unexpected("in-memory store lock poisoned".to_string()))
}

fn resource_not_found() -> StoreError {
    StoreError::service("ResourceNotFoundException", "Requested resource not found")
}

impl RecordStore for InMemoryRecordStore {
    type Cursor = usize;

    fn put_record(&self, collection: &str, record: &Record) -> Result<(), StoreError> {
        self.take_failure()?;
        let mut collections = lock(&self.collections)?;
        let entry = collections
            .get_mut(collection)
            .ok_or_else(resource_not_found)?;

        let key = match record.get(&entry.key_field) {
            Some(Value::Null) | None => {
                return Err(StoreError::service(
                    "ValidationException",
                    format!(
                        "One or more parameter values were invalid: Missing the key {} in the item",
                        entry.key_field
                    ),
                ));
            }
            Some(value) => value.clone(),
        };

        let key_field = entry.key_field.clone();
        match entry
            .records
            .iter_mut()
            .find(|existing| existing.get(&key_field) == Some(&key))
        {
            Some(existing) => *existing = record.clone(),
            None => entry.records.push(record.clone()),
        }
        Ok(())
    }

    fn scan_page(
        &self,
        collection: &str,
        cursor: Option<usize>,
    ) -> Result<ScanPage<usize>, StoreError> {
        *lock(&self.scan_calls)? += 1;
        self.take_failure()?;
        let collections = lock(&self.collections)?;
        let entry = collections.get(collection).ok_or_else(resource_not_found)?;

        let start = cursor.unwrap_or(0).min(entry.records.len());
        let end = (start + self.page_size).min(entry.records.len());
        Ok(ScanPage {
            items: entry.records[start..end].to_vec(),
            next: (end < entry.records.len()).then_some(end),
        })
    }
}
