//! In-process buckets backed by OpenDAL's memory service.
//!
//! Only buckets created through [`MemoryStorage::create_bucket`] exist; any
//! other name resolves to an empty, unregistered operator that reports as
//! missing. Used for local runs and tests.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use opendal::Operator;

use super::traits::StorageBackend;
use super::types::{Bucket, StorageError};

#[derive(Clone, Default)]
pub struct MemoryStorage {
    buckets: Arc<RwLock<HashMap<String, Operator>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage with the given buckets already present.
    pub fn with_buckets<I, N>(names: I) -> Result<Self, StorageError>
    where
        I: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        let storage = Self::new();
        for name in names {
            storage.create_bucket(name.as_ref())?;
        }
        Ok(storage)
    }

    /// Creates a bucket, returning the existing one if the name is taken.
    pub fn create_bucket(&self, name: &str) -> Result<Bucket, StorageError> {
        let mut buckets = self.buckets.write().expect("lock poisoned");
        if let Some(op) = buckets.get(name) {
            return Ok(Bucket::new(name, op.clone()));
        }

        let op = memory_operator(name)?;
        buckets.insert(name.to_owned(), op.clone());
        tracing::debug!(bucket = name, "Created in-memory bucket");
        Ok(Bucket::new(name, op))
    }

    pub fn len(&self) -> usize {
        self.buckets.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn memory_operator(name: &str) -> Result<Operator, StorageError> {
    Operator::new(opendal::services::Memory::default())
        .map(|op| op.finish())
        .map_err(|source| StorageError::Config {
            bucket: name.to_owned(),
            source,
        })
}

impl StorageBackend for MemoryStorage {
    fn bucket(&self, name: &str) -> Result<Bucket, StorageError> {
        let registered = self
            .buckets
            .read()
            .expect("lock poisoned")
            .get(name)
            .cloned();

        match registered {
            Some(op) => Ok(Bucket::new(name, op)),
            None => memory_operator(name).map(|op| Bucket::new(name, op)),
        }
    }

    async fn bucket_exists(&self, bucket: &Bucket) -> Result<bool, StorageError> {
        let buckets = self.buckets.read().expect("lock poisoned");
        Ok(buckets.contains_key(bucket.name()))
    }
}
