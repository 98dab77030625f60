//! Google Cloud Storage backend.

use super::traits::{StorageBackend, check_remote_bucket};
use super::types::{Bucket, StorageError};

/// Configuration for Google Cloud Storage.
///
/// Without a credential the service account is discovered from the
/// environment (`GOOGLE_APPLICATION_CREDENTIALS` or the metadata server).
#[derive(Clone, Default)]
pub struct GcsConfig {
    pub credential: Option<String>,
    pub endpoint: Option<String>,
}

#[derive(Clone, Default)]
pub struct GcsStorage {
    config: GcsConfig,
}

impl GcsStorage {
    pub fn new(config: GcsConfig) -> Self {
        Self { config }
    }
}

impl StorageBackend for GcsStorage {
    fn bucket(&self, name: &str) -> Result<Bucket, StorageError> {
        let mut builder = opendal::services::Gcs::default().bucket(name);
        if let Some(credential) = &self.config.credential {
            builder = builder.credential(credential);
        }
        if let Some(endpoint) = &self.config.endpoint {
            builder = builder.endpoint(endpoint);
        }

        opendal::Operator::new(builder)
            .map(|op| Bucket::new(name, op.finish()))
            .map_err(|source| StorageError::Config {
                bucket: name.to_owned(),
                source,
            })
    }

    async fn bucket_exists(&self, bucket: &Bucket) -> Result<bool, StorageError> {
        check_remote_bucket(bucket).await
    }
}
