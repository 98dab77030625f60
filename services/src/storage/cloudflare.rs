//! Cloudflare R2 backend, reached through the S3 API.

use super::traits::{StorageBackend, check_remote_bucket};
use super::types::{Bucket, StorageError};

/// Configuration for Cloudflare R2.
#[derive(Clone)]
pub struct R2Config {
    pub account_id: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl std::fmt::Debug for R2Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("R2Config")
            .field("account_id", &self.account_id)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

impl R2Config {
    fn endpoint(&self) -> String {
        format!("https://{}.r2.cloudflarestorage.com", self.account_id)
    }
}

#[derive(Clone)]
pub struct R2Storage {
    config: R2Config,
}

impl R2Storage {
    pub fn new(config: R2Config) -> Self {
        Self { config }
    }
}

impl StorageBackend for R2Storage {
    fn bucket(&self, name: &str) -> Result<Bucket, StorageError> {
        let builder = opendal::services::S3::default()
            .bucket(name)
            .region("auto")
            .access_key_id(&self.config.access_key_id)
            .secret_access_key(&self.config.secret_access_key)
            .endpoint(&self.config.endpoint());

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
