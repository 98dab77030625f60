//! Storage trait definitions.

use super::types::{Bucket, StorageError};
use std::future::Future;

/// Resolves bucket names into handles.
///
/// `bucket` only builds the handle; `bucket_exists` is the single remote
/// round trip. Nothing is cached between calls.
pub trait StorageBackend: Clone + Send + Sync + 'static {
    fn bucket(&self, name: &str) -> Result<Bucket, StorageError>;

    fn bucket_exists(
        &self,
        bucket: &Bucket,
    ) -> impl Future<Output = Result<bool, StorageError>> + Send;
}

/// Checks a remote bucket by listing its root.
///
/// A not-found answer means the bucket is missing; any other failure is
/// reported as a check error.
pub(crate) async fn check_remote_bucket(bucket: &Bucket) -> Result<bool, StorageError> {
    match bucket.operator().check().await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == opendal::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(StorageError::Check {
            bucket: bucket.name().to_owned(),
            source,
        }),
    }
}
