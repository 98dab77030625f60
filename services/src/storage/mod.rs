//! Bucket resolution using OpenDAL.
//!
//! Each backend turns a bucket name into a [`Bucket`] handle carrying an
//! OpenDAL operator, and answers whether that bucket exists remotely.

mod cloudflare;
mod gcs;
mod memory;
mod traits;
mod types;

pub use cloudflare::{R2Config, R2Storage};
pub use gcs::{GcsConfig, GcsStorage};
pub use memory::MemoryStorage;
pub use traits::StorageBackend;
pub use types::{Bucket, StorageError};
