//! Bucket handle and storage errors.

use std::fmt;

use opendal::Operator;

/// A named bucket together with the operator that talks to it.
///
/// Handles are cheap to clone and scoped to a single request.
#[derive(Clone)]
pub struct Bucket {
    name: String,
    operator: Operator,
}

impl Bucket {
    pub fn new(name: impl Into<String>, operator: Operator) -> Self {
        Self {
            name: name.into(),
            operator,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn operator(&self) -> &Operator {
        &self.operator
    }
}

impl fmt::Debug for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bucket")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Error type for bucket resolution.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid configuration for bucket '{bucket}'")]
    Config {
        bucket: String,
        #[source]
        source: opendal::Error,
    },

    #[error("Existence check failed for bucket '{bucket}'")]
    Check {
        bucket: String,
        #[source]
        source: opendal::Error,
    },
}
