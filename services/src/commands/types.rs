//! Command layer errors.

/// Error type for file manager commands.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Unsupported by this storage service: {0}")]
    Unsupported(String),

    #[error("Storage error at '{path}'")]
    Storage {
        path: String,
        #[source]
        source: opendal::Error,
    },

    #[error("Malformed permissions document '{path}'")]
    Permissions {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl CommandError {
    /// Maps an OpenDAL error for `path`, keeping not-found distinct.
    pub fn storage(path: &str, source: opendal::Error) -> Self {
        if source.kind() == opendal::ErrorKind::NotFound {
            Self::NotFound(path.to_owned())
        } else {
            Self::Storage {
                path: path.to_owned(),
                source,
            }
        }
    }
}

/// Shorthand for `map_err` closures.
pub(crate) fn at(path: &str) -> impl FnOnce(opendal::Error) -> CommandError + '_ {
    move |source| CommandError::storage(path, source)
}
