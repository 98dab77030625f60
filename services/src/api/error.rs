//! Facade errors and their HTTP mapping.

use std::error::Error as _;
use std::fmt;

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::commands::CommandError;
use crate::storage::StorageError;

/// The file manager operations, used to label failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Rename,
    Move,
    Copy,
    Remove,
    Edit,
    GetContent,
    GetMeta,
    CreateFolder,
    SetPermissions,
    UploadFile,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::List => "list",
            Self::Rename => "rename",
            Self::Move => "move",
            Self::Copy => "copy",
            Self::Remove => "remove",
            Self::Edit => "edit",
            Self::GetContent => "getContent",
            Self::GetMeta => "getMeta",
            Self::CreateFolder => "createFolder",
            Self::SetPermissions => "setPermissions",
            Self::UploadFile => "uploadFile",
        };
        f.write_str(name)
    }
}

/// Error type for file manager requests.
///
/// Underlying causes stay reachable through [`std::error::Error::source`];
/// [`ApiError::message_chain`] flattens them for responses and logs.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request is missing property in req.body: '{0}'")]
    MissingField(&'static str),

    #[error("Request does not contain either body.items or body.singleFileName")]
    MissingCopySource,

    #[error("bucket: \"{0}\" doesn't exist, please create it first")]
    BucketNotFound(String),

    #[error("Error retrieving bucket")]
    Bucket(#[source] StorageError),

    #[error("{operation} failed")]
    Command {
        operation: Operation,
        #[source]
        source: CommandError,
    },
}

impl ApiError {
    /// The error message followed by every cause, joined with `": "`.
    pub fn message_chain(&self) -> String {
        let mut message = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::MissingField(_) | Self::MissingCopySource => {
                (StatusCode::BAD_REQUEST, "bad_request")
            }
            Self::BucketNotFound(_) => (StatusCode::NOT_FOUND, "bucket_not_found"),
            Self::Bucket(StorageError::Check { .. }) => {
                (StatusCode::BAD_GATEWAY, "bucket_unavailable")
            }
            Self::Bucket(StorageError::Config { .. }) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_misconfigured")
            }
            Self::Command { source, .. } => match source {
                CommandError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
                CommandError::InvalidPath(_) => (StatusCode::BAD_REQUEST, "bad_request"),
                CommandError::Unsupported(_) => (StatusCode::NOT_IMPLEMENTED, "unsupported"),
                CommandError::Storage { .. } | CommandError::Permissions { .. } => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
                }
            },
        }
    }
}

/// JSON body of every failed request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = self.message_chain();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "{message}");
        } else {
            tracing::debug!(status = status.as_u16(), "{message}");
        }

        (
            status,
            Json(ErrorResponse {
                error: code.to_owned(),
                message,
            }),
        )
            .into_response()
    }
}
