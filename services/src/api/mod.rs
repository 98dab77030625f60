//! File manager request facade and its HTTP routes.

mod error;
mod facade;
mod routes;
mod validate;

pub use error::{ApiError, ErrorResponse, Operation};
pub use facade::FileManagerApi;
pub use routes::{UploadQuery, routes};
