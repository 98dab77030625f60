//! File manager commands.
//!
//! The [`Commands`] trait is the seam between the request facade and the
//! storage work. [`OpenDalCommands`] implements it over any bucket operator;
//! object stores have no native directories or ACLs, so both are emulated
//! (see `objects` and `permissions`).

mod objects;
mod operator;
mod paths;
mod permissions;
mod traits;
mod types;

pub use operator::{DEFAULT_PRESIGN_EXPIRY, OpenDalCommands};
pub use permissions::{PermissionsDocument, RESERVED_PREFIX};
pub use traits::Commands;
pub use types::CommandError;
