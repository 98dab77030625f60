//! Wire types shared between the file manager service and its clients.
//!
//! - [`requests`] - one body per file manager operation, every field optional
//! - [`responses`] - the `{ "result": ... }` envelope and its payloads
//! - [`claims`] - opaque per-request identity attributes

pub mod claims;
pub mod requests;
pub mod responses;

pub use claims::UserClaims;
pub use requests::{
    ReqBodyCopy, ReqBodyCreateFolder, ReqBodyEdit, ReqBodyGetContent, ReqBodyGetMeta,
    ReqBodyList, ReqBodyMove, ReqBodyRemove, ReqBodyRename, ReqBodySetPermissions,
};
pub use responses::{
    ActionResult, EntryType, FileEntry, MetaResult, ResBody, ResBodyCopy, ResBodyCreateFolder,
    ResBodyEdit, ResBodyGetContent, ResBodyGetMeta, ResBodyList, ResBodyMove, ResBodyRemove,
    ResBodyRename, ResBodySetPermissions, ResBodyUploadFile,
};
