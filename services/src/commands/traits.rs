//! Command trait definition.

use std::future::Future;

use filemanager_core::{ActionResult, FileEntry, UserClaims};

use super::types::CommandError;
use crate::storage::Bucket;

/// The storage operations behind each file manager request.
///
/// Every method receives an already-resolved bucket and the caller's claims,
/// unmodified. Paths are bucket-relative; a leading `/` is accepted.
pub trait Commands: Clone + Send + Sync + 'static {
    fn get_list(
        &self,
        bucket: &Bucket,
        path: &str,
        claims: &UserClaims,
    ) -> impl Future<Output = Result<Vec<FileEntry>, CommandError>> + Send;

    fn rename_file(
        &self,
        bucket: &Bucket,
        item: &str,
        new_item_path: &str,
        claims: &UserClaims,
    ) -> impl Future<Output = Result<ActionResult, CommandError>> + Send;

    fn move_files(
        &self,
        bucket: &Bucket,
        items: &[String],
        new_path: &str,
        claims: &UserClaims,
    ) -> impl Future<Output = Result<ActionResult, CommandError>> + Send;

    fn copy_files(
        &self,
        bucket: &Bucket,
        items: &[String],
        new_path: &str,
        claims: &UserClaims,
    ) -> impl Future<Output = Result<ActionResult, CommandError>> + Send;

    fn remove_files(
        &self,
        bucket: &Bucket,
        items: &[String],
        claims: &UserClaims,
    ) -> impl Future<Output = Result<ActionResult, CommandError>> + Send;

    fn edit_file(
        &self,
        bucket: &Bucket,
        item: &str,
        content: &str,
        claims: &UserClaims,
    ) -> impl Future<Output = Result<ActionResult, CommandError>> + Send;

    fn get_file_content(
        &self,
        bucket: &Bucket,
        item: &str,
        claims: &UserClaims,
    ) -> impl Future<Output = Result<String, CommandError>> + Send;

    /// Returns a url the object can be downloaded from.
    fn get_file_meta(
        &self,
        bucket: &Bucket,
        item: &str,
        claims: &UserClaims,
    ) -> impl Future<Output = Result<String, CommandError>> + Send;

    fn create_folder(
        &self,
        bucket: &Bucket,
        new_path: &str,
        claims: &UserClaims,
    ) -> impl Future<Output = Result<ActionResult, CommandError>> + Send;

    #[allow(clippy::too_many_arguments)]
    fn change_permissions(
        &self,
        bucket: &Bucket,
        items: &[String],
        role: &str,
        entity: &str,
        recursive: bool,
        claims: &UserClaims,
    ) -> impl Future<Output = Result<ActionResult, CommandError>> + Send;

    #[allow(clippy::too_many_arguments)]
    fn upload_file(
        &self,
        bucket: &Bucket,
        directory_path: &str,
        originalname: &str,
        mimetype: &str,
        buffer: Vec<u8>,
        claims: &UserClaims,
    ) -> impl Future<Output = Result<ActionResult, CommandError>> + Send;
}
