//! Commands implemented over the bucket's OpenDAL operator.

use std::time::Duration;

use filemanager_core::{ActionResult, EntryType, FileEntry, UserClaims};
use opendal::Operator;

use super::objects::{self, Kind};
use super::paths;
use super::permissions;
use super::traits::Commands;
use super::types::{CommandError, at};
use crate::storage::Bucket;

/// Default lifetime of download urls (15 minutes).
pub const DEFAULT_PRESIGN_EXPIRY: Duration = Duration::from_secs(15 * 60);

const DIR_RIGHTS: &str = "drwxr-xr-x";
const FILE_RIGHTS: &str = "-rw-r--r--";

#[derive(Clone)]
pub struct OpenDalCommands {
    presign_expiry: Duration,
    public_url_base: Option<String>,
}

impl Default for OpenDalCommands {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenDalCommands {
    pub fn new() -> Self {
        Self {
            presign_expiry: DEFAULT_PRESIGN_EXPIRY,
            public_url_base: None,
        }
    }

    pub fn with_presign_expiry(mut self, expiry: Duration) -> Self {
        self.presign_expiry = expiry;
        self
    }

    /// Base used to build download urls on services that cannot presign.
    pub fn with_public_url_base(mut self, base: impl Into<String>) -> Self {
        self.public_url_base = Some(base.into());
        self
    }

    /// Moves or copies one item to `target`, carrying its permission grants along.
    async fn transfer(
        &self,
        op: &Operator,
        item: &str,
        target: &str,
        keep_source: bool,
    ) -> Result<(), CommandError> {
        let from = user_path(item)?;
        let to = user_path(target)?;
        if from == to {
            return Ok(());
        }

        let kind = objects::kind_of(op, &from)
            .await?
            .ok_or_else(|| CommandError::NotFound(item.to_owned()))?;

        match kind {
            Kind::File => {
                objects::copy_object(op, &from, &to).await?;
                if !keep_source {
                    op.delete(&from).await.map_err(at(&from))?;
                }
            }
            Kind::Dir => {
                if paths::is_within(&to, &from) {
                    return Err(CommandError::InvalidPath(format!(
                        "cannot place '{from}' inside itself"
                    )));
                }
                let from_dir = paths::dir_path(&from);
                objects::copy_tree(op, &from_dir, &paths::dir_path(&to)).await?;
                if !keep_source {
                    objects::delete_tree(op, &from_dir).await?;
                }
            }
        }

        permissions::relocate(op, &from, &to, kind, keep_source).await
    }

    async fn transfer_all(
        &self,
        op: &Operator,
        items: &[String],
        new_path: &str,
        keep_source: bool,
    ) -> Result<ActionResult, CommandError> {
        let destination = user_dir(new_path)?;
        for item in items {
            let name = paths::basename(&user_path(item)?).to_owned();
            let target = paths::join(&destination, &name);
            self.transfer(op, item, &target, keep_source).await?;
        }
        Ok(ActionResult::ok())
    }
}

/// Cleans a client path that must name an object, never the reserved prefix.
fn user_path(path: &str) -> Result<String, CommandError> {
    reject_reserved(paths::clean_non_root(path)?, path)
}

/// Like [`user_path`], but the bucket root is accepted.
fn user_dir(path: &str) -> Result<String, CommandError> {
    reject_reserved(paths::clean(path)?, path)
}

fn reject_reserved(cleaned: String, original: &str) -> Result<String, CommandError> {
    if permissions::is_reserved(&cleaned) {
        return Err(CommandError::InvalidPath(original.to_owned()));
    }
    Ok(cleaned)
}

fn to_entry(entry: &opendal::Entry) -> FileEntry {
    let meta = entry.metadata();
    let is_dir = meta.is_dir();

    FileEntry {
        name: entry.name().trim_end_matches('/').to_owned(),
        rights: if is_dir { DIR_RIGHTS } else { FILE_RIGHTS }.to_owned(),
        size: if is_dir { 0 } else { meta.content_length() },
        date: meta.last_modified().map(|modified| modified.to_string()),
        entry_type: if is_dir { EntryType::Dir } else { EntryType::File },
    }
}

impl Commands for OpenDalCommands {
    async fn get_list(
        &self,
        bucket: &Bucket,
        path: &str,
        _claims: &UserClaims,
    ) -> Result<Vec<FileEntry>, CommandError> {
        let dir = paths::dir_path(&user_dir(path)?);
        let entries = objects::list_dir(bucket.operator(), &dir).await?;

        let mut listing: Vec<FileEntry> = entries
            .iter()
            .filter(|entry| !permissions::is_reserved(entry.path()))
            .map(to_entry)
            .collect();
        listing.sort_by(|a, b| {
            b.is_dir()
                .cmp(&a.is_dir())
                .then_with(|| a.name.cmp(&b.name))
        });

        tracing::debug!(bucket = bucket.name(), dir = %dir, count = listing.len(), "Listed directory");
        Ok(listing)
    }

    async fn rename_file(
        &self,
        bucket: &Bucket,
        item: &str,
        new_item_path: &str,
        _claims: &UserClaims,
    ) -> Result<ActionResult, CommandError> {
        self.transfer(bucket.operator(), item, new_item_path, false)
            .await?;
        Ok(ActionResult::ok())
    }

    async fn move_files(
        &self,
        bucket: &Bucket,
        items: &[String],
        new_path: &str,
        _claims: &UserClaims,
    ) -> Result<ActionResult, CommandError> {
        self.transfer_all(bucket.operator(), items, new_path, false)
            .await
    }

    async fn copy_files(
        &self,
        bucket: &Bucket,
        items: &[String],
        new_path: &str,
        _claims: &UserClaims,
    ) -> Result<ActionResult, CommandError> {
        self.transfer_all(bucket.operator(), items, new_path, true)
            .await
    }

    async fn remove_files(
        &self,
        bucket: &Bucket,
        items: &[String],
        _claims: &UserClaims,
    ) -> Result<ActionResult, CommandError> {
        let op = bucket.operator();
        for item in items {
            let cleaned = user_path(item)?;
            let Some(kind) = objects::kind_of(op, &cleaned).await? else {
                return Err(CommandError::NotFound(item.clone()));
            };

            match kind {
                Kind::File => op.delete(&cleaned).await.map_err(at(&cleaned))?,
                Kind::Dir => objects::delete_tree(op, &paths::dir_path(&cleaned)).await?,
            }
            permissions::forget(op, &cleaned, kind).await?;
        }
        Ok(ActionResult::ok())
    }

    async fn edit_file(
        &self,
        bucket: &Bucket,
        item: &str,
        content: &str,
        _claims: &UserClaims,
    ) -> Result<ActionResult, CommandError> {
        let op = bucket.operator();
        let cleaned = user_path(item)?;

        let content_type = match op.stat(&cleaned).await {
            Ok(meta) => meta.content_type().map(str::to_owned),
            Err(e) if e.kind() == opendal::ErrorKind::NotFound => None,
            Err(e) => return Err(CommandError::storage(&cleaned, e)),
        };

        objects::write_object(
            op,
            &cleaned,
            content.to_owned(),
            Some(content_type.as_deref().unwrap_or("text/plain")),
        )
        .await?;
        Ok(ActionResult::ok())
    }

    async fn get_file_content(
        &self,
        bucket: &Bucket,
        item: &str,
        _claims: &UserClaims,
    ) -> Result<String, CommandError> {
        let cleaned = user_path(item)?;
        let data = bucket
            .operator()
            .read(&cleaned)
            .await
            .map_err(at(&cleaned))?;
        Ok(String::from_utf8_lossy(&data.to_vec()).into_owned())
    }

    async fn get_file_meta(
        &self,
        bucket: &Bucket,
        item: &str,
        _claims: &UserClaims,
    ) -> Result<String, CommandError> {
        let op = bucket.operator();
        let cleaned = user_path(item)?;
        op.stat(&cleaned).await.map_err(at(&cleaned))?;

        if op.info().full_capability().presign_read {
            let presigned = op
                .presign_read(&cleaned, self.presign_expiry)
                .await
                .map_err(at(&cleaned))?;
            return Ok(presigned.uri().to_string());
        }

        match &self.public_url_base {
            Some(base) => Ok(format!(
                "{}/{}/{}",
                base.trim_end_matches('/'),
                bucket.name(),
                cleaned
            )),
            None => Err(CommandError::Unsupported(format!(
                "download url for '{cleaned}'"
            ))),
        }
    }

    async fn create_folder(
        &self,
        bucket: &Bucket,
        new_path: &str,
        _claims: &UserClaims,
    ) -> Result<ActionResult, CommandError> {
        let dir = paths::dir_path(&user_path(new_path)?);
        bucket.operator().create_dir(&dir).await.map_err(at(&dir))?;
        tracing::debug!(bucket = bucket.name(), dir = %dir, "Created folder");
        Ok(ActionResult::ok())
    }

    async fn change_permissions(
        &self,
        bucket: &Bucket,
        items: &[String],
        role: &str,
        entity: &str,
        recursive: bool,
        _claims: &UserClaims,
    ) -> Result<ActionResult, CommandError> {
        let op = bucket.operator();
        for item in items {
            let cleaned = user_dir(item)?;
            let Some(kind) = objects::kind_of(op, &cleaned).await? else {
                return Err(CommandError::NotFound(item.clone()));
            };
            permissions::grant(op, &cleaned, kind, role, entity).await?;

            if kind == Kind::Dir && recursive {
                let dir = paths::dir_path(&cleaned);
                for entry in objects::list_tree(op, &dir).await? {
                    if permissions::is_reserved(entry.path()) {
                        continue;
                    }
                    let (child, child_kind) = if entry.metadata().is_dir() {
                        (entry.path().trim_end_matches('/'), Kind::Dir)
                    } else {
                        (entry.path(), Kind::File)
                    };
                    permissions::grant(op, child, child_kind, role, entity).await?;
                }
            }
        }

        tracing::info!(
            bucket = bucket.name(),
            items = items.len(),
            role,
            entity,
            recursive,
            "Permissions changed"
        );
        Ok(ActionResult::ok())
    }

    async fn upload_file(
        &self,
        bucket: &Bucket,
        directory_path: &str,
        originalname: &str,
        mimetype: &str,
        buffer: Vec<u8>,
        _claims: &UserClaims,
    ) -> Result<ActionResult, CommandError> {
        let directory = user_dir(directory_path)?;
        let name = paths::basename(&user_path(originalname)?).to_owned();
        let path = reject_reserved(paths::join(&directory, &name), originalname)?;

        let size = buffer.len();
        objects::write_object(bucket.operator(), &path, buffer, Some(mimetype)).await?;
        tracing::info!(bucket = bucket.name(), path = %path, size, "Uploaded file");
        Ok(ActionResult::ok())
    }
}
