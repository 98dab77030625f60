//! The request facade.
//!
//! Every handler has the same shape: check the required fields, resolve the
//! bucket, make exactly one command call, wrap the result. The first failure
//! ends the request. Nothing is cached between calls; each call re-checks that
//! its bucket exists.

use filemanager_core::{
    MetaResult, ReqBodyCopy, ReqBodyCreateFolder, ReqBodyEdit, ReqBodyGetContent, ReqBodyGetMeta,
    ReqBodyList, ReqBodyMove, ReqBodyRemove, ReqBodyRename, ReqBodySetPermissions, ResBody,
    ResBodyCopy, ResBodyCreateFolder, ResBodyEdit, ResBodyGetContent, ResBodyGetMeta, ResBodyList,
    ResBodyMove, ResBodyRemove, ResBodyRename, ResBodySetPermissions, ResBodyUploadFile,
    UserClaims,
};

use super::error::{ApiError, Operation};
use super::validate::{Truthy, require};
use crate::commands::{CommandError, Commands};
use crate::storage::{Bucket, StorageBackend};

/// File manager request handlers over a storage backend and a command layer.
#[derive(Clone)]
pub struct FileManagerApi<S, C> {
    storage: S,
    commands: C,
}

fn failed(operation: Operation) -> impl FnOnce(CommandError) -> ApiError {
    move |source| {
        tracing::warn!(%operation, error = %source, "File manager command failed");
        ApiError::Command { operation, source }
    }
}

impl<S, C> FileManagerApi<S, C>
where
    S: StorageBackend,
    C: Commands,
{
    pub fn new(storage: S, commands: C) -> Self {
        Self { storage, commands }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn commands(&self) -> &C {
        &self.commands
    }

    async fn get_bucket(&self, bucketname: Option<&str>) -> Result<Bucket, ApiError> {
        let name = require(bucketname, "bucketname")?;

        let bucket = self.storage.bucket(name).map_err(ApiError::Bucket)?;
        let exists = self
            .storage
            .bucket_exists(&bucket)
            .await
            .map_err(ApiError::Bucket)?;
        if !exists {
            return Err(ApiError::BucketNotFound(name.to_owned()));
        }

        tracing::debug!(bucket = name, "Bucket resolved");
        Ok(bucket)
    }

    pub async fn handle_list(
        &self,
        body: &ReqBodyList,
        claims: &UserClaims,
    ) -> Result<ResBodyList, ApiError> {
        let path = require(body.path.as_deref(), "path")?;
        let bucket = self.get_bucket(body.bucketname.as_deref()).await?;
        let result = self
            .commands
            .get_list(&bucket, path, claims)
            .await
            .map_err(failed(Operation::List))?;
        Ok(ResBody::new(result))
    }

    pub async fn handle_rename(
        &self,
        body: &ReqBodyRename,
        claims: &UserClaims,
    ) -> Result<ResBodyRename, ApiError> {
        let item = require(body.item.as_deref(), "item")?;
        let new_item_path = require(body.new_item_path.as_deref(), "newItemPath")?;
        let bucket = self.get_bucket(body.bucketname.as_deref()).await?;
        let result = self
            .commands
            .rename_file(&bucket, item, new_item_path, claims)
            .await
            .map_err(failed(Operation::Rename))?;
        Ok(ResBody::new(result))
    }

    /// Unlike the other handlers, move resolves the bucket before checking
    /// its fields.
    pub async fn handle_move(
        &self,
        body: &ReqBodyMove,
        claims: &UserClaims,
    ) -> Result<ResBodyMove, ApiError> {
        let bucket = self.get_bucket(body.bucketname.as_deref()).await?;
        let items = require(body.items.as_deref(), "items")?;
        let new_path = require(body.new_path.as_deref(), "newPath")?;
        let result = self
            .commands
            .move_files(&bucket, items, new_path, claims)
            .await
            .map_err(failed(Operation::Move))?;
        Ok(ResBody::new(result))
    }

    /// Copies `items`, or `[singleFileName]` when no list is given.
    pub async fn handle_copy(
        &self,
        body: &ReqBodyCopy,
        claims: &UserClaims,
    ) -> Result<ResBodyCopy, ApiError> {
        let new_path = require(body.new_path.as_deref(), "newPath")?;
        let bucket = self.get_bucket(body.bucketname.as_deref()).await?;

        let single;
        let items: &[String] = match (&body.items, body.single_file_name.as_deref()) {
            (Some(items), _) => items,
            (None, Some(name)) if name.is_truthy() => {
                single = [name.to_owned()];
                &single
            }
            _ => return Err(ApiError::MissingCopySource),
        };

        let result = self
            .commands
            .copy_files(&bucket, items, new_path, claims)
            .await
            .map_err(failed(Operation::Copy))?;
        Ok(ResBody::new(result))
    }

    pub async fn handle_remove(
        &self,
        body: &ReqBodyRemove,
        claims: &UserClaims,
    ) -> Result<ResBodyRemove, ApiError> {
        let items = require(body.items.as_deref(), "items")?;
        let bucket = self.get_bucket(body.bucketname.as_deref()).await?;
        let result = self
            .commands
            .remove_files(&bucket, items, claims)
            .await
            .map_err(failed(Operation::Remove))?;
        Ok(ResBody::new(result))
    }

    pub async fn handle_edit(
        &self,
        body: &ReqBodyEdit,
        claims: &UserClaims,
    ) -> Result<ResBodyEdit, ApiError> {
        let item = require(body.item.as_deref(), "item")?;
        let content = require(body.content.as_deref(), "content")?;
        let bucket = self.get_bucket(body.bucketname.as_deref()).await?;
        let result = self
            .commands
            .edit_file(&bucket, item, content, claims)
            .await
            .map_err(failed(Operation::Edit))?;
        Ok(ResBody::new(result))
    }

    pub async fn handle_get_content(
        &self,
        body: &ReqBodyGetContent,
        claims: &UserClaims,
    ) -> Result<ResBodyGetContent, ApiError> {
        let item = require(body.item.as_deref(), "item")?;
        let bucket = self.get_bucket(body.bucketname.as_deref()).await?;
        let result = self
            .commands
            .get_file_content(&bucket, item, claims)
            .await
            .map_err(failed(Operation::GetContent))?;
        Ok(ResBody::new(result))
    }

    /// Answers `{ success: true, url }` with the url the command produced.
    pub async fn handle_get_meta(
        &self,
        body: &ReqBodyGetMeta,
        claims: &UserClaims,
    ) -> Result<ResBodyGetMeta, ApiError> {
        let item = require(body.item.as_deref(), "item")?;
        let bucket = self.get_bucket(body.bucketname.as_deref()).await?;
        let url = self
            .commands
            .get_file_meta(&bucket, item, claims)
            .await
            .map_err(failed(Operation::GetMeta))?;
        Ok(ResBody::new(MetaResult {
            success: true,
            url: Some(url),
        }))
    }

    pub async fn handle_create_folder(
        &self,
        body: &ReqBodyCreateFolder,
        claims: &UserClaims,
    ) -> Result<ResBodyCreateFolder, ApiError> {
        let new_path = require(body.new_path.as_deref(), "newPath")?;
        let bucket = self.get_bucket(body.bucketname.as_deref()).await?;
        let result = self
            .commands
            .create_folder(&bucket, new_path, claims)
            .await
            .map_err(failed(Operation::CreateFolder))?;
        Ok(ResBody::new(result))
    }

    pub async fn handle_set_permissions(
        &self,
        body: &ReqBodySetPermissions,
        claims: &UserClaims,
    ) -> Result<ResBodySetPermissions, ApiError> {
        let items = require(body.items.as_deref(), "items")?;
        let role = require(body.role.as_deref(), "role")?;
        let entity = require(body.entity.as_deref(), "entity")?;
        let bucket = self.get_bucket(body.bucketname.as_deref()).await?;
        let result = self
            .commands
            .change_permissions(
                &bucket,
                items,
                role,
                entity,
                body.recursive.unwrap_or(false),
                claims,
            )
            .await
            .map_err(failed(Operation::SetPermissions))?;
        Ok(ResBody::new(result))
    }

    /// Stores `buffer` as `directory_path/originalname`.
    ///
    /// Takes its arguments directly rather than as a body, since uploads
    /// arrive as raw bytes.
    #[allow(clippy::too_many_arguments)]
    pub async fn handle_upload_file(
        &self,
        bucketname: &str,
        directory_path: &str,
        originalname: &str,
        mimetype: &str,
        buffer: Vec<u8>,
        claims: &UserClaims,
    ) -> Result<ResBodyUploadFile, ApiError> {
        let originalname = require(Some(originalname), "originalname")?;
        let mimetype = require(Some(mimetype), "mimetype")?;
        let bucket = self.get_bucket(Some(bucketname)).await?;
        let result = self
            .commands
            .upload_file(
                &bucket,
                directory_path,
                originalname,
                mimetype,
                buffer,
                claims,
            )
            .await
            .map_err(failed(Operation::UploadFile))?;
        Ok(ResBody::new(result))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use filemanager_core::{ActionResult, FileEntry};

    use super::*;
    use crate::commands::OpenDalCommands;
    use crate::storage::{MemoryStorage, StorageError};

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Call {
        operation: &'static str,
        bucket: String,
        args: Vec<String>,
    }

    /// A reply no handler would produce on its own.
    fn canned(operation: &str) -> ActionResult {
        ActionResult::failed(format!("{operation} declined"))
    }

    /// Records every command call and answers with canned results.
    #[derive(Clone, Default)]
    struct RecordingCommands {
        calls: Arc<Mutex<Vec<Call>>>,
        fail: bool,
    }

    impl RecordingCommands {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().expect("lock poisoned").clone()
        }

        fn record<T>(
            &self,
            operation: &'static str,
            bucket: &Bucket,
            args: Vec<String>,
            ok: T,
        ) -> Result<T, CommandError> {
            self.calls.lock().expect("lock poisoned").push(Call {
                operation,
                bucket: bucket.name().to_owned(),
                args,
            });
            if self.fail {
                Err(CommandError::NotFound("missing.txt".to_owned()))
            } else {
                Ok(ok)
            }
        }
    }

    impl Commands for RecordingCommands {
        async fn get_list(
            &self,
            bucket: &Bucket,
            path: &str,
            _claims: &UserClaims,
        ) -> Result<Vec<FileEntry>, CommandError> {
            let entry = FileEntry {
                name: "a.txt".to_owned(),
                rights: "-rw-r--r--".to_owned(),
                size: 3,
                date: None,
                entry_type: filemanager_core::EntryType::File,
            };
            self.record("list", bucket, vec![path.to_owned()], vec![entry])
        }

        async fn rename_file(
            &self,
            bucket: &Bucket,
            item: &str,
            new_item_path: &str,
            _claims: &UserClaims,
        ) -> Result<ActionResult, CommandError> {
            let args = vec![item.to_owned(), new_item_path.to_owned()];
            self.record("rename", bucket, args, canned("rename"))
        }

        async fn move_files(
            &self,
            bucket: &Bucket,
            items: &[String],
            new_path: &str,
            _claims: &UserClaims,
        ) -> Result<ActionResult, CommandError> {
            let mut args = items.to_vec();
            args.push(new_path.to_owned());
            self.record("move", bucket, args, canned("move"))
        }

        async fn copy_files(
            &self,
            bucket: &Bucket,
            items: &[String],
            new_path: &str,
            _claims: &UserClaims,
        ) -> Result<ActionResult, CommandError> {
            let mut args = items.to_vec();
            args.push(new_path.to_owned());
            self.record("copy", bucket, args, canned("copy"))
        }

        async fn remove_files(
            &self,
            bucket: &Bucket,
            items: &[String],
            _claims: &UserClaims,
        ) -> Result<ActionResult, CommandError> {
            self.record("remove", bucket, items.to_vec(), canned("remove"))
        }

        async fn edit_file(
            &self,
            bucket: &Bucket,
            item: &str,
            content: &str,
            _claims: &UserClaims,
        ) -> Result<ActionResult, CommandError> {
            let args = vec![item.to_owned(), content.to_owned()];
            self.record("edit", bucket, args, canned("edit"))
        }

        async fn get_file_content(
            &self,
            bucket: &Bucket,
            item: &str,
            _claims: &UserClaims,
        ) -> Result<String, CommandError> {
            self.record("getContent", bucket, vec![item.to_owned()], "hi".to_owned())
        }

        async fn get_file_meta(
            &self,
            bucket: &Bucket,
            item: &str,
            _claims: &UserClaims,
        ) -> Result<String, CommandError> {
            let url = format!("https://example.test/{item}");
            self.record("getMeta", bucket, vec![item.to_owned()], url)
        }

        async fn create_folder(
            &self,
            bucket: &Bucket,
            new_path: &str,
            _claims: &UserClaims,
        ) -> Result<ActionResult, CommandError> {
            let args = vec![new_path.to_owned()];
            self.record("createFolder", bucket, args, canned("createFolder"))
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
            let mut args = items.to_vec();
            args.extend([role.to_owned(), entity.to_owned(), recursive.to_string()]);
            self.record("setPermissions", bucket, args, canned("setPermissions"))
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
            let args = vec![
                directory_path.to_owned(),
                originalname.to_owned(),
                mimetype.to_owned(),
                buffer.len().to_string(),
            ];
            self.record("uploadFile", bucket, args, canned("uploadFile"))
        }
    }

    /// Counts bucket resolutions on top of in-memory buckets.
    #[derive(Clone)]
    struct CountingStorage {
        inner: MemoryStorage,
        resolved: Arc<AtomicUsize>,
    }

    impl CountingStorage {
        fn new(buckets: &[&str]) -> Self {
            Self {
                inner: MemoryStorage::with_buckets(buckets).unwrap(),
                resolved: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn resolved(&self) -> usize {
            self.resolved.load(Ordering::SeqCst)
        }
    }

    impl StorageBackend for CountingStorage {
        fn bucket(&self, name: &str) -> Result<Bucket, StorageError> {
            self.resolved.fetch_add(1, Ordering::SeqCst);
            self.inner.bucket(name)
        }

        async fn bucket_exists(&self, bucket: &Bucket) -> Result<bool, StorageError> {
            self.inner.bucket_exists(bucket).await
        }
    }

    fn api() -> FileManagerApi<CountingStorage, RecordingCommands> {
        FileManagerApi::new(CountingStorage::new(&["files"]), RecordingCommands::default())
    }

    fn claims() -> UserClaims {
        UserClaims::new().with("sub", "user-1")
    }

    fn strings(values: &[&str]) -> Option<Vec<String>> {
        Some(values.iter().map(|v| (*v).to_owned()).collect())
    }

    #[tokio::test]
    async fn test_list_passes_path_and_result_through() {
        let api = api();
        let body = ReqBodyList {
            bucketname: Some("files".to_owned()),
            path: Some("/docs".to_owned()),
        };

        let res = api.handle_list(&body, &claims()).await.unwrap();

        assert_eq!(res.result.len(), 1);
        assert_eq!(res.result[0].name, "a.txt");
        assert_eq!(
            api.commands().calls(),
            vec![Call {
                operation: "list",
                bucket: "files".to_owned(),
                args: vec!["/docs".to_owned()],
            }]
        );
    }

    #[tokio::test]
    async fn test_missing_field_skips_bucket_resolution() {
        let api = api();
        let body = ReqBodyRename {
            bucketname: Some("files".to_owned()),
            item: Some("a.txt".to_owned()),
            new_item_path: None,
        };

        let err = api.handle_rename(&body, &claims()).await.unwrap_err();

        assert!(matches!(err, ApiError::MissingField("newItemPath")));
        assert_eq!(api.storage().resolved(), 0);
        assert!(api.commands().calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_string_counts_as_missing() {
        let api = api();
        let body = ReqBodyEdit {
            bucketname: Some("files".to_owned()),
            item: Some("notes.txt".to_owned()),
            content: Some(String::new()),
        };

        let err = api.handle_edit(&body, &claims()).await.unwrap_err();
        assert!(matches!(err, ApiError::MissingField("content")));
    }

    #[tokio::test]
    async fn test_empty_bucketname_is_missing() {
        let api = api();
        let body = ReqBodyGetContent {
            bucketname: Some(String::new()),
            item: Some("a.txt".to_owned()),
        };

        let err = api.handle_get_content(&body, &claims()).await.unwrap_err();

        assert!(matches!(err, ApiError::MissingField("bucketname")));
        assert_eq!(api.storage().resolved(), 0);
    }

    #[tokio::test]
    async fn test_unknown_bucket_never_reaches_commands() {
        let api = api();
        let body = ReqBodyCreateFolder {
            bucketname: Some("elsewhere".to_owned()),
            new_path: Some("/new".to_owned()),
        };

        let err = api.handle_create_folder(&body, &claims()).await.unwrap_err();

        assert!(matches!(err, ApiError::BucketNotFound(ref name) if name == "elsewhere"));
        assert!(api.commands().calls().is_empty());
    }

    #[tokio::test]
    async fn test_move_resolves_bucket_before_fields() {
        let api = api();
        let body = ReqBodyMove {
            bucketname: Some("elsewhere".to_owned()),
            items: None,
            new_path: None,
        };

        let err = api.handle_move(&body, &claims()).await.unwrap_err();
        assert!(matches!(err, ApiError::BucketNotFound(_)));

        let body = ReqBodyMove {
            bucketname: Some("files".to_owned()),
            items: None,
            new_path: Some("/dest".to_owned()),
        };

        let err = api.handle_move(&body, &claims()).await.unwrap_err();
        assert!(matches!(err, ApiError::MissingField("items")));
        assert_eq!(api.storage().resolved(), 2);
    }

    #[tokio::test]
    async fn test_copy_falls_back_to_single_file_name() {
        let api = api();
        let body = ReqBodyCopy {
            bucketname: Some("files".to_owned()),
            items: None,
            single_file_name: Some("one.txt".to_owned()),
            new_path: Some("/dest".to_owned()),
        };

        api.handle_copy(&body, &claims()).await.unwrap();

        let calls = api.commands().calls();
        assert_eq!(calls[0].args, vec!["one.txt", "/dest"]);
    }

    #[tokio::test]
    async fn test_copy_prefers_items() {
        let api = api();
        let body = ReqBodyCopy {
            bucketname: Some("files".to_owned()),
            items: strings(&["a", "b"]),
            single_file_name: Some("ignored".to_owned()),
            new_path: Some("/dest".to_owned()),
        };

        api.handle_copy(&body, &claims()).await.unwrap();
        assert_eq!(api.commands().calls()[0].args, vec!["a", "b", "/dest"]);
    }

    #[tokio::test]
    async fn test_copy_without_source_is_rejected() {
        let api = api();
        let body = ReqBodyCopy {
            bucketname: Some("files".to_owned()),
            items: None,
            single_file_name: Some(String::new()),
            new_path: Some("/dest".to_owned()),
        };

        let err = api.handle_copy(&body, &claims()).await.unwrap_err();

        assert!(matches!(err, ApiError::MissingCopySource));
        assert!(api.commands().calls().is_empty());
    }

    #[tokio::test]
    async fn test_get_meta_wraps_url() {
        let api = api();
        let body = ReqBodyGetMeta {
            bucketname: Some("files".to_owned()),
            item: Some("a.txt".to_owned()),
        };

        let res = api.handle_get_meta(&body, &claims()).await.unwrap();

        assert!(res.result.success);
        assert_eq!(res.result.url.as_deref(), Some("https://example.test/a.txt"));
    }

    #[tokio::test]
    async fn test_set_permissions_defaults_to_non_recursive() {
        let api = api();
        let body = ReqBodySetPermissions {
            bucketname: Some("files".to_owned()),
            items: strings(&["a.txt"]),
            role: Some("READER".to_owned()),
            entity: Some("allUsers".to_owned()),
            recursive: None,
        };

        let res = api.handle_set_permissions(&body, &claims()).await.unwrap();

        assert_eq!(res.result, canned("setPermissions"));
        assert_eq!(
            api.commands().calls()[0].args,
            vec!["a.txt", "READER", "allUsers", "false"]
        );
    }

    #[tokio::test]
    async fn test_empty_items_list_is_accepted() {
        let api = api();
        let body = ReqBodyRemove {
            bucketname: Some("files".to_owned()),
            items: Some(Vec::new()),
        };

        api.handle_remove(&body, &claims()).await.unwrap();
        assert_eq!(api.commands().calls()[0].operation, "remove");
    }

    #[tokio::test]
    async fn test_upload_checks_name_and_mimetype() {
        let api = api();

        let err = api
            .handle_upload_file("files", "/in", "", "text/plain", b"x".to_vec(), &claims())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::MissingField("originalname")));

        let err = api
            .handle_upload_file("files", "/in", "a.txt", "", b"x".to_vec(), &claims())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::MissingField("mimetype")));
        assert_eq!(api.storage().resolved(), 0);

        api.handle_upload_file("files", "/in", "a.txt", "text/plain", b"abc".to_vec(), &claims())
            .await
            .unwrap();
        assert_eq!(
            api.commands().calls()[0].args,
            vec!["/in", "a.txt", "text/plain", "3"]
        );
    }

    #[tokio::test]
    async fn test_command_failure_is_labelled() {
        let api = FileManagerApi::new(
            CountingStorage::new(&["files"]),
            RecordingCommands::failing(),
        );
        let body = ReqBodyGetContent {
            bucketname: Some("files".to_owned()),
            item: Some("missing.txt".to_owned()),
        };

        let err = api.handle_get_content(&body, &claims()).await.unwrap_err();

        assert!(matches!(
            err,
            ApiError::Command {
                operation: Operation::GetContent,
                ..
            }
        ));
        assert_eq!(
            err.message_chain(),
            "getContent failed: File not found: missing.txt"
        );
    }

    #[tokio::test]
    async fn test_concurrent_requests_use_their_own_buckets() {
        let storage = MemoryStorage::with_buckets(["left", "right"]).unwrap();
        let api = FileManagerApi::new(storage, OpenDalCommands::new());

        let edit = |bucket: &str, content: &str| ReqBodyEdit {
            bucketname: Some(bucket.to_owned()),
            item: Some("shared.txt".to_owned()),
            content: Some(content.to_owned()),
        };
        let (left, right) = (edit("left", "L"), edit("right", "R"));

        let (left_claims, right_claims) = (claims(), claims());
        let (a, b) = tokio::join!(
            api.handle_edit(&left, &left_claims),
            api.handle_edit(&right, &right_claims)
        );
        assert!(a.unwrap().result.success);
        assert!(b.unwrap().result.success);

        for (bucket, expected) in [("left", "L"), ("right", "R")] {
            let body = ReqBodyGetContent {
                bucketname: Some(bucket.to_owned()),
                item: Some("shared.txt".to_owned()),
            };
            let res = api.handle_get_content(&body, &claims()).await.unwrap();
            assert_eq!(res.result, expected);
        }
    }

    #[tokio::test]
    async fn test_every_required_field_is_checked_before_bucket_resolution() {
        let api = api();
        let c = claims();
        let bucket = || Some("files".to_owned());
        let text = |value: &str| Some(value.to_owned());

        let cases: Vec<(&str, ApiError)> = vec![
            (
                "path",
                api.handle_list(&ReqBodyList { bucketname: bucket(), path: None }, &c)
                    .await
                    .unwrap_err(),
            ),
            (
                "item",
                api.handle_rename(
                    &ReqBodyRename {
                        bucketname: bucket(),
                        item: None,
                        new_item_path: text("/b"),
                    },
                    &c,
                )
                .await
                .unwrap_err(),
            ),
            (
                "newItemPath",
                api.handle_rename(
                    &ReqBodyRename {
                        bucketname: bucket(),
                        item: text("/a"),
                        new_item_path: None,
                    },
                    &c,
                )
                .await
                .unwrap_err(),
            ),
            (
                "newPath",
                api.handle_copy(
                    &ReqBodyCopy {
                        bucketname: bucket(),
                        items: None,
                        single_file_name: None,
                        new_path: None,
                    },
                    &c,
                )
                .await
                .unwrap_err(),
            ),
            (
                "items",
                api.handle_remove(&ReqBodyRemove { bucketname: bucket(), items: None }, &c)
                    .await
                    .unwrap_err(),
            ),
            (
                "item",
                api.handle_edit(
                    &ReqBodyEdit {
                        bucketname: bucket(),
                        item: None,
                        content: text("x"),
                    },
                    &c,
                )
                .await
                .unwrap_err(),
            ),
            (
                "content",
                api.handle_edit(
                    &ReqBodyEdit {
                        bucketname: bucket(),
                        item: text("/a"),
                        content: None,
                    },
                    &c,
                )
                .await
                .unwrap_err(),
            ),
            (
                "item",
                api.handle_get_content(
                    &ReqBodyGetContent { bucketname: bucket(), item: text("") },
                    &c,
                )
                .await
                .unwrap_err(),
            ),
            (
                "item",
                api.handle_get_meta(&ReqBodyGetMeta { bucketname: bucket(), item: None }, &c)
                    .await
                    .unwrap_err(),
            ),
            (
                "newPath",
                api.handle_create_folder(
                    &ReqBodyCreateFolder { bucketname: bucket(), new_path: None },
                    &c,
                )
                .await
                .unwrap_err(),
            ),
            (
                "items",
                api.handle_set_permissions(
                    &ReqBodySetPermissions {
                        bucketname: bucket(),
                        items: None,
                        role: text("READER"),
                        entity: text("allUsers"),
                        recursive: None,
                    },
                    &c,
                )
                .await
                .unwrap_err(),
            ),
            (
                "role",
                api.handle_set_permissions(
                    &ReqBodySetPermissions {
                        bucketname: bucket(),
                        items: strings(&["a"]),
                        role: None,
                        entity: text("allUsers"),
                        recursive: None,
                    },
                    &c,
                )
                .await
                .unwrap_err(),
            ),
            (
                "entity",
                api.handle_set_permissions(
                    &ReqBodySetPermissions {
                        bucketname: bucket(),
                        items: strings(&["a"]),
                        role: text("READER"),
                        entity: None,
                        recursive: None,
                    },
                    &c,
                )
                .await
                .unwrap_err(),
            ),
            (
                "bucketname",
                api.handle_list(&ReqBodyList { bucketname: None, path: text("/") }, &c)
                    .await
                    .unwrap_err(),
            ),
            (
                "originalname",
                api.handle_upload_file("files", "/", "", "text/plain", Vec::new(), &c)
                    .await
                    .unwrap_err(),
            ),
        ];

        for (field, err) in cases {
            assert!(
                matches!(err, ApiError::MissingField(name) if name == field),
                "expected missing '{field}', got {err:?}"
            );
        }
        assert_eq!(api.storage().resolved(), 0);
        assert!(api.commands().calls().is_empty());
    }

    #[tokio::test]
    async fn test_handlers_return_command_results_unmodified() {
        let api = api();
        let c = claims();
        let bucket = || Some("files".to_owned());
        let text = |value: &str| Some(value.to_owned());

        let rename = ReqBodyRename {
            bucketname: bucket(),
            item: text("/a"),
            new_item_path: text("/b"),
        };
        assert_eq!(api.handle_rename(&rename, &c).await.unwrap().result, canned("rename"));

        let moved = ReqBodyMove {
            bucketname: bucket(),
            items: strings(&["/a"]),
            new_path: text("/d"),
        };
        assert_eq!(api.handle_move(&moved, &c).await.unwrap().result, canned("move"));

        let copy = ReqBodyCopy {
            bucketname: bucket(),
            items: strings(&["/a"]),
            single_file_name: None,
            new_path: text("/d"),
        };
        assert_eq!(api.handle_copy(&copy, &c).await.unwrap().result, canned("copy"));

        let remove = ReqBodyRemove {
            bucketname: bucket(),
            items: strings(&["/a"]),
        };
        assert_eq!(api.handle_remove(&remove, &c).await.unwrap().result, canned("remove"));

        let edit = ReqBodyEdit {
            bucketname: bucket(),
            item: text("/a"),
            content: text("x"),
        };
        assert_eq!(api.handle_edit(&edit, &c).await.unwrap().result, canned("edit"));

        let content = ReqBodyGetContent {
            bucketname: bucket(),
            item: text("/a"),
        };
        assert_eq!(api.handle_get_content(&content, &c).await.unwrap().result, "hi");

        let folder = ReqBodyCreateFolder {
            bucketname: bucket(),
            new_path: text("/d"),
        };
        assert_eq!(
            api.handle_create_folder(&folder, &c).await.unwrap().result,
            canned("createFolder")
        );

        let upload = api
            .handle_upload_file("files", "/", "a.txt", "text/plain", b"x".to_vec(), &c)
            .await
            .unwrap();
        assert_eq!(upload.result, canned("uploadFile"));
    }
}
