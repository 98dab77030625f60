//! Permission grants stored next to the data.
//!
//! Object stores reached through OpenDAL expose no ACL API, so grants are
//! kept as small JSON documents under a reserved prefix that listings hide.
//! A file `a/b.txt` keeps its grants in `.filemanager/permissions/a/b.txt.json`,
//! a directory `a` in `.filemanager/permissions/a/.dir.json`, which puts every
//! grant of a directory tree under one prefix.

use std::collections::BTreeMap;

use opendal::{ErrorKind, Operator};
use serde::{Deserialize, Serialize};

use super::objects::{self, Kind};
use super::paths;
use super::types::{CommandError, at};

pub const RESERVED_PREFIX: &str = ".filemanager/";
const PERMISSIONS_PREFIX: &str = ".filemanager/permissions/";
const DIR_DOCUMENT: &str = ".dir.json";

/// Role granted to each entity, e.g. `allUsers -> READER`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionsDocument {
    pub grants: BTreeMap<String, String>,
}

/// Whether `path` is the reserved directory or lies below it.
pub fn is_reserved(path: &str) -> bool {
    let path = path.trim_start_matches('/');
    path == RESERVED_PREFIX.trim_end_matches('/') || path.starts_with(RESERVED_PREFIX)
}

fn document_path(cleaned: &str, kind: Kind) -> String {
    match kind {
        Kind::File => format!("{PERMISSIONS_PREFIX}{cleaned}.json"),
        Kind::Dir if cleaned.is_empty() => format!("{PERMISSIONS_PREFIX}{DIR_DOCUMENT}"),
        Kind::Dir => format!("{PERMISSIONS_PREFIX}{cleaned}/{DIR_DOCUMENT}"),
    }
}

fn tree_prefix(cleaned: &str) -> String {
    format!("{PERMISSIONS_PREFIX}{}", paths::dir_path(cleaned).trim_start_matches('/'))
}

pub async fn load(
    op: &Operator,
    cleaned: &str,
    kind: Kind,
) -> Result<PermissionsDocument, CommandError> {
    let path = document_path(cleaned, kind);
    let data = match op.read(&path).await {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(PermissionsDocument::default()),
        Err(e) => return Err(CommandError::storage(&path, e)),
    };

    serde_json::from_slice(&data.to_vec())
        .map_err(|source| CommandError::Permissions { path, source })
}

/// Records `entity -> role` for one file or directory.
pub async fn grant(
    op: &Operator,
    cleaned: &str,
    kind: Kind,
    role: &str,
    entity: &str,
) -> Result<(), CommandError> {
    let mut document = load(op, cleaned, kind).await?;
    document.grants.insert(entity.to_owned(), role.to_owned());

    let path = document_path(cleaned, kind);
    let data = serde_json::to_vec(&document).map_err(|source| CommandError::Permissions {
        path: path.clone(),
        source,
    })?;
    objects::write_object(op, &path, data, Some("application/json")).await
}

/// Moves the grants of `from` over to `to`.
pub async fn relocate(
    op: &Operator,
    from: &str,
    to: &str,
    kind: Kind,
    keep_source: bool,
) -> Result<(), CommandError> {
    match kind {
        Kind::File => {
            let source = document_path(from, Kind::File);
            if !op.exists(&source).await.map_err(at(&source))? {
                return Ok(());
            }
            objects::copy_object(op, &source, &document_path(to, Kind::File)).await?;
            if !keep_source {
                op.delete(&source).await.map_err(at(&source))?;
            }
        }
        Kind::Dir => {
            let source = tree_prefix(from);
            if objects::list_tree(op, &source).await?.is_empty() {
                return Ok(());
            }
            objects::copy_tree(op, &source, &tree_prefix(to)).await?;
            if !keep_source {
                objects::delete_tree(op, &source).await?;
            }
        }
    }
    Ok(())
}

/// Drops the grants of a removed file or directory.
pub async fn forget(op: &Operator, cleaned: &str, kind: Kind) -> Result<(), CommandError> {
    match kind {
        Kind::File => {
            let path = document_path(cleaned, Kind::File);
            op.delete(&path).await.map_err(at(&path))
        }
        Kind::Dir => objects::delete_tree(op, &tree_prefix(cleaned)).await,
    }
}
