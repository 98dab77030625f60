//! Object-level building blocks shared by the commands.

use opendal::{Buffer, Entry, ErrorKind, Operator};

use super::paths;
use super::permissions::is_reserved;
use super::types::{CommandError, at};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    File,
    Dir,
}

/// Works out whether a cleaned path names a file, a directory, or nothing.
///
/// Object stores have no real directories, so a directory exists when its
/// parent listing shows it (either a marker object or a common prefix).
pub async fn kind_of(op: &Operator, cleaned: &str) -> Result<Option<Kind>, CommandError> {
    if cleaned.is_empty() {
        return Ok(Some(Kind::Dir));
    }

    match op.stat(cleaned).await {
        Ok(meta) if meta.is_file() => return Ok(Some(Kind::File)),
        Ok(_) => return Ok(Some(Kind::Dir)),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(CommandError::storage(cleaned, e)),
    }

    let parent = match cleaned.rsplit_once('/') {
        Some((parent, _)) => parent,
        None => "",
    };
    let dir = paths::dir_path(cleaned);
    let siblings = list_dir(op, &paths::dir_path(parent)).await?;
    Ok(siblings
        .iter()
        .any(|entry| entry.path() == dir)
        .then_some(Kind::Dir))
}

/// Direct children of `dir`, without `dir` itself. A missing directory lists as empty.
pub async fn list_dir(op: &Operator, dir: &str) -> Result<Vec<Entry>, CommandError> {
    match op.list(dir).await {
        Ok(entries) => Ok(entries
            .into_iter()
            .filter(|entry| entry.path() != dir && entry.path() != "/")
            .collect()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(CommandError::storage(dir, e)),
    }
}

/// Everything below `dir`, recursively, without `dir` itself.
pub async fn list_tree(op: &Operator, dir: &str) -> Result<Vec<Entry>, CommandError> {
    match op.list_with(dir).recursive(true).await {
        Ok(entries) => Ok(entries
            .into_iter()
            .filter(|entry| entry.path() != dir)
            .collect()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(CommandError::storage(dir, e)),
    }
}

/// Copies one object, keeping its content type.
///
/// Uses the service's server-side copy when available.
pub async fn copy_object(op: &Operator, from: &str, to: &str) -> Result<(), CommandError> {
    if op.info().full_capability().copy {
        return op.copy(from, to).await.map_err(at(from));
    }

    let content_type = op
        .stat(from)
        .await
        .map_err(at(from))?
        .content_type()
        .map(str::to_owned);
    let data = op.read(from).await.map_err(at(from))?;

    write_object(op, to, data, content_type.as_deref()).await
}

/// Writes an object, attaching the content type when the service stores one.
pub async fn write_object(
    op: &Operator,
    path: &str,
    data: impl Into<Buffer>,
    content_type: Option<&str>,
) -> Result<(), CommandError> {
    let mut write = op.write_with(path, data);
    if let Some(content_type) =
        content_type.filter(|_| op.info().full_capability().write_with_content_type)
    {
        write = write.content_type(content_type);
    }
    write.await.map_err(at(path))?;
    Ok(())
}

/// Copies a directory tree from `from_dir` to `to_dir` (both ending in `/`).
pub async fn copy_tree(op: &Operator, from_dir: &str, to_dir: &str) -> Result<(), CommandError> {
    op.create_dir(to_dir).await.map_err(at(to_dir))?;

    let skip_reserved = !is_reserved(from_dir);
    for entry in list_tree(op, from_dir).await? {
        if skip_reserved && is_reserved(entry.path()) {
            continue;
        }
        let Some(relative) = entry.path().strip_prefix(from_dir) else {
            continue;
        };
        let target = format!("{to_dir}{relative}");
        if entry.metadata().is_dir() {
            op.create_dir(&target).await.map_err(at(&target))?;
        } else {
            copy_object(op, entry.path(), &target).await?;
        }
    }
    Ok(())
}

/// Deletes a directory tree, deepest entries first, then the directory marker.
pub async fn delete_tree(op: &Operator, dir: &str) -> Result<(), CommandError> {
    let mut entries = list_tree(op, dir).await?;
    if !is_reserved(dir) {
        entries.retain(|entry| !is_reserved(entry.path()));
    }
    entries.sort_by_key(|entry| std::cmp::Reverse(entry.path().len()));

    for entry in entries {
        op.delete(entry.path()).await.map_err(at(entry.path()))?;
    }
    op.delete(dir).await.map_err(at(dir))
}
