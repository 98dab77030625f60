//! Bucket-relative path helpers.
//!
//! Cleaned paths have no leading or trailing slash; the bucket root is the
//! empty string. OpenDAL directory paths end with `/`, and the root is `/`.

use super::types::CommandError;

/// Normalizes a client path, rejecting parent-directory segments.
pub fn clean(path: &str) -> Result<String, CommandError> {
    let mut segments = Vec::new();
    for segment in path.split('/') {
        match segment.trim() {
            "" | "." => {}
            ".." => return Err(CommandError::InvalidPath(path.to_owned())),
            _ => segments.push(segment),
        }
    }
    Ok(segments.join("/"))
}

/// Like [`clean`], but the bucket root is not an acceptable target.
pub fn clean_non_root(path: &str) -> Result<String, CommandError> {
    let cleaned = clean(path)?;
    if cleaned.is_empty() {
        return Err(CommandError::InvalidPath(path.to_owned()));
    }
    Ok(cleaned)
}

pub fn dir_path(cleaned: &str) -> String {
    if cleaned.is_empty() {
        "/".to_owned()
    } else {
        format!("{cleaned}/")
    }
}

pub fn join(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_owned()
    } else {
        format!("{dir}/{name}")
    }
}

pub fn basename(cleaned: &str) -> &str {
    cleaned.rsplit('/').next().unwrap_or(cleaned)
}

/// Whether `candidate` is `parent` itself or lives below it.
pub fn is_within(candidate: &str, parent: &str) -> bool {
    parent.is_empty()
        || candidate == parent
        || candidate
            .strip_prefix(parent)
            .is_some_and(|rest| rest.starts_with('/'))
}
