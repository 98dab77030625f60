//! Response envelopes.

use serde::{Deserialize, Serialize};

/// The `{ "result": ... }` wrapper every operation answers with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResBody<T> {
    pub result: T,
}

impl<T> ResBody<T> {
    pub fn new(result: T) -> Self {
        Self { result }
    }
}

/// Outcome of a mutating operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActionResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Payload of a metadata lookup: a download url for the object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    File,
    Dir,
}

/// One row of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    /// Unix-style permission string, e.g. `drwxr-xr-x`.
    pub rights: String,
    pub size: u64,
    pub date: Option<String>,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
}

impl FileEntry {
    pub fn is_dir(&self) -> bool {
        self.entry_type == EntryType::Dir
    }
}

pub type ResBodyList = ResBody<Vec<FileEntry>>;
pub type ResBodyRename = ResBody<ActionResult>;
pub type ResBodyMove = ResBody<ActionResult>;
pub type ResBodyCopy = ResBody<ActionResult>;
pub type ResBodyRemove = ResBody<ActionResult>;
pub type ResBodyEdit = ResBody<ActionResult>;
pub type ResBodyGetContent = ResBody<String>;
pub type ResBodyGetMeta = ResBody<MetaResult>;
pub type ResBodyCreateFolder = ResBody<ActionResult>;
pub type ResBodySetPermissions = ResBody<ActionResult>;
pub type ResBodyUploadFile = ResBody<ActionResult>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_serializes_type_key() {
        let entry = FileEntry {
            name: "docs".to_owned(),
            rights: "drwxr-xr-x".to_owned(),
            size: 0,
            date: None,
            entry_type: EntryType::Dir,
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "dir");
        assert_eq!(json["name"], "docs");
    }

    #[test]
    fn meta_result_omits_missing_url() {
        let json = serde_json::to_value(ResBody::new(MetaResult {
            success: true,
            url: None,
        }))
        .unwrap();

        assert_eq!(json, serde_json::json!({ "result": { "success": true } }));
    }

    #[test]
    fn action_result_omits_error_on_success() {
        let json = serde_json::to_value(ActionResult::ok()).unwrap();
        assert_eq!(json, serde_json::json!({ "success": true }));

        let json = serde_json::to_value(ActionResult::failed("denied")).unwrap();
        assert_eq!(json, serde_json::json!({ "success": false, "error": "denied" }));
    }
}
