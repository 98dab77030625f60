//! Request bodies for file manager operations.
//!
//! Every field is optional on the wire. Presence is checked by the service,
//! which reports the first missing field by its JSON name.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReqBodyList {
    pub bucketname: Option<String>,
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReqBodyRename {
    pub bucketname: Option<String>,
    pub item: Option<String>,
    pub new_item_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReqBodyMove {
    pub bucketname: Option<String>,
    pub items: Option<Vec<String>>,
    pub new_path: Option<String>,
}

/// Copy accepts either a list of `items` or a lone `singleFileName`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReqBodyCopy {
    pub bucketname: Option<String>,
    pub items: Option<Vec<String>>,
    pub single_file_name: Option<String>,
    pub new_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReqBodyRemove {
    pub bucketname: Option<String>,
    pub items: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReqBodyEdit {
    pub bucketname: Option<String>,
    pub item: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReqBodyGetContent {
    pub bucketname: Option<String>,
    pub item: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReqBodyGetMeta {
    pub bucketname: Option<String>,
    pub item: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReqBodyCreateFolder {
    pub bucketname: Option<String>,
    pub new_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReqBodySetPermissions {
    pub bucketname: Option<String>,
    pub items: Option<Vec<String>>,
    pub role: Option<String>,
    pub entity: Option<String>,
    /// Apply to everything below directory items as well.
    pub recursive: Option<bool>,
}
