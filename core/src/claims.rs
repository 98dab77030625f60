//! Opaque user claims.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identity and authorization attributes attached to a request.
///
/// The file manager never interprets these; they travel unchanged from the
/// authentication layer to whichever command implementation wants them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserClaims(Map<String, Value>);

impl UserClaims {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for UserClaims {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
