use serde::{Deserialize, Serialize};

/// A single commit entry from a changelog document.
///
/// Every field is optional: recovered documents frequently carry partial
/// records, and the renderer substitutes placeholders for absent values at
/// display time. An explicit `"files": []` deserializes to `Some(vec![])`,
/// which is distinct from the field being absent entirely. Unknown fields
/// in the source object are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub files: Option<Vec<String>>,
}
