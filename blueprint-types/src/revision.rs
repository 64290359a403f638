use serde::{Deserialize, Serialize};

/// One entry of a document's revision history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionRecord {
    /// Short revision hash.
    pub id: String,
    pub message: String,
}

impl RevisionRecord {
    pub fn new(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
        }
    }
}
