use super::RowId;
use serde::{Deserialize, Serialize};

/// One row of the `song` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: RowId,
    pub name: String,
    /// Free-form duration label, stored verbatim.
    pub duration: String,
}

impl Song {
    pub fn new(id: RowId, name: impl Into<String>, duration: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            duration: duration.into(),
        }
    }
}
