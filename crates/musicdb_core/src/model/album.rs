use super::RowId;
use serde::{Deserialize, Serialize};

/// One row of the `album` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: RowId,
    pub name: String,
    /// Free-form release label, stored verbatim.
    pub release: String,
}

impl Album {
    pub fn new(id: RowId, name: impl Into<String>, release: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            release: release.into(),
        }
    }
}
