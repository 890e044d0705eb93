use super::uri::{Route, Table};
use serde::{Deserialize, Serialize};

pub const DEFAULT_AUTHORITY: &str = "com.example.musicdb.provider";
pub const DEFAULT_MIME_SCOPE: &str = "musicdb";

/// Addressing settings for one provider instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// First path component every resource identifier must carry.
    pub authority: String,
    /// `<scope>` in `vnd.<scope>.cursor.dir|item/...` type identifiers.
    pub mime_scope: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            authority: DEFAULT_AUTHORITY.to_string(),
            mime_scope: DEFAULT_MIME_SCOPE.to_string(),
        }
    }
}

impl ProviderConfig {
    pub fn with_authority(authority: impl Into<String>) -> Self {
        Self {
            authority: authority.into(),
            ..Self::default()
        }
    }

    /// Type identifier for a matched route.
    pub fn content_type(&self, route: Route) -> String {
        let kind = match route {
            Route::Collection(_) => "dir",
            Route::Item(..) => "item",
        };
        self.type_for(kind, route.table())
    }

    fn type_for(&self, kind: &str, table: Table) -> String {
        format!(
            "vnd.{}.cursor.{kind}/{}.{}",
            self.mime_scope,
            self.authority,
            table.path()
        )
    }
}
