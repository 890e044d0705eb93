//! Local album/song store with a URI-addressed content provider.
//!
//! `repo` is the typed table gateway, `provider` routes resource identifiers
//! onto it, and `db::MusicStore` owns the SQLite connection both borrow.

pub mod db;
pub mod logging;
pub mod model;
pub mod provider;
pub mod repo;
pub mod service;

pub use db::{DbError, DbResult, MusicStore};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::album::Album;
pub use model::album_song::AlbumSong;
pub use model::song::Song;
pub use model::RowId;
pub use provider::uri::{ResourceUri, Route, Table};
pub use provider::values::{ContentValues, FromContentValues};
pub use provider::{
    MusicProvider, ProviderConfig, ProviderError, ProviderResult, ResultSet, DEFAULT_AUTHORITY,
    DEFAULT_MIME_SCOPE,
};
pub use repo::music_repo::{
    MusicRepository, RepoError, RepoResult, SqliteMusicRepository, TableGateway,
};
pub use repo::table::TableRecord;
pub use service::music_service::{CatalogSnapshot, DemoCatalog, MusicService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
