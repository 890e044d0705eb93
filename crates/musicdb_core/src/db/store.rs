//! Owned store handle with an explicit open/close lifecycle.

use super::{open_db, open_db_in_memory, DbError, DbResult};
use crate::provider::{MusicProvider, ProviderConfig};
use crate::repo::music_repo::{RepoResult, SqliteMusicRepository};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;

/// Music database handle owned by whoever opened it.
///
/// Repositories and providers borrow the handle; `close` consumes it.
pub struct MusicStore {
    conn: Connection,
}

impl MusicStore {
    /// Opens a file-backed store, creating and migrating it when needed.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Opens a private in-memory store.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Wraps an already opened connection.
    ///
    /// The connection is not migrated here; `repository()` rejects it when
    /// the music schema is missing.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Returns a table gateway over this store.
    pub fn repository(&self) -> RepoResult<SqliteMusicRepository<'_>> {
        SqliteMusicRepository::try_new(&self.conn)
    }

    /// Returns a URI dispatcher over this store.
    pub fn provider(
        &self,
        config: ProviderConfig,
    ) -> RepoResult<MusicProvider<SqliteMusicRepository<'_>>> {
        Ok(MusicProvider::new(self.repository()?, config))
    }

    /// Closes the underlying connection, surfacing any close failure.
    pub fn close(self) -> DbResult<()> {
        match self.conn.close() {
            Ok(()) => {
                info!("event=db_close module=db status=ok");
                Ok(())
            }
            Err((_conn, err)) => {
                error!("event=db_close module=db status=error error={}", err);
                Err(DbError::Sqlite(err))
            }
        }
    }
}
