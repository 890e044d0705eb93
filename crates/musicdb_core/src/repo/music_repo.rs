//! Table gateway contracts and the SQLite implementation.
//!
//! # Responsibility
//! - Provide insert-or-replace/select/update/delete over `album`, `song` and
//!   `albumsong`, plus the album track listing join.
//! - Refuse connections that do not carry the migrated music schema.
//!
//! # Invariants
//! - `insert_many` is atomic for its one table; nothing spans tables.
//! - `update_by_id`/`delete_by_id` return 0 for a missing id, never an error.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::album::Album;
use crate::model::album_song::AlbumSong;
use crate::model::song::Song;
use crate::model::RowId;
use crate::repo::table::TableRecord;
use rusqlite::{params_from_iter, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};

const SONGS_FOR_ALBUM_SQL: &str = "SELECT song.id, song.name, song.duration
FROM song
INNER JOIN albumsong ON song.id = albumsong.song_id
WHERE albumsong.album_id = ?1;";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for music table access.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it through db::open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Typed data access for one table.
pub trait TableGateway<T> {
    /// Inserts or replaces every row.
    fn insert_many(&self, rows: &[T]) -> RepoResult<()>;
    /// Inserts or replaces one row.
    fn insert_one(&self, row: &T) -> RepoResult<()>;
    /// Returns all rows in storage order.
    fn get_all(&self) -> RepoResult<Vec<T>>;
    fn get_by_id(&self, id: RowId) -> RepoResult<Option<T>>;
    /// Overwrites the row with `row.id`; returns affected rows (0 or 1).
    fn update_by_id(&self, row: &T) -> RepoResult<usize>;
    /// Returns affected rows (0 or 1).
    fn delete_by_id(&self, id: RowId) -> RepoResult<usize>;
    /// Deletes the stored row sharing this row's primary key.
    fn delete_row(&self, row: &T) -> RepoResult<usize>;
}

/// Gateway over all three music tables.
pub trait MusicRepository:
    TableGateway<Album> + TableGateway<Song> + TableGateway<AlbumSong>
{
    /// Songs linked to `album_id` through `albumsong`.
    fn songs_for_album(&self, album_id: RowId) -> RepoResult<Vec<Song>>;
}

/// SQLite-backed music repository borrowing a migrated connection.
pub struct SqliteMusicRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMusicRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl<T: TableRecord> TableGateway<T> for SqliteMusicRepository<'_> {
    fn insert_many(&self, rows: &[T]) -> RepoResult<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(T::INSERT_OR_REPLACE_SQL)?;
            for row in rows {
                stmt.execute(params_from_iter(row.bind_values()))?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn insert_one(&self, row: &T) -> RepoResult<()> {
        self.conn
            .prepare_cached(T::INSERT_OR_REPLACE_SQL)?
            .execute(params_from_iter(row.bind_values()))?;
        Ok(())
    }

    fn get_all(&self) -> RepoResult<Vec<T>> {
        let mut stmt = self.conn.prepare_cached(T::SELECT_ALL_SQL)?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(T::from_row(row)?);
        }
        Ok(records)
    }

    fn get_by_id(&self, id: RowId) -> RepoResult<Option<T>> {
        let mut stmt = self.conn.prepare_cached(T::SELECT_BY_ID_SQL)?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(T::from_row(row)?));
        }
        Ok(None)
    }

    fn update_by_id(&self, row: &T) -> RepoResult<usize> {
        let changed = self
            .conn
            .prepare_cached(T::UPDATE_BY_ID_SQL)?
            .execute(params_from_iter(row.bind_values()))?;
        Ok(changed)
    }

    fn delete_by_id(&self, id: RowId) -> RepoResult<usize> {
        let changed = self
            .conn
            .prepare_cached(T::DELETE_BY_ID_SQL)?
            .execute([id])?;
        Ok(changed)
    }

    fn delete_row(&self, row: &T) -> RepoResult<usize> {
        TableGateway::<T>::delete_by_id(self, row.id())
    }
}

impl MusicRepository for SqliteMusicRepository<'_> {
    fn songs_for_album(&self, album_id: RowId) -> RepoResult<Vec<Song>> {
        let mut stmt = self.conn.prepare_cached(SONGS_FOR_ALBUM_SQL)?;
        let mut rows = stmt.query([album_id])?;
        let mut songs = Vec::new();
        while let Some(row) = rows.next()? {
            songs.push(Song::from_row(row)?);
        }
        Ok(songs)
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    ensure_table_ready::<Album>(conn)?;
    ensure_table_ready::<Song>(conn)?;
    ensure_table_ready::<AlbumSong>(conn)?;
    Ok(())
}

fn ensure_table_ready<T: TableRecord>(conn: &Connection) -> RepoResult<()> {
    if !table_exists(conn, T::TABLE)? {
        return Err(RepoError::MissingRequiredTable(T::TABLE));
    }

    let columns = table_columns(conn, T::TABLE)?;
    for column in T::COLUMNS {
        if !columns.iter().any(|current| current == column) {
            return Err(RepoError::MissingRequiredColumn {
                table: T::TABLE,
                column,
            });
        }
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_columns(conn: &Connection, table: &str) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        columns.push(row.get::<_, String>(1)?);
    }
    Ok(columns)
}
