//! Per-table SQL templates and row mapping.
//!
//! Every table is `id` plus two payload columns. Bind order is always
//! `(id, col2, col3)` for both the insert and the update template.

use crate::model::album::Album;
use crate::model::album_song::AlbumSong;
use crate::model::song::Song;
use crate::model::RowId;
use rusqlite::types::Value;
use rusqlite::Row;

/// Row type backed by one SQLite table.
pub trait TableRecord: Sized {
    /// Table name, also the resource path segment.
    const TABLE: &'static str;
    /// Column names in bind order.
    const COLUMNS: [&'static str; 3];
    const INSERT_OR_REPLACE_SQL: &'static str;
    const SELECT_ALL_SQL: &'static str;
    const SELECT_BY_ID_SQL: &'static str;
    const UPDATE_BY_ID_SQL: &'static str;
    const DELETE_BY_ID_SQL: &'static str;

    fn id(&self) -> RowId;

    /// Values in `COLUMNS` order.
    fn bind_values(&self) -> [Value; 3];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

impl TableRecord for Album {
    const TABLE: &'static str = "album";
    const COLUMNS: [&'static str; 3] = ["id", "name", "release"];
    const INSERT_OR_REPLACE_SQL: &'static str =
        "INSERT OR REPLACE INTO album (id, name, \"release\") VALUES (?1, ?2, ?3);";
    const SELECT_ALL_SQL: &'static str = "SELECT id, name, \"release\" FROM album;";
    const SELECT_BY_ID_SQL: &'static str =
        "SELECT id, name, \"release\" FROM album WHERE id = ?1;";
    const UPDATE_BY_ID_SQL: &'static str =
        "UPDATE album SET name = ?2, \"release\" = ?3 WHERE id = ?1;";
    const DELETE_BY_ID_SQL: &'static str = "DELETE FROM album WHERE id = ?1;";

    fn id(&self) -> RowId {
        self.id
    }

    fn bind_values(&self) -> [Value; 3] {
        [
            Value::Integer(self.id),
            Value::Text(self.name.clone()),
            Value::Text(self.release.clone()),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            release: row.get("release")?,
        })
    }
}

impl TableRecord for Song {
    const TABLE: &'static str = "song";
    const COLUMNS: [&'static str; 3] = ["id", "name", "duration"];
    const INSERT_OR_REPLACE_SQL: &'static str =
        "INSERT OR REPLACE INTO song (id, name, duration) VALUES (?1, ?2, ?3);";
    const SELECT_ALL_SQL: &'static str = "SELECT id, name, duration FROM song;";
    const SELECT_BY_ID_SQL: &'static str = "SELECT id, name, duration FROM song WHERE id = ?1;";
    const UPDATE_BY_ID_SQL: &'static str =
        "UPDATE song SET name = ?2, duration = ?3 WHERE id = ?1;";
    const DELETE_BY_ID_SQL: &'static str = "DELETE FROM song WHERE id = ?1;";

    fn id(&self) -> RowId {
        self.id
    }

    fn bind_values(&self) -> [Value; 3] {
        [
            Value::Integer(self.id),
            Value::Text(self.name.clone()),
            Value::Text(self.duration.clone()),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            duration: row.get("duration")?,
        })
    }
}

impl TableRecord for AlbumSong {
    const TABLE: &'static str = "albumsong";
    const COLUMNS: [&'static str; 3] = ["id", "album_id", "song_id"];
    const INSERT_OR_REPLACE_SQL: &'static str =
        "INSERT OR REPLACE INTO albumsong (id, album_id, song_id) VALUES (?1, ?2, ?3);";
    const SELECT_ALL_SQL: &'static str = "SELECT id, album_id, song_id FROM albumsong;";
    const SELECT_BY_ID_SQL: &'static str =
        "SELECT id, album_id, song_id FROM albumsong WHERE id = ?1;";
    const UPDATE_BY_ID_SQL: &'static str =
        "UPDATE albumsong SET album_id = ?2, song_id = ?3 WHERE id = ?1;";
    const DELETE_BY_ID_SQL: &'static str = "DELETE FROM albumsong WHERE id = ?1;";

    fn id(&self) -> RowId {
        self.id
    }

    fn bind_values(&self) -> [Value; 3] {
        [
            Value::Integer(self.id),
            Value::Integer(self.album_id),
            Value::Integer(self.song_id),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            album_id: row.get("album_id")?,
            song_id: row.get("song_id")?,
        })
    }
}
