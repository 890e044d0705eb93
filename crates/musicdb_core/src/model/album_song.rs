//! Link rows between albums and songs.

use super::RowId;
use serde::{Deserialize, Serialize};

/// One row of the `albumsong` link table.
///
/// A song may appear on several albums and an album holds several songs;
/// each pairing is its own row with its own id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumSong {
    pub id: RowId,
    pub album_id: RowId,
    pub song_id: RowId,
}

impl AlbumSong {
    pub fn new(id: RowId, album_id: RowId, song_id: RowId) -> Self {
        Self {
            id,
            album_id,
            song_id,
        }
    }
}
