//! Catalog seeding and snapshot use-cases.
//!
//! # Invariants
//! - Each table is written by its own bulk insert; no transaction spans tables.
//! - Seeding is repeatable: ids are fixed, so a second run replaces rows.

use crate::model::album::Album;
use crate::model::album_song::AlbumSong;
use crate::model::song::Song;
use crate::model::RowId;
use crate::repo::music_repo::{MusicRepository, RepoResult, TableGateway};
use log::info;
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

const DEMO_ROW_COUNT: RowId = 3;
const DEMO_LINKS: [(RowId, RowId, RowId); 3] = [(0, 0, 0), (1, 0, 1), (2, 1, 2)];

/// Full contents of the three tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogSnapshot {
    pub albums: Vec<Album>,
    pub songs: Vec<Song>,
    pub album_songs: Vec<AlbumSong>,
}

/// Demo rows written by `MusicService::seed_demo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoCatalog {
    pub albums: Vec<Album>,
    pub songs: Vec<Song>,
    pub album_songs: Vec<AlbumSong>,
}

impl DemoCatalog {
    /// Builds three albums, three songs, and links album 0 to songs 0 and 1
    /// and album 1 to song 2. `stamp` is embedded in release/duration labels.
    pub fn with_stamp(stamp: u128) -> Self {
        let albums = (0..DEMO_ROW_COUNT)
            .map(|id| Album::new(id, format!("album {id}"), format!("release {stamp}")))
            .collect();
        let songs = (0..DEMO_ROW_COUNT)
            .map(|id| Song::new(id, format!("song {id}"), format!("duration {stamp}")))
            .collect();
        let album_songs = DEMO_LINKS
            .iter()
            .map(|&(id, album_id, song_id)| AlbumSong::new(id, album_id, song_id))
            .collect();

        Self {
            albums,
            songs,
            album_songs,
        }
    }
}

/// Use-case service wrapper for catalog flows.
pub struct MusicService<R: MusicRepository> {
    repo: R,
}

impl<R: MusicRepository> MusicService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Writes the demo catalog stamped with the current epoch milliseconds.
    pub fn seed_demo(&self) -> RepoResult<DemoCatalog> {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or_default();
        let catalog = DemoCatalog::with_stamp(stamp);
        self.write_catalog(&catalog)?;
        Ok(catalog)
    }

    /// Bulk-inserts every table of `catalog`.
    pub fn write_catalog(&self, catalog: &DemoCatalog) -> RepoResult<()> {
        TableGateway::<Album>::insert_many(&self.repo, &catalog.albums)?;
        TableGateway::<Song>::insert_many(&self.repo, &catalog.songs)?;
        TableGateway::<AlbumSong>::insert_many(&self.repo, &catalog.album_songs)?;
        info!(
            "event=catalog_seed module=service status=ok albums={} songs={} links={}",
            catalog.albums.len(),
            catalog.songs.len(),
            catalog.album_songs.len()
        );
        Ok(())
    }

    /// Reads all three tables.
    pub fn snapshot(&self) -> RepoResult<CatalogSnapshot> {
        Ok(CatalogSnapshot {
            albums: TableGateway::<Album>::get_all(&self.repo)?,
            songs: TableGateway::<Song>::get_all(&self.repo)?,
            album_songs: TableGateway::<AlbumSong>::get_all(&self.repo)?,
        })
    }

    pub fn songs_for_album(&self, album_id: RowId) -> RepoResult<Vec<Song>> {
        self.repo.songs_for_album(album_id)
    }
}
