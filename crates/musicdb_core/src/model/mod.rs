//! Row types for the album, song and album/song link tables.
//!
//! # Invariants
//! - Every row is identified by a caller-assigned integer `id`, unique per table.
//! - Link rows reference albums and songs by id only; nothing enforces that
//!   the referenced rows exist.

pub mod album;
pub mod album_song;
pub mod song;

/// Primary key shared by all three tables.
pub type RowId = i64;
