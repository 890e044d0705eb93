//! Resource identifier parsing and route matching.
//!
//! Accepted shapes are `[content://]{authority}/{table}` and
//! `[content://]{authority}/{table}/{id}`. Anything else is no match.

use crate::model::album::Album;
use crate::model::album_song::AlbumSong;
use crate::model::song::Song;
use crate::model::RowId;
use crate::repo::table::TableRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{Display, Formatter};

pub const CONTENT_SCHEME: &str = "content://";

static RESOURCE_URI_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:content://)?([^/\s]+)/([^/\s]+)(?:/([^/\s]+))?/?$")
        .expect("valid resource uri regex")
});

/// Tables reachable through the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Album,
    Song,
    AlbumSong,
}

impl Table {
    pub const ALL: [Table; 3] = [Table::Album, Table::Song, Table::AlbumSong];

    /// Path segment, identical to the SQLite table name.
    pub fn path(self) -> &'static str {
        match self {
            Self::Album => Album::TABLE,
            Self::Song => Song::TABLE,
            Self::AlbumSong => AlbumSong::TABLE,
        }
    }

    /// Keys an insert/update payload must carry.
    pub fn required_fields(self) -> [&'static str; 3] {
        match self {
            Self::Album => Album::COLUMNS,
            Self::Song => Song::COLUMNS,
            Self::AlbumSong => AlbumSong::COLUMNS,
        }
    }

    pub fn from_path(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|table| table.path() == segment)
    }
}

/// Matched resource pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Collection(Table),
    Item(Table, RowId),
}

impl Route {
    pub fn table(self) -> Table {
        match self {
            Self::Collection(table) | Self::Item(table, _) => table,
        }
    }
}

/// Parsed `{authority}/{table}[/{id}]` identifier.
///
/// The id segment is kept as text; only `match_route` decides whether it is a
/// valid row id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceUri {
    authority: String,
    table: String,
    id: Option<String>,
}

impl ResourceUri {
    /// Parses an identifier; returns `None` when it has no recognizable shape.
    pub fn parse(value: &str) -> Option<Self> {
        let captures = RESOURCE_URI_RE.captures(value.trim())?;
        Some(Self {
            authority: captures[1].to_string(),
            table: captures[2].to_string(),
            id: captures.get(3).map(|id| id.as_str().to_string()),
        })
    }

    /// Builds the collection identifier for `table`.
    pub fn collection(authority: &str, table: Table) -> Self {
        Self {
            authority: authority.to_string(),
            table: table.path().to_string(),
            id: None,
        }
    }

    /// Builds the single-item identifier for `table` and `id`.
    pub fn item(authority: &str, table: Table, id: RowId) -> Self {
        Self {
            authority: authority.to_string(),
            table: table.path().to_string(),
            id: Some(id.to_string()),
        }
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Matches against the fixed pattern table for `authority`.
    pub fn match_route(&self, authority: &str) -> Option<Route> {
        if self.authority != authority {
            return None;
        }
        let table = Table::from_path(&self.table)?;
        match self.id.as_deref() {
            None => Some(Route::Collection(table)),
            Some(id) => id.parse::<RowId>().ok().map(|id| Route::Item(table, id)),
        }
    }
}

impl Display for ResourceUri {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{CONTENT_SCHEME}{}/{}", self.authority, self.table)?;
        if let Some(id) = &self.id {
            write!(f, "/{id}")?;
        }
        Ok(())
    }
}
