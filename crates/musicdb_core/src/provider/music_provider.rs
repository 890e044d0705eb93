//! Request router from resource identifiers to table gateway calls.

use super::config::ProviderConfig;
use super::uri::{ResourceUri, Route, Table};
use super::values::{ContentValues, FromContentValues};
use super::{ProviderError, ProviderResult};
use crate::model::album::Album;
use crate::model::album_song::AlbumSong;
use crate::model::song::Song;
use crate::model::RowId;
use crate::repo::music_repo::{MusicRepository, TableGateway};
use crate::repo::table::TableRecord;
use log::{debug, warn};
use serde::Serialize;

/// Rows returned by `MusicProvider::query`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "table", content = "rows", rename_all = "snake_case")]
pub enum ResultSet {
    Albums(Vec<Album>),
    Songs(Vec<Song>),
    AlbumSongs(Vec<AlbumSong>),
}

impl ResultSet {
    pub fn len(&self) -> usize {
        match self {
            Self::Albums(rows) => rows.len(),
            Self::Songs(rows) => rows.len(),
            Self::AlbumSongs(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Stateless URI dispatcher over a music repository.
pub struct MusicProvider<R: MusicRepository> {
    repo: R,
    config: ProviderConfig,
}

impl<R: MusicRepository> MusicProvider<R> {
    pub fn new(repo: R, config: ProviderConfig) -> Self {
        Self { repo, config }
    }

    /// Returns the type identifier for a collection or item identifier.
    ///
    /// # Errors
    /// - `UnsupportedOperation` when `uri` matches no pattern.
    pub fn get_type(&self, uri: &str) -> ProviderResult<String> {
        let result = self
            .read_route(uri)
            .map(|route| self.config.content_type(route));
        log_outcome("get_type", uri, &result);
        result
    }

    /// Lists a table (collection identifier) or fetches one row (item identifier).
    ///
    /// A missing row yields an empty result set.
    pub fn query(&self, uri: &str) -> ProviderResult<ResultSet> {
        let result = self.read_route(uri).and_then(|route| self.query_route(route));
        log_outcome("query", uri, &result);
        result
    }

    /// Inserts (or replaces) one row through a collection identifier.
    ///
    /// Returns the item identifier of the written row.
    pub fn insert(&self, uri: &str, values: &ContentValues) -> ProviderResult<ResourceUri> {
        let result = self.insert_inner(uri, values);
        log_outcome("insert", uri, &result);
        result
    }

    /// Bulk entry point; only single-row payloads are accepted.
    ///
    /// Returns the number of rows written.
    pub fn bulk_insert(&self, uri: &str, rows: &[ContentValues]) -> ProviderResult<usize> {
        let result = match rows {
            [] => Ok(0),
            [single] => self.insert_inner(uri, single).map(|_| 1),
            _ => Err(ProviderError::InvalidArgument(format!(
                "cannot add multiple items ({}) in one request",
                rows.len()
            ))),
        };
        log_outcome("bulk_insert", uri, &result);
        result
    }

    /// Overwrites the row named by the payload `id`; returns affected rows.
    ///
    /// The identifier must be an item identifier, but its id segment does not
    /// select the row.
    pub fn update(&self, uri: &str, values: &ContentValues) -> ProviderResult<usize> {
        let result = self.update_inner(uri, values);
        log_outcome("update", uri, &result);
        result
    }

    /// Deletes one row through an item identifier; returns affected rows.
    pub fn delete(&self, uri: &str) -> ProviderResult<usize> {
        let result = self.mutation_route("delete", uri).and_then(|route| match route {
            Route::Item(table, id) => self.delete_in(table, id),
            Route::Collection(_) => Err(unsupported_target("delete", uri)),
        });
        log_outcome("delete", uri, &result);
        result
    }

    fn insert_inner(&self, uri: &str, values: &ContentValues) -> ProviderResult<ResourceUri> {
        let table = match self.mutation_route("insert", uri)? {
            Route::Collection(table) => table,
            Route::Item(..) => return Err(unsupported_target("insert", uri)),
        };
        require_fields(table, values)?;

        let id = match table {
            Table::Album => self.insert_row::<Album>(values)?,
            Table::Song => self.insert_row::<Song>(values)?,
            Table::AlbumSong => self.insert_row::<AlbumSong>(values)?,
        };
        Ok(ResourceUri::item(&self.config.authority, table, id))
    }

    fn update_inner(&self, uri: &str, values: &ContentValues) -> ProviderResult<usize> {
        let table = match self.mutation_route("update", uri)? {
            Route::Item(table, _) => table,
            Route::Collection(_) => return Err(unsupported_target("update", uri)),
        };
        require_fields(table, values)?;

        match table {
            Table::Album => self.update_row::<Album>(values),
            Table::Song => self.update_row::<Song>(values),
            Table::AlbumSong => self.update_row::<AlbumSong>(values),
        }
    }

    fn query_route(&self, route: Route) -> ProviderResult<ResultSet> {
        let result = match route {
            Route::Collection(Table::Album) => ResultSet::Albums(self.list::<Album>()?),
            Route::Collection(Table::Song) => ResultSet::Songs(self.list::<Song>()?),
            Route::Collection(Table::AlbumSong) => {
                ResultSet::AlbumSongs(self.list::<AlbumSong>()?)
            }
            Route::Item(Table::Album, id) => ResultSet::Albums(self.find::<Album>(id)?),
            Route::Item(Table::Song, id) => ResultSet::Songs(self.find::<Song>(id)?),
            Route::Item(Table::AlbumSong, id) => {
                ResultSet::AlbumSongs(self.find::<AlbumSong>(id)?)
            }
        };
        Ok(result)
    }

    fn delete_in(&self, table: Table, id: RowId) -> ProviderResult<usize> {
        let changed = match table {
            Table::Album => TableGateway::<Album>::delete_by_id(&self.repo, id)?,
            Table::Song => TableGateway::<Song>::delete_by_id(&self.repo, id)?,
            Table::AlbumSong => TableGateway::<AlbumSong>::delete_by_id(&self.repo, id)?,
        };
        Ok(changed)
    }

    fn list<T>(&self) -> ProviderResult<Vec<T>>
    where
        R: TableGateway<T>,
    {
        Ok(TableGateway::<T>::get_all(&self.repo)?)
    }

    fn find<T>(&self, id: RowId) -> ProviderResult<Vec<T>>
    where
        R: TableGateway<T>,
    {
        Ok(TableGateway::<T>::get_by_id(&self.repo, id)?
            .into_iter()
            .collect())
    }

    fn insert_row<T>(&self, values: &ContentValues) -> ProviderResult<RowId>
    where
        T: TableRecord + FromContentValues,
        R: TableGateway<T>,
    {
        let row = T::from_content_values(values)?;
        TableGateway::<T>::insert_one(&self.repo, &row)?;
        Ok(row.id())
    }

    fn update_row<T>(&self, values: &ContentValues) -> ProviderResult<usize>
    where
        T: FromContentValues,
        R: TableGateway<T>,
    {
        let row = T::from_content_values(values)?;
        Ok(TableGateway::<T>::update_by_id(&self.repo, &row)?)
    }

    fn read_route(&self, uri: &str) -> ProviderResult<Route> {
        self.match_uri(uri).ok_or_else(|| {
            ProviderError::UnsupportedOperation(format!("unknown resource `{uri}`"))
        })
    }

    fn mutation_route(&self, operation: &str, uri: &str) -> ProviderResult<Route> {
        self.match_uri(uri)
            .ok_or_else(|| unsupported_target(operation, uri))
    }

    fn match_uri(&self, uri: &str) -> Option<Route> {
        ResourceUri::parse(uri)?.match_route(&self.config.authority)
    }
}

fn require_fields(table: Table, values: &ContentValues) -> ProviderResult<()> {
    match values.first_missing(&table.required_fields()) {
        Some(field) => Err(ProviderError::InvalidArgument(format!(
            "required field `{field}` is missing for table `{}`",
            table.path()
        ))),
        None => Ok(()),
    }
}

fn unsupported_target(operation: &str, uri: &str) -> ProviderError {
    ProviderError::InvalidArgument(format!("{operation} is not supported for `{uri}`"))
}

fn log_outcome<T>(operation: &str, uri: &str, result: &ProviderResult<T>) {
    match result {
        Ok(_) => debug!(
            "event=provider_{} module=provider status=ok uri={}",
            operation, uri
        ),
        Err(err) => warn!(
            "event=provider_{} module=provider status=error error_code={} uri={} error={}",
            operation,
            err.error_code(),
            uri,
            err
        ),
    }
}
