//! Field/value payloads for insert and update requests.

use super::{ProviderError, ProviderResult};
use crate::model::album::Album;
use crate::model::album_song::AlbumSong;
use crate::model::song::Song;
use crate::model::RowId;
use rusqlite::types::Value;
use std::collections::BTreeMap;

/// Untyped column/value map submitted by provider callers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentValues {
    values: BTreeMap<String, Value>,
}

impl ContentValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style `put`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.put(key, value);
        self
    }

    pub fn put(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the first of `keys` that is absent, if any.
    pub fn first_missing<'k>(&self, keys: &[&'k str]) -> Option<&'k str> {
        keys.iter().copied().find(|key| !self.contains_key(key))
    }

    /// Reads `key` as an integer; numeric text and finite reals convert.
    pub fn get_integer(&self, key: &str) -> ProviderResult<RowId> {
        match self.get(key) {
            Some(Value::Integer(value)) => Ok(*value),
            Some(Value::Real(value)) if value.is_finite() => Ok(value.trunc() as RowId),
            Some(Value::Text(text)) => text
                .trim()
                .parse::<RowId>()
                .map_err(|_| invalid_value(key, "an integer")),
            Some(_) => Err(invalid_value(key, "an integer")),
            None => Err(missing_field(key)),
        }
    }

    /// Reads `key` as text; numbers are rendered in decimal.
    pub fn get_text(&self, key: &str) -> ProviderResult<String> {
        match self.get(key) {
            Some(Value::Text(text)) => Ok(text.clone()),
            Some(Value::Integer(value)) => Ok(value.to_string()),
            Some(Value::Real(value)) => Ok(value.to_string()),
            Some(_) => Err(invalid_value(key, "text")),
            None => Err(missing_field(key)),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ContentValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Self::new();
        for (key, value) in iter {
            values.put(key, value);
        }
        values
    }
}

/// Row types that can be assembled from a validated payload.
pub trait FromContentValues: Sized {
    fn from_content_values(values: &ContentValues) -> ProviderResult<Self>;
}

impl FromContentValues for Album {
    fn from_content_values(values: &ContentValues) -> ProviderResult<Self> {
        Ok(Self {
            id: values.get_integer("id")?,
            name: values.get_text("name")?,
            release: values.get_text("release")?,
        })
    }
}

impl FromContentValues for Song {
    fn from_content_values(values: &ContentValues) -> ProviderResult<Self> {
        Ok(Self {
            id: values.get_integer("id")?,
            name: values.get_text("name")?,
            duration: values.get_text("duration")?,
        })
    }
}

impl FromContentValues for AlbumSong {
    fn from_content_values(values: &ContentValues) -> ProviderResult<Self> {
        Ok(Self {
            id: values.get_integer("id")?,
            album_id: values.get_integer("album_id")?,
            song_id: values.get_integer("song_id")?,
        })
    }
}

fn missing_field(key: &str) -> ProviderError {
    ProviderError::InvalidArgument(format!("required field `{key}` is missing"))
}

fn invalid_value(key: &str, expected: &str) -> ProviderError {
    ProviderError::InvalidArgument(format!("field `{key}` must be {expected}"))
}

#[cfg(test)]
mod tests {
    use super::{ContentValues, FromContentValues};
    use crate::model::album::Album;
    use crate::provider::ProviderError;
    use rusqlite::types::Value;

    #[test]
    fn integer_fields_accept_numeric_text() {
        let values = ContentValues::new().with("id", " 42 ".to_string());
        assert_eq!(values.get_integer("id").unwrap(), 42);
    }

    #[test]
    fn integer_fields_reject_non_numeric_text_and_null() {
        let values = ContentValues::new()
            .with("id", "abc".to_string())
            .with("album_id", Value::Null);
        assert!(matches!(
            values.get_integer("id"),
            Err(ProviderError::InvalidArgument(_))
        ));
        assert!(matches!(
            values.get_integer("album_id"),
            Err(ProviderError::InvalidArgument(_))
        ));
    }

    #[test]
    fn text_fields_render_numbers() {
        let values = ContentValues::new().with("duration", 215_i64);
        assert_eq!(values.get_text("duration").unwrap(), "215");
    }

    #[test]
    fn first_missing_reports_in_key_order() {
        let values: ContentValues = [("id", Value::Integer(1)), ("name", Value::Integer(2))]
            .into_iter()
            .collect();
        assert_eq!(values.first_missing(&["id", "name", "release"]), Some("release"));
        assert_eq!(values.first_missing(&["id", "name"]), None);
    }

    #[test]
    fn album_is_built_from_complete_payload() {
        let values = ContentValues::new()
            .with("id", 3_i64)
            .with("name", "Blue".to_string())
            .with("release", "1971".to_string());
        let album = Album::from_content_values(&values).unwrap();
        assert_eq!(album, Album::new(3, "Blue", "1971"));
    }
}
