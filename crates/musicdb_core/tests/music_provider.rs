use musicdb_core::{
    Album, AlbumSong, ContentValues, MusicStore, ProviderConfig, ProviderError, ResultSet, Song,
};
use rusqlite::types::Value;

const AUTHORITY: &str = "com.example.musicdb.test";

fn store() -> MusicStore {
    MusicStore::open_in_memory().unwrap()
}

fn config() -> ProviderConfig {
    ProviderConfig::with_authority(AUTHORITY)
}

fn uri(path: &str) -> String {
    format!("content://{AUTHORITY}/{path}")
}

fn album_values(id: i64, name: &str, release: &str) -> ContentValues {
    ContentValues::new()
        .with("id", id)
        .with("name", name.to_string())
        .with("release", release.to_string())
}

#[test]
fn get_type_covers_every_table_and_shape() {
    let store = store();
    let provider = store.provider(config()).unwrap();

    assert_eq!(
        provider.get_type(&uri("album")).unwrap(),
        format!("vnd.musicdb.cursor.dir/{AUTHORITY}.album")
    );
    assert_eq!(
        provider.get_type(&uri("song/3")).unwrap(),
        format!("vnd.musicdb.cursor.item/{AUTHORITY}.song")
    );
    assert_eq!(
        provider.get_type(&uri("albumsong")).unwrap(),
        format!("vnd.musicdb.cursor.dir/{AUTHORITY}.albumsong")
    );
}

#[test]
fn unknown_table_is_unsupported() {
    let store = store();
    let provider = store.provider(config()).unwrap();

    assert!(matches!(
        provider.query(&uri("playlist")),
        Err(ProviderError::UnsupportedOperation(_))
    ));
    assert!(matches!(
        provider.get_type(&uri("playlist/1")),
        Err(ProviderError::UnsupportedOperation(_))
    ));
}

#[test]
fn foreign_authority_and_malformed_ids_are_unsupported() {
    let store = store();
    let provider = store.provider(config()).unwrap();

    assert!(matches!(
        provider.query("content://org.elsewhere/album"),
        Err(ProviderError::UnsupportedOperation(_))
    ));
    assert!(matches!(
        provider.query(&uri("album/first")),
        Err(ProviderError::UnsupportedOperation(_))
    ));
}

#[test]
fn insert_returns_item_uri_and_row_is_queryable() {
    let store = store();
    let provider = store.provider(config()).unwrap();

    let created = provider
        .insert(&uri("album"), &album_values(5, "Blue Train", "1958"))
        .unwrap();
    assert_eq!(created.to_string(), uri("album/5"));

    let rows = provider.query(&created.to_string()).unwrap();
    assert_eq!(rows, ResultSet::Albums(vec![Album::new(5, "Blue Train", "1958")]));
}

#[test]
fn insert_twice_with_same_id_keeps_second_payload() {
    let store = store();
    let provider = store.provider(config()).unwrap();

    provider
        .insert(&uri("album"), &album_values(5, "first", "2001"))
        .unwrap();
    provider
        .insert(&uri("album"), &album_values(5, "second", "2001"))
        .unwrap();

    let rows = provider.query(&uri("album")).unwrap();
    assert_eq!(rows, ResultSet::Albums(vec![Album::new(5, "second", "2001")]));
}

#[test]
fn insert_missing_release_is_rejected_without_writing() {
    let store = store();
    let provider = store.provider(config()).unwrap();

    let values = ContentValues::new()
        .with("id", 1_i64)
        .with("name", "no release".to_string());
    let err = provider.insert(&uri("album"), &values).unwrap_err();
    assert!(matches!(err, ProviderError::InvalidArgument(_)));
    assert!(err.to_string().contains("release"));

    assert!(provider.query(&uri("album")).unwrap().is_empty());
}

#[test]
fn presence_check_is_key_existence_only() {
    let store = store();
    let provider = store.provider(config()).unwrap();

    let values = ContentValues::new()
        .with("id", "8".to_string())
        .with("name", String::new())
        .with("duration", 185_i64);
    provider.insert(&uri("song"), &values).unwrap();

    let rows = provider.query(&uri("song/8")).unwrap();
    assert_eq!(rows, ResultSet::Songs(vec![Song::new(8, "", "185")]));
}

#[test]
fn unconvertible_values_are_invalid_arguments() {
    let store = store();
    let provider = store.provider(config()).unwrap();

    let values = ContentValues::new()
        .with("id", 1_i64)
        .with("album_id", Value::Null)
        .with("song_id", 2_i64);
    assert!(matches!(
        provider.insert(&uri("albumsong"), &values),
        Err(ProviderError::InvalidArgument(_))
    ));
}

#[test]
fn insert_on_item_uri_or_unknown_table_is_invalid_argument() {
    let store = store();
    let provider = store.provider(config()).unwrap();
    let values = album_values(1, "a", "b");

    assert!(matches!(
        provider.insert(&uri("album/1"), &values),
        Err(ProviderError::InvalidArgument(_))
    ));
    assert!(matches!(
        provider.insert(&uri("playlist"), &values),
        Err(ProviderError::InvalidArgument(_))
    ));
}

#[test]
fn bulk_insert_accepts_at_most_one_row() {
    let store = store();
    let provider = store.provider(config()).unwrap();

    let err = provider
        .bulk_insert(
            &uri("album"),
            &[album_values(1, "a", "x"), album_values(2, "b", "y")],
        )
        .unwrap_err();
    assert!(matches!(err, ProviderError::InvalidArgument(_)));
    assert!(provider.query(&uri("album")).unwrap().is_empty());

    assert_eq!(
        provider
            .bulk_insert(&uri("album"), &[album_values(1, "a", "x")])
            .unwrap(),
        1
    );
    assert_eq!(provider.bulk_insert(&uri("album"), &[]).unwrap(), 0);
    assert_eq!(provider.query(&uri("album")).unwrap().len(), 1);
}

#[test]
fn update_item_overwrites_row_and_reports_count() {
    let store = store();
    let provider = store.provider(config()).unwrap();
    provider
        .insert(&uri("album"), &album_values(2, "draft", "tbd"))
        .unwrap();

    let changed = provider
        .update(&uri("album/2"), &album_values(2, "final", "2024"))
        .unwrap();
    assert_eq!(changed, 1);
    assert_eq!(
        provider.query(&uri("album/2")).unwrap(),
        ResultSet::Albums(vec![Album::new(2, "final", "2024")])
    );

    let missing = provider
        .update(&uri("album/3"), &album_values(3, "ghost", "never"))
        .unwrap();
    assert_eq!(missing, 0);
}

#[test]
fn update_rejects_collection_target_and_missing_fields() {
    let store = store();
    let provider = store.provider(config()).unwrap();

    assert!(matches!(
        provider.update(&uri("album"), &album_values(1, "a", "b")),
        Err(ProviderError::InvalidArgument(_))
    ));
    assert!(matches!(
        provider.update(
            &uri("song/1"),
            &ContentValues::new().with("id", 1_i64).with("name", "x".to_string())
        ),
        Err(ProviderError::InvalidArgument(_))
    ));
}

#[test]
fn update_targets_the_payload_id() {
    let store = store();
    let provider = store.provider(config()).unwrap();
    provider
        .insert(&uri("album"), &album_values(1, "one", "2001"))
        .unwrap();
    provider
        .insert(&uri("album"), &album_values(2, "two", "2002"))
        .unwrap();

    let changed = provider
        .update(&uri("album/1"), &album_values(2, "renamed", "2020"))
        .unwrap();
    assert_eq!(changed, 1);
    assert_eq!(
        provider.query(&uri("album/2")).unwrap(),
        ResultSet::Albums(vec![Album::new(2, "renamed", "2020")])
    );
    assert_eq!(
        provider.query(&uri("album/1")).unwrap(),
        ResultSet::Albums(vec![Album::new(1, "one", "2001")])
    );
}

#[test]
fn delete_item_reports_count_and_empties_query() {
    let store = store();
    let provider = store.provider(config()).unwrap();
    let link = ContentValues::new()
        .with("id", 0_i64)
        .with("album_id", 0_i64)
        .with("song_id", 1_i64);
    provider.insert(&uri("albumsong"), &link).unwrap();
    assert_eq!(
        provider.query(&uri("albumsong/0")).unwrap(),
        ResultSet::AlbumSongs(vec![AlbumSong::new(0, 0, 1)])
    );

    assert_eq!(provider.delete(&uri("albumsong/0")).unwrap(), 1);
    assert!(provider.query(&uri("albumsong/0")).unwrap().is_empty());
    assert_eq!(provider.delete(&uri("albumsong/0")).unwrap(), 0);
}

#[test]
fn delete_on_collection_is_invalid_argument() {
    let store = store();
    let provider = store.provider(config()).unwrap();

    assert!(matches!(
        provider.delete(&uri("song")),
        Err(ProviderError::InvalidArgument(_))
    ));
}

#[test]
fn bare_identifiers_without_scheme_are_accepted() {
    let store = store();
    let provider = store.provider(config()).unwrap();

    let created = provider
        .insert(&format!("{AUTHORITY}/album"), &album_values(9, "bare", "2000"))
        .unwrap();
    assert_eq!(created.to_string(), uri("album/9"));
    assert_eq!(provider.query(&format!("{AUTHORITY}/album/9")).unwrap().len(), 1);
}

#[test]
fn storage_failures_surface_as_repo_errors() {
    let store = store();
    let provider = store.provider(config()).unwrap();
    store
        .connection()
        .execute_batch("DROP TABLE albumsong;")
        .unwrap();

    assert!(matches!(
        provider.query(&uri("albumsong")),
        Err(ProviderError::Repo(_))
    ));
}
