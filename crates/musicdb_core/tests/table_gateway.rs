use musicdb_core::db::open_db_in_memory;
use musicdb_core::{
    Album, AlbumSong, MusicRepository, RepoError, Song, SqliteMusicRepository, TableGateway,
};
use rusqlite::Connection;

#[test]
fn insert_one_then_get_by_id_returns_equal_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMusicRepository::try_new(&conn).unwrap();

    let song = Song::new(7, "So What", "9:22");
    repo.insert_one(&song).unwrap();

    let loaded: Option<Song> = repo.get_by_id(7).unwrap();
    assert_eq!(loaded, Some(song));
}

#[test]
fn get_by_id_for_missing_row_is_empty() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMusicRepository::try_new(&conn).unwrap();

    let loaded: Option<AlbumSong> = repo.get_by_id(42).unwrap();
    assert!(loaded.is_none());
}

#[test]
fn inserting_same_id_twice_replaces_whole_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMusicRepository::try_new(&conn).unwrap();

    repo.insert_one(&Album::new(5, "first", "2001")).unwrap();
    repo.insert_one(&Album::new(5, "second", "2002")).unwrap();

    let albums: Vec<Album> = repo.get_all().unwrap();
    assert_eq!(albums, vec![Album::new(5, "second", "2002")]);
}

#[test]
fn insert_many_replaces_colliding_rows_and_keeps_others() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMusicRepository::try_new(&conn).unwrap();

    repo.insert_one(&Song::new(1, "old", "1:00")).unwrap();
    repo.insert_many(&[
        Song::new(0, "zero", "0:30"),
        Song::new(1, "one", "1:30"),
        Song::new(2, "two", "2:30"),
    ])
    .unwrap();

    let songs: Vec<Song> = repo.get_all().unwrap();
    assert_eq!(songs.len(), 3);
    assert!(songs.contains(&Song::new(1, "one", "1:30")));
    assert!(!songs.iter().any(|song| song.name == "old"));
}

#[test]
fn insert_many_with_no_rows_is_a_no_op() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMusicRepository::try_new(&conn).unwrap();

    repo.insert_many(&Vec::<AlbumSong>::new()).unwrap();
    let links: Vec<AlbumSong> = repo.get_all().unwrap();
    assert!(links.is_empty());
}

#[test]
fn update_by_id_reports_affected_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMusicRepository::try_new(&conn).unwrap();

    repo.insert_one(&Album::new(1, "draft", "tbd")).unwrap();

    let changed = repo.update_by_id(&Album::new(1, "final", "2024")).unwrap();
    assert_eq!(changed, 1);
    let loaded: Option<Album> = repo.get_by_id(1).unwrap();
    assert_eq!(loaded, Some(Album::new(1, "final", "2024")));

    let missing = repo.update_by_id(&Album::new(99, "ghost", "never")).unwrap();
    assert_eq!(missing, 0);
    let ghost: Option<Album> = repo.get_by_id(99).unwrap();
    assert!(ghost.is_none());
}

#[test]
fn delete_by_id_removes_row_and_reports_count() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMusicRepository::try_new(&conn).unwrap();

    repo.insert_one(&AlbumSong::new(3, 1, 2)).unwrap();

    assert_eq!(TableGateway::<AlbumSong>::delete_by_id(&repo, 3).unwrap(), 1);
    let loaded: Option<AlbumSong> = repo.get_by_id(3).unwrap();
    assert!(loaded.is_none());
    assert_eq!(TableGateway::<AlbumSong>::delete_by_id(&repo, 3).unwrap(), 0);
}

#[test]
fn delete_row_uses_primary_key_only() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMusicRepository::try_new(&conn).unwrap();

    repo.insert_one(&Song::new(4, "stored", "3:00")).unwrap();

    let changed = repo.delete_row(&Song::new(4, "stale copy", "0:00")).unwrap();
    assert_eq!(changed, 1);
    let songs: Vec<Song> = repo.get_all().unwrap();
    assert!(songs.is_empty());
}

#[test]
fn tables_are_independent() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMusicRepository::try_new(&conn).unwrap();

    repo.insert_one(&Album::new(1, "album", "2020")).unwrap();
    repo.insert_one(&Song::new(1, "song", "1:00")).unwrap();

    assert_eq!(TableGateway::<Album>::delete_by_id(&repo, 1).unwrap(), 1);
    let song: Option<Song> = repo.get_by_id(1).unwrap();
    assert_eq!(song, Some(Song::new(1, "song", "1:00")));
}

#[test]
fn songs_for_album_follows_links() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMusicRepository::try_new(&conn).unwrap();

    repo.insert_many(&[
        Song::new(0, "song 0", "1:00"),
        Song::new(1, "song 1", "2:00"),
        Song::new(2, "song 2", "3:00"),
    ])
    .unwrap();
    repo.insert_many(&[
        AlbumSong::new(0, 0, 0),
        AlbumSong::new(1, 0, 1),
        AlbumSong::new(2, 1, 2),
    ])
    .unwrap();

    let mut ids: Vec<i64> = repo
        .songs_for_album(0)
        .unwrap()
        .into_iter()
        .map(|song| song.id)
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![0, 1]);

    let second = repo.songs_for_album(1).unwrap();
    assert_eq!(second, vec![Song::new(2, "song 2", "3:00")]);
    assert!(repo.songs_for_album(9).unwrap().is_empty());
}

#[test]
fn links_may_reference_missing_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMusicRepository::try_new(&conn).unwrap();

    repo.insert_one(&AlbumSong::new(0, 100, 200)).unwrap();

    let links: Vec<AlbumSong> = repo.get_all().unwrap();
    assert_eq!(links, vec![AlbumSong::new(0, 100, 200)]);
    assert!(repo.songs_for_album(100).unwrap().is_empty());
}

#[test]
fn storage_errors_propagate_as_db_errors() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMusicRepository::try_new(&conn).unwrap();
    conn.execute_batch("DROP TABLE song;").unwrap();

    let err = repo.insert_one(&Song::new(1, "lost", "0:01")).unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
}

#[test]
fn insert_many_rolls_back_on_failure() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMusicRepository::try_new(&conn).unwrap();
    reject_song_named(&conn, "bad");

    let err = repo
        .insert_many(&[Song::new(0, "good", "1:00"), Song::new(1, "bad", "1:00")])
        .unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));

    let songs: Vec<Song> = repo.get_all().unwrap();
    assert!(songs.is_empty());
}

fn reject_song_named(conn: &Connection, name: &str) {
    conn.execute_batch(&format!(
        "CREATE TRIGGER reject_song BEFORE INSERT ON song
         WHEN NEW.name = '{name}'
         BEGIN
            SELECT RAISE(ABORT, 'rejected');
         END;"
    ))
    .unwrap();
}
