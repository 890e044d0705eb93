//! Command-line front end for the music store.
//!
//! # Responsibility
//! - Seed and print the demo catalog through the table gateway.
//! - Drive the URI provider with `query|type|insert|update|delete`.

use clap::{Parser, Subcommand};
use musicdb_core::{
    default_log_level, init_logging, ContentValues, LogLevel, MusicService, MusicStore,
    ProviderConfig, RowId, DEFAULT_AUTHORITY,
};
use rusqlite::types::Value;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

type CliResult<T> = Result<T, Box<dyn Error>>;

#[derive(Debug, Parser)]
#[command(name = "musicdb", version, about = "Album/song store with a URI content provider")]
struct Cli {
    /// SQLite database file; created and migrated on first use.
    #[arg(long, default_value = "music_database.sqlite3")]
    db: PathBuf,

    /// Provider authority expected in resource identifiers.
    #[arg(long, default_value = DEFAULT_AUTHORITY)]
    authority: String,

    #[arg(long, default_value = default_log_level().as_str(), value_parser = parse_log_level)]
    log_level: LogLevel,

    /// Absolute directory for rolling log files; logging is off when unset.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Insert 3 albums, 3 songs and their links.
    Seed,
    /// Print every album, song and link.
    Show,
    /// Print the songs linked to an album.
    Songs { album_id: RowId },
    /// Print the type identifier of a resource.
    Type { uri: String },
    /// Print the rows behind a resource.
    Query { uri: String },
    /// Insert one row: `insert <uri> id=1 name=... release=...`.
    Insert {
        uri: String,
        #[arg(value_parser = parse_field)]
        fields: Vec<(String, Value)>,
    },
    /// Overwrite one row: `update <uri>/<id> id=<id> ...`.
    Update {
        uri: String,
        #[arg(value_parser = parse_field)]
        fields: Vec<(String, Value)>,
    },
    /// Delete one row by item identifier.
    Delete { uri: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_run module=cli status=error error={}", err);
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    if let Some(log_dir) = &cli.log_dir {
        init_logging(cli.log_level.as_str(), log_dir)?;
    }

    let store = MusicStore::open(&cli.db)?;
    execute(&store, &cli)?;
    store.close()?;
    Ok(())
}

fn execute(store: &MusicStore, cli: &Cli) -> CliResult<()> {
    let config = ProviderConfig::with_authority(cli.authority.clone());
    match &cli.command {
        Command::Seed => {
            let service = MusicService::new(store.repository()?);
            let catalog = service.seed_demo()?;
            println!(
                "seeded albums={} songs={} links={}",
                catalog.albums.len(),
                catalog.songs.len(),
                catalog.album_songs.len()
            );
        }
        Command::Show => {
            let service = MusicService::new(store.repository()?);
            let snapshot = service.snapshot()?;
            for album in &snapshot.albums {
                println!("{}", serde_json::to_string(album)?);
            }
            for song in &snapshot.songs {
                println!("{}", serde_json::to_string(song)?);
            }
            for link in &snapshot.album_songs {
                println!("{}", serde_json::to_string(link)?);
            }
        }
        Command::Songs { album_id } => {
            let service = MusicService::new(store.repository()?);
            for song in service.songs_for_album(*album_id)? {
                println!("{}", serde_json::to_string(&song)?);
            }
        }
        Command::Type { uri } => {
            println!("{}", store.provider(config)?.get_type(uri)?);
        }
        Command::Query { uri } => {
            let rows = store.provider(config)?.query(uri)?;
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        Command::Insert { uri, fields } => {
            let created = store.provider(config)?.insert(uri, &to_values(fields))?;
            println!("{created}");
        }
        Command::Update { uri, fields } => {
            let changed = store.provider(config)?.update(uri, &to_values(fields))?;
            println!("updated={changed}");
        }
        Command::Delete { uri } => {
            let changed = store.provider(config)?.delete(uri)?;
            println!("deleted={changed}");
        }
    }
    Ok(())
}

fn to_values(fields: &[(String, Value)]) -> ContentValues {
    fields.iter().cloned().collect()
}

fn parse_log_level(raw: &str) -> Result<LogLevel, String> {
    raw.parse::<LogLevel>().map_err(|err| err.to_string())
}

/// Parses `key=value`; integer-looking values are sent as integers.
fn parse_field(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty field name in `{raw}`"));
    }
    let value = match value.parse::<i64>() {
        Ok(number) => Value::Integer(number),
        Err(_) => Value::Text(value.to_string()),
    };
    Ok((key.to_string(), value))
}
