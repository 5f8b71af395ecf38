mod catalog;
mod lists;
mod reviews;
mod users;

use super::models::{Album, Review, Track, UserList};
use super::schema::VERSIONED_SCHEMAS;
use crate::sqlite_persistence::open_versioned;
use anyhow::{anyhow, Context, Result};
use rusqlite::{params, types::Type, Connection, OptionalExtension, Params, Row};
use std::{
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};
use tracing::info;

/// Single-connection SQLite implementation of every store trait.
#[derive(Clone)]
pub struct SqliteRiffStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteRiffStore {
    pub fn new<T: AsRef<Path>>(db_path: T) -> Result<Self> {
        let db_path = db_path.as_ref();
        let conn = if db_path.exists() {
            Connection::open_with_flags(
                db_path,
                rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                    | rusqlite::OpenFlags::SQLITE_OPEN_URI
                    | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
            .with_context(|| format!("Failed to open database {:?}", db_path))?
        } else {
            info!("Creating new database at {:?}", db_path);
            let conn = Connection::open(db_path)?;
            Self::create_latest_schema(&conn)?;
            conn
        };
        Self::from_connection(conn)
    }

    /// A throwaway database, used by tests and tooling.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::create_latest_schema(&conn)?;
        Self::from_connection(conn)
    }

    fn create_latest_schema(conn: &Connection) -> Result<()> {
        VERSIONED_SCHEMAS
            .last()
            .context("No schema defined")?
            .create(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        // Foreign key enforcement is per connection, not per file.
        conn.execute("PRAGMA foreign_keys = ON;", params![])?;
        let version = open_versioned(&conn, VERSIONED_SCHEMAS)?;
        info!("Database ready at schema version {}", version);
        Ok(SqliteRiffStore {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("Database connection mutex is poisoned"))
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn exists<P: Params>(conn: &Connection, sql: &str, params: P) -> Result<bool> {
    Ok(conn
        .query_row(&format!("SELECT EXISTS({})", sql), params, |row| {
            row.get::<_, bool>(0)
        })?)
}

fn count<P: Params>(conn: &Connection, sql: &str, params: P) -> Result<u64> {
    Ok(conn.query_row(sql, params, |row| row.get::<_, i64>(0))? as u64)
}

fn string_column<P: Params>(conn: &Connection, sql: &str, params: P) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(sql)?;
    let values = stmt
        .query_map(params, |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<String>, _>>()?;
    Ok(values)
}

/// `?,?,?` with `n` placeholders starting at `?{first}`.
fn placeholders(first: usize, n: usize) -> String {
    (first..first + n)
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ")
}

const ALBUM_COLUMNS: &str = "id, name, artist_id, cover_url, release_year, duration, popularity, average_rating, total_ratings, created";

fn album_from_row(row: &Row) -> rusqlite::Result<Album> {
    Ok(Album {
        id: row.get(0)?,
        name: row.get(1)?,
        artist_id: row.get(2)?,
        cover_url: row.get(3)?,
        release_year: row.get(4)?,
        duration: row.get::<_, i64>(5)? as u64,
        genres: vec![],
        tracks: vec![],
        popularity: row.get::<_, i64>(6)? as u64,
        average_rating: row.get(7)?,
        total_ratings: row.get::<_, i64>(8)? as u64,
        created: row.get::<_, Option<i64>>(9)?.unwrap_or_default(),
    })
}

fn hydrate_album(conn: &Connection, album: &mut Album) -> Result<()> {
    album.genres = string_column(
        conn,
        "SELECT genre FROM album_genre WHERE album_id = ?1 ORDER BY rowid",
        params![album.id],
    )?;
    let mut stmt = conn.prepare(
        "SELECT position, name, duration_sec FROM album_track WHERE album_id = ?1 ORDER BY position",
    )?;
    album.tracks = stmt
        .query_map(params![album.id], |row| {
            Ok(Track {
                position: row.get(0)?,
                name: row.get(1)?,
                duration_sec: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<Track>, _>>()?;
    Ok(())
}

/// Runs an album query selecting `ALBUM_COLUMNS` and fills in genres and tracks.
fn load_albums<P: Params>(conn: &Connection, sql: &str, params: P) -> Result<Vec<Album>> {
    let mut stmt = conn.prepare(sql)?;
    let mut albums = stmt
        .query_map(params, album_from_row)?
        .collect::<Result<Vec<Album>, _>>()?;
    for album in albums.iter_mut() {
        hydrate_album(conn, album)?;
    }
    Ok(albums)
}

fn load_album(conn: &Connection, album_id: &str) -> Result<Option<Album>> {
    let album = conn
        .query_row(
            &format!("SELECT {} FROM album WHERE id = ?1", ALBUM_COLUMNS),
            params![album_id],
            album_from_row,
        )
        .optional()?;
    match album {
        Some(mut album) => {
            hydrate_album(conn, &mut album)?;
            Ok(Some(album))
        }
        None => Ok(None),
    }
}

const REVIEW_COLUMNS: &str =
    "id, user_id, album_id, rating, text, favorite_tracks, likes_count, created";

fn review_from_row(row: &Row) -> rusqlite::Result<Review> {
    let raw_tracks: String = row.get(5)?;
    let favorite_tracks = serde_json::from_str::<Vec<String>>(&raw_tracks)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(err)))?;
    Ok(Review {
        id: row.get(0)?,
        user_id: row.get(1)?,
        album_id: row.get(2)?,
        rating: row.get(3)?,
        text: row.get(4)?,
        favorite_tracks,
        likes: vec![],
        likes_count: row.get::<_, i64>(6)? as u64,
        created: row.get::<_, Option<i64>>(7)?.unwrap_or_default(),
    })
}

fn review_likes(conn: &Connection, review_id: &str) -> Result<Vec<String>> {
    string_column(
        conn,
        "SELECT user_id FROM review_like WHERE review_id = ?1 ORDER BY rowid",
        params![review_id],
    )
}

fn load_reviews<P: Params>(conn: &Connection, sql: &str, params: P) -> Result<Vec<Review>> {
    let mut stmt = conn.prepare(sql)?;
    let mut reviews = stmt
        .query_map(params, review_from_row)?
        .collect::<Result<Vec<Review>, _>>()?;
    for review in reviews.iter_mut() {
        review.likes = review_likes(conn, &review.id)?;
    }
    Ok(reviews)
}

fn load_review(conn: &Connection, review_id: &str) -> Result<Option<Review>> {
    Ok(load_reviews(
        conn,
        &format!("SELECT {} FROM review WHERE id = ?1", REVIEW_COLUMNS),
        params![review_id],
    )?
    .pop())
}

fn load_list(conn: &Connection, list_id: &str) -> Result<Option<UserList>> {
    let list = conn
        .query_row(
            "SELECT id, user_id, name, description, is_public, created FROM user_list WHERE id = ?1",
            params![list_id],
            list_from_row,
        )
        .optional()?;
    match list {
        Some(mut list) => {
            list.album_ids = list_album_ids(conn, &list.id)?;
            Ok(Some(list))
        }
        None => Ok(None),
    }
}

fn list_from_row(row: &Row) -> rusqlite::Result<UserList> {
    Ok(UserList {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        is_public: row.get(4)?,
        album_ids: vec![],
        created: row.get::<_, Option<i64>>(5)?.unwrap_or_default(),
    })
}

fn list_album_ids(conn: &Connection, list_id: &str) -> Result<Vec<String>> {
    string_column(
        conn,
        "SELECT album_id FROM user_list_album WHERE list_id = ?1 ORDER BY position",
        params![list_id],
    )
}
