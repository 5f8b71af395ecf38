//! Test fixture creation for the database
//!
//! Seeds the catalog through the store and the users through the
//! `UserManager`, so that seeded users can log in with real hashes.

use super::constants::*;
use anyhow::Result;
use riffrate_server::store::{CatalogStore, NewAlbum, NewArtist, SqliteRiffStore, Track};
use riffrate_server::user::UserManager;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

fn artist(id: &str, name: &str) -> NewArtist {
    NewArtist {
        id: Some(id.to_string()),
        name: name.to_string(),
        image_url: None,
        bio: None,
    }
}

fn album(id: &str, name: &str, artist_id: &str, genres: &[&str], duration: u64) -> NewAlbum {
    NewAlbum {
        id: Some(id.to_string()),
        name: name.to_string(),
        artist_id: artist_id.to_string(),
        cover_url: None,
        release_year: Some(2000),
        duration,
        genres: genres.iter().map(|g| g.to_string()).collect(),
        tracks: vec![
            Track {
                position: 1,
                name: format!("{} opener", name),
                duration_sec: Some(180),
            },
            Track {
                position: 2,
                name: format!("{} closer", name),
                duration_sec: Some(240),
            },
        ],
    }
}

/// Creates the catalog: 3 artists, 6 albums.
pub fn seed_catalog(store: &SqliteRiffStore) -> Result<()> {
    store.insert_artist(&artist(ARTIST_1_ID, "The Test Band"))?;
    store.insert_artist(&artist(ARTIST_2_ID, "Jazz Ensemble"))?;
    store.insert_artist(&artist(ARTIST_3_ID, "Indie Collective"))?;

    store.insert_album(&album(
        ALBUM_1_ID,
        "First Album",
        ARTIST_1_ID,
        &["rock", "indie"],
        ALBUM_1_DURATION,
    ))?;
    store.insert_album(&album(ALBUM_2_ID, "Jazz Collection", ARTIST_2_ID, &["jazz"], 60))?;
    store.insert_album(&album(ALBUM_3_ID, "Second Album", ARTIST_1_ID, &["rock"], 30))?;
    store.insert_album(&album(ALBUM_4_ID, "Third Album", ARTIST_1_ID, &["indie"], 35))?;
    store.insert_album(&album(ALBUM_5_ID, "Collective One", ARTIST_3_ID, &["rock"], 40))?;
    store.insert_album(&album(ALBUM_6_ID, "Collective Two", ARTIST_3_ID, &["indie"], 0))?;
    Ok(())
}

/// Registers every seeded user with `TEST_PASS`.
pub fn seed_users(store: Arc<SqliteRiffStore>) -> Result<()> {
    let user_manager = UserManager::new(store);
    for handle in [TEST_USER, FRIEND_1, FRIEND_2, LONER] {
        user_manager.register(handle, TEST_PASS, None)?;
    }
    Ok(())
}

/// Creates a temporary database directory with a seeded store.
/// Returns (temp_dir, db_path, store)
pub fn create_test_db() -> Result<(TempDir, PathBuf, Arc<SqliteRiffStore>)> {
    let dir = TempDir::new()?;
    let db_path = dir.path().join("riffrate.db");
    let store = Arc::new(SqliteRiffStore::new(&db_path)?);
    seed_catalog(&store)?;
    seed_users(store.clone())?;
    Ok((dir, db_path, store))
}
