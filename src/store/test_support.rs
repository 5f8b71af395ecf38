//! Seeding helpers for unit tests of the managers.

use super::*;
use std::sync::Arc;

pub fn new_store() -> Arc<SqliteRiffStore> {
    Arc::new(SqliteRiffStore::in_memory().unwrap())
}

pub fn add_user(store: &SqliteRiffStore, handle: &str) -> String {
    store
        .create_user(&NewUser {
            handle: handle.to_string(),
            display_name: Some(handle.to_string()),
            salt: "salt".to_string(),
            hash: "hash".to_string(),
            hasher: "argon2".to_string(),
        })
        .unwrap()
        .unwrap()
        .id
}

pub fn add_artist(store: &SqliteRiffStore, id: &str) {
    store
        .insert_artist(&NewArtist {
            id: Some(id.to_string()),
            name: format!("Artist {}", id),
            ..Default::default()
        })
        .unwrap();
}

pub fn add_album(store: &SqliteRiffStore, id: &str, artist_id: &str, genres: &[&str], duration: u64) {
    store
        .insert_album(&NewAlbum {
            id: Some(id.to_string()),
            name: format!("Album {}", id),
            artist_id: artist_id.to_string(),
            duration,
            genres: genres.iter().map(|g| g.to_string()).collect(),
            ..Default::default()
        })
        .unwrap();
}

/// Gives `album_id` a popularity of `reviews` by reviewing it that many times.
pub fn review_times(store: &SqliteRiffStore, user_id: &str, album_id: &str, reviews: usize) {
    for _ in 0..reviews {
        store
            .create_review(&NewReview {
                user_id: user_id.to_string(),
                album_id: album_id.to_string(),
                ..Default::default()
            })
            .unwrap();
    }
}
