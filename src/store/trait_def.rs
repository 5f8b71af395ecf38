//! Storage traits consumed by the managers.
//!
//! Methods return `Ok(None)`/`Ok(false)` for missing rows and `Err` only for
//! datastore faults, so callers decide which absences are user errors.

use super::models::*;
use anyhow::Result;

pub trait UserStore: Send + Sync {
    /// Creates a user together with its password credentials. Returns None
    /// if the handle is already taken.
    fn create_user(&self, new_user: &NewUser) -> Result<Option<User>>;

    fn get_user(&self, user_id: &str) -> Result<Option<User>>;

    fn get_user_id_by_handle(&self, handle: &str) -> Result<Option<String>>;

    fn get_password_credentials(&self, handle: &str) -> Result<Option<PasswordCredentials>>;

    /// Applies the non-empty fields of `update`. Returns false if the user
    /// does not exist.
    fn update_user_profile(&self, user_id: &str, update: &ProfileUpdate) -> Result<bool>;

    /// Returns the summaries of the given users, in the given order, skipping
    /// unknown ids.
    fn get_user_summaries(&self, user_ids: &[String]) -> Result<Vec<UserSummary>>;

    fn get_user_counts(&self, user_id: &str) -> Result<UserCounts>;

    /// Ids followed by `user_id`, oldest edge first.
    fn get_friend_ids(&self, user_id: &str) -> Result<Vec<String>>;

    /// Ids of the users following `user_id`.
    fn get_follower_ids(&self, user_id: &str) -> Result<Vec<String>>;

    /// Inserts the edge `user_id -> friend_id`. Returns false if it existed.
    fn add_friend_edge(&self, user_id: &str, friend_id: &str) -> Result<bool>;

    /// Removes the edge `user_id -> friend_id`. Returns false if it was absent.
    fn remove_friend_edge(&self, user_id: &str, friend_id: &str) -> Result<bool>;

    fn is_friend(&self, user_id: &str, friend_id: &str) -> Result<bool>;

    /// Favorite album ids in display order.
    fn get_favorite_album_ids(&self, user_id: &str) -> Result<Vec<String>>;

    /// Appends `album_id` to the favorites unless present or `cap` is reached.
    fn add_favorite_album(&self, user_id: &str, album_id: &str, cap: usize)
        -> Result<FavoriteChange>;

    /// Removes `album_id` from the favorites and compacts the positions.
    fn remove_favorite_album(&self, user_id: &str, album_id: &str) -> Result<bool>;

    fn get_listen_list(&self, user_id: &str) -> Result<Vec<String>>;

    /// Queues `album_id` unless the user already reviewed it.
    fn add_to_listen_list(&self, user_id: &str, album_id: &str) -> Result<ListenListChange>;

    fn remove_from_listen_list(&self, user_id: &str, album_id: &str) -> Result<bool>;

    fn get_liked_album_ids(&self, user_id: &str) -> Result<Vec<String>>;

    fn set_album_liked(&self, user_id: &str, album_id: &str, liked: bool) -> Result<()>;
}

pub trait CatalogStore: Send + Sync {
    fn insert_artist(&self, artist: &NewArtist) -> Result<Artist>;

    fn insert_album(&self, album: &NewAlbum) -> Result<Album>;

    fn get_artist(&self, artist_id: &str) -> Result<Option<Artist>>;

    fn get_album(&self, album_id: &str) -> Result<Option<Album>>;

    /// Returns the albums in the order of `album_ids`, skipping unknown ids.
    fn get_albums(&self, album_ids: &[String]) -> Result<Vec<Album>>;

    fn get_artist_albums(&self, artist_id: &str) -> Result<Vec<Album>>;

    fn list_albums(&self, sort: AlbumSort, limit: usize, offset: usize) -> Result<Vec<Album>>;

    /// Albums sharing a genre with `query.genres`, popularity descending with
    /// album id ascending as tie-break.
    fn find_albums_sharing_genres(&self, query: &GenreQuery) -> Result<Vec<Album>>;

    /// Artists ranked by the summed popularity of their albums.
    fn list_artists_by_popularity(&self, limit: usize) -> Result<Vec<RankedArtist>>;

    fn get_artist_stats(&self, artist_id: &str) -> Result<Option<ArtistStats>>;

    fn get_catalog_counts(&self) -> Result<CatalogCounts>;
}

pub trait ReviewStore: Send + Sync {
    /// Persists the review and every denormalized value it affects in a
    /// single transaction: album aggregates, the author's listened minutes and
    /// the author's listen list.
    fn create_review(&self, new_review: &NewReview) -> Result<CreatedReview>;

    fn get_review(&self, review_id: &str) -> Result<Option<Review>>;

    fn get_album_reviews(
        &self,
        album_id: &str,
        sort: ReviewSort,
        limit: usize,
    ) -> Result<Vec<Review>>;

    fn get_user_reviews(&self, user_id: &str, limit: usize) -> Result<Vec<Review>>;

    /// Most recent reviews written by any of `user_ids`.
    fn get_reviews_by_users(&self, user_ids: &[String], limit: usize) -> Result<Vec<Review>>;

    fn get_latest_user_review(&self, user_id: &str, album_id: &str) -> Result<Option<Review>>;

    /// Returns None if the review does not exist.
    fn add_review_like(&self, review_id: &str, user_id: &str) -> Result<Option<LikeChange>>;

    /// Returns None if the review does not exist.
    fn remove_review_like(&self, review_id: &str, user_id: &str) -> Result<Option<LikeChange>>;

    /// Re-derives the album aggregates from its reviews. Returns None if the
    /// album does not exist.
    fn recompute_album_aggregate(&self, album_id: &str) -> Result<Option<AlbumAggregate>>;
}

pub trait ListStore: Send + Sync {
    fn create_list(&self, new_list: &NewUserList) -> Result<UserList>;

    fn get_list(&self, list_id: &str) -> Result<Option<UserList>>;

    fn get_user_lists(&self, user_id: &str, include_private: bool) -> Result<Vec<UserList>>;

    fn get_public_lists(&self, limit: usize) -> Result<Vec<UserList>>;

    /// Returns false if the album was already in the list.
    fn add_album_to_list(&self, list_id: &str, album_id: &str) -> Result<bool>;

    fn remove_album_from_list(&self, list_id: &str, album_id: &str) -> Result<bool>;

    fn delete_list(&self, list_id: &str) -> Result<bool>;
}

/// The whole datastore as seen by the server.
pub trait RiffStore: UserStore + CatalogStore + ReviewStore + ListStore {}

impl<T: UserStore + CatalogStore + ReviewStore + ListStore> RiffStore for T {}
