//! Documents persisted by the RiffRate store.
//!
//! Everything here serializes with camelCase keys, the shape the SPA expects.

use serde::{Deserialize, Serialize};

/// Upper bound on a user's favorite albums.
pub const MAX_FAVORITE_ALBUMS: usize = 4;

/// Inclusive bounds of a review rating.
pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 5.0;

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub handle: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub minutes_listened: u64,
    pub created: i64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub handle: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserCounts {
    pub friends: u64,
    pub followers: u64,
    pub reviews: u64,
    pub favorite_albums: u64,
    pub listen_list: u64,
    pub liked_albums: u64,
}

/// Hashed password material, never serialized back to clients.
#[derive(Debug, Clone)]
pub struct PasswordCredentials {
    pub user_id: String,
    pub salt: String,
    pub hash: String,
    pub hasher: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub handle: String,
    pub display_name: Option<String>,
    pub salt: String,
    pub hash: String,
    pub hasher: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
    pub bio: Option<String>,
    pub created: i64,
}

#[derive(Debug, Clone, Default)]
pub struct NewArtist {
    pub id: Option<String>,
    pub name: String,
    pub image_url: Option<String>,
    pub bio: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub position: u32,
    pub name: String,
    pub duration_sec: Option<u32>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: String,
    pub name: String,
    pub artist_id: String,
    pub cover_url: Option<String>,
    pub release_year: Option<i32>,
    /// Running time in minutes, credited to a reviewer as one listen.
    pub duration: u64,
    pub genres: Vec<String>,
    pub tracks: Vec<Track>,
    pub popularity: u64,
    pub average_rating: f64,
    pub total_ratings: u64,
    pub created: i64,
}

impl Album {
    pub fn aggregate(&self) -> AlbumAggregate {
        AlbumAggregate {
            popularity: self.popularity,
            average_rating: self.average_rating,
            total_ratings: self.total_ratings,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewAlbum {
    pub id: Option<String>,
    pub name: String,
    pub artist_id: String,
    pub cover_url: Option<String>,
    pub release_year: Option<i32>,
    pub duration: u64,
    pub genres: Vec<String>,
    pub tracks: Vec<Track>,
}

/// Denormalized review statistics kept on each album.
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AlbumAggregate {
    pub popularity: u64,
    pub average_rating: f64,
    pub total_ratings: u64,
}

impl AlbumAggregate {
    /// Folds one new review into the aggregate: popularity always grows, the
    /// mean is updated incrementally only when the review carries a rating.
    pub fn with_review(self, rating: Option<f64>) -> Self {
        let popularity = self.popularity + 1;
        match rating {
            Some(rating) => {
                let count = self.total_ratings as f64;
                AlbumAggregate {
                    popularity,
                    average_rating: (self.average_rating * count + rating) / (count + 1.0),
                    total_ratings: self.total_ratings + 1,
                }
            }
            None => AlbumAggregate { popularity, ..self },
        }
    }

    /// Re-derives the aggregate from the full set of an album's reviews.
    pub fn from_reviews(review_count: u64, ratings: &[f64]) -> Self {
        let average_rating = if ratings.is_empty() {
            0.0
        } else {
            ratings.iter().sum::<f64>() / ratings.len() as f64
        };
        AlbumAggregate {
            popularity: review_count,
            average_rating,
            total_ratings: ratings.len() as u64,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub user_id: String,
    pub album_id: String,
    pub rating: Option<f64>,
    pub text: Option<String>,
    pub favorite_tracks: Vec<String>,
    pub likes: Vec<String>,
    pub likes_count: u64,
    pub created: i64,
}

#[derive(Debug, Clone, Default)]
pub struct NewReview {
    pub user_id: String,
    pub album_id: String,
    pub rating: Option<f64>,
    pub text: Option<String>,
    pub favorite_tracks: Vec<String>,
}

/// Everything a committed review changed.
#[derive(Debug, Clone)]
pub struct CreatedReview {
    pub review: Review,
    pub album_aggregate: AlbumAggregate,
    pub minutes_listened: u64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewLikes {
    pub likes: Vec<String>,
    pub likes_count: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LikeChange {
    Applied(ReviewLikes),
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteChange {
    Added,
    AlreadyPresent,
    CapReached,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenListChange {
    Added,
    AlreadyPresent,
    AlreadyReviewed,
}

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AlbumSort {
    #[default]
    Popularity,
    Rating,
    Recent,
}

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReviewSort {
    Likes,
    #[default]
    Recent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtistFilter {
    Only(String),
    Except(String),
}

/// Albums sharing at least one of `genres`, popularity descending.
#[derive(Debug, Clone)]
pub struct GenreQuery {
    pub genres: Vec<String>,
    pub exclude_album_id: String,
    pub artist: ArtistFilter,
    pub limit: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RankedArtist {
    #[serde(flatten)]
    pub artist: Artist,
    pub popularity: u64,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArtistStats {
    pub artist_id: String,
    pub album_count: u64,
    pub review_count: u64,
    pub reviewer_count: u64,
    pub average_rating: f64,
    pub total_ratings: u64,
    pub minutes_listened: u64,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogCounts {
    pub artists: u64,
    pub albums: u64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserList {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub album_ids: Vec<String>,
    pub created: i64,
}

#[derive(Debug, Clone, Default)]
pub struct NewUserList {
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
}
