use super::SocialManager;
use crate::error::{require_id, RiffError, RiffResult};
use crate::server::metrics;
use crate::store::{AlbumAggregate, NewReview, Review, ReviewSort, MAX_RATING, MIN_RATING};
use tracing::info;

const DEFAULT_REVIEWS_PAGE: usize = 20;

#[derive(Debug, Clone, Default)]
pub struct ReviewDraft {
    pub user_id: String,
    pub album_id: String,
    pub rating: Option<f64>,
    pub text: Option<String>,
    pub favorite_tracks: Vec<String>,
}

fn validate_rating(rating: Option<f64>) -> RiffResult<Option<f64>> {
    match rating {
        Some(r) if !r.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&r) => Err(
            RiffError::validation(format!(
                "Rating must be between {} and {}",
                MIN_RATING, MAX_RATING
            )),
        ),
        _ => Ok(rating),
    }
}

fn clean_tracks(tracks: Vec<String>) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::with_capacity(tracks.len());
    for track in tracks {
        let track = track.trim().to_string();
        if !track.is_empty() && !cleaned.contains(&track) {
            cleaned.push(track);
        }
    }
    cleaned
}

impl SocialManager {
    /// Always inserts a new review. The album aggregates, the author's
    /// listened minutes and listen list move with it atomically.
    pub fn create_review(&self, draft: ReviewDraft) -> RiffResult<Review> {
        let user_id = require_id(&draft.user_id, "userId")?;
        let album_id = require_id(&draft.album_id, "albumId")?;
        let rating = validate_rating(draft.rating)?;
        let user_id = self.existing_user(&user_id)?;
        let album = self.existing_album(&album_id)?;

        let created = self.store.create_review(&NewReview {
            user_id,
            album_id: album.id,
            rating,
            text: draft
                .text
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            favorite_tracks: clean_tracks(draft.favorite_tracks),
        })?;
        metrics::record_review_created();
        info!(
            "Review {} by {} on {}: popularity {}, average {:.3} over {} ratings, {} minutes listened",
            created.review.id,
            created.review.user_id,
            created.review.album_id,
            created.album_aggregate.popularity,
            created.album_aggregate.average_rating,
            created.album_aggregate.total_ratings,
            created.minutes_listened
        );
        Ok(created.review)
    }

    pub fn get_review(&self, review_id: &str) -> RiffResult<Review> {
        let review_id = require_id(review_id, "reviewId")?;
        self.store
            .get_review(&review_id)?
            .ok_or_else(|| RiffError::not_found("review", review_id))
    }

    pub fn album_reviews(
        &self,
        album_id: &str,
        sort: ReviewSort,
        limit: Option<usize>,
    ) -> RiffResult<Vec<Review>> {
        let album = self.existing_album(album_id)?;
        let limit = self.ranking.page_size(limit, DEFAULT_REVIEWS_PAGE);
        Ok(self.store.get_album_reviews(&album.id, sort, limit)?)
    }

    pub fn user_reviews(&self, user_id: &str, limit: Option<usize>) -> RiffResult<Vec<Review>> {
        let user_id = self.existing_user(user_id)?;
        let limit = self.ranking.page_size(limit, DEFAULT_REVIEWS_PAGE);
        Ok(self.store.get_user_reviews(&user_id, limit)?)
    }

    /// The most recent review of `album_id` written by `user_id`, if any.
    pub fn latest_user_review(&self, user_id: &str, album_id: &str) -> RiffResult<Option<Review>> {
        let user_id = require_id(user_id, "userId")?;
        let album_id = require_id(album_id, "albumId")?;
        Ok(self.store.get_latest_user_review(&user_id, &album_id)?)
    }

    /// Re-derives the album aggregates from its reviews.
    pub fn recompute_album_aggregates(&self, album_id: &str) -> RiffResult<AlbumAggregate> {
        let album_id = require_id(album_id, "albumId")?;
        let aggregate = self
            .store
            .recompute_album_aggregate(&album_id)?
            .ok_or_else(|| RiffError::not_found("album", album_id.clone()))?;
        info!("Recomputed aggregates of album {}: {:?}", album_id, aggregate);
        Ok(aggregate)
    }
}
