use super::SocialManager;
use crate::error::{require_id, RiffError, RiffResult};
use crate::server::metrics;
use crate::store::{
    Album, FavoriteChange, LikeChange, ListenListChange, ReviewLikes, MAX_FAVORITE_ALBUMS,
};
use tracing::debug;

impl SocialManager {
    pub fn add_like(&self, user_id: &str, review_id: &str) -> RiffResult<ReviewLikes> {
        let user_id = self.existing_user(user_id)?;
        let review_id = require_id(review_id, "reviewId")?;
        match self.store.add_review_like(&review_id, &user_id)? {
            None => Err(RiffError::not_found("review", review_id)),
            Some(LikeChange::Unchanged) => {
                Err(RiffError::validation("You already like this review"))
            }
            Some(LikeChange::Applied(likes)) => {
                metrics::record_review_like_change("add");
                debug!("{} liked review {}", user_id, review_id);
                Ok(likes)
            }
        }
    }

    pub fn remove_like(&self, user_id: &str, review_id: &str) -> RiffResult<ReviewLikes> {
        let user_id = self.existing_user(user_id)?;
        let review_id = require_id(review_id, "reviewId")?;
        match self.store.remove_review_like(&review_id, &user_id)? {
            None => Err(RiffError::not_found("review", review_id)),
            Some(LikeChange::Unchanged) => {
                Err(RiffError::validation("You have not liked this review"))
            }
            Some(LikeChange::Applied(likes)) => {
                metrics::record_review_like_change("remove");
                debug!("{} unliked review {}", user_id, review_id);
                Ok(likes)
            }
        }
    }

    /// Re-adding a favorite is a no-op. A full list is never evicted from.
    pub fn add_favorite_album(&self, user_id: &str, album_id: &str) -> RiffResult<Vec<Album>> {
        let user_id = self.existing_user(user_id)?;
        let album = self.existing_album(album_id)?;
        match self
            .store
            .add_favorite_album(&user_id, &album.id, MAX_FAVORITE_ALBUMS)?
        {
            FavoriteChange::CapReached => Err(RiffError::validation(format!(
                "You can only have {} favorite albums",
                MAX_FAVORITE_ALBUMS
            ))),
            FavoriteChange::Added | FavoriteChange::AlreadyPresent => {
                self.favorite_albums(&user_id)
            }
        }
    }

    /// Removing an album that is not a favorite succeeds.
    pub fn remove_favorite_album(&self, user_id: &str, album_id: &str) -> RiffResult<Vec<Album>> {
        let user_id = self.existing_user(user_id)?;
        let album_id = require_id(album_id, "albumId")?;
        self.store.remove_favorite_album(&user_id, &album_id)?;
        self.favorite_albums(&user_id)
    }

    pub fn favorite_albums(&self, user_id: &str) -> RiffResult<Vec<Album>> {
        let user_id = self.existing_user(user_id)?;
        let ids = self.store.get_favorite_album_ids(&user_id)?;
        Ok(self.store.get_albums(&ids)?)
    }

    pub fn add_to_listen_list(&self, user_id: &str, album_id: &str) -> RiffResult<Vec<Album>> {
        let user_id = self.existing_user(user_id)?;
        let album = self.existing_album(album_id)?;
        match self.store.add_to_listen_list(&user_id, &album.id)? {
            ListenListChange::AlreadyReviewed => Err(RiffError::validation(
                "You already reviewed this album, it cannot go on your listen list",
            )),
            ListenListChange::Added | ListenListChange::AlreadyPresent => {
                self.listen_list(&user_id)
            }
        }
    }

    pub fn remove_from_listen_list(
        &self,
        user_id: &str,
        album_id: &str,
    ) -> RiffResult<Vec<Album>> {
        let user_id = self.existing_user(user_id)?;
        let album_id = require_id(album_id, "albumId")?;
        self.store.remove_from_listen_list(&user_id, &album_id)?;
        self.listen_list(&user_id)
    }

    pub fn listen_list(&self, user_id: &str) -> RiffResult<Vec<Album>> {
        let user_id = self.existing_user(user_id)?;
        let ids = self.store.get_listen_list(&user_id)?;
        Ok(self.store.get_albums(&ids)?)
    }

    pub fn set_album_liked(&self, user_id: &str, album_id: &str, liked: bool) -> RiffResult<()> {
        let user_id = self.existing_user(user_id)?;
        let album_id = if liked {
            self.existing_album(album_id)?.id
        } else {
            require_id(album_id, "albumId")?
        };
        Ok(self.store.set_album_liked(&user_id, &album_id, liked)?)
    }

    pub fn liked_albums(&self, user_id: &str) -> RiffResult<Vec<Album>> {
        let user_id = self.existing_user(user_id)?;
        let ids = self.store.get_liked_album_ids(&user_id)?;
        Ok(self.store.get_albums(&ids)?)
    }
}
