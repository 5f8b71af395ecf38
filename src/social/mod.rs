//! Reviews, engagement, the follow graph and friend based rankings.
//!
//! `SocialManager` validates client input, maps store absences to
//! [`RiffError`] and leaves persistence to the [`RiffStore`].

mod engagement;
mod friends;
mod lists;
mod popularity;
mod reviews;

pub use popularity::tally_favorites;
pub use reviews::ReviewDraft;

use crate::config::RankingSettings;
use crate::error::{require_id, RiffError, RiffResult};
use crate::store::{Album, RiffStore};
use std::sync::Arc;

pub struct SocialManager {
    store: Arc<dyn RiffStore>,
    ranking: RankingSettings,
}

impl SocialManager {
    pub fn new(store: Arc<dyn RiffStore>, ranking: RankingSettings) -> Self {
        Self { store, ranking }
    }

    /// Returns the normalized id of an existing user.
    fn existing_user(&self, raw_id: &str) -> RiffResult<String> {
        let user_id = require_id(raw_id, "userId")?;
        match self.store.get_user(&user_id)? {
            Some(_) => Ok(user_id),
            None => Err(RiffError::not_found("user", user_id)),
        }
    }

    fn existing_album(&self, raw_id: &str) -> RiffResult<Album> {
        let album_id = require_id(raw_id, "albumId")?;
        self.store
            .get_album(&album_id)?
            .ok_or_else(|| RiffError::not_found("album", album_id))
    }
}
