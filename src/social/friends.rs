use super::SocialManager;
use crate::error::{require_id, RiffError, RiffResult};
use crate::server::metrics;
use crate::store::{Review, UserSummary};
use tracing::info;

const DEFAULT_ACTIVITY_PAGE: usize = 20;

impl SocialManager {
    /// Follows `friend_id`. Edges are directed: only `user_id`'s side changes.
    pub fn add_friend(&self, user_id: &str, friend_id: &str) -> RiffResult<Vec<UserSummary>> {
        let user_id = require_id(user_id, "userId")?;
        let friend_id = require_id(friend_id, "friendId")?;
        if user_id == friend_id {
            return Err(RiffError::validation("You cannot follow yourself"));
        }
        let user_id = self.existing_user(&user_id)?;
        let friend_id = self.existing_user(&friend_id)?;
        if !self.store.add_friend_edge(&user_id, &friend_id)? {
            return Err(RiffError::validation("You already follow this user"));
        }
        metrics::record_follow_change("add");
        info!("{} now follows {}", user_id, friend_id);
        self.friends(&user_id)
    }

    pub fn unfollow(&self, user_id: &str, target_id: &str) -> RiffResult<Vec<UserSummary>> {
        let user_id = self.existing_user(user_id)?;
        let target_id = require_id(target_id, "unfollowId")?;
        if !self.store.remove_friend_edge(&user_id, &target_id)? {
            return Err(RiffError::validation("You do not follow this user"));
        }
        metrics::record_follow_change("remove");
        info!("{} unfollowed {}", user_id, target_id);
        self.friends(&user_id)
    }

    pub fn is_friend(&self, user_id: &str, friend_id: &str) -> RiffResult<bool> {
        let user_id = require_id(user_id, "userId")?;
        let friend_id = require_id(friend_id, "friendId")?;
        Ok(self.store.is_friend(&user_id, &friend_id)?)
    }

    pub fn friends(&self, user_id: &str) -> RiffResult<Vec<UserSummary>> {
        let user_id = self.existing_user(user_id)?;
        let ids = self.store.get_friend_ids(&user_id)?;
        Ok(self.store.get_user_summaries(&ids)?)
    }

    pub fn followers(&self, user_id: &str) -> RiffResult<Vec<UserSummary>> {
        let user_id = self.existing_user(user_id)?;
        let ids = self.store.get_follower_ids(&user_id)?;
        Ok(self.store.get_user_summaries(&ids)?)
    }

    /// Latest reviews written by the users `user_id` follows.
    pub fn friends_recent_reviews(
        &self,
        user_id: &str,
        limit: Option<usize>,
    ) -> RiffResult<Vec<Review>> {
        let user_id = self.existing_user(user_id)?;
        let friend_ids = self.store.get_friend_ids(&user_id)?;
        let limit = self.ranking.page_size(limit, DEFAULT_ACTIVITY_PAGE);
        Ok(self.store.get_reviews_by_users(&friend_ids, limit)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RankingSettings;
    use crate::social::ReviewDraft;
    use crate::store::test_support::*;

    fn setup() -> (SocialManager, String, String, String) {
        let store = new_store();
        add_artist(&store, "ar");
        add_album(&store, "al", "ar", &[], 0);
        let a = add_user(&store, "a");
        let b = add_user(&store, "b");
        let c = add_user(&store, "c");
        (
            SocialManager::new(store, RankingSettings::default()),
            a,
            b,
            c,
        )
    }

    #[test]
    fn follow_is_directed() {
        let (manager, a, b, _) = setup();
        let friends = manager.add_friend(&a, &b).unwrap();
        assert_eq!(friends.len(), 1);
        assert_eq!(friends[0].id, b);
        assert!(manager.is_friend(&a, &b).unwrap());
        assert!(!manager.is_friend(&b, &a).unwrap());
        assert!(manager.friends(&b).unwrap().is_empty());
        assert_eq!(manager.followers(&b).unwrap()[0].id, a);
    }

    #[test]
    fn rejects_self_duplicate_and_unknown_edges() {
        let (manager, a, b, _) = setup();
        assert!(matches!(
            manager.add_friend(&a, &format!(" {} ", a)),
            Err(RiffError::Validation(_))
        ));
        manager.add_friend(&a, &b).unwrap();
        assert!(matches!(
            manager.add_friend(&a, &b),
            Err(RiffError::Validation(_))
        ));
        assert!(matches!(
            manager.add_friend(&a, "ghost"),
            Err(RiffError::NotFound { .. })
        ));
        assert!(matches!(
            manager.add_friend("", &b),
            Err(RiffError::Validation(_))
        ));
    }

    #[test]
    fn unfollow_requires_existing_edge() {
        let (manager, a, b, _) = setup();
        assert!(matches!(
            manager.unfollow(&a, &b),
            Err(RiffError::Validation(_))
        ));
        manager.add_friend(&a, &b).unwrap();
        assert!(manager.unfollow(&a, &b).unwrap().is_empty());
        assert!(!manager.is_friend(&a, &b).unwrap());
    }

    #[test]
    fn activity_feed_only_shows_followed_users() {
        let (manager, a, b, c) = setup();
        manager.add_friend(&a, &b).unwrap();
        for author in [&b, &c] {
            manager
                .create_review(ReviewDraft {
                    user_id: author.clone(),
                    album_id: "al".to_string(),
                    ..Default::default()
                })
                .unwrap();
        }
        let feed = manager.friends_recent_reviews(&a, None).unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].user_id, b);
        assert!(manager.friends_recent_reviews(&c, None).unwrap().is_empty());
    }
}
