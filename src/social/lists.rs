use super::SocialManager;
use crate::error::{require_id, RiffError, RiffResult};
use crate::store::{NewUserList, UserList};
use tracing::info;

const DEFAULT_LISTS_PAGE: usize = 20;
const MAX_LIST_NAME_LENGTH: usize = 120;

impl SocialManager {
    pub fn create_list(
        &self,
        user_id: &str,
        name: &str,
        description: Option<String>,
        is_public: bool,
    ) -> RiffResult<UserList> {
        let user_id = self.existing_user(user_id)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(RiffError::validation("The list name cannot be empty"));
        }
        if name.chars().count() > MAX_LIST_NAME_LENGTH {
            return Err(RiffError::validation(format!(
                "The list name cannot exceed {} characters",
                MAX_LIST_NAME_LENGTH
            )));
        }
        let list = self.store.create_list(&NewUserList {
            user_id,
            name: name.to_string(),
            description: description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            is_public,
        })?;
        info!("User {} created list {}", list.user_id, list.id);
        Ok(list)
    }

    /// Private lists are only visible to their owner.
    pub fn list(&self, list_id: &str, viewer_id: Option<&str>) -> RiffResult<UserList> {
        let list_id = require_id(list_id, "listId")?;
        let list = self
            .store
            .get_list(&list_id)?
            .ok_or_else(|| RiffError::not_found("list", list_id.clone()))?;
        let is_owner = viewer_id.map(str::trim) == Some(list.user_id.as_str());
        if !list.is_public && !is_owner {
            return Err(RiffError::not_found("list", list_id));
        }
        Ok(list)
    }

    fn owned_list(&self, list_id: &str, user_id: &str) -> RiffResult<UserList> {
        let user_id = require_id(user_id, "userId")?;
        let list = self.list(list_id, Some(user_id.as_str()))?;
        if list.user_id != user_id {
            return Err(RiffError::validation("Only the owner can modify this list"));
        }
        Ok(list)
    }

    pub fn add_album_to_list(
        &self,
        list_id: &str,
        user_id: &str,
        album_id: &str,
    ) -> RiffResult<UserList> {
        let list = self.owned_list(list_id, user_id)?;
        let album = self.existing_album(album_id)?;
        self.store.add_album_to_list(&list.id, &album.id)?;
        self.list(&list.id, Some(list.user_id.as_str()))
    }

    pub fn remove_album_from_list(
        &self,
        list_id: &str,
        user_id: &str,
        album_id: &str,
    ) -> RiffResult<UserList> {
        let list = self.owned_list(list_id, user_id)?;
        let album_id = require_id(album_id, "albumId")?;
        self.store.remove_album_from_list(&list.id, &album_id)?;
        self.list(&list.id, Some(list.user_id.as_str()))
    }

    pub fn delete_list(&self, list_id: &str, user_id: &str) -> RiffResult<()> {
        let list = self.owned_list(list_id, user_id)?;
        self.store.delete_list(&list.id)?;
        info!("User {} deleted list {}", list.user_id, list.id);
        Ok(())
    }

    pub fn user_lists(&self, user_id: &str, viewer_id: Option<&str>) -> RiffResult<Vec<UserList>> {
        let user_id = self.existing_user(user_id)?;
        let include_private = viewer_id.map(str::trim) == Some(user_id.as_str());
        Ok(self.store.get_user_lists(&user_id, include_private)?)
    }

    pub fn public_lists(&self, limit: Option<usize>) -> RiffResult<Vec<UserList>> {
        let limit = self.ranking.page_size(limit, DEFAULT_LISTS_PAGE);
        Ok(self.store.get_public_lists(limit)?)
    }
}
