use super::auth::RiffHasher;
use crate::error::{require_id, RiffError, RiffResult};
use crate::store::{NewUser, ProfileUpdate, RiffStore, User, UserCounts};
use serde::Serialize;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};

const MIN_PASSWORD_LENGTH: usize = 8;
const MAX_HANDLE_LENGTH: usize = 40;

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: User,
    pub counts: UserCounts,
}

pub struct UserManager {
    store: Arc<dyn RiffStore>,
}

impl UserManager {
    pub fn new(store: Arc<dyn RiffStore>) -> Self {
        Self { store }
    }

    pub fn register(
        &self,
        handle: &str,
        password: &str,
        display_name: Option<String>,
    ) -> RiffResult<User> {
        let handle = handle.trim();
        if handle.is_empty() {
            return Err(RiffError::validation("The user handle cannot be empty"));
        }
        if handle.len() > MAX_HANDLE_LENGTH || handle.chars().any(char::is_whitespace) {
            return Err(RiffError::validation(format!(
                "The user handle must be a single word of at most {} characters",
                MAX_HANDLE_LENGTH
            )));
        }
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(RiffError::validation(format!(
                "The password must be at least {} characters long",
                MIN_PASSWORD_LENGTH
            )));
        }
        let handle_taken = || {
            RiffError::validation(format!("User handle {} is already taken", handle))
        };
        if self.store.get_user_id_by_handle(handle)?.is_some() {
            return Err(handle_taken());
        }

        let hasher = RiffHasher::Argon2;
        let salt = hasher.generate_b64_salt();
        let hash = hasher.hash(password.as_bytes(), &salt)?;
        let display_name = display_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());
        let user = self.store.create_user(&NewUser {
            handle: handle.to_string(),
            display_name,
            salt,
            hash,
            hasher: hasher.to_string(),
        })?
        .ok_or_else(handle_taken)?;
        info!("Registered user {} ({})", user.handle, user.id);
        Ok(user)
    }

    /// Unknown handles and wrong passwords are reported identically.
    pub fn login(&self, handle: &str, password: &str) -> RiffResult<User> {
        let rejected = || RiffError::validation("Invalid handle or password");
        let Some(credentials) = self.store.get_password_credentials(handle.trim())? else {
            debug!("Login for unknown handle {}", handle);
            return Err(rejected());
        };
        let hasher = RiffHasher::from_str(&credentials.hasher)?;
        if !hasher.verify(password, credentials.hash.as_str(), credentials.salt.as_str())? {
            return Err(rejected());
        }
        self.require_user(&credentials.user_id)
    }

    pub fn require_user(&self, user_id: &str) -> RiffResult<User> {
        let user_id = require_id(user_id, "userId")?;
        self.store
            .get_user(&user_id)?
            .ok_or_else(|| RiffError::not_found("user", user_id))
    }

    pub fn user_profile(&self, user_id: &str) -> RiffResult<UserProfile> {
        let user = self.require_user(user_id)?;
        let counts = self.store.get_user_counts(&user.id)?;
        Ok(UserProfile { user, counts })
    }

    pub fn update_profile(&self, user_id: &str, update: &ProfileUpdate) -> RiffResult<User> {
        let user_id = require_id(user_id, "userId")?;
        let trimmed = |value: &Option<String>| value.as_ref().map(|v| v.trim().to_string());
        let update = ProfileUpdate {
            display_name: trimmed(&update.display_name),
            bio: trimmed(&update.bio),
            photo_url: trimmed(&update.photo_url),
        };
        if !self.store.update_user_profile(&user_id, &update)? {
            return Err(RiffError::not_found("user", user_id));
        }
        self.require_user(&user_id)
    }
}
