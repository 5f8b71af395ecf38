use axum::extract::FromRef;

use crate::catalog::CatalogManager;
use crate::social::SocialManager;
use crate::store::RiffStore;
use crate::user::UserManager;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedRiffStore = Arc<dyn RiffStore>;
pub type GuardedUserManager = Arc<UserManager>;
pub type GuardedSocialManager = Arc<SocialManager>;
pub type GuardedCatalogManager = Arc<CatalogManager>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub store: GuardedRiffStore,
    pub user_manager: GuardedUserManager,
    pub social_manager: GuardedSocialManager,
    pub catalog_manager: GuardedCatalogManager,
}

impl ServerState {
    pub fn new(config: ServerConfig, store: GuardedRiffStore) -> Self {
        let ranking = config.ranking;
        ServerState {
            config,
            start_time: Instant::now(),
            user_manager: Arc::new(UserManager::new(store.clone())),
            social_manager: Arc::new(SocialManager::new(store.clone(), ranking)),
            catalog_manager: Arc::new(CatalogManager::new(store.clone(), ranking)),
            store,
        }
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}

impl FromRef<ServerState> for GuardedRiffStore {
    fn from_ref(input: &ServerState) -> Self {
        input.store.clone()
    }
}

impl FromRef<ServerState> for GuardedUserManager {
    fn from_ref(input: &ServerState) -> Self {
        input.user_manager.clone()
    }
}

impl FromRef<ServerState> for GuardedSocialManager {
    fn from_ref(input: &ServerState) -> Self {
        input.social_manager.clone()
    }
}

impl FromRef<ServerState> for GuardedCatalogManager {
    fn from_ref(input: &ServerState) -> Self {
        input.catalog_manager.clone()
    }
}
