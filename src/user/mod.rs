pub mod auth;
mod user_manager;

pub use auth::RiffHasher;
pub use user_manager::{UserManager, UserProfile};
