mod models;
mod schema;
mod sqlite;
mod trait_def;

#[cfg(test)]
pub(crate) mod test_support;

pub use models::*;
pub use sqlite::SqliteRiffStore;
pub use trait_def::{CatalogStore, ListStore, ReviewStore, RiffStore, UserStore};
