//! RiffRate Server Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod catalog;
pub mod config;
pub mod error;
pub mod server;
pub mod social;
pub mod sqlite_persistence;
pub mod store;
pub mod user;

// Re-export commonly used types for convenience
pub use error::{RiffError, RiffResult};
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
pub use store::{RiffStore, SqliteRiffStore};
