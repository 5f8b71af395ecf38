mod manager;

pub use manager::{ArtistWithAlbums, CatalogManager};
