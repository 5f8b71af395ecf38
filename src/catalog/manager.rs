use crate::config::RankingSettings;
use crate::error::{require_id, RiffError, RiffResult};
use crate::store::{
    Album, AlbumSort, Artist, ArtistStats, CatalogCounts, RankedArtist, RiffStore,
};
use serde::Serialize;
use std::sync::Arc;

const DEFAULT_ALBUMS_PAGE: usize = 24;
const DEFAULT_ARTISTS_PAGE: usize = 24;

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArtistWithAlbums {
    #[serde(flatten)]
    pub artist: Artist,
    pub albums: Vec<Album>,
}

/// Read side of the album and artist catalog.
pub struct CatalogManager {
    store: Arc<dyn RiffStore>,
    ranking: RankingSettings,
}

impl CatalogManager {
    pub fn new(store: Arc<dyn RiffStore>, ranking: RankingSettings) -> Self {
        Self { store, ranking }
    }

    pub fn list_albums(
        &self,
        sort: AlbumSort,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> RiffResult<Vec<Album>> {
        let limit = self.ranking.page_size(limit, DEFAULT_ALBUMS_PAGE);
        Ok(self
            .store
            .list_albums(sort, limit, offset.unwrap_or_default())?)
    }

    pub fn album(&self, album_id: &str) -> RiffResult<Album> {
        let album_id = require_id(album_id, "albumId")?;
        self.store
            .get_album(&album_id)?
            .ok_or_else(|| RiffError::not_found("album", album_id))
    }

    pub fn list_artists(&self, limit: Option<usize>) -> RiffResult<Vec<RankedArtist>> {
        let limit = self.ranking.page_size(limit, DEFAULT_ARTISTS_PAGE);
        Ok(self.store.list_artists_by_popularity(limit)?)
    }

    pub fn artist(&self, artist_id: &str) -> RiffResult<ArtistWithAlbums> {
        let artist_id = require_id(artist_id, "artistId")?;
        let artist = self
            .store
            .get_artist(&artist_id)?
            .ok_or_else(|| RiffError::not_found("artist", artist_id.clone()))?;
        let albums = self.store.get_artist_albums(&artist_id)?;
        Ok(ArtistWithAlbums { artist, albums })
    }

    /// Listening statistics, computed on every read.
    pub fn artist_stats(&self, artist_id: &str) -> RiffResult<ArtistStats> {
        let artist_id = require_id(artist_id, "artistId")?;
        self.store
            .get_artist_stats(&artist_id)?
            .ok_or_else(|| RiffError::not_found("artist", artist_id))
    }

    pub fn counts(&self) -> RiffResult<CatalogCounts> {
        Ok(self.store.get_catalog_counts()?)
    }
}
