use super::SocialManager;
use crate::error::RiffResult;
use crate::store::{Album, ArtistFilter, GenreQuery};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Counts in how many favorite lists each album appears, ranked by count
/// descending then album id ascending. An album listed twice by the same
/// friend counts once.
pub fn tally_favorites(favorite_lists: &[Vec<String>]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for favorites in favorite_lists {
        let unique: HashSet<&str> = favorites.iter().map(String::as_str).collect();
        for album_id in unique {
            *counts.entry(album_id).or_default() += 1;
        }
    }
    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(album_id, count)| (album_id.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}

impl SocialManager {
    /// Albums most often favorited by the users `user_id` follows. In this
    /// view `popularity` holds the number of friends, not the review count.
    pub fn friends_popular_albums(
        &self,
        user_id: &str,
        limit: Option<usize>,
    ) -> RiffResult<Vec<Album>> {
        let user_id = self.existing_user(user_id)?;
        let limit = self
            .ranking
            .page_size(limit, self.ranking.friends_popular_limit);

        let friend_ids = self.store.get_friend_ids(&user_id)?;
        if friend_ids.is_empty() {
            return Ok(vec![]);
        }
        let favorite_lists = friend_ids
            .iter()
            .map(|friend_id| self.store.get_favorite_album_ids(friend_id))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let mut ranked = tally_favorites(&favorite_lists);
        if ranked.is_empty() {
            return Ok(vec![]);
        }
        ranked.truncate(limit);

        let ids: Vec<String> = ranked.iter().map(|(id, _)| id.clone()).collect();
        let counts: HashMap<String, usize> = ranked.into_iter().collect();
        let mut albums = self.store.get_albums(&ids)?;
        for album in albums.iter_mut() {
            album.popularity = counts.get(&album.id).copied().unwrap_or_default() as u64;
        }
        Ok(albums)
    }

    /// Albums of other artists sharing a genre, then, if slots remain, albums
    /// of the same artist sharing a genre. Both groups are ordered by
    /// popularity and simply concatenated.
    pub fn similar_albums(&self, album_id: &str, limit: Option<usize>) -> RiffResult<Vec<Album>> {
        let source = self.existing_album(album_id)?;
        let limit = self
            .ranking
            .page_size(limit, self.ranking.similar_albums_limit);

        let mut similar = self.store.find_albums_sharing_genres(&GenreQuery {
            genres: source.genres.clone(),
            exclude_album_id: source.id.clone(),
            artist: ArtistFilter::Except(source.artist_id.clone()),
            limit,
        })?;
        if similar.len() < limit {
            let same_artist = self.store.find_albums_sharing_genres(&GenreQuery {
                genres: source.genres.clone(),
                exclude_album_id: source.id.clone(),
                artist: ArtistFilter::Only(source.artist_id.clone()),
                limit: limit - similar.len(),
            })?;
            debug!(
                "Album {}: {} similar from other artists, {} from the same artist",
                source.id,
                similar.len(),
                same_artist.len()
            );
            similar.extend(same_artist);
        }
        Ok(similar)
    }
}
