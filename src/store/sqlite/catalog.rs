use super::{count, load_album, load_albums, new_id, placeholders, SqliteRiffStore, ALBUM_COLUMNS};
use crate::store::models::*;
use crate::store::trait_def::CatalogStore;
use anyhow::{Context, Result};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

fn artist_from_row(row: &Row) -> rusqlite::Result<Artist> {
    Ok(Artist {
        id: row.get(0)?,
        name: row.get(1)?,
        image_url: row.get(2)?,
        bio: row.get(3)?,
        created: row.get::<_, Option<i64>>(4)?.unwrap_or_default(),
    })
}

fn load_artist(conn: &Connection, artist_id: &str) -> Result<Option<Artist>> {
    Ok(conn
        .query_row(
            "SELECT id, name, image_url, bio, created FROM artist WHERE id = ?1",
            params![artist_id],
            artist_from_row,
        )
        .optional()?)
}

impl CatalogStore for SqliteRiffStore {
    fn insert_artist(&self, artist: &NewArtist) -> Result<Artist> {
        let conn = self.lock()?;
        let artist_id = artist.id.clone().unwrap_or_else(new_id);
        conn.execute(
            "INSERT INTO artist (id, name, image_url, bio) VALUES (?1, ?2, ?3, ?4)",
            params![artist_id, artist.name, artist.image_url, artist.bio],
        )?;
        load_artist(&conn, &artist_id)?.context("Inserted artist vanished")
    }

    fn insert_album(&self, album: &NewAlbum) -> Result<Album> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let album_id = album.id.clone().unwrap_or_else(new_id);
        tx.execute(
            "INSERT INTO album (id, name, artist_id, cover_url, release_year, duration) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                album_id,
                album.name,
                album.artist_id,
                album.cover_url,
                album.release_year,
                album.duration as i64
            ],
        )?;
        for genre in album.genres.iter() {
            tx.execute(
                "INSERT OR IGNORE INTO album_genre (album_id, genre) VALUES (?1, ?2)",
                params![album_id, genre],
            )?;
        }
        for track in album.tracks.iter() {
            tx.execute(
                "INSERT INTO album_track (album_id, position, name, duration_sec) VALUES (?1, ?2, ?3, ?4)",
                params![album_id, track.position, track.name, track.duration_sec],
            )?;
        }
        let inserted = load_album(&tx, &album_id)?.context("Inserted album vanished")?;
        tx.commit()?;
        Ok(inserted)
    }

    fn get_artist(&self, artist_id: &str) -> Result<Option<Artist>> {
        let conn = self.lock()?;
        load_artist(&conn, artist_id)
    }

    fn get_album(&self, album_id: &str) -> Result<Option<Album>> {
        let conn = self.lock()?;
        load_album(&conn, album_id)
    }

    fn get_albums(&self, album_ids: &[String]) -> Result<Vec<Album>> {
        let conn = self.lock()?;
        let mut albums = Vec::with_capacity(album_ids.len());
        for album_id in album_ids {
            albums.extend(load_album(&conn, album_id)?);
        }
        Ok(albums)
    }

    fn get_artist_albums(&self, artist_id: &str) -> Result<Vec<Album>> {
        let conn = self.lock()?;
        load_albums(
            &conn,
            &format!(
                "SELECT {} FROM album WHERE artist_id = ?1 ORDER BY release_year DESC, id ASC",
                ALBUM_COLUMNS
            ),
            params![artist_id],
        )
    }

    fn list_albums(&self, sort: AlbumSort, limit: usize, offset: usize) -> Result<Vec<Album>> {
        let order = match sort {
            AlbumSort::Popularity => "popularity DESC, id ASC",
            AlbumSort::Rating => "average_rating DESC, total_ratings DESC, id ASC",
            AlbumSort::Recent => "created DESC, rowid DESC",
        };
        let conn = self.lock()?;
        load_albums(
            &conn,
            &format!(
                "SELECT {} FROM album ORDER BY {} LIMIT ?1 OFFSET ?2",
                ALBUM_COLUMNS, order
            ),
            params![limit as i64, offset as i64],
        )
    }

    fn find_albums_sharing_genres(&self, query: &GenreQuery) -> Result<Vec<Album>> {
        if query.genres.is_empty() || query.limit == 0 {
            return Ok(vec![]);
        }
        let (artist_op, artist_id) = match &query.artist {
            ArtistFilter::Only(id) => ("=", id),
            ArtistFilter::Except(id) => ("!=", id),
        };
        let sql = format!(
            "SELECT {} FROM album WHERE id != ?1 AND artist_id {} ?2 \
             AND id IN (SELECT album_id FROM album_genre WHERE genre IN ({})) \
             ORDER BY popularity DESC, id ASC LIMIT {}",
            ALBUM_COLUMNS,
            artist_op,
            placeholders(3, query.genres.len()),
            query.limit
        );
        let values = [&query.exclude_album_id, artist_id]
            .into_iter()
            .chain(query.genres.iter());
        let conn = self.lock()?;
        load_albums(&conn, &sql, params_from_iter(values))
    }

    fn list_artists_by_popularity(&self, limit: usize) -> Result<Vec<RankedArtist>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT a.id, a.name, a.image_url, a.bio, a.created, \
             COALESCE(SUM(al.popularity), 0) AS total_popularity \
             FROM artist a LEFT JOIN album al ON al.artist_id = a.id \
             GROUP BY a.id ORDER BY total_popularity DESC, a.id ASC LIMIT ?1",
        )?;
        let artists = stmt
            .query_map(params![limit as i64], |row| {
                Ok(RankedArtist {
                    artist: artist_from_row(row)?,
                    popularity: row.get::<_, i64>(5)? as u64,
                })
            })?
            .collect::<Result<Vec<RankedArtist>, _>>()?;
        Ok(artists)
    }

    fn get_artist_stats(&self, artist_id: &str) -> Result<Option<ArtistStats>> {
        let conn = self.lock()?;
        if load_artist(&conn, artist_id)?.is_none() {
            return Ok(None);
        }
        let album_count = count(
            &conn,
            "SELECT COUNT(*) FROM album WHERE artist_id = ?1",
            params![artist_id],
        )?;
        let (review_count, reviewer_count) = conn.query_row(
            "SELECT COUNT(*), COUNT(DISTINCT r.user_id) FROM review r \
             JOIN album al ON al.id = r.album_id WHERE al.artist_id = ?1",
            params![artist_id],
            |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)),
        )?;
        let (weighted_sum, total_ratings, minutes_listened) = conn.query_row(
            "SELECT COALESCE(SUM(average_rating * total_ratings), 0.0), \
             COALESCE(SUM(total_ratings), 0), COALESCE(SUM(duration * popularity), 0) \
             FROM album WHERE artist_id = ?1",
            params![artist_id],
            |row| {
                Ok((
                    row.get::<_, f64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, i64>(2)?,
                ))
            },
        )?;
        let average_rating = if total_ratings > 0 {
            weighted_sum / total_ratings as f64
        } else {
            0.0
        };
        Ok(Some(ArtistStats {
            artist_id: artist_id.to_string(),
            album_count,
            review_count: review_count as u64,
            reviewer_count: reviewer_count as u64,
            average_rating,
            total_ratings: total_ratings as u64,
            minutes_listened: minutes_listened as u64,
        }))
    }

    fn get_catalog_counts(&self) -> Result<CatalogCounts> {
        let conn = self.lock()?;
        Ok(CatalogCounts {
            artists: count(&conn, "SELECT COUNT(*) FROM artist", [])?,
            albums: count(&conn, "SELECT COUNT(*) FROM album", [])?,
        })
    }
}
