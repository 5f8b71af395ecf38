use super::{
    count, exists, load_review, load_reviews, new_id, placeholders, review_likes,
    SqliteRiffStore, REVIEW_COLUMNS,
};
use crate::store::models::*;
use crate::store::trait_def::ReviewStore;
use anyhow::{bail, Context, Result};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

/// Keeps `likes_count` equal to the number of like rows.
fn refresh_likes(conn: &Connection, review_id: &str) -> Result<ReviewLikes> {
    conn.execute(
        "UPDATE review SET likes_count = (SELECT COUNT(*) FROM review_like WHERE review_id = ?1) WHERE id = ?1",
        params![review_id],
    )?;
    let likes = review_likes(conn, review_id)?;
    Ok(ReviewLikes {
        likes_count: likes.len() as u64,
        likes,
    })
}

fn review_exists(conn: &Connection, review_id: &str) -> Result<bool> {
    exists(conn, "SELECT 1 FROM review WHERE id = ?1", params![review_id])
}

impl ReviewStore for SqliteRiffStore {
    fn create_review(&self, new_review: &NewReview) -> Result<CreatedReview> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let album = tx
            .query_row(
                "SELECT popularity, average_rating, total_ratings, duration FROM album WHERE id = ?1",
                params![new_review.album_id],
                |row| {
                    Ok((
                        AlbumAggregate {
                            popularity: row.get::<_, i64>(0)? as u64,
                            average_rating: row.get(1)?,
                            total_ratings: row.get::<_, i64>(2)? as u64,
                        },
                        row.get::<_, i64>(3)?,
                    ))
                },
            )
            .optional()?;
        let Some((aggregate, duration)) = album else {
            bail!("Album {} not found", new_review.album_id);
        };

        let review_id = new_id();
        tx.execute(
            &format!(
                "INSERT INTO review (id, user_id, album_id, rating, text, favorite_tracks) \
                 VALUES ({})",
                placeholders(1, 6)
            ),
            params![
                review_id,
                new_review.user_id,
                new_review.album_id,
                new_review.rating,
                new_review.text,
                serde_json::to_string(&new_review.favorite_tracks)?
            ],
        )?;

        let album_aggregate = aggregate.with_review(new_review.rating);
        tx.execute(
            "UPDATE album SET popularity = ?1, average_rating = ?2, total_ratings = ?3 WHERE id = ?4",
            params![
                album_aggregate.popularity as i64,
                album_aggregate.average_rating,
                album_aggregate.total_ratings as i64,
                new_review.album_id
            ],
        )?;

        tx.execute(
            "UPDATE user SET minutes_listened = minutes_listened + ?1 WHERE id = ?2",
            params![duration, new_review.user_id],
        )?;
        let minutes_listened: i64 = tx.query_row(
            "SELECT minutes_listened FROM user WHERE id = ?1",
            params![new_review.user_id],
            |row| row.get(0),
        )?;

        tx.execute(
            "DELETE FROM user_listen_list WHERE user_id = ?1 AND album_id = ?2",
            params![new_review.user_id, new_review.album_id],
        )?;

        let review = load_review(&tx, &review_id)?.context("Created review vanished")?;
        tx.commit()?;
        Ok(CreatedReview {
            review,
            album_aggregate,
            minutes_listened: minutes_listened as u64,
        })
    }

    fn get_review(&self, review_id: &str) -> Result<Option<Review>> {
        let conn = self.lock()?;
        load_review(&conn, review_id)
    }

    fn get_album_reviews(
        &self,
        album_id: &str,
        sort: ReviewSort,
        limit: usize,
    ) -> Result<Vec<Review>> {
        let order = match sort {
            ReviewSort::Likes => "likes_count DESC, created DESC, rowid DESC",
            ReviewSort::Recent => "created DESC, rowid DESC",
        };
        let conn = self.lock()?;
        load_reviews(
            &conn,
            &format!(
                "SELECT {} FROM review WHERE album_id = ?1 ORDER BY {} LIMIT ?2",
                REVIEW_COLUMNS, order
            ),
            params![album_id, limit as i64],
        )
    }

    fn get_user_reviews(&self, user_id: &str, limit: usize) -> Result<Vec<Review>> {
        let conn = self.lock()?;
        load_reviews(
            &conn,
            &format!(
                "SELECT {} FROM review WHERE user_id = ?1 ORDER BY created DESC, rowid DESC LIMIT ?2",
                REVIEW_COLUMNS
            ),
            params![user_id, limit as i64],
        )
    }

    fn get_reviews_by_users(&self, user_ids: &[String], limit: usize) -> Result<Vec<Review>> {
        if user_ids.is_empty() || limit == 0 {
            return Ok(vec![]);
        }
        let conn = self.lock()?;
        load_reviews(
            &conn,
            &format!(
                "SELECT {} FROM review WHERE user_id IN ({}) ORDER BY created DESC, rowid DESC LIMIT {}",
                REVIEW_COLUMNS,
                placeholders(1, user_ids.len()),
                limit
            ),
            params_from_iter(user_ids.iter()),
        )
    }

    fn get_latest_user_review(&self, user_id: &str, album_id: &str) -> Result<Option<Review>> {
        let conn = self.lock()?;
        Ok(load_reviews(
            &conn,
            &format!(
                "SELECT {} FROM review WHERE user_id = ?1 AND album_id = ?2 \
                 ORDER BY created DESC, rowid DESC LIMIT 1",
                REVIEW_COLUMNS
            ),
            params![user_id, album_id],
        )?
        .pop())
    }

    fn add_review_like(&self, review_id: &str, user_id: &str) -> Result<Option<LikeChange>> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        if !review_exists(&tx, review_id)? {
            return Ok(None);
        }
        let inserted = tx.execute(
            "INSERT OR IGNORE INTO review_like (review_id, user_id) VALUES (?1, ?2)",
            params![review_id, user_id],
        )?;
        if inserted == 0 {
            return Ok(Some(LikeChange::Unchanged));
        }
        let likes = refresh_likes(&tx, review_id)?;
        tx.commit()?;
        Ok(Some(LikeChange::Applied(likes)))
    }

    fn remove_review_like(&self, review_id: &str, user_id: &str) -> Result<Option<LikeChange>> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        if !review_exists(&tx, review_id)? {
            return Ok(None);
        }
        let deleted = tx.execute(
            "DELETE FROM review_like WHERE review_id = ?1 AND user_id = ?2",
            params![review_id, user_id],
        )?;
        if deleted == 0 {
            return Ok(Some(LikeChange::Unchanged));
        }
        let likes = refresh_likes(&tx, review_id)?;
        tx.commit()?;
        Ok(Some(LikeChange::Applied(likes)))
    }

    fn recompute_album_aggregate(&self, album_id: &str) -> Result<Option<AlbumAggregate>> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        if !exists(&tx, "SELECT 1 FROM album WHERE id = ?1", params![album_id])? {
            return Ok(None);
        }
        let review_count = count(
            &tx,
            "SELECT COUNT(*) FROM review WHERE album_id = ?1",
            params![album_id],
        )?;
        let ratings = {
            let mut stmt = tx.prepare(
                "SELECT rating FROM review WHERE album_id = ?1 AND rating IS NOT NULL ORDER BY rowid",
            )?;
            let ratings = stmt
                .query_map(params![album_id], |row| row.get::<_, f64>(0))?
                .collect::<Result<Vec<f64>, _>>()?;
            ratings
        };
        let aggregate = AlbumAggregate::from_reviews(review_count, &ratings);
        tx.execute(
            "UPDATE album SET popularity = ?1, average_rating = ?2, total_ratings = ?3 WHERE id = ?4",
            params![
                aggregate.popularity as i64,
                aggregate.average_rating,
                aggregate.total_ratings as i64,
                album_id
            ],
        )?;
        tx.execute(
            "UPDATE review SET likes_count = \
             (SELECT COUNT(*) FROM review_like WHERE review_like.review_id = review.id) \
             WHERE album_id = ?1",
            params![album_id],
        )?;
        tx.commit()?;
        Ok(Some(aggregate))
    }
}
