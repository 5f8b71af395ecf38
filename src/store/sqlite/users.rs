use super::{count, exists, new_id, string_column, SqliteRiffStore};
use crate::store::models::*;
use crate::store::trait_def::UserStore;
use anyhow::{Context, Result};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};

const USER_COLUMNS: &str = "id, handle, display_name, bio, photo_url, minutes_listened, created";

fn user_from_row(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        handle: row.get(1)?,
        display_name: row.get(2)?,
        bio: row.get(3)?,
        photo_url: row.get(4)?,
        minutes_listened: row.get::<_, i64>(5)? as u64,
        created: row.get::<_, Option<i64>>(6)?.unwrap_or_default(),
    })
}

fn load_user(conn: &Connection, user_id: &str) -> Result<Option<User>> {
    Ok(conn
        .query_row(
            &format!("SELECT {} FROM user WHERE id = ?1", USER_COLUMNS),
            params![user_id],
            user_from_row,
        )
        .optional()?)
}

impl UserStore for SqliteRiffStore {
    fn create_user(&self, new_user: &NewUser) -> Result<Option<User>> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        if exists(&tx, "SELECT 1 FROM user WHERE handle = ?1", params![new_user.handle])? {
            return Ok(None);
        }
        let user_id = new_id();
        let inserted = tx.execute(
            "INSERT INTO user (id, handle, display_name) VALUES (?1, ?2, ?3)",
            params![user_id, new_user.handle, new_user.display_name],
        );
        match inserted {
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                return Ok(None);
            }
            other => other?,
        };
        tx.execute(
            "INSERT INTO user_password_credentials (user_id, salt, hash, hasher) VALUES (?1, ?2, ?3, ?4)",
            params![user_id, new_user.salt, new_user.hash, new_user.hasher],
        )?;
        let user = load_user(&tx, &user_id)?.context("Created user vanished")?;
        tx.commit()?;
        Ok(Some(user))
    }

    fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let conn = self.lock()?;
        load_user(&conn, user_id)
    }

    fn get_user_id_by_handle(&self, handle: &str) -> Result<Option<String>> {
        let conn = self.lock()?;
        Ok(conn
            .query_row(
                "SELECT id FROM user WHERE handle = ?1",
                params![handle],
                |row| row.get(0),
            )
            .optional()?)
    }

    fn get_password_credentials(&self, handle: &str) -> Result<Option<PasswordCredentials>> {
        let conn = self.lock()?;
        Ok(conn
            .query_row(
                "SELECT c.user_id, c.salt, c.hash, c.hasher FROM user_password_credentials c \
                 JOIN user u ON u.id = c.user_id WHERE u.handle = ?1",
                params![handle],
                |row| {
                    Ok(PasswordCredentials {
                        user_id: row.get(0)?,
                        salt: row.get(1)?,
                        hash: row.get(2)?,
                        hasher: row.get(3)?,
                    })
                },
            )
            .optional()?)
    }

    fn update_user_profile(&self, user_id: &str, update: &ProfileUpdate) -> Result<bool> {
        let conn = self.lock()?;
        let changed = conn.execute(
            "UPDATE user SET display_name = COALESCE(?1, display_name), \
             bio = COALESCE(?2, bio), photo_url = COALESCE(?3, photo_url) WHERE id = ?4",
            params![update.display_name, update.bio, update.photo_url, user_id],
        )?;
        Ok(changed > 0)
    }

    fn get_user_summaries(&self, user_ids: &[String]) -> Result<Vec<UserSummary>> {
        let conn = self.lock()?;
        let mut stmt =
            conn.prepare("SELECT id, handle, display_name, photo_url FROM user WHERE id = ?1")?;
        let mut summaries = Vec::with_capacity(user_ids.len());
        for user_id in user_ids {
            let summary = stmt
                .query_row(params![user_id], |row| {
                    Ok(UserSummary {
                        id: row.get(0)?,
                        handle: row.get(1)?,
                        display_name: row.get(2)?,
                        photo_url: row.get(3)?,
                    })
                })
                .optional()?;
            summaries.extend(summary);
        }
        Ok(summaries)
    }

    fn get_user_counts(&self, user_id: &str) -> Result<UserCounts> {
        let conn = self.lock()?;
        let of_user = |table: &str, column: &str| {
            count(
                &conn,
                &format!("SELECT COUNT(*) FROM {} WHERE {} = ?1", table, column),
                params![user_id],
            )
        };
        Ok(UserCounts {
            friends: of_user("user_friend", "user_id")?,
            followers: of_user("user_friend", "friend_id")?,
            reviews: of_user("review", "user_id")?,
            favorite_albums: of_user("user_favorite_album", "user_id")?,
            listen_list: of_user("user_listen_list", "user_id")?,
            liked_albums: of_user("user_liked_album", "user_id")?,
        })
    }

    fn get_friend_ids(&self, user_id: &str) -> Result<Vec<String>> {
        let conn = self.lock()?;
        string_column(
            &conn,
            "SELECT friend_id FROM user_friend WHERE user_id = ?1 ORDER BY rowid",
            params![user_id],
        )
    }

    fn get_follower_ids(&self, user_id: &str) -> Result<Vec<String>> {
        let conn = self.lock()?;
        string_column(
            &conn,
            "SELECT user_id FROM user_friend WHERE friend_id = ?1 ORDER BY rowid",
            params![user_id],
        )
    }

    fn add_friend_edge(&self, user_id: &str, friend_id: &str) -> Result<bool> {
        let conn = self.lock()?;
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO user_friend (user_id, friend_id) VALUES (?1, ?2)",
            params![user_id, friend_id],
        )?;
        Ok(inserted == 1)
    }

    fn remove_friend_edge(&self, user_id: &str, friend_id: &str) -> Result<bool> {
        let conn = self.lock()?;
        let deleted = conn.execute(
            "DELETE FROM user_friend WHERE user_id = ?1 AND friend_id = ?2",
            params![user_id, friend_id],
        )?;
        Ok(deleted > 0)
    }

    fn is_friend(&self, user_id: &str, friend_id: &str) -> Result<bool> {
        let conn = self.lock()?;
        exists(
            &conn,
            "SELECT 1 FROM user_friend WHERE user_id = ?1 AND friend_id = ?2",
            params![user_id, friend_id],
        )
    }

    fn get_favorite_album_ids(&self, user_id: &str) -> Result<Vec<String>> {
        let conn = self.lock()?;
        string_column(
            &conn,
            "SELECT album_id FROM user_favorite_album WHERE user_id = ?1 ORDER BY position",
            params![user_id],
        )
    }

    fn add_favorite_album(
        &self,
        user_id: &str,
        album_id: &str,
        cap: usize,
    ) -> Result<FavoriteChange> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        if exists(
            &tx,
            "SELECT 1 FROM user_favorite_album WHERE user_id = ?1 AND album_id = ?2",
            params![user_id, album_id],
        )? {
            return Ok(FavoriteChange::AlreadyPresent);
        }
        let current = count(
            &tx,
            "SELECT COUNT(*) FROM user_favorite_album WHERE user_id = ?1",
            params![user_id],
        )?;
        if current as usize >= cap {
            return Ok(FavoriteChange::CapReached);
        }
        tx.execute(
            "INSERT INTO user_favorite_album (user_id, album_id, position) VALUES (?1, ?2, ?3)",
            params![user_id, album_id, current as i64],
        )?;
        tx.commit()?;
        Ok(FavoriteChange::Added)
    }

    fn remove_favorite_album(&self, user_id: &str, album_id: &str) -> Result<bool> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let position: Option<i64> = tx
            .query_row(
                "SELECT position FROM user_favorite_album WHERE user_id = ?1 AND album_id = ?2",
                params![user_id, album_id],
                |row| row.get(0),
            )
            .optional()?;
        let Some(position) = position else {
            return Ok(false);
        };
        tx.execute(
            "DELETE FROM user_favorite_album WHERE user_id = ?1 AND album_id = ?2",
            params![user_id, album_id],
        )?;
        tx.execute(
            "UPDATE user_favorite_album SET position = position - 1 WHERE user_id = ?1 AND position > ?2",
            params![user_id, position],
        )?;
        tx.commit()?;
        Ok(true)
    }

    fn get_listen_list(&self, user_id: &str) -> Result<Vec<String>> {
        let conn = self.lock()?;
        string_column(
            &conn,
            "SELECT album_id FROM user_listen_list WHERE user_id = ?1 ORDER BY rowid",
            params![user_id],
        )
    }

    fn add_to_listen_list(&self, user_id: &str, album_id: &str) -> Result<ListenListChange> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        if exists(
            &tx,
            "SELECT 1 FROM review WHERE user_id = ?1 AND album_id = ?2",
            params![user_id, album_id],
        )? {
            return Ok(ListenListChange::AlreadyReviewed);
        }
        let inserted = tx.execute(
            "INSERT OR IGNORE INTO user_listen_list (user_id, album_id) VALUES (?1, ?2)",
            params![user_id, album_id],
        )?;
        tx.commit()?;
        Ok(if inserted == 1 {
            ListenListChange::Added
        } else {
            ListenListChange::AlreadyPresent
        })
    }

    fn remove_from_listen_list(&self, user_id: &str, album_id: &str) -> Result<bool> {
        let conn = self.lock()?;
        let deleted = conn.execute(
            "DELETE FROM user_listen_list WHERE user_id = ?1 AND album_id = ?2",
            params![user_id, album_id],
        )?;
        Ok(deleted > 0)
    }

    fn get_liked_album_ids(&self, user_id: &str) -> Result<Vec<String>> {
        let conn = self.lock()?;
        string_column(
            &conn,
            "SELECT album_id FROM user_liked_album WHERE user_id = ?1 ORDER BY rowid",
            params![user_id],
        )
    }

    fn set_album_liked(&self, user_id: &str, album_id: &str, liked: bool) -> Result<()> {
        let conn = self.lock()?;
        if liked {
            conn.execute(
                "INSERT OR IGNORE INTO user_liked_album (user_id, album_id) VALUES (?1, ?2)",
                params![user_id, album_id],
            )?;
        } else {
            conn.execute(
                "DELETE FROM user_liked_album WHERE user_id = ?1 AND album_id = ?2",
                params![user_id, album_id],
            )?;
        }
        Ok(())
    }
}
