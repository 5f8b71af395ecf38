use super::{count, exists, list_album_ids, list_from_row, load_list, new_id, SqliteRiffStore};
use crate::store::models::*;
use crate::store::trait_def::ListStore;
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Params};

const LIST_COLUMNS: &str = "id, user_id, name, description, is_public, created";

fn load_lists<P: Params>(conn: &Connection, sql: &str, params: P) -> Result<Vec<UserList>> {
    let mut stmt = conn.prepare(sql)?;
    let mut lists = stmt
        .query_map(params, list_from_row)?
        .collect::<Result<Vec<UserList>, _>>()?;
    for list in lists.iter_mut() {
        list.album_ids = list_album_ids(conn, &list.id)?;
    }
    Ok(lists)
}

impl ListStore for SqliteRiffStore {
    fn create_list(&self, new_list: &NewUserList) -> Result<UserList> {
        let conn = self.lock()?;
        let list_id = new_id();
        conn.execute(
            "INSERT INTO user_list (id, user_id, name, description, is_public) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                list_id,
                new_list.user_id,
                new_list.name,
                new_list.description,
                new_list.is_public
            ],
        )?;
        load_list(&conn, &list_id)?.context("Created list vanished")
    }

    fn get_list(&self, list_id: &str) -> Result<Option<UserList>> {
        let conn = self.lock()?;
        load_list(&conn, list_id)
    }

    fn get_user_lists(&self, user_id: &str, include_private: bool) -> Result<Vec<UserList>> {
        let conn = self.lock()?;
        load_lists(
            &conn,
            &format!(
                "SELECT {} FROM user_list WHERE user_id = ?1 AND (is_public = 1 OR ?2) \
                 ORDER BY created DESC, rowid DESC",
                LIST_COLUMNS
            ),
            params![user_id, include_private],
        )
    }

    fn get_public_lists(&self, limit: usize) -> Result<Vec<UserList>> {
        let conn = self.lock()?;
        load_lists(
            &conn,
            &format!(
                "SELECT {} FROM user_list WHERE is_public = 1 ORDER BY created DESC, rowid DESC LIMIT ?1",
                LIST_COLUMNS
            ),
            params![limit as i64],
        )
    }

    fn add_album_to_list(&self, list_id: &str, album_id: &str) -> Result<bool> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        if exists(
            &tx,
            "SELECT 1 FROM user_list_album WHERE list_id = ?1 AND album_id = ?2",
            params![list_id, album_id],
        )? {
            return Ok(false);
        }
        let position = count(
            &tx,
            "SELECT COUNT(*) FROM user_list_album WHERE list_id = ?1",
            params![list_id],
        )?;
        tx.execute(
            "INSERT INTO user_list_album (list_id, album_id, position) VALUES (?1, ?2, ?3)",
            params![list_id, album_id, position as i64],
        )?;
        tx.commit()?;
        Ok(true)
    }

    fn remove_album_from_list(&self, list_id: &str, album_id: &str) -> Result<bool> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let position: Option<i64> = tx
            .query_row(
                "SELECT position FROM user_list_album WHERE list_id = ?1 AND album_id = ?2",
                params![list_id, album_id],
                |row| row.get(0),
            )
            .optional()?;
        let Some(position) = position else {
            return Ok(false);
        };
        tx.execute(
            "DELETE FROM user_list_album WHERE list_id = ?1 AND album_id = ?2",
            params![list_id, album_id],
        )?;
        tx.execute(
            "UPDATE user_list_album SET position = position - 1 WHERE list_id = ?1 AND position > ?2",
            params![list_id, position],
        )?;
        tx.commit()?;
        Ok(true)
    }

    fn delete_list(&self, list_id: &str) -> Result<bool> {
        let conn = self.lock()?;
        let deleted = conn.execute("DELETE FROM user_list WHERE id = ?1", params![list_id])?;
        Ok(deleted > 0)
    }
}
