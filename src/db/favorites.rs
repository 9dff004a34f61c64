// src/db/favorites.rs
use crate::errors::ServerError;
use rusqlite::{params, Connection};

/// Add the listing to the user's favorites, or remove it if it's already
/// there. Returns true when the listing is now favorited.
pub fn toggle_favorite(
    conn: &Connection,
    user_id: i64,
    listing_id: i64,
    now: i64,
) -> Result<bool, ServerError> {
    let removed = conn
        .execute(
            "delete from favorites where user_id = ? and listing_id = ?",
            params![user_id, listing_id],
        )
        .map_err(|e| ServerError::DbError(format!("remove favorite failed: {e}")))?;

    if removed > 0 {
        return Ok(false);
    }

    conn.execute(
        "insert into favorites (user_id, listing_id, created_at) values (?, ?, ?)",
        params![user_id, listing_id, now],
    )
    .map_err(|e| ServerError::DbError(format!("insert favorite failed: {e}")))?;

    Ok(true)
}

pub fn is_favorite(conn: &Connection, user_id: i64, listing_id: i64) -> Result<bool, ServerError> {
    let count: i64 = conn
        .query_row(
            "select count(*) from favorites where user_id = ? and listing_id = ?",
            params![user_id, listing_id],
            |r| r.get(0),
        )
        .map_err(|e| ServerError::DbError(format!("favorite lookup failed: {e}")))?;
    Ok(count > 0)
}
