// src/db/profiles.rs
use crate::errors::ServerError;
use rusqlite::{params, Connection, OptionalExtension};

#[derive(Debug, Clone, Default)]
pub struct ProfileInfo {
    pub display_name: String,
    pub home_region: String,
}

/// A user without a profile row just gets the defaults; the account page
/// renders them as empty fields rather than failing.
pub fn get_profile(conn: &Connection, user_id: i64) -> Result<ProfileInfo, ServerError> {
    let row = conn
        .query_row(
            "select display_name, home_region from profiles where user_id = ?",
            params![user_id],
            |r| {
                Ok(ProfileInfo {
                    display_name: r.get(0)?,
                    home_region: r.get(1)?,
                })
            },
        )
        .optional()
        .map_err(|e| ServerError::DbError(format!("select profile failed: {e}")))?;

    Ok(row.unwrap_or_default())
}

pub fn upsert_profile(
    conn: &Connection,
    user_id: i64,
    display_name: &str,
    home_region: &str,
    now: i64,
) -> Result<(), ServerError> {
    conn.execute(
        r#"
        insert into profiles (user_id, display_name, home_region, updated_at)
        values (?1, ?2, ?3, ?4)
        on conflict(user_id) do update set
            display_name = excluded.display_name,
            home_region = excluded.home_region,
            updated_at = excluded.updated_at
        "#,
        params![user_id, display_name.trim(), home_region.trim(), now],
    )
    .map_err(|e| ServerError::DbError(format!("upsert profile failed: {e}")))?;
    Ok(())
}
