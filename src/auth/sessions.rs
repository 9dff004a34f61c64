// src/auth/sessions.rs
use crate::auth::token::{generate_token_default, hash_token};
use crate::errors::ServerError;
use rusqlite::{params, Connection, OptionalExtension};

/// Sessions last a week; signing in again just issues a fresh one.
const SESSION_TTL_SECS: i64 = 60 * 60 * 24 * 7;

pub const SESSION_COOKIE: &str = "session";

pub fn create_session(conn: &Connection, user_id: i64, now: i64) -> Result<String, ServerError> {
    let raw_token = generate_token_default();
    let hash = hash_token(&raw_token);
    let expires_at = now + SESSION_TTL_SECS;

    conn.execute(
        r#"
        insert into sessions (user_id, token_hash, created_at, expires_at)
        values (?, ?, ?, ?)
        "#,
        params![user_id, hash.as_slice(), now, expires_at],
    )
    .map_err(|e| ServerError::DbError(format!("create session failed: {e}")))?;

    Ok(raw_token)
}

/// Resolve a session cookie to `(user_id, email)`, ignoring expired and
/// revoked sessions.
pub fn load_user_from_session(
    conn: &Connection,
    raw_token: &str,
    now: i64,
) -> Result<Option<(i64, String)>, ServerError> {
    let hash = hash_token(raw_token);

    conn.query_row(
        r#"
        select u.id, u.email
        from sessions s
        join users u on u.id = s.user_id
        where s.token_hash = ?
          and s.expires_at > ?
          and s.revoked_at is null
        "#,
        params![hash.as_slice(), now],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("session lookup failed: {e}")))
}

/// Sign-out: mark the session revoked rather than deleting the row, so a
/// stolen cookie can't be replayed and the history stays auditable.
pub fn revoke_session(conn: &Connection, raw_token: &str, now: i64) -> Result<(), ServerError> {
    let hash = hash_token(raw_token);

    conn.execute(
        "update sessions set revoked_at = ? where token_hash = ? and revoked_at is null",
        params![now, hash.as_slice()],
    )
    .map_err(|e| ServerError::DbError(format!("revoke session failed: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply_schema(conn: &Connection) {
        conn.execute_batch(include_str!("../../sql/schema.sql")).unwrap();
    }

    fn make_user(conn: &Connection, email: &str) -> i64 {
        conn.execute(
            "insert into users (email, created_at) values (?, ?)",
            params![email, 1000],
        )
        .unwrap();
        conn.last_insert_rowid()
    }

    #[test]
    fn created_session_loads_back_the_user() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn);
        let user_id = make_user(&conn, "fern@example.com");

        let token = create_session(&conn, user_id, 1000).unwrap();
        let loaded = load_user_from_session(&conn, &token, 1001).unwrap();
        assert_eq!(loaded, Some((user_id, "fern@example.com".to_string())));
    }

    #[test]
    fn expired_session_does_not_load() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn);
        let user_id = make_user(&conn, "moss@example.com");

        let token = create_session(&conn, user_id, 1000).unwrap();
        let much_later = 1000 + SESSION_TTL_SECS + 1;
        assert_eq!(load_user_from_session(&conn, &token, much_later).unwrap(), None);
    }

    #[test]
    fn revoked_session_does_not_load() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn);
        let user_id = make_user(&conn, "pine@example.com");

        let token = create_session(&conn, user_id, 1000).unwrap();
        revoke_session(&conn, &token, 1005).unwrap();
        assert_eq!(load_user_from_session(&conn, &token, 1006).unwrap(), None);
    }

    #[test]
    fn wrong_token_does_not_load() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn);
        let user_id = make_user(&conn, "cedar@example.com");

        create_session(&conn, user_id, 1000).unwrap();
        assert_eq!(
            load_user_from_session(&conn, "not-a-real-token", 1001).unwrap(),
            None
        );
    }
}
