// src/db/bookings.rs
use crate::domain::quote::PriceBreakdown;
use crate::errors::ServerError;
use rusqlite::{params, Connection, OptionalExtension};
use time::OffsetDateTime;

#[derive(Debug, Clone)]
pub struct BookingRow {
    pub id: i64,
    pub listing_id: i64,
    pub listing_name: String,
    pub checkin: String,
    pub checkout: String,
    pub guests: i64,
    pub nights: i64,
    pub total: i64,
    pub status: String,
}

/// Record a confirmed booking with the price breakdown frozen at booking
/// time, so later price edits on the listing don't rewrite history.
pub fn create_booking(
    conn: &Connection,
    guest_id: i64,
    listing_id: i64,
    checkin: &str,
    checkout: &str,
    guests: i64,
    quote: &PriceBreakdown,
    now: i64,
) -> Result<i64, ServerError> {
    conn.execute(
        r#"
        insert into bookings (
            listing_id, guest_id, checkin, checkout, guests,
            nights, subtotal, cleaning_fee, service_fee, total,
            status, created_at
        ) values (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 'confirmed', ?)
        "#,
        params![
            listing_id,
            guest_id,
            checkin,
            checkout,
            guests,
            quote.nights,
            quote.subtotal,
            quote.cleaning_fee,
            quote.service_fee,
            quote.total,
            now,
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert booking failed: {e}")))?;

    Ok(conn.last_insert_rowid())
}

pub fn bookings_for_guest(conn: &Connection, guest_id: i64) -> Result<Vec<BookingRow>, ServerError> {
    let mut stmt = conn
        .prepare(
            r#"
            select
                b.id,       -- 0
                b.listing_id, -- 1
                l.name,     -- 2
                b.checkin,  -- 3
                b.checkout, -- 4
                b.guests,   -- 5
                b.nights,   -- 6
                b.total,    -- 7
                b.status    -- 8
            from bookings b
            join listings l on l.id = b.listing_id
            where b.guest_id = ?
            order by b.created_at desc, b.id desc
            "#,
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map(params![guest_id], |row| {
            Ok(BookingRow {
                id: row.get(0)?,
                listing_id: row.get(1)?,
                listing_name: row.get(2)?,
                checkin: row.get(3)?,
                checkout: row.get(4)?,
                guests: row.get(5)?,
                nights: row.get(6)?,
                total: row.get(7)?,
                status: row.get(8)?,
            })
        })
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}

/// Cancel a booking. Only the guest who made it may cancel, and only while
/// it is still confirmed; the row is kept with status 'cancelled'.
pub fn cancel_booking(
    conn: &Connection,
    booking_id: i64,
    guest_id: i64,
) -> Result<(), ServerError> {
    let updated = conn
        .execute(
            "update bookings set status = 'cancelled'
             where id = ? and guest_id = ? and status = 'confirmed'",
            params![booking_id, guest_id],
        )
        .map_err(|e| ServerError::DbError(format!("cancel booking failed: {e}")))?;

    if updated == 1 {
        return Ok(());
    }

    // Nothing changed; work out why so the caller gets the right error.
    let owner: Option<(i64, String)> = conn
        .query_row(
            "select guest_id, status from bookings where id = ?",
            params![booking_id],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .optional()
        .map_err(|e| ServerError::DbError(format!("booking lookup failed: {e}")))?;

    match owner {
        None => Err(ServerError::NotFound),
        Some((owner_id, _)) if owner_id != guest_id => {
            Err(ServerError::Unauthorized("not the booking's guest".into()))
        }
        Some((_, status)) => Err(ServerError::BadRequest(format!(
            "booking is already {status}"
        ))),
    }
}

/// Bookings received across a host's listings in the current calendar
/// month (UTC), shown on the host dashboard.
pub fn count_host_bookings_this_month(
    conn: &Connection,
    host_id: i64,
    now: i64,
) -> Result<i64, ServerError> {
    let dt = OffsetDateTime::from_unix_timestamp(now).unwrap_or_else(|_| OffsetDateTime::now_utc());

    // Replace day with 1 and time with midnight to get start of month
    let start_of_month = dt
        .replace_day(1)
        .unwrap_or(dt) // Day 1 is valid for every month, so this is just type safety
        .replace_time(time::Time::MIDNIGHT)
        .unix_timestamp();

    let count: i64 = conn
        .query_row(
            r#"
            select count(*)
            from bookings b
            join listings l on l.id = b.listing_id
            where l.host_id = ? and b.created_at >= ? and b.status = 'confirmed'
            "#,
            params![host_id, start_of_month],
            |r| r.get(0),
        )
        .map_err(|e| ServerError::DbError(format!("count host bookings failed: {e}")))?;

    Ok(count)
}
