// src/db/publish.rs
//
// Turning one accumulated draft into a listing row plus its satellite
// tables. The primary insert runs first and produces the listing id every
// satellite write is scoped by; the whole fan-out lives inside a single
// transaction, so a failed satellite write leaves no primary row behind.

use rusqlite::{params, Connection, Transaction};

use crate::domain::draft::ListingDraft;
use crate::errors::ServerError;

/// Guests covered by the base nightly price; per-person pricing starts
/// above this.
const INCLUDED_GUESTS: i64 = 2;

/// Publish a draft for the given host. Returns the new listing id.
pub fn publish_listing(
    conn: &mut Connection,
    host_id: i64,
    draft: &ListingDraft,
    now: i64,
) -> Result<i64, ServerError> {
    draft
        .validate_for_publish()
        .map_err(ServerError::BadRequest)?;

    let tx = conn
        .transaction()
        .map_err(|e| ServerError::DbError(format!("begin publish tx failed: {e}")))?;

    let listing_id = insert_listing(&tx, host_id, draft, now)?;

    insert_images(&tx, listing_id, draft)?;
    insert_tier_prices(&tx, listing_id, draft)?;
    insert_person_prices(&tx, listing_id, draft)?;
    insert_amenities(&tx, listing_id, draft)?;
    insert_sustainability(&tx, listing_id, draft)?;
    insert_house_rules(&tx, listing_id, draft)?;
    insert_extra_costs(&tx, listing_id, draft)?;
    insert_included_facilities(&tx, listing_id, draft)?;
    insert_bedrooms(&tx, listing_id, draft)?;
    insert_submission(&tx, listing_id, draft, now)?;

    tx.commit()
        .map_err(|e| ServerError::DbError(format!("commit publish tx failed: {e}")))?;

    Ok(listing_id)
}

fn insert_listing(
    tx: &Transaction<'_>,
    host_id: i64,
    draft: &ListingDraft,
    now: i64,
) -> Result<i64, ServerError> {
    let g = &draft.general;
    let loc = &draft.location;
    let p = &draft.pricing;
    let s = &draft.stay_details;

    tx.execute(
        r#"
        insert into listings (
            host_id, name, property_type, summary,
            country, region, city, street, postal_code,
            base_price, extra_person_price, deposit_policy, deposit_amount,
            min_nights, max_guests, open_from, open_until,
            checkin_from, checkin_until, checkout_until,
            description, surroundings, created_at
        ) values (
            ?1, ?2, ?3, ?4,
            ?5, ?6, ?7, ?8, ?9,
            ?10, ?11, ?12, ?13,
            ?14, ?15, ?16, ?17,
            ?18, ?19, ?20,
            ?21, ?22, ?23
        )
        "#,
        params![
            host_id,
            g.name.trim(),
            if g.property_type.is_empty() { "cabin" } else { &g.property_type },
            g.summary,
            loc.country,
            loc.region,
            loc.city,
            loc.street,
            loc.postal_code,
            p.base_price.unwrap_or(0),
            p.extra_person_price,
            p.deposit_policy.as_str(),
            p.deposit_amount,
            draft.availability.min_nights.unwrap_or(1),
            s.max_guests.unwrap_or(2),
            draft.calendar.open_from,
            draft.calendar.open_until,
            if s.checkin_from.is_empty() { "15:00" } else { &s.checkin_from },
            if s.checkin_until.is_empty() { "20:00" } else { &s.checkin_until },
            if s.checkout_until.is_empty() { "11:00" } else { &s.checkout_until },
            draft.description.description,
            draft.description.surroundings,
            now,
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert listing failed: {e}")))?;

    Ok(tx.last_insert_rowid())
}

fn insert_images(
    tx: &Transaction<'_>,
    listing_id: i64,
    draft: &ListingDraft,
) -> Result<(), ServerError> {
    for (position, photo) in draft.photos.iter().enumerate() {
        tx.execute(
            "insert into listing_images (listing_id, url, caption, position) values (?, ?, ?, ?)",
            params![listing_id, photo.url, photo.caption, position as i64],
        )
        .map_err(|e| ServerError::DbError(format!("insert listing image failed: {e}")))?;
    }
    Ok(())
}

fn insert_tier_prices(
    tx: &Transaction<'_>,
    listing_id: i64,
    draft: &ListingDraft,
) -> Result<(), ServerError> {
    for (tier, price) in &draft.pricing.tier_prices {
        tx.execute(
            "insert into listing_tier_prices (listing_id, tier, price) values (?, ?, ?)",
            params![listing_id, tier, price],
        )
        .map_err(|e| ServerError::DbError(format!("insert tier price failed: {e}")))?;
    }
    Ok(())
}

/// Per-guest-count totals above the included two guests, derived from the
/// base price and the per-extra-person price.
fn insert_person_prices(
    tx: &Transaction<'_>,
    listing_id: i64,
    draft: &ListingDraft,
) -> Result<(), ServerError> {
    let Some(extra) = draft.pricing.extra_person_price else {
        return Ok(());
    };
    let base = draft.pricing.base_price.unwrap_or(0);
    let max_guests = draft.stay_details.max_guests.unwrap_or(INCLUDED_GUESTS);

    for guests in (INCLUDED_GUESTS + 1)..=max_guests {
        let price = base + extra * (guests - INCLUDED_GUESTS);
        tx.execute(
            "insert into listing_person_prices (listing_id, guests, price) values (?, ?, ?)",
            params![listing_id, guests, price],
        )
        .map_err(|e| ServerError::DbError(format!("insert person price failed: {e}")))?;
    }
    Ok(())
}

fn insert_amenities(
    tx: &Transaction<'_>,
    listing_id: i64,
    draft: &ListingDraft,
) -> Result<(), ServerError> {
    for amenity in &draft.stay_details.amenities {
        tx.execute(
            "insert or ignore into listing_amenities (listing_id, amenity) values (?, ?)",
            params![listing_id, amenity],
        )
        .map_err(|e| ServerError::DbError(format!("insert amenity failed: {e}")))?;
    }
    Ok(())
}

fn insert_sustainability(
    tx: &Transaction<'_>,
    listing_id: i64,
    draft: &ListingDraft,
) -> Result<(), ServerError> {
    for (question_id, answer) in &draft.sustainability {
        tx.execute(
            "insert into listing_sustainability (listing_id, question_id, answer) values (?, ?, ?)",
            params![listing_id, question_id, answer],
        )
        .map_err(|e| ServerError::DbError(format!("insert sustainability answer failed: {e}")))?;
    }
    Ok(())
}

fn insert_house_rules(
    tx: &Transaction<'_>,
    listing_id: i64,
    draft: &ListingDraft,
) -> Result<(), ServerError> {
    let r = &draft.house_rules;

    tx.execute(
        r#"
        insert into listing_house_rules (
            listing_id, max_babies, max_pets, min_child_age, min_booking_age,
            smoking_allowed, pets_allowed, parties_allowed,
            quiet_hours_start, quiet_hours_end
        ) values (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
        params![
            listing_id,
            r.max_babies,
            r.max_pets,
            r.min_child_age,
            r.min_booking_age.unwrap_or(18),
            r.smoking_allowed as i64,
            r.pets_allowed as i64,
            r.parties_allowed as i64,
            r.quiet_hours_start,
            r.quiet_hours_end,
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert house rules failed: {e}")))?;

    // One row per custom rule the host typed in.
    for rule in &r.custom_rules {
        let rule = rule.trim();
        if rule.is_empty() {
            continue;
        }
        tx.execute(
            "insert into listing_custom_rules (listing_id, rule) values (?, ?)",
            params![listing_id, rule],
        )
        .map_err(|e| ServerError::DbError(format!("insert custom rule failed: {e}")))?;
    }
    Ok(())
}

fn insert_extra_costs(
    tx: &Transaction<'_>,
    listing_id: i64,
    draft: &ListingDraft,
) -> Result<(), ServerError> {
    for cost in &draft.pricing.extra_costs {
        tx.execute(
            "insert into listing_extra_costs (listing_id, label, amount) values (?, ?, ?)",
            params![listing_id, cost.label, cost.amount],
        )
        .map_err(|e| ServerError::DbError(format!("insert extra cost failed: {e}")))?;
    }
    Ok(())
}

fn insert_included_facilities(
    tx: &Transaction<'_>,
    listing_id: i64,
    draft: &ListingDraft,
) -> Result<(), ServerError> {
    for facility in &draft.pricing.included_facilities {
        tx.execute(
            "insert into listing_included_facilities (listing_id, facility) values (?, ?)",
            params![listing_id, facility],
        )
        .map_err(|e| ServerError::DbError(format!("insert included facility failed: {e}")))?;
    }
    Ok(())
}

fn insert_bedrooms(
    tx: &Transaction<'_>,
    listing_id: i64,
    draft: &ListingDraft,
) -> Result<(), ServerError> {
    for room in &draft.bedrooms {
        tx.execute(
            "insert into listing_bedrooms (listing_id, name, single_beds, double_beds) values (?, ?, ?, ?)",
            params![listing_id, room.name, room.single_beds, room.double_beds],
        )
        .map_err(|e| ServerError::DbError(format!("insert bedroom failed: {e}")))?;
    }
    Ok(())
}

/// Keep the raw submission around for debugging host reports.
fn insert_submission(
    tx: &Transaction<'_>,
    listing_id: i64,
    draft: &ListingDraft,
    now: i64,
) -> Result<(), ServerError> {
    let raw_json =
        serde_json::to_string(draft).map_err(|e| ServerError::DbError(e.to_string()))?;

    tx.execute(
        "insert into listing_submissions (listing_id, submitted_at, raw_json) values (?, ?, ?)",
        params![listing_id, now, raw_json],
    )
    .map_err(|e| ServerError::DbError(format!("insert submission failed: {e}")))?;
    Ok(())
}
