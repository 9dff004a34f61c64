use crate::db::connection::Database;
use crate::domain::filters::FilterSet;
use crate::errors::ServerError;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

/// The card-sized view of a listing used by the home and search pages.
#[derive(Debug, Clone)]
pub struct ListingSummary {
    pub id: i64,
    pub name: String,
    pub property_type: String,
    pub city: String,
    pub region: String,
    pub country: String,
    pub base_price: i64,
    pub rating: f64,
    pub cover_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ListingDetail {
    pub id: i64,
    pub host_id: i64,
    pub name: String,
    pub property_type: String,
    pub summary: String,
    pub country: String,
    pub region: String,
    pub city: String,
    pub street: String,
    pub base_price: i64,
    pub extra_person_price: Option<i64>,
    pub deposit_policy: String,
    pub deposit_amount: Option<i64>,
    pub min_nights: i64,
    pub max_guests: i64,
    pub checkin_from: String,
    pub checkin_until: String,
    pub checkout_until: String,
    pub description: String,
    pub surroundings: String,
    pub rating: f64,

    pub images: Vec<(String, String)>,         // (url, caption)
    pub amenities: Vec<String>,                // amenity slugs
    pub sustainability: Vec<(String, String)>, // (question_id, answer)
    pub house_rules: Option<HouseRuleRow>,
    pub custom_rules: Vec<String>,
    pub extra_costs: Vec<(String, i64)>, // (label, amount)
    pub included_facilities: Vec<String>,
    pub bedrooms: Vec<(String, i64, i64)>, // (name, single beds, double beds)
    pub tier_prices: Vec<(String, i64)>,   // (tier, price)
}

#[derive(Debug, Clone)]
pub struct HouseRuleRow {
    pub max_babies: i64,
    pub max_pets: i64,
    pub min_child_age: Option<i64>,
    pub min_booking_age: i64,
    pub smoking_allowed: bool,
    pub pets_allowed: bool,
    pub parties_allowed: bool,
    pub quiet_hours_start: Option<String>,
    pub quiet_hours_end: Option<String>,
}

const SUMMARY_SELECT: &str = r#"
    select
        l.id,            -- 0
        l.name,          -- 1
        l.property_type, -- 2
        l.city,          -- 3
        l.region,        -- 4
        l.country,       -- 5
        l.base_price,    -- 6
        l.rating,        -- 7
        (select i.url from listing_images i
         where i.listing_id = l.id
         order by i.position, i.id limit 1) -- 8
    from listings l
"#;

fn summary_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ListingSummary> {
    Ok(ListingSummary {
        id: row.get(0)?,
        name: row.get(1)?,
        property_type: row.get(2)?,
        city: row.get(3)?,
        region: row.get(4)?,
        country: row.get(5)?,
        base_price: row.get(6)?,
        rating: row.get(7)?,
        cover_url: row.get(8)?,
    })
}

/// Top-rated listings for the home page.
pub fn featured_listings(db: &Database, limit: i64) -> Result<Vec<ListingSummary>, ServerError> {
    db.with_conn(|conn| {
        let sql = format!("{SUMMARY_SELECT} order by l.rating desc, l.id limit ?");
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let rows = stmt
            .query_map(params![limit], summary_from_row)
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
        }
        Ok(out)
    })
}

/// Search with the active filters composed into the WHERE clause:
/// property type is an OR within the selected set, every selected amenity
/// must be present, and price/rating are simple bounds.
pub fn search_listings(
    db: &Database,
    filters: &FilterSet,
) -> Result<Vec<ListingSummary>, ServerError> {
    db.with_conn(|conn| {
        let mut sql = format!("{SUMMARY_SELECT} where 1=1");
        let mut args: Vec<Value> = Vec::new();

        if !filters.property_types.is_empty() {
            let placeholders = vec!["?"; filters.property_types.len()].join(", ");
            sql.push_str(&format!(" and l.property_type in ({placeholders})"));
            for t in &filters.property_types {
                args.push(Value::Text(t.clone()));
            }
        }

        for amenity in &filters.amenities {
            sql.push_str(
                " and exists (select 1 from listing_amenities a
                  where a.listing_id = l.id and a.amenity = ?)",
            );
            args.push(Value::Text(amenity.clone()));
        }

        if let Some(max_price) = filters.max_price {
            sql.push_str(" and l.base_price <= ?");
            args.push(Value::Integer(max_price));
        }

        if let Some(min_rating) = filters.min_rating {
            sql.push_str(" and l.rating >= ?");
            args.push(Value::Real(min_rating));
        }

        sql.push_str(" order by l.rating desc, l.id");

        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let rows = stmt
            .query_map(params_from_iter(args), summary_from_row)
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
        }
        Ok(out)
    })
}

/// Listings owned by one host, newest first.
pub fn listings_for_host(db: &Database, host_id: i64) -> Result<Vec<ListingSummary>, ServerError> {
    db.with_conn(|conn| {
        let sql = format!("{SUMMARY_SELECT} where l.host_id = ? order by l.created_at desc, l.id desc");
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let rows = stmt
            .query_map(params![host_id], summary_from_row)
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
        }
        Ok(out)
    })
}

/// The listings a user has saved, most recently saved first.
pub fn favorites_for_user(db: &Database, user_id: i64) -> Result<Vec<ListingSummary>, ServerError> {
    db.with_conn(|conn| {
        let sql = format!(
            "{SUMMARY_SELECT}
             join favorites f on f.listing_id = l.id
             where f.user_id = ?
             order by f.created_at desc, f.id desc"
        );
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let rows = stmt
            .query_map(params![user_id], summary_from_row)
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
        }
        Ok(out)
    })
}

/// Everything the stay page needs, or None for an unknown id.
pub fn get_listing(db: &Database, listing_id: i64) -> Result<Option<ListingDetail>, ServerError> {
    db.with_conn(|conn| {
        let head = conn
            .query_row(
                r#"
                select
                    l.id,                 -- 0
                    l.host_id,            -- 1
                    l.name,               -- 2
                    l.property_type,      -- 3
                    l.summary,            -- 4
                    l.country,            -- 5
                    l.region,             -- 6
                    l.city,               -- 7
                    l.street,             -- 8
                    l.base_price,         -- 9
                    l.extra_person_price, -- 10
                    l.deposit_policy,     -- 11
                    l.deposit_amount,     -- 12
                    l.min_nights,         -- 13
                    l.max_guests,         -- 14
                    l.checkin_from,       -- 15
                    l.checkin_until,      -- 16
                    l.checkout_until,     -- 17
                    l.description,        -- 18
                    l.surroundings,       -- 19
                    l.rating              -- 20
                from listings l
                where l.id = ?
                "#,
                params![listing_id],
                |row| {
                    Ok(ListingDetail {
                        id: row.get(0)?,
                        host_id: row.get(1)?,
                        name: row.get(2)?,
                        property_type: row.get(3)?,
                        summary: row.get(4)?,
                        country: row.get(5)?,
                        region: row.get(6)?,
                        city: row.get(7)?,
                        street: row.get(8)?,
                        base_price: row.get(9)?,
                        extra_person_price: row.get(10)?,
                        deposit_policy: row.get(11)?,
                        deposit_amount: row.get(12)?,
                        min_nights: row.get(13)?,
                        max_guests: row.get(14)?,
                        checkin_from: row.get(15)?,
                        checkin_until: row.get(16)?,
                        checkout_until: row.get(17)?,
                        description: row.get(18)?,
                        surroundings: row.get(19)?,
                        rating: row.get(20)?,
                        images: Vec::new(),
                        amenities: Vec::new(),
                        sustainability: Vec::new(),
                        house_rules: None,
                        custom_rules: Vec::new(),
                        extra_costs: Vec::new(),
                        included_facilities: Vec::new(),
                        bedrooms: Vec::new(),
                        tier_prices: Vec::new(),
                    })
                },
            )
            .optional()
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let Some(mut detail) = head else {
            return Ok(None);
        };

        detail.images = pairs(
            conn,
            "select url, caption from listing_images where listing_id = ? order by position, id",
            listing_id,
        )?;
        detail.amenities = singles(
            conn,
            "select amenity from listing_amenities where listing_id = ? order by amenity",
            listing_id,
        )?;
        detail.sustainability = pairs(
            conn,
            "select question_id, answer from listing_sustainability where listing_id = ? order by question_id",
            listing_id,
        )?;
        detail.custom_rules = singles(
            conn,
            "select rule from listing_custom_rules where listing_id = ? order by id",
            listing_id,
        )?;
        detail.included_facilities = singles(
            conn,
            "select facility from listing_included_facilities where listing_id = ? order by id",
            listing_id,
        )?;

        detail.house_rules = conn
            .query_row(
                r#"
                select max_babies, max_pets, min_child_age, min_booking_age,
                       smoking_allowed, pets_allowed, parties_allowed,
                       quiet_hours_start, quiet_hours_end
                from listing_house_rules
                where listing_id = ?
                "#,
                params![listing_id],
                |row| {
                    Ok(HouseRuleRow {
                        max_babies: row.get(0)?,
                        max_pets: row.get(1)?,
                        min_child_age: row.get(2)?,
                        min_booking_age: row.get(3)?,
                        smoking_allowed: row.get::<_, i64>(4)? != 0,
                        pets_allowed: row.get::<_, i64>(5)? != 0,
                        parties_allowed: row.get::<_, i64>(6)? != 0,
                        quiet_hours_start: row.get(7)?,
                        quiet_hours_end: row.get(8)?,
                    })
                },
            )
            .optional()
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        {
            let mut stmt = conn
                .prepare("select label, amount from listing_extra_costs where listing_id = ? order by id")
                .map_err(|e| ServerError::DbError(e.to_string()))?;
            let rows = stmt
                .query_map(params![listing_id], |r| Ok((r.get(0)?, r.get(1)?)))
                .map_err(|e| ServerError::DbError(e.to_string()))?;
            for r in rows {
                detail
                    .extra_costs
                    .push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
            }
        }

        {
            let mut stmt = conn
                .prepare("select tier, price from listing_tier_prices where listing_id = ? order by id")
                .map_err(|e| ServerError::DbError(e.to_string()))?;
            let rows = stmt
                .query_map(params![listing_id], |r| Ok((r.get(0)?, r.get(1)?)))
                .map_err(|e| ServerError::DbError(e.to_string()))?;
            for r in rows {
                detail
                    .tier_prices
                    .push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
            }
        }

        {
            let mut stmt = conn
                .prepare(
                    "select name, single_beds, double_beds from listing_bedrooms
                     where listing_id = ? order by id",
                )
                .map_err(|e| ServerError::DbError(e.to_string()))?;
            let rows = stmt
                .query_map(params![listing_id], |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)))
                .map_err(|e| ServerError::DbError(e.to_string()))?;
            for r in rows {
                detail
                    .bedrooms
                    .push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
            }
        }

        Ok(Some(detail))
    })
}

fn singles(conn: &Connection, sql: &str, listing_id: i64) -> Result<Vec<String>, ServerError> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| ServerError::DbError(e.to_string()))?;
    let rows = stmt
        .query_map(params![listing_id], |r| r.get::<_, String>(0))
        .map_err(|e| ServerError::DbError(e.to_string()))?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}

fn pairs(
    conn: &Connection,
    sql: &str,
    listing_id: i64,
) -> Result<Vec<(String, String)>, ServerError> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| ServerError::DbError(e.to_string()))?;
    let rows = stmt
        .query_map(params![listing_id], |r| Ok((r.get(0)?, r.get(1)?)))
        .map_err(|e| ServerError::DbError(e.to_string()))?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}
