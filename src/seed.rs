// src/seed.rs
//
// Development seeding: `naturestay seed` fills the database with synthetic
// hosts, guests, listings, bookings and favorites. Listings go through the
// same publish fan-out the wizard uses, so seeded data matches what real
// hosts produce.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rusqlite::params;

use crate::catalog;
use crate::db::connection::Database;
use crate::db::{auth as db_auth, bookings, favorites, publish};
use crate::domain::draft::{BedroomDraft, ExtraCost, ListingDraft, PhotoDraft};
use crate::domain::quote;
use crate::errors::ServerError;

const HOSTS: &[(&str, &str)] = &[
    ("astrid@naturestay.example", "Astrid"),
    ("bjorn@naturestay.example", "Bjørn"),
    ("elena@naturestay.example", "Elena"),
];

const GUESTS: &[&str] = &[
    "maja@example.com",
    "tom@example.com",
    "lisa@example.com",
    "jonas@example.com",
];

const PLACES: &[(&str, &str, &str)] = &[
    ("Norway", "Telemark", "Rjukan"),
    ("Norway", "Nordland", "Reine"),
    ("Sweden", "Dalarna", "Sälen"),
    ("Finland", "Lapland", "Levi"),
    ("Austria", "Tyrol", "Alpbach"),
    ("Slovenia", "Upper Carniola", "Bohinj"),
];

const NAMES: &[&str] = &[
    "Fern Gully Cabin",
    "Alder Creek Hut",
    "Birch Hollow",
    "The Old Sawmill Loft",
    "Lakeside Willow Yurt",
    "Mossy Ridge Treehouse",
    "Juniper Farm Stay",
    "Stone Bridge Lodge",
    "Cloudberry Campsite",
    "Pinecone Tiny House",
];

const STAY_RANGES: &[(&str, &str)] = &[
    ("2026-09-04", "2026-09-08"),
    ("2026-09-18", "2026-09-21"),
    ("2026-10-02", "2026-10-09"),
    ("2026-10-23", "2026-10-26"),
];

pub fn run(db: &Database, now: i64) -> Result<(), ServerError> {
    let mut rng = StdRng::seed_from_u64(now as u64);

    println!("🌱 seeding users…");
    let mut host_ids = Vec::new();
    let mut guest_ids = Vec::new();
    db.with_conn(|conn| {
        for (email, name) in HOSTS {
            let id = db_auth::get_or_create_user(conn, email, now)?;
            crate::db::profiles::upsert_profile(conn, id, name, "", now)?;
            host_ids.push(id);
        }
        for email in GUESTS {
            guest_ids.push(db_auth::get_or_create_user(conn, email, now)?);
        }
        Ok(())
    })?;

    println!("🌱 seeding listings…");
    let mut listing_ids = Vec::new();
    for (i, name) in NAMES.iter().enumerate() {
        let host_id = host_ids[i % host_ids.len()];
        let draft = make_draft(&mut rng, name, i);

        let listing_id =
            db.with_conn(|conn| publish::publish_listing(conn, host_id, &draft, now))?;

        // Published listings start unrated; give seeded ones a plausible score.
        let rating = (rng.gen_range(34..=50) as f64) / 10.0;
        db.with_conn(|conn| {
            conn.execute(
                "update listings set rating = ? where id = ?",
                params![rating, listing_id],
            )
            .map_err(|e| ServerError::DbError(format!("seed rating failed: {e}")))?;
            Ok(())
        })?;

        listing_ids.push(listing_id);
    }

    println!("🌱 seeding bookings and favorites…");
    db.with_conn(|conn| {
        for &guest_id in &guest_ids {
            let listing_id = listing_ids[rng.gen_range(0..listing_ids.len())];
            let base_price: i64 = conn
                .query_row(
                    "select base_price from listings where id = ?",
                    params![listing_id],
                    |r| r.get(0),
                )
                .map_err(|e| ServerError::DbError(e.to_string()))?;

            let (checkin, checkout) = STAY_RANGES[rng.gen_range(0..STAY_RANGES.len())];
            let q = quote::quote(base_price, Some(checkin), Some(checkout));
            bookings::create_booking(
                conn, guest_id, listing_id, checkin, checkout, 2, &q, now,
            )?;

            let favorite = listing_ids[rng.gen_range(0..listing_ids.len())];
            favorites::toggle_favorite(conn, guest_id, favorite, now)?;
        }
        Ok(())
    })?;

    println!(
        "✅ seeded {} users, {} listings, {} bookings",
        HOSTS.len() + GUESTS.len(),
        listing_ids.len(),
        guest_ids.len()
    );
    Ok(())
}

fn make_draft(rng: &mut StdRng, name: &str, index: usize) -> ListingDraft {
    let (country, region, city) = PLACES[index % PLACES.len()];
    let (property_type, _) = catalog::PROPERTY_TYPES[index % catalog::PROPERTY_TYPES.len()];

    let mut draft = ListingDraft::default();
    draft.general.name = name.to_string();
    draft.general.property_type = property_type.to_string();
    draft.general.summary = format!("A quiet {} near {}", property_type.replace('_', " "), city);

    draft.location.country = country.to_string();
    draft.location.region = region.to_string();
    draft.location.city = city.to_string();

    draft.photos = vec![PhotoDraft {
        url: format!("https://photos.naturestay.example/{}.jpg", index + 1),
        caption: String::new(),
    }];

    draft.pricing.base_price = Some(rng.gen_range(60..220));
    draft.pricing.extra_person_price = Some(rng.gen_range(10..25));
    draft.pricing.included_facilities = vec!["Firewood".to_string(), "Linens".to_string()];
    draft.pricing.extra_costs = vec![ExtraCost {
        label: "Final cleaning".to_string(),
        amount: 30,
    }];
    draft
        .pricing
        .tier_prices
        .insert("weekend".to_string(), draft.pricing.base_price.unwrap() + 20);

    draft.availability.min_nights = Some(rng.gen_range(1..4));

    draft.bedrooms = vec![BedroomDraft {
        name: "Main room".to_string(),
        single_beds: rng.gen_range(0..3),
        double_beds: 1,
    }];

    draft.description.description = format!(
        "{} sits at the edge of the woods outside {}. Wake up to birdsong, \
         make coffee on the wood stove, and walk straight onto the trails.",
        name, city
    );
    draft.description.surroundings =
        "Marked hiking trails, a swimmable lake and a village shop within reach.".to_string();

    draft.stay_details.max_guests = Some(rng.gen_range(2..7));
    draft.stay_details.checkin_from = "15:00".to_string();
    draft.stay_details.checkin_until = "20:00".to_string();
    draft.stay_details.checkout_until = "11:00".to_string();

    // A couple of amenities per listing, rotating through the catalog.
    for offset in 0..3 {
        let (amenity, _) = catalog::AMENITIES[(index + offset * 3) % catalog::AMENITIES.len()];
        draft.stay_details.amenities.push(amenity.to_string());
    }

    for (i, (qid, _)) in catalog::SUSTAINABILITY_QUESTIONS.iter().enumerate() {
        let answer = if (index + i) % 3 == 0 { "no" } else { "yes" };
        draft
            .sustainability
            .insert((*qid).to_string(), answer.to_string());
    }

    draft.house_rules.max_pets = 1;
    draft.house_rules.pets_allowed = index % 2 == 0;
    draft.house_rules.min_booking_age = Some(18);
    draft.house_rules.quiet_hours_start = Some("22:00".to_string());
    draft.house_rules.quiet_hours_end = Some("07:00".to_string());
    draft.house_rules.custom_rules = vec!["Leave the firewood rack as full as you found it".to_string()];

    draft
}
