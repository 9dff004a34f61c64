// src/tests/router_tests/wizard_tests.rs
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{
    body_string, get_with_session, init_test_app, location_of, post_form_with_session, sign_in,
    user_id_of,
};

#[test]
fn wizard_entry_redirects_to_the_first_step() {
    let app = init_test_app();
    let token = sign_in(&app, "host@example.com");

    let resp = handle(get_with_session("/host/new", &token), &app).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location_of(&resp), "/host/new/general");
}

#[test]
fn next_walks_the_eleven_steps_in_order() {
    let app = init_test_app();
    let token = sign_in(&app, "host@example.com");
    handle(get_with_session("/host/new", &token), &app).unwrap();

    let expected = [
        ("general", "location"),
        ("location", "photos"),
        ("photos", "pricing"),
        ("pricing", "availability"),
        ("availability", "calendar"),
        ("calendar", "bedrooms"),
        ("bedrooms", "description"),
        ("description", "stay_details"),
        ("stay_details", "sustainability"),
        ("sustainability", "house_rules"),
        // The last step has no successor; "Save" stays put.
        ("house_rules", "house_rules"),
    ];

    for (step, next) in expected {
        let resp = handle(
            post_form_with_session(&format!("/host/new/{step}"), "", &token),
            &app,
        )
        .unwrap();
        assert_eq!(resp.status(), 302);
        assert_eq!(location_of(&resp), format!("/host/new/{next}"));
    }
}

#[test]
fn sidebar_jump_changes_the_step_but_not_the_completions() {
    let app = init_test_app();
    let token = sign_in(&app, "host@example.com");
    handle(get_with_session("/host/new", &token), &app).unwrap();

    // Complete the first two steps.
    handle(
        post_form_with_session("/host/new/general", "name=Birch+Hollow&property_type=cabin", &token),
        &app,
    )
    .unwrap();
    handle(
        post_form_with_session("/host/new/location", "country=Norway", &token),
        &app,
    )
    .unwrap();

    // Jump straight to sustainability via the sidebar.
    let resp = handle(get_with_session("/host/new/sustainability", &token), &app).unwrap();
    let body = body_string(resp);
    assert!(body.contains("2 of 11 steps done"));
    assert!(body.contains("✓ General"));
    assert!(body.contains("✓ Location"));
    assert!(!body.contains("✓ Sustainability"));

    // Jumping back doesn't lose anything either.
    let resp = handle(get_with_session("/host/new/general", &token), &app).unwrap();
    let body = body_string(resp);
    assert!(body.contains("2 of 11 steps done"));
    // The draft kept the edited name.
    assert!(body.contains("Birch Hollow"));
}

#[test]
fn unknown_step_is_a_not_found() {
    let app = init_test_app();
    let token = sign_in(&app, "host@example.com");

    let result = handle(get_with_session("/host/new/payment", &token), &app);
    assert!(matches!(result, Err(ServerError::NotFound)));
}

#[test]
fn wizard_requires_a_session() {
    let app = init_test_app();

    let resp = handle(crate::tests::utils::get("/host/new"), &app).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location_of(&resp), "/login");
}

#[test]
fn publish_fans_the_draft_out_and_clears_it() {
    let app = init_test_app();
    let token = sign_in(&app, "host@example.com");
    let host_id = user_id_of(&app, "host@example.com");
    handle(get_with_session("/host/new", &token), &app).unwrap();

    handle(
        post_form_with_session(
            "/host/new/general",
            "name=Fern+Gully+Cabin&property_type=cabin&summary=Quiet+cabin",
            &token,
        ),
        &app,
    )
    .unwrap();
    handle(
        post_form_with_session(
            "/host/new/location",
            "country=Norway&region=Telemark&city=Rjukan",
            &token,
        ),
        &app,
    )
    .unwrap();
    handle(
        post_form_with_session(
            "/host/new/photos",
            "photos=https%3A%2F%2Fimg.example%2F1.jpg+%7C+The+porch",
            &token,
        ),
        &app,
    )
    .unwrap();
    handle(
        post_form_with_session(
            "/host/new/pricing",
            "base_price=120&tier_weekend=150&extra_person_price=15&deposit_policy=held_on_arrival&deposit_amount=100&included_facilities=Firewood&extra_costs=Pet+cleaning+%7C+20",
            &token,
        ),
        &app,
    )
    .unwrap();
    handle(
        post_form_with_session(
            "/host/new/stay_details",
            "checkin_from=15%3A00&checkin_until=20%3A00&checkout_until=11%3A00&max_guests=4&amenities=sauna&amenities=wifi",
            &token,
        ),
        &app,
    )
    .unwrap();
    handle(
        post_form_with_session(
            "/host/new/sustainability",
            "q_renewable_energy=yes&q_waste_recycling=no",
            &token,
        ),
        &app,
    )
    .unwrap();
    handle(
        post_form_with_session(
            "/host/new/house_rules",
            "max_pets=1&pets_allowed=1&custom_rules=No+campfires",
            &token,
        ),
        &app,
    )
    .unwrap();

    let resp = handle(post_form_with_session("/host/new/publish", "", &token), &app).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location_of(&resp), "/host");

    let (listing_id, name, base_price): (i64, String, i64) = app
        .db
        .with_conn(|conn| {
            conn.query_row(
                "select id, name, base_price from listings where host_id = ?",
                rusqlite::params![host_id],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
            )
            .map_err(|e| ServerError::DbError(e.to_string()))
        })
        .unwrap();
    assert_eq!(name, "Fern Gully Cabin");
    assert_eq!(base_price, 120);

    let satellite_counts: Vec<(&str, i64)> = [
        "listing_images",
        "listing_amenities",
        "listing_sustainability",
        "listing_house_rules",
        "listing_custom_rules",
        "listing_extra_costs",
        "listing_tier_prices",
        "listing_person_prices",
        "listing_submissions",
    ]
    .iter()
    .map(|table| {
        let count: i64 = app
            .db
            .with_conn(|conn| {
                conn.query_row(
                    &format!("select count(*) from {table} where listing_id = ?"),
                    rusqlite::params![listing_id],
                    |r| r.get(0),
                )
                .map_err(|e| ServerError::DbError(e.to_string()))
            })
            .unwrap();
        (*table, count)
    })
    .collect();

    for (table, count) in satellite_counts {
        assert!(count > 0, "expected rows in {table}");
    }

    // The draft is gone: entering the wizard again starts fresh.
    let resp = handle(get_with_session("/host/new", &token), &app).unwrap();
    assert_eq!(location_of(&resp), "/host/new/general");
    let resp = handle(get_with_session("/host/new/general", &token), &app).unwrap();
    let body = body_string(resp);
    assert!(body.contains("0 of 11 steps done"));

    // And the published stay is live on the search page.
    let resp = handle(crate::tests::utils::get("/search"), &app).unwrap();
    assert!(body_string(resp).contains("Fern Gully Cabin"));
}

#[test]
fn publishing_an_empty_draft_reports_all_problems_at_once() {
    let app = init_test_app();
    let token = sign_in(&app, "host@example.com");
    handle(get_with_session("/host/new", &token), &app).unwrap();

    let result = handle(post_form_with_session("/host/new/publish", "", &token), &app);
    match result {
        Err(ServerError::BadRequest(msg)) => {
            assert!(msg.contains("listing name is required"));
            assert!(msg.contains("base nightly price is required"));
        }
        other => panic!("expected BadRequest, got: {:?}", other.map(|r| r.status())),
    }

    // Nothing was written.
    let count: i64 = app
        .db
        .with_conn(|conn| {
            conn.query_row("select count(*) from listings", [], |r| r.get(0))
                .map_err(|e| ServerError::DbError(e.to_string()))
        })
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn discarding_a_draft_loses_all_progress() {
    let app = init_test_app();
    let token = sign_in(&app, "host@example.com");
    handle(get_with_session("/host/new", &token), &app).unwrap();

    handle(
        post_form_with_session("/host/new/general", "name=Doomed+Draft&property_type=yurt", &token),
        &app,
    )
    .unwrap();

    let resp = handle(post_form_with_session("/host/new/cancel", "", &token), &app).unwrap();
    assert_eq!(location_of(&resp), "/host");

    let resp = handle(get_with_session("/host/new/general", &token), &app).unwrap();
    let body = body_string(resp);
    assert!(!body.contains("Doomed Draft"));
    assert!(body.contains("0 of 11 steps done"));
}
