// src/tests/router_tests/booking_tests.rs
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{
    body_string, get, get_with_session, init_test_app, location_of, post_form_with_session,
    seed_listing, sign_in,
};

#[test]
fn stay_page_quotes_five_nights_by_default() {
    let app = init_test_app();
    let listing_id = seed_listing(&app, "host@example.com", "Fern Gully Cabin", 100);

    // No dates picked yet: the page still shows a full 5-night breakdown.
    let resp = handle(get(&format!("/stay/{listing_id}")), &app).unwrap();
    let body = body_string(resp);
    assert!(body.contains("€100 × 5 nights"));
    assert!(body.contains("€560"));
}

#[test]
fn stay_page_quotes_the_selected_dates() {
    let app = init_test_app();
    let listing_id = seed_listing(&app, "host@example.com", "Fern Gully Cabin", 100);

    let resp = handle(
        get(&format!(
            "/stay/{listing_id}?checkin=2024-06-01&checkout=2024-06-06&guests=2"
        )),
        &app,
    )
    .unwrap();
    let body = body_string(resp);
    assert!(body.contains("€100 × 5 nights"));
    assert!(body.contains("€500"));
    assert!(body.contains("€560"));
    assert!(!body.contains("disabled"));
}

#[test]
fn zero_night_range_disables_the_book_button() {
    let app = init_test_app();
    let listing_id = seed_listing(&app, "host@example.com", "Fern Gully Cabin", 100);

    let resp = handle(
        get(&format!(
            "/stay/{listing_id}?checkin=2024-06-01&checkout=2024-06-01"
        )),
        &app,
    )
    .unwrap();
    let body = body_string(resp);
    // The breakdown still renders (fees only), but booking is gated.
    assert!(body.contains("€100 × 0 nights"));
    assert!(body.contains("disabled"));
}

#[test]
fn booking_freezes_the_560_total_for_a_five_night_stay_at_100() {
    let app = init_test_app();
    let listing_id = seed_listing(&app, "host@example.com", "Fern Gully Cabin", 100);
    let token = sign_in(&app, "guest@example.com");

    let resp = handle(
        post_form_with_session(
            &format!("/stay/{listing_id}/book"),
            "checkin=2024-06-01&checkout=2024-06-06&guests=2",
            &token,
        ),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location_of(&resp), "/account");

    let (nights, subtotal, total, status): (i64, i64, i64, String) = app
        .db
        .with_conn(|conn| {
            conn.query_row(
                "select nights, subtotal, total, status from bookings where listing_id = ?",
                rusqlite::params![listing_id],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
            )
            .map_err(|e| ServerError::DbError(e.to_string()))
        })
        .unwrap();

    assert_eq!(nights, 5);
    assert_eq!(subtotal, 500);
    assert_eq!(total, 560);
    assert_eq!(status, "confirmed");

    // And it shows up on the account page.
    let resp = handle(get_with_session("/account", &token), &app).unwrap();
    let body = body_string(resp);
    assert!(body.contains("Fern Gully Cabin"));
    assert!(body.contains("€560"));
}

#[test]
fn booking_requires_dates_and_positive_nights() {
    let app = init_test_app();
    let listing_id = seed_listing(&app, "host@example.com", "Fern Gully Cabin", 100);
    let token = sign_in(&app, "guest@example.com");

    // Missing dates: the calculator would fall back to five nights, but a
    // real booking insists on a concrete range.
    let result = handle(
        post_form_with_session(&format!("/stay/{listing_id}/book"), "guests=2", &token),
        &app,
    );
    match result {
        Err(ServerError::BadRequest(msg)) => assert!(msg.contains("dates are required")),
        other => panic!("expected BadRequest, got: {:?}", other.map(|r| r.status())),
    }

    // Inverted range.
    let result = handle(
        post_form_with_session(
            &format!("/stay/{listing_id}/book"),
            "checkin=2024-06-06&checkout=2024-06-01&guests=2",
            &token,
        ),
        &app,
    );
    match result {
        Err(ServerError::BadRequest(msg)) => assert!(msg.contains("at least one night")),
        other => panic!("expected BadRequest, got: {:?}", other.map(|r| r.status())),
    }
}

#[test]
fn hosts_cannot_book_their_own_listing() {
    let app = init_test_app();
    let listing_id = seed_listing(&app, "host@example.com", "Fern Gully Cabin", 100);
    let token = sign_in(&app, "host@example.com");

    let result = handle(
        post_form_with_session(
            &format!("/stay/{listing_id}/book"),
            "checkin=2024-06-01&checkout=2024-06-06&guests=2",
            &token,
        ),
        &app,
    );
    match result {
        Err(ServerError::BadRequest(msg)) => assert!(msg.contains("own listing")),
        other => panic!("expected BadRequest, got: {:?}", other.map(|r| r.status())),
    }
}

#[test]
fn booking_redirects_to_login_without_a_session() {
    let app = init_test_app();
    let listing_id = seed_listing(&app, "host@example.com", "Fern Gully Cabin", 100);

    let resp = handle(
        crate::tests::utils::post_form(
            &format!("/stay/{listing_id}/book"),
            "checkin=2024-06-01&checkout=2024-06-06",
        ),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location_of(&resp), "/login");
}

#[test]
fn guest_can_cancel_their_booking_but_nobody_else_can() {
    let app = init_test_app();
    let listing_id = seed_listing(&app, "host@example.com", "Fern Gully Cabin", 100);
    let guest = sign_in(&app, "guest@example.com");
    let stranger = sign_in(&app, "stranger@example.com");

    handle(
        post_form_with_session(
            &format!("/stay/{listing_id}/book"),
            "checkin=2024-06-01&checkout=2024-06-06&guests=2",
            &guest,
        ),
        &app,
    )
    .unwrap();

    let booking_id: i64 = app
        .db
        .with_conn(|conn| {
            conn.query_row("select id from bookings", [], |r| r.get(0))
                .map_err(|e| ServerError::DbError(e.to_string()))
        })
        .unwrap();

    let result = handle(
        post_form_with_session(&format!("/bookings/{booking_id}/cancel"), "", &stranger),
        &app,
    );
    assert!(matches!(result, Err(ServerError::Unauthorized(_))));

    let resp = handle(
        post_form_with_session(&format!("/bookings/{booking_id}/cancel"), "", &guest),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 302);

    let status: String = app
        .db
        .with_conn(|conn| {
            conn.query_row(
                "select status from bookings where id = ?",
                rusqlite::params![booking_id],
                |r| r.get(0),
            )
            .map_err(|e| ServerError::DbError(e.to_string()))
        })
        .unwrap();
    assert_eq!(status, "cancelled");
}

#[test]
fn favorite_toggle_is_idempotent_over_two_posts() {
    let app = init_test_app();
    let listing_id = seed_listing(&app, "host@example.com", "Fern Gully Cabin", 100);
    let token = sign_in(&app, "guest@example.com");

    for _ in 0..2 {
        let resp = handle(
            post_form_with_session(&format!("/stay/{listing_id}/favorite"), "", &token),
            &app,
        )
        .unwrap();
        assert_eq!(resp.status(), 302);
    }

    let count: i64 = app
        .db
        .with_conn(|conn| {
            conn.query_row("select count(*) from favorites", [], |r| r.get(0))
                .map_err(|e| ServerError::DbError(e.to_string()))
        })
        .unwrap();
    assert_eq!(count, 0);
}
