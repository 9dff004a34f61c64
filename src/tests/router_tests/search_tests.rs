// src/tests/router_tests/search_tests.rs
use crate::router::handle;
use crate::tests::utils::{body_string, get, init_test_app, seed_listing};

#[test]
fn home_page_lists_published_stays() {
    let app = init_test_app();
    seed_listing(&app, "host@example.com", "Birch Hollow", 90);

    let resp = handle(get("/"), &app).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Birch Hollow"));
}

#[test]
fn search_without_filters_shows_everything() {
    let app = init_test_app();
    seed_listing(&app, "host@example.com", "Birch Hollow", 90);
    seed_listing(&app, "host@example.com", "Mossy Ridge Treehouse", 140);

    let resp = handle(get("/search"), &app).unwrap();
    let body = body_string(resp);
    assert!(body.contains("Birch Hollow"));
    assert!(body.contains("Mossy Ridge Treehouse"));
}

#[test]
fn price_filter_narrows_the_results() {
    let app = init_test_app();
    seed_listing(&app, "host@example.com", "Birch Hollow", 90);
    seed_listing(&app, "host@example.com", "Stone Bridge Lodge", 250);

    let resp = handle(get("/search?max_price=100"), &app).unwrap();
    let body = body_string(resp);
    assert!(body.contains("Birch Hollow"));
    assert!(!body.contains("Stone Bridge Lodge"));
}

#[test]
fn type_filter_round_trips_through_the_form() {
    let app = init_test_app();
    seed_listing(&app, "host@example.com", "Birch Hollow", 90);

    // The same comma-joined value the filter form produces in the URL.
    let resp = handle(get("/search?types=cabin%2Cyurt"), &app).unwrap();
    let body = body_string(resp);
    assert!(body.contains("Birch Hollow"));

    // The cabin checkbox is rendered checked so the selection survives reload.
    assert!(body.contains("checked"));

    let resp = handle(get("/search?types=treehouse"), &app).unwrap();
    let body = body_string(resp);
    assert!(!body.contains("Birch Hollow"));
    assert!(body.contains("Nothing matches"));
}

#[test]
fn unknown_stay_is_a_not_found() {
    let app = init_test_app();

    let result = handle(get("/stay/424242"), &app);
    assert!(matches!(result, Err(crate::errors::ServerError::NotFound)));
}
