// src/tests/router_tests/auth_tests.rs
use crate::auth::magic::{MagicLinkConfig, MagicLinkService};
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{
    body_string, get, get_with_session, init_test_app, location_of, now_unix, post_form, sign_in,
};

#[test]
fn login_page_loads_successfully() {
    let app = init_test_app();

    let resp = handle(get("/login"), &app).expect("Failed to handle request");

    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("Sign in"));
    assert!(body.contains("form"));
}

#[test]
fn request_link_returns_partial_html_for_swap() {
    let app = init_test_app();
    let email = "guest@example.com";

    let resp = handle(
        post_form("/auth/request-link", &format!("email={email}")),
        &app,
    )
    .expect("Failed to handle request");

    assert_eq!(resp.status(), 200);
    let body = body_string(resp);

    // Verify success message
    assert!(body.contains("Check your email"));
    assert!(body.contains(email));

    // Verify it is a partial (no full html structure), so it can be
    // swapped in place of the login form
    assert!(!body.contains("<!DOCTYPE html>"));
    assert!(!body.contains("<html"));
}

#[test]
fn request_link_rejects_invalid_email() {
    let app = init_test_app();

    let result = handle(post_form("/auth/request-link", "email=not-an-email"), &app);
    match result {
        Err(ServerError::BadRequest(_)) => {}
        other => panic!("expected BadRequest, got: {:?}", other.map(|r| r.status())),
    }
}

#[test]
fn magic_link_redeem_sets_session_and_redirects_to_account() {
    let app = init_test_app();

    // Issue a magic link
    let token = app
        .db
        .with_conn(|conn| {
            let svc = MagicLinkService::new(MagicLinkConfig::default());
            let issued = svc.request_link(conn, "c@d.com", now_unix())?;
            Ok(issued.token)
        })
        .unwrap();

    let resp = handle(get(&format!("/auth/magic?token={token}")), &app).unwrap();

    assert_eq!(resp.status(), 302);
    assert_eq!(location_of(&resp), "/account");

    let cookie = resp
        .headers()
        .get("Set-Cookie")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(cookie.starts_with("session="));
    assert!(cookie.contains("HttpOnly"));

    // The link is single-use
    let second = handle(get(&format!("/auth/magic?token={token}")), &app);
    match second {
        Err(ServerError::Unauthorized(_)) => {}
        other => panic!("expected Unauthorized, got: {:?}", other.map(|r| r.status())),
    }
}

#[test]
fn account_redirects_to_login_without_a_session() {
    let app = init_test_app();

    let resp = handle(get("/account"), &app).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location_of(&resp), "/login");
}

#[test]
fn account_shows_the_signed_in_email() {
    let app = init_test_app();
    let token = sign_in(&app, "dash@example.com");

    let resp = handle(get_with_session("/account", &token), &app).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(
        body.contains("dash@example.com"),
        "Account body did not contain expected email"
    );
}

#[test]
fn logout_revokes_the_session() {
    let app = init_test_app();
    let token = sign_in(&app, "out@example.com");

    let resp = handle(
        crate::tests::utils::post_form_with_session("/auth/logout", "", &token),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 302);

    // The old cookie no longer signs the user in.
    let resp = handle(get_with_session("/account", &token), &app).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location_of(&resp), "/login");
}
