use std::time::{SystemTime, UNIX_EPOCH};

use astra::{Body, Response};
use http::{Method, Request as HttpRequest};
use std::io::Read;

use crate::app::App;
use crate::auth::sessions;
use crate::db::auth as db_auth;
use crate::db::connection::{init_db, Database};
use crate::db::publish;
use crate::domain::draft::ListingDraft;

/// Fresh app over a fresh temp-file database using the production schema.
pub fn init_test_app() -> App {
    let path = std::env::temp_dir().join(format!(
        "naturestay_test_{}_{}.sqlite",
        std::process::id(),
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    let db = Database::new(path.to_string_lossy().to_string());
    init_db(&db, "sql/schema.sql").unwrap_or_else(|e| panic!("Database initialization failed: {e}"));
    App::new(db)
}

pub fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

/// Create (or reuse) a user and hand back a valid session cookie value.
pub fn sign_in(app: &App, email: &str) -> String {
    app.db
        .with_conn(|conn| {
            let user_id = db_auth::get_or_create_user(conn, email, now_unix())?;
            sessions::create_session(conn, user_id, now_unix())
        })
        .unwrap()
}

pub fn user_id_of(app: &App, email: &str) -> i64 {
    app.db
        .with_conn(|conn| db_auth::get_or_create_user(conn, email, now_unix()))
        .unwrap()
}

/// Publish a minimal listing for `host_email` and return its id.
pub fn seed_listing(app: &App, host_email: &str, name: &str, base_price: i64) -> i64 {
    let host_id = user_id_of(app, host_email);

    let mut draft = ListingDraft::default();
    draft.general.name = name.to_string();
    draft.general.property_type = "cabin".to_string();
    draft.pricing.base_price = Some(base_price);
    draft.stay_details.max_guests = Some(4);

    app.db
        .with_conn(|conn| publish::publish_listing(conn, host_id, &draft, now_unix()))
        .unwrap()
}

pub fn get(uri: &str) -> astra::Request {
    HttpRequest::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn get_with_session(uri: &str, session_token: &str) -> astra::Request {
    HttpRequest::builder()
        .method(Method::GET)
        .uri(uri)
        .header("Cookie", format!("session={session_token}"))
        .body(Body::empty())
        .unwrap()
}

pub fn post_form(uri: &str, body: &str) -> astra::Request {
    HttpRequest::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(body.as_bytes().to_vec()))
        .unwrap()
}

pub fn post_form_with_session(uri: &str, body: &str, session_token: &str) -> astra::Request {
    HttpRequest::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .header("Cookie", format!("session={session_token}"))
        .body(Body::from(body.as_bytes().to_vec()))
        .unwrap()
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

pub fn location_of(resp: &Response) -> String {
    resp.headers()
        .get("Location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}
