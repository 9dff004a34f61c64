use std::collections::BTreeMap;
use std::io::Read;
use std::time::{SystemTime, UNIX_EPOCH};

use astra::Request;

use crate::app::App;
use crate::auth::magic::{MagicLinkConfig, MagicLinkService};
use crate::auth::sessions;
use crate::catalog;
use crate::db::{bookings, favorites, listings, profiles, publish};
use crate::domain::draft::{
    AvailabilityFacts, BedroomDraft, CalendarFacts, DepositPolicy, DescriptionFacts, DraftPatch,
    ExtraCost, GeneralFacts, HouseRules, LocationFacts, PhotoDraft, PricingFacts, StayDetailFacts,
    PRICE_TIERS,
};
use crate::domain::filters::FilterSet;
use crate::domain::quote;
use crate::domain::wizard::Step;
use crate::errors::ServerError;
use crate::responses::{css_response, html_response, redirect_response, ResultResp};
use crate::templates::pages;
use crate::templates::pages::account::AccountVm;
use crate::templates::pages::host::HostVm;
use crate::templates::pages::stay::StayVm;

const MAIN_CSS: &str = include_str!("../static/main.css");

pub fn handle(mut req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let query = req.uri().query().unwrap_or("").to_string();

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match (method.as_str(), segments.as_slice()) {
        ("GET", []) => home(&req, app),
        ("GET", ["static", "main.css"]) => css_response(MAIN_CSS),

        ("GET", ["search"]) => search(&req, app, &query),

        ("GET", ["login"]) => html_response(pages::login_page()),
        ("POST", ["auth", "request-link"]) => request_link(&mut req, app),
        ("GET", ["auth", "magic"]) => redeem_magic(app, &query),
        ("POST", ["auth", "logout"]) => logout(&req, app),

        ("GET", ["stay", id]) => stay(&req, app, parse_id(id)?, &query),
        ("POST", ["stay", id, "favorite"]) => toggle_favorite(&req, app, parse_id(id)?),
        ("POST", ["stay", id, "book"]) => book(&mut req, app, parse_id(id)?),

        ("GET", ["account"]) => account(&req, app),
        ("POST", ["account", "profile"]) => update_profile(&mut req, app),
        ("POST", ["bookings", id, "cancel"]) => cancel_booking(&req, app, parse_id(id)?),

        ("GET", ["host"]) => host_dashboard(&req, app),
        ("GET", ["host", "new"]) => wizard_entry(&req, app),
        ("GET", ["host", "new", slug]) => wizard_step(&req, app, slug),
        ("POST", ["host", "new", "publish"]) => wizard_publish(&req, app),
        ("POST", ["host", "new", "cancel"]) => wizard_cancel(&req, app),
        ("POST", ["host", "new", slug]) => {
            let slug = slug.to_string();
            wizard_apply(&mut req, app, &slug)
        }

        _ => Err(ServerError::NotFound),
    }
}

// ---------------------------------------------------------------------------
// Guest-facing pages
// ---------------------------------------------------------------------------

fn home(req: &Request, app: &App) -> ResultResp {
    let signed_in = current_user(req, app)?.is_some();
    let featured = listings::featured_listings(&app.db, 6)?;
    html_response(pages::home_page(&featured, signed_in))
}

fn search(req: &Request, app: &App, query: &str) -> ResultResp {
    let signed_in = current_user(req, app)?.is_some();
    let filters = FilterSet::from_query(query);
    let results = listings::search_listings(&app.db, &filters)?;
    html_response(pages::search_page(&filters, &results, signed_in))
}

fn stay(req: &Request, app: &App, listing_id: i64, query: &str) -> ResultResp {
    let user = current_user(req, app)?;

    let Some(listing) = listings::get_listing(&app.db, listing_id)? else {
        return Err(ServerError::NotFound);
    };

    let params = parse_query_pairs(query);
    let checkin = first(&params, "checkin").map(str::to_string);
    let checkout = first(&params, "checkout").map(str::to_string);
    let guests = first(&params, "guests")
        .and_then(|g| g.parse().ok())
        .unwrap_or(2);

    let quote = quote::quote(listing.base_price, checkin.as_deref(), checkout.as_deref());

    let is_favorite = match &user {
        Some((user_id, _)) => app
            .db
            .with_conn(|conn| favorites::is_favorite(conn, *user_id, listing_id))?,
        None => false,
    };

    html_response(pages::stay_page(&StayVm {
        listing: &listing,
        quote,
        checkin,
        checkout,
        guests,
        signed_in: user.is_some(),
        is_favorite,
    }))
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

fn request_link(req: &mut Request, app: &App) -> ResultResp {
    let form = read_form(req)?;
    let email = first(&form, "email").unwrap_or("").to_string();
    let now = now_unix();

    let issued = app.db.with_conn(|conn| {
        let svc = MagicLinkService::new(MagicLinkConfig::default());
        svc.request_link(conn, &email, now)
    })?;

    match &app.mailer {
        Some(mailer) => {
            if let Err(e) = mailer.send_magic_link(&issued.email, &issued.link) {
                eprintln!("⚠️ magic link mail to {} failed: {e}", issued.email);
            }
        }
        None => println!("Magic link for {}: {}", issued.email, issued.link),
    }

    // Partial only: swapped in place of the login form.
    html_response(pages::check_email_content(&issued.email))
}

fn redeem_magic(app: &App, query: &str) -> ResultResp {
    let params = parse_query_pairs(query);
    let token = first(&params, "token").unwrap_or("").to_string();
    let now = now_unix();

    let session_token = app.db.with_conn(|conn| {
        let svc = MagicLinkService::new(MagicLinkConfig::default());
        let redeemed = svc.redeem(conn, &token, now)?;
        sessions::create_session(conn, redeemed.user_id, now)
    })?;

    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age=604800",
        sessions::SESSION_COOKIE,
        session_token
    );
    redirect_response("/account", Some(cookie))
}

fn logout(req: &Request, app: &App) -> ResultResp {
    if let Some(token) = session_token(req) {
        app.db
            .with_conn(|conn| sessions::revoke_session(conn, &token, now_unix()))?;
    }

    let cookie = format!("{}=; Path=/; HttpOnly; Max-Age=0", sessions::SESSION_COOKIE);
    redirect_response("/", Some(cookie))
}

// ---------------------------------------------------------------------------
// Bookings and favorites
// ---------------------------------------------------------------------------

fn book(req: &mut Request, app: &App, listing_id: i64) -> ResultResp {
    let Some((user_id, _)) = current_user(req, app)? else {
        return redirect_response("/login", None);
    };

    let form = read_form(req)?;
    let checkin = first(&form, "checkin").unwrap_or("").trim().to_string();
    let checkout = first(&form, "checkout").unwrap_or("").trim().to_string();
    let guests: i64 = first(&form, "guests").and_then(|g| g.parse().ok()).unwrap_or(1);

    let Some(listing) = listings::get_listing(&app.db, listing_id)? else {
        return Err(ServerError::NotFound);
    };

    if listing.host_id == user_id {
        return Err(ServerError::BadRequest(
            "you can't book your own listing".into(),
        ));
    }

    let mut problems = Vec::new();
    if quote::parse_stay_date(&checkin).is_none() || quote::parse_stay_date(&checkout).is_none() {
        problems.push("check-in and check-out dates are required");
    }
    if guests < 1 {
        problems.push("at least one guest is required");
    } else if guests > listing.max_guests {
        problems.push("too many guests for this stay");
    }
    if !problems.is_empty() {
        return Err(ServerError::BadRequest(problems.join(", ")));
    }

    let q = quote::quote(listing.base_price, Some(&checkin), Some(&checkout));
    if !q.is_bookable() {
        return Err(ServerError::BadRequest(
            "the stay must be at least one night".into(),
        ));
    }

    app.db.with_conn(|conn| {
        bookings::create_booking(
            conn, user_id, listing_id, &checkin, &checkout, guests, &q, now_unix(),
        )
    })?;

    redirect_response("/account", None)
}

fn toggle_favorite(req: &Request, app: &App, listing_id: i64) -> ResultResp {
    let Some((user_id, _)) = current_user(req, app)? else {
        return redirect_response("/login", None);
    };

    if listings::get_listing(&app.db, listing_id)?.is_none() {
        return Err(ServerError::NotFound);
    }

    app.db
        .with_conn(|conn| favorites::toggle_favorite(conn, user_id, listing_id, now_unix()))?;

    redirect_response(&format!("/stay/{listing_id}"), None)
}

fn cancel_booking(req: &Request, app: &App, booking_id: i64) -> ResultResp {
    let Some((user_id, _)) = current_user(req, app)? else {
        return redirect_response("/login", None);
    };

    app.db
        .with_conn(|conn| bookings::cancel_booking(conn, booking_id, user_id))?;

    redirect_response("/account", None)
}

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

fn account(req: &Request, app: &App) -> ResultResp {
    let Some((user_id, email)) = current_user(req, app)? else {
        return redirect_response("/login", None);
    };

    let profile = app.db.with_conn(|conn| profiles::get_profile(conn, user_id))?;
    let my_bookings = app
        .db
        .with_conn(|conn| bookings::bookings_for_guest(conn, user_id))?;
    let saved = listings::favorites_for_user(&app.db, user_id)?;

    html_response(pages::account_page(&AccountVm {
        email,
        profile,
        bookings: my_bookings,
        favorites: saved,
    }))
}

fn update_profile(req: &mut Request, app: &App) -> ResultResp {
    let Some((user_id, _)) = current_user(req, app)? else {
        return redirect_response("/login", None);
    };

    let form = read_form(req)?;
    let display_name = first(&form, "display_name").unwrap_or("").to_string();
    let home_region = first(&form, "home_region").unwrap_or("").to_string();

    app.db.with_conn(|conn| {
        profiles::upsert_profile(conn, user_id, &display_name, &home_region, now_unix())
    })?;

    redirect_response("/account", None)
}

// ---------------------------------------------------------------------------
// Host area and the listing wizard
// ---------------------------------------------------------------------------

fn host_dashboard(req: &Request, app: &App) -> ResultResp {
    let Some((user_id, _)) = current_user(req, app)? else {
        return redirect_response("/login", None);
    };

    let my_listings = listings::listings_for_host(&app.db, user_id)?;
    let bookings_this_month = app
        .db
        .with_conn(|conn| bookings::count_host_bookings_this_month(conn, user_id, now_unix()))?;
    let has_open_draft = app.drafts.snapshot(user_id)?.is_some();

    html_response(pages::host_page(&HostVm {
        listings: my_listings,
        bookings_this_month,
        has_open_draft,
    }))
}

/// Entry point: continue an open draft where it was left, otherwise start
/// a fresh one at the first step.
fn wizard_entry(req: &Request, app: &App) -> ResultResp {
    let Some((user_id, _)) = current_user(req, app)? else {
        return redirect_response("/login", None);
    };

    let current = match app.drafts.snapshot(user_id)? {
        Some(state) => state.current,
        None => {
            app.drafts.reset(user_id)?;
            Step::General
        }
    };

    redirect_response(&format!("/host/new/{}", current.slug()), None)
}

fn wizard_step(req: &Request, app: &App, slug: &str) -> ResultResp {
    let Some((user_id, _)) = current_user(req, app)? else {
        return redirect_response("/login", None);
    };

    let Some(step) = Step::from_slug(slug) else {
        return Err(ServerError::NotFound);
    };

    // Sidebar navigation is unconditional and leaves completions alone.
    let state = app.drafts.with_state(user_id, |state| {
        state.visit(step);
        Ok(state.clone())
    })?;

    html_response(pages::wizard_page(&state))
}

fn wizard_apply(req: &mut Request, app: &App, slug: &str) -> ResultResp {
    let Some((user_id, _)) = current_user(req, app)? else {
        return redirect_response("/login", None);
    };

    let Some(step) = Step::from_slug(slug) else {
        return Err(ServerError::NotFound);
    };

    let form = read_form(req)?;
    let patch = patch_from_form(step, &form);

    let next = app.drafts.with_state(user_id, |state| {
        state.visit(step);
        state.update(patch);
        state.advance();
        Ok(state.current)
    })?;

    redirect_response(&format!("/host/new/{}", next.slug()), None)
}

fn wizard_publish(req: &Request, app: &App) -> ResultResp {
    let Some((user_id, _)) = current_user(req, app)? else {
        return redirect_response("/login", None);
    };

    let Some(state) = app.drafts.snapshot(user_id)? else {
        return Err(ServerError::BadRequest("no draft to publish".into()));
    };

    let listing_id = app
        .db
        .with_conn(|conn| publish::publish_listing(conn, user_id, &state.draft, now_unix()))?;

    app.drafts.discard(user_id)?;
    println!("🏡 listing {listing_id} published by user {user_id}");

    redirect_response("/host", None)
}

fn wizard_cancel(req: &Request, app: &App) -> ResultResp {
    let Some((user_id, _)) = current_user(req, app)? else {
        return redirect_response("/login", None);
    };

    app.drafts.discard(user_id)?;
    redirect_response("/host", None)
}

// ---------------------------------------------------------------------------
// Wizard form parsing: one section patch per step
// ---------------------------------------------------------------------------

fn patch_from_form(step: Step, form: &[(String, String)]) -> DraftPatch {
    match step {
        Step::General => DraftPatch::General(GeneralFacts {
            name: text(form, "name"),
            property_type: text(form, "property_type"),
            summary: text(form, "summary"),
        }),
        Step::Location => DraftPatch::Location(LocationFacts {
            country: text(form, "country"),
            region: text(form, "region"),
            city: text(form, "city"),
            street: text(form, "street"),
            postal_code: text(form, "postal_code"),
        }),
        Step::Photos => DraftPatch::Photos(parse_photos(&text(form, "photos"))),
        Step::Pricing => DraftPatch::Pricing(parse_pricing(form)),
        Step::Availability => DraftPatch::Availability(AvailabilityFacts {
            min_nights: number(form, "min_nights"),
        }),
        Step::Calendar => DraftPatch::Calendar(CalendarFacts {
            open_from: nonempty(form, "open_from"),
            open_until: nonempty(form, "open_until"),
        }),
        Step::Bedrooms => DraftPatch::Bedrooms(parse_bedrooms(&text(form, "bedrooms"))),
        Step::Description => DraftPatch::Description(DescriptionFacts {
            description: text(form, "description"),
            surroundings: text(form, "surroundings"),
        }),
        Step::StayDetails => DraftPatch::StayDetails(StayDetailFacts {
            checkin_from: text(form, "checkin_from"),
            checkin_until: text(form, "checkin_until"),
            checkout_until: text(form, "checkout_until"),
            max_guests: number(form, "max_guests"),
            amenities: all(form, "amenities"),
        }),
        Step::Sustainability => {
            let mut answers = BTreeMap::new();
            for (qid, _) in catalog::SUSTAINABILITY_QUESTIONS {
                if let Some(answer) = nonempty(form, &format!("q_{qid}")) {
                    if answer == "yes" || answer == "no" {
                        answers.insert((*qid).to_string(), answer);
                    }
                }
            }
            DraftPatch::Sustainability(answers)
        }
        Step::HouseRules => DraftPatch::HouseRules(HouseRules {
            max_babies: number(form, "max_babies").unwrap_or(0),
            max_pets: number(form, "max_pets").unwrap_or(0),
            min_child_age: number(form, "min_child_age"),
            min_booking_age: number(form, "min_booking_age"),
            smoking_allowed: checkbox(form, "smoking_allowed"),
            pets_allowed: checkbox(form, "pets_allowed"),
            parties_allowed: checkbox(form, "parties_allowed"),
            quiet_hours_start: nonempty(form, "quiet_hours_start"),
            quiet_hours_end: nonempty(form, "quiet_hours_end"),
            custom_rules: lines(&text(form, "custom_rules")),
        }),
    }
}

fn parse_pricing(form: &[(String, String)]) -> PricingFacts {
    let mut tier_prices = BTreeMap::new();
    for (tier, _) in PRICE_TIERS {
        if let Some(price) = number(form, &format!("tier_{tier}")) {
            tier_prices.insert((*tier).to_string(), price);
        }
    }

    PricingFacts {
        base_price: number(form, "base_price"),
        included_facilities: lines(&text(form, "included_facilities")),
        deposit_policy: DepositPolicy::from_str(&text(form, "deposit_policy")),
        deposit_amount: number(form, "deposit_amount"),
        tier_prices,
        extra_person_price: number(form, "extra_person_price"),
        extra_costs: parse_extra_costs(&text(form, "extra_costs")),
    }
}

/// "url | caption" per line, caption optional.
fn parse_photos(raw: &str) -> Vec<PhotoDraft> {
    lines(raw)
        .iter()
        .map(|line| {
            let (url, caption) = split_pipe(line);
            PhotoDraft {
                url,
                caption: caption.unwrap_or_default(),
            }
        })
        .collect()
}

/// "label | amount" per line; lines without a number are dropped.
fn parse_extra_costs(raw: &str) -> Vec<ExtraCost> {
    lines(raw)
        .iter()
        .filter_map(|line| {
            let (label, rest) = split_pipe(line);
            let amount: i64 = rest?.parse().ok()?;
            Some(ExtraCost { label, amount })
        })
        .collect()
}

/// "name | singles | doubles" per line; missing counts default to zero.
fn parse_bedrooms(raw: &str) -> Vec<BedroomDraft> {
    lines(raw)
        .iter()
        .map(|line| {
            let mut parts = line.splitn(3, '|').map(str::trim);
            BedroomDraft {
                name: parts.next().unwrap_or("").to_string(),
                single_beds: parts.next().and_then(|p| p.parse().ok()).unwrap_or(0),
                double_beds: parts.next().and_then(|p| p.parse().ok()).unwrap_or(0),
            }
        })
        .collect()
}

fn split_pipe(line: &str) -> (String, Option<String>) {
    match line.split_once('|') {
        Some((head, tail)) => (head.trim().to_string(), Some(tail.trim().to_string())),
        None => (line.trim().to_string(), None),
    }
}

fn lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Request plumbing
// ---------------------------------------------------------------------------

fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

fn parse_id(raw: &str) -> Result<i64, ServerError> {
    raw.parse().map_err(|_| ServerError::NotFound)
}

/// Decode query or form bytes into ordered (key, value) pairs. Repeated
/// keys are kept, which is how checkbox groups arrive.
fn parse_query_pairs(raw: &str) -> Vec<(String, String)> {
    url::form_urlencoded::parse(raw.as_bytes())
        .into_owned()
        .collect()
}

fn read_form(req: &mut Request) -> Result<Vec<(String, String)>, ServerError> {
    let mut body = Vec::new();
    req.body_mut()
        .reader()
        .read_to_end(&mut body)
        .map_err(|_| ServerError::BadRequest("unreadable request body".into()))?;

    Ok(url::form_urlencoded::parse(&body).into_owned().collect())
}

fn first<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

fn all(pairs: &[(String, String)], key: &str) -> Vec<String> {
    pairs
        .iter()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
        .collect()
}

fn text(pairs: &[(String, String)], key: &str) -> String {
    first(pairs, key).unwrap_or("").trim().to_string()
}

fn nonempty(pairs: &[(String, String)], key: &str) -> Option<String> {
    let v = text(pairs, key);
    if v.is_empty() {
        None
    } else {
        Some(v)
    }
}

fn number(pairs: &[(String, String)], key: &str) -> Option<i64> {
    first(pairs, key).and_then(|v| v.trim().parse().ok())
}

fn checkbox(pairs: &[(String, String)], key: &str) -> bool {
    first(pairs, key).is_some()
}

fn session_token(req: &Request) -> Option<String> {
    let cookie_header = req.headers().get("Cookie")?.to_str().ok()?;

    for part in cookie_header.split(';') {
        let part = part.trim();
        if let Some((name, value)) = part.split_once('=') {
            if name == sessions::SESSION_COOKIE {
                return Some(value.to_string());
            }
        }
    }
    None
}

/// Resolve the session cookie to `(user_id, email)`, if any.
fn current_user(req: &Request, app: &App) -> Result<Option<(i64, String)>, ServerError> {
    let Some(token) = session_token(req) else {
        return Ok(None);
    };

    app.db
        .with_conn(|conn| sessions::load_user_from_session(conn, &token, now_unix()))
}
