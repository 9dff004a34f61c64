use crate::app::App;
use crate::db::connection::{init_db, Database};
use crate::responses::html_error_response;
use crate::router::handle;
use astra::Server;
use std::net::SocketAddr;
use std::time::{SystemTime, UNIX_EPOCH};

mod app;
mod auth;
mod catalog;
mod db;
mod domain;
mod drafts;
mod errors;
mod mailer;
mod responses;
mod router;
mod seed;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    let db_path = std::env::var("NATURESTAY_DB").unwrap_or_else(|_| "naturestay.sqlite3".into());
    let db = Database::new(db_path);

    if let Err(e) = init_db(&db, "sql/schema.sql") {
        eprintln!("❌ Database initialization failed: {e}");
        std::process::exit(1);
    }

    // `naturestay seed` fills the database with synthetic data and exits.
    if std::env::args().nth(1).as_deref() == Some("seed") {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64;
        if let Err(e) = seed::run(&db, now) {
            eprintln!("❌ Seeding failed: {e}");
            std::process::exit(1);
        }
        return;
    }

    let app = App::from_env(db);
    if app.mailer.is_none() {
        println!("No BREVO_API_KEY set; magic links will be printed to stdout.");
    }

    let addr: SocketAddr = std::env::var("NATURESTAY_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:3000".into())
        .parse()
        .expect("NATURESTAY_ADDR must be host:port");
    println!("Starting server at http://{addr}");

    let server = Server::bind(&addr).max_workers(8);

    let result = server.serve(move |req, _info| match handle(req, &app) {
        Ok(resp) => resp,
        Err(err) => html_error_response(err),
    });

    if let Err(e) = result {
        eprintln!("Server ended with error: {e}");
    }

    println!("Server shut down cleanly.");
}
