// src/app.rs

use std::sync::Arc;

use crate::db::Database;
use crate::drafts::DraftStore;
use crate::mailer::BrevoMailer;

/// Everything a request handler needs, cloned into the serve closure.
#[derive(Clone)]
pub struct App {
    pub db: Database,
    pub drafts: DraftStore,
    /// Absent when no API key is configured; magic links are then logged
    /// to stdout instead of mailed.
    pub mailer: Option<Arc<BrevoMailer>>,
}

impl App {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            drafts: DraftStore::new(),
            mailer: None,
        }
    }

    /// Reads mailer settings from the environment:
    /// BREVO_API_KEY, BREVO_SENDER_EMAIL, BREVO_SENDER_NAME.
    pub fn from_env(db: Database) -> Self {
        let mut app = Self::new(db);

        app.mailer = std::env::var("BREVO_API_KEY").ok().map(|api_key| {
            let sender_email = std::env::var("BREVO_SENDER_EMAIL")
                .unwrap_or_else(|_| "hello@naturestay.example".to_string());
            let sender_name =
                std::env::var("BREVO_SENDER_NAME").unwrap_or_else(|_| "Naturestay".to_string());
            Arc::new(BrevoMailer::new(api_key, sender_email, sender_name))
        });

        app
    }
}
