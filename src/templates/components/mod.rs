pub mod card;
pub mod email_cta;
pub mod listing_card;
pub mod price_breakdown;

pub use card::card;
pub use email_cta::email_cta_form;
pub use listing_card::listing_card;
pub use price_breakdown::price_breakdown_card;
