use crate::catalog;
use crate::db::listings::ListingSummary;
use maud::{html, Markup};

/// The result card shown on the home and search pages. A listing without
/// photos gets a plain placeholder block instead of a broken image.
pub fn listing_card(listing: &ListingSummary) -> Markup {
    html! {
        a class="listing-card" href=(format!("/stay/{}", listing.id)) {
            @match &listing.cover_url {
                Some(url) => { img src=(url) alt=(listing.name) loading="lazy"; }
                None => { div class="photo-placeholder" { "No photos yet" } }
            }
            div class="listing-card-body" {
                div class="listing-card-head" {
                    h3 { (listing.name) }
                    span class="rating" { "★ " (format!("{:.1}", listing.rating)) }
                }
                p class="muted" {
                    (catalog::property_type_label(&listing.property_type))
                    " · "
                    (listing.city) ", " (listing.region) ", " (listing.country)
                }
                p { strong { "€" (listing.base_price) } " / night" }
            }
        }
    }
}
