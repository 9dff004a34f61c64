// templates/pages/home.rs

use crate::db::listings::ListingSummary;
use crate::templates::{components::listing_card, desktop_layout};
use maud::{html, Markup};

pub fn home_page(featured: &[ListingSummary], signed_in: bool) -> Markup {
    desktop_layout(
        "Home",
        signed_in,
        html! {
            main class="container" {
                section class="hero" {
                    h1 { "Stay where the forest starts" }
                    p class="lead" {
                        "Cabins, treehouses and farm stays from hosts who keep it green."
                    }
                    a href="/search" class="button" { "Find a stay" }
                }

                section {
                    h2 { "Loved by guests" }
                    @if featured.is_empty() {
                        p class="muted" { "No stays yet. Check back soon." }
                    } @else {
                        div class="listing-grid" {
                            @for listing in featured {
                                (listing_card(listing))
                            }
                        }
                    }
                }
            }
        },
    )
}
