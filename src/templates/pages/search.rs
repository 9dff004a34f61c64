// templates/pages/search.rs

use crate::catalog;
use crate::db::listings::ListingSummary;
use crate::domain::filters::FilterSet;
use crate::templates::{components::listing_card, desktop_layout};
use maud::{html, Markup};

/// Search results with the filter sidebar. The form GETs back to /search,
/// so the active filters live in the URL and survive reload/share.
/// One removable chip per active token; clicking a chip is the same
/// toggle that unchecking its box would be, just from the results side.
fn active_filter_chips(filters: &FilterSet) -> Markup {
    let mut chips: Vec<(String, String)> = Vec::new();

    for token in &filters.property_types {
        let mut without = filters.clone();
        without.toggle_property_type(token);
        chips.push((
            catalog::property_type_label(token).to_string(),
            format!("/search?{}", without.to_query()),
        ));
    }
    for token in &filters.amenities {
        let mut without = filters.clone();
        without.toggle_amenity(token);
        chips.push((
            catalog::amenity_label(token).to_string(),
            format!("/search?{}", without.to_query()),
        ));
    }

    html! {
        @if !chips.is_empty() {
            div class="filter-chips" {
                @for (label, href) in &chips {
                    a class="chip" href=(href) { (label) " ✕" }
                }
            }
        }
    }
}

pub fn search_page(filters: &FilterSet, results: &[ListingSummary], signed_in: bool) -> Markup {
    desktop_layout(
        "Find a stay",
        signed_in,
        html! {
            main class="container search-layout" {
                aside class="filters" {
                    form action="/search" method="get" {
                        h3 { "Property type" }
                        @for (slug, label) in catalog::PROPERTY_TYPES {
                            label class="checkbox" {
                                input
                                    type="checkbox"
                                    name="types"
                                    value=(slug)
                                    checked[filters.property_types.contains(*slug)];
                                (label)
                            }
                        }

                        h3 { "Amenities" }
                        @for (slug, label) in catalog::AMENITIES {
                            label class="checkbox" {
                                input
                                    type="checkbox"
                                    name="amenities"
                                    value=(slug)
                                    checked[filters.amenities.contains(*slug)];
                                (label)
                            }
                        }

                        h3 { "Price per night" }
                        label for="max_price" class="sr-only" { "Max price" }
                        input
                            type="number"
                            id="max_price"
                            name="max_price"
                            min="0"
                            placeholder="Max €"
                            value=[filters.max_price];

                        h3 { "Rating" }
                        select name="min_rating" {
                            option value="" selected[filters.min_rating.is_none()] { "Any" }
                            @for rating in ["3", "4", "4.5"] {
                                option
                                    value=(rating)
                                    selected[filters.min_rating == rating.parse().ok()]
                                { (rating) "+" }
                            }
                        }

                        div class="filter-actions" {
                            button type="submit" { "Apply" }
                            a href="/search" { "Clear" }
                        }
                    }
                }

                section class="results" {
                    h1 { "Stays" }
                    (active_filter_chips(filters))
                    @if results.is_empty() {
                        p class="muted" { "Nothing matches those filters yet." }
                    } @else {
                        p class="muted" { (results.len()) " stays" }
                        div class="listing-grid" {
                            @for listing in results {
                                (listing_card(listing))
                            }
                        }
                    }
                }
            }
        },
    )
}
