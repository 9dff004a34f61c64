// templates/pages/stay.rs

use crate::catalog;
use crate::db::listings::ListingDetail;
use crate::domain::quote::PriceBreakdown;
use crate::templates::{components::price_breakdown_card, desktop_layout};
use maud::{html, Markup};

pub struct StayVm<'a> {
    pub listing: &'a ListingDetail,
    pub quote: PriceBreakdown,
    pub checkin: Option<String>,
    pub checkout: Option<String>,
    pub guests: i64,
    pub signed_in: bool,
    pub is_favorite: bool,
}

pub fn stay_page(vm: &StayVm<'_>) -> Markup {
    let l = vm.listing;

    desktop_layout(
        &l.name,
        vm.signed_in,
        html! {
            main class="container" {
                div class="stay-head" {
                    div {
                        h1 { (l.name) }
                        p class="muted" {
                            (catalog::property_type_label(&l.property_type))
                            " · "
                            (l.city) ", " (l.region) ", " (l.country)
                            " · ★ " (format!("{:.1}", l.rating))
                        }
                    }
                    @if vm.signed_in {
                        form action=(format!("/stay/{}/favorite", l.id)) method="post" {
                            button type="submit" class="link-button" {
                                @if vm.is_favorite { "♥ Saved" } @else { "♡ Save" }
                            }
                        }
                    }
                }

                @if !l.images.is_empty() {
                    div class="photo-strip" {
                        @for (url, caption) in &l.images {
                            img src=(url) alt=(if caption.is_empty() { &l.name } else { caption });
                        }
                    }
                }

                div class="stay-layout" {
                    section class="stay-body" {
                        @if !l.summary.is_empty() {
                            p class="lead" { (l.summary) }
                        }
                        p { (l.description) }

                        @if !l.surroundings.is_empty() {
                            h2 { "The surroundings" }
                            p { (l.surroundings) }
                        }

                        @if !l.bedrooms.is_empty() {
                            h2 { "Sleeping" }
                            ul {
                                @for (name, singles, doubles) in &l.bedrooms {
                                    li {
                                        strong { (name) } ": "
                                        (doubles) " double, " (singles) " single"
                                    }
                                }
                            }
                        }

                        @if !l.amenities.is_empty() {
                            h2 { "Amenities" }
                            ul class="tag-list" {
                                @for amenity in &l.amenities {
                                    li { (catalog::amenity_label(amenity)) }
                                }
                            }
                        }

                        @if !l.included_facilities.is_empty() {
                            h2 { "Included in the price" }
                            ul {
                                @for facility in &l.included_facilities {
                                    li { (facility) }
                                }
                            }
                        }

                        @if !l.extra_costs.is_empty() {
                            h2 { "Extra costs" }
                            ul {
                                @for (label, amount) in &l.extra_costs {
                                    li { (label) ": €" (amount) }
                                }
                            }
                        }

                        (sustainability_section(l))
                        (house_rules_section(l))
                    }

                    aside class="booking-panel" {
                        h2 { "Book this stay" }
                        p { strong { "€" (l.base_price) } " / night · min " (l.min_nights) " nights" }
                        @if let Some(extra) = l.extra_person_price {
                            p class="muted small" { "+€" (extra) " per extra guest per night" }
                        }
                        @if !l.tier_prices.is_empty() {
                            ul class="muted small tier-list" {
                                @for (tier, price) in &l.tier_prices {
                                    li { (tier_label(tier)) ": €" (price) }
                                }
                            }
                        }

                        form action=(format!("/stay/{}", l.id)) method="get" class="date-form" {
                            label { "Check-in"
                                input type="date" name="checkin" value=[vm.checkin.as_deref()];
                            }
                            label { "Check-out"
                                input type="date" name="checkout" value=[vm.checkout.as_deref()];
                            }
                            label { "Guests"
                                input type="number" name="guests" min="1" max=(l.max_guests) value=(vm.guests);
                            }
                            button type="submit" { "Update dates" }
                        }

                        (price_breakdown_card(&vm.quote))

                        form action=(format!("/stay/{}/book", l.id)) method="post" {
                            input type="hidden" name="checkin" value=[vm.checkin.as_deref()];
                            input type="hidden" name="checkout" value=[vm.checkout.as_deref()];
                            input type="hidden" name="guests" value=(vm.guests);
                            // Zero-night (or inverted) ranges render a quote but can't be submitted.
                            button type="submit" disabled[!vm.quote.is_bookable()] {
                                @if vm.signed_in { "Book" } @else { "Sign in to book" }
                            }
                        }

                        p class="muted small" {
                            "Check-in " (l.checkin_from) "–" (l.checkin_until)
                            ", check-out by " (l.checkout_until)
                        }
                        @if let Some(amount) = l.deposit_amount {
                            @if l.deposit_policy != "none" {
                                p class="muted small" {
                                    "Safety deposit €" (amount)
                                    @if l.deposit_policy == "paid_upfront" { " (paid up front)" }
                                    @else { " (held on arrival)" }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

fn tier_label(tier: &str) -> &str {
    crate::domain::draft::PRICE_TIERS
        .iter()
        .find(|(slug, _)| *slug == tier)
        .map(|(_, label)| *label)
        .unwrap_or(tier)
}

fn sustainability_section(l: &ListingDetail) -> Markup {
    let yes: Vec<&str> = l
        .sustainability
        .iter()
        .filter(|(_, answer)| answer == "yes")
        .filter_map(|(qid, _)| catalog::sustainability_question(qid))
        .collect();

    html! {
        @if !yes.is_empty() {
            h2 { "Sustainability" }
            ul class="tag-list green" {
                @for q in yes {
                    li { (q) }
                }
            }
        }
    }
}

fn house_rules_section(l: &ListingDetail) -> Markup {
    html! {
        @if let Some(rules) = &l.house_rules {
            h2 { "House rules" }
            ul {
                li { (if rules.pets_allowed { "Pets welcome" } else { "No pets" }) }
                li { (if rules.smoking_allowed { "Smoking allowed" } else { "No smoking" }) }
                li { (if rules.parties_allowed { "Parties allowed" } else { "No parties" }) }
                @if rules.max_pets > 0 {
                    li { "Up to " (rules.max_pets) " pets" }
                }
                @if rules.max_babies > 0 {
                    li { "Up to " (rules.max_babies) " cots for babies" }
                }
                @if let Some(age) = rules.min_child_age {
                    li { "Children from age " (age) }
                }
                li { "Minimum booking age " (rules.min_booking_age) }
                @if let (Some(start), Some(end)) = (&rules.quiet_hours_start, &rules.quiet_hours_end) {
                    li { "Quiet hours " (start) "–" (end) }
                }
                @for rule in &l.custom_rules {
                    li { (rule) }
                }
            }
        }
    }
}
