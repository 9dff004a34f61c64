// templates/pages/account.rs

use crate::db::bookings::BookingRow;
use crate::db::listings::ListingSummary;
use crate::db::profiles::ProfileInfo;
use crate::templates::{components::listing_card, desktop_layout};
use maud::{html, Markup};

pub struct AccountVm {
    pub email: String,
    pub profile: ProfileInfo,
    pub bookings: Vec<BookingRow>,
    pub favorites: Vec<ListingSummary>,
}

pub fn account_page(vm: &AccountVm) -> Markup {
    desktop_layout(
        "Account",
        true,
        html! {
            main class="container" {
                h1 { "Your account" }
                p { "Signed in as " strong { (vm.email) } }

                section class="card" {
                    h3 { "Profile" }
                    form action="/account/profile" method="post" {
                        label { "Display name"
                            input type="text" name="display_name" value=(vm.profile.display_name);
                        }
                        label { "Home region"
                            input type="text" name="home_region" value=(vm.profile.home_region);
                        }
                        button type="submit" { "Save" }
                    }
                }

                section class="card" {
                    h3 { "Your bookings" }
                    @if vm.bookings.is_empty() {
                        p class="muted" { "No bookings yet. " a href="/search" { "Find a stay" } "." }
                    } @else {
                        table class="bookings" {
                            tr {
                                th { "Stay" }
                                th { "Dates" }
                                th { "Guests" }
                                th { "Total" }
                                th { "Status" }
                                th {}
                            }
                            @for booking in &vm.bookings {
                                tr {
                                    td {
                                        a href=(format!("/stay/{}", booking.listing_id)) {
                                            (booking.listing_name)
                                        }
                                    }
                                    td { (booking.checkin) " → " (booking.checkout) }
                                    td { (booking.guests) }
                                    td { "€" (booking.total) }
                                    td { (booking.status) }
                                    td {
                                        @if booking.status == "confirmed" {
                                            form
                                                action=(format!("/bookings/{}/cancel", booking.id))
                                                method="post"
                                            {
                                                button type="submit" class="link-button danger" { "Cancel" }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }

                section class="card" {
                    h3 { "Saved stays" }
                    @if vm.favorites.is_empty() {
                        p class="muted" { "Nothing saved yet." }
                    } @else {
                        div class="listing-grid" {
                            @for listing in &vm.favorites {
                                (listing_card(listing))
                            }
                        }
                    }
                }
            }
        },
    )
}
