// templates/pages/host.rs

use crate::db::listings::ListingSummary;
use crate::templates::{
    components::{card, listing_card},
    desktop_layout,
};
use maud::{html, Markup};

pub struct HostVm {
    pub listings: Vec<ListingSummary>,
    pub bookings_this_month: i64,
    pub has_open_draft: bool,
}

pub fn host_page(vm: &HostVm) -> Markup {
    desktop_layout(
        "Host",
        true,
        html! {
            main class="container" {
                div class="host-head" {
                    h1 { "Your listings" }
                    a href="/host/new" class="button" {
                        @if vm.has_open_draft { "Continue your draft" } @else { "List a new stay" }
                    }
                }

                (card("This month", html! {
                    p {
                        strong { (vm.bookings_this_month) }
                        " confirmed bookings across your listings."
                    }
                }))

                @if vm.listings.is_empty() {
                    p class="muted" { "You haven't published a listing yet." }
                } @else {
                    div class="listing-grid" {
                        @for listing in &vm.listings {
                            (listing_card(listing))
                        }
                    }
                }
            }
        },
    )
}
