use crate::domain::quote::PriceBreakdown;
use maud::{html, Markup};

/// The per-stay cost table shown next to the booking form. Renders
/// whatever the quote says, including a zero-night stay; gating the
/// submit button is the form's job.
pub fn price_breakdown_card(quote: &PriceBreakdown) -> Markup {
    html! {
        div class="price-breakdown" {
            table {
                tr {
                    td { "€" (quote.nightly_price) " × " (quote.nights) " nights" }
                    td class="amount" { "€" (quote.subtotal) }
                }
                tr {
                    td { "Cleaning fee" }
                    td class="amount" { "€" (quote.cleaning_fee) }
                }
                tr {
                    td { "Service fee" }
                    td class="amount" { "€" (quote.service_fee) }
                }
                tr class="total" {
                    td { "Total" }
                    td class="amount" { strong { "€" (quote.total) } }
                }
            }
        }
    }
}
