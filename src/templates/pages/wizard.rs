// templates/pages/wizard.rs
//
// The eleven-step listing wizard. The sidebar jumps anywhere; the form on
// each step posts to its own slug and the handler advances to the next
// step. Publishing is a separate action offered on the last step.

use crate::catalog;
use crate::domain::draft::{ListingDraft, PRICE_TIERS};
use crate::domain::wizard::{Step, WizardState};
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn wizard_page(state: &WizardState) -> Markup {
    let step = state.current;

    desktop_layout(
        "New listing",
        true,
        html! {
            main class="container wizard-layout" {
                aside class="wizard-sidebar" {
                    h3 { "New listing" }
                    p class="muted" { (state.completed_count()) " of " (Step::ALL.len()) " steps done" }
                    ol {
                        @for s in Step::ALL {
                            li class=(if s == step { "active" } else { "" }) {
                                a href=(format!("/host/new/{}", s.slug())) {
                                    @if state.is_completed(s) { "✓ " }
                                    (s.title())
                                }
                            }
                        }
                    }
                    form action="/host/new/cancel" method="post" {
                        button type="submit" class="link-button danger" { "Discard draft" }
                    }
                }

                section class="wizard-step" {
                    h1 { (step.title()) }

                    form action=(format!("/host/new/{}", step.slug())) method="post" {
                        (step_fields(step, &state.draft))
                        div class="wizard-actions" {
                            button type="submit" {
                                @if step.is_last() { "Save" } @else { "Next" }
                            }
                        }
                    }

                    @if step.is_last() {
                        form action="/host/new/publish" method="post" class="publish-form" {
                            p class="muted" {
                                "Publishing makes the stay visible to guests right away."
                            }
                            button type="submit" class="button" { "Publish listing" }
                        }
                    }
                }
            }
        },
    )
}

fn step_fields(step: Step, draft: &ListingDraft) -> Markup {
    match step {
        Step::General => general_fields(draft),
        Step::Location => location_fields(draft),
        Step::Photos => photos_fields(draft),
        Step::Pricing => pricing_fields(draft),
        Step::Availability => availability_fields(draft),
        Step::Calendar => calendar_fields(draft),
        Step::Bedrooms => bedrooms_fields(draft),
        Step::Description => description_fields(draft),
        Step::StayDetails => stay_details_fields(draft),
        Step::Sustainability => sustainability_fields(draft),
        Step::HouseRules => house_rules_fields(draft),
    }
}

fn general_fields(draft: &ListingDraft) -> Markup {
    html! {
        label { "Listing name"
            input type="text" name="name" required value=(draft.general.name);
        }
        label { "Property type"
            select name="property_type" {
                @for (slug, label) in catalog::PROPERTY_TYPES {
                    option value=(slug) selected[draft.general.property_type == *slug] { (label) }
                }
            }
        }
        label { "One-line summary"
            input type="text" name="summary" value=(draft.general.summary);
        }
    }
}

fn location_fields(draft: &ListingDraft) -> Markup {
    let l = &draft.location;
    html! {
        label { "Country" input type="text" name="country" value=(l.country); }
        label { "Region" input type="text" name="region" value=(l.region); }
        label { "City or village" input type="text" name="city" value=(l.city); }
        label { "Street address" input type="text" name="street" value=(l.street); }
        label { "Postal code" input type="text" name="postal_code" value=(l.postal_code); }
    }
}

fn photos_fields(draft: &ListingDraft) -> Markup {
    let lines: String = draft
        .photos
        .iter()
        .map(|p| {
            if p.caption.is_empty() {
                p.url.clone()
            } else {
                format!("{} | {}", p.url, p.caption)
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    html! {
        p class="muted" { "One photo per line: a URL, optionally followed by " code { "| caption" } "." }
        label { "Photos"
            textarea name="photos" rows="8" placeholder="https://example.com/porch.jpg | The porch at dusk" {
                (lines)
            }
        }
    }
}

fn pricing_fields(draft: &ListingDraft) -> Markup {
    let p = &draft.pricing;
    html! {
        label { "Base price per night (€)"
            input type="number" name="base_price" min="1" required value=[p.base_price];
        }

        fieldset {
            legend { "Tiered prices (optional)" }
            @for (tier, label) in PRICE_TIERS {
                label { (label)
                    input
                        type="number"
                        name=(format!("tier_{tier}"))
                        min="0"
                        value=[p.tier_prices.get(*tier)];
                }
            }
        }

        label { "Price per extra person per night (€)"
            input type="number" name="extra_person_price" min="0" value=[p.extra_person_price];
        }

        label { "Safety deposit"
            select name="deposit_policy" {
                option value="none" selected[p.deposit_policy.as_str() == "none"] { "No deposit" }
                option value="held_on_arrival" selected[p.deposit_policy.as_str() == "held_on_arrival"] { "Held on arrival" }
                option value="paid_upfront" selected[p.deposit_policy.as_str() == "paid_upfront"] { "Paid up front" }
            }
        }
        label { "Deposit amount (€)"
            input type="number" name="deposit_amount" min="0" value=[p.deposit_amount];
        }

        label { "Included in the price (one per line)"
            textarea name="included_facilities" rows="4" placeholder="Firewood" {
                (p.included_facilities.join("\n"))
            }
        }

        label { "Extra costs (one per line: label | amount)"
            textarea name="extra_costs" rows="4" placeholder="Pet cleaning | 20" {
                (p.extra_costs
                    .iter()
                    .map(|c| format!("{} | {}", c.label, c.amount))
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
        }
    }
}

fn availability_fields(draft: &ListingDraft) -> Markup {
    html! {
        label { "Minimum nights per stay"
            input type="number" name="min_nights" min="1" value=[draft.availability.min_nights];
        }
    }
}

fn calendar_fields(draft: &ListingDraft) -> Markup {
    let c = &draft.calendar;
    html! {
        p class="muted" { "Leave both empty to accept bookings year-round." }
        label { "Open from"
            input type="date" name="open_from" value=[c.open_from.as_deref()];
        }
        label { "Open until"
            input type="date" name="open_until" value=[c.open_until.as_deref()];
        }
    }
}

fn bedrooms_fields(draft: &ListingDraft) -> Markup {
    html! {
        p class="muted" { "One room per line: name | single beds | double beds." }
        label { "Bedrooms"
            textarea name="bedrooms" rows="5" placeholder="Loft | 0 | 1" {
                (draft
                    .bedrooms
                    .iter()
                    .map(|b| format!("{} | {} | {}", b.name, b.single_beds, b.double_beds))
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
        }
    }
}

fn description_fields(draft: &ListingDraft) -> Markup {
    let d = &draft.description;
    html! {
        label { "Describe the stay"
            textarea name="description" rows="8" { (d.description) }
        }
        label { "What's around it"
            textarea name="surroundings" rows="5" { (d.surroundings) }
        }
    }
}

fn stay_details_fields(draft: &ListingDraft) -> Markup {
    let s = &draft.stay_details;
    html! {
        label { "Check-in from"
            input type="time" name="checkin_from" value=(s.checkin_from);
        }
        label { "Check-in until"
            input type="time" name="checkin_until" value=(s.checkin_until);
        }
        label { "Check-out by"
            input type="time" name="checkout_until" value=(s.checkout_until);
        }
        label { "Maximum guests"
            input type="number" name="max_guests" min="1" value=[s.max_guests];
        }

        fieldset {
            legend { "Amenities" }
            @for (slug, label) in catalog::AMENITIES {
                label class="checkbox" {
                    input
                        type="checkbox"
                        name="amenities"
                        value=(slug)
                        checked[s.amenities.iter().any(|a| a == slug)];
                    (label)
                }
            }
        }
    }
}

fn sustainability_fields(draft: &ListingDraft) -> Markup {
    html! {
        p class="muted" { "Honest answers only. These show up as badges on your listing." }
        @for (qid, question) in catalog::SUSTAINABILITY_QUESTIONS {
            fieldset class="yes-no" {
                legend { (question) }
                label {
                    input
                        type="radio"
                        name=(format!("q_{qid}"))
                        value="yes"
                        checked[draft.sustainability.get(*qid).map(String::as_str) == Some("yes")];
                    "Yes"
                }
                label {
                    input
                        type="radio"
                        name=(format!("q_{qid}"))
                        value="no"
                        checked[draft.sustainability.get(*qid).map(String::as_str) == Some("no")];
                    "No"
                }
            }
        }
    }
}

fn house_rules_fields(draft: &ListingDraft) -> Markup {
    let r = &draft.house_rules;
    html! {
        label { "Cots for babies"
            input type="number" name="max_babies" min="0" value=(r.max_babies);
        }
        label { "Maximum pets"
            input type="number" name="max_pets" min="0" value=(r.max_pets);
        }
        label { "Children from age"
            input type="number" name="min_child_age" min="0" value=[r.min_child_age];
        }
        label { "Minimum booking age"
            input type="number" name="min_booking_age" min="16" value=[r.min_booking_age];
        }

        fieldset {
            legend { "Allowed" }
            label class="checkbox" {
                input type="checkbox" name="smoking_allowed" value="1" checked[r.smoking_allowed];
                "Smoking"
            }
            label class="checkbox" {
                input type="checkbox" name="pets_allowed" value="1" checked[r.pets_allowed];
                "Pets"
            }
            label class="checkbox" {
                input type="checkbox" name="parties_allowed" value="1" checked[r.parties_allowed];
                "Parties"
            }
        }

        label { "Quiet hours start"
            input type="time" name="quiet_hours_start" value=[r.quiet_hours_start.as_deref()];
        }
        label { "Quiet hours end"
            input type="time" name="quiet_hours_end" value=[r.quiet_hours_end.as_deref()];
        }

        label { "Your own rules (one per line)"
            textarea name="custom_rules" rows="4" placeholder="No campfires outside the pit" {
                (r.custom_rules.join("\n"))
            }
        }
    }
}
