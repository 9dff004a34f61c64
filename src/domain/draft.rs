// src/domain/draft.rs

use serde::Serialize;
use std::collections::BTreeMap;

// draft
//  ├── general        (name, property type, summary)
//  ├── location       (country / region / city / street / postal code)
//  ├── photos         (url + caption, ordered)
//  ├── pricing        (base price, facilities, deposit, tiers, extras)
//  ├── availability   (minimum nights)
//  ├── calendar       (open-from / open-until)
//  ├── bedrooms       (room list with bed counts)
//  ├── description    (description, surroundings)
//  ├── stay_details   (check-in window, check-out deadline, max guests)
//  ├── sustainability (question id -> "yes"/"no")
//  └── house_rules    (limits, policy flags, quiet hours, custom rules)

/// The in-progress listing a host accumulates across the authoring wizard.
/// Held in memory only; nothing is persisted until the host publishes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListingDraft {
    pub general: GeneralFacts,
    pub location: LocationFacts,
    pub photos: Vec<PhotoDraft>,
    pub pricing: PricingFacts,
    pub availability: AvailabilityFacts,
    pub calendar: CalendarFacts,
    pub bedrooms: Vec<BedroomDraft>,
    pub description: DescriptionFacts,
    pub stay_details: StayDetailFacts,
    /// Keyed by sustainability question id, values are "yes" or "no".
    pub sustainability: BTreeMap<String, String>,
    pub house_rules: HouseRules,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GeneralFacts {
    pub name: String,
    pub property_type: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LocationFacts {
    pub country: String,
    pub region: String,
    pub city: String,
    pub street: String,
    pub postal_code: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PhotoDraft {
    pub url: String,
    pub caption: String,
}

/// Safety-deposit handling: either none is taken, or an amount is held and
/// returned after checkout, or paid up front and settled with damages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DepositPolicy {
    #[default]
    None,
    HeldOnArrival,
    PaidUpfront,
}

impl DepositPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            DepositPolicy::None => "none",
            DepositPolicy::HeldOnArrival => "held_on_arrival",
            DepositPolicy::PaidUpfront => "paid_upfront",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "held_on_arrival" => DepositPolicy::HeldOnArrival,
            "paid_upfront" => DepositPolicy::PaidUpfront,
            _ => DepositPolicy::None,
        }
    }
}

/// Price tiers a host may set on top of the base nightly price.
pub const PRICE_TIERS: &[(&str, &str)] = &[
    ("weekday", "Weekday night"),
    ("weekend", "Weekend night"),
    ("week", "Full week"),
    ("long_weekend", "Long weekend"),
];

#[derive(Debug, Clone, Default, Serialize)]
pub struct PricingFacts {
    pub base_price: Option<i64>,
    pub included_facilities: Vec<String>,
    pub deposit_policy: DepositPolicy,
    pub deposit_amount: Option<i64>,
    /// Keyed by tier slug from `PRICE_TIERS`.
    pub tier_prices: BTreeMap<String, i64>,
    pub extra_person_price: Option<i64>,
    pub extra_costs: Vec<ExtraCost>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtraCost {
    pub label: String,
    pub amount: i64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AvailabilityFacts {
    pub min_nights: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CalendarFacts {
    /// YYYY-MM-DD, both optional; an open-ended listing leaves them unset.
    pub open_from: Option<String>,
    pub open_until: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BedroomDraft {
    pub name: String,
    pub single_beds: i64,
    pub double_beds: i64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DescriptionFacts {
    pub description: String,
    pub surroundings: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StayDetailFacts {
    pub checkin_from: String,
    pub checkin_until: String,
    pub checkout_until: String,
    pub max_guests: Option<i64>,
    pub amenities: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct HouseRules {
    pub max_babies: i64,
    pub max_pets: i64,
    pub min_child_age: Option<i64>,
    pub min_booking_age: Option<i64>,
    pub smoking_allowed: bool,
    pub pets_allowed: bool,
    pub parties_allowed: bool,
    pub quiet_hours_start: Option<String>,
    pub quiet_hours_end: Option<String>,
    pub custom_rules: Vec<String>,
}

/// One wizard step's worth of changes. Each variant names the section a
/// step is expected to own; nothing stops a caller from applying any
/// variant at any step, ownership is documentation rather than enforcement.
#[derive(Debug, Clone)]
pub enum DraftPatch {
    General(GeneralFacts),
    Location(LocationFacts),
    Photos(Vec<PhotoDraft>),
    Pricing(PricingFacts),
    Availability(AvailabilityFacts),
    Calendar(CalendarFacts),
    Bedrooms(Vec<BedroomDraft>),
    Description(DescriptionFacts),
    StayDetails(StayDetailFacts),
    Sustainability(BTreeMap<String, String>),
    HouseRules(HouseRules),
}

impl ListingDraft {
    /// Replace the patched section wholesale; the other sections are
    /// untouched.
    pub fn apply(&mut self, patch: DraftPatch) {
        match patch {
            DraftPatch::General(v) => self.general = v,
            DraftPatch::Location(v) => self.location = v,
            DraftPatch::Photos(v) => self.photos = v,
            DraftPatch::Pricing(v) => self.pricing = v,
            DraftPatch::Availability(v) => self.availability = v,
            DraftPatch::Calendar(v) => self.calendar = v,
            DraftPatch::Bedrooms(v) => self.bedrooms = v,
            DraftPatch::Description(v) => self.description = v,
            DraftPatch::StayDetails(v) => self.stay_details = v,
            DraftPatch::Sustainability(v) => self.sustainability = v,
            DraftPatch::HouseRules(v) => self.house_rules = v,
        }
    }

    /// The two fields a listing can't be published without. Collected as a
    /// joined message so the host sees every problem at once.
    pub fn validate_for_publish(&self) -> Result<(), String> {
        let mut problems = Vec::new();
        if self.general.name.trim().is_empty() {
            problems.push("listing name is required");
        }
        if self.pricing.base_price.is_none() {
            problems.push("base nightly price is required");
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems.join(", "))
        }
    }
}
