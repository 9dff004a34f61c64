//! Fixed option catalogs shared by the wizard forms, the search sidebar,
//! and the seed command. (slug, label) pairs, slug is what gets stored.

pub const PROPERTY_TYPES: &[(&str, &str)] = &[
    ("cabin", "Cabin"),
    ("treehouse", "Treehouse"),
    ("yurt", "Yurt"),
    ("tiny_house", "Tiny house"),
    ("farm_stay", "Farm stay"),
    ("lodge", "Lodge"),
    ("campsite", "Campsite"),
];

pub const AMENITIES: &[(&str, &str)] = &[
    ("wifi", "Wi-Fi"),
    ("kitchen", "Kitchen"),
    ("fireplace", "Fireplace"),
    ("sauna", "Sauna"),
    ("hot_tub", "Hot tub"),
    ("parking", "Free parking"),
    ("lake_access", "Lake access"),
    ("hiking_trails", "Hiking trails nearby"),
    ("ev_charger", "EV charger"),
    ("pet_friendly", "Pets welcome"),
];

/// Sustainability questionnaire shown on the wizard's sustainability step.
/// Answers are stored per listing as "yes"/"no" keyed by the question id.
pub const SUSTAINABILITY_QUESTIONS: &[(&str, &str)] = &[
    ("renewable_energy", "Does the property run on renewable energy?"),
    ("waste_recycling", "Is waste separated and recycled?"),
    ("water_saving", "Are water-saving fixtures installed?"),
    ("local_products", "Do you offer locally sourced products?"),
    ("no_single_use_plastic", "Is the stay free of single-use plastics?"),
    ("green_transport", "Is the property reachable by public transport?"),
];

pub fn property_type_label(slug: &str) -> &str {
    PROPERTY_TYPES
        .iter()
        .find(|(s, _)| *s == slug)
        .map(|(_, label)| *label)
        .unwrap_or(slug)
}

pub fn amenity_label(slug: &str) -> &str {
    AMENITIES
        .iter()
        .find(|(s, _)| *s == slug)
        .map(|(_, label)| *label)
        .unwrap_or(slug)
}

pub fn sustainability_question(id: &str) -> Option<&'static str> {
    SUSTAINABILITY_QUESTIONS
        .iter()
        .find(|(qid, _)| *qid == id)
        .map(|(_, q)| *q)
}
