// src/domain/filters.rs

use std::collections::BTreeSet;

/// Active search filters, mirrored into the URL query string so results
/// are shareable and survive a reload.
///
/// Wire format: `types` and `amenities` are comma-joined token lists,
/// `max_price` and `min_rating` plain numbers. Parsing also accepts
/// repeated parameters (`types=a&types=b`) since that's what a checkbox
/// form submits; serialization always emits the canonical sorted,
/// comma-joined form, so parse → serialize is stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    pub property_types: BTreeSet<String>,
    pub amenities: BTreeSet<String>,
    pub max_price: Option<i64>,
    pub min_rating: Option<f64>,
}

impl FilterSet {
    pub fn from_query(query: &str) -> Self {
        let mut filters = FilterSet::default();

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "types" => insert_tokens(&mut filters.property_types, &value),
                "amenities" => insert_tokens(&mut filters.amenities, &value),
                "max_price" => filters.max_price = value.trim().parse().ok(),
                "min_rating" => filters.min_rating = value.trim().parse().ok(),
                _ => {}
            }
        }

        filters
    }

    /// Canonical query string; empty when no filter is active.
    pub fn to_query(&self) -> String {
        let mut ser = url::form_urlencoded::Serializer::new(String::new());

        if !self.property_types.is_empty() {
            ser.append_pair("types", &join(&self.property_types));
        }
        if !self.amenities.is_empty() {
            ser.append_pair("amenities", &join(&self.amenities));
        }
        if let Some(price) = self.max_price {
            ser.append_pair("max_price", &price.to_string());
        }
        if let Some(rating) = self.min_rating {
            ser.append_pair("min_rating", &format_rating(rating));
        }

        ser.finish()
    }

    pub fn toggle_property_type(&mut self, token: &str) {
        toggle(&mut self.property_types, token);
    }

    pub fn toggle_amenity(&mut self, token: &str) {
        toggle(&mut self.amenities, token);
    }

    pub fn is_empty(&self) -> bool {
        self.property_types.is_empty()
            && self.amenities.is_empty()
            && self.max_price.is_none()
            && self.min_rating.is_none()
    }
}

fn insert_tokens(set: &mut BTreeSet<String>, value: &str) {
    for token in value.split(',') {
        let token = token.trim();
        if !token.is_empty() {
            set.insert(token.to_string());
        }
    }
}

fn toggle(set: &mut BTreeSet<String>, token: &str) {
    if !set.remove(token) {
        set.insert(token.to_string());
    }
}

fn join(set: &BTreeSet<String>) -> String {
    set.iter().map(String::as_str).collect::<Vec<_>>().join(",")
}

// Trailing ".0" would make round-trips unstable ("4" parses to 4.0 but
// formats to "4.0"), so whole ratings print without the fraction.
fn format_rating(rating: f64) -> String {
    if rating.fract() == 0.0 {
        format!("{}", rating as i64)
    } else {
        format!("{rating}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_joined_and_repeated_params() {
        let a = FilterSet::from_query("types=cabin,yurt&max_price=200");
        let b = FilterSet::from_query("types=cabin&types=yurt&max_price=200");
        assert_eq!(a, b);
        assert!(a.property_types.contains("cabin"));
        assert!(a.property_types.contains("yurt"));
        assert_eq!(a.max_price, Some(200));
    }

    #[test]
    fn toggle_twice_round_trips_the_query_string() {
        let mut filters = FilterSet::from_query("types=cabin&amenities=sauna&min_rating=4");
        let before = filters.to_query();

        filters.toggle_amenity("hot_tub");
        assert!(filters.amenities.contains("hot_tub"));

        filters.toggle_amenity("hot_tub");
        assert_eq!(filters.to_query(), before);
    }

    #[test]
    fn clearing_the_last_token_removes_the_parameter() {
        let mut filters = FilterSet::from_query("types=cabin");
        filters.toggle_property_type("cabin");
        assert_eq!(filters.to_query(), "");
        assert!(filters.is_empty());
    }

    #[test]
    fn serialization_is_canonical_regardless_of_input_order() {
        let a = FilterSet::from_query("types=yurt,cabin");
        let b = FilterSet::from_query("types=cabin&types=yurt");
        assert_eq!(a.to_query(), b.to_query());
        assert_eq!(a.to_query(), "types=cabin%2Cyurt");
    }

    #[test]
    fn parse_serialize_parse_is_identity() {
        let q = "types=cabin%2Ctreehouse&amenities=sauna&max_price=150&min_rating=4.5";
        let filters = FilterSet::from_query(q);
        let reparsed = FilterSet::from_query(&filters.to_query());
        assert_eq!(filters, reparsed);
        assert_eq!(filters.to_query(), reparsed.to_query());
    }

    #[test]
    fn junk_numbers_are_dropped_rather_than_erroring() {
        let filters = FilterSet::from_query("max_price=abc&min_rating=");
        assert_eq!(filters.max_price, None);
        assert_eq!(filters.min_rating, None);
    }
}
