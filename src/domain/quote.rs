// src/domain/quote.rs

use chrono::NaiveDate;

/// Flat per-stay fees, charged once regardless of length.
pub const CLEANING_FEE: i64 = 25;
pub const SERVICE_FEE: i64 = 35;

/// Substituted when the guest hasn't picked dates yet, so the stay page can
/// always show a full breakdown.
pub const DEFAULT_NIGHTS: i64 = 5;

const DATE_FMT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceBreakdown {
    pub nightly_price: i64,
    pub nights: i64,
    pub subtotal: i64,
    pub cleaning_fee: i64,
    pub service_fee: i64,
    pub total: i64,
}

impl PriceBreakdown {
    /// A zero- or negative-night range can't be booked; callers disable
    /// the submit control rather than erroring.
    pub fn is_bookable(&self) -> bool {
        self.nights > 0
    }
}

pub fn parse_stay_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FMT).ok()
}

/// Whole-day difference between check-in and check-out. Missing or
/// unparseable dates fall back to `DEFAULT_NIGHTS`; an inverted range is
/// returned as-is (zero or negative) and surfaced to the caller.
pub fn nights_between(checkin: Option<&str>, checkout: Option<&str>) -> i64 {
    match (
        checkin.and_then(parse_stay_date),
        checkout.and_then(parse_stay_date),
    ) {
        (Some(ci), Some(co)) => (co - ci).num_days(),
        _ => DEFAULT_NIGHTS,
    }
}

/// Price breakdown for a stay: nights × nightly price plus the flat fees.
pub fn quote(nightly_price: i64, checkin: Option<&str>, checkout: Option<&str>) -> PriceBreakdown {
    let nights = nights_between(checkin, checkout);
    let subtotal = nightly_price * nights;

    PriceBreakdown {
        nightly_price,
        nights,
        subtotal,
        cleaning_fee: CLEANING_FEE,
        service_fee: SERVICE_FEE,
        total: subtotal + CLEANING_FEE + SERVICE_FEE,
    }
}
