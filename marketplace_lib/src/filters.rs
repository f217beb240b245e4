//! Listing filters: minimum bedrooms, price band, and location text.
//!
//! Every function takes a slice of listings and returns the survivors in
//! input order. Listings missing the field a filter looks at never pass that
//! filter. Nothing here allocates more than the result vector.

use airtable_api::types::Listing;
use serde::Serialize;

/// Closed price interval `[min, max]` in USD.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

/// User-selected filter criteria. `None` means "no constraint".
///
/// Build one from raw query parameters with
/// [`crate::validation::parse_filter_criteria`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterCriteria {
    pub min_bedrooms: Option<u32>,
    pub price_range: Option<PriceRange>,
    pub location: Option<String>,
}

impl FilterCriteria {
    /// Returns true if at least one criterion constrains the result.
    pub fn is_active(&self) -> bool {
        self.min_bedrooms.is_some()
            || self.price_range.is_some()
            || self.location.as_deref().is_some_and(|l| !l.is_empty())
    }
}

/// Keeps listings with a known bedroom count of at least `min_bedrooms`.
pub fn filter_by_min_bedrooms(listings: &[Listing], min_bedrooms: u32) -> Vec<Listing> {
    listings
        .iter()
        .filter(|l| {
            l.fields
                .bedroom_count()
                .is_some_and(|beds| beds >= f64::from(min_bedrooms))
        })
        .cloned()
        .collect()
}

/// Keeps listings with a known price inside `range` (both ends inclusive).
pub fn filter_by_price_range(listings: &[Listing], range: &PriceRange) -> Vec<Listing> {
    listings
        .iter()
        .filter(|l| l.fields.price.is_some_and(|price| range.contains(price)))
        .cloned()
        .collect()
}

/// Keeps listings whose address or location contains `term`, ignoring case.
///
/// An empty `term` matches everything; callers that mean "no filter" should
/// skip the call instead.
pub fn filter_by_location(listings: &[Listing], term: &str) -> Vec<Listing> {
    let needle = term.to_lowercase();
    listings
        .iter()
        .filter(|l| {
            contains_ignore_case(l.fields.address.as_deref(), &needle)
                || contains_ignore_case(l.fields.location.as_deref(), &needle)
        })
        .cloned()
        .collect()
}

fn contains_ignore_case(haystack: Option<&str>, needle_lower: &str) -> bool {
    haystack
        .unwrap_or_default()
        .to_lowercase()
        .contains(needle_lower)
}

/// Applies every active criterion in turn: bedrooms, then price, then location.
///
/// With no active criteria the result equals the input.
pub fn apply_filters(listings: &[Listing], criteria: &FilterCriteria) -> Vec<Listing> {
    let mut filtered = listings.to_vec();

    if let Some(min_bedrooms) = criteria.min_bedrooms {
        filtered = filter_by_min_bedrooms(&filtered, min_bedrooms);
    }

    if let Some(range) = &criteria.price_range {
        filtered = filter_by_price_range(&filtered, range);
    }

    if let Some(location) = criteria.location.as_deref().filter(|l| !l.is_empty()) {
        filtered = filter_by_location(&filtered, location);
    }

    tracing::debug!(
        "filters kept {} of {} listings",
        filtered.len(),
        listings.len()
    );
    filtered
}
