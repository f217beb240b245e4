//! Parsing and validation of user-facing listing parameters.
//!
//! Filter parameters arrive as strings (query parameters, CLI flags). Blank
//! values mean "no constraint"; anything else must parse cleanly or the call
//! is rejected with [`MarketplaceError::InvalidInput`].

use crate::error::MarketplaceError;
use crate::filters::{FilterCriteria, PriceRange};

pub const MAX_LOCATION_LENGTH: usize = 100;

/// Largest page size accepted for in-memory pagination.
pub const MAX_PAGE_SIZE: usize = 100;

/// Normalizes a free-text search term.
///
/// Tabs, newlines and other control characters count as word breaks, runs of
/// breaks collapse to one space, and the ends are trimmed, so
/// `"Jolly\tHarbour"` searches for `"Jolly Harbour"`. Input longer than
/// `max_len` bytes is rejected. Returns `None` when no words remain.
pub fn clean_search_term(input: &str, max_len: usize) -> Result<Option<String>, MarketplaceError> {
    if input.len() > max_len {
        return Err(MarketplaceError::InvalidInput(format!(
            "search text is longer than {} bytes",
            max_len
        )));
    }
    let words: Vec<&str> = input
        .split(|c: char| c.is_whitespace() || c.is_control())
        .filter(|word| !word.is_empty())
        .collect();
    if words.is_empty() {
        return Ok(None);
    }
    Ok(Some(words.join(" ")))
}

/// Validate a minimum bedroom count: a positive whole number, or blank for none.
pub fn validate_min_bedrooms(input: &str) -> Result<Option<u32>, MarketplaceError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<u32>() {
        Ok(beds) if beds >= 1 => Ok(Some(beds)),
        _ => Err(MarketplaceError::InvalidInput(format!(
            "bedrooms must be a positive whole number, got '{}'",
            input
        ))),
    }
}

/// Validate a price range in `<min>-<max>` form, or blank for none.
///
/// The string is split on its first `-`; both halves must be finite,
/// non-negative numbers. A range whose minimum exceeds its maximum is
/// accepted and simply matches nothing.
pub fn validate_price_range(input: &str) -> Result<Option<PriceRange>, MarketplaceError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let invalid = || {
        MarketplaceError::InvalidInput(format!(
            "price range must look like '500000-1000000', got '{}'",
            input
        ))
    };
    let (min, max) = trimmed.split_once('-').ok_or_else(invalid)?;
    let min = parse_price(min).ok_or_else(invalid)?;
    let max = parse_price(max).ok_or_else(invalid)?;
    Ok(Some(PriceRange::new(min, max)))
}

fn parse_price(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Validate a location search term, or blank for none.
pub fn validate_location(input: &str) -> Result<Option<String>, MarketplaceError> {
    clean_search_term(input, MAX_LOCATION_LENGTH)
}

/// Build [`FilterCriteria`] from the three raw filter parameters.
pub fn parse_filter_criteria(
    bedrooms: &str,
    price_range: &str,
    location: &str,
) -> Result<FilterCriteria, MarketplaceError> {
    Ok(FilterCriteria {
        min_bedrooms: validate_min_bedrooms(bedrooms)?,
        price_range: validate_price_range(price_range)?,
        location: validate_location(location)?,
    })
}

/// Checks a listings page request: pages count from 1 and hold between 1
/// and [`MAX_PAGE_SIZE`] listings. Returns `(page, page_size)` unchanged.
pub fn validate_paging(page: usize, page_size: usize) -> Result<(usize, usize), MarketplaceError> {
    if page == 0 {
        return Err(MarketplaceError::InvalidInput(
            "pages are numbered from 1".to_string(),
        ));
    }
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        return Err(MarketplaceError::InvalidInput(format!(
            "page size must be between 1 and {} listings, got {}",
            MAX_PAGE_SIZE, page_size
        )));
    }
    Ok((page, page_size))
}
