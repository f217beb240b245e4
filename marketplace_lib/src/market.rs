//! Market statistics over listing collections.
//!
//! All functions operate on slices of listings and return plain values. They
//! are deterministic and do not perform network calls. Averages are rounded
//! half-up to whole dollars; an empty qualifying subset yields 0.

use std::collections::HashMap;
use std::fmt;

use airtable_api::types::Listing;
use serde::Serialize;

/// Group key for listings without a location.
pub const UNKNOWN_AREA: &str = "Unknown";

/// Number of areas [`top_movers`] returns when the caller has no preference.
pub const DEFAULT_TOP_MOVERS: usize = 5;

/// Percent change at which an area counts as moving up or down.
const TREND_THRESHOLD_PERCENT: i64 = 5;

/// Direction of an area's recent prices relative to its older ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    fn from_percent(percent: i64) -> Self {
        if percent >= TREND_THRESHOLD_PERCENT {
            Trend::Up
        } else if percent <= -TREND_THRESHOLD_PERCENT {
            Trend::Down
        } else {
            Trend::Stable
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Stable => "stable",
        };
        write!(f, "{}", label)
    }
}

/// Listings sharing one location string, in input order.
#[derive(Debug, Clone)]
pub struct LocationGroup<'a> {
    pub location: String,
    pub listings: Vec<&'a Listing>,
}

/// Price summary of a set of listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct LocationStats {
    pub average_price: i64,
    pub average_price_per_sqft: i64,
    /// All listings in the set, including those without a price.
    pub count: usize,
}

/// Trend summary for one area.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketTrend {
    pub area: String,
    pub count: usize,
    pub average_price: i64,
    pub average_price_per_sqft: i64,
    /// Recent-half average minus older-half average.
    pub price_change: i64,
    pub price_change_percent: i64,
    pub trend: Trend,
}

/// Whole-market summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallStats {
    pub total_listings: usize,
    pub average_price: i64,
    pub average_price_per_sqft: i64,
    /// Mean of the per-area percent changes.
    pub average_trend_percent: i64,
    /// Sum of all positive asking prices.
    pub total_market_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceChange {
    pub change: f64,
    pub percent: i64,
}

/// Rounds half-way values towards positive infinity, so -2.5 becomes -2.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Price per square foot, rounded. Zero when the area is not positive.
pub fn price_per_sqft(price: f64, sqft: f64) -> i64 {
    if sqft <= 0.0 {
        return 0;
    }
    round_half_up(price / sqft)
}

/// Absolute and percent change from `old_price` to `new_price`.
///
/// A non-positive `old_price` has no meaningful baseline and yields zeros.
pub fn price_change(old_price: f64, new_price: f64) -> PriceChange {
    if old_price <= 0.0 {
        return PriceChange {
            change: 0.0,
            percent: 0,
        };
    }
    let change = new_price - old_price;
    PriceChange {
        change,
        percent: round_half_up(change / old_price * 100.0),
    }
}

/// Groups listings by their `Location` value. Missing or empty locations
/// share the [`UNKNOWN_AREA`] group. Groups appear in order of first sighting.
pub fn group_by_location(listings: &[Listing]) -> Vec<LocationGroup<'_>> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<LocationGroup<'_>> = Vec::new();
    for listing in listings {
        let key = listing
            .fields
            .location
            .as_deref()
            .filter(|l| !l.is_empty())
            .unwrap_or(UNKNOWN_AREA);
        let slot = *index.entry(key.to_string()).or_insert_with(|| {
            groups.push(LocationGroup {
                location: key.to_string(),
                listings: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].listings.push(listing);
    }
    groups
}

fn positive_prices<'a>(listings: &'a [&'a Listing]) -> impl Iterator<Item = f64> + 'a {
    listings
        .iter()
        .filter_map(|l| l.fields.price)
        .filter(|price| *price > 0.0)
}

fn mean(sum: f64, count: usize) -> i64 {
    if count == 0 {
        return 0;
    }
    round_half_up(sum / count as f64)
}

/// Average price, average price per square foot, and size of a listing set.
///
/// The per-area figure averages each listing's own `price / sqft` over the
/// listings that have both a positive price and a positive area.
pub fn location_stats(listings: &[&Listing]) -> LocationStats {
    let (price_sum, price_count) =
        positive_prices(listings).fold((0.0, 0usize), |(sum, n), p| (sum + p, n + 1));

    let (ratio_sum, ratio_count) = listings
        .iter()
        .filter_map(|l| match (l.fields.price, l.fields.square_footage) {
            (Some(price), Some(sqft)) if price > 0.0 && sqft > 0.0 => Some(price / sqft),
            _ => None,
        })
        .fold((0.0, 0usize), |(sum, n), r| (sum + r, n + 1));

    LocationStats {
        average_price: mean(price_sum, price_count),
        average_price_per_sqft: mean(ratio_sum, ratio_count),
        count: listings.len(),
    }
}

fn area_trend(group: &LocationGroup<'_>) -> MarketTrend {
    let stats = location_stats(&group.listings);

    // newest first; listings without a creation time sort last
    let mut sorted = group.listings.clone();
    sorted.sort_by(|a, b| b.created_time.cmp(&a.created_time));

    let split = (sorted.len() / 2).max(1).min(sorted.len());
    let (recent, older) = sorted.split_at(split);
    let recent_avg = location_stats(recent).average_price;
    let older_avg = location_stats(older).average_price;

    // an area without an older cohort still reports its absolute change
    let change = recent_avg - older_avg;
    let percent = price_change(older_avg as f64, recent_avg as f64).percent;

    MarketTrend {
        area: group.location.clone(),
        count: stats.count,
        average_price: stats.average_price,
        average_price_per_sqft: stats.average_price_per_sqft,
        price_change: change,
        price_change_percent: percent,
        trend: Trend::from_percent(percent),
    }
}

/// Compares each area's newer half of listings against its older half.
///
/// Listings are ranked by creation time, newest first; the first
/// `max(n / 2, 1)` form the recent cohort and the rest the older one. The
/// reported average price and count cover the whole area.
pub fn analyze_trends(listings: &[Listing]) -> Vec<MarketTrend> {
    group_by_location(listings)
        .iter()
        .filter(|group| !group.listings.is_empty())
        .map(area_trend)
        .collect()
}

/// Areas with at least two listings, ordered by the size of their percent
/// move in either direction, truncated to `limit`.
pub fn top_movers(trends: &[MarketTrend], limit: usize) -> Vec<MarketTrend> {
    let mut movers: Vec<MarketTrend> = trends.iter().filter(|t| t.count >= 2).cloned().collect();
    movers.sort_by(|a, b| {
        b.price_change_percent
            .abs()
            .cmp(&a.price_change_percent.abs())
    });
    movers.truncate(limit);
    movers
}

/// Market-wide averages, total value, and the mean per-area trend.
pub fn overall_stats(listings: &[Listing]) -> OverallStats {
    let refs: Vec<&Listing> = listings.iter().collect();
    let stats = location_stats(&refs);
    let total_market_value: f64 = positive_prices(&refs).sum();

    let trends = analyze_trends(listings);
    let percent_sum: i64 = trends.iter().map(|t| t.price_change_percent).sum();
    let average_trend_percent = mean(percent_sum as f64, trends.len());

    OverallStats {
        total_listings: listings.len(),
        average_price: stats.average_price,
        average_price_per_sqft: stats.average_price_per_sqft,
        average_trend_percent,
        total_market_value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airtable_api::types::ListingFields;
    use chrono::{DateTime, Utc};

    fn listing(
        id: &str,
        location: Option<&str>,
        price: Option<f64>,
        sqft: Option<f64>,
        created: Option<&str>,
    ) -> Listing {
        Listing {
            id: id.to_string(),
            created_time: created.map(|c| c.parse::<DateTime<Utc>>().unwrap()),
            fields: ListingFields {
                location: location.map(str::to_string),
                price,
                square_footage: sqft,
                ..Default::default()
            },
        }
    }

    fn market() -> Vec<Listing> {
        let jh = Some("Jolly Harbour");
        let eh = Some("English Harbour");
        let fa = Some("Falmouth");
        vec![
            listing("jh-feb", jh, Some(800_000.0), Some(2000.0), Some("2024-02-01T00:00:00Z")),
            listing("eh-old", eh, Some(520_000.0), None, Some("2023-06-01T00:00:00Z")),
            listing("jh-apr", jh, Some(1_100_000.0), Some(2000.0), Some("2024-04-01T00:00:00Z")),
            listing("unk", None, Some(300_000.0), None, Some("2024-01-01T00:00:00Z")),
            listing("jh-jan", jh, Some(700_000.0), Some(2000.0), Some("2024-01-01T00:00:00Z")),
            listing("fa-new", fa, Some(300_000.0), None, Some("2024-05-01T00:00:00Z")),
            listing("eh-new", eh, Some(500_000.0), None, Some("2024-03-01T00:00:00Z")),
            listing("jh-mar", jh, Some(900_000.0), Some(2000.0), Some("2024-03-01T00:00:00Z")),
            listing("fa-old1", fa, Some(400_000.0), None, Some("2023-01-01T00:00:00Z")),
            listing("fa-old2", fa, Some(400_000.0), None, None),
        ]
    }

    #[test]
    fn rounding_matches_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(437.5), 438);
        assert_eq!(round_half_up(-3.846), -4);
    }

    #[test]
    fn price_per_sqft_guards_zero_area() {
        assert_eq!(price_per_sqft(500_000.0, 2000.0), 250);
        assert_eq!(price_per_sqft(500_000.0, 0.0), 0);
        assert_eq!(price_per_sqft(500_000.0, -10.0), 0);
    }

    #[test]
    fn price_change_against_baseline() {
        assert_eq!(
            price_change(400_000.0, 500_000.0),
            PriceChange {
                change: 100_000.0,
                percent: 25
            }
        );
        assert_eq!(price_change(0.0, 500_000.0).percent, 0);
        assert_eq!(price_change(0.0, 500_000.0).change, 0.0);
    }

    #[test]
    fn groups_follow_first_appearance() {
        let listings = market();
        let groups = group_by_location(&listings);
        let keys: Vec<&str> = groups.iter().map(|g| g.location.as_str()).collect();
        assert_eq!(
            keys,
            vec!["Jolly Harbour", "English Harbour", UNKNOWN_AREA, "Falmouth"]
        );
        let jh: Vec<&str> = groups[0].listings.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(jh, vec!["jh-feb", "jh-apr", "jh-jan", "jh-mar"]);
    }

    #[test]
    fn empty_location_joins_unknown_group() {
        let listings = vec![
            listing("a", Some(""), None, None, None),
            listing("b", None, None, None, None),
        ];
        let groups = group_by_location(&listings);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].location, UNKNOWN_AREA);
        assert_eq!(groups[0].listings.len(), 2);
    }

    #[test]
    fn location_stats_averages_per_listing_ratios() {
        let a = listing("a", None, Some(300_000.0), Some(1000.0), None);
        let b = listing("b", None, Some(400_000.0), Some(2000.0), None);
        let c = listing("c", None, None, Some(1500.0), None);
        let stats = location_stats(&[&a, &b, &c]);
        // (300 + 200) / 2, not 700_000 / 3000
        assert_eq!(stats.average_price_per_sqft, 250);
        assert_eq!(stats.average_price, 350_000);
        assert_eq!(stats.count, 3);
    }

    #[test]
    fn location_stats_on_sparse_data() {
        let a = listing("a", None, Some(250_000.0), None, None);
        let b = listing("b", None, None, Some(900.0), None);
        let c = listing("c", None, Some(0.0), Some(900.0), None);
        let stats = location_stats(&[&a, &b, &c]);
        assert_eq!(stats.average_price_per_sqft, 0);
        assert_eq!(stats.average_price, 250_000);
        assert_eq!(stats.count, 3);

        assert_eq!(location_stats(&[]), LocationStats::default());
    }

    #[test]
    fn trends_split_recent_and_older_halves() {
        let trends = analyze_trends(&market());
        assert_eq!(trends.len(), 4);

        let jh = &trends[0];
        assert_eq!(jh.area, "Jolly Harbour");
        assert_eq!(jh.count, 4);
        assert_eq!(jh.average_price, 875_000);
        assert_eq!(jh.average_price_per_sqft, 438);
        assert_eq!(jh.price_change, 250_000);
        assert_eq!(jh.price_change_percent, 33);
        assert_eq!(jh.trend, Trend::Up);

        let eh = &trends[1];
        assert_eq!(eh.price_change, -20_000);
        assert_eq!(eh.price_change_percent, -4);
        assert_eq!(eh.trend, Trend::Stable);

        let unknown = &trends[2];
        assert_eq!(unknown.area, UNKNOWN_AREA);
        assert_eq!(unknown.count, 1);
        assert_eq!(unknown.price_change, 300_000);
        assert_eq!(unknown.price_change_percent, 0);
        assert_eq!(unknown.trend, Trend::Stable);

        // odd group: newest one against the older two, undated counts as oldest
        let fa = &trends[3];
        assert_eq!(fa.count, 3);
        assert_eq!(fa.price_change, -100_000);
        assert_eq!(fa.price_change_percent, -25);
        assert_eq!(fa.trend, Trend::Down);
    }

    #[test]
    fn single_listing_area_has_change_but_no_percent() {
        let listings = vec![listing("solo", Some("Parham"), Some(250_000.0), None, None)];
        let trends = analyze_trends(&listings);
        assert_eq!(trends.len(), 1);
        assert_eq!(trends[0].price_change, 250_000);
        assert_eq!(trends[0].price_change_percent, 0);
        assert_eq!(trends[0].trend, Trend::Stable);
    }

    #[test]
    fn trend_thresholds_are_inclusive() {
        assert_eq!(Trend::from_percent(5), Trend::Up);
        assert_eq!(Trend::from_percent(4), Trend::Stable);
        assert_eq!(Trend::from_percent(-4), Trend::Stable);
        assert_eq!(Trend::from_percent(-5), Trend::Down);
    }

    #[test]
    fn trends_of_empty_market() {
        assert!(analyze_trends(&[]).is_empty());
    }

    #[test]
    fn top_movers_skip_single_listing_areas() {
        let trends = analyze_trends(&market());
        let movers = top_movers(&trends, DEFAULT_TOP_MOVERS);
        let areas: Vec<&str> = movers.iter().map(|t| t.area.as_str()).collect();
        assert_eq!(areas, vec!["Jolly Harbour", "Falmouth", "English Harbour"]);

        let top = top_movers(&trends, 1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].area, "Jolly Harbour");
    }

    #[test]
    fn overall_stats_for_market() {
        let stats = overall_stats(&market());
        assert_eq!(stats.total_listings, 10);
        assert_eq!(stats.total_market_value, 5_920_000.0);
        assert_eq!(stats.average_price, 592_000);
        assert_eq!(stats.average_price_per_sqft, 438);
        // (33 - 4 + 0 - 25) / 4
        assert_eq!(stats.average_trend_percent, 1);
    }

    #[test]
    fn overall_stats_for_empty_market() {
        let stats = overall_stats(&[]);
        assert_eq!(stats.total_listings, 0);
        assert_eq!(stats.average_price, 0);
        assert_eq!(stats.average_price_per_sqft, 0);
        assert_eq!(stats.average_trend_percent, 0);
        assert_eq!(stats.total_market_value, 0.0);
    }

    #[test]
    fn trend_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Trend::Down).unwrap(), r#""down""#);
        assert_eq!(Trend::Up.to_string(), "up");
    }
}
