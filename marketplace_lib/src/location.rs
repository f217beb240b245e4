//! Place-name to coordinate lookup for Antigua.
//!
//! Resolution runs against a fixed gazetteer in definition order: exact name,
//! then substring containment in either direction, then word-by-word
//! containment for longer strings such as listing titles. The first entry
//! that satisfies a step wins. Resolved points get a small random offset so
//! that listings sharing a place name do not stack on one map marker.

use rand::Rng;
use serde::Serialize;

/// Total width of the jitter window in degrees (about 800-900 metres).
pub const JITTER_RANGE: f64 = 0.008;

/// Placeholder returned by [`display_name`] for missing input.
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// Known place names and their approximate `(latitude, longitude)`.
///
/// Order matters: earlier entries win partial matches.
pub const GAZETTEER: &[(&str, (f64, f64))] = &[
    ("jolly harbour", (17.065, -61.8862)),
    ("st. johns", (17.12, -61.845)),
    ("st johns", (17.12, -61.845)),
    ("saint johns", (17.12, -61.845)),
    ("saint john's", (17.12, -61.845)),
    ("english harbour", (17.0058, -61.7625)),
    ("falmouth", (17.0167, -61.7833)),
    ("five islands", (17.1167, -61.8833)),
    ("cedar grove", (17.1333, -61.8167)),
    ("crosbies", (17.1, -61.85)),
    ("pigotts", (17.1167, -61.8333)),
    ("parham", (17.0833, -61.7833)),
    ("liberta", (17.05, -61.8)),
    ("old road", (17.0667, -61.8167)),
    ("freetown", (17.0833, -61.85)),
    ("bolans", (17.05, -61.8833)),
    ("bolands", (17.05, -61.8833)),
    ("urlings", (17.0667, -61.9)),
    ("bendals", (17.1, -61.8)),
    ("willoughby bay", (17.0, -61.7167)),
    ("dickenson bay", (17.15, -61.8333)),
    ("runaway bay", (17.1333, -61.85)),
    ("half moon bay", (17.0167, -61.7167)),
    ("mamora bay", (17.05, -61.75)),
    ("nonsuch bay", (17.0716, -61.702)),
    ("harbour island", (17.065, -61.8862)),
    ("the gardens", (17.065, -61.8862)),
    ("antigua", (17.1274, -61.8468)),
    ("sugar ridge", (17.1, -61.78)),
    ("sugar ridge homes", (17.1, -61.78)),
    ("seatons", (17.14, -61.81)),
    ("valley church", (17.04, -61.87)),
    ("dark wood", (17.04, -61.87)),
    ("pearns point", (17.01, -61.73)),
    ("cedar valley", (17.13, -61.82)),
    ("galley bay", (17.11, -61.89)),
    ("galley bay heights", (17.11, -61.89)),
    ("hodges bay", (17.14, -61.8)),
    ("ffreys", (17.08, -61.92)),
    ("turtle bay", (17.09, -61.7)),
    ("johnsons point", (17.03, -61.89)),
    ("henry heights", (17.11, -61.86)),
    ("horsford hill", (17.12, -61.83)),
    ("big creek", (17.02, -61.75)),
    ("seaforth", (17.02, -61.75)),
    ("north finger", (17.065, -61.8862)),
    ("south finger", (17.065, -61.8862)),
    ("sunset lane", (17.065, -61.8862)),
];

/// A point on the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Looks up the gazetteer entry for `text` without applying jitter.
///
/// Returns the matched key and its base coordinate, or `None` when nothing in
/// the gazetteer overlaps the text. Blank input never matches.
pub fn lookup(text: &str) -> Option<(&'static str, Coordinate)> {
    let normalized = text.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }

    let found = GAZETTEER
        .iter()
        .find(|(key, _)| *key == normalized)
        .or_else(|| {
            GAZETTEER
                .iter()
                .find(|(key, _)| key.contains(normalized.as_str()) || normalized.contains(key))
        })
        .or_else(|| {
            let words: Vec<&str> = normalized
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|w| !w.is_empty())
                .collect();
            GAZETTEER.iter().find(|(key, _)| {
                key.split(' ').all(|part| {
                    words
                        .iter()
                        .any(|word| word.contains(part) || part.contains(word))
                })
            })
        })?;

    let (key, (latitude, longitude)) = *found;
    Some((
        key,
        Coordinate {
            latitude,
            longitude,
        },
    ))
}

/// Resolves `text` to a jittered coordinate, drawing jitter from `next_random`.
///
/// `next_random` must yield values in `[0, 1)`; each call offsets one axis by
/// `(value - 0.5) * JITTER_RANGE`. It is not called when nothing matches.
pub fn resolve_with<F>(text: &str, mut next_random: F) -> Option<Coordinate>
where
    F: FnMut() -> f64,
{
    let (_, base) = lookup(text)?;
    let lat_offset = (next_random() - 0.5) * JITTER_RANGE;
    let lng_offset = (next_random() - 0.5) * JITTER_RANGE;
    Some(Coordinate {
        latitude: base.latitude + lat_offset,
        longitude: base.longitude + lng_offset,
    })
}

/// Resolves `text` to a jittered coordinate using `rng` for the offsets.
pub fn resolve<R: Rng>(text: &str, rng: &mut R) -> Option<Coordinate> {
    resolve_with(text, || rng.gen::<f64>())
}

/// Title-cases each space-separated word, or returns [`UNKNOWN_LOCATION`].
pub fn display_name(location: Option<&str>) -> String {
    let location = match location {
        Some(l) if !l.is_empty() => l,
        _ => return UNKNOWN_LOCATION.to_string(),
    };
    location
        .to_lowercase()
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
