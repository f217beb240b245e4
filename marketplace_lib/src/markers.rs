//! Map marker placement for listings.

use airtable_api::types::Listing;
use rand::Rng;
use serde::Serialize;

use crate::location::{self, Coordinate};

/// A listing pinned to the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub listing_id: String,
    pub title: Option<String>,
    pub price: Option<f64>,
    pub address: Option<String>,
    pub coordinate: Coordinate,
}

/// Markers for every listing that could be placed, plus the ids of those
/// that could not.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarkerPlacement {
    pub markers: Vec<MapMarker>,
    pub unmapped: Vec<String>,
}

/// Resolves one listing: its address first, then its title.
pub fn locate<R: Rng>(listing: &Listing, rng: &mut R) -> Option<Coordinate> {
    let fields = &listing.fields;
    fields
        .address
        .as_deref()
        .and_then(|address| location::resolve(address, rng))
        .or_else(|| {
            fields
                .title
                .as_deref()
                .and_then(|title| location::resolve(title, rng))
        })
}

/// Places a marker for each listing whose address or title names a known place.
pub fn place_markers<R: Rng>(listings: &[Listing], rng: &mut R) -> MarkerPlacement {
    let mut placement = MarkerPlacement::default();
    for listing in listings {
        match locate(listing, rng) {
            Some(coordinate) => placement.markers.push(MapMarker {
                listing_id: listing.id.clone(),
                title: listing.fields.title.clone(),
                price: listing.fields.price,
                address: listing.fields.address.clone(),
                coordinate,
            }),
            None => placement.unmapped.push(listing.id.clone()),
        }
    }
    if !placement.unmapped.is_empty() {
        tracing::debug!(
            "{} of {} listings could not be placed on the map",
            placement.unmapped.len(),
            listings.len()
        );
    }
    placement
}

#[cfg(test)]
mod tests {
    use super::*;
    use airtable_api::types::ListingFields;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn listing(id: &str, address: Option<&str>, title: Option<&str>) -> Listing {
        Listing {
            id: id.to_string(),
            created_time: None,
            fields: ListingFields {
                address: address.map(str::to_string),
                title: title.map(str::to_string),
                price: Some(450_000.0),
                ..Default::default()
            },
        }
    }

    fn near(c: &Coordinate, lat: f64, lng: f64) -> bool {
        (c.latitude - lat).abs() <= 0.004 + 1e-9 && (c.longitude - lng).abs() <= 0.004 + 1e-9
    }

    #[test]
    fn address_wins_over_title() {
        let mut rng = StdRng::seed_from_u64(1);
        let l = listing("a", Some("Falmouth"), Some("Villa in Jolly Harbour"));
        let c = locate(&l, &mut rng).unwrap();
        assert!(near(&c, 17.0167, -61.7833));
    }

    #[test]
    fn falls_back_to_title() {
        let mut rng = StdRng::seed_from_u64(2);
        let l = listing("a", Some("Lot 7"), Some("Dickenson Bay beach house"));
        let c = locate(&l, &mut rng).unwrap();
        assert!(near(&c, 17.15, -61.8333));
    }

    #[test]
    fn placement_counts_unmapped() {
        let mut rng = StdRng::seed_from_u64(3);
        let listings = vec![
            listing("mapped", Some("English Harbour"), None),
            listing("lost", Some("Nowhereville"), Some("Mystery plot")),
            listing("bare", None, None),
        ];
        let placement = place_markers(&listings, &mut rng);
        assert_eq!(placement.markers.len(), 1);
        assert_eq!(placement.markers[0].listing_id, "mapped");
        assert_eq!(placement.markers[0].price, Some(450_000.0));
        assert_eq!(placement.unmapped, vec!["lost".to_string(), "bare".to_string()]);
    }
}
