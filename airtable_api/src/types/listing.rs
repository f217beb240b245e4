//! Listing records as stored in the residential and commercial tables.

use serde::{Deserialize, Serialize};

use super::Record;

/// A property listing: an Airtable record carrying [`ListingFields`].
pub type Listing = Record<ListingFields>;

/// Column values of a listing row. Every column is optional; Airtable omits
/// empty cells from the payload entirely.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ListingFields {
    #[serde(rename = "Title", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Asking price in USD.
    #[serde(rename = "Price", default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    /// Short bedroom column. Some tables carry both this and `Bedrooms`;
    /// see [`ListingFields::bedroom_count`].
    #[serde(rename = "Beds", default, skip_serializing_if = "Option::is_none")]
    pub beds: Option<f64>,

    #[serde(rename = "Bedrooms", default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<f64>,

    #[serde(rename = "Baths", default, skip_serializing_if = "Option::is_none")]
    pub baths: Option<f64>,

    #[serde(
        rename = "Bathrooms",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub bathrooms: Option<f64>,

    /// Interior area in square feet.
    #[serde(
        rename = "SquareFootage",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub square_footage: Option<f64>,

    #[serde(rename = "Address", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Area or neighbourhood name, e.g. "Jolly Harbour".
    #[serde(rename = "Location", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(
        rename = "Description",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    #[serde(
        rename = "PropertyType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub property_type: Option<String>,

    #[serde(rename = "Status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(
        rename = "Property URL",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub property_url: Option<String>,

    #[serde(rename = "Image", default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<Attachment>,
}

impl ListingFields {
    /// Bedroom count, preferring `Beds` over `Bedrooms` when both are filled.
    pub fn bedroom_count(&self) -> Option<f64> {
        self.beds.or(self.bedrooms)
    }

    /// Bathroom count, preferring `Baths` over `Bathrooms` when both are filled.
    pub fn bathroom_count(&self) -> Option<f64> {
        self.baths.or(self.bathrooms)
    }
}

/// An attachment cell entry (listing photo).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Attachment {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(rename = "type", default)]
    pub mime_type: Option<String>,
}
