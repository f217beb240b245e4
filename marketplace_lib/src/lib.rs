//! Library layer for the Antigua listings marketplace: listing filters,
//! place-name resolution, market aggregation, and a retrying listing source.
//!
//! The filter, location, and market modules are pure functions over
//! [`types::Listing`] values. [`ListingClient`] reads those listings from
//! Airtable.

pub mod client;
pub mod config;
pub mod error;
pub mod filters;
pub mod location;
pub mod market;
pub mod markers;
pub mod pagination;
pub mod validation;

pub use airtable_api;
pub use airtable_api::types;

pub use client::{ListingClient, RetryConfig};
pub use config::{AirtableConfig, PropertyKind};
pub use error::MarketplaceError;
pub use filters::{apply_filters, FilterCriteria, PriceRange};
pub use location::Coordinate;
pub use market::{LocationStats, MarketTrend, OverallStats, Trend};
pub use markers::{MapMarker, MarkerPlacement};
pub use pagination::Page;
