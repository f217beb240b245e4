pub mod listings;
pub mod map;
pub mod market;

use anyhow::Result;
use clap::Args;
use marketplace_lib::types::Listing;
use marketplace_lib::{apply_filters, validation, ListingClient, PropertyKind};

/// Filter flags shared by every subcommand.
#[derive(Args)]
pub struct FilterArgs {
    /// Property table to read: residential or commercial
    #[arg(long, default_value = "residential")]
    pub kind: String,

    /// Minimum number of bedrooms
    #[arg(long)]
    pub bedrooms: Option<String>,

    /// Price range as <min>-<max> (e.g. 500000-1000000)
    #[arg(long)]
    pub price_range: Option<String>,

    /// Case-insensitive search over address or location
    #[arg(long)]
    pub location: Option<String>,
}

/// Fetches the requested table and applies the filter flags to it.
pub async fn load_filtered(args: &FilterArgs, client: &ListingClient) -> Result<Vec<Listing>> {
    let kind: PropertyKind = args.kind.parse()?;
    let criteria = validation::parse_filter_criteria(
        args.bedrooms.as_deref().unwrap_or(""),
        args.price_range.as_deref().unwrap_or(""),
        args.location.as_deref().unwrap_or(""),
    )?;

    let listings = client.fetch_all(kind).await?;
    if !criteria.is_active() {
        return Ok(listings);
    }
    let filtered = apply_filters(&listings, &criteria);
    eprintln!("{} of {} listings match", filtered.len(), listings.len());
    Ok(filtered)
}
