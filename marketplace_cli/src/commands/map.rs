use anyhow::Result;
use clap::Args;
use marketplace_lib::markers::place_markers;
use marketplace_lib::ListingClient;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{load_filtered, FilterArgs};
use crate::output::{
    print_json, print_markers_csv, print_markers_markdown, print_markers_table, OutputFormat,
};

#[derive(Args)]
pub struct MapArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Seed for marker jitter, for reproducible coordinates
    #[arg(long)]
    pub seed: Option<u64>,
}

pub async fn run(args: &MapArgs, client: &ListingClient, format: &OutputFormat) -> Result<()> {
    let listings = load_filtered(&args.filters, client).await?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let placement = place_markers(&listings, &mut rng);

    eprintln!(
        "Placed {} of {} listings ({} without a known location)",
        placement.markers.len(),
        listings.len(),
        placement.unmapped.len()
    );

    match format {
        OutputFormat::Table => print_markers_table(&placement.markers),
        OutputFormat::Json => print_json(&placement),
        OutputFormat::Csv => print_markers_csv(&placement.markers)?,
        OutputFormat::Markdown => print_markers_markdown(&placement.markers),
    }

    Ok(())
}
