use anyhow::Result;
use clap::Args;
use marketplace_lib::pagination::{paginate, DEFAULT_PAGE_SIZE};
use marketplace_lib::{validation, ListingClient};

use super::{load_filtered, FilterArgs};
use crate::output::{
    print_json, print_listings_csv, print_listings_markdown, print_listings_table, OutputFormat,
};

#[derive(Args)]
pub struct ListingsArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: usize,

    /// Results per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,
}

pub async fn run(args: &ListingsArgs, client: &ListingClient, format: &OutputFormat) -> Result<()> {
    let (page, page_size) = validation::validate_paging(args.page, args.page_size)?;

    let listings = load_filtered(&args.filters, client).await?;
    let page = paginate(&listings, page, page_size);

    let total_pages = page.total.div_ceil(page.limit).max(1);
    eprintln!(
        "Page {}/{} ({} total listings)",
        page.page, total_pages, page.total
    );

    match format {
        OutputFormat::Table => print_listings_table(&page.items),
        OutputFormat::Json => print_json(&page),
        OutputFormat::Csv => print_listings_csv(&page.items)?,
        OutputFormat::Markdown => print_listings_markdown(&page.items),
    }

    Ok(())
}
