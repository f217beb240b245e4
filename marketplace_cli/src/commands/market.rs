use anyhow::Result;
use clap::Args;
use marketplace_lib::market::{self, DEFAULT_TOP_MOVERS};
use marketplace_lib::{ListingClient, MarketTrend, OverallStats};
use serde::Serialize;

use super::{load_filtered, FilterArgs};
use crate::output::{
    print_json, print_overall_table, print_trends_csv, print_trends_markdown, print_trends_table,
    OutputFormat,
};

#[derive(Args)]
pub struct MarketArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Number of areas to list, ranked by the size of their price change
    #[arg(long, default_value_t = DEFAULT_TOP_MOVERS)]
    pub limit: usize,
}

#[derive(Serialize)]
struct MarketReport {
    overall: OverallStats,
    top_movers: Vec<MarketTrend>,
}

pub async fn run(args: &MarketArgs, client: &ListingClient, format: &OutputFormat) -> Result<()> {
    let listings = load_filtered(&args.filters, client).await?;

    let trends = market::analyze_trends(&listings);
    let top_movers = market::top_movers(&trends, args.limit);
    let overall = market::overall_stats(&listings);

    eprintln!(
        "{} areas, showing top {}",
        trends.len(),
        top_movers.len()
    );

    match format {
        OutputFormat::Table => {
            print_overall_table(&overall);
            print_trends_table(&top_movers);
        }
        OutputFormat::Json => print_json(&MarketReport {
            overall,
            top_movers,
        }),
        OutputFormat::Csv => print_trends_csv(&top_movers)?,
        OutputFormat::Markdown => print_trends_markdown(&top_movers),
    }

    Ok(())
}
