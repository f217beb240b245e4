mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use marketplace_lib::{AirtableConfig, ListingClient};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "marketplace")]
#[command(about = "Browse and analyse Antigua property listings")]
struct Cli {
    /// Output format: table, json, csv, or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List listings matching the given filters
    Listings(commands::listings::ListingsArgs),
    /// Show per-area price trends and market totals
    Market(commands::market::MarketArgs),
    /// Place listings on the map
    Map(commands::map::MapArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("marketplace=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        "markdown" | "md" => OutputFormat::Markdown,
        _ => OutputFormat::Table,
    };

    let config = AirtableConfig::from_env()?;
    let client = ListingClient::new(config);

    match &cli.command {
        Commands::Listings(args) => commands::listings::run(args, &client, &format).await?,
        Commands::Market(args) => commands::market::run(args, &client, &format).await?,
        Commands::Map(args) => commands::map::run(args, &client, &format).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn location_help_names_only_searched_fields() {
        let cmd = Cli::command();
        for name in ["listings", "market", "map"] {
            let sub = cmd.find_subcommand(name).unwrap();
            let location = sub
                .get_arguments()
                .find(|arg| arg.get_id().as_str() == "location")
                .unwrap();
            let help = location.get_help().unwrap().to_string();
            assert!(help.contains("address or location"), "{}: {}", name, help);
            assert!(!help.contains("title"), "{}: {}", name, help);
        }
    }
}
