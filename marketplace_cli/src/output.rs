use anyhow::Result;
use marketplace_lib::location::display_name;
use marketplace_lib::market::price_per_sqft;
use marketplace_lib::types::Listing;
use marketplace_lib::{MapMarker, MarketTrend, OverallStats};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

#[derive(Tabled, Serialize)]
struct ListingRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    #[serde(rename = "Title")]
    title: String,
    #[tabled(rename = "Location")]
    #[serde(rename = "Location")]
    location: String,
    #[tabled(rename = "Price")]
    #[serde(rename = "Price")]
    price: String,
    #[tabled(rename = "Beds")]
    #[serde(rename = "Beds")]
    beds: String,
    #[tabled(rename = "Baths")]
    #[serde(rename = "Baths")]
    baths: String,
    #[tabled(rename = "Sq Ft")]
    #[serde(rename = "Sq Ft")]
    square_footage: String,
    #[tabled(rename = "$/Sq Ft")]
    #[serde(rename = "$/Sq Ft")]
    price_per_sqft: String,
}

#[derive(Tabled, Serialize)]
struct TrendRow {
    #[tabled(rename = "Area")]
    #[serde(rename = "Area")]
    area: String,
    #[tabled(rename = "Listings")]
    #[serde(rename = "Listings")]
    count: usize,
    #[tabled(rename = "Avg Price")]
    #[serde(rename = "Avg Price")]
    average_price: String,
    #[tabled(rename = "Avg $/Sq Ft")]
    #[serde(rename = "Avg $/Sq Ft")]
    average_price_per_sqft: i64,
    #[tabled(rename = "Change")]
    #[serde(rename = "Change")]
    price_change: i64,
    #[tabled(rename = "Change %")]
    #[serde(rename = "Change %")]
    price_change_percent: i64,
    #[tabled(rename = "Trend")]
    #[serde(rename = "Trend")]
    trend: String,
}

#[derive(Tabled)]
struct OverallRow {
    #[tabled(rename = "Listings")]
    total_listings: usize,
    #[tabled(rename = "Avg Price")]
    average_price: String,
    #[tabled(rename = "Avg $/Sq Ft")]
    average_price_per_sqft: i64,
    #[tabled(rename = "Avg Trend %")]
    average_trend_percent: i64,
    #[tabled(rename = "Market Value")]
    total_market_value: String,
}

#[derive(Tabled, Serialize)]
struct MarkerRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    #[serde(rename = "Title")]
    title: String,
    #[tabled(rename = "Price")]
    #[serde(rename = "Price")]
    price: String,
    #[tabled(rename = "Latitude")]
    #[serde(rename = "Latitude")]
    latitude: String,
    #[tabled(rename = "Longitude")]
    #[serde(rename = "Longitude")]
    longitude: String,
}

// -- Row builders --

fn build_listing_rows(listings: &[Listing]) -> Vec<ListingRow> {
    listings
        .iter()
        .map(|l| {
            let f = &l.fields;
            let ppsf = match (f.price, f.square_footage) {
                (Some(price), Some(sqft)) if price > 0.0 && sqft > 0.0 => {
                    format!("${}", price_per_sqft(price, sqft))
                }
                _ => String::new(),
            };
            ListingRow {
                id: l.id.clone(),
                title: f.title.clone().unwrap_or_default(),
                location: display_name(f.location.as_deref()),
                price: f.price.map(format_value).unwrap_or_default(),
                beds: format_count(f.bedroom_count()),
                baths: format_count(f.bathroom_count()),
                square_footage: format_count(f.square_footage),
                price_per_sqft: ppsf,
            }
        })
        .collect()
}

fn build_trend_rows(trends: &[MarketTrend]) -> Vec<TrendRow> {
    trends
        .iter()
        .map(|t| TrendRow {
            area: t.area.clone(),
            count: t.count,
            average_price: format_value(t.average_price as f64),
            average_price_per_sqft: t.average_price_per_sqft,
            price_change: t.price_change,
            price_change_percent: t.price_change_percent,
            trend: t.trend.to_string(),
        })
        .collect()
}

fn build_overall_row(overall: &OverallStats) -> OverallRow {
    OverallRow {
        total_listings: overall.total_listings,
        average_price: format_value(overall.average_price as f64),
        average_price_per_sqft: overall.average_price_per_sqft,
        average_trend_percent: overall.average_trend_percent,
        total_market_value: format_value(overall.total_market_value),
    }
}

fn build_marker_rows(markers: &[MapMarker]) -> Vec<MarkerRow> {
    markers
        .iter()
        .map(|m| MarkerRow {
            id: m.listing_id.clone(),
            title: m.title.clone().unwrap_or_default(),
            price: m.price.map(format_value).unwrap_or_default(),
            latitude: format!("{:.5}", m.coordinate.latitude),
            longitude: format!("{:.5}", m.coordinate.longitude),
        })
        .collect()
}

// -- Table output --

pub fn print_listings_table(listings: &[Listing]) {
    println!("{}", Table::new(build_listing_rows(listings)));
}

pub fn print_trends_table(trends: &[MarketTrend]) {
    println!("{}", Table::new(build_trend_rows(trends)));
}

pub fn print_overall_table(overall: &OverallStats) {
    println!("{}", Table::new([build_overall_row(overall)]));
}

pub fn print_markers_table(markers: &[MapMarker]) {
    println!("{}", Table::new(build_marker_rows(markers)));
}

// -- Markdown output --

fn markdown<T: Tabled>(rows: Vec<T>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::markdown());
    table.to_string()
}

pub fn print_listings_markdown(listings: &[Listing]) {
    println!("{}", markdown(build_listing_rows(listings)));
}

pub fn print_trends_markdown(trends: &[MarketTrend]) {
    println!("{}", markdown(build_trend_rows(trends)));
}

pub fn print_markers_markdown(markers: &[MapMarker]) {
    println!("{}", markdown(build_marker_rows(markers)));
}

// -- CSV output --

fn write_csv<T: Serialize, W: std::io::Write>(rows: &[T], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_listings_csv(listings: &[Listing]) -> Result<()> {
    write_csv(&build_listing_rows(listings), std::io::stdout())
}

pub fn print_trends_csv(trends: &[MarketTrend]) -> Result<()> {
    write_csv(&build_trend_rows(trends), std::io::stdout())
}

pub fn print_markers_csv(markers: &[MapMarker]) -> Result<()> {
    write_csv(&build_marker_rows(markers), std::io::stdout())
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

fn format_value(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("${:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("${:.1}K", value / 1_000.0)
    } else {
        format!("${}", value.round() as i64)
    }
}

fn format_count(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketplace_lib::market::Trend;
    use marketplace_lib::types::ListingFields;
    use marketplace_lib::Coordinate;

    fn sample_listing() -> Listing {
        Listing {
            id: "recJolly001".to_string(),
            created_time: None,
            fields: ListingFields {
                title: Some("Waterfront Villa".to_string()),
                price: Some(850_000.0),
                bedrooms: Some(3.0),
                bathrooms: Some(2.5),
                square_footage: Some(2100.0),
                location: Some("jolly harbour".to_string()),
                ..Default::default()
            },
        }
    }

    fn sample_trend() -> MarketTrend {
        MarketTrend {
            area: "Jolly Harbour".to_string(),
            count: 4,
            average_price: 875_000,
            average_price_per_sqft: 438,
            price_change: 250_000,
            price_change_percent: 33,
            trend: Trend::Up,
        }
    }

    fn csv_from_rows<T: Serialize>(rows: &[T]) -> String {
        let mut buf = Vec::new();
        write_csv(rows, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    // -- format_value tests --

    #[test]
    fn test_format_value_millions() {
        assert_eq!(format_value(5_920_000.0), "$5.9M");
    }

    #[test]
    fn test_format_value_thousands() {
        assert_eq!(format_value(425_000.5), "$425.0K");
    }

    #[test]
    fn test_format_value_small() {
        assert_eq!(format_value(950.0), "$950");
        assert_eq!(format_value(0.0), "$0");
    }

    // -- Row builder tests --

    #[test]
    fn test_build_listing_rows_mapping() {
        let rows = build_listing_rows(&[sample_listing()]);
        assert_eq!(rows.len(), 1);

        let row = &rows[0];
        assert_eq!(row.id, "recJolly001");
        assert_eq!(row.location, "Jolly Harbour");
        assert_eq!(row.price, "$850.0K");
        assert_eq!(row.beds, "3");
        assert_eq!(row.baths, "2.5");
        assert_eq!(row.square_footage, "2100");
        assert_eq!(row.price_per_sqft, "$405");
    }

    #[test]
    fn test_build_listing_rows_sparse_listing() {
        let mut listing = sample_listing();
        listing.fields = ListingFields::default();
        let rows = build_listing_rows(&[listing]);
        let row = &rows[0];
        assert_eq!(row.title, "");
        assert_eq!(row.location, "Unknown Location");
        assert_eq!(row.price, "");
        assert_eq!(row.price_per_sqft, "");
    }

    #[test]
    fn test_build_trend_rows_mapping() {
        let rows = build_trend_rows(&[sample_trend()]);
        let row = &rows[0];
        assert_eq!(row.area, "Jolly Harbour");
        assert_eq!(row.average_price, "$875.0K");
        assert_eq!(row.price_change_percent, 33);
        assert_eq!(row.trend, "up");
    }

    #[test]
    fn test_build_marker_rows_rounds_coordinates() {
        let marker = MapMarker {
            listing_id: "recJolly001".to_string(),
            title: None,
            price: Some(850_000.0),
            address: None,
            coordinate: Coordinate {
                latitude: 17.0651234,
                longitude: -61.8862987,
            },
        };
        let rows = build_marker_rows(&[marker]);
        assert_eq!(rows[0].latitude, "17.06512");
        assert_eq!(rows[0].longitude, "-61.88630");
    }

    // -- CSV / markdown tests --

    #[test]
    fn test_csv_listings_headers() {
        let csv = csv_from_rows(&build_listing_rows(&[sample_listing()]));
        let header = csv.lines().next().unwrap();
        assert_eq!(header, "ID,Title,Location,Price,Beds,Baths,Sq Ft,$/Sq Ft");
    }

    #[test]
    fn test_csv_trends_headers() {
        let csv = csv_from_rows(&build_trend_rows(&[sample_trend()]));
        let header = csv.lines().next().unwrap();
        assert_eq!(
            header,
            "Area,Listings,Avg Price,Avg $/Sq Ft,Change,Change %,Trend"
        );
    }

    #[test]
    fn test_markdown_trends_structure() {
        let md = markdown(build_trend_rows(&[sample_trend()]));
        let lines: Vec<&str> = md.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with('|'));
        assert!(lines[0].contains("Area"));
        assert!(lines[1].contains("---"));
        assert!(lines[2].contains("Jolly Harbour"));
    }

    #[test]
    fn test_markdown_empty_produces_headers_only() {
        let md = markdown(build_marker_rows(&[]));
        assert!(md.lines().count() <= 2);
        assert!(!md.contains("rec"));
    }
}
