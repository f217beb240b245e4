//! Datastore configuration read from the environment.

use std::fmt;
use std::str::FromStr;

use crate::error::MarketplaceError;

pub const ENV_API_KEY: &str = "AIRTABLE_API_KEY";
pub const ENV_BASE_ID: &str = "AIRTABLE_BASE_ID";
pub const ENV_TABLE_NAME: &str = "AIRTABLE_TABLE_NAME";
pub const ENV_COMMERCIAL_TABLE_NAME: &str = "AIRTABLE_COMMERCIAL_TABLE_NAME";
pub const ENV_BASE_URL: &str = "AIRTABLE_BASE_URL";

/// Which listings table to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PropertyKind {
    #[default]
    Residential,
    Commercial,
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKind::Residential => write!(f, "residential"),
            PropertyKind::Commercial => write!(f, "commercial"),
        }
    }
}

impl FromStr for PropertyKind {
    type Err = MarketplaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "residential" | "r" => Ok(PropertyKind::Residential),
            "commercial" | "c" => Ok(PropertyKind::Commercial),
            _ => Err(MarketplaceError::InvalidInput(format!(
                "unknown property kind '{}'. Valid values: residential, commercial",
                s
            ))),
        }
    }
}

/// Connection settings for the Airtable base holding the listings.
#[derive(Clone)]
pub struct AirtableConfig {
    pub api_key: String,
    pub base_id: String,
    pub residential_table: Option<String>,
    pub commercial_table: Option<String>,
    /// Overrides the public API endpoint. Used for testing.
    pub base_url: Option<String>,
}

impl fmt::Debug for AirtableConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AirtableConfig")
            .field("api_key", &"<redacted>")
            .field("base_id", &self.base_id)
            .field("residential_table", &self.residential_table)
            .field("commercial_table", &self.commercial_table)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl AirtableConfig {
    /// Reads the configuration from process environment variables.
    pub fn from_env() -> Result<Self, MarketplaceError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, treating blank values as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, MarketplaceError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| {
            get(key).ok_or_else(|| {
                MarketplaceError::Config(format!("missing environment variable {}", key))
            })
        };
        Ok(Self {
            api_key: require(ENV_API_KEY)?,
            base_id: require(ENV_BASE_ID)?,
            residential_table: get(ENV_TABLE_NAME),
            commercial_table: get(ENV_COMMERCIAL_TABLE_NAME),
            base_url: get(ENV_BASE_URL),
        })
    }

    /// Returns the table name for `kind`, or a configuration error if unset.
    pub fn table_for(&self, kind: PropertyKind) -> Result<&str, MarketplaceError> {
        let (table, var) = match kind {
            PropertyKind::Residential => (&self.residential_table, ENV_TABLE_NAME),
            PropertyKind::Commercial => (&self.commercial_table, ENV_COMMERCIAL_TABLE_NAME),
        };
        table.as_deref().ok_or_else(|| {
            MarketplaceError::Config(format!(
                "missing Airtable configuration for {} properties ({})",
                kind, var
            ))
        })
    }
}
