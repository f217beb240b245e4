use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Airtable record identifier (`rec...`).
pub type RecordID = String;

/// A single row of an Airtable table.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Record<T> {
    pub id: RecordID,
    /// When the row was created. Airtable always sends it; fixtures may not.
    #[serde(default)]
    pub created_time: Option<DateTime<Utc>>,
    pub fields: T,
}

/// One page of a "list records" response.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RecordPage<T> {
    pub records: Vec<Record<T>>,
    /// Cursor for the next page. Absent on the last page.
    #[serde(default)]
    pub offset: Option<String>,
}
