use url::Url;

use super::{common::QueryCommon, Query};

/// Query for the "list records" endpoint of a table.
#[derive(Clone, Debug, Default)]
pub struct RecordQuery {
    pub common: QueryCommon,
    pub view: Option<String>,
    pub max_records: Option<u32>,
    pub fields: Vec<String>,
}

impl Query for RecordQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        if let Some(view) = &self.view {
            url.query_pairs_mut().append_pair("view", view);
        };
        if let Some(max_records) = self.max_records {
            url.query_pairs_mut()
                .append_pair("maxRecords", &max_records.to_string());
        };
        for field in self.fields.iter() {
            url.query_pairs_mut().append_pair("fields[]", field);
        }
        url
    }
}

impl RecordQuery {
    pub fn with_view(mut self, view: &str) -> Self {
        self.view = Some(view.to_string());
        self
    }

    pub fn with_max_records(mut self, max_records: u32) -> Self {
        self.max_records = Some(max_records);
        self
    }

    pub fn with_field(mut self, field: &str) -> Self {
        self.fields.push(field.to_string());
        self
    }
    pub fn with_fields(mut self, fields: &[String]) -> Self {
        self.fields.extend_from_slice(fields);
        self
    }
}
