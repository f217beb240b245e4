//! Shared query infrastructure: the [`Query`] trait and [`QueryCommon`] cursor fields.

use url::Url;

/// Trait implemented by all query builders. Provides URL serialization and
/// shared builder methods for cursor pagination.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;

    /// Returns a mutable reference to the common query fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Continues a listing from the cursor returned by the previous page.
    fn with_offset(mut self, offset: &str) -> Self
    where
        Self: Sized,
    {
        self.get_common().offset = Some(offset.to_string());
        self
    }

    /// Sets the number of records per page (Airtable caps this at 100).
    fn with_page_size(mut self, page_size: u32) -> Self
    where
        Self: Sized,
    {
        self.get_common().page_size = Some(page_size);
        self
    }
}

/// Fields shared by all query types: the continuation cursor and page size.
#[derive(Clone, Debug, Default)]
pub struct QueryCommon {
    /// Opaque cursor from the previous response. `None` starts from the beginning.
    pub offset: Option<String>,
    /// Records per page. `None` uses the API default.
    pub page_size: Option<u32>,
}

impl QueryCommon {
    /// Appends the cursor parameters to the URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if let Some(page_size) = self.page_size {
            url.query_pairs_mut()
                .append_pair("pageSize", &page_size.to_string());
        };
        if let Some(offset) = &self.offset {
            url.query_pairs_mut().append_pair("offset", offset);
        };
        url
    }
}
