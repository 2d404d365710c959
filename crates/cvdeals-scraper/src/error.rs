use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The anti-forgery token could not be harvested from the listing page.
    /// Treated as a structural-change signal, not a transient error: the
    /// whole retailer run aborts and no snapshot is written.
    #[error("anti-forgery token not found on {url}")]
    TokenMissing { url: String },

    #[error("pagination limit reached for {brand}/{category}: exceeded {max_pages} pages")]
    PaginationLimit {
        brand: String,
        category: String,
        max_pages: u32,
    },
}
