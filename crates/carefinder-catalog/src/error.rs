use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by catalog endpoint (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("catalog endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("ZIP table read error for {path}: {source}")]
    ZipTableIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("ZIP table parse error for {path}: {source}")]
    ZipTableParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
