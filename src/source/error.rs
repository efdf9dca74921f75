use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse structure nodes: {0}")]
    Parse(String),

    #[error("API reported failure: {0}")]
    Api(String),

    #[error("API returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid source URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}
