// src/error.rs
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("fetch failed for {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("no embedded quiz dataset found on the page")]
    DatasetNotFound,

    #[error("malformed dataset: {0}")]
    Json(#[from] serde_json::Error),

    #[error("page title {title:?} must contain exactly two integers (season, week), found {found}")]
    Metadata { title: String, found: usize },

    /// The deck graph could not be wired. Records reached the builder out of order.
    #[error("internal consistency: {0}")]
    Inconsistent(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("deck package: {0}")]
    Zip(#[from] zip::result::ZipError),
}

impl Error {
    /// Errors that must stop the whole run instead of just the current page.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Inconsistent(_))
    }
}
