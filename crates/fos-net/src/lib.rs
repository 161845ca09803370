//! fOS Networking
//!
//! Page fetching: the `Fetcher` seam, an HTTP implementation backed by
//! reqwest and an in-memory implementation for hosts and tests.

mod fetch;
mod loader;
mod memory;

pub use fetch::{FetchResponse, Fetcher};
pub use loader::ResourceLoader;
pub use memory::MemoryFetcher;
pub use url::Url;

/// HTTP Response
#[derive(Debug, Clone, Default)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

/// Network error
#[derive(Debug, thiserror::Error)]
pub enum NetError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
