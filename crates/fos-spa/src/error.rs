//! Page load errors

use fos_dom::DomError;
use fos_html::ParseError;
use fos_net::NetError;

/// Why a navigation could not swap the page content
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Cannot resolve '{href}' against {base}: {reason}")]
    InvalidUrl { href: String, base: String, reason: String },

    #[error("Request failed: {0}")]
    Net(#[from] NetError),

    #[error("Failed to load {url}: HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to parse {url}: {source}")]
    Parse { url: String, source: ParseError },

    #[error("Page {url} has no '{selector}' to insert")]
    MissingContent { url: String, selector: String },

    #[error("Current page has no '{selector}' to replace")]
    MissingLiveContent { selector: String },

    #[error("DOM error: {0}")]
    Dom(#[from] DomError),
}

/// Why a page session could not be set up
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    #[error("Failed to parse page: {0}")]
    Parse(#[from] ParseError),

    #[error("DOM error: {0}")]
    Dom(#[from] DomError),
}
